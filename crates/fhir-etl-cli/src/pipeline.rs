use std::path::Path;

use anyhow::{Context, Result};
use fhir_etl_config::{DatabaseSettings, EtlConfig};
use fhir_etl_core::{SkippedFile, Tables, read_bundles, transform};
use fhir_etl_postgres::{BulkLoader, PostgresConfig, TableLoad};
use tracing::info;

/// What a run did.
#[derive(Debug)]
pub struct RunSummary {
    pub files_read: usize,
    pub skipped: Vec<SkippedFile>,
    pub loads: Vec<TableLoad>,
}

impl RunSummary {
    pub fn failed_tables(&self) -> impl Iterator<Item = &str> {
        self.loads
            .iter()
            .filter(|load| !load.is_loaded())
            .map(TableLoad::table)
    }
}

/// Extracted and flattened resources of one run.
pub struct Prepared {
    pub files_read: usize,
    pub skipped: Vec<SkippedFile>,
    pub tables: Tables,
}

pub fn postgres_config(settings: &DatabaseSettings) -> PostgresConfig {
    PostgresConfig::new(&settings.host, &settings.dbname, &settings.user)
        .with_port(settings.port)
        .with_password(&settings.password)
}

/// Reads the bundle directory and flattens its resources.
pub fn prepare(data_dir: &Path) -> Result<Prepared> {
    let extraction = read_bundles(data_dir)
        .with_context(|| format!("Failed to extract bundles from {}", data_dir.display()))?;

    let tables = transform(&extraction.resources);

    Ok(Prepared {
        files_read: extraction.files_read,
        skipped: extraction.skipped,
        tables,
    })
}

/// Runs extraction, transformation and loading in order.
pub async fn run(config: &EtlConfig) -> Result<RunSummary> {
    let prepared = prepare(&config.data_dir)?;

    let db = postgres_config(&config.db_config);
    info!(
        url = %db.display_url(),
        rows = prepared.tables.total_rows(),
        "Loading tables"
    );

    let loads = BulkLoader::new(db)
        .load_all(&prepared.tables.into_vec())
        .await
        .context("Failed to load tables into the database")?;

    Ok(RunSummary {
        files_read: prepared.files_read,
        skipped: prepared.skipped,
        loads,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_postgres_config_from_settings() {
        let settings = DatabaseSettings {
            host: "db".into(),
            port: 6543,
            dbname: "fhir".into(),
            user: "etl".into(),
            password: "pw".into(),
        };

        let config = postgres_config(&settings);
        assert_eq!(config.connection_url(), "postgres://etl:pw@db:6543/fhir");
    }

    #[test]
    fn test_prepare_reads_and_flattens() {
        let dir = TempDir::new().unwrap();
        let bundle = json!({
            "resourceType": "Bundle",
            "entry": [
                {"resource": {"resourceType": "Patient", "id": "123"}},
                {"resource": {"resourceType": "Condition", "id": "c1", "subject": {"reference": "urn:uuid:123"}}},
                {"resource": {"resourceType": "Observation", "id": "o1"}}
            ]
        });
        fs::write(dir.path().join("bundle.json"), bundle.to_string()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let prepared = prepare(dir.path()).unwrap();

        assert_eq!(prepared.files_read, 1);
        assert_eq!(prepared.skipped.len(), 1);
        assert_eq!(prepared.tables.patient.len(), 1);
        assert_eq!(prepared.tables.condition.cell(0, "subject_reference"), Some("123"));
        assert!(prepared.tables.encounter.is_empty());
    }

    #[test]
    fn test_prepare_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = prepare(&dir.path().join("absent")).err().unwrap();
        assert!(err.to_string().contains("Failed to extract bundles"));
    }

    #[test]
    fn test_failed_tables() {
        let summary = RunSummary {
            files_read: 1,
            skipped: vec![],
            loads: vec![
                TableLoad::Loaded {
                    table: "patient".into(),
                    rows: 1,
                },
                TableLoad::Failed {
                    table: "condition".into(),
                    reason: "boom".into(),
                },
            ],
        };

        assert_eq!(summary.failed_tables().collect::<Vec<_>>(), ["condition"]);
    }
}
