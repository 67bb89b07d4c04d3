//! Bulk loading against a real PostgreSQL instance
//!
//! Each test starts its own PostgreSQL container through testcontainers, so
//! a running Docker daemon is required. Table DDL, CSV encoding and the COPY
//! statement are covered without a database by the unit tests in `schema.rs`
//! and `copy.rs`.

use fhir_etl_core::{FlatTable, ResourceGroups, Tables, transform};
use fhir_etl_postgres::{BulkLoader, PostgresConfig, TableLoad, connect, quote_ident};
use serde_json::json;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgConnection;
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

async fn start_postgres() -> (ContainerAsync<Postgres>, PostgresConfig) {
    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let config = PostgresConfig::new("localhost", "postgres", "postgres")
        .with_port(port)
        .with_password("postgres");

    (container, config)
}

fn sample_tables() -> Tables {
    let mut groups = ResourceGroups::new();
    groups.push_resource(json!({
        "resourceType": "Patient",
        "id": "123",
        "name": [{"given": ["John"], "family": "Doe"}],
        "gender": "male",
        "birthDate": "1980-01-01",
        "address": [{"line": ["1 Main St, Apt 2"], "city": "Boston", "state": "MA", "country": "US"}]
    }));
    groups.push_resource(json!({"resourceType": "Patient", "id": "456"}));
    groups.push_resource(json!({
        "resourceType": "Condition",
        "id": "COND001",
        "code": {"coding": [{"code": "C001", "display": "Hypertension"}]},
        "subject": {"reference": "urn:uuid:123"}
    }));
    groups.push_resource(json!({
        "resourceType": "Encounter",
        "id": "ENC001",
        "status": "finished",
        "subject": {"reference": "urn:uuid:123"},
        "location": [{"location": {"reference": "Location/LOC001", "display": "General Hospital"}}]
    }));
    transform(&groups)
}

async fn row_count(conn: &mut PgConnection, table: &str) -> i64 {
    let (count,): (i64,) = query_as(&format!("SELECT COUNT(*) FROM {}", quote_ident(table)))
        .fetch_one(&mut *conn)
        .await
        .expect("Failed to count rows");
    count
}

#[tokio::test]
async fn test_load_creates_tables_and_rows() {
    let (_container, config) = start_postgres().await;
    let loader = BulkLoader::new(config.clone());

    let loads = loader
        .load_all(&sample_tables().into_vec())
        .await
        .expect("Load should succeed");

    assert_eq!(
        loads,
        vec![
            TableLoad::Loaded {
                table: "patient".into(),
                rows: 2
            },
            TableLoad::Loaded {
                table: "condition".into(),
                rows: 1
            },
            TableLoad::Loaded {
                table: "encounter".into(),
                rows: 1
            },
        ]
    );

    let mut conn = connect(&config).await.expect("Failed to connect");

    let patients: Vec<(String, String, String, String)> = query_as(
        "SELECT id, first_name, address_line, race FROM patient ORDER BY id",
    )
    .fetch_all(&mut conn)
    .await
    .expect("Failed to query patients");

    assert_eq!(
        patients,
        vec![
            (
                "123".to_string(),
                "John".to_string(),
                "1 Main St  Apt 2".to_string(),
                "Unknown".to_string()
            ),
            (
                "456".to_string(),
                "Unknown".to_string(),
                "Unknown".to_string(),
                "Unknown".to_string()
            ),
        ]
    );

    let (subject,): (String,) = query_as("SELECT subject_reference FROM condition")
        .fetch_one(&mut conn)
        .await
        .expect("Failed to query conditions");
    assert_eq!(subject, "123");

    let (location, display): (String, String) =
        query_as("SELECT location_reference, location_display FROM encounter")
            .fetch_one(&mut conn)
            .await
            .expect("Failed to query encounters");
    assert_eq!(location, "Location/LOC001");
    assert_eq!(display, "General Hospital");
}

#[tokio::test]
async fn test_columns_are_varchar_in_order() {
    let (_container, config) = start_postgres().await;
    let tables = sample_tables();

    BulkLoader::new(config.clone())
        .load_table(&tables.encounter)
        .await
        .expect("Load should succeed");

    let mut conn = connect(&config).await.expect("Failed to connect");
    let columns: Vec<(String, String)> = query_as(
        "SELECT column_name::text, data_type::text FROM information_schema.columns
         WHERE table_name = 'encounter' ORDER BY ordinal_position",
    )
    .fetch_all(&mut conn)
    .await
    .expect("Failed to query columns");

    let names: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, tables.encounter.columns());
    assert!(
        columns
            .iter()
            .all(|(_, data_type)| data_type == "character varying")
    );
}

#[tokio::test]
async fn test_reload_replaces_rows() {
    let (_container, config) = start_postgres().await;
    let loader = BulkLoader::new(config.clone());
    let tables = sample_tables().into_vec();

    loader.load_all(&tables).await.expect("First load failed");
    loader.load_all(&tables).await.expect("Second load failed");

    let mut conn = connect(&config).await.expect("Failed to connect");
    assert_eq!(row_count(&mut conn, "patient").await, 2);
    assert_eq!(row_count(&mut conn, "condition").await, 1);
    assert_eq!(row_count(&mut conn, "encounter").await, 1);

    let smaller = transform(&ResourceGroups::new());
    loader
        .load_table(&smaller.patient)
        .await
        .expect("Empty load failed");
    assert_eq!(row_count(&mut conn, "patient").await, 0);
}

#[tokio::test]
async fn test_failed_copy_keeps_previous_rows_and_continues() {
    let (_container, config) = start_postgres().await;
    let tables = sample_tables();

    // An existing encounter table whose id column cannot hold "ENC001".
    let mut conn = connect(&config).await.expect("Failed to connect");
    let columns = incompatible_columns(&tables.encounter);
    sqlx_core::query::query(&format!("CREATE TABLE \"encounter\" ({columns})"))
        .execute(&mut conn)
        .await
        .expect("Failed to create table");
    sqlx_core::query::query("INSERT INTO \"encounter\" (\"id\") VALUES (42)")
        .execute(&mut conn)
        .await
        .expect("Failed to insert row");

    let loads = BulkLoader::new(config.clone())
        .load_all(&[
            tables.encounter.clone(),
            tables.patient.clone(),
            tables.condition.clone(),
        ])
        .await
        .expect("Copy failures must not abort the run");

    assert!(matches!(&loads[0], TableLoad::Failed { table, .. } if table == "encounter"));
    assert!(loads[1].is_loaded());
    assert!(loads[2].is_loaded());

    assert_eq!(row_count(&mut conn, "encounter").await, 1);
    assert_eq!(row_count(&mut conn, "patient").await, 2);
}

#[tokio::test]
async fn test_unreachable_database_is_an_error() {
    let config = PostgresConfig::new("127.0.0.1", "postgres", "postgres").with_port(1);
    let result = BulkLoader::new(config)
        .load_table(&FlatTable::new("patient", vec!["id".into()]))
        .await;

    assert!(result.is_err());
}

fn incompatible_columns(table: &FlatTable) -> String {
    table
        .columns()
        .iter()
        .map(|c| {
            let ty = if c == "id" { "INTEGER" } else { "VARCHAR" };
            format!("{} {ty}", quote_ident(c))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
