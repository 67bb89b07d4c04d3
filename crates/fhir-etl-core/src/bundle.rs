//! Bundle directory reader.
//!
//! Scans a directory for `*.json` bundle files and groups the resources found
//! in each bundle's `entry` list by resource type. A file that cannot be read
//! or parsed is logged and skipped; the scan carries on with the next file.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::{CoreError, Result};
use crate::resource::{ResourceGroups, ResourceType};

/// File extension recognised as a bundle.
pub const BUNDLE_EXTENSION: &str = "json";

/// A bundle file that was skipped during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning a bundle directory.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Resources grouped by type, in file and entry order.
    pub resources: ResourceGroups,
    /// Number of bundle files that were parsed.
    pub files_read: usize,
    /// Bundle files that could not be read or parsed.
    pub skipped: Vec<SkippedFile>,
}

/// Reads every bundle file in `dir`.
///
/// Files are visited in directory-listing order, which is platform dependent
/// and not sorted. Only a failure to list `dir` itself is returned as an error.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn read_bundles(dir: impl AsRef<Path>) -> Result<Extraction> {
    let dir = dir.as_ref();
    let listing = std::fs::read_dir(dir).map_err(|e| CoreError::data_dir(dir, e))?;

    let mut extraction = Extraction::default();

    for entry in listing {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!(error = %e, "Failed to read directory entry, skipping");
                continue;
            }
        };

        if !is_bundle_file(&path) {
            debug!(file = %path.display(), "Not a bundle file, skipping");
            continue;
        }

        match read_bundle_file(&path) {
            Ok(groups) => {
                debug!(
                    file = %path.display(),
                    patients = groups.patients().len(),
                    conditions = groups.conditions().len(),
                    encounters = groups.encounters().len(),
                    "Read bundle"
                );
                extraction.resources.extend(groups);
                extraction.files_read += 1;
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping bundle file");
                extraction.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        files = extraction.files_read,
        skipped = extraction.skipped.len(),
        patients = extraction.resources.patients().len(),
        conditions = extraction.resources.conditions().len(),
        encounters = extraction.resources.encounters().len(),
        "Extraction finished"
    );

    Ok(extraction)
}

/// Reads and groups a single bundle file.
pub fn read_bundle_file(path: &Path) -> Result<ResourceGroups> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::read_file(path, e))?;
    let bundle: Value =
        serde_json::from_str(&content).map_err(|e| CoreError::invalid_json(path, e))?;
    Ok(group_entries(&bundle))
}

/// Groups the resources wrapped in a bundle's `entry` list.
///
/// Entries without a `resource` object, or whose `resourceType` is not one
/// we flatten, are ignored. A bundle without an `entry` list yields nothing.
pub fn group_entries(bundle: &Value) -> ResourceGroups {
    let mut groups = ResourceGroups::new();

    let Some(entries) = bundle.get("entry").and_then(Value::as_array) else {
        return groups;
    };

    for resource in entries.iter().filter_map(|entry| entry.get("resource")) {
        if let Some(resource_type) = ResourceType::of(resource) {
            groups.push(resource_type, resource.clone());
        }
    }

    groups
}

fn is_bundle_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(OsStr::to_str) == Some(BUNDLE_EXTENSION)
}
