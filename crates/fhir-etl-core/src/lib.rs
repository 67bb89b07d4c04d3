//! Extraction and flattening of FHIR bundles.
//!
//! This crate covers the first two stages of the loader:
//!
//! - [`bundle`] scans a directory of bundle files and groups the contained
//!   resources by `resourceType`
//! - [`mapping`] turns each Patient, Condition and Encounter resource into a
//!   flat row and collects the rows into cleaned [`FlatTable`]s
//!
//! # Example
//!
//! ```ignore
//! use fhir_etl_core::{read_bundles, transform};
//!
//! let extraction = read_bundles("data")?;
//! let tables = transform(&extraction.resources);
//! assert_eq!(tables.patient.name(), "patient");
//! ```

pub mod bundle;
pub mod error;
pub mod mapping;
pub mod path;
pub mod resource;
pub mod table;

pub use bundle::{Extraction, SkippedFile, read_bundles};
pub use error::{CoreError, Result};
pub use mapping::{ConditionRow, EncounterRow, PatientRow, Tables, transform};
pub use resource::{ResourceGroups, ResourceType};
pub use table::{FlatRow, FlatTable, UNKNOWN, clean_cell};
