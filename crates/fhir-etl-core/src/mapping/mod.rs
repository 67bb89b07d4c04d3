//! Row mappers for the supported resource types.
//!
//! Every mapper is a total function from a raw resource to a flat row. Each
//! column is extracted independently, so a missing or malformed path only
//! affects its own column.

mod condition;
mod dates;
mod encounter;
mod patient;

pub use condition::ConditionRow;
pub use dates::{normalize_date, normalize_date_time};
pub use encounter::EncounterRow;
pub use patient::{
    MEDICAL_RECORD_NUMBER_CODE, PatientRow, SOCIAL_SECURITY_NUMBER_CODE, US_CORE_RACE_URL,
};

use tracing::debug;

use crate::resource::{ResourceGroups, ResourceType};
use crate::table::FlatTable;

/// The three cleaned output tables of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub patient: FlatTable,
    pub condition: FlatTable,
    pub encounter: FlatTable,
}

impl Tables {
    /// Table for the given resource type.
    pub fn get(&self, resource_type: ResourceType) -> &FlatTable {
        match resource_type {
            ResourceType::Patient => &self.patient,
            ResourceType::Condition => &self.condition,
            ResourceType::Encounter => &self.encounter,
        }
    }

    /// Tables in load order: patient, condition, encounter.
    pub fn iter(&self) -> impl Iterator<Item = &FlatTable> {
        ResourceType::ALL.into_iter().map(|t| self.get(t))
    }

    pub fn into_vec(self) -> Vec<FlatTable> {
        vec![self.patient, self.condition, self.encounter]
    }

    /// Total rows across all tables.
    pub fn total_rows(&self) -> usize {
        self.iter().map(FlatTable::len).sum()
    }
}

/// Maps every grouped resource into its flat table.
pub fn transform(groups: &ResourceGroups) -> Tables {
    let tables = Tables {
        patient: FlatTable::from_rows(groups.patients().iter().map(PatientRow::from_resource)),
        condition: FlatTable::from_rows(
            groups.conditions().iter().map(ConditionRow::from_resource),
        ),
        encounter: FlatTable::from_rows(
            groups.encounters().iter().map(EncounterRow::from_resource),
        ),
    };

    debug!(
        patients = tables.patient.len(),
        conditions = tables.condition.len(),
        encounters = tables.encounter.len(),
        "Transformed resources into tables"
    );

    tables
}
