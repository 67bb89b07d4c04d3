use serde_json::Value;

use crate::path::{reference_at, text_at};
use crate::table::FlatRow;

/// Flattened Condition resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionRow {
    pub id: Option<String>,
    pub clinical_status: Option<String>,
    pub verification_status: Option<String>,
    pub category_code: Option<String>,
    pub category_display: Option<String>,
    pub condition_code: Option<String>,
    pub condition_display: Option<String>,
    pub subject_reference: Option<String>,
    pub encounter_reference: Option<String>,
    pub onset_date: Option<String>,
    pub recorded_date: Option<String>,
}

impl ConditionRow {
    /// Onset and recorded dates are kept exactly as written in the resource.
    pub fn from_resource(resource: &Value) -> Self {
        Self {
            id: text_at(resource, "/id"),
            clinical_status: text_at(resource, "/clinicalStatus/coding/0/code"),
            verification_status: text_at(resource, "/verificationStatus/coding/0/code"),
            category_code: text_at(resource, "/category/0/coding/0/code"),
            category_display: text_at(resource, "/category/0/coding/0/display"),
            condition_code: text_at(resource, "/code/coding/0/code"),
            condition_display: text_at(resource, "/code/coding/0/display"),
            subject_reference: reference_at(resource, "/subject/reference"),
            encounter_reference: reference_at(resource, "/encounter/reference"),
            onset_date: text_at(resource, "/onsetDateTime"),
            recorded_date: text_at(resource, "/recordedDate"),
        }
    }
}

impl FlatRow for ConditionRow {
    const TABLE: &'static str = "condition";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "clinical_status",
        "verification_status",
        "category_code",
        "category_display",
        "condition_code",
        "condition_display",
        "subject_reference",
        "encounter_reference",
        "onset_date",
        "recorded_date",
    ];

    fn into_cells(self) -> Vec<Option<String>> {
        vec![
            self.id,
            self.clinical_status,
            self.verification_status,
            self.category_code,
            self.category_display,
            self.condition_code,
            self.condition_display,
            self.subject_reference,
            self.encounter_reference,
            self.onset_date,
            self.recorded_date,
        ]
    }
}
