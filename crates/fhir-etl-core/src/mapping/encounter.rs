use serde_json::Value;

use crate::path::{reference_at, text_at};
use crate::table::FlatRow;

/// Flattened Encounter resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncounterRow {
    pub id: Option<String>,
    pub status: Option<String>,
    pub class_code: Option<String>,
    pub type_code: Option<String>,
    pub type_display: Option<String>,
    pub subject_reference: Option<String>,
    pub location_reference: Option<String>,
    pub location_display: Option<String>,
    pub service_provider_reference: Option<String>,
    pub service_provider_display: Option<String>,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
}

impl EncounterRow {
    pub fn from_resource(resource: &Value) -> Self {
        Self {
            id: text_at(resource, "/id"),
            status: text_at(resource, "/status"),
            class_code: text_at(resource, "/class/code"),
            type_code: text_at(resource, "/type/0/coding/0/code"),
            type_display: text_at(resource, "/type/0/coding/0/display"),
            subject_reference: reference_at(resource, "/subject/reference"),
            location_reference: reference_at(resource, "/location/0/location/reference"),
            location_display: text_at(resource, "/location/0/location/display"),
            service_provider_reference: reference_at(resource, "/serviceProvider/reference"),
            service_provider_display: text_at(resource, "/serviceProvider/display"),
            period_start: text_at(resource, "/period/start"),
            period_end: text_at(resource, "/period/end"),
        }
    }
}

impl FlatRow for EncounterRow {
    const TABLE: &'static str = "encounter";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "status",
        "class_code",
        "type_code",
        "type_display",
        "subject_reference",
        "location_reference",
        "location_display",
        "service_provider_reference",
        "service_provider_display",
        "period_start",
        "period_end",
    ];

    fn into_cells(self) -> Vec<Option<String>> {
        vec![
            self.id,
            self.status,
            self.class_code,
            self.type_code,
            self.type_display,
            self.subject_reference,
            self.location_reference,
            self.location_display,
            self.service_provider_reference,
            self.service_provider_display,
            self.period_start,
            self.period_end,
        ]
    }
}
