use serde_json::Value;

use super::dates::{normalize_date, normalize_date_time};
use crate::path::{find_first, text_at, text_eq};
use crate::table::{FlatRow, UNKNOWN};

/// US Core race extension URL. Matched exactly.
pub const US_CORE_RACE_URL: &str = "http://hl7.org/fhir/us/core/StructureDefinition/us-core-race";

/// Identifier type code for medical record numbers.
pub const MEDICAL_RECORD_NUMBER_CODE: &str = "MR";

/// Identifier type code for social security numbers.
pub const SOCIAL_SECURITY_NUMBER_CODE: &str = "SS";

/// Flattened Patient resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientRow {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub race: Option<String>,
    pub deceased_datetime: Option<String>,
    pub medical_record_number: Option<String>,
    pub ssn: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl PatientRow {
    pub fn from_resource(resource: &Value) -> Self {
        Self {
            id: text_at(resource, "/id"),
            first_name: text_at(resource, "/name/0/given/0"),
            last_name: text_at(resource, "/name/0/family"),
            gender: text_at(resource, "/gender").or_else(|| Some(UNKNOWN.to_string())),
            birth_date: text_at(resource, "/birthDate").and_then(|d| normalize_date(&d)),
            race: race(resource),
            deceased_datetime: text_at(resource, "/deceasedDateTime")
                .and_then(|d| normalize_date_time(&d)),
            medical_record_number: identifier_value(resource, MEDICAL_RECORD_NUMBER_CODE),
            ssn: identifier_value(resource, SOCIAL_SECURITY_NUMBER_CODE),
            address_line: text_at(resource, "/address/0/line/0"),
            city: text_at(resource, "/address/0/city"),
            state: text_at(resource, "/address/0/state"),
            country: text_at(resource, "/address/0/country"),
        }
    }
}

fn race(resource: &Value) -> Option<String> {
    find_first(resource, "/extension", |ext| {
        text_eq(ext, "/url", US_CORE_RACE_URL)
    })
    .and_then(|ext| text_at(ext, "/extension/0/valueCoding/display"))
}

fn identifier_value(resource: &Value, type_code: &str) -> Option<String> {
    find_first(resource, "/identifier", |identifier| {
        text_eq(identifier, "/type/coding/0/code", type_code)
    })
    .and_then(|identifier| text_at(identifier, "/value"))
}

impl FlatRow for PatientRow {
    const TABLE: &'static str = "patient";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "gender",
        "birth_date",
        "race",
        "deceased_datetime",
        "medical_record_number",
        "ssn",
        "address_line",
        "city",
        "state",
        "country",
    ];

    fn into_cells(self) -> Vec<Option<String>> {
        vec![
            self.id,
            self.first_name,
            self.last_name,
            self.gender,
            self.birth_date,
            self.race,
            self.deceased_datetime,
            self.medical_record_number,
            self.ssn,
            self.address_line,
            self.city,
            self.state,
            self.country,
        ]
    }
}
