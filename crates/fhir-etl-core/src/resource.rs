use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Resource types the loader flattens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Patient,
    Condition,
    Encounter,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Patient,
        ResourceType::Condition,
        ResourceType::Encounter,
    ];

    /// Destination table for this resource type.
    pub fn table_name(&self) -> &'static str {
        match self {
            ResourceType::Patient => "patient",
            ResourceType::Condition => "condition",
            ResourceType::Encounter => "encounter",
        }
    }

    /// Reads the `resourceType` discriminator of a resource object.
    ///
    /// Returns `None` for missing discriminators and for resource types the
    /// loader does not flatten.
    pub fn of(resource: &Value) -> Option<Self> {
        resource
            .get("resourceType")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Patient => write!(f, "Patient"),
            ResourceType::Condition => write!(f, "Condition"),
            ResourceType::Encounter => write!(f, "Encounter"),
        }
    }
}

impl FromStr for ResourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(ResourceType::Patient),
            "Condition" => Ok(ResourceType::Condition),
            "Encounter" => Ok(ResourceType::Encounter),
            _ => Err(CoreError::UnknownResourceType(s.to_string())),
        }
    }
}

/// Resources grouped by type, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceGroups {
    patients: Vec<Value>,
    conditions: Vec<Value>,
    encounters: Vec<Value>,
}

impl ResourceGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resource to the group for `resource_type`.
    pub fn push(&mut self, resource_type: ResourceType, resource: Value) {
        self.group_mut(resource_type).push(resource);
    }

    /// Appends a resource if its `resourceType` is one we flatten.
    ///
    /// Returns the type the resource was filed under.
    pub fn push_resource(&mut self, resource: Value) -> Option<ResourceType> {
        let resource_type = ResourceType::of(&resource)?;
        self.push(resource_type, resource);
        Some(resource_type)
    }

    fn group_mut(&mut self, resource_type: ResourceType) -> &mut Vec<Value> {
        match resource_type {
            ResourceType::Patient => &mut self.patients,
            ResourceType::Condition => &mut self.conditions,
            ResourceType::Encounter => &mut self.encounters,
        }
    }

    pub fn patients(&self) -> &[Value] {
        &self.patients
    }

    pub fn conditions(&self) -> &[Value] {
        &self.conditions
    }

    pub fn encounters(&self) -> &[Value] {
        &self.encounters
    }

    pub fn len(&self) -> usize {
        self.patients.len() + self.conditions.len() + self.encounters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves every resource of `other` to the end of the matching group.
    pub fn extend(&mut self, other: ResourceGroups) {
        self.patients.extend(other.patients);
        self.conditions.extend(other.conditions);
        self.encounters.extend(other.encounters);
    }
}
