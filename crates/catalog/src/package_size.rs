use serde::{Deserialize, Serialize};

use labelbase_core::{DocumentId, DomainError};

/// A package size reference record (e.g. "Family Pack", 500, "g").
///
/// No uniqueness constraint and no timestamps: this collection is free-form
/// reference data keyed only by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSize {
    pub id: DocumentId,
    pub size_name: String,
    pub size_value: String,
    pub size_unit: String,
}

impl PackageSize {
    pub fn new(
        size_name: &str,
        size_value: Option<&str>,
        size_unit: Option<&str>,
    ) -> Result<Self, DomainError> {
        let size_name = size_name.trim();
        if size_name.is_empty() {
            return Err(DomainError::validation("Size name is required"));
        }
        Ok(Self {
            id: DocumentId::new(),
            size_name: size_name.to_string(),
            size_value: size_value.unwrap_or("").to_string(),
            size_unit: size_unit.unwrap_or("").to_string(),
        })
    }
}
