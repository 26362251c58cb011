use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labelbase_core::{DocumentId, DomainError};

/// A product category.
///
/// # Invariants
/// - `name` is unique within the collection, lowercased and trimmed at write
///   time (the storage index is the true guarantor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DocumentId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Validate and normalize a new category.
    pub fn new(name: &str, description: Option<&str>) -> Result<Self, DomainError> {
        let normalized = normalize_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: DocumentId::new(),
            name: normalized,
            description: description.unwrap_or("").to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Lowercase + trim, rejecting empty names.
pub fn normalize_name(name: &str) -> Result<String, DomainError> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(DomainError::validation("Category name is required"));
    }
    Ok(normalized)
}
