use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labelbase_core::{DocumentId, DomainError};

/// Health classification of an ingredient.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthFlag {
    Good,
    #[default]
    Neutral,
    Bad,
    Dangerous,
}

impl core::fmt::Display for HealthFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            HealthFlag::Good => "good",
            HealthFlag::Neutral => "neutral",
            HealthFlag::Bad => "bad",
            HealthFlag::Dangerous => "dangerous",
        };
        f.write_str(s)
    }
}

/// An ingredient reference record.
///
/// # Invariants
/// - `name` is unique within the collection, lowercased and trimmed at write
///   time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: DocumentId,
    pub name: String,
    pub description: String,
    pub common_uses: Vec<String>,
    pub health_flag: HealthFlag,
    pub health_tags: Vec<String>,
    pub sources: Vec<String>,
    pub references: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw ingredient fields as submitted; optional collections default to empty
/// and the health flag defaults to neutral.
#[derive(Debug, Clone, Default)]
pub struct IngredientDraft {
    pub description: Option<String>,
    pub common_uses: Option<Vec<String>>,
    pub health_flag: Option<HealthFlag>,
    pub health_tags: Option<Vec<String>>,
    pub sources: Option<Vec<String>>,
    pub references: Option<Vec<String>>,
}

impl Ingredient {
    /// Validate and normalize a new ingredient.
    pub fn new(name: &str, draft: IngredientDraft) -> Result<Self, DomainError> {
        let normalized = name.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("Ingredient name is required"));
        }

        let now = Utc::now();
        Ok(Self {
            id: DocumentId::new(),
            name: normalized,
            description: draft.description.unwrap_or_default(),
            common_uses: draft.common_uses.unwrap_or_default(),
            health_flag: draft.health_flag.unwrap_or_default(),
            health_tags: draft.health_tags.unwrap_or_default(),
            sources: draft.sources.unwrap_or_default(),
            references: draft.references.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}
