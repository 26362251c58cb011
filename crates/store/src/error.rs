use thiserror::Error;

/// Storage-level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("duplicate value for unique index {collection}.{field}")]
    Duplicate {
        collection: &'static str,
        field: &'static str,
    },

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn duplicate(collection: &'static str, field: &'static str) -> Self {
        Self::Duplicate { collection, field }
    }
}
