use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use labelbase_core::DocumentId;

use crate::{ActivityKind, ActivityRecord, ClientInfo};

/// Failure appending to the audit collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("audit append failed: {0}")]
pub struct AppendError(pub String);

/// Append-only audit collection boundary, implemented by the store crate.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn append(&self, record: ActivityRecord) -> Result<ActivityRecord, AppendError>;

    /// Newest-first records for one actor.
    async fn list_by_user(&self, user_id: DocumentId) -> Result<Vec<ActivityRecord>, AppendError>;
}

/// Best-effort audit recorder.
///
/// Failure policy: a persistence failure is logged and `None` is returned.
/// The triggering business operation has already been committed and must not
/// be rolled back or retried because the audit write failed (at-most-once).
#[derive(Clone)]
pub struct ActivityLogger {
    store: Arc<dyn ActivityStore>,
}

impl ActivityLogger {
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    pub async fn record(
        &self,
        actor: DocumentId,
        kind: ActivityKind,
        client: ClientInfo,
    ) -> Option<ActivityRecord> {
        let record = ActivityRecord::new(actor, &kind, client);
        match self.store.append(record).await {
            Ok(stored) => Some(stored),
            Err(err) => {
                tracing::warn!(
                    activity_type = kind.activity_type(),
                    error = %err,
                    "failed to record activity"
                );
                None
            }
        }
    }
}
