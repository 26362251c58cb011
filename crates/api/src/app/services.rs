//! The composition root.

use std::sync::Arc;

use chrono::Duration;

use labelbase_audit::ActivityLogger;
use labelbase_auth::TokenCodec;
use labelbase_store::{Database, StoreError};

/// Lifetime of issued session tokens, in hours.
pub const SESSION_TTL_HOURS: i64 = 8;

pub struct AppServices {
    pub db: Arc<Database>,
    pub tokens: TokenCodec,
    pub audit: ActivityLogger,
}

impl AppServices {
    pub fn session_ttl(&self) -> Duration {
        Duration::hours(SESSION_TTL_HOURS)
    }
}

/// Wire the full service set over the in-memory document store.
///
/// The storage handle connects lazily, but the audit logger needs the backend
/// up front, so the first connection happens here.
pub async fn build_services(jwt_secret: &[u8]) -> Result<AppServices, StoreError> {
    let db = Arc::new(Database::in_memory());
    let backend = db.connect().await?.clone();
    Ok(AppServices {
        db,
        tokens: TokenCodec::new(jwt_secret),
        audit: ActivityLogger::new(backend),
    })
}
