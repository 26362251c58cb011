//! `labelbase-audit` — immutable activity records.
//!
//! Every staff action is recorded as a write-once audit event. Audit writes
//! are best-effort: a failed append is logged and swallowed, never allowed to
//! fail the business operation it describes.

pub mod activity;
pub mod logger;

pub use activity::{ActivityKind, ActivityRecord, ClientInfo, ProductViewScope};
pub use logger::{ActivityLogger, ActivityStore, AppendError};
