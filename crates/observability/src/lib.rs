//! `labelbase-observability` — process logging setup.

mod tracing_init;

pub use tracing_init::init;
