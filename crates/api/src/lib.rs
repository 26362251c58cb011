//! `labelbase-api` — the HTTP surface.
//!
//! Handlers run the same pipeline end to end: resolve the principal from the
//! bearer token, gate on permissions, validate, persist, record the audit
//! trail, and answer with the uniform envelope.

pub mod app;
pub mod identity;
pub mod middleware;
