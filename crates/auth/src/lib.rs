//! `labelbase-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the API layer
//! resolves a [`Principal`] per request and asks the gate for a decision.

pub mod admin_user;
pub mod claims;
pub mod gate;
pub mod password;
pub mod permission;
pub mod principal;
pub mod role;

pub use admin_user::{AdminUser, Application, ApplicationError};
pub use claims::{SessionClaims, TokenCodec, TokenError, validate_claims};
pub use gate::{Decision, DenialDetails, Requirement, authorize};
pub use password::{PasswordError, hash_password, verify_password};
pub use permission::{Permission, PermissionRecord, seed_permissions};
pub use principal::Principal;
pub use role::Role;
