//! Admin user identity.
//!
//! Admin users are created through the public application flow and start
//! dormant (`is_active = false`); only a super-admin action activates them
//! (out of scope here). The activation flag is enforced at credential
//! verification time: a dormant user never authenticates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use labelbase_core::DocumentId;

use crate::Role;

/// A stored admin user document.
///
/// # Invariants
/// - `email` is globally unique (storage index is the guarantor).
/// - `permissions` reference permission documents, many-to-many.
/// - `is_active = false` users must never authenticate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: DocumentId,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub role: Role,
    pub permissions: Vec<DocumentId>,
    pub notes: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated application for a new admin account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub role: Role,
    pub notes: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Full name, email, and password are required.")]
    MissingFields,

    #[error("Invalid role specified.")]
    InvalidRole,
}

impl Application {
    /// Validate the raw submission fields.
    ///
    /// `role` is the applicant's requested role as submitted; only manager and
    /// admin are acceptable, defaulting to manager when absent.
    pub fn new(
        full_name: &str,
        email: &str,
        password: &str,
        phone_number: Option<&str>,
        role: Option<Role>,
        notes: Option<&str>,
    ) -> Result<Self, ApplicationError> {
        if full_name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(ApplicationError::MissingFields);
        }

        let role = role.unwrap_or(Role::Manager);
        if !Role::applicant_roles().contains(&role) {
            return Err(ApplicationError::InvalidRole);
        }

        Ok(Self {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            phone_number: phone_number.unwrap_or("").to_string(),
            role,
            notes: notes.unwrap_or("").to_string(),
        })
    }
}

impl AdminUser {
    /// Build the dormant user document for an accepted application.
    ///
    /// `password_hash` is the already-hashed credential; the plaintext never
    /// reaches storage.
    pub fn from_application(application: &Application, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            full_name: application.full_name.clone(),
            email: application.email.clone(),
            password_hash,
            phone_number: application.phone_number.clone(),
            role: application.role,
            permissions: Vec::new(),
            notes: application.notes.clone(),
            is_active: false,
            created_at: now,
            updated_at: now,
        }
    }
}
