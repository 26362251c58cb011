use core::str::FromStr;

use serde::{Deserialize, Serialize};

use labelbase_core::DomainError;

/// Staff role.
///
/// The role set is closed: every admin user is exactly one of these. The
/// super-admin role bypasses permission checks entirely at the gate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::Admin => "admin",
            Role::Manager => "manager",
        }
    }

    /// Roles an applicant may request for themselves. Super-admin is never
    /// self-assignable.
    pub fn applicant_roles() -> &'static [Role] {
        &[Role::Manager, Role::Admin]
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super-admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_kebab_case() {
        for role in [Role::SuperAdmin, Role::Admin, Role::Manager] {
            let s = serde_json::to_string(&role).unwrap();
            let back: Role = serde_json::from_str(&s).unwrap();
            assert_eq!(role, back);
            assert_eq!(s.trim_matches('"'), role.as_str());
        }
    }

    #[test]
    fn applicants_cannot_request_super_admin() {
        assert!(!Role::applicant_roles().contains(&Role::SuperAdmin));
        assert!("super-admin".parse::<Role>().is_ok());
        assert!("owner".parse::<Role>().is_err());
    }
}
