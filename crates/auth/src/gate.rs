//! The authorization gate.
//!
//! One decision function for every handler: the privileged-role bypass lives
//! here, once, instead of being re-implemented per endpoint. The gate does
//! no IO; callers resolve the [`Principal`] first.

use serde::Serialize;

use crate::{Permission, Principal, Role};

/// A declared permission requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Exactly this permission.
    One(Permission),
    /// Any of these permissions (first match in declaration order wins).
    AnyOf(Vec<Permission>),
    /// All of these permissions.
    AllOf(Vec<Permission>),
}

impl Requirement {
    fn required_names(&self) -> Vec<String> {
        match self {
            Requirement::One(p) => vec![p.as_str().to_string()],
            Requirement::AnyOf(ps) | Requirement::AllOf(ps) => {
                ps.iter().map(|p| p.as_str().to_string()).collect()
            }
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    /// True when a privileged role skipped the permission check entirely.
    pub bypassed: bool,
    /// The permission names the caller actually holds.
    pub granted: Vec<String>,
    /// First matching permission in declaration order (`One`/`AnyOf`).
    pub matched: Option<String>,
    /// The exact missing subset (`AllOf`).
    pub missing: Vec<String>,
    pub error: Option<String>,
}

/// Structured denial payload, returned verbatim under `details` in 403 bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenialDetails {
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
    pub user_permissions: Vec<String>,
    pub message: String,
}

/// Decide whether `principal` satisfies `requirement`.
///
/// `privileged` roles skip the permission check unconditionally. An absent
/// principal is always denied with "User not authenticated".
pub fn authorize(
    principal: Option<&Principal>,
    requirement: &Requirement,
    privileged: &[Role],
) -> Decision {
    let Some(principal) = principal else {
        return Decision {
            allowed: false,
            bypassed: false,
            granted: Vec::new(),
            matched: None,
            missing: requirement.required_names(),
            error: Some("User not authenticated".to_string()),
        };
    };

    let granted = principal.permission_names();

    if privileged.contains(&principal.role) {
        return Decision {
            allowed: true,
            bypassed: true,
            granted,
            matched: None,
            missing: Vec::new(),
            error: None,
        };
    }

    match requirement {
        Requirement::One(p) => {
            let held = granted.iter().any(|g| g == p.as_str());
            Decision {
                allowed: held,
                bypassed: false,
                matched: held.then(|| p.as_str().to_string()),
                missing: if held {
                    Vec::new()
                } else {
                    vec![p.as_str().to_string()]
                },
                error: (!held)
                    .then(|| format!("Insufficient permissions. Required: {}", p.as_str())),
                granted,
            }
        }
        Requirement::AnyOf(ps) => {
            let matched = ps
                .iter()
                .find(|p| granted.iter().any(|g| g == p.as_str()))
                .map(|p| p.as_str().to_string());
            let held = matched.is_some();
            Decision {
                allowed: held,
                bypassed: false,
                matched,
                missing: Vec::new(),
                error: (!held).then(|| {
                    format!(
                        "Insufficient permissions. Required any of: {}",
                        join(ps)
                    )
                }),
                granted,
            }
        }
        Requirement::AllOf(ps) => {
            let missing: Vec<String> = ps
                .iter()
                .filter(|p| !granted.iter().any(|g| g == p.as_str()))
                .map(|p| p.as_str().to_string())
                .collect();
            let held = missing.is_empty();
            Decision {
                allowed: held,
                bypassed: false,
                matched: None,
                error: (!held).then(|| {
                    format!("Insufficient permissions. Missing: {}", missing.join(", "))
                }),
                missing,
                granted,
            }
        }
    }
}

impl Decision {
    /// Shape the denial payload for an HTTP 403 body.
    ///
    /// The phrasing differs per entry point (one vs any-of vs all-of).
    pub fn denial_details(&self, requirement: &Requirement) -> DenialDetails {
        let required = requirement.required_names();
        let message = match requirement {
            Requirement::One(p) => format!(
                "You need the '{}' permission to perform this action.",
                p.as_str()
            ),
            Requirement::AnyOf(_) => {
                format!("You need any of these permissions: {}", required.join(", "))
            }
            Requirement::AllOf(_) => format!(
                "You need all of these permissions: {}. Missing: {}",
                required.join(", "),
                self.missing.join(", ")
            ),
        };
        DenialDetails {
            required,
            missing: matches!(requirement, Requirement::AllOf(_))
                .then(|| self.missing.clone()),
            user_permissions: self.granted.clone(),
            message,
        }
    }
}

fn join(ps: &[Permission]) -> String {
    ps.iter()
        .map(Permission::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
