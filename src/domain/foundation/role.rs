//! User roles and role-based policy checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DomainError, ErrorCode};

/// Role carried by the auth token.
///
/// Roles are ordered by privilege: every mentor capability is also available
/// to admins, and every student capability to mentors and admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Mentor,
    Admin,
}

impl Role {
    /// Returns an error unless the role is `Admin`.
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if *self == Role::Admin {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Administrator role required",
            ))
        }
    }

    /// Returns an error unless the role is `Mentor` or `Admin`.
    pub fn require_mentor(&self) -> Result<(), DomainError> {
        match self {
            Role::Mentor | Role::Admin => Ok(()),
            Role::Student => Err(DomainError::new(
                ErrorCode::Forbidden,
                "Mentor role required",
            )),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Student => "student",
            Role::Mentor => "mentor",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "mentor" => Ok(Role::Mentor),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::validation(
                "role",
                format!("Unknown role: {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_admin_accepts_admin_only() {
        assert!(Role::Admin.require_admin().is_ok());
        assert!(Role::Mentor.require_admin().is_err());
        assert!(Role::Student.require_admin().is_err());
    }

    #[test]
    fn require_mentor_accepts_mentor_and_admin() {
        assert!(Role::Mentor.require_mentor().is_ok());
        assert!(Role::Admin.require_mentor().is_ok());
        assert!(Role::Student.require_mentor().is_err());
    }

    #[test]
    fn role_roundtrips_through_string() {
        for role in [Role::Student, Role::Mentor, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_role_fails_to_parse() {
        let result: Result<Role, _> = "superuser".parse();
        assert!(result.is_err());
    }
}
