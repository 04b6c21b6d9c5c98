//! Authenticated identity and capability checks.
//!
//! Authentication itself (sessions, tokens, password handling) lives outside
//! this crate; the request layer resolves the caller into an [`Identity`]
//! and passes it to every operation. The guards here are the single place
//! where role and ownership rules are enforced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Platform role of an authenticated person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "MEMBER" => Ok(Role::Member),
            other => {
                Err(ValidationError::InvalidInput(format!("unknown role '{}'", other)).into())
            }
        }
    }
}

/// The resolved caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Requires the caller to be an administrator.
pub fn ensure_admin(actor: &Identity) -> Result<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "this action requires an administrator".to_string(),
        ))
    }
}

/// Requires the caller to be exactly the owner of the resource.
pub fn ensure_owner(actor: &Identity, owner_id: i64) -> Result<()> {
    if actor.user_id == owner_id {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "this action is reserved to the owner".to_string(),
        ))
    }
}

/// Requires the caller to be the owner of the resource or an administrator.
pub fn ensure_owner_or_admin(actor: &Identity, owner_id: i64) -> Result<()> {
    if actor.user_id == owner_id || actor.is_admin() {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "this action is reserved to the owner or an administrator".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_guard() {
        let admin = Identity::new(1, Role::Admin);
        let member = Identity::new(2, Role::Member);
        assert!(ensure_admin(&admin).is_ok());
        assert!(ensure_admin(&member).is_err());
    }

    #[test]
    fn test_owner_guard_excludes_admin() {
        let admin = Identity::new(1, Role::Admin);
        assert!(ensure_owner(&admin, 2).is_err());
        assert!(ensure_owner(&admin, 1).is_ok());
    }

    #[test]
    fn test_owner_or_admin_guard() {
        let admin = Identity::new(1, Role::Admin);
        let member = Identity::new(2, Role::Member);
        assert!(ensure_owner_or_admin(&admin, 99).is_ok());
        assert!(ensure_owner_or_admin(&member, 2).is_ok());
        assert!(ensure_owner_or_admin(&member, 99).is_err());
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("MEMBER".parse::<Role>().unwrap(), Role::Member);
        assert!("ROOT".parse::<Role>().is_err());
    }
}
