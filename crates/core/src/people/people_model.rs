use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::errors::{Result, ValidationError};

/// Domain model for a person. Credentials and session state live in the
/// external auth system; this is the profile the platform itself owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input model for a profile edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref first_name) = self.first_name {
            if first_name.trim().is_empty() {
                return Err(ValidationError::MissingField("firstName".to_string()).into());
            }
        }
        if let Some(ref last_name) = self.last_name {
            if last_name.trim().is_empty() {
                return Err(ValidationError::MissingField("lastName".to_string()).into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_rejects_blank_names() {
        let update = ProfileUpdate {
            first_name: Some("  ".to_string()),
            last_name: None,
        };
        assert!(update.validate().is_err());

        let update = ProfileUpdate {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
        };
        assert!(update.validate().is_ok());
    }
}
