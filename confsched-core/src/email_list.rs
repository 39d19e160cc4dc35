//! Conference email list entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfError, ConfResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailEntry {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// A new entry as submitted by the admin form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEmail {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl NewEmail {
    /// All three fields are required
    pub fn validate(&self) -> ConfResult<()> {
        let missing = [&self.email, &self.name, &self.role]
            .iter()
            .any(|field| field.trim().is_empty());
        if missing {
            return Err(ConfError::Validation("Missing required fields".into()));
        }
        Ok(())
    }

    pub fn into_entry(self) -> EmailEntry {
        EmailEntry {
            id: uuid::Uuid::new_v4().to_string(),
            email: self.email.trim().to_string(),
            name: self.name,
            role: self.role,
            created_at: Utc::now(),
        }
    }
}
