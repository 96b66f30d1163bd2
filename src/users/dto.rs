use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::extract::{finish, is_valid_email, require_non_empty, Validate};
use crate::store::{Account, AccountChanges};

/// Account as returned to its owner. Has no hash field, so none can leak.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Account> for Profile {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            email: a.email,
            first_name: a.first_name,
            last_name: a.last_name,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Validate for EditProfileRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        if let Some(email) = &self.email {
            require_non_empty(&mut problems, "email", email);
            if !email.trim().is_empty() && !is_valid_email(email) {
                problems.push("email must be an email".into());
            }
        }
        finish(problems)
    }
}

impl From<EditProfileRequest> for AccountChanges {
    fn from(r: EditProfileRequest) -> Self {
        Self {
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
        }
    }
}
