use serde::{Deserialize, Serialize};

use crate::extract::{finish, is_valid_email, require_non_empty, require_present, Validate};

/// Request body for both registration and login.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

impl Validate for AuthRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        require_non_empty(&mut problems, "email", &self.email);
        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            problems.push("email must be an email".into());
        }
        require_present(&mut problems, "password", &self.password);
        finish(problems)
    }
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}
