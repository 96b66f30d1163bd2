use tracing::{info, warn};

use super::{
    dto::TokenResponse,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
};
use crate::{
    error::AppError,
    store::{AccountStore, StoreError},
};

/// Hashes the password and inserts the account, relying on the store's unique
/// constraint to detect a taken email.
pub async fn register(
    accounts: &dyn AccountStore,
    keys: &JwtKeys,
    email: &str,
    password: &str,
) -> Result<TokenResponse, AppError> {
    let hash = hash_password(password)?;

    let account = match accounts.insert_account(email, &hash).await {
        Ok(account) => account,
        Err(StoreError::UniqueViolation { constraint }) => {
            warn!(%constraint, "registration rejected: credentials taken");
            return Err(AppError::CredentialsTaken);
        }
        Err(e) => return Err(e.into()),
    };

    let access_token = keys.sign(account.id, &account.email)?;
    info!(account_id = account.id, "account registered");
    Ok(TokenResponse { access_token })
}

/// Unknown email and wrong password fail identically.
pub async fn login(
    accounts: &dyn AccountStore,
    keys: &JwtKeys,
    email: &str,
    password: &str,
) -> Result<TokenResponse, AppError> {
    let Some(account) = accounts.find_account_by_email(email).await? else {
        warn!("login failed: unknown email");
        return Err(AppError::CredentialsIncorrect);
    };

    if !verify_password(password, &account.password_hash)? {
        warn!(account_id = account.id, "login failed: wrong password");
        return Err(AppError::CredentialsIncorrect);
    }

    let access_token = keys.sign(account.id, &account.email)?;
    info!(account_id = account.id, "account logged in");
    Ok(TokenResponse { access_token })
}
