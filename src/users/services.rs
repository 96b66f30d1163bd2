use tracing::{info, warn};

use super::dto::Profile;
use crate::{
    error::AppError,
    store::{AccountChanges, AccountStore, StoreError},
};

pub async fn get_profile(accounts: &dyn AccountStore, account_id: i64) -> Result<Profile, AppError> {
    accounts
        .find_account_by_id(account_id)
        .await?
        .map(Profile::from)
        .ok_or(AppError::Unauthorized)
}

/// Applies profile changes for the caller only. The password hash is never written here.
pub async fn edit_profile(
    accounts: &dyn AccountStore,
    account_id: i64,
    changes: AccountChanges,
) -> Result<Profile, AppError> {
    match accounts.update_account(account_id, &changes).await {
        Ok(Some(account)) => {
            info!(account_id, "profile updated");
            Ok(account.into())
        }
        // token outlived its account
        Ok(None) => Err(AppError::Unauthorized),
        Err(StoreError::UniqueViolation { constraint }) => {
            warn!(account_id, %constraint, "profile update rejected: email taken");
            Err(AppError::CredentialsTaken)
        }
        Err(e) => Err(e.into()),
    }
}
