use async_trait::async_trait;
use thiserror::Error;

mod models;
mod postgres;

#[cfg(test)]
mod memory;

pub use models::{Account, AccountChanges, Bookmark, BookmarkChanges, NewBookmark};
pub use postgres::PgStore;

#[cfg(test)]
pub use memory::MemoryStore;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },
    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}

impl StoreError {
    /// Classifies a driver error by its structured SQLSTATE code.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            let constraint = match &err {
                sqlx::Error::Database(db_err) => db_err.constraint().unwrap_or("unknown"),
                _ => "unknown",
            }
            .to_string();
            return Self::UniqueViolation { constraint };
        }
        Self::Backend(err)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account. A taken email surfaces as `StoreError::UniqueViolation`.
    async fn insert_account(&self, email: &str, password_hash: &str) -> Result<Account, StoreError>;
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
    async fn find_account_by_id(&self, id: i64) -> Result<Option<Account>, StoreError>;
    async fn update_account(
        &self,
        id: i64,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, StoreError>;
}

/// Bookmark persistence. Every keyed operation takes the owner id and filters on it.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn list_bookmarks(&self, author_id: i64) -> Result<Vec<Bookmark>, StoreError>;
    async fn find_bookmark(&self, author_id: i64, id: i64) -> Result<Option<Bookmark>, StoreError>;
    async fn insert_bookmark(
        &self,
        author_id: i64,
        bookmark: &NewBookmark,
    ) -> Result<Bookmark, StoreError>;
    async fn update_bookmark(
        &self,
        author_id: i64,
        id: i64,
        changes: &BookmarkChanges,
    ) -> Result<Option<Bookmark>, StoreError>;
    async fn delete_bookmark(&self, author_id: i64, id: i64) -> Result<Option<Bookmark>, StoreError>;
}
