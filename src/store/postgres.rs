use async_trait::async_trait;
use sqlx::PgPool;

use super::{
    Account, AccountChanges, AccountStore, Bookmark, BookmarkChanges, BookmarkStore, NewBookmark,
    StoreError,
};

const ACCOUNT_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, created_at, updated_at";
const BOOKMARK_COLUMNS: &str =
    "id, title, description, link, author_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn insert_account(&self, email: &str, password_hash: &str) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(account)
    }

    async fn find_account_by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(account)
    }

    async fn update_account(
        &self,
        id: i64,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE users
               SET email      = COALESCE($2, email),
                   first_name = COALESCE($3, first_name),
                   last_name  = COALESCE($4, last_name),
                   updated_at = now()
             WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.email.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .fetch_optional(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }
}

#[async_trait]
impl BookmarkStore for PgStore {
    async fn list_bookmarks(&self, author_id: i64) -> Result<Vec<Bookmark>, StoreError> {
        let rows = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            SELECT {BOOKMARK_COLUMNS}
              FROM bookmarks
             WHERE author_id = $1
             ORDER BY id ASC
            "#
        ))
        .bind(author_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_bookmark(&self, author_id: i64, id: i64) -> Result<Option<Bookmark>, StoreError> {
        let row = sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id = $1 AND author_id = $2"
        ))
        .bind(id)
        .bind(author_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn insert_bookmark(
        &self,
        author_id: i64,
        bookmark: &NewBookmark,
    ) -> Result<Bookmark, StoreError> {
        sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            INSERT INTO bookmarks (title, description, link, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {BOOKMARK_COLUMNS}
            "#
        ))
        .bind(&bookmark.title)
        .bind(bookmark.description.as_deref())
        .bind(bookmark.link.as_deref())
        .bind(author_id)
        .fetch_one(&self.db)
        .await
        .map_err(StoreError::from_sqlx)
    }

    async fn update_bookmark(
        &self,
        author_id: i64,
        id: i64,
        changes: &BookmarkChanges,
    ) -> Result<Option<Bookmark>, StoreError> {
        // $4/$6 say whether the nullable column was present in the patch at all.
        let row = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            UPDATE bookmarks
               SET title       = COALESCE($3, title),
                   description = CASE WHEN $4 THEN $5 ELSE description END,
                   link        = CASE WHEN $6 THEN $7 ELSE link END,
                   updated_at  = now()
             WHERE id = $1 AND author_id = $2
            RETURNING {BOOKMARK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(author_id)
        .bind(changes.title.as_deref())
        .bind(changes.description.is_some())
        .bind(changes.description.clone().flatten())
        .bind(changes.link.is_some())
        .bind(changes.link.clone().flatten())
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete_bookmark(&self, author_id: i64, id: i64) -> Result<Option<Bookmark>, StoreError> {
        let row = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            DELETE FROM bookmarks
             WHERE id = $1 AND author_id = $2
            RETURNING {BOOKMARK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(author_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }
}
