use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::{
    Account, AccountChanges, AccountStore, Bookmark, BookmarkChanges, BookmarkStore, NewBookmark,
    StoreError,
};

/// In-process store for tests. Mirrors the Postgres schema's email uniqueness and
/// owner-scoped filtering.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    accounts: Vec<Account>,
    bookmarks: Vec<Bookmark>,
    next_account_id: i64,
    next_bookmark_id: i64,
}

fn email_taken() -> StoreError {
    StoreError::UniqueViolation {
        constraint: "users_email_key".into(),
    }
}

/// Same merge the Postgres `UPDATE` performs.
fn apply_changes(changes: &BookmarkChanges, bookmark: &mut Bookmark) {
    if let Some(title) = &changes.title {
        bookmark.title = title.clone();
    }
    if let Some(description) = &changes.description {
        bookmark.description = description.clone();
    }
    if let Some(link) = &changes.link {
        bookmark.link = link.clone();
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert_account(&self, email: &str, password_hash: &str) -> Result<Account, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.accounts.iter().any(|a| a.email == email) {
            return Err(email_taken());
        }
        inner.next_account_id += 1;
        let now = OffsetDateTime::now_utc();
        let account = Account {
            id: inner.next_account_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        inner.accounts.push(account.clone());
        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_account_by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn update_account(
        &self,
        id: i64,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(email) = &changes.email {
            if inner.accounts.iter().any(|a| a.id != id && &a.email == email) {
                return Err(email_taken());
            }
        }
        let Some(account) = inner.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &changes.email {
            account.email = email.clone();
        }
        if let Some(first_name) = &changes.first_name {
            account.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &changes.last_name {
            account.last_name = Some(last_name.clone());
        }
        account.updated_at = OffsetDateTime::now_utc();
        Ok(Some(account.clone()))
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list_bookmarks(&self, author_id: i64) -> Result<Vec<Bookmark>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .bookmarks
            .iter()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn find_bookmark(&self, author_id: i64, id: i64) -> Result<Option<Bookmark>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .bookmarks
            .iter()
            .find(|b| b.id == id && b.author_id == author_id)
            .cloned())
    }

    async fn insert_bookmark(
        &self,
        author_id: i64,
        bookmark: &NewBookmark,
    ) -> Result<Bookmark, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_bookmark_id += 1;
        let now = OffsetDateTime::now_utc();
        let row = Bookmark {
            id: inner.next_bookmark_id,
            title: bookmark.title.clone(),
            description: bookmark.description.clone(),
            link: bookmark.link.clone(),
            author_id,
            created_at: now,
            updated_at: now,
        };
        inner.bookmarks.push(row.clone());
        Ok(row)
    }

    async fn update_bookmark(
        &self,
        author_id: i64,
        id: i64,
        changes: &BookmarkChanges,
    ) -> Result<Option<Bookmark>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(row) = inner
            .bookmarks
            .iter_mut()
            .find(|b| b.id == id && b.author_id == author_id)
        else {
            return Ok(None);
        };
        apply_changes(changes, row);
        row.updated_at = OffsetDateTime::now_utc();
        Ok(Some(row.clone()))
    }

    async fn delete_bookmark(&self, author_id: i64, id: i64) -> Result<Option<Bookmark>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let position = inner
            .bookmarks
            .iter()
            .position(|b| b.id == id && b.author_id == author_id);
        Ok(position.map(|idx| inner.bookmarks.remove(idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = MemoryStore::new();
        store.insert_account("a@x.com", "h1").await.unwrap();
        let err = store.insert_account("a@x.com", "h2").await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn bookmark_lookups_are_owner_scoped() {
        let store = MemoryStore::new();
        let row = store
            .insert_bookmark(
                1,
                &NewBookmark {
                    title: "B".into(),
                    description: None,
                    link: None,
                },
            )
            .await
            .unwrap();
        assert!(store.find_bookmark(2, row.id).await.unwrap().is_none());
        assert!(store.delete_bookmark(2, row.id).await.unwrap().is_none());
        assert_eq!(store.find_bookmark(1, row.id).await.unwrap(), Some(row));
    }

    fn sample() -> Bookmark {
        Bookmark {
            id: 1,
            title: "B".into(),
            description: Some("D".into()),
            link: None,
            author_id: 7,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut bookmark = sample();
        apply_changes(
            &BookmarkChanges {
                title: Some("New".into()),
                ..Default::default()
            },
            &mut bookmark,
        );
        assert_eq!(bookmark.title, "New");
        assert_eq!(bookmark.description.as_deref(), Some("D"));
        assert_eq!(bookmark.link, None);
    }

    #[test]
    fn apply_can_clear_nullable_fields() {
        let mut bookmark = sample();
        apply_changes(
            &BookmarkChanges {
                description: Some(None),
                link: Some(Some("https://example.com".into())),
                ..Default::default()
            },
            &mut bookmark,
        );
        assert_eq!(bookmark.title, "B");
        assert_eq!(bookmark.description, None);
        assert_eq!(bookmark.link.as_deref(), Some("https://example.com"));
    }
}
