use tracing::info;

use crate::{
    error::AppError,
    store::{Bookmark, BookmarkChanges, BookmarkStore, NewBookmark},
};

pub async fn list(store: &dyn BookmarkStore, owner_id: i64) -> Result<Vec<Bookmark>, AppError> {
    Ok(store.list_bookmarks(owner_id).await?)
}

/// A bookmark owned by someone else is reported exactly like a missing one.
pub async fn get(store: &dyn BookmarkStore, owner_id: i64, id: i64) -> Result<Bookmark, AppError> {
    store
        .find_bookmark(owner_id, id)
        .await?
        .ok_or(AppError::BookmarkNotFound)
}

pub async fn create(
    store: &dyn BookmarkStore,
    owner_id: i64,
    bookmark: NewBookmark,
) -> Result<Bookmark, AppError> {
    let row = store.insert_bookmark(owner_id, &bookmark).await?;
    info!(owner_id, bookmark_id = row.id, "bookmark created");
    Ok(row)
}

pub async fn update(
    store: &dyn BookmarkStore,
    owner_id: i64,
    id: i64,
    changes: BookmarkChanges,
) -> Result<Bookmark, AppError> {
    get(store, owner_id, id).await?;
    store
        .update_bookmark(owner_id, id, &changes)
        .await?
        .ok_or(AppError::BookmarkNotFound)
}

/// Returns the record as it was before deletion.
pub async fn delete(store: &dyn BookmarkStore, owner_id: i64, id: i64) -> Result<Bookmark, AppError> {
    get(store, owner_id, id).await?;
    let row = store
        .delete_bookmark(owner_id, id)
        .await?
        .ok_or(AppError::BookmarkNotFound)?;
    info!(owner_id, bookmark_id = row.id, "bookmark deleted");
    Ok(row)
}
