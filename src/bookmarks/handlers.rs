use axum::{
    extract::State,
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{BookmarkList, CreateBookmarkRequest, EditBookmarkRequest},
    services,
};
use crate::{
    auth::AuthUser,
    error::AppError,
    extract::{ValidJson, ValidPath},
    state::AppState,
    store::Bookmark,
};

pub fn bookmark_routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/:id",
            get(get_bookmark).patch(edit_bookmark).delete(delete_bookmark),
        )
}

#[instrument(skip(state, user), fields(account_id = user.id))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BookmarkList>, AppError> {
    let rows = services::list(state.bookmarks.as_ref(), user.id).await?;
    Ok(Json(rows.into()))
}

#[instrument(skip(state, user), fields(account_id = user.id))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    user: AuthUser,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<Bookmark>, AppError> {
    let row = services::get(state.bookmarks.as_ref(), user.id, id).await?;
    Ok(Json(row))
}

#[instrument(skip(state, user, payload), fields(account_id = user.id))]
pub async fn create_bookmark(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(payload): ValidJson<CreateBookmarkRequest>,
) -> Result<(StatusCode, HeaderMap, Json<Bookmark>), AppError> {
    let row = services::create(state.bookmarks.as_ref(), user.id, payload.into()).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/bookmarks/{}", row.id)) {
        headers.insert(LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(row)))
}

#[instrument(skip(state, user, payload), fields(account_id = user.id))]
pub async fn edit_bookmark(
    State(state): State<AppState>,
    user: AuthUser,
    ValidPath(id): ValidPath<i64>,
    ValidJson(payload): ValidJson<EditBookmarkRequest>,
) -> Result<Json<Bookmark>, AppError> {
    let row = services::update(state.bookmarks.as_ref(), user.id, id, payload.into()).await?;
    Ok(Json(row))
}

#[instrument(skip(state, user), fields(account_id = user.id))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    user: AuthUser,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, AppError> {
    services::delete(state.bookmarks.as_ref(), user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
