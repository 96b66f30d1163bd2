use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{
    dto::{EditProfileRequest, Profile},
    services,
};
use crate::{auth::AuthUser, error::AppError, extract::ValidJson, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(get_me).patch(edit_me))
}

#[instrument(skip(state, user), fields(account_id = user.id, email = %user.email))]
pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> Result<Json<Profile>, AppError> {
    let profile = services::get_profile(state.accounts.as_ref(), user.id).await?;
    Ok(Json(profile))
}

#[instrument(skip(state, user, payload), fields(account_id = user.id, email = %user.email))]
pub async fn edit_me(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(payload): ValidJson<EditProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    let profile = services::edit_profile(state.accounts.as_ref(), user.id, payload.into()).await?;
    Ok(Json(profile))
}
