use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::instrument;

use super::{
    dto::{AuthRequest, TokenResponse},
    services,
};
use crate::{error::AppError, extract::ValidJson, state::AppState};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AuthRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let token = services::register(
        state.accounts.as_ref(),
        &state.keys,
        &payload.email,
        &payload.password,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(token)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AuthRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = services::login(
        state.accounts.as_ref(),
        &state.keys,
        &payload.email,
        &payload.password,
    )
    .await?;
    Ok(Json(token))
}
