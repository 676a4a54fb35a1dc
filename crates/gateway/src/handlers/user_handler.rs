//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{CreateUser, UpdateUser, UserResponse};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// Response for a delete, echoing the requested id.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
}

// Ids that are not UUIDs cannot name a user.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.users.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// List all users, newest first
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let id = parse_id(&id).ok_or_not_found()?;
    let user = state.users.get_user(id).await?.ok_or_not_found()?;
    Ok(Json(UserResponse::from(user)))
}

/// Update user profile (PUT and PATCH behave the same)
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(changes): JsonBody<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let id = parse_id(&id).ok_or_not_found()?;
    let user = state.users.update_user(id, changes).await?.ok_or_not_found()?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete user; idempotent
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if let Some(id) = parse_id(&raw_id) {
        state.users.delete_user(id).await?;
    }

    Ok(Json(DeleteResponse {
        deleted: true,
        id: raw_id,
    }))
}
