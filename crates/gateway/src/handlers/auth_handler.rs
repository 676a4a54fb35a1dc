//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// Login request. Missing fields count as empty and simply fail to match.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Don't expose the password in debug output
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth
        .login(&request.email, &request.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    Ok(Json(TokenResponse { token }))
}
