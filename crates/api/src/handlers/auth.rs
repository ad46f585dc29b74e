//! Handlers for the `/auth` resource (signin, signin-with-token).

use axum::extract::State;
use axum::Json;
use crm_core::text::is_blank;
use crm_core::error::CoreError;
use crm_db::models::user::UserResponse;
use crm_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, validate_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/signin-with-token`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSigninRequest {
    pub access_token: Option<String>,
}

/// Successful signin response: the user plus a fresh access token.
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub message: String,
    pub data: UserResponse,
    pub token: String,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signin
///
/// Authenticate with email + password. Unknown emails and wrong passwords
/// get the same 401 so the endpoint does not reveal which accounts exist.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninRequest>,
) -> AppResult<Json<SigninResponse>> {
    let (Some(email), Some(password)) = (input.email, input.password) else {
        return Err(AppError::BadRequest(
            "Email and password are required!".into(),
        ));
    };
    if is_blank(Some(&email)) || password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required!".into(),
        ));
    }

    let user = UserRepo::find_by_email(&state.pool, email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Signin rejected: wrong password");
        return Err(invalid_credentials());
    }

    let token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User signed in");

    Ok(Json(SigninResponse {
        message: "Signin successful!".into(),
        data: user.into(),
        token,
    }))
}

/// POST /api/v1/auth/signin-with-token
///
/// Resume a session from a stored access token. Returns the token's user.
pub async fn signin_with_token(
    State(state): State<AppState>,
    Json(input): Json<TokenSigninRequest>,
) -> AppResult<Json<MessageResponse<UserResponse>>> {
    let token = input
        .access_token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Access token is required!".into()))?;

    let claims = validate_token(token.trim(), &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
        })?;

    Ok(Json(MessageResponse::new(
        "Signin successful!",
        UserResponse::from(user),
    )))
}
