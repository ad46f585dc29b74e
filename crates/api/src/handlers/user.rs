//! Handlers for the `/users` resource (registration).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use crm_core::text::is_blank;
use crm_core::error::CoreError;
use crm_db::models::user::{CreateUser, RegisterRequest, UserResponse};
use crm_db::repositories::UserRepo;
use validator::ValidateEmail;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/v1/users
///
/// Register a user and their tenant. Email and tenant name must both be
/// unused. The response never includes the password hash.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse<UserResponse>>)> {
    let required = [
        input.name.as_deref(),
        input.email.as_deref(),
        input.password.as_deref(),
        input.tenant_name.as_deref(),
        input.tenant_category.as_deref(),
        input.tenant_description.as_deref(),
    ];
    if required.into_iter().any(is_blank) || input.tenant_logo.is_none() {
        return Err(AppError::BadRequest("Some mandatory fields are missing!".into()));
    }

    let email = input.email.unwrap_or_default().trim().to_string();
    let tenant_name = input.tenant_name.unwrap_or_default().trim().to_string();
    if !email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid email address".into(),
        )));
    }

    if let Some(existing) =
        UserRepo::find_by_email_or_tenant(&state.pool, &email, &tenant_name).await?
    {
        let message = if existing.email == email {
            "Email already exists!"
        } else {
            "Tenant name already exists!"
        };
        return Err(AppError::BadRequest(message.into()));
    }

    let password_hash = hash_password(&input.password.unwrap_or_default())
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.unwrap_or_default().trim().to_string(),
            email,
            password_hash,
            avatar: input.avatar,
            tenant_name,
            tenant_description: input.tenant_description,
            tenant_category: input.tenant_category.unwrap_or_default(),
            tenant_logo: input.tenant_logo,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "User created successfully!",
            UserResponse::from(user),
        )),
    ))
}
