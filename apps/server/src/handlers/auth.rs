//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use gazette_core::domain::User;
use gazette_core::ports::{PasswordService, TokenService};
use gazette_shared::dto::{AuthResponse, AuthUser, LoginRequest, RegisterRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Verify a credential pair and issue a bearer token. Shared with the admin
/// login page.
pub(crate) async fn authenticate(
    state: &AppState,
    token_service: &dyn TokenService,
    password_service: &dyn PasswordService,
    username: &str,
    password: &str,
) -> AppResult<(User, String)> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let user = state
        .users
        .find_by_username(username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((user, token))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let (user, token) = authenticate(
        &state,
        token_service.as_ref().as_ref(),
        password_service.as_ref().as_ref(),
        &req.username,
        &req.password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: AuthUser {
            id: user.id,
            username: user.username,
        },
        expires_in: token_service.expiration_seconds(),
    }))
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.username.trim().is_empty() {
        return Err(AppError::BadRequest("username is required".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    // Check if the username is already taken
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    // Hash password
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user
    let user = User::new(req.username, password_hash);
    let saved_user = state.users.insert(user).await?;

    // Issue a token so the editor can start working immediately
    let token = token_service
        .generate_token(saved_user.id, &saved_user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: AuthUser {
            id: saved_user.id,
            username: saved_user.username,
        },
        expires_in: token_service.expiration_seconds(),
    }))
}
