//! Authentication handlers.

use actix_web::{HttpResponse, web};

use quill_core::DomainError;
use quill_core::domain::mask_email;
use quill_shared::dto::{AuthResponse, LoginRequest, SignupRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .credentials
        .register(&req.username, &req.email, &req.password)
        .await?;

    let token = state.tokens.issue(user.subject())?;

    Ok(HttpResponse::Created().json(AuthResponse::bearer(
        "User created successfully",
        token,
        expires_in(&state),
    )))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = match state
        .credentials
        .verify_credentials(&req.email, &req.password)
        .await
    {
        Ok(user) => user,
        Err(e @ (DomainError::UnknownAccount | DomainError::InvalidCredentials)) => {
            tracing::info!(email = %mask_email(&req.email), reason = %e, "Login failed");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.tokens.issue(user.subject())?;

    Ok(HttpResponse::Ok().json(AuthResponse::bearer(
        "Login successful",
        token,
        expires_in(&state),
    )))
}

fn expires_in(state: &AppState) -> u64 {
    u64::try_from(state.tokens.ttl_seconds()).unwrap_or(0)
}
