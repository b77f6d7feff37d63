use crate::error::HttpAppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lodgera_core::{models::UserRole, AppError};
use uuid::Uuid;

/// Authenticated principal decoded from the bearer token, stored in
/// request extensions by the auth middleware.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

fn context_from_parts(parts: &Parts) -> Result<AuthContext, HttpAppError> {
    parts
        .extensions
        .get::<AuthContext>()
        .copied()
        .ok_or_else(|| HttpAppError(AppError::Unauthorized("Unauthorized".to_string())))
}

/// Extractor requiring the `admin` role. Rejection matches the API
/// contract: 401 without a context, 403 for the wrong role.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthContext);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = context_from_parts(parts)?;
        if context.role != UserRole::Admin {
            return Err(HttpAppError(AppError::Forbidden("Forbidden".to_string())));
        }
        Ok(AdminUser(context))
    }
}

/// Extractor requiring the `client` role (a boarder).
#[derive(Debug, Clone, Copy)]
pub struct TenantUser(pub AuthContext);

impl<S> FromRequestParts<S> for TenantUser
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = context_from_parts(parts)?;
        if context.role != UserRole::Client {
            return Err(HttpAppError(AppError::Forbidden("Forbidden".to_string())));
        }
        Ok(TenantUser(context))
    }
}
