use crate::auth::jwt;
use crate::auth::models::AuthContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use lodgera_core::AppError;
use std::sync::Arc;

/// Decode the bearer token once at the boundary and stash a typed
/// `AuthContext` in request extensions. Handlers then declare their
/// required role via the `AdminUser`/`TenantUser` extractors.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized("Unauthorized".to_string()))
                .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized("Unauthorized".to_string())).into_response();
    };

    let claims = match jwt::verify_token(token, &state.config.jwt_secret) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError(err).into_response(),
    };

    request.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        role: claims.role,
    });

    next.run(request).await
}
