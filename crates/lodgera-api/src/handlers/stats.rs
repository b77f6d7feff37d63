//! Admin dashboard counts.

use crate::auth::models::AdminUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// GET /api/admin/stats
pub async fn stats(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let counts = state.stats.dashboard_counts().await?;
    Ok(Json(counts))
}
