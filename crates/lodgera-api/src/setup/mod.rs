//! Application setup and initialization
//!
//! Initialization logic extracted from main.rs: database pool and
//! migrations, receipt storage, the optional mailer, and the router.

pub mod database;
pub mod routes;
pub mod server;

use crate::services::{Mailer, ReceiptStore};
use crate::state::AppState;
use anyhow::{Context, Result};
use lodgera_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let pool = database::setup_database(&config).await?;

    let receipts =
        ReceiptStore::new(&config.uploads_dir).context("Failed to open receipt storage")?;

    let mailer = match &config.smtp {
        Some(smtp) => Mailer::from_config(smtp),
        None => {
            tracing::warn!("SMTP not configured; email notifications are disabled");
            None
        }
    };

    let state = Arc::new(AppState::new(pool, config.clone(), receipts, mailer));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
