//! Core types for the lodgera boarding-house service.
//!
//! This crate holds the configuration, the error taxonomy, the domain
//! models, and the pure business arithmetic (room occupancy math and
//! payment settlement) shared by the database and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod occupancy;
pub mod settlement;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
