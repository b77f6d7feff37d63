//! HTTP handlers, one module per route group.

pub mod admin_payments;
pub mod auth;
pub mod expenses;
pub mod payments;
pub mod rooms;
pub mod stats;
pub mod tenants;
pub mod users;
