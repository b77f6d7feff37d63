//! Bearer-token authentication: JWT issuing/verification, password
//! hashing, the middleware that decodes the token once at the boundary,
//! and typed principal extractors for handlers.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
