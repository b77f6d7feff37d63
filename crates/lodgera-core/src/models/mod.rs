//! Data models, organized by domain entity.

mod expense;
mod payment;
mod room;
mod tenant;
mod user;

pub use expense::*;
pub use payment::*;
pub use room::*;
pub use tenant::*;
pub use user::*;
