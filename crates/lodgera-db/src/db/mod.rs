//! Database repositories for data access layer
//!
//! One repository per entity, each holding a clone of the connection
//! pool. Multi-statement business operations (tenant approval, room
//! assignment, payment adjudication) run inside a single transaction
//! with `FOR UPDATE` row locks so concurrent admin actions cannot race
//! each other into lost updates.

pub mod expenses;
pub mod payments;
pub mod rooms;
pub mod stats;
pub mod tenants;
pub mod users;

pub use expenses::ExpenseRepository;
pub use payments::{PaymentRepository, RevenuePeriod};
pub use rooms::RoomRepository;
pub use stats::{DashboardCounts, StatsRepository};
pub use tenants::TenantRepository;
pub use users::UserRepository;
