//! Postgres data access for the lodgera service.

pub mod db;

pub use db::{
    DashboardCounts, ExpenseRepository, PaymentRepository, RevenuePeriod, RoomRepository,
    StatsRepository, TenantRepository, UserRepository,
};
