//! Application state shared across handlers.

use crate::services::{Mailer, ReceiptStore};
use lodgera_core::Config;
use lodgera_db::{
    ExpenseRepository, PaymentRepository, RoomRepository, StatsRepository, TenantRepository,
    UserRepository,
};
use sqlx::PgPool;

/// Aggregate of repositories and services handed to every handler via
/// `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub users: UserRepository,
    pub tenants: TenantRepository,
    pub rooms: RoomRepository,
    pub payments: PaymentRepository,
    pub expenses: ExpenseRepository,
    pub stats: StatsRepository,
    pub receipts: ReceiptStore,
    /// Absent when the deployment has no SMTP credentials; notification
    /// endpoints then fail with a server error.
    pub mailer: Option<Mailer>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config, receipts: ReceiptStore, mailer: Option<Mailer>) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            tenants: TenantRepository::new(pool.clone()),
            rooms: RoomRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            expenses: ExpenseRepository::new(pool.clone()),
            stats: StatsRepository::new(pool.clone()),
            pool,
            config,
            receipts,
            mailer,
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
