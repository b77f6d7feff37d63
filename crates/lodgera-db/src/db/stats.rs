use lodgera_core::AppError;
use serde::Serialize;
use sqlx::PgPool;

/// Row counts backing the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardCounts {
    pub rooms: i64,
    pub tenants: i64,
    pub payments: i64,
    pub users: i64,
}

/// Read-only aggregation for the admin dashboard
#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.operation = "select"))]
    pub async fn dashboard_counts(&self) -> Result<DashboardCounts, AppError> {
        let rooms: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await?;
        let tenants: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tenants")
            .fetch_one(&self.pool)
            .await?;
        let payments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&self.pool)
            .await?;
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(DashboardCounts {
            rooms,
            tenants,
            payments,
            users,
        })
    }
}
