use chrono::NaiveDate;
use lodgera_core::{
    error::PaymentDecisionError,
    models::{
        Payment, PaymentApproval, PaymentListing, PaymentMethod, PaymentStatus, PaymentType,
        RevenueReport, RevenueSlice,
    },
    settlement, AppError,
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Period filter for the revenue report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenuePeriod {
    All,
    /// A month of the current calendar year.
    Month(u32),
    /// Inclusive date range.
    Range(NaiveDate, NaiveDate),
}

/// Repository for payments and the adjudication commands
#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a tenant-claimed payment for later adjudication. No
    /// balance mutation happens here; the balance only moves when an
    /// admin approves.
    #[tracing::instrument(skip(self), fields(db.table = "payments", db.operation = "insert"))]
    pub async fn submit(
        &self,
        tenant_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        payment_type: PaymentType,
        receipt_path: Option<&str>,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<Postgres, Payment>(
            r#"
            INSERT INTO payments (tenant_id, amount, method, receipt_path, payment_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, tenant_id, amount, method, receipt_path, payment_type, status, created_at
            "#,
        )
        .bind(tenant_id)
        .bind(amount)
        .bind(method)
        .bind(receipt_path)
        .bind(payment_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    #[tracing::instrument(skip(self), fields(db.table = "payments", db.operation = "select"))]
    pub async fn list_for_tenant(&self, tenant_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<Postgres, Payment>(
            r#"
            SELECT id, tenant_id, amount, method, receipt_path, payment_type, status, created_at
            FROM payments
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Every payment joined with its tenant and room, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "payments", db.operation = "select"))]
    pub async fn list_all(&self) -> Result<Vec<PaymentListing>, AppError> {
        let payments = sqlx::query_as::<Postgres, PaymentListing>(
            r#"
            SELECT p.id, p.amount, p.method, p.receipt_path, p.status,
                   p.payment_type, p.created_at,
                   t.id AS tenant_id, t.full_name AS tenant_name,
                   r.room_number, r.rate AS room_rate, t.balance
            FROM payments p
            JOIN tenants t ON t.id = p.tenant_id
            LEFT JOIN rooms r ON r.id = t.room_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Approve a payment, deducting its amount from the tenant balance.
    /// One transaction with the payment and tenant rows locked. A stored
    /// balance of exactly zero falls back to the room rate before
    /// settling. Terminal payments are refused without state change.
    #[tracing::instrument(skip(self), fields(db.table = "payments", db.operation = "update", db.record_id = %payment_id))]
    pub async fn approve(&self, payment_id: Uuid) -> Result<PaymentApproval, PaymentDecisionError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<Postgres, AdjudicationRow>(
            r#"
            SELECT p.amount, p.status, p.tenant_id, t.balance, r.rate AS room_rate
            FROM payments p
            JOIN tenants t ON t.id = p.tenant_id
            LEFT JOIN rooms r ON r.id = t.room_id
            WHERE p.id = $1
            FOR UPDATE OF p, t
            "#,
        )
        .bind(payment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PaymentDecisionError::NotFound)?;

        if row.status.is_terminal() {
            return Err(PaymentDecisionError::AlreadyFinalized(row.status));
        }

        let starting = settlement::effective_balance(
            row.balance,
            row.room_rate.unwrap_or(Decimal::ZERO),
        );
        let settled = settlement::settle(starting, row.amount);

        sqlx::query("UPDATE tenants SET balance = $1 WHERE id = $2")
            .bind(settled.new_balance)
            .bind(row.tenant_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE payments SET status = $1 WHERE id = $2")
            .bind(settled.status)
            .bind(payment_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(PaymentApproval {
            status: settled.status,
            balance: settled.new_balance,
        })
    }

    /// Reject a payment. Only `pending` payments qualify: a `partial`
    /// payment was already applied to the balance and has no reversal
    /// semantics, and terminal statuses are immutable.
    #[tracing::instrument(skip(self), fields(db.table = "payments", db.operation = "update", db.record_id = %payment_id))]
    pub async fn reject(&self, payment_id: Uuid) -> Result<PaymentStatus, PaymentDecisionError> {
        let mut tx = self.pool.begin().await?;

        let status = sqlx::query_scalar::<Postgres, PaymentStatus>(
            "SELECT status FROM payments WHERE id = $1 FOR UPDATE",
        )
        .bind(payment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PaymentDecisionError::NotFound)?;

        if status.is_terminal() {
            return Err(PaymentDecisionError::AlreadyFinalized(status));
        }
        if status == PaymentStatus::Partial {
            return Err(PaymentDecisionError::AlreadyApplied);
        }

        sqlx::query("UPDATE payments SET status = 'rejected' WHERE id = $1")
            .bind(payment_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(PaymentStatus::Rejected)
    }

    /// Revenue over an optional period, grouped by status. A month-only
    /// filter resolves against the current calendar year.
    #[tracing::instrument(skip(self), fields(db.table = "payments", db.operation = "select"))]
    pub async fn revenue(&self, period: RevenuePeriod) -> Result<RevenueReport, AppError> {
        let slices = match period {
            RevenuePeriod::All => {
                sqlx::query_as::<Postgres, RevenueSlice>(
                    r#"
                    SELECT status, COALESCE(SUM(amount), 0) AS total, COUNT(*) AS count
                    FROM payments
                    GROUP BY status
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            RevenuePeriod::Month(month) => {
                sqlx::query_as::<Postgres, RevenueSlice>(
                    r#"
                    SELECT status, COALESCE(SUM(amount), 0) AS total, COUNT(*) AS count
                    FROM payments
                    WHERE EXTRACT(MONTH FROM created_at) = $1
                      AND EXTRACT(YEAR FROM created_at) = EXTRACT(YEAR FROM CURRENT_DATE)
                    GROUP BY status
                    "#,
                )
                .bind(month as i32)
                .fetch_all(&self.pool)
                .await?
            }
            RevenuePeriod::Range(start, end) => {
                sqlx::query_as::<Postgres, RevenueSlice>(
                    r#"
                    SELECT status, COALESCE(SUM(amount), 0) AS total, COUNT(*) AS count
                    FROM payments
                    WHERE created_at::date >= $1 AND created_at::date <= $2
                    GROUP BY status
                    "#,
                )
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(summarize(slices))
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Fold per-status slices into the report. The headline total and count
/// only cover adjudicated revenue (`paid` + `partial`); the breakdown
/// keeps every status present.
fn summarize(breakdown: Vec<RevenueSlice>) -> RevenueReport {
    let (total, count) = breakdown
        .iter()
        .filter(|s| matches!(s.status, PaymentStatus::Paid | PaymentStatus::Partial))
        .fold((Decimal::ZERO, 0i64), |(t, c), s| (t + s.total, c + s.count));

    RevenueReport {
        total,
        count,
        breakdown,
    }
}

#[derive(sqlx::FromRow)]
struct AdjudicationRow {
    amount: Decimal,
    status: PaymentStatus,
    tenant_id: Uuid,
    balance: Decimal,
    room_rate: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(status: PaymentStatus, total: i64, count: i64) -> RevenueSlice {
        RevenueSlice {
            status,
            total: Decimal::from(total),
            count,
        }
    }

    #[test]
    fn summarize_counts_only_adjudicated_revenue() {
        let report = summarize(vec![
            slice(PaymentStatus::Paid, 5000, 1),
            slice(PaymentStatus::Partial, 2000, 2),
            slice(PaymentStatus::Pending, 9999, 3),
            slice(PaymentStatus::Rejected, 100, 1),
        ]);

        assert_eq!(report.total, Decimal::from(7000));
        assert_eq!(report.count, 3);
        assert_eq!(report.breakdown.len(), 4);
    }

    #[test]
    fn summarize_empty_breakdown() {
        let report = summarize(Vec::new());
        assert_eq!(report.total, Decimal::ZERO);
        assert_eq!(report.count, 0);
        assert!(report.breakdown.is_empty());
    }
}
