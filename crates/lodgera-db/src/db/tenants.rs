use lodgera_core::{
    error::ApprovalError,
    models::{
        PendingTenant, RoomOccupancySnapshot, RoomRequestForm, RoomSuggestion,
        TenantBillingSummary, TenantDashboard, TenantListing, TenantRequestDetails, UpcomingDue,
    },
    occupancy, AppError,
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for tenant profiles and the approval command
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert a room request by `user_id`. A resubmission overwrites the
    /// previous profile, resets the status to `pending`, and re-primes
    /// the balance with the selected room's rate.
    ///
    /// Returns the tenant id and whether an existing request was updated.
    #[tracing::instrument(skip(self, form), fields(db.table = "tenants", db.operation = "upsert"))]
    pub async fn submit_request(
        &self,
        user_id: Uuid,
        form: &RoomRequestForm,
    ) -> Result<(Uuid, bool), AppError> {
        let rate = sqlx::query_scalar::<Postgres, Decimal>("SELECT rate FROM rooms WHERE id = $1")
            .bind(form.room_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

        let existing =
            sqlx::query_scalar::<Postgres, Uuid>("SELECT id FROM tenants WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        if let Some(tenant_id) = existing {
            sqlx::query(
                r#"
                UPDATE tenants SET
                    full_name = $1, email = $2, phone = $3, gender = $4,
                    address = $5, emergency_contact = $6, room_id = $7,
                    status = 'pending', balance = $8
                WHERE id = $9
                "#,
            )
            .bind(&form.full_name)
            .bind(&form.email)
            .bind(&form.phone)
            .bind(&form.gender)
            .bind(&form.address)
            .bind(&form.emergency_contact)
            .bind(form.room_id)
            .bind(rate)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

            return Ok((tenant_id, true));
        }

        let tenant_id = sqlx::query_scalar::<Postgres, Uuid>(
            r#"
            INSERT INTO tenants (
                full_name, email, phone, gender, address, emergency_contact,
                user_id, room_id, status, balance
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9)
            RETURNING id
            "#,
        )
        .bind(&form.full_name)
        .bind(&form.email)
        .bind(&form.phone)
        .bind(&form.gender)
        .bind(&form.address)
        .bind(&form.emergency_contact)
        .bind(user_id)
        .bind(form.room_id)
        .bind(rate)
        .fetch_one(&self.pool)
        .await?;

        Ok((tenant_id, false))
    }

    /// All tenants with joined room details, optionally filtered by the
    /// month of the request and a name/email/phone search.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select"))]
    pub async fn list_all(
        &self,
        month: Option<u32>,
        search: Option<&str>,
    ) -> Result<Vec<TenantListing>, AppError> {
        let mut query = String::from(
            r#"
            SELECT t.id, t.full_name, t.email, t.phone, t.gender, t.address,
                   t.emergency_contact, r.room_number, r.room_type, r.rate,
                   t.status, t.created_at
            FROM tenants t
            LEFT JOIN rooms r ON t.room_id = r.id
            "#,
        );

        let mut conditions: Vec<String> = Vec::new();
        let mut bind_index = 1;

        if month.is_some() {
            conditions.push(format!("EXTRACT(MONTH FROM t.created_at) = ${}", bind_index));
            bind_index += 1;
        }

        let pattern = search.map(|s| format!("%{}%", s));
        if pattern.is_some() {
            conditions.push(format!(
                "(t.full_name ILIKE ${0} OR t.email ILIKE ${0} OR t.phone ILIKE ${0})",
                bind_index
            ));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY t.created_at DESC");

        let mut query_builder = sqlx::query_as::<Postgres, TenantListing>(&query);
        if let Some(m) = month {
            query_builder = query_builder.bind(m as i32);
        }
        if let Some(ref p) = pattern {
            query_builder = query_builder.bind(p);
        }

        let tenants = query_builder.fetch_all(&self.pool).await?;

        Ok(tenants)
    }

    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select"))]
    pub async fn list_pending(&self) -> Result<Vec<PendingTenant>, AppError> {
        let tenants = sqlx::query_as::<Postgres, PendingTenant>(
            r#"
            SELECT t.id, t.full_name, t.email, t.phone, t.status,
                   r.room_number, r.room_type
            FROM tenants t
            LEFT JOIN rooms r ON t.room_id = r.id
            WHERE t.status = 'pending'
            ORDER BY t.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tenants)
    }

    /// Approve a pending tenant, admitting them into their requested
    /// room. One transaction: the tenant and room rows are locked,
    /// occupancy is recomputed by counting approved tenants, and both
    /// writes commit together. On a full room the transaction rolls
    /// back and the error carries alternative rooms with zero approved
    /// occupants.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "update", db.record_id = %tenant_id))]
    pub async fn approve(&self, tenant_id: Uuid) -> Result<RoomOccupancySnapshot, ApprovalError> {
        let mut tx = self.pool.begin().await?;

        let room_id = sqlx::query_scalar::<Postgres, Option<Uuid>>(
            "SELECT room_id FROM tenants WHERE id = $1 FOR UPDATE",
        )
        .bind(tenant_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ApprovalError::TenantNotFound)?
        .ok_or(ApprovalError::NoRoomAssigned)?;

        let room = sqlx::query_as::<Postgres, ApprovalRoom>(
            "SELECT room_number, room_type, rate, capacity FROM rooms WHERE id = $1 FOR UPDATE",
        )
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ApprovalError::RoomNotFound)?;

        let approved_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tenants WHERE room_id = $1 AND status = 'approved'",
        )
        .bind(room_id)
        .fetch_one(&mut *tx)
        .await?;

        if !occupancy::has_vacancy(room.capacity, approved_count) {
            let available_rooms = self.suggest_vacant_rooms(&mut tx).await?;
            return Err(ApprovalError::RoomFull { available_rooms });
        }

        let snapshot = occupancy::snapshot_after_admission(room.capacity, approved_count);

        sqlx::query("UPDATE tenants SET status = 'approved', balance = $1 WHERE id = $2")
            .bind(room.rate)
            .bind(tenant_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE rooms SET current_occupancy = $1, available_slots = $2, status = $3 WHERE id = $4",
        )
        .bind(snapshot.current_occupancy)
        .bind(snapshot.available_slots)
        .bind(snapshot.status)
        .bind(room_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(RoomOccupancySnapshot {
            room_number: room.room_number,
            room_type: room.room_type,
            capacity: room.capacity,
            current_occupancy: snapshot.current_occupancy,
            available_slots: snapshot.available_slots,
            status: snapshot.status,
        })
    }

    /// Rooms with zero approved occupants, offered as alternatives when
    /// an approval hits a full room. Only approved tenants count toward
    /// occupancy anywhere in the system, so a room held entirely by
    /// pending requests still shows up here.
    async fn suggest_vacant_rooms(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
    ) -> Result<Vec<RoomSuggestion>, sqlx::Error> {
        sqlx::query_as::<Postgres, RoomSuggestion>(
            r#"
            SELECT id, room_number, room_type, capacity
            FROM rooms
            WHERE id NOT IN (
                SELECT room_id FROM tenants
                WHERE status = 'approved' AND room_id IS NOT NULL
            )
            ORDER BY room_number ASC
            "#,
        )
        .fetch_all(&mut **tx)
        .await
    }

    /// The authenticated user's latest room request, if any.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select"))]
    pub async fn my_request(&self, user_id: Uuid) -> Result<Option<TenantRequestDetails>, AppError> {
        let request = sqlx::query_as::<Postgres, TenantRequestDetails>(
            r#"
            SELECT t.id, t.full_name, t.email, t.phone, t.gender, t.address,
                   t.emergency_contact, t.room_id, t.status, t.balance, t.created_at,
                   r.room_number, r.room_type, r.rate
            FROM tenants t
            LEFT JOIN rooms r ON t.room_id = r.id
            WHERE t.user_id = $1
            ORDER BY t.created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select"))]
    pub async fn dashboard(&self, user_id: Uuid) -> Result<Option<TenantDashboard>, AppError> {
        let dashboard = sqlx::query_as::<Postgres, TenantDashboard>(
            r#"
            SELECT t.id, t.full_name AS tenant_name, t.status,
                   r.room_number, r.room_type, r.rate
            FROM tenants t
            LEFT JOIN rooms r ON t.room_id = r.id
            WHERE t.user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(dashboard)
    }

    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select"))]
    pub async fn billing_summary(
        &self,
        user_id: Uuid,
    ) -> Result<Option<TenantBillingSummary>, AppError> {
        let summary = sqlx::query_as::<Postgres, TenantBillingSummary>(
            r#"
            SELECT t.id AS tenant_id, t.balance, r.rate AS room_rate, r.room_number
            FROM tenants t
            LEFT JOIN rooms r ON r.id = t.room_id
            WHERE t.user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Approved tenants still inside their 30-day period, oldest first.
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select"))]
    pub async fn upcoming_dues(&self) -> Result<Vec<UpcomingDue>, AppError> {
        let dues = sqlx::query_as::<Postgres, UpcomingDue>(
            r#"
            SELECT t.id, t.full_name, t.email, t.phone,
                   r.room_number, r.room_type, t.created_at
            FROM tenants t
            LEFT JOIN rooms r ON t.room_id = r.id
            WHERE t.status = 'approved'
              AND t.created_at + INTERVAL '30 days' >= CURRENT_DATE
            ORDER BY t.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(dues)
    }

    pub async fn id_for_user(&self, user_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<Postgres, Uuid>("SELECT id FROM tenants WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tenants")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct ApprovalRoom {
    room_number: String,
    room_type: String,
    rate: Decimal,
    capacity: i32,
}
