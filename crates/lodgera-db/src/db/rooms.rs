use lodgera_core::{
    error::AssignmentError,
    models::{NewRoom, Room, RoomInventoryEntry, RoomOccupancySnapshot},
    occupancy, AppError,
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for rooms and the direct-assignment command
#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a room with empty occupancy caches.
    #[tracing::instrument(skip(self), fields(db.table = "rooms", db.operation = "insert"))]
    pub async fn create(&self, form: &NewRoom) -> Result<Room, AppError> {
        let room = sqlx::query_as::<Postgres, Room>(
            r#"
            INSERT INTO rooms (room_number, room_type, rate, capacity, available_slots)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, room_number, room_type, rate, capacity,
                      current_occupancy, available_slots, status, created_at
            "#,
        )
        .bind(&form.room_number)
        .bind(&form.room_type)
        .bind(form.rate)
        .bind(form.capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(room)
    }

    /// Room inventory with occupancy recomputed per row. The count
    /// includes every non-rejected tenant, as the public listing shows
    /// pending requests as taking a slot.
    #[tracing::instrument(skip(self), fields(db.table = "rooms", db.operation = "select"))]
    pub async fn list_inventory(&self) -> Result<Vec<RoomInventoryEntry>, AppError> {
        let rooms = sqlx::query_as::<Postgres, RoomInventoryEntry>(
            r#"
            SELECT
                r.id,
                r.room_number,
                r.room_type,
                r.rate,
                r.capacity,
                (SELECT COUNT(*) FROM tenants t
                 WHERE t.room_id = r.id AND t.status != 'rejected') AS occupied_count,
                CASE
                    WHEN (SELECT COUNT(*) FROM tenants t
                          WHERE t.room_id = r.id AND t.status != 'rejected') >= r.capacity
                    THEN 'Full'
                    ELSE 'Available'
                END AS availability
            FROM rooms r
            ORDER BY r.room_number ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Assign a tenant directly to a room, approving them in the same
    /// step. Runs as one transaction with both rows locked; occupancy is
    /// recomputed from approved tenants, never read from the caches.
    /// The tenant's balance is initialized to the room rate, matching
    /// the approval flow.
    ///
    /// Lock order is tenant then room, the same order the approval
    /// command uses, so the two commands cannot deadlock each other.
    #[tracing::instrument(skip(self), fields(db.table = "rooms", db.operation = "update", db.record_id = %room_id))]
    pub async fn assign_tenant(
        &self,
        tenant_id: Uuid,
        room_id: Uuid,
    ) -> Result<RoomOccupancySnapshot, AssignmentError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<Postgres, Uuid>("SELECT id FROM tenants WHERE id = $1 FOR UPDATE")
            .bind(tenant_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AssignmentError::TenantNotFound)?;

        let room = sqlx::query_as::<Postgres, LockedRoom>(
            "SELECT room_number, room_type, rate, capacity FROM rooms WHERE id = $1 FOR UPDATE",
        )
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AssignmentError::RoomNotFound)?;

        let approved_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tenants WHERE room_id = $1 AND status = 'approved'",
        )
        .bind(room_id)
        .fetch_one(&mut *tx)
        .await?;

        if !occupancy::has_vacancy(room.capacity, approved_count) {
            return Err(AssignmentError::RoomFull);
        }

        let snapshot = occupancy::snapshot_after_admission(room.capacity, approved_count);

        sqlx::query(
            "UPDATE tenants SET room_id = $1, status = 'approved', balance = $2 WHERE id = $3",
        )
        .bind(room_id)
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

    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct LockedRoom {
    room_number: String,
    room_type: String,
    rate: Decimal,
    capacity: i32,
}
