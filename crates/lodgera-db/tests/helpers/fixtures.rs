//! Row fixtures inserted directly, bypassing the repositories under test.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_room(pool: &PgPool, room_number: &str, rate: i64, capacity: i32) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO rooms (room_number, room_type, rate, capacity, available_slots)
        VALUES ($1, 'Single', $2, $3, $3)
        RETURNING id
        "#,
    )
    .bind(room_number)
    .bind(Decimal::from(rate))
    .bind(capacity)
    .fetch_one(pool)
    .await
    .expect("Failed to insert room")
}

pub async fn create_tenant(
    pool: &PgPool,
    room_id: Option<Uuid>,
    status: &str,
    balance: i64,
) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO tenants (
            full_name, email, phone, gender, address, emergency_contact,
            room_id, status, balance
        )
        VALUES ('Test Tenant', 'tenant@example.com', '09170000000', 'female',
                '1 Test St', '09171111111', $1, $2::tenant_status, $3)
        RETURNING id
        "#,
    )
    .bind(room_id)
    .bind(status)
    .bind(Decimal::from(balance))
    .fetch_one(pool)
    .await
    .expect("Failed to insert tenant")
}

pub async fn create_pending_payment(pool: &PgPool, tenant_id: Uuid, amount: i64) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO payments (tenant_id, amount, method, payment_type)
        VALUES ($1, $2, 'cash', 'partial')
        RETURNING id
        "#,
    )
    .bind(tenant_id)
    .bind(Decimal::from(amount))
    .fetch_one(pool)
    .await
    .expect("Failed to insert payment")
}

pub async fn tenant_status(pool: &PgPool, tenant_id: Uuid) -> String {
    sqlx::query_scalar("SELECT status::text FROM tenants WHERE id = $1")
        .bind(tenant_id)
        .fetch_one(pool)
        .await
        .expect("Failed to read tenant status")
}

pub async fn tenant_balance(pool: &PgPool, tenant_id: Uuid) -> Decimal {
    sqlx::query_scalar("SELECT balance FROM tenants WHERE id = $1")
        .bind(tenant_id)
        .fetch_one(pool)
        .await
        .expect("Failed to read tenant balance")
}

pub async fn room_occupancy(pool: &PgPool, room_id: Uuid) -> i32 {
    sqlx::query_scalar("SELECT current_occupancy FROM rooms WHERE id = $1")
        .bind(room_id)
        .fetch_one(pool)
        .await
        .expect("Failed to read room occupancy")
}
