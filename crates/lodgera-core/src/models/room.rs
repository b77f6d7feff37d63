use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Display status of a room. `occupied` iff no slots remain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "room_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Occupied,
}

/// Room entity. `current_occupancy`, `available_slots`, and `status` are
/// denormalized display caches; decision-time occupancy is recomputed by
/// counting approved tenants.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub id: Uuid,
    pub room_number: String,
    pub room_type: String,
    pub rate: Decimal,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub available_slots: i32,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a room. `rate > 0` is checked at the handler
/// since validator ranges do not cover `Decimal`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewRoom {
    #[validate(length(min = 1, message = "Room number is required"))]
    pub room_number: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub room_type: String,
    pub rate: Decimal,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
}

/// Alternative room offered when an approval hits a full room.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RoomSuggestion {
    pub id: Uuid,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub capacity: i32,
}

/// Room inventory row with occupancy recomputed per request.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RoomInventoryEntry {
    pub id: Uuid,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub rate: Decimal,
    pub capacity: i32,
    pub occupied_count: i64,
    pub availability: String,
}

/// Room cache state after an assignment/approval, echoed in responses.
#[derive(Debug, Clone, Serialize)]
pub struct RoomOccupancySnapshot {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub available_slots: i32,
    pub status: RoomStatus,
}
