//! Room occupancy arithmetic.
//!
//! Occupancy is always the count of tenants with `status = approved`
//! referencing a room, recomputed from source rows at decision time. The
//! functions here turn that count into the denormalized caches stored on
//! the room row (`current_occupancy`, `available_slots`, `status`) so the
//! invariants hold in one place:
//!
//! * `available_slots = capacity - current_occupancy`, never negative
//!   inputs accepted by the flow (the vacancy check runs first)
//! * `status = occupied` iff `available_slots <= 0`

use crate::models::RoomStatus;

/// Recomputed cache values for a room after a change in occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancySnapshot {
    pub current_occupancy: i32,
    pub available_slots: i32,
    pub status: RoomStatus,
}

/// Whether one more tenant fits, given the recomputed approved count.
pub fn has_vacancy(capacity: i32, approved_count: i64) -> bool {
    approved_count < capacity as i64
}

/// Cache values for a room occupied by `approved_count` tenants.
pub fn snapshot(capacity: i32, approved_count: i64) -> OccupancySnapshot {
    let current_occupancy = approved_count.min(capacity as i64) as i32;
    let available_slots = capacity - current_occupancy;
    let status = if available_slots <= 0 {
        RoomStatus::Occupied
    } else {
        RoomStatus::Available
    };
    OccupancySnapshot {
        current_occupancy,
        available_slots,
        status,
    }
}

/// Cache values after admitting one more tenant.
pub fn snapshot_after_admission(capacity: i32, approved_count: i64) -> OccupancySnapshot {
    snapshot(capacity, approved_count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacancy_below_capacity() {
        assert!(has_vacancy(2, 0));
        assert!(has_vacancy(2, 1));
        assert!(!has_vacancy(2, 2));
        assert!(!has_vacancy(2, 3));
    }

    #[test]
    fn slots_equal_capacity_minus_occupancy() {
        for capacity in 1..=4 {
            for occupied in 0..=capacity as i64 {
                let snap = snapshot(capacity, occupied);
                assert_eq!(snap.available_slots, capacity - snap.current_occupancy);
                assert!(snap.available_slots >= 0);
            }
        }
    }

    #[test]
    fn occupied_iff_no_slots_left() {
        assert_eq!(snapshot(2, 2).status, RoomStatus::Occupied);
        assert_eq!(snapshot(2, 1).status, RoomStatus::Available);
        assert_eq!(snapshot(1, 1).status, RoomStatus::Occupied);
        assert_eq!(snapshot(3, 0).status, RoomStatus::Available);
    }

    #[test]
    fn admission_increments_occupancy_by_one() {
        let snap = snapshot_after_admission(2, 0);
        assert_eq!(snap.current_occupancy, 1);
        assert_eq!(snap.available_slots, 1);
        assert_eq!(snap.status, RoomStatus::Available);

        let snap = snapshot_after_admission(2, 1);
        assert_eq!(snap.current_occupancy, 2);
        assert_eq!(snap.available_slots, 0);
        assert_eq!(snap.status, RoomStatus::Occupied);
    }
}
