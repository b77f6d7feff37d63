//! Payment settlement arithmetic.
//!
//! Approving a payment deducts its amount from the tenant's outstanding
//! balance, clamped at zero. The payment becomes `paid` when the balance
//! reaches zero, `partial` otherwise. A stored balance of exactly zero
//! means it was never initialized (the tenant reached adjudication
//! without going through approval), in which case the room rate is the
//! effective starting balance.

use rust_decimal::Decimal;

use crate::models::PaymentStatus;

/// Result of applying a payment amount to a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub new_balance: Decimal,
    pub status: PaymentStatus,
}

/// Starting balance for adjudication: the stored balance, or the room
/// rate when the stored balance was never initialized (exactly zero).
pub fn effective_balance(stored_balance: Decimal, room_rate: Decimal) -> Decimal {
    if stored_balance.is_zero() {
        room_rate
    } else {
        stored_balance
    }
}

/// Deduct `amount` from `balance`: `new_balance = max(0, balance - amount)`,
/// status `paid` iff the balance hits zero.
pub fn settle(balance: Decimal, amount: Decimal) -> Settlement {
    let new_balance = (balance - amount).max(Decimal::ZERO);
    let status = if new_balance.is_zero() {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Partial
    };
    Settlement { new_balance, status }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn exact_payment_settles_in_full() {
        let s = settle(d(5000), d(5000));
        assert_eq!(s.new_balance, Decimal::ZERO);
        assert_eq!(s.status, PaymentStatus::Paid);
    }

    #[test]
    fn partial_payment_leaves_remainder() {
        let s = settle(d(5000), d(2000));
        assert_eq!(s.new_balance, d(3000));
        assert_eq!(s.status, PaymentStatus::Partial);
    }

    #[test]
    fn overpayment_clamps_at_zero() {
        let s = settle(d(1500), d(2000));
        assert_eq!(s.new_balance, Decimal::ZERO);
        assert_eq!(s.status, PaymentStatus::Paid);
    }

    #[test]
    fn uninitialized_balance_falls_back_to_room_rate() {
        assert_eq!(effective_balance(Decimal::ZERO, d(5000)), d(5000));
        assert_eq!(effective_balance(d(3200), d(5000)), d(3200));
    }

    #[test]
    fn fallback_then_settle_matches_fresh_approval() {
        let balance = effective_balance(Decimal::ZERO, d(4500));
        let s = settle(balance, d(4500));
        assert_eq!(s.new_balance, Decimal::ZERO);
        assert_eq!(s.status, PaymentStatus::Paid);
    }
}
