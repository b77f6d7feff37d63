//! Integration tests for the transactional business commands.

mod helpers;

use helpers::fixtures;
use helpers::setup_test_db;
use lodgera_core::error::{ApprovalError, PaymentDecisionError};
use lodgera_core::models::{PaymentStatus, UserRole};
use lodgera_core::AppError;
use lodgera_db::{PaymentRepository, RoomRepository, TenantRepository, UserRepository};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::test]
async fn approval_admits_tenant_and_refreshes_caches() {
    let db = setup_test_db().await;
    let tenants = TenantRepository::new(db.pool.clone());

    let room_id = fixtures::create_room(&db.pool, "101", 5000, 2).await;
    let tenant_id = fixtures::create_tenant(&db.pool, Some(room_id), "pending", 0).await;

    let room = tenants.approve(tenant_id).await.expect("approval failed");
    assert_eq!(room.current_occupancy, 1);
    assert_eq!(room.available_slots, 1);

    assert_eq!(fixtures::tenant_status(&db.pool, tenant_id).await, "approved");
    assert_eq!(
        fixtures::tenant_balance(&db.pool, tenant_id).await,
        Decimal::from(5000)
    );
    assert_eq!(fixtures::room_occupancy(&db.pool, room_id).await, 1);
}

#[tokio::test]
async fn full_room_approval_is_rejected_without_state_change() {
    let db = setup_test_db().await;
    let tenants = TenantRepository::new(db.pool.clone());

    let full_room = fixtures::create_room(&db.pool, "101", 5000, 1).await;
    let empty_room = fixtures::create_room(&db.pool, "102", 4500, 2).await;
    fixtures::create_tenant(&db.pool, Some(full_room), "approved", 5000).await;
    let applicant = fixtures::create_tenant(&db.pool, Some(full_room), "pending", 0).await;

    let err = tenants.approve(applicant).await.unwrap_err();
    let ApprovalError::RoomFull { available_rooms } = err else {
        panic!("Expected RoomFull, got {:?}", err);
    };
    assert!(available_rooms.iter().any(|r| r.id == empty_room));
    assert!(available_rooms.iter().all(|r| r.id != full_room));

    // Rolled back: the applicant is untouched.
    assert_eq!(fixtures::tenant_status(&db.pool, applicant).await, "pending");
    assert_eq!(
        fixtures::tenant_balance(&db.pool, applicant).await,
        Decimal::ZERO
    );
}

#[tokio::test]
async fn finalized_payment_is_immutable() {
    let db = setup_test_db().await;
    let payments = PaymentRepository::new(db.pool.clone());

    let room_id = fixtures::create_room(&db.pool, "101", 5000, 2).await;
    let tenant_id = fixtures::create_tenant(&db.pool, Some(room_id), "approved", 5000).await;
    let payment_id = fixtures::create_pending_payment(&db.pool, tenant_id, 5000).await;

    let approval = payments.approve(payment_id).await.expect("approve failed");
    assert_eq!(approval.status, PaymentStatus::Paid);
    assert_eq!(approval.balance, Decimal::ZERO);

    let err = payments.approve(payment_id).await.unwrap_err();
    assert!(matches!(
        err,
        PaymentDecisionError::AlreadyFinalized(PaymentStatus::Paid)
    ));

    let err = payments.reject(payment_id).await.unwrap_err();
    assert!(matches!(
        err,
        PaymentDecisionError::AlreadyFinalized(PaymentStatus::Paid)
    ));

    assert_eq!(
        fixtures::tenant_balance(&db.pool, tenant_id).await,
        Decimal::ZERO
    );
}

#[tokio::test]
async fn partial_payment_cannot_be_rejected() {
    let db = setup_test_db().await;
    let payments = PaymentRepository::new(db.pool.clone());

    let room_id = fixtures::create_room(&db.pool, "101", 5000, 2).await;
    let tenant_id = fixtures::create_tenant(&db.pool, Some(room_id), "approved", 5000).await;
    let payment_id = fixtures::create_pending_payment(&db.pool, tenant_id, 2000).await;

    let approval = payments.approve(payment_id).await.expect("approve failed");
    assert_eq!(approval.status, PaymentStatus::Partial);
    assert_eq!(approval.balance, Decimal::from(3000));

    let err = payments.reject(payment_id).await.unwrap_err();
    assert!(matches!(err, PaymentDecisionError::AlreadyApplied));
    assert_eq!(
        fixtures::tenant_balance(&db.pool, tenant_id).await,
        Decimal::from(3000)
    );
}

#[tokio::test]
async fn rejecting_pending_payment_leaves_balance_unchanged() {
    let db = setup_test_db().await;
    let payments = PaymentRepository::new(db.pool.clone());

    let room_id = fixtures::create_room(&db.pool, "101", 5000, 2).await;
    let tenant_id = fixtures::create_tenant(&db.pool, Some(room_id), "approved", 5000).await;
    let payment_id = fixtures::create_pending_payment(&db.pool, tenant_id, 2000).await;

    let status = payments.reject(payment_id).await.expect("reject failed");
    assert_eq!(status, PaymentStatus::Rejected);
    assert_eq!(
        fixtures::tenant_balance(&db.pool, tenant_id).await,
        Decimal::from(5000)
    );

    let err = payments.approve(payment_id).await.unwrap_err();
    assert!(matches!(
        err,
        PaymentDecisionError::AlreadyFinalized(PaymentStatus::Rejected)
    ));
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let db = setup_test_db().await;
    let users = UserRepository::new(db.pool.clone());

    users
        .create("Ana", "ana@example.com", "$2b$10$hash", UserRole::Client)
        .await
        .expect("first registration failed");

    let err = users
        .create("Ana Again", "ana@example.com", "$2b$10$hash", UserRole::Client)
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(msg) => assert_eq!(msg, "Email already registered."),
        other => panic!("Expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn find_by_id_resolves_account() {
    let db = setup_test_db().await;
    let users = UserRepository::new(db.pool.clone());

    let user = users
        .create("Ana", "ana@example.com", "$2b$10$hash", UserRole::Client)
        .await
        .expect("registration failed");

    let found = users
        .find_by_id(user.id)
        .await
        .expect("lookup failed")
        .expect("account missing");
    assert_eq!(found.email, "ana@example.com");

    let missing = users.find_by_id(Uuid::new_v4()).await.expect("lookup failed");
    assert!(missing.is_none());
}

/// Approval and direct assignment lock tenant then room in the same
/// order, so running them concurrently against the same pair completes
/// instead of deadlocking.
#[tokio::test]
async fn concurrent_approval_and_assignment_complete() {
    let db = setup_test_db().await;
    let tenants = TenantRepository::new(db.pool.clone());
    let rooms = RoomRepository::new(db.pool.clone());

    let room_id = fixtures::create_room(&db.pool, "101", 5000, 2).await;
    let applicant = fixtures::create_tenant(&db.pool, Some(room_id), "pending", 0).await;
    let walk_in = fixtures::create_tenant(&db.pool, None, "pending", 0).await;

    let (approved, assigned) = tokio::join!(
        tenants.approve(applicant),
        rooms.assign_tenant(walk_in, room_id),
    );

    approved.expect("approval failed");
    assigned.expect("assignment failed");

    assert_eq!(fixtures::room_occupancy(&db.pool, room_id).await, 2);
    assert_eq!(fixtures::tenant_status(&db.pool, applicant).await, "approved");
    assert_eq!(fixtures::tenant_status(&db.pool, walk_in).await, "approved");
}
