use rust_decimal::Decimal;

use stagehand_domain::booking::BookingStatus;
use stagehand_domain::user::UserRole;
use stagehand_marketplace::domain::types::{ArtistProfile, Booking, Payment};
use stagehand_marketplace::error::MarketplaceError;
use stagehand_marketplace::usecase::booking::{BookingParams, UpdateBookingUseCase};
use stagehand_marketplace::usecase::payment::{CreatePaymentUseCase, PaymentParams};

use crate::helpers::{
    MemoryStore, principal_of, test_booking, test_profile, test_service, test_user,
};

struct Order {
    store: MemoryStore,
    booking: Booking,
}

fn order() -> Order {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let service = store.put(test_service(profile.id, "Portrait"));
    let customer = store.put(test_user(UserRole::Customer));
    let booking = store.put(test_booking(&service, customer.id));
    Order { store, booking }
}

fn paying(booking: &Booking) -> PaymentParams {
    PaymentParams {
        booking_id: Some(booking.id),
        amount: Some(Decimal::new(5000, 2)),
        currency: Some("usd".into()),
        processor_reference: Some("pi_123".into()),
        ..PaymentParams::default()
    }
}

// ── Payments ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_record_one_payment_per_booking() {
    let Order { store, booking } = order();
    let admin = principal_of(&store.put(test_user(UserRole::Admin)), None);
    let uc = CreatePaymentUseCase {
        repo: store.clone(),
    };

    let payment = uc.execute(&admin, paying(&booking)).await.unwrap();
    assert_eq!(payment.booking_id, booking.id);
    assert_eq!(payment.amount, Decimal::new(5000, 2));
    assert_eq!(payment.processor_reference.as_deref(), Some("pi_123"));

    let second = uc.execute(&admin, paying(&booking)).await;
    match second {
        Err(MarketplaceError::Validation(errors)) => {
            assert_eq!(errors.messages(), ["Booking has already been taken"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(store.all::<Payment>().len(), 1);
}

#[tokio::test]
async fn should_keep_payments_admin_only() {
    let Order { store, booking } = order();
    let customer = store.get(booking.customer_id).unwrap();

    let result = CreatePaymentUseCase {
        repo: store.clone(),
    }
    .execute(&principal_of(&customer, None), paying(&booking))
    .await;

    assert!(matches!(result, Err(MarketplaceError::Forbidden)));
    assert!(store.all::<Payment>().is_empty());
}

#[tokio::test]
async fn should_require_amount_and_booking() {
    let Order { store, .. } = order();
    let admin = principal_of(&store.put(test_user(UserRole::Admin)), None);

    let result = CreatePaymentUseCase {
        repo: store.clone(),
    }
    .execute(&admin, PaymentParams::default())
    .await;

    match result {
        Err(MarketplaceError::Validation(errors)) => assert_eq!(
            errors.messages(),
            ["Booking must exist", "Amount can't be blank"]
        ),
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── Booking status ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_allow_any_status_to_follow_any_other() {
    let Order { store, booking } = order();
    let admin = principal_of(&store.put(test_user(UserRole::Admin)), None);
    let uc = UpdateBookingUseCase {
        repo: store.clone(),
    };
    let set = |status: &str| BookingParams {
        status: Some(status.to_owned()),
        ..BookingParams::default()
    };

    for (raw, expected) in [
        ("completed", BookingStatus::Completed),
        ("pending", BookingStatus::Pending),
        ("cancelled", BookingStatus::Cancelled),
        ("confirmed", BookingStatus::Confirmed),
    ] {
        let updated = uc.execute(&admin, booking.id, set(raw)).await.unwrap();
        assert_eq!(updated.status, expected);
        assert_eq!(store.get::<Booking>(booking.id).unwrap().status, expected);
    }

    let rejected = uc.execute(&admin, booking.id, set("archived")).await;
    assert!(matches!(rejected, Err(MarketplaceError::Validation(_))));
    assert_eq!(
        store.get::<Booking>(booking.id).unwrap().status,
        BookingStatus::Confirmed
    );
}

#[tokio::test]
async fn should_let_receiving_artist_confirm_a_booking() {
    let Order { store, booking } = order();
    let profile = store
        .get::<ArtistProfile>(booking.artist_profile_id)
        .unwrap();
    let artist = store.get(profile.user_id).unwrap();

    let confirmed = UpdateBookingUseCase {
        repo: store.clone(),
    }
    .execute(
        &principal_of(&artist, Some(&profile)),
        booking.id,
        BookingParams {
            status: Some("confirmed".into()),
            ..BookingParams::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(confirmed.customer_id, booking.customer_id);
}
