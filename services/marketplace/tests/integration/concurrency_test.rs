//! Writes that lose a race with a concurrent request: the duplicate check
//! passes, then the unique key is already taken when the row is written.

use std::sync::Arc;

use rust_decimal::Decimal;

use stagehand_domain::user::UserRole;
use stagehand_marketplace::domain::types::{ArtistProfile, Payment, Service, User};
use stagehand_marketplace::error::MarketplaceError;
use stagehand_marketplace::usecase::artist_profile::ensure_artist_profile;
use stagehand_marketplace::usecase::payment::{CreatePaymentUseCase, PaymentParams};
use stagehand_marketplace::usecase::service::{CreateServiceUseCase, ServiceParams};
use stagehand_marketplace::usecase::session::SignupUseCase;
use stagehand_marketplace::usecase::user::UserParams;
use stagehand_testing::auth::TEST_JWT_SECRET;

use crate::helpers::{
    MemoryStore, StaleStore, principal_of, test_booking, test_payment, test_profile,
    test_service, test_user, test_user_with_password,
};

async fn signup(store: StaleStore, role: &str) -> Result<User, MarketplaceError> {
    let uc = SignupUseCase {
        repo: store,
        jwt_secret: Arc::from(TEST_JWT_SECRET),
        token_ttl_secs: 3600,
    };
    let params = UserParams {
        email: Some("ada@example.com".into()),
        password: Some("secret123".into()),
        password_confirmation: Some("secret123".into()),
        role: Some(role.to_owned()),
        ..UserParams::default()
    };
    uc.execute(params).await.map(|out| out.user)
}

fn assert_taken<T: std::fmt::Debug>(result: Result<T, MarketplaceError>, message: &str) {
    match result {
        Err(MarketplaceError::Validation(errors)) => assert_eq!(errors.messages(), [message]),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn should_reject_email_taken_after_the_check() {
    let store = MemoryStore::new();
    store.put(test_user_with_password(
        "ada@example.com",
        "secret123",
        UserRole::Customer,
    ));

    let result = signup(StaleStore::new(store.clone()), "customer").await;

    assert_taken(result, "Email has already been taken");
    assert_eq!(store.all::<User>().len(), 1);
}

#[tokio::test]
async fn should_write_neither_user_nor_profile_when_artist_email_is_taken() {
    let store = MemoryStore::new();
    store.put(test_user_with_password(
        "ada@example.com",
        "secret123",
        UserRole::Customer,
    ));

    let result = signup(StaleStore::new(store.clone()), "artist").await;

    assert_taken(result, "Email has already been taken");
    assert_eq!(store.all::<User>().len(), 1);
    assert!(store.all::<ArtistProfile>().is_empty());
}

#[tokio::test]
async fn should_return_profile_provisioned_concurrently() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let existing = store.put(test_profile(artist.id));

    let profile = ensure_artist_profile(&StaleStore::new(store.clone()), artist.id)
        .await
        .unwrap();

    assert_eq!(profile.id, existing.id);
    assert_eq!(store.all::<ArtistProfile>().len(), 1);
}

#[tokio::test]
async fn should_write_service_under_profile_provisioned_concurrently() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let existing = store.put(test_profile(artist.id));

    let service = CreateServiceUseCase {
        repo: StaleStore::new(store.clone()),
    }
    .execute(
        &principal_of(&artist, None),
        ServiceParams {
            name: Some("Portrait".into()),
            ..ServiceParams::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(service.artist_profile_id, existing.id);
    assert_eq!(store.all::<ArtistProfile>().len(), 1);
    assert_eq!(store.all::<Service>().len(), 1);
}

#[tokio::test]
async fn should_reject_second_payment_written_after_the_check() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let service = store.put(test_service(profile.id, "Portrait"));
    let customer = store.put(test_user(UserRole::Customer));
    let booking = store.put(test_booking(&service, customer.id));
    store.put(test_payment(&booking, Decimal::new(50, 0)));
    let admin = store.put(test_user(UserRole::Admin));

    let result = CreatePaymentUseCase {
        repo: StaleStore::new(store.clone()),
    }
    .execute(
        &principal_of(&admin, None),
        PaymentParams {
            booking_id: Some(booking.id),
            amount: Some(Decimal::new(50, 0)),
            ..PaymentParams::default()
        },
    )
    .await;

    assert_taken(result, "Booking has already been taken");
    assert_eq!(store.all::<Payment>().len(), 1);
}
