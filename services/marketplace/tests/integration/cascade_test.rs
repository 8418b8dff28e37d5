use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use stagehand_domain::booking::BookingStatus;
use stagehand_domain::pagination::PageRequest;
use stagehand_domain::user::UserRole;
use stagehand_marketplace::domain::record::ListQuery;
use stagehand_marketplace::domain::types::{
    ArtistProfile, Booking, Payment, Review, Service, ServiceCategory, User,
};
use stagehand_marketplace::error::MarketplaceError;
use stagehand_marketplace::usecase::booking::{
    ArtistBookingsUseCase, BookingParams, CreateBookingUseCase, MyBookingsUseCase,
    UpdateBookingUseCase,
};
use stagehand_marketplace::usecase::crud::{DeleteUseCase, GetUseCase};
use stagehand_marketplace::usecase::review::{CreateReviewUseCase, ReviewParams};

use crate::helpers::{
    MemoryStore, principal_of, test_booking, test_payment, test_profile, test_review,
    test_service, test_user,
};

// ── Delete cascades ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_remove_artist_dependents_with_the_user() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let service = store.put(test_service(profile.id, "Portrait"));
    let customer = store.put(test_user(UserRole::Customer));
    let booking = store.put(test_booking(&service, customer.id));
    store.put(test_payment(&booking, Decimal::new(50, 0)));
    store.put(test_review(&booking, 5));
    let admin = store.put(test_user(UserRole::Admin));

    DeleteUseCase {
        repo: store.clone(),
    }
    .execute::<User>(&principal_of(&admin, None), artist.id)
    .await
    .unwrap();

    assert!(store.get::<User>(artist.id).is_none());
    assert!(store.all::<ArtistProfile>().is_empty());
    assert!(store.all::<Service>().is_empty());
    assert!(store.all::<Booking>().is_empty());
    assert!(store.all::<Payment>().is_empty());
    assert!(store.all::<Review>().is_empty());
    assert!(store.get::<User>(customer.id).is_some());
}

#[tokio::test]
async fn should_detach_services_from_deleted_category() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let category = store.put(ServiceCategory {
        id: Uuid::now_v7(),
        name: "Painting".into(),
        description: None,
        icon: None,
        sort_order: 0,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    });
    let service = store.put(Service {
        service_category_id: Some(category.id),
        ..test_service(profile.id, "Mural")
    });
    let admin = store.put(test_user(UserRole::Admin));

    DeleteUseCase {
        repo: store.clone(),
    }
    .execute::<ServiceCategory>(&principal_of(&admin, None), category.id)
    .await
    .unwrap();

    let service = store.get::<Service>(service.id).unwrap();
    assert_eq!(service.service_category_id, None);
}

#[tokio::test]
async fn should_forbid_customer_deleting_a_service() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let service = store.put(test_service(profile.id, "Portrait"));
    let customer = store.put(test_user(UserRole::Customer));

    let result = DeleteUseCase {
        repo: store.clone(),
    }
    .execute::<Service>(&principal_of(&customer, None), service.id)
    .await;

    assert!(matches!(result, Err(MarketplaceError::Forbidden)));
    assert!(store.get::<Service>(service.id).is_some());
}

// ── Booking flow ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_let_artist_book_another_artists_service() {
    let store = MemoryStore::new();
    let seller = store.put(test_user(UserRole::Artist));
    let seller_profile = store.put(test_profile(seller.id));
    let service = store.put(test_service(seller_profile.id, "Portrait"));
    let buyer = store.put(test_user(UserRole::Artist));
    let buyer_profile = store.put(test_profile(buyer.id));
    let buyer_principal = principal_of(&buyer, Some(&buyer_profile));

    let booking = CreateBookingUseCase {
        repo: store.clone(),
    }
    .execute(
        &buyer_principal,
        BookingParams {
            service_id: Some(service.id),
            booking_date: Some("2026-11-02".into()),
            start_time: Some("10:00".into()),
            ..BookingParams::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(booking.artist_profile_id, seller_profile.id);
    assert_eq!(booking.customer_id, buyer.id);
    assert_eq!(booking.status, BookingStatus::Pending);

    let query = ListQuery::<Booking>::new(PageRequest::default());
    let mine = MyBookingsUseCase {
        repo: store.clone(),
    }
    .execute(&buyer_principal, &query)
    .await
    .unwrap();
    let received = ArtistBookingsUseCase {
        repo: store.clone(),
    }
    .execute(&buyer_principal, &query)
    .await
    .unwrap();

    assert_eq!(mine.items.len(), 1);
    assert_eq!(mine.items[0].id, booking.id);
    assert!(received.items.is_empty());
}

#[tokio::test]
async fn should_keep_purchase_detail_with_receiving_artist() {
    let store = MemoryStore::new();
    let seller = store.put(test_user(UserRole::Artist));
    let seller_profile = store.put(test_profile(seller.id));
    let service = store.put(test_service(seller_profile.id, "Portrait"));
    let buyer = store.put(test_user(UserRole::Artist));
    let buyer_profile = store.put(test_profile(buyer.id));
    let buyer_principal = principal_of(&buyer, Some(&buyer_profile));
    let booking = store.put(test_booking(&service, buyer.id));

    let mine = MyBookingsUseCase {
        repo: store.clone(),
    }
    .execute(&buyer_principal, &ListQuery::new(PageRequest::default()))
    .await
    .unwrap();
    assert_eq!(mine.items.len(), 1);

    let read = GetUseCase {
        repo: store.clone(),
    }
    .execute::<Booking>(Some(&buyer_principal), booking.id)
    .await;
    assert!(matches!(read, Err(MarketplaceError::Forbidden)));

    let cancel = UpdateBookingUseCase {
        repo: store.clone(),
    }
    .execute(
        &buyer_principal,
        booking.id,
        BookingParams {
            status: Some("cancelled".into()),
            ..BookingParams::default()
        },
    )
    .await;
    assert!(matches!(cancel, Err(MarketplaceError::Forbidden)));
    assert_eq!(
        store.get::<Booking>(booking.id).unwrap().status,
        BookingStatus::Pending
    );
}

#[tokio::test]
async fn should_ignore_customer_id_from_non_admin() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let service = store.put(test_service(profile.id, "Portrait"));
    let customer = store.put(test_user(UserRole::Customer));
    let victim = store.put(test_user(UserRole::Customer));

    let booking = CreateBookingUseCase {
        repo: store.clone(),
    }
    .execute(
        &principal_of(&customer, None),
        BookingParams {
            service_id: Some(service.id),
            customer_id: Some(victim.id),
            ..BookingParams::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(booking.customer_id, customer.id);
}

#[tokio::test]
async fn should_require_an_existing_service() {
    let store = MemoryStore::new();
    let customer = store.put(test_user(UserRole::Customer));

    let result = CreateBookingUseCase {
        repo: store.clone(),
    }
    .execute(
        &principal_of(&customer, None),
        BookingParams {
            service_id: Some(Uuid::now_v7()),
            ..BookingParams::default()
        },
    )
    .await;

    match result {
        Err(MarketplaceError::Validation(errors)) => {
            assert_eq!(errors.messages(), ["Service must exist"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(store.all::<Booking>().is_empty());
}

#[tokio::test]
async fn should_allow_one_review_per_own_booking() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let service = store.put(test_service(profile.id, "Portrait"));
    let customer = store.put(test_user(UserRole::Customer));
    let stranger = store.put(test_user(UserRole::Customer));
    let booking = store.put(test_booking(&service, customer.id));
    let uc = CreateReviewUseCase {
        repo: store.clone(),
    };
    let params = || ReviewParams {
        booking_id: Some(booking.id),
        rating: Some(5),
        comment: Some("Lovely".into()),
        ..ReviewParams::default()
    };

    let foreign = uc.execute(&principal_of(&stranger, None), params()).await;
    assert!(matches!(foreign, Err(MarketplaceError::Forbidden)));

    let review = uc
        .execute(&principal_of(&customer, None), params())
        .await
        .unwrap();
    assert_eq!(review.artist_profile_id, profile.id);
    assert_eq!(review.customer_id, customer.id);

    let second = uc.execute(&principal_of(&customer, None), params()).await;
    match second {
        Err(MarketplaceError::Validation(errors)) => {
            assert_eq!(errors.messages(), ["Booking has already been taken"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}
