use chrono::{Days, Utc};
use rust_decimal::Decimal;

use stagehand_domain::booking::BookingStatus;
use stagehand_domain::policy::Principal;
use stagehand_domain::user::UserRole;
use stagehand_marketplace::domain::types::{ArtistProfile, Booking};
use stagehand_marketplace::error::MarketplaceError;
use stagehand_marketplace::usecase::dashboard::{DashboardStats, DashboardUseCase};

use crate::helpers::{
    MemoryStore, principal_of, test_booking, test_organization, test_payment, test_profile,
    test_review, test_service, test_user,
};

struct Studio {
    store: MemoryStore,
    artist: Principal,
    customer: Principal,
    admin: Principal,
}

/// One artist with two services, one customer with a completed and a
/// pending booking, a second artist with a booking of their own.
fn studio() -> Studio {
    let store = MemoryStore::new();
    let today = Utc::now().date_naive();

    let artist_user = store.put(test_user(UserRole::Artist));
    let profile = store.put(ArtistProfile {
        is_approved: true,
        ..test_profile(artist_user.id)
    });
    let portrait = store.put(test_service(profile.id, "Portrait"));
    store.put(test_service(profile.id, "Mural"));

    let customer_user = store.put(test_user(UserRole::Customer));
    let done = store.put(Booking {
        status: BookingStatus::Completed,
        booking_date: today.checked_sub_days(Days::new(3)),
        ..test_booking(&portrait, customer_user.id)
    });
    store.put(Booking {
        booking_date: today.checked_add_days(Days::new(2)),
        ..test_booking(&portrait, customer_user.id)
    });
    store.put(test_payment(&done, Decimal::new(12050, 2)));
    store.put(test_review(&done, 4));

    let rival_user = store.put(test_user(UserRole::Artist));
    let rival = store.put(test_profile(rival_user.id));
    let rival_service = store.put(test_service(rival.id, "Sculpture"));
    let rival_booking = store.put(test_booking(&rival_service, customer_user.id));
    store.put(test_payment(&rival_booking, Decimal::new(300, 0)));
    store.put(test_review(&rival_booking, 5));

    store.put(test_organization("Acme Events"));
    let admin_user = store.put(test_user(UserRole::Admin));

    Studio {
        artist: principal_of(&artist_user, Some(&profile)),
        customer: principal_of(&customer_user, None),
        admin: principal_of(&admin_user, None),
        store,
    }
}

#[tokio::test]
async fn should_scope_artist_stats_to_own_profile() {
    let s = studio();
    let uc = DashboardUseCase { repo: s.store };

    let stats = uc
        .artist(&s.artist, Utc::now().date_naive())
        .await
        .unwrap();

    assert_eq!(stats.total_bookings, 2);
    assert_eq!(stats.completed_bookings, 1);
    assert_eq!(stats.pending_bookings, 1);
    assert_eq!(stats.total_services, 2);
    assert_eq!(stats.total_reviews, 1);
    assert_eq!(stats.average_rating, 4.0);
    assert_eq!(stats.total_revenue, Decimal::new(12050, 2));
    assert_eq!(stats.upcoming_bookings, 1);
}

#[tokio::test]
async fn should_total_everything_for_admin() {
    let s = studio();
    let uc = DashboardUseCase { repo: s.store };

    let stats = uc.admin(&s.admin).await.unwrap();

    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.total_artists, 2);
    assert_eq!(stats.approved_artists, 1);
    assert_eq!(stats.total_bookings, 3);
    assert_eq!(stats.total_services, 3);
    assert_eq!(stats.total_reviews, 2);
    assert_eq!(stats.total_revenue, Decimal::new(42050, 2));
    assert_eq!(stats.total_organizations, 1);
}

#[tokio::test]
async fn should_dispatch_customer_stats_by_role() {
    let s = studio();
    let uc = DashboardUseCase { repo: s.store };

    let stats = uc
        .execute(&s.customer, Utc::now().date_naive())
        .await
        .unwrap();

    let DashboardStats::Customer(customer) = &stats else {
        panic!("expected customer stats, got {stats:?}");
    };
    assert_eq!(customer.total_bookings, 3);
    assert_eq!(customer.total_spent, Decimal::new(42050, 2));
    assert_eq!(customer.total_reviews, 2);
}

#[tokio::test]
async fn should_report_zero_rating_without_reviews() {
    let store = MemoryStore::new();
    let user = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(user.id));
    let uc = DashboardUseCase { repo: store };

    let stats = uc
        .artist(&principal_of(&user, Some(&profile)), Utc::now().date_naive())
        .await
        .unwrap();

    assert_eq!(stats.average_rating, 0.0);
    assert_eq!(stats.total_revenue, Decimal::ZERO);
}

#[tokio::test]
async fn should_keep_role_dashboards_to_their_role() {
    let s = studio();
    let uc = DashboardUseCase { repo: s.store };

    let admin_as_customer = uc.admin(&s.customer).await;
    let artist_as_customer = uc.artist(&s.customer, Utc::now().date_naive()).await;

    assert!(matches!(admin_as_customer, Err(MarketplaceError::Forbidden)));
    assert!(matches!(artist_as_customer, Err(MarketplaceError::Forbidden)));
}
