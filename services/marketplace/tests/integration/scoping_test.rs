use uuid::Uuid;

use stagehand_domain::pagination::PageRequest;
use stagehand_domain::policy::Listing;
use stagehand_domain::user::UserRole;
use stagehand_marketplace::domain::record::{ListQuery, Record};
use stagehand_marketplace::domain::types::{ArtistProfile, Booking, Organization, Service, User};
use stagehand_marketplace::error::MarketplaceError;
use stagehand_marketplace::usecase::crud::{GetUseCase, ListUseCase};

use crate::helpers::{
    MemoryStore, principal_of, test_booking, test_organization, test_profile, test_service,
    test_user,
};

/// Two artists with one service each, and two customers who each booked
/// both services.
struct Marketplace {
    store: MemoryStore,
    artists: Vec<(User, Uuid)>,
    customers: Vec<User>,
    services: Vec<Service>,
}

fn seed() -> Marketplace {
    let store = MemoryStore::new();
    let mut artists = Vec::new();
    let mut services = Vec::new();
    for name in ["Portraits", "Weddings"] {
        let user = store.put(test_user(UserRole::Artist));
        let profile = store.put(test_profile(user.id));
        services.push(store.put(test_service(profile.id, name)));
        artists.push((user, profile.id));
    }
    let customers: Vec<_> = (0..2)
        .map(|_| store.put(test_user(UserRole::Customer)))
        .collect();
    for customer in &customers {
        for service in &services {
            store.put(test_booking(service, customer.id));
        }
    }
    Marketplace {
        store,
        artists,
        customers,
        services,
    }
}

fn all_rows<T: Record>() -> ListQuery<T> {
    ListQuery::new(PageRequest {
        per_page: 100,
        page: 1,
    })
}

#[tokio::test]
async fn should_list_only_own_bookings_for_customer() {
    let m = seed();
    let customer = &m.customers[0];
    let uc = ListUseCase {
        repo: m.store.clone(),
    };

    let page = uc
        .execute::<Booking>(
            Some(&principal_of(customer, None)),
            Listing::Default,
            &all_rows(),
        )
        .await
        .unwrap();

    assert_eq!(page.meta.total_count, 2);
    assert!(page.items.iter().all(|b| b.customer_id == customer.id));
}

#[tokio::test]
async fn should_list_only_received_bookings_for_artist() {
    let m = seed();
    let (user, profile_id) = &m.artists[1];
    let uc = ListUseCase {
        repo: m.store.clone(),
    };

    let principal = principal_of(user, m.store.get::<ArtistProfile>(*profile_id).as_ref());
    let page = uc
        .execute::<Booking>(Some(&principal), Listing::Default, &all_rows())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert!(page.items.iter().all(|b| b.artist_profile_id == *profile_id));
}

#[tokio::test]
async fn should_list_nothing_for_artist_without_profile() {
    let m = seed();
    let newcomer = m.store.put(test_user(UserRole::Artist));
    let uc = ListUseCase {
        repo: m.store.clone(),
    };

    let page = uc
        .execute::<Booking>(
            Some(&principal_of(&newcomer, None)),
            Listing::Default,
            &all_rows(),
        )
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.meta.total_count, 0);
}

#[tokio::test]
async fn should_list_every_booking_for_admin() {
    let m = seed();
    let admin = m.store.put(test_user(UserRole::Admin));
    let uc = ListUseCase {
        repo: m.store.clone(),
    };

    let page = uc
        .execute::<Booking>(
            Some(&principal_of(&admin, None)),
            Listing::Default,
            &all_rows(),
        )
        .await
        .unwrap();

    assert_eq!(page.meta.total_count, 4);
}

#[tokio::test]
async fn should_let_anonymous_callers_list_organizations() {
    let store = MemoryStore::new();
    store.put(test_organization("Acme Events"));
    let uc = ListUseCase { repo: store };

    let page = uc
        .execute::<Organization>(None, Listing::Default, &all_rows())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn should_reject_anonymous_booking_list() {
    let m = seed();
    let uc = ListUseCase { repo: m.store };

    let result = uc
        .execute::<Booking>(None, Listing::Default, &all_rows())
        .await;

    assert!(
        matches!(result, Err(MarketplaceError::Unauthenticated)),
        "expected Unauthenticated, got {result:?}"
    );
}

#[tokio::test]
async fn should_browse_every_service_but_manage_only_own() {
    let m = seed();
    let (user, profile_id) = &m.artists[0];
    let principal = principal_of(user, m.store.get::<ArtistProfile>(*profile_id).as_ref());
    let uc = ListUseCase {
        repo: m.store.clone(),
    };

    let browse = uc
        .execute::<Service>(Some(&principal), Listing::Browse, &all_rows())
        .await
        .unwrap();
    let own = uc
        .execute::<Service>(Some(&principal), Listing::Default, &all_rows())
        .await
        .unwrap();

    assert_eq!(browse.items.len(), m.services.len());
    assert_eq!(own.items.len(), 1);
    assert_eq!(own.items[0].artist_profile_id, *profile_id);
}

#[tokio::test]
async fn should_forbid_reading_another_customers_booking() {
    let m = seed();
    let other = &m.customers[1];
    let booking = m
        .store
        .all::<Booking>()
        .into_iter()
        .find(|b| b.customer_id == m.customers[0].id)
        .unwrap();
    let uc = GetUseCase { repo: m.store };

    let result = uc
        .execute::<Booking>(Some(&principal_of(other, None)), booking.id)
        .await;

    assert!(
        matches!(result, Err(MarketplaceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_missing_booking_as_not_found() {
    let m = seed();
    let uc = GetUseCase { repo: m.store };

    let result = uc
        .execute::<Booking>(Some(&principal_of(&m.customers[0], None)), Uuid::nil())
        .await;

    assert!(
        matches!(result, Err(MarketplaceError::NotFound(_))),
        "expected NotFound, got {result:?}"
    );
}
