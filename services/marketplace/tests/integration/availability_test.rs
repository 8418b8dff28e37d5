use chrono::{Days, NaiveDate, NaiveTime};
use uuid::Uuid;

use stagehand_domain::pagination::PageRequest;
use stagehand_domain::user::UserRole;
use stagehand_marketplace::domain::types::Availability;
use stagehand_marketplace::error::MarketplaceError;
use stagehand_marketplace::usecase::availability::{
    ArtistAvailabilityUseCase, AvailabilityParams, CreateAvailabilityUseCase,
};

use crate::helpers::{MemoryStore, principal_of, test_profile, test_slot, test_user};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn should_publish_slot_on_own_profile() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let other = store.put(test_profile(store.put(test_user(UserRole::Artist)).id));

    let slot = CreateAvailabilityUseCase {
        repo: store.clone(),
    }
    .execute(
        &principal_of(&artist, Some(&profile)),
        AvailabilityParams {
            artist_profile_id: Some(other.id),
            available_date: Some("2026-11-02".into()),
            start_time: Some("09:30".into()),
            end_time: Some("11:00:00".into()),
            ..AvailabilityParams::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(slot.artist_profile_id, profile.id);
    assert_eq!(slot.available_date, day("2026-11-02"));
    assert_eq!(slot.start_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    assert!(!slot.is_booked);
}

#[tokio::test]
async fn should_report_missing_and_invalid_slot_fields() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));

    let result = CreateAvailabilityUseCase {
        repo: store.clone(),
    }
    .execute(
        &principal_of(&artist, Some(&profile)),
        AvailabilityParams {
            available_date: Some("02/11/2026".into()),
            start_time: Some("09:30".into()),
            ..AvailabilityParams::default()
        },
    )
    .await;

    match result {
        Err(MarketplaceError::Validation(errors)) => assert_eq!(
            errors.messages(),
            ["Available date is invalid", "End time can't be blank"]
        ),
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(store.all::<Availability>().is_empty());
}

#[tokio::test]
async fn should_list_open_future_slots_by_date_then_start() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let rival = store.put(test_profile(store.put(test_user(UserRole::Artist)).id));
    let today = day("2026-11-02");
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap();

    store.put(test_slot(profile.id, tomorrow, "09:00"));
    store.put(test_slot(profile.id, today, "15:00"));
    store.put(test_slot(profile.id, today, "10:00"));
    store.put(test_slot(profile.id, yesterday, "10:00"));
    store.put(Availability {
        is_booked: true,
        ..test_slot(profile.id, today, "12:00")
    });
    store.put(test_slot(rival.id, today, "08:00"));

    let page = ArtistAvailabilityUseCase {
        repo: store.clone(),
    }
    .execute(profile.id, today, PageRequest::default())
    .await
    .unwrap();

    let listed: Vec<(NaiveDate, String)> = page
        .items
        .iter()
        .map(|s| (s.available_date, s.start_time.format("%H:%M").to_string()))
        .collect();
    assert_eq!(
        listed,
        [
            (today, "10:00".to_owned()),
            (today, "15:00".to_owned()),
            (tomorrow, "09:00".to_owned()),
        ]
    );
    assert_eq!(page.meta.total_count, 3);
}

#[tokio::test]
async fn should_report_unknown_artist_for_availability() {
    let store = MemoryStore::new();

    let result = ArtistAvailabilityUseCase {
        repo: store.clone(),
    }
    .execute(Uuid::now_v7(), day("2026-11-02"), PageRequest::default())
    .await;

    assert!(matches!(result, Err(MarketplaceError::NotFound(_))));
}
