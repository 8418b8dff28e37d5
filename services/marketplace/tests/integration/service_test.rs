use stagehand_domain::user::UserRole;
use stagehand_marketplace::domain::types::{ArtistProfile, Service};
use stagehand_marketplace::error::MarketplaceError;
use stagehand_marketplace::usecase::service::{CreateServiceUseCase, ServiceParams};

use crate::helpers::{MemoryStore, principal_of, test_profile, test_user};

fn named(name: &str) -> ServiceParams {
    ServiceParams {
        name: Some(name.to_owned()),
        ..ServiceParams::default()
    }
}

#[tokio::test]
async fn should_bind_service_to_callers_own_profile() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let profile = store.put(test_profile(artist.id));
    let uc = CreateServiceUseCase {
        repo: store.clone(),
    };

    let service = uc
        .execute(&principal_of(&artist, Some(&profile)), named("Portrait"))
        .await
        .unwrap();

    assert_eq!(service.artist_profile_id, profile.id);
    assert_eq!(store.all::<ArtistProfile>().len(), 1);
}

#[tokio::test]
async fn should_provision_one_profile_for_profileless_artist() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let principal = principal_of(&artist, None);
    let uc = CreateServiceUseCase {
        repo: store.clone(),
    };

    let first = uc.execute(&principal, named("Portrait")).await.unwrap();
    let second = uc.execute(&principal, named("Mural")).await.unwrap();

    let profiles = store.all::<ArtistProfile>();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].user_id, artist.id);
    assert_eq!(first.artist_profile_id, profiles[0].id);
    assert_eq!(second.artist_profile_id, profiles[0].id);
}

#[tokio::test]
async fn should_not_provision_when_service_is_rejected() {
    let store = MemoryStore::new();
    let artist = store.put(test_user(UserRole::Artist));
    let uc = CreateServiceUseCase {
        repo: store.clone(),
    };

    let result = uc
        .execute(&principal_of(&artist, None), named("   "))
        .await;

    match result {
        Err(MarketplaceError::Validation(errors)) => {
            assert_eq!(errors.messages(), ["Name can't be blank"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(store.all::<ArtistProfile>().is_empty());
    assert!(store.all::<Service>().is_empty());
}

#[tokio::test]
async fn should_forbid_listing_under_another_artists_profile() {
    let store = MemoryStore::new();
    let owner = store.put(test_user(UserRole::Artist));
    let owner_profile = store.put(test_profile(owner.id));
    let intruder = store.put(test_user(UserRole::Artist));
    let intruder_profile = store.put(test_profile(intruder.id));

    let result = CreateServiceUseCase {
        repo: store.clone(),
    }
    .execute(
        &principal_of(&intruder, Some(&intruder_profile)),
        ServiceParams {
            artist_profile_id: Some(owner_profile.id),
            ..named("")
        },
    )
    .await;

    assert!(matches!(result, Err(MarketplaceError::Forbidden)));
    assert!(store.all::<Service>().is_empty());
}

#[tokio::test]
async fn should_require_profile_from_admin() {
    let store = MemoryStore::new();
    let admin = store.put(test_user(UserRole::Admin));

    let result = CreateServiceUseCase {
        repo: store.clone(),
    }
    .execute(&principal_of(&admin, None), named("Portrait"))
    .await;

    match result {
        Err(MarketplaceError::Validation(errors)) => {
            assert_eq!(errors.messages(), ["Artist profile must exist"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}
