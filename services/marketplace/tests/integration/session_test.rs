use std::sync::Arc;

use stagehand_domain::user::UserRole;
use stagehand_marketplace::domain::repository::Repository;
use stagehand_marketplace::domain::types::{ArtistProfile, User};
use stagehand_marketplace::error::MarketplaceError;
use stagehand_marketplace::usecase::artist_profile::ensure_artist_profile;
use stagehand_marketplace::usecase::session::{
    AuthenticateUseCase, ChangePasswordInput, ChangePasswordUseCase, LoginUseCase,
    SignupUseCase,
};
use stagehand_marketplace::usecase::user::{UpdateUserUseCase, UserParams};
use stagehand_testing::auth::{MockAuth, TEST_JWT_SECRET};

use crate::helpers::{MemoryStore, principal_of, test_user, test_user_with_password};

fn signup(store: &MemoryStore) -> SignupUseCase<MemoryStore> {
    SignupUseCase {
        repo: store.clone(),
        jwt_secret: Arc::from(TEST_JWT_SECRET),
        token_ttl_secs: 3600,
    }
}

fn login(store: &MemoryStore) -> LoginUseCase<MemoryStore> {
    LoginUseCase {
        repo: store.clone(),
        jwt_secret: Arc::from(TEST_JWT_SECRET),
        token_ttl_secs: 3600,
    }
}

fn authenticate(store: &MemoryStore) -> AuthenticateUseCase<MemoryStore> {
    AuthenticateUseCase {
        repo: store.clone(),
        jwt_secret: Arc::from(TEST_JWT_SECRET),
    }
}

fn params(email: &str, role: &str) -> UserParams {
    UserParams {
        email: Some(email.to_owned()),
        password: Some("secret123".to_owned()),
        password_confirmation: Some("secret123".to_owned()),
        role: Some(role.to_owned()),
        ..UserParams::default()
    }
}

// ── Signup ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_downgrade_self_registered_admin_to_customer() {
    let store = MemoryStore::new();

    let output = signup(&store)
        .execute(params("Mallory@Example.com", "admin"))
        .await
        .unwrap();

    assert_eq!(output.user.role, UserRole::Customer);
    assert_eq!(output.user.email, "mallory@example.com");

    let principal = authenticate(&store)
        .execute(&output.token.token)
        .await
        .unwrap();
    assert_eq!(principal.user_id, output.user.id);
    assert_eq!(principal.role, UserRole::Customer);
}

#[tokio::test]
async fn should_provision_profile_for_artist_signup() {
    let store = MemoryStore::new();

    let output = signup(&store)
        .execute(params("painter@example.com", "artist"))
        .await
        .unwrap();

    let profiles = store.all::<ArtistProfile>();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].user_id, output.user.id);
    assert!(!profiles[0].is_approved);

    let again = ensure_artist_profile(&store, output.user.id).await.unwrap();
    assert_eq!(again.id, profiles[0].id);
    assert_eq!(store.all::<ArtistProfile>().len(), 1);

    let principal = authenticate(&store)
        .execute(&output.token.token)
        .await
        .unwrap();
    assert_eq!(principal.artist_profile_id, Some(profiles[0].id));
}

#[tokio::test]
async fn should_reject_duplicate_email_case_insensitively() {
    let store = MemoryStore::new();
    signup(&store)
        .execute(params("ada@example.com", "customer"))
        .await
        .unwrap();

    let result = signup(&store)
        .execute(params("ADA@example.com", "customer"))
        .await;

    match result {
        Err(MarketplaceError::Validation(errors)) => {
            assert_eq!(errors.messages(), ["Email has already been taken"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(store.all::<User>().len(), 1);
}

#[tokio::test]
async fn should_report_every_signup_problem_at_once() {
    let store = MemoryStore::new();

    let result = signup(&store)
        .execute(UserParams {
            email: Some("not-an-email".into()),
            password: Some("abc".into()),
            password_confirmation: Some("abd".into()),
            ..UserParams::default()
        })
        .await;

    match result {
        Err(MarketplaceError::Validation(errors)) => assert_eq!(
            errors.messages(),
            [
                "Email is invalid",
                "Password is too short (minimum is 6 characters)",
                "Password confirmation doesn't match Password",
            ]
        ),
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_any_email_casing() {
    let store = MemoryStore::new();
    let user = store.put(test_user_with_password(
        "ada@example.com",
        "secret123",
        UserRole::Customer,
    ));

    let output = login(&store)
        .execute("  ADA@example.com ", "secret123")
        .await
        .unwrap();

    assert_eq!(output.user.id, user.id);
    assert!(!output.token.token.is_empty());
}

#[tokio::test]
async fn should_not_distinguish_unknown_email_from_wrong_password() {
    let store = MemoryStore::new();
    store.put(test_user_with_password(
        "ada@example.com",
        "secret123",
        UserRole::Customer,
    ));

    let wrong_password = login(&store).execute("ada@example.com", "nope").await;
    let unknown = login(&store).execute("bob@example.com", "secret123").await;

    assert!(matches!(wrong_password, Err(MarketplaceError::InvalidCredentials)));
    assert!(matches!(unknown, Err(MarketplaceError::InvalidCredentials)));
}

// ── Authenticate ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_token_of_deleted_user() {
    let store = MemoryStore::new();
    let user = store.put(test_user_with_password(
        "gone@example.com",
        "secret123",
        UserRole::Customer,
    ));
    Repository::<User>::delete(&store, user.id).await.unwrap();

    let result = authenticate(&store)
        .execute(&MockAuth::new(user.id).token())
        .await;

    assert!(matches!(result, Err(MarketplaceError::Unauthenticated)));
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let store = MemoryStore::new();
    let user = store.put(test_user_with_password(
        "ada@example.com",
        "secret123",
        UserRole::Customer,
    ));

    let token = MockAuth::new(user.id).with_secret("other-secret").token();
    let result = authenticate(&store).execute(&token).await;

    assert!(matches!(result, Err(MarketplaceError::Unauthenticated)));
}

// ── ChangePassword ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_current_password_to_change_it() {
    let store = MemoryStore::new();
    let user = store.put(test_user_with_password(
        "ada@example.com",
        "secret123",
        UserRole::Customer,
    ));
    let uc = ChangePasswordUseCase {
        repo: store.clone(),
    };

    let result = uc
        .execute(
            &principal_of(&user, None),
            ChangePasswordInput {
                current_password: "wrong".into(),
                new_password: Some("newsecret".into()),
                new_password_confirmation: Some("newsecret".into()),
            },
        )
        .await;

    assert!(matches!(result, Err(MarketplaceError::IncorrectPassword)));
    assert!(login(&store).execute("ada@example.com", "secret123").await.is_ok());
}

#[tokio::test]
async fn should_login_with_changed_password() {
    let store = MemoryStore::new();
    let user = store.put(test_user_with_password(
        "ada@example.com",
        "secret123",
        UserRole::Customer,
    ));
    let uc = ChangePasswordUseCase {
        repo: store.clone(),
    };

    uc.execute(
        &principal_of(&user, None),
        ChangePasswordInput {
            current_password: "secret123".into(),
            new_password: Some("newsecret".into()),
            new_password_confirmation: Some("newsecret".into()),
        },
    )
    .await
    .unwrap();

    assert!(login(&store).execute("ada@example.com", "secret123").await.is_err());
    assert!(login(&store).execute("ada@example.com", "newsecret").await.is_ok());
}

// ── Role changes ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_provision_profile_when_admin_promotes_to_artist() {
    let store = MemoryStore::new();
    let customer = store.put(test_user(UserRole::Customer));
    let admin = store.put(test_user(UserRole::Admin));
    let uc = UpdateUserUseCase {
        repo: store.clone(),
    };

    let updated = uc
        .execute(
            &principal_of(&admin, None),
            customer.id,
            UserParams {
                role: Some("artist".into()),
                ..UserParams::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.role, UserRole::Artist);
    let profiles = store.all::<ArtistProfile>();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].user_id, customer.id);
}

#[tokio::test]
async fn should_ignore_role_change_requested_by_self() {
    let store = MemoryStore::new();
    let customer = store.put(test_user(UserRole::Customer));
    let uc = UpdateUserUseCase {
        repo: store.clone(),
    };

    let updated = uc
        .execute(
            &principal_of(&customer, None),
            customer.id,
            UserParams {
                role: Some("admin".into()),
                name: Some("Ada".into()),
                ..UserParams::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.role, UserRole::Customer);
    assert_eq!(updated.name.as_deref(), Some("Ada"));
    assert!(store.all::<ArtistProfile>().is_empty());
}
