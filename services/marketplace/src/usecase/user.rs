use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::ValidateEmail;

use stagehand_core::error::ValidationErrors;
use stagehand_domain::policy::{Action, Ownership, Principal, ResourceKind};
use stagehand_domain::user::{UserRole, UserStatus};

use crate::domain::repository::{ArtistProfileLookup, Repository, UserLookup};
use crate::domain::types::{ArtistProfile, User};
use crate::error::MarketplaceError;
use crate::usecase::artist_profile::ensure_artist_profile;
use crate::usecase::crud::load_authorized;
use crate::usecase::session::hash_password;
use crate::usecase::{authorize, parse_enum, present};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Nested profile fields accepted alongside a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistProfileAttributes {
    pub city: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserParams {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    /// Admin only; ignored for everyone else.
    pub role: Option<String>,
    /// Admin only; ignored for everyone else.
    pub status: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub loyalty_status: Option<String>,
    pub preferences: Option<String>,
    #[serde(alias = "artist_profile_attributes")]
    pub artist_profile: Option<ArtistProfileAttributes>,
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Record password problems. A blank password counts as absent.
pub fn check_password(
    errors: &mut ValidationErrors,
    password: Option<&str>,
    confirmation: Option<&str>,
    required: bool,
) {
    let Some(password) = password.filter(|p| !p.is_empty()) else {
        if required {
            errors.add("password", "can't be blank");
        }
        return;
    };
    errors.check(
        password.chars().count() >= MIN_PASSWORD_LEN,
        "password",
        "is too short (minimum is 6 characters)",
    );
    if let Some(confirmation) = confirmation {
        errors.check(
            confirmation == password,
            "password_confirmation",
            "doesn't match Password",
        );
    }
}

/// Normalize and validate an email. `current` is the user being edited, so
/// keeping one's own address is not a duplicate.
async fn check_email<R: UserLookup>(
    repo: &R,
    errors: &mut ValidationErrors,
    raw: Option<&str>,
    current: Option<Uuid>,
) -> Result<String, MarketplaceError> {
    let email = raw.map(normalize_email).unwrap_or_default();
    if email.is_empty() {
        errors.add("email", "can't be blank");
    } else if !email.validate_email() {
        errors.add("email", "is invalid");
    } else if let Some(existing) = repo.find_by_email(&email).await? {
        errors.check(Some(existing.id) == current, "email", "has already been taken");
    }
    Ok(email)
}

fn set_profile_attributes(profile: &mut ArtistProfile, attributes: ArtistProfileAttributes) {
    if let Some(city) = attributes.city {
        profile.city = present(Some(city));
    }
    if let Some(bio) = attributes.bio {
        profile.bio = present(Some(bio));
    }
    profile.updated_at = Utc::now();
}

/// Validate and insert a new user. Artists get their profile in the same
/// step. `errors` may already hold messages from the caller.
pub(crate) async fn register_user<R>(
    repo: &R,
    id: Uuid,
    params: UserParams,
    role: UserRole,
    status: UserStatus,
    mut errors: ValidationErrors,
) -> Result<User, MarketplaceError>
where
    R: Repository<User> + Repository<ArtistProfile> + UserLookup + ArtistProfileLookup,
{
    let email = check_email(repo, &mut errors, params.email.as_deref(), None).await?;
    check_password(
        &mut errors,
        params.password.as_deref(),
        params.password_confirmation.as_deref(),
        true,
    );
    errors.into_result()?;

    let now = Utc::now();
    let user = User {
        id,
        email,
        password_digest: hash_password(params.password.as_deref().unwrap_or_default())?,
        role,
        status,
        name: present(params.name),
        phone: present(params.phone),
        address: present(params.address),
        loyalty_status: present(params.loyalty_status),
        preferences: present(params.preferences),
        created_at: now,
        updated_at: now,
    };
    if role != UserRole::Artist {
        Repository::<User>::insert(repo, &user).await?;
        return Ok(user);
    }

    let mut profile = ArtistProfile::blank(user.id, now);
    if let Some(attributes) = params.artist_profile {
        set_profile_attributes(&mut profile, attributes);
    }
    repo.insert_with_profile(&user, &profile).await?;
    tracing::info!(user_id = %user.id, profile_id = %profile.id, "artist profile provisioned");
    Ok(user)
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserUseCase<R> {
    pub repo: R,
}

impl<R> CreateUserUseCase<R>
where
    R: Repository<User> + Repository<ArtistProfile> + UserLookup + ArtistProfileLookup,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        params: UserParams,
    ) -> Result<User, MarketplaceError> {
        authorize(Some(principal), Action::Create, ResourceKind::User, None)?;
        let id = Uuid::now_v7();
        let instance = Ownership {
            id,
            user_id: Some(id),
            ..Default::default()
        };
        authorize(Some(principal), Action::Create, ResourceKind::User, Some(&instance))?;

        let mut errors = ValidationErrors::new();
        let role = parse_enum::<UserRole>(&mut errors, "role", params.role.as_deref());
        let status = parse_enum::<UserStatus>(&mut errors, "status", params.status.as_deref());
        register_user(
            &self.repo,
            id,
            params,
            role.unwrap_or_default(),
            status.unwrap_or_default(),
            errors,
        )
        .await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserUseCase<R> {
    pub repo: R,
}

impl<R> UpdateUserUseCase<R>
where
    R: Repository<User> + Repository<ArtistProfile> + UserLookup + ArtistProfileLookup,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        id: Uuid,
        params: UserParams,
    ) -> Result<User, MarketplaceError> {
        let mut user: User =
            load_authorized(&self.repo, Some(principal), Action::Update, id).await?;
        let mut errors = ValidationErrors::new();

        if let Some(raw) = params.email.as_deref() {
            user.email = check_email(&self.repo, &mut errors, Some(raw), Some(user.id)).await?;
        }
        check_password(
            &mut errors,
            params.password.as_deref(),
            params.password_confirmation.as_deref(),
            false,
        );
        if principal.is_admin() {
            if let Some(role) = parse_enum(&mut errors, "role", params.role.as_deref()) {
                user.role = role;
            }
            if let Some(status) = parse_enum(&mut errors, "status", params.status.as_deref()) {
                user.status = status;
            }
        }
        errors.into_result()?;

        for (slot, value) in [
            (&mut user.name, params.name),
            (&mut user.phone, params.phone),
            (&mut user.address, params.address),
            (&mut user.loyalty_status, params.loyalty_status),
            (&mut user.preferences, params.preferences),
        ] {
            if value.is_some() {
                *slot = present(value);
            }
        }
        if let Some(password) = params.password.as_deref().filter(|p| !p.is_empty()) {
            user.password_digest = hash_password(password)?;
        }
        user.updated_at = Utc::now();
        Repository::<User>::update(&self.repo, &user).await?;

        if user.role == UserRole::Artist {
            let mut profile = ensure_artist_profile(&self.repo, user.id).await?;
            if let Some(attributes) = params.artist_profile {
                set_profile_attributes(&mut profile, attributes);
                Repository::<ArtistProfile>::update(&self.repo, &profile).await?;
            }
        }
        Ok(user)
    }
}
