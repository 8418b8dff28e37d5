use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use stagehand_core::error::ValidationErrors;
use stagehand_domain::policy::{Action, Principal, ResourceKind};

use crate::domain::record::Record;
use crate::domain::repository::{ArtistProfileLookup, Repository};
use crate::domain::types::{ArtistProfile, User};
use crate::error::MarketplaceError;
use crate::usecase::crud::load_authorized;
use crate::usecase::{authorize, present};

/// Get-or-create the profile of `user_id`. Every provisioning path goes
/// through here, so calling it twice yields the same profile.
pub async fn ensure_artist_profile<R>(
    repo: &R,
    user_id: Uuid,
) -> Result<ArtistProfile, MarketplaceError>
where
    R: Repository<ArtistProfile> + ArtistProfileLookup,
{
    if let Some(profile) = repo.find_by_user_id(user_id).await? {
        return Ok(profile);
    }
    let profile = ArtistProfile::blank(user_id, Utc::now());
    if repo.insert_if_absent(&profile).await? {
        tracing::info!(%user_id, profile_id = %profile.id, "artist profile provisioned");
        return Ok(profile);
    }
    // lost a race with a concurrent provision
    repo.find_by_user_id(user_id)
        .await?
        .ok_or(MarketplaceError::NotFound(ResourceKind::ArtistProfile))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistProfileParams {
    /// Admin only.
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub experience_years: Option<i32>,
    pub base_price: Option<Decimal>,
    /// Admin only.
    pub is_approved: Option<bool>,
}

fn check_numbers(errors: &mut ValidationErrors, params: &ArtistProfileParams) {
    errors.check(
        params.experience_years.is_none_or(|y| y >= 0),
        "experience_years",
        "must be greater than or equal to 0",
    );
    errors.check(
        params.base_price.is_none_or(|p| p >= Decimal::ZERO),
        "base_price",
        "must be greater than or equal to 0",
    );
}

fn apply(profile: &mut ArtistProfile, params: ArtistProfileParams, admin: bool) {
    for (slot, value) in [
        (&mut profile.name, params.name),
        (&mut profile.bio, params.bio),
        (&mut profile.city, params.city),
    ] {
        if value.is_some() {
            *slot = present(value);
        }
    }
    if params.experience_years.is_some() {
        profile.experience_years = params.experience_years;
    }
    if params.base_price.is_some() {
        profile.base_price = params.base_price;
    }
    if let Some(approved) = params.is_approved.filter(|_| admin) {
        if approved != profile.is_approved {
            profile.approved_at = approved.then(Utc::now);
        }
        profile.is_approved = approved;
    }
}

/// Validate a change of owner: the user must exist and not own a profile yet.
async fn check_owner<R>(
    repo: &R,
    errors: &mut ValidationErrors,
    user_id: Uuid,
    current: Option<Uuid>,
) -> Result<(), MarketplaceError>
where
    R: Repository<User> + ArtistProfileLookup,
{
    if Repository::<User>::find_by_id(repo, user_id).await?.is_none() {
        errors.add("user", "must exist");
    } else if let Some(existing) = repo.find_by_user_id(user_id).await? {
        errors.check(Some(existing.id) == current, "user", "has already been taken");
    }
    Ok(())
}

// ── CreateArtistProfile ──────────────────────────────────────────────────────

pub struct CreateArtistProfileUseCase<R> {
    pub repo: R,
}

impl<R> CreateArtistProfileUseCase<R>
where
    R: Repository<ArtistProfile> + Repository<User> + ArtistProfileLookup,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        params: ArtistProfileParams,
    ) -> Result<ArtistProfile, MarketplaceError> {
        authorize(Some(principal), Action::Create, ResourceKind::ArtistProfile, None)?;
        let user_id = match params.user_id {
            Some(id) if principal.is_admin() => id,
            _ => principal.user_id,
        };

        let mut profile = ArtistProfile::blank(user_id, Utc::now());
        authorize(
            Some(principal),
            Action::Create,
            ResourceKind::ArtistProfile,
            Some(&profile.ownership()),
        )?;

        let mut errors = ValidationErrors::new();
        check_owner(&self.repo, &mut errors, user_id, None).await?;
        check_numbers(&mut errors, &params);
        errors.into_result()?;

        apply(&mut profile, params, principal.is_admin());
        Repository::<ArtistProfile>::insert(&self.repo, &profile).await?;
        Ok(profile)
    }
}

// ── UpdateArtistProfile ──────────────────────────────────────────────────────

pub struct UpdateArtistProfileUseCase<R> {
    pub repo: R,
}

impl<R> UpdateArtistProfileUseCase<R>
where
    R: Repository<ArtistProfile> + Repository<User> + ArtistProfileLookup,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        id: Uuid,
        params: ArtistProfileParams,
    ) -> Result<ArtistProfile, MarketplaceError> {
        let mut profile: ArtistProfile =
            load_authorized(&self.repo, Some(principal), Action::Update, id).await?;

        let mut errors = ValidationErrors::new();
        let new_owner = params
            .user_id
            .filter(|uid| principal.is_admin() && *uid != profile.user_id);
        if let Some(user_id) = new_owner {
            check_owner(&self.repo, &mut errors, user_id, Some(profile.id)).await?;
        }
        check_numbers(&mut errors, &params);
        errors.into_result()?;

        if let Some(user_id) = new_owner {
            profile.user_id = user_id;
        }
        apply(&mut profile, params, principal.is_admin());
        profile.updated_at = Utc::now();
        Repository::<ArtistProfile>::update(&self.repo, &profile).await?;
        Ok(profile)
    }
}
