use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use stagehand_core::error::ValidationErrors;
use stagehand_domain::pagination::{PageRequest, Paged};
use stagehand_domain::policy::{Action, Principal, ResourceKind, Scope};

use crate::domain::record::{ListQuery, Record};
use crate::domain::repository::Repository;
use crate::domain::types::{ArtistProfile, Availability, AvailabilityFilter};
use crate::error::MarketplaceError;
use crate::usecase::crud::load_authorized;
use crate::usecase::{authorize, parse_date, parse_time};

/// Dates arrive as `YYYY-MM-DD`, times as `HH:MM[:SS]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityParams {
    pub artist_profile_id: Option<Uuid>,
    pub available_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_booked: Option<bool>,
}

// ── CreateAvailability ───────────────────────────────────────────────────────

pub struct CreateAvailabilityUseCase<R> {
    pub repo: R,
}

impl<R> CreateAvailabilityUseCase<R>
where
    R: Repository<Availability> + Repository<ArtistProfile>,
{
    /// Artists always publish slots on their own profile.
    pub async fn execute(
        &self,
        principal: &Principal,
        params: AvailabilityParams,
    ) -> Result<Availability, MarketplaceError> {
        authorize(Some(principal), Action::Create, ResourceKind::Availability, None)?;

        let mut errors = ValidationErrors::new();
        let profile_id = if principal.is_admin() {
            params.artist_profile_id
        } else {
            principal.artist_profile_id
        };
        match profile_id {
            Some(id) => {
                let exists = Repository::<ArtistProfile>::find_by_id(&self.repo, id)
                    .await?
                    .is_some();
                errors.check(exists, "artist_profile", "must exist");
            }
            None => errors.add("artist_profile", "must exist"),
        }

        let date = parse_date(&mut errors, "available_date", params.available_date.as_deref());
        let start = parse_time(&mut errors, "start_time", params.start_time.as_deref());
        let end = parse_time(&mut errors, "end_time", params.end_time.as_deref());
        for (field, raw) in [
            ("available_date", &params.available_date),
            ("start_time", &params.start_time),
            ("end_time", &params.end_time),
        ] {
            if raw.as_deref().is_none_or(|v| v.trim().is_empty()) {
                errors.add(field, "can't be blank");
            }
        }

        let (Some(artist_profile_id), Some(available_date), Some(start_time), Some(end_time)) =
            (profile_id, date, start, end)
        else {
            return Err(errors.into());
        };
        errors.into_result()?;

        let now = Utc::now();
        let slot = Availability {
            id: Uuid::now_v7(),
            artist_profile_id,
            available_date,
            start_time,
            end_time,
            is_booked: params.is_booked.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };
        authorize(
            Some(principal),
            Action::Create,
            ResourceKind::Availability,
            Some(&slot.ownership()),
        )?;
        Repository::<Availability>::insert(&self.repo, &slot).await?;
        Ok(slot)
    }
}

// ── UpdateAvailability ───────────────────────────────────────────────────────

pub struct UpdateAvailabilityUseCase<R> {
    pub repo: R,
}

impl<R> UpdateAvailabilityUseCase<R>
where
    R: Repository<Availability> + Repository<ArtistProfile>,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        id: Uuid,
        params: AvailabilityParams,
    ) -> Result<Availability, MarketplaceError> {
        let mut slot: Availability =
            load_authorized(&self.repo, Some(principal), Action::Update, id).await?;

        let mut errors = ValidationErrors::new();
        let new_profile = params
            .artist_profile_id
            .filter(|pid| principal.is_admin() && *pid != slot.artist_profile_id);
        if let Some(profile_id) = new_profile {
            let exists = Repository::<ArtistProfile>::find_by_id(&self.repo, profile_id)
                .await?
                .is_some();
            errors.check(exists, "artist_profile", "must exist");
        }
        let date = parse_date(&mut errors, "available_date", params.available_date.as_deref());
        let start = parse_time(&mut errors, "start_time", params.start_time.as_deref());
        let end = parse_time(&mut errors, "end_time", params.end_time.as_deref());
        errors.into_result()?;

        if let Some(profile_id) = new_profile {
            slot.artist_profile_id = profile_id;
        }
        slot.available_date = date.unwrap_or(slot.available_date);
        slot.start_time = start.unwrap_or(slot.start_time);
        slot.end_time = end.unwrap_or(slot.end_time);
        if let Some(is_booked) = params.is_booked {
            slot.is_booked = is_booked;
        }
        slot.updated_at = Utc::now();
        Repository::<Availability>::update(&self.repo, &slot).await?;
        Ok(slot)
    }
}

// ── ArtistAvailability ───────────────────────────────────────────────────────

pub struct ArtistAvailabilityUseCase<R> {
    pub repo: R,
}

impl<R> ArtistAvailabilityUseCase<R>
where
    R: Repository<Availability> + Repository<ArtistProfile>,
{
    /// Open slots of one artist from `today` on, by date then start time.
    /// Readable without credentials.
    pub async fn execute(
        &self,
        artist_profile_id: Uuid,
        today: NaiveDate,
        page: PageRequest,
    ) -> Result<Paged<Availability>, MarketplaceError> {
        Repository::<ArtistProfile>::find_by_id(&self.repo, artist_profile_id)
            .await?
            .ok_or(MarketplaceError::NotFound(ResourceKind::ArtistProfile))?;

        let query = ListQuery::<Availability>::new(page).with_filter(AvailabilityFilter {
            is_booked: Some(false),
            from_date: Some(today),
        });
        let scope = Scope::ArtistProfile(artist_profile_id);
        Repository::<Availability>::list(&self.repo, scope, &query).await
    }
}
