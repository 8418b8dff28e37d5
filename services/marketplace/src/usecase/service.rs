use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use stagehand_core::error::ValidationErrors;
use stagehand_domain::policy::{Action, Ownership, Principal, ResourceKind};

use crate::domain::repository::{ArtistProfileLookup, Repository};
use crate::domain::types::{ArtistProfile, Service, ServiceCategory};
use crate::error::MarketplaceError;
use crate::usecase::artist_profile::ensure_artist_profile;
use crate::usecase::crud::load_authorized;
use crate::usecase::{authorize, nullable, present};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceParams {
    pub artist_profile_id: Option<Uuid>,
    /// `null` detaches the service from its category.
    #[serde(default, deserialize_with = "nullable")]
    pub service_category_id: Option<Option<Uuid>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
}

fn check_numbers(errors: &mut ValidationErrors, params: &ServiceParams) {
    errors.check(
        params.price.is_none_or(|p| p >= Decimal::ZERO),
        "price",
        "must be greater than or equal to 0",
    );
    errors.check(
        params.duration_minutes.is_none_or(|d| d >= 0),
        "duration_minutes",
        "must be greater than or equal to 0",
    );
}

async fn check_category<R: Repository<ServiceCategory>>(
    repo: &R,
    errors: &mut ValidationErrors,
    category_id: Option<Uuid>,
) -> Result<(), MarketplaceError> {
    if let Some(id) = category_id {
        errors.check(
            repo.find_by_id(id).await?.is_some(),
            "service_category",
            "must exist",
        );
    }
    Ok(())
}

// ── CreateService ────────────────────────────────────────────────────────────

pub struct CreateServiceUseCase<R> {
    pub repo: R,
}

impl<R> CreateServiceUseCase<R>
where
    R: Repository<Service>
        + Repository<ArtistProfile>
        + Repository<ServiceCategory>
        + ArtistProfileLookup,
{
    /// Artists that omit `artist_profile_id` get their own profile. It is
    /// provisioned only once the rest of the request is valid.
    pub async fn execute(
        &self,
        principal: &Principal,
        params: ServiceParams,
    ) -> Result<Service, MarketplaceError> {
        authorize(Some(principal), Action::Create, ResourceKind::Service, None)?;

        let mut errors = ValidationErrors::new();
        match params.artist_profile_id {
            Some(id) => {
                let exists = Repository::<ArtistProfile>::find_by_id(&self.repo, id)
                    .await?
                    .is_some();
                errors.check(exists, "artist_profile", "must exist");
                authorize_for_profile(principal, id)?;
            }
            None if principal.is_artist() => {}
            None => {
                errors.add("artist_profile", "must exist");
                return Err(errors.into());
            }
        }

        let name = present(params.name.clone()).unwrap_or_default();
        let service_category_id = params.service_category_id.flatten();
        errors.check(!name.is_empty(), "name", "can't be blank");
        check_numbers(&mut errors, &params);
        check_category(&self.repo, &mut errors, service_category_id).await?;
        errors.into_result()?;

        let artist_profile_id = match params.artist_profile_id {
            Some(id) => id,
            None => {
                let profile = ensure_artist_profile(&self.repo, principal.user_id).await?;
                let mut acting = *principal;
                acting.artist_profile_id = Some(profile.id);
                authorize_for_profile(&acting, profile.id)?;
                profile.id
            }
        };

        let now = Utc::now();
        let service = Service {
            id: Uuid::now_v7(),
            artist_profile_id,
            service_category_id,
            name,
            description: present(params.description),
            price: params.price,
            duration_minutes: params.duration_minutes,
            created_at: now,
            updated_at: now,
        };
        Repository::<Service>::insert(&self.repo, &service).await?;
        Ok(service)
    }
}

fn authorize_for_profile(principal: &Principal, profile_id: Uuid) -> Result<(), MarketplaceError> {
    let ownership = Ownership {
        artist_profile_id: Some(profile_id),
        ..Default::default()
    };
    authorize(
        Some(principal),
        Action::Create,
        ResourceKind::Service,
        Some(&ownership),
    )
}

// ── UpdateService ────────────────────────────────────────────────────────────

pub struct UpdateServiceUseCase<R> {
    pub repo: R,
}

impl<R> UpdateServiceUseCase<R>
where
    R: Repository<Service> + Repository<ArtistProfile> + Repository<ServiceCategory>,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        id: Uuid,
        params: ServiceParams,
    ) -> Result<Service, MarketplaceError> {
        let mut service: Service =
            load_authorized(&self.repo, Some(principal), Action::Update, id).await?;

        let mut errors = ValidationErrors::new();
        let new_profile = params
            .artist_profile_id
            .filter(|pid| principal.is_admin() && *pid != service.artist_profile_id);
        if let Some(profile_id) = new_profile {
            let exists = Repository::<ArtistProfile>::find_by_id(&self.repo, profile_id)
                .await?
                .is_some();
            errors.check(exists, "artist_profile", "must exist");
        }
        if let Some(name) = params.name.as_deref() {
            errors.check(!name.trim().is_empty(), "name", "can't be blank");
        }
        check_numbers(&mut errors, &params);
        if let Some(category_id) = params.service_category_id {
            check_category(&self.repo, &mut errors, category_id).await?;
        }
        errors.into_result()?;

        if let Some(profile_id) = new_profile {
            service.artist_profile_id = profile_id;
        }
        if let Some(category_id) = params.service_category_id {
            service.service_category_id = category_id;
        }
        if let Some(name) = present(params.name) {
            service.name = name;
        }
        if params.description.is_some() {
            service.description = present(params.description);
        }
        if params.price.is_some() {
            service.price = params.price;
        }
        if params.duration_minutes.is_some() {
            service.duration_minutes = params.duration_minutes;
        }
        service.updated_at = Utc::now();
        Repository::<Service>::update(&self.repo, &service).await?;
        Ok(service)
    }
}
