use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::ValidateEmail;

use stagehand_core::error::ValidationErrors;
use stagehand_domain::organization::OrganizationStatus;
use stagehand_domain::policy::{Action, Principal, ResourceKind};

use crate::domain::repository::Repository;
use crate::domain::types::Organization;
use crate::error::MarketplaceError;
use crate::usecase::crud::load_authorized;
use crate::usecase::{authorize, parse_enum, present};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub status: Option<String>,
}

/// Copy every supplied field onto `org`, collecting problems in `errors`.
fn apply(org: &mut Organization, params: OrganizationParams, errors: &mut ValidationErrors) {
    if params.name.is_some() {
        org.name = present(params.name).unwrap_or_default();
    }
    errors.check(!org.name.is_empty(), "name", "can't be blank");

    if params.email.is_some() {
        org.email = present(params.email).map(|e| e.to_lowercase());
    }
    errors.check(
        org.email.as_deref().is_none_or(|e| e.validate_email()),
        "email",
        "is invalid",
    );

    let status = parse_enum::<OrganizationStatus>(errors, "status", params.status.as_deref());
    if let Some(status) = status {
        org.status = status;
    }

    for (slot, value) in [
        (&mut org.description, params.description),
        (&mut org.phone, params.phone),
        (&mut org.address, params.address),
        (&mut org.city, params.city),
        (&mut org.state, params.state),
        (&mut org.country, params.country),
        (&mut org.logo_url, params.logo_url),
        (&mut org.website, params.website),
    ] {
        if value.is_some() {
            *slot = present(value);
        }
    }
}

// ── CreateOrganization ───────────────────────────────────────────────────────

pub struct CreateOrganizationUseCase<R: Repository<Organization>> {
    pub repo: R,
}

impl<R: Repository<Organization>> CreateOrganizationUseCase<R> {
    pub async fn execute(
        &self,
        principal: &Principal,
        params: OrganizationParams,
    ) -> Result<Organization, MarketplaceError> {
        authorize(Some(principal), Action::Create, ResourceKind::Organization, None)?;

        let now = Utc::now();
        let mut org = Organization {
            id: Uuid::now_v7(),
            name: String::new(),
            description: None,
            phone: None,
            email: None,
            address: None,
            city: None,
            state: None,
            country: None,
            logo_url: None,
            website: None,
            status: OrganizationStatus::default(),
            created_at: now,
            updated_at: now,
        };
        let mut errors = ValidationErrors::new();
        apply(&mut org, params, &mut errors);
        errors.into_result()?;

        self.repo.insert(&org).await?;
        Ok(org)
    }
}

// ── UpdateOrganization ───────────────────────────────────────────────────────

pub struct UpdateOrganizationUseCase<R: Repository<Organization>> {
    pub repo: R,
}

impl<R: Repository<Organization>> UpdateOrganizationUseCase<R> {
    pub async fn execute(
        &self,
        principal: &Principal,
        id: Uuid,
        params: OrganizationParams,
    ) -> Result<Organization, MarketplaceError> {
        let mut org: Organization =
            load_authorized(&self.repo, Some(principal), Action::Update, id).await?;

        let mut errors = ValidationErrors::new();
        apply(&mut org, params, &mut errors);
        errors.into_result()?;

        org.updated_at = Utc::now();
        self.repo.update(&org).await?;
        Ok(org)
    }
}
