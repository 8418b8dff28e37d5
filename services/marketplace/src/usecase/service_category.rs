use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use stagehand_core::error::ValidationErrors;
use stagehand_domain::policy::{Action, Principal, ResourceKind};

use crate::domain::repository::{Repository, ServiceCategoryLookup};
use crate::domain::types::ServiceCategory;
use crate::error::MarketplaceError;
use crate::usecase::crud::load_authorized;
use crate::usecase::{authorize, present};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceCategoryParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Name must be present and not used by another category.
async fn check_name<R: ServiceCategoryLookup>(
    repo: &R,
    errors: &mut ValidationErrors,
    name: &str,
    current: Option<Uuid>,
) -> Result<(), MarketplaceError> {
    if name.is_empty() {
        errors.add("name", "can't be blank");
    } else if let Some(existing) = repo.find_by_name(name).await? {
        errors.check(Some(existing.id) == current, "name", "has already been taken");
    }
    Ok(())
}

// ── CreateServiceCategory ────────────────────────────────────────────────────

pub struct CreateServiceCategoryUseCase<R> {
    pub repo: R,
}

impl<R> CreateServiceCategoryUseCase<R>
where
    R: Repository<ServiceCategory> + ServiceCategoryLookup,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        params: ServiceCategoryParams,
    ) -> Result<ServiceCategory, MarketplaceError> {
        authorize(
            Some(principal),
            Action::Create,
            ResourceKind::ServiceCategory,
            None,
        )?;

        let name = present(params.name).unwrap_or_default();
        let mut errors = ValidationErrors::new();
        check_name(&self.repo, &mut errors, &name, None).await?;
        errors.into_result()?;

        let now = Utc::now();
        let category = ServiceCategory {
            id: Uuid::now_v7(),
            name,
            description: present(params.description),
            icon: present(params.icon),
            sort_order: params.sort_order.unwrap_or(0),
            is_active: params.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(&category).await?;
        Ok(category)
    }
}

// ── UpdateServiceCategory ────────────────────────────────────────────────────

pub struct UpdateServiceCategoryUseCase<R> {
    pub repo: R,
}

impl<R> UpdateServiceCategoryUseCase<R>
where
    R: Repository<ServiceCategory> + ServiceCategoryLookup,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        id: Uuid,
        params: ServiceCategoryParams,
    ) -> Result<ServiceCategory, MarketplaceError> {
        let mut category: ServiceCategory =
            load_authorized(&self.repo, Some(principal), Action::Update, id).await?;

        if params.name.is_some() {
            let name = present(params.name).unwrap_or_default();
            let mut errors = ValidationErrors::new();
            check_name(&self.repo, &mut errors, &name, Some(category.id)).await?;
            errors.into_result()?;
            category.name = name;
        }
        if params.description.is_some() {
            category.description = present(params.description);
        }
        if params.icon.is_some() {
            category.icon = present(params.icon);
        }
        if let Some(sort_order) = params.sort_order {
            category.sort_order = sort_order;
        }
        if let Some(is_active) = params.is_active {
            category.is_active = is_active;
        }
        category.updated_at = Utc::now();
        self.repo.update(&category).await?;
        Ok(category)
    }
}
