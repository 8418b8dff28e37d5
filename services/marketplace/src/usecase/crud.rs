//! Resource-agnostic list, get and delete.

use uuid::Uuid;

use stagehand_domain::pagination::Paged;
use stagehand_domain::policy::{Action, Listing, Principal, Scope, scope};

use crate::domain::record::{ListQuery, Record};
use crate::domain::repository::Repository;
use crate::error::MarketplaceError;
use crate::usecase::authorize;

/// Load `id` and check `action` on it.
///
/// The class-level check runs first so an anonymous caller gets 401 before
/// learning whether the row exists.
pub async fn load_authorized<T, R>(
    repo: &R,
    principal: Option<&Principal>,
    action: Action,
    id: Uuid,
) -> Result<T, MarketplaceError>
where
    T: Record,
    R: Repository<T>,
{
    authorize(principal, action, T::KIND, None)?;
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or(MarketplaceError::NotFound(T::KIND))?;
    authorize(principal, action, T::KIND, Some(&record.ownership()))?;
    Ok(record)
}

// ── List ─────────────────────────────────────────────────────────────────────

pub struct ListUseCase<R> {
    pub repo: R,
}

impl<R> ListUseCase<R> {
    pub async fn execute<T>(
        &self,
        principal: Option<&Principal>,
        listing: Listing,
        query: &ListQuery<T>,
    ) -> Result<Paged<T>, MarketplaceError>
    where
        T: Record,
        R: Repository<T>,
    {
        authorize(principal, Action::Read, T::KIND, None)?;
        match scope(principal, T::KIND, listing) {
            Scope::Nothing => Ok(Paged::empty(query.page)),
            scope => self.repo.list(scope, query).await,
        }
    }
}

// ── Get ──────────────────────────────────────────────────────────────────────

pub struct GetUseCase<R> {
    pub repo: R,
}

impl<R> GetUseCase<R> {
    pub async fn execute<T>(
        &self,
        principal: Option<&Principal>,
        id: Uuid,
    ) -> Result<T, MarketplaceError>
    where
        T: Record,
        R: Repository<T>,
    {
        load_authorized(&self.repo, principal, Action::Read, id).await
    }
}

// ── Delete ───────────────────────────────────────────────────────────────────

pub struct DeleteUseCase<R> {
    pub repo: R,
}

impl<R> DeleteUseCase<R> {
    pub async fn execute<T>(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> Result<(), MarketplaceError>
    where
        T: Record,
        R: Repository<T>,
    {
        let record: T = load_authorized(&self.repo, Some(principal), Action::Destroy, id).await?;
        if !self.repo.delete(record.id()).await? {
            return Err(MarketplaceError::NotFound(T::KIND));
        }
        Ok(())
    }
}
