//! Query-string parameters shared by list endpoints.

use std::str::FromStr;

use serde::Deserialize;

use stagehand_domain::pagination::{PageRequest, Sort, SortBy};

use crate::domain::record::{ListQuery, Record};
use crate::domain::sort::SortField;
use crate::error::MarketplaceError;

/// Raw list parameters. Every value arrives as text and is parsed here so a
/// bad value yields an enveloped 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub service_category_id: Option<String>,
    pub is_active: Option<String>,
    pub is_booked: Option<String>,
}

impl ListParams {
    /// Non-numeric or out-of-range values fall back to the defaults.
    pub fn page_request(&self, default_per_page: u32) -> PageRequest {
        let number =
            |raw: &Option<String>| raw.as_deref().and_then(|s| s.trim().parse::<u32>().ok());
        PageRequest {
            per_page: number(&self.per_page).unwrap_or(default_per_page),
            page: number(&self.page).unwrap_or(1),
        }
        .clamped()
    }

    /// `sort_order` alone is ignored; with `sort_by` it defaults to `asc`.
    pub fn sort<F: SortField>(&self) -> Result<Option<SortBy<F>>, MarketplaceError> {
        let name = self.sort_by.as_deref().map(str::trim);
        let Some(name) = name.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let field = F::parse(name)
            .ok_or_else(|| MarketplaceError::BadInput(format!("Invalid sort_by: {name}")))?;
        let order = match self.sort_order.as_deref() {
            None => Sort::Asc,
            Some(raw) => raw
                .parse::<Sort>()
                .map_err(|_| MarketplaceError::BadInput(format!("Invalid sort_order: {raw}")))?,
        };
        Ok(Some(SortBy { field, order }))
    }

    /// Parse an optional filter value; an unknown value is a 400.
    pub fn filter_value<V: FromStr>(
        raw: &Option<String>,
        name: &str,
    ) -> Result<Option<V>, MarketplaceError> {
        match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| MarketplaceError::BadInput(format!("Invalid {name}: {value}"))),
        }
    }

    pub fn query<T: Record>(
        &self,
        default_per_page: u32,
        filter: T::Filter,
    ) -> Result<ListQuery<T>, MarketplaceError> {
        Ok(ListQuery {
            page: self.page_request(default_per_page),
            sort: self.sort::<T::SortField>()?,
            filter,
        })
    }
}
