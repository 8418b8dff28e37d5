//! The common shape every persisted resource exposes to the generic
//! list/get/delete machinery.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use stagehand_domain::pagination::{PageRequest, SortBy};
use stagehand_domain::policy::{Ownership, ResourceKind};

use crate::domain::sort::SortField;

pub trait Record: Clone + Send + Sync + Serialize + 'static {
    const KIND: ResourceKind;
    type SortField: SortField;
    type Filter: Default + Clone + Send + Sync + 'static;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;

    /// Ownership facts consumed by the authorization matrix.
    fn ownership(&self) -> Ownership;
}

/// Filter, sort and window for one list call.
#[derive(Clone)]
pub struct ListQuery<T: Record> {
    pub page: PageRequest,
    pub sort: Option<SortBy<T::SortField>>,
    pub filter: T::Filter,
}

impl<T: Record> Default for ListQuery<T> {
    fn default() -> Self {
        Self {
            page: PageRequest::default(),
            sort: None,
            filter: T::Filter::default(),
        }
    }
}

impl<T: Record> ListQuery<T> {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: T::Filter) -> Self {
        self.filter = filter;
        self
    }

    /// A caller-chosen column replaces the resource's default order.
    /// Storage appends `created_at, id` as tie-breakers.
    pub fn ordering(&self) -> Vec<SortBy<T::SortField>> {
        match self.sort {
            Some(sort) => vec![sort],
            None => T::SortField::DEFAULT_ORDER.to_vec(),
        }
    }
}
