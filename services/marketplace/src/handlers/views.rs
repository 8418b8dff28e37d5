//! Response shapes that add related rows or counts to a record.

use serde::Serialize;
use uuid::Uuid;

use stagehand_domain::pagination::PageMeta;
use stagehand_domain::user::UserRole;

use crate::domain::types::{ArtistProfile, Service, ServiceCategory, User};

#[derive(Debug, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub artist_profile: Option<ArtistProfile>,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistProfileView {
    #[serde(flatten)]
    pub profile: ArtistProfile,
    pub user: Option<UserSummary>,
    pub services: Vec<Service>,
    pub bookings_count: u64,
    pub reviews_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ServiceCategoryView {
    #[serde(flatten)]
    pub category: ServiceCategory,
    pub services_count: u64,
}

/// Users list meta: page meta plus head counts over the caller's scope.
#[derive(Debug, Serialize)]
pub struct UserListMeta {
    #[serde(flatten)]
    pub page: PageMeta,
    pub active_count: u64,
    pub new_this_week_count: u64,
}
