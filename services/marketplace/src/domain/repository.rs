#![allow(async_fn_in_trait)]

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use stagehand_domain::pagination::Paged;
use stagehand_domain::policy::Scope;
use stagehand_domain::user::UserStatus;

use crate::domain::record::{ListQuery, Record};
use crate::domain::types::{
    ArtistProfile, BookingCounts, Payment, Review, Service, ServiceCategory, User,
};
use crate::error::MarketplaceError;

/// Row storage for one resource type.
///
/// When a type implements this for several records, call through the trait
/// path (`Repository::<Service>::find_by_id(&repo, id)`).
pub trait Repository<T: Record>: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, MarketplaceError>;

    /// Rows admitted by `scope`, filtered, ordered and windowed per `query`.
    async fn list(&self, scope: Scope, query: &ListQuery<T>)
    -> Result<Paged<T>, MarketplaceError>;

    async fn insert(&self, record: &T) -> Result<(), MarketplaceError>;

    async fn update(&self, record: &T) -> Result<(), MarketplaceError>;

    /// Delete a row and its dependents. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, MarketplaceError>;
}

pub trait UserLookup: Send + Sync {
    /// `email` is expected already normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, MarketplaceError>;

    /// Insert a new artist and their profile atomically.
    async fn insert_with_profile(
        &self,
        user: &User,
        profile: &ArtistProfile,
    ) -> Result<(), MarketplaceError>;

    async fn count_active(&self, scope: Scope) -> Result<u64, MarketplaceError>;

    async fn count_created_since(
        &self,
        scope: Scope,
        since: DateTime<Utc>,
    ) -> Result<u64, MarketplaceError>;
}

pub trait ArtistProfileLookup: Send + Sync {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ArtistProfile>, MarketplaceError>;

    /// Insert unless the user already has a profile. Returns `false` when an
    /// existing profile won.
    async fn insert_if_absent(&self, profile: &ArtistProfile) -> Result<bool, MarketplaceError>;

    /// Every service offered under `profile_id`, by name.
    async fn services_of(&self, profile_id: Uuid) -> Result<Vec<Service>, MarketplaceError>;
}

pub trait ServiceCategoryLookup: Send + Sync {
    async fn find_by_name(&self, name: &str)
    -> Result<Option<ServiceCategory>, MarketplaceError>;

    async fn count_services_in(&self, category_id: Uuid) -> Result<u64, MarketplaceError>;
}

pub trait PaymentLookup: Send + Sync {
    async fn find_payment_for_booking(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<Payment>, MarketplaceError>;
}

pub trait ReviewLookup: Send + Sync {
    async fn find_review_for_booking(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<Review>, MarketplaceError>;
}

/// Aggregates behind the dashboards. A `scope` restricts the counted rows the
/// same way it restricts a list; payments are scoped through their booking.
pub trait DashboardRepository: Send + Sync {
    async fn count_users(&self, status: Option<UserStatus>) -> Result<u64, MarketplaceError>;

    async fn count_artist_profiles(&self, approved: Option<bool>)
    -> Result<u64, MarketplaceError>;

    async fn booking_counts(&self, scope: Scope) -> Result<BookingCounts, MarketplaceError>;

    /// Pending or confirmed bookings dated `today` or later.
    async fn count_upcoming_bookings(
        &self,
        scope: Scope,
        today: NaiveDate,
    ) -> Result<u64, MarketplaceError>;

    async fn count_services(&self, scope: Scope) -> Result<u64, MarketplaceError>;

    async fn count_reviews(&self, scope: Scope) -> Result<u64, MarketplaceError>;

    /// `None` when no review is in scope.
    async fn average_rating(&self, scope: Scope) -> Result<Option<f64>, MarketplaceError>;

    async fn payment_total(&self, scope: Scope) -> Result<Decimal, MarketplaceError>;

    async fn count_organizations(&self) -> Result<u64, MarketplaceError>;
}
