//! Read-only statistics, recomputed on every request.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use stagehand_domain::policy::{Principal, Scope};
use stagehand_domain::user::{UserRole, UserStatus};

use crate::domain::repository::DashboardRepository;
use crate::domain::types::BookingCounts;
use crate::error::MarketplaceError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_artists: u64,
    pub approved_artists: u64,
    pub total_bookings: u64,
    pub pending_bookings: u64,
    pub confirmed_bookings: u64,
    pub completed_bookings: u64,
    pub cancelled_bookings: u64,
    pub total_services: u64,
    pub total_reviews: u64,
    pub total_revenue: Decimal,
    pub total_organizations: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtistStats {
    pub total_bookings: u64,
    pub pending_bookings: u64,
    pub confirmed_bookings: u64,
    pub completed_bookings: u64,
    pub cancelled_bookings: u64,
    pub total_services: u64,
    pub total_reviews: u64,
    /// Rounded to one decimal; 0 without reviews.
    pub average_rating: f64,
    pub total_revenue: Decimal,
    pub upcoming_bookings: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerStats {
    pub total_bookings: u64,
    pub pending_bookings: u64,
    pub confirmed_bookings: u64,
    pub completed_bookings: u64,
    pub cancelled_bookings: u64,
    pub total_spent: Decimal,
    pub total_reviews: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    Admin(AdminStats),
    Artist(ArtistStats),
    Customer(CustomerStats),
}

fn round_rating(average: Option<f64>) -> f64 {
    average.map_or(0.0, |avg| (avg * 10.0).round() / 10.0)
}

pub struct DashboardUseCase<R: DashboardRepository> {
    pub repo: R,
}

impl<R: DashboardRepository> DashboardUseCase<R> {
    /// Stats for whatever role the caller has.
    pub async fn execute(
        &self,
        principal: &Principal,
        today: NaiveDate,
    ) -> Result<DashboardStats, MarketplaceError> {
        Ok(match principal.role {
            UserRole::Admin => DashboardStats::Admin(self.admin_stats().await?),
            UserRole::Artist => DashboardStats::Artist(
                self.artist_stats(principal.artist_profile_id, today).await?,
            ),
            UserRole::Customer => {
                DashboardStats::Customer(self.customer_stats(principal.user_id).await?)
            }
        })
    }

    pub async fn admin(&self, principal: &Principal) -> Result<AdminStats, MarketplaceError> {
        if !principal.is_admin() {
            return Err(MarketplaceError::Forbidden);
        }
        self.admin_stats().await
    }

    pub async fn artist(
        &self,
        principal: &Principal,
        today: NaiveDate,
    ) -> Result<ArtistStats, MarketplaceError> {
        if !principal.is_artist() {
            return Err(MarketplaceError::Forbidden);
        }
        self.artist_stats(principal.artist_profile_id, today).await
    }

    async fn admin_stats(&self) -> Result<AdminStats, MarketplaceError> {
        let bookings = self.repo.booking_counts(Scope::All).await?;
        Ok(AdminStats {
            total_users: self.repo.count_users(None).await?,
            active_users: self.repo.count_users(Some(UserStatus::Active)).await?,
            total_artists: self.repo.count_artist_profiles(None).await?,
            approved_artists: self.repo.count_artist_profiles(Some(true)).await?,
            total_bookings: bookings.total,
            pending_bookings: bookings.pending,
            confirmed_bookings: bookings.confirmed,
            completed_bookings: bookings.completed,
            cancelled_bookings: bookings.cancelled,
            total_services: self.repo.count_services(Scope::All).await?,
            total_reviews: self.repo.count_reviews(Scope::All).await?,
            total_revenue: self.repo.payment_total(Scope::All).await?,
            total_organizations: self.repo.count_organizations().await?,
        })
    }

    /// An artist without a profile owns nothing yet and sees zeros.
    async fn artist_stats(
        &self,
        profile_id: Option<Uuid>,
        today: NaiveDate,
    ) -> Result<ArtistStats, MarketplaceError> {
        let Some(profile_id) = profile_id else {
            return Ok(ArtistStats::default());
        };
        let scope = Scope::ArtistProfile(profile_id);
        let BookingCounts {
            total,
            pending,
            confirmed,
            completed,
            cancelled,
        } = self.repo.booking_counts(scope).await?;
        Ok(ArtistStats {
            total_bookings: total,
            pending_bookings: pending,
            confirmed_bookings: confirmed,
            completed_bookings: completed,
            cancelled_bookings: cancelled,
            total_services: self.repo.count_services(scope).await?,
            total_reviews: self.repo.count_reviews(scope).await?,
            average_rating: round_rating(self.repo.average_rating(scope).await?),
            total_revenue: self.repo.payment_total(scope).await?,
            upcoming_bookings: self.repo.count_upcoming_bookings(scope, today).await?,
        })
    }

    async fn customer_stats(&self, user_id: Uuid) -> Result<CustomerStats, MarketplaceError> {
        let scope = Scope::Customer(user_id);
        let bookings = self.repo.booking_counts(scope).await?;
        Ok(CustomerStats {
            total_bookings: bookings.total,
            pending_bookings: bookings.pending,
            confirmed_bookings: bookings.confirmed,
            completed_bookings: bookings.completed,
            cancelled_bookings: bookings.cancelled,
            total_spent: self.repo.payment_total(scope).await?,
            total_reviews: self.repo.count_reviews(scope).await?,
        })
    }
}
