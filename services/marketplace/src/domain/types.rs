use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use stagehand_domain::booking::BookingStatus;
use stagehand_domain::organization::OrganizationStatus;
use stagehand_domain::policy::{Ownership, ResourceKind};
use stagehand_domain::user::{UserRole, UserStatus};

use crate::domain::record::Record;
use crate::domain::sort::{
    ArtistProfileSort, AvailabilitySort, BookingSort, OrganizationSort, PaymentSort, ReviewSort,
    ServiceCategorySort, ServiceSort, UserSort,
};

// ── User ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip)]
    pub password_digest: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub loyalty_status: Option<String>,
    pub preferences: Option<String>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

impl Record for User {
    const KIND: ResourceKind = ResourceKind::User;
    type SortField = UserSort;
    type Filter = UserFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn ownership(&self) -> Ownership {
        Ownership {
            id: self.id,
            user_id: Some(self.id),
            ..Default::default()
        }
    }
}

// ── ArtistProfile ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ArtistProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub experience_years: Option<i32>,
    pub base_price: Option<Decimal>,
    pub is_approved: bool,
    #[serde(serialize_with = "stagehand_core::serde::opt_to_rfc3339_ms")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl ArtistProfile {
    /// An empty, unapproved profile for `user_id`.
    pub fn blank(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            name: None,
            bio: None,
            city: None,
            experience_years: None,
            base_price: None,
            is_approved: false,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for ArtistProfile {
    const KIND: ResourceKind = ResourceKind::ArtistProfile;
    type SortField = ArtistProfileSort;
    type Filter = ();

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn ownership(&self) -> Ownership {
        Ownership {
            id: self.id,
            user_id: Some(self.user_id),
            artist_profile_id: Some(self.id),
            ..Default::default()
        }
    }
}

// ── Service ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: Uuid,
    pub artist_profile_id: Uuid,
    pub service_category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub service_category_id: Option<Uuid>,
}

impl Record for Service {
    const KIND: ResourceKind = ResourceKind::Service;
    type SortField = ServiceSort;
    type Filter = ServiceFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn ownership(&self) -> Ownership {
        Ownership {
            id: self.id,
            artist_profile_id: Some(self.artist_profile_id),
            ..Default::default()
        }
    }
}

// ── ServiceCategory ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceCategoryFilter {
    pub is_active: Option<bool>,
}

impl Record for ServiceCategory {
    const KIND: ResourceKind = ResourceKind::ServiceCategory;
    type SortField = ServiceCategorySort;
    type Filter = ServiceCategoryFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn ownership(&self) -> Ownership {
        Ownership {
            id: self.id,
            ..Default::default()
        }
    }
}

// ── Availability ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Availability {
    pub id: Uuid,
    pub artist_profile_id: Uuid,
    pub available_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_booked: bool,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityFilter {
    pub is_booked: Option<bool>,
    /// Only slots on or after this date.
    pub from_date: Option<NaiveDate>,
}

impl Record for Availability {
    const KIND: ResourceKind = ResourceKind::Availability;
    type SortField = AvailabilitySort;
    type Filter = AvailabilityFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn ownership(&self) -> Ownership {
        Ownership {
            id: self.id,
            artist_profile_id: Some(self.artist_profile_id),
            ..Default::default()
        }
    }
}

// ── Booking ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub service_id: Uuid,
    pub artist_profile_id: Uuid,
    pub customer_id: Uuid,
    pub booking_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: BookingStatus,
    pub total_amount: Option<Decimal>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
}

impl Record for Booking {
    const KIND: ResourceKind = ResourceKind::Booking;
    type SortField = BookingSort;
    type Filter = BookingFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn ownership(&self) -> Ownership {
        Ownership {
            id: self.id,
            artist_profile_id: Some(self.artist_profile_id),
            customer_id: Some(self.customer_id),
            ..Default::default()
        }
    }
}

// ── Payment ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub payment_status: Option<String>,
    pub processor_reference: Option<String>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl Record for Payment {
    const KIND: ResourceKind = ResourceKind::Payment;
    type SortField = PaymentSort;
    type Filter = ();

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn ownership(&self) -> Ownership {
        Ownership {
            id: self.id,
            ..Default::default()
        }
    }
}

// ── Review ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub artist_profile_id: Uuid,
    pub customer_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl Record for Review {
    const KIND: ResourceKind = ResourceKind::Review;
    type SortField = ReviewSort;
    type Filter = ();

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn ownership(&self) -> Ownership {
        Ownership {
            id: self.id,
            artist_profile_id: Some(self.artist_profile_id),
            customer_id: Some(self.customer_id),
            ..Default::default()
        }
    }
}

// ── Organization ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub status: OrganizationStatus,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "stagehand_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationFilter {
    pub status: Option<OrganizationStatus>,
}

impl Record for Organization {
    const KIND: ResourceKind = ResourceKind::Organization;
    type SortField = OrganizationSort;
    type Filter = OrganizationFilter;

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn ownership(&self) -> Ownership {
        Ownership {
            id: self.id,
            ..Default::default()
        }
    }
}

// ── Dashboards ───────────────────────────────────────────────────────────────

/// Booking totals by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BookingCounts {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
}

impl BookingCounts {
    pub fn add(&mut self, status: BookingStatus, count: u64) {
        self.total += count;
        match status {
            BookingStatus::Pending => self.pending += count,
            BookingStatus::Confirmed => self.confirmed += count,
            BookingStatus::Completed => self.completed += count,
            BookingStatus::Cancelled => self.cancelled += count,
        }
    }
}
