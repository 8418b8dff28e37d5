use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use stagehand_core::error::ValidationErrors;
use stagehand_domain::booking::BookingStatus;
use stagehand_domain::pagination::Paged;
use stagehand_domain::policy::{Action, Principal, ResourceKind, Scope};

use crate::domain::record::{ListQuery, Record};
use crate::domain::repository::Repository;
use crate::domain::types::{ArtistProfile, Booking, Service, User};
use crate::error::MarketplaceError;
use crate::usecase::crud::load_authorized;
use crate::usecase::{authorize, parse_date, parse_enum, parse_time};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingParams {
    pub service_id: Option<Uuid>,
    /// Inferred from the service when omitted.
    pub artist_profile_id: Option<Uuid>,
    /// Admin only; everyone else books for themselves.
    pub customer_id: Option<Uuid>,
    pub booking_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub total_amount: Option<Decimal>,
}

/// Schedule and status fields shared by create and update.
struct Details {
    booking_date: Option<chrono::NaiveDate>,
    start_time: Option<chrono::NaiveTime>,
    end_time: Option<chrono::NaiveTime>,
    status: Option<BookingStatus>,
}

fn parse_details(errors: &mut ValidationErrors, params: &BookingParams) -> Details {
    errors.check(
        params.total_amount.is_none_or(|a| a >= Decimal::ZERO),
        "total_amount",
        "must be greater than or equal to 0",
    );
    Details {
        booking_date: parse_date(errors, "booking_date", params.booking_date.as_deref()),
        start_time: parse_time(errors, "start_time", params.start_time.as_deref()),
        end_time: parse_time(errors, "end_time", params.end_time.as_deref()),
        status: parse_enum(errors, "status", params.status.as_deref()),
    }
}

async fn exists<T, R>(repo: &R, id: Uuid) -> Result<bool, MarketplaceError>
where
    T: Record,
    R: Repository<T>,
{
    Ok(repo.find_by_id(id).await?.is_some())
}

// ── CreateBooking ────────────────────────────────────────────────────────────

pub struct CreateBookingUseCase<R> {
    pub repo: R,
}

impl<R> CreateBookingUseCase<R>
where
    R: Repository<Booking> + Repository<Service> + Repository<ArtistProfile> + Repository<User>,
{
    /// The artist profile defaults to the service's; the customer is the
    /// caller unless an admin names one. The three ids are not
    /// cross-checked against each other.
    pub async fn execute(
        &self,
        principal: &Principal,
        params: BookingParams,
    ) -> Result<Booking, MarketplaceError> {
        authorize(Some(principal), Action::Create, ResourceKind::Booking, None)?;

        let mut errors = ValidationErrors::new();
        let service = match params.service_id {
            Some(id) => Repository::<Service>::find_by_id(&self.repo, id).await?,
            None => None,
        };
        errors.check(service.is_some(), "service", "must exist");

        let artist_profile_id = match params.artist_profile_id {
            Some(id) => {
                errors.check(
                    exists::<ArtistProfile, _>(&self.repo, id).await?,
                    "artist_profile",
                    "must exist",
                );
                Some(id)
            }
            None => service.as_ref().map(|s| s.artist_profile_id),
        };

        let customer_id = match params.customer_id {
            Some(id) if principal.is_admin() && id != principal.user_id => {
                errors.check(
                    exists::<User, _>(&self.repo, id).await?,
                    "customer",
                    "must exist",
                );
                id
            }
            _ => principal.user_id,
        };

        let details = parse_details(&mut errors, &params);
        let (Some(service), Some(artist_profile_id)) = (service, artist_profile_id) else {
            return Err(errors.into());
        };
        errors.into_result()?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::now_v7(),
            service_id: service.id,
            artist_profile_id,
            customer_id,
            booking_date: details.booking_date,
            start_time: details.start_time,
            end_time: details.end_time,
            status: details.status.unwrap_or_default(),
            total_amount: params.total_amount,
            created_at: now,
            updated_at: now,
        };
        authorize(
            Some(principal),
            Action::Create,
            ResourceKind::Booking,
            Some(&booking.ownership()),
        )?;
        Repository::<Booking>::insert(&self.repo, &booking).await?;
        Ok(booking)
    }
}

// ── UpdateBooking ────────────────────────────────────────────────────────────

pub struct UpdateBookingUseCase<R> {
    pub repo: R,
}

impl<R> UpdateBookingUseCase<R>
where
    R: Repository<Booking> + Repository<Service> + Repository<ArtistProfile> + Repository<User>,
{
    /// Any status may follow any other. Only admins may re-point the
    /// service, profile or customer.
    pub async fn execute(
        &self,
        principal: &Principal,
        id: Uuid,
        params: BookingParams,
    ) -> Result<Booking, MarketplaceError> {
        let mut booking: Booking =
            load_authorized(&self.repo, Some(principal), Action::Update, id).await?;

        let mut errors = ValidationErrors::new();
        let admin = principal.is_admin();
        let service_id = params.service_id.filter(|_| admin);
        let artist_profile_id = params.artist_profile_id.filter(|_| admin);
        let customer_id = params.customer_id.filter(|_| admin);
        if let Some(id) = service_id {
            errors.check(exists::<Service, _>(&self.repo, id).await?, "service", "must exist");
        }
        if let Some(id) = artist_profile_id {
            errors.check(
                exists::<ArtistProfile, _>(&self.repo, id).await?,
                "artist_profile",
                "must exist",
            );
        }
        if let Some(id) = customer_id {
            errors.check(exists::<User, _>(&self.repo, id).await?, "customer", "must exist");
        }
        let details = parse_details(&mut errors, &params);
        errors.into_result()?;

        booking.service_id = service_id.unwrap_or(booking.service_id);
        booking.artist_profile_id = artist_profile_id.unwrap_or(booking.artist_profile_id);
        booking.customer_id = customer_id.unwrap_or(booking.customer_id);
        if details.booking_date.is_some() {
            booking.booking_date = details.booking_date;
        }
        if details.start_time.is_some() {
            booking.start_time = details.start_time;
        }
        if details.end_time.is_some() {
            booking.end_time = details.end_time;
        }
        booking.status = details.status.unwrap_or(booking.status);
        if params.total_amount.is_some() {
            booking.total_amount = params.total_amount;
        }
        booking.updated_at = Utc::now();
        Repository::<Booking>::update(&self.repo, &booking).await?;
        Ok(booking)
    }
}

// ── MyBookings / ArtistBookings ──────────────────────────────────────────────

pub struct MyBookingsUseCase<R: Repository<Booking>> {
    pub repo: R,
}

impl<R: Repository<Booking>> MyBookingsUseCase<R> {
    /// Bookings where the caller is the customer, whatever their role.
    pub async fn execute(
        &self,
        principal: &Principal,
        query: &ListQuery<Booking>,
    ) -> Result<Paged<Booking>, MarketplaceError> {
        self.repo
            .list(Scope::Customer(principal.user_id), query)
            .await
    }
}

pub struct ArtistBookingsUseCase<R: Repository<Booking>> {
    pub repo: R,
}

impl<R: Repository<Booking>> ArtistBookingsUseCase<R> {
    /// Bookings received by the caller's own profile.
    pub async fn execute(
        &self,
        principal: &Principal,
        query: &ListQuery<Booking>,
    ) -> Result<Paged<Booking>, MarketplaceError> {
        let profile_id = principal
            .artist_profile_id
            .ok_or(MarketplaceError::NotFound(ResourceKind::ArtistProfile))?;
        self.repo.list(Scope::ArtistProfile(profile_id), query).await
    }
}
