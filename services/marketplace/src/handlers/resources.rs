#![allow(async_fn_in_trait)]

//! CRUD endpoints for the nine resources plus the scoped extra listings.

use axum::extract::{Path, Query, State};
use chrono::{Duration, Utc};
use serde::Serialize;

use stagehand_core::envelope::ApiResponse;
use stagehand_domain::pagination::{PageMeta, Paged};
use stagehand_domain::policy::{Listing, ResourceKind, Scope, scope};
use stagehand_domain::user::{UserRole, UserStatus};

use crate::domain::record::Record;
use crate::domain::repository::{
    ArtistProfileLookup, DashboardRepository, Repository, ServiceCategoryLookup, UserLookup,
};
use crate::domain::types::{
    ArtistProfile, Availability, AvailabilityFilter, Booking, BookingFilter, Organization,
    OrganizationFilter, Payment, Review, Service, ServiceCategory, ServiceCategoryFilter,
    ServiceFilter, User, UserFilter,
};
use crate::error::MarketplaceError;
use crate::handlers::extract::{Auth, MaybeAuth, ParamKey, Params, resource_id};
use crate::handlers::listing::ListParams;
use crate::handlers::views::{
    ArtistProfileView, ServiceCategoryView, UserListMeta, UserSummary, UserView,
};
use crate::infra::db::DbRepository;
use crate::state::AppState;
use crate::usecase::artist_profile::{
    ArtistProfileParams, CreateArtistProfileUseCase, UpdateArtistProfileUseCase,
};
use crate::usecase::availability::{
    ArtistAvailabilityUseCase, AvailabilityParams, CreateAvailabilityUseCase,
    UpdateAvailabilityUseCase,
};
use crate::usecase::booking::{
    ArtistBookingsUseCase, BookingParams, CreateBookingUseCase, MyBookingsUseCase,
    UpdateBookingUseCase,
};
use crate::usecase::crud::{DeleteUseCase, GetUseCase, ListUseCase};
use crate::usecase::organization::{
    CreateOrganizationUseCase, OrganizationParams, UpdateOrganizationUseCase,
};
use crate::usecase::payment::{CreatePaymentUseCase, PaymentParams, UpdatePaymentUseCase};
use crate::usecase::review::{CreateReviewUseCase, ReviewParams, UpdateReviewUseCase};
use crate::usecase::service::{CreateServiceUseCase, ServiceParams, UpdateServiceUseCase};
use crate::usecase::service_category::{
    CreateServiceCategoryUseCase, ServiceCategoryParams, UpdateServiceCategoryUseCase,
};
use crate::usecase::user::{CreateUserUseCase, UpdateUserUseCase, UserParams};

/// A record as the HTTP layer shows it.
pub trait Resource: Record {
    /// Plural used in list messages.
    const PLURAL: &'static str;

    type View: Serialize + Send;

    /// Resource-specific list filters read from the query string.
    fn filter(_params: &ListParams) -> Result<Self::Filter, MarketplaceError> {
        Ok(Self::Filter::default())
    }

    async fn render(self, repo: &DbRepository) -> Result<Self::View, MarketplaceError>;
}

impl Resource for User {
    const PLURAL: &'static str = "Users";
    type View = UserView;

    fn filter(params: &ListParams) -> Result<UserFilter, MarketplaceError> {
        Ok(UserFilter {
            role: ListParams::filter_value::<UserRole>(&params.role, "role")?,
            status: ListParams::filter_value::<UserStatus>(&params.status, "status")?,
        })
    }

    async fn render(self, repo: &DbRepository) -> Result<UserView, MarketplaceError> {
        let artist_profile = repo.find_by_user_id(self.id).await?;
        Ok(UserView {
            user: self,
            artist_profile,
        })
    }
}

impl Resource for ArtistProfile {
    const PLURAL: &'static str = "Artist profiles";
    type View = ArtistProfileView;

    async fn render(self, repo: &DbRepository) -> Result<ArtistProfileView, MarketplaceError> {
        let owner = Scope::ArtistProfile(self.id);
        let user = Repository::<User>::find_by_id(repo, self.user_id).await?;
        Ok(ArtistProfileView {
            user: user.map(UserSummary::from),
            services: repo.services_of(self.id).await?,
            bookings_count: repo.booking_counts(owner).await?.total,
            reviews_count: repo.count_reviews(owner).await?,
            profile: self,
        })
    }
}

impl Resource for Service {
    const PLURAL: &'static str = "Services";
    type View = Self;

    fn filter(params: &ListParams) -> Result<ServiceFilter, MarketplaceError> {
        Ok(ServiceFilter {
            service_category_id: ListParams::filter_value(
                &params.service_category_id,
                "service_category_id",
            )?,
        })
    }

    async fn render(self, _repo: &DbRepository) -> Result<Self, MarketplaceError> {
        Ok(self)
    }
}

impl Resource for ServiceCategory {
    const PLURAL: &'static str = "ServiceCategories";
    type View = ServiceCategoryView;

    fn filter(params: &ListParams) -> Result<ServiceCategoryFilter, MarketplaceError> {
        Ok(ServiceCategoryFilter {
            is_active: ListParams::filter_value(&params.is_active, "is_active")?,
        })
    }

    async fn render(self, repo: &DbRepository) -> Result<ServiceCategoryView, MarketplaceError> {
        Ok(ServiceCategoryView {
            services_count: repo.count_services_in(self.id).await?,
            category: self,
        })
    }
}

impl Resource for Availability {
    const PLURAL: &'static str = "Availabilities";
    type View = Self;

    fn filter(params: &ListParams) -> Result<AvailabilityFilter, MarketplaceError> {
        Ok(AvailabilityFilter {
            is_booked: ListParams::filter_value(&params.is_booked, "is_booked")?,
            from_date: None,
        })
    }

    async fn render(self, _repo: &DbRepository) -> Result<Self, MarketplaceError> {
        Ok(self)
    }
}

impl Resource for Booking {
    const PLURAL: &'static str = "Bookings";
    type View = Self;

    fn filter(params: &ListParams) -> Result<BookingFilter, MarketplaceError> {
        Ok(BookingFilter {
            status: ListParams::filter_value(&params.status, "status")?,
        })
    }

    async fn render(self, _repo: &DbRepository) -> Result<Self, MarketplaceError> {
        Ok(self)
    }
}

impl Resource for Payment {
    const PLURAL: &'static str = "Payments";
    type View = Self;

    async fn render(self, _repo: &DbRepository) -> Result<Self, MarketplaceError> {
        Ok(self)
    }
}

impl Resource for Review {
    const PLURAL: &'static str = "Reviews";
    type View = Self;

    async fn render(self, _repo: &DbRepository) -> Result<Self, MarketplaceError> {
        Ok(self)
    }
}

impl Resource for Organization {
    const PLURAL: &'static str = "Organizations";
    type View = Self;

    fn filter(params: &ListParams) -> Result<OrganizationFilter, MarketplaceError> {
        Ok(OrganizationFilter {
            status: ListParams::filter_value(&params.status, "status")?,
        })
    }

    async fn render(self, _repo: &DbRepository) -> Result<Self, MarketplaceError> {
        Ok(self)
    }
}

macro_rules! param_keys {
    ($($params:ty => $key:literal),+ $(,)?) => {
        $(impl ParamKey for $params {
            const KEY: &'static str = $key;
        })+
    };
}

param_keys! {
    UserParams => "user",
    ArtistProfileParams => "artist_profile",
    ServiceParams => "service",
    ServiceCategoryParams => "service_category",
    AvailabilityParams => "availability",
    BookingParams => "booking",
    PaymentParams => "payment",
    ReviewParams => "review",
    OrganizationParams => "organization",
}

async fn render_all<T: Resource>(
    repo: &DbRepository,
    items: Vec<T>,
) -> Result<Vec<T::View>, MarketplaceError> {
    let mut views = Vec::with_capacity(items.len());
    for item in items {
        views.push(item.render(repo).await?);
    }
    Ok(views)
}

async fn render_page<T: Resource>(
    repo: &DbRepository,
    message: String,
    paged: Paged<T>,
) -> Result<ApiResponse<Vec<T::View>, PageMeta>, MarketplaceError> {
    let views = render_all(repo, paged.items).await?;
    Ok(ApiResponse::ok(message, views).with_meta(paged.meta))
}

async fn created<T: Resource>(
    repo: &DbRepository,
    record: T,
) -> Result<ApiResponse<T::View>, MarketplaceError> {
    Ok(ApiResponse::created("Success", record.render(repo).await?))
}

async fn updated<T: Resource>(
    repo: &DbRepository,
    record: T,
) -> Result<ApiResponse<T::View>, MarketplaceError> {
    Ok(ApiResponse::ok("Success", record.render(repo).await?))
}

// ── Generic GET / DELETE ─────────────────────────────────────────────────────

pub async fn index<T: Resource>(
    auth: MaybeAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<Vec<T::View>, PageMeta>, MarketplaceError>
where
    DbRepository: Repository<T>,
{
    let query = params.query::<T>(state.default_per_page, T::filter(&params)?)?;
    let repo = state.repo();
    let usecase = ListUseCase { repo: repo.clone() };
    let paged = usecase
        .execute(auth.principal(), Listing::Default, &query)
        .await?;
    render_page(&repo, format!("{} retrieved successfully", T::PLURAL), paged).await
}

pub async fn show<T: Resource>(
    auth: MaybeAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<T::View>, MarketplaceError>
where
    DbRepository: Repository<T>,
{
    let repo = state.repo();
    let usecase = GetUseCase { repo: repo.clone() };
    let record: T = usecase.execute(auth.principal(), resource_id(&id)).await?;
    Ok(ApiResponse::ok("Success", record.render(&repo).await?))
}

pub async fn destroy<T: Resource>(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, MarketplaceError>
where
    DbRepository: Repository<T>,
{
    let usecase = DeleteUseCase { repo: state.repo() };
    usecase.execute::<T>(&principal, resource_id(&id)).await?;
    Ok(ApiResponse::message(format!("{} deleted successfully", T::KIND)))
}

// ── Users ────────────────────────────────────────────────────────────────────

/// Users list; meta also counts active and recently created users the
/// caller can see.
pub async fn index_users(
    auth: MaybeAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<Vec<UserView>, UserListMeta>, MarketplaceError> {
    let query = params.query::<User>(state.default_per_page, User::filter(&params)?)?;
    let repo = state.repo();
    let usecase = ListUseCase { repo: repo.clone() };
    let paged = usecase
        .execute(auth.principal(), Listing::Default, &query)
        .await?;

    let visible = scope(auth.principal(), ResourceKind::User, Listing::Default);
    let week_ago = Utc::now() - Duration::days(7);
    let meta = UserListMeta {
        page: paged.meta,
        active_count: repo.count_active(visible).await?,
        new_this_week_count: repo.count_created_since(visible, week_ago).await?,
    };
    let views = render_all(&repo, paged.items).await?;
    Ok(ApiResponse::ok("Users retrieved successfully", views).with_meta(meta))
}

pub async fn create_user(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Params(params): Params<UserParams>,
) -> Result<ApiResponse<UserView>, MarketplaceError> {
    let repo = state.repo();
    let usecase = CreateUserUseCase { repo: repo.clone() };
    created(&repo, usecase.execute(&principal, params).await?).await
}

pub async fn update_user(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(params): Params<UserParams>,
) -> Result<ApiResponse<UserView>, MarketplaceError> {
    let repo = state.repo();
    let usecase = UpdateUserUseCase { repo: repo.clone() };
    let user = usecase
        .execute(&principal, resource_id(&id), params)
        .await?;
    updated(&repo, user).await
}

// ── Artist profiles ──────────────────────────────────────────────────────────

pub async fn create_artist_profile(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Params(params): Params<ArtistProfileParams>,
) -> Result<ApiResponse<ArtistProfileView>, MarketplaceError> {
    let repo = state.repo();
    let usecase = CreateArtistProfileUseCase { repo: repo.clone() };
    created(&repo, usecase.execute(&principal, params).await?).await
}

pub async fn update_artist_profile(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(params): Params<ArtistProfileParams>,
) -> Result<ApiResponse<ArtistProfileView>, MarketplaceError> {
    let repo = state.repo();
    let usecase = UpdateArtistProfileUseCase { repo: repo.clone() };
    let profile = usecase
        .execute(&principal, resource_id(&id), params)
        .await?;
    updated(&repo, profile).await
}

// ── Services ─────────────────────────────────────────────────────────────────

pub async fn create_service(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Params(params): Params<ServiceParams>,
) -> Result<ApiResponse<Service>, MarketplaceError> {
    let repo = state.repo();
    let usecase = CreateServiceUseCase { repo: repo.clone() };
    created(&repo, usecase.execute(&principal, params).await?).await
}

pub async fn update_service(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(params): Params<ServiceParams>,
) -> Result<ApiResponse<Service>, MarketplaceError> {
    let repo = state.repo();
    let usecase = UpdateServiceUseCase { repo: repo.clone() };
    let service = usecase
        .execute(&principal, resource_id(&id), params)
        .await?;
    updated(&repo, service).await
}

/// Discovery listing: every service, for any signed-in role.
pub async fn browse_services(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<Vec<Service>, PageMeta>, MarketplaceError> {
    let query = params.query::<Service>(state.default_per_page, Service::filter(&params)?)?;
    let repo = state.repo();
    let usecase = ListUseCase { repo: repo.clone() };
    let paged = usecase
        .execute(Some(&principal), Listing::Browse, &query)
        .await?;
    render_page(&repo, "Services retrieved successfully".to_owned(), paged).await
}

// ── Service categories ───────────────────────────────────────────────────────

pub async fn create_service_category(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Params(params): Params<ServiceCategoryParams>,
) -> Result<ApiResponse<ServiceCategoryView>, MarketplaceError> {
    let repo = state.repo();
    let usecase = CreateServiceCategoryUseCase { repo: repo.clone() };
    created(&repo, usecase.execute(&principal, params).await?).await
}

pub async fn update_service_category(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(params): Params<ServiceCategoryParams>,
) -> Result<ApiResponse<ServiceCategoryView>, MarketplaceError> {
    let repo = state.repo();
    let usecase = UpdateServiceCategoryUseCase { repo: repo.clone() };
    let category = usecase
        .execute(&principal, resource_id(&id), params)
        .await?;
    updated(&repo, category).await
}

// ── Availabilities ───────────────────────────────────────────────────────────

pub async fn create_availability(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Params(params): Params<AvailabilityParams>,
) -> Result<ApiResponse<Availability>, MarketplaceError> {
    let repo = state.repo();
    let usecase = CreateAvailabilityUseCase { repo: repo.clone() };
    created(&repo, usecase.execute(&principal, params).await?).await
}

pub async fn update_availability(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(params): Params<AvailabilityParams>,
) -> Result<ApiResponse<Availability>, MarketplaceError> {
    let repo = state.repo();
    let usecase = UpdateAvailabilityUseCase { repo: repo.clone() };
    let slot = usecase
        .execute(&principal, resource_id(&id), params)
        .await?;
    updated(&repo, slot).await
}

/// Open slots of one artist. Needs no credentials.
pub async fn artist_availability(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<Vec<Availability>, PageMeta>, MarketplaceError> {
    let repo = state.repo();
    let usecase = ArtistAvailabilityUseCase { repo: repo.clone() };
    let paged = usecase
        .execute(
            resource_id(&artist_id),
            Utc::now().date_naive(),
            params.page_request(state.default_per_page),
        )
        .await?;
    render_page(
        &repo,
        "Artist availability retrieved successfully".to_owned(),
        paged,
    )
    .await
}

// ── Bookings ─────────────────────────────────────────────────────────────────

pub async fn create_booking(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Params(params): Params<BookingParams>,
) -> Result<ApiResponse<Booking>, MarketplaceError> {
    let repo = state.repo();
    let usecase = CreateBookingUseCase { repo: repo.clone() };
    created(&repo, usecase.execute(&principal, params).await?).await
}

pub async fn update_booking(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(params): Params<BookingParams>,
) -> Result<ApiResponse<Booking>, MarketplaceError> {
    let repo = state.repo();
    let usecase = UpdateBookingUseCase { repo: repo.clone() };
    let booking = usecase
        .execute(&principal, resource_id(&id), params)
        .await?;
    updated(&repo, booking).await
}

pub async fn my_bookings(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<Vec<Booking>, PageMeta>, MarketplaceError> {
    let query = params.query::<Booking>(state.default_per_page, Booking::filter(&params)?)?;
    let repo = state.repo();
    let usecase = MyBookingsUseCase { repo: repo.clone() };
    let paged = usecase.execute(&principal, &query).await?;
    render_page(&repo, "Your bookings retrieved successfully".to_owned(), paged).await
}

pub async fn artist_bookings(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<Vec<Booking>, PageMeta>, MarketplaceError> {
    let query = params.query::<Booking>(state.default_per_page, Booking::filter(&params)?)?;
    let repo = state.repo();
    let usecase = ArtistBookingsUseCase { repo: repo.clone() };
    let paged = usecase.execute(&principal, &query).await?;
    render_page(&repo, "Artist bookings retrieved successfully".to_owned(), paged).await
}

// ── Payments ─────────────────────────────────────────────────────────────────

pub async fn create_payment(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Params(params): Params<PaymentParams>,
) -> Result<ApiResponse<Payment>, MarketplaceError> {
    let repo = state.repo();
    let usecase = CreatePaymentUseCase { repo: repo.clone() };
    created(&repo, usecase.execute(&principal, params).await?).await
}

pub async fn update_payment(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(params): Params<PaymentParams>,
) -> Result<ApiResponse<Payment>, MarketplaceError> {
    let repo = state.repo();
    let usecase = UpdatePaymentUseCase { repo: repo.clone() };
    let payment = usecase
        .execute(&principal, resource_id(&id), params)
        .await?;
    updated(&repo, payment).await
}

// ── Reviews ──────────────────────────────────────────────────────────────────

pub async fn create_review(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Params(params): Params<ReviewParams>,
) -> Result<ApiResponse<Review>, MarketplaceError> {
    let repo = state.repo();
    let usecase = CreateReviewUseCase { repo: repo.clone() };
    created(&repo, usecase.execute(&principal, params).await?).await
}

pub async fn update_review(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(params): Params<ReviewParams>,
) -> Result<ApiResponse<Review>, MarketplaceError> {
    let repo = state.repo();
    let usecase = UpdateReviewUseCase { repo: repo.clone() };
    let review = usecase
        .execute(&principal, resource_id(&id), params)
        .await?;
    updated(&repo, review).await
}

// ── Organizations ────────────────────────────────────────────────────────────

pub async fn create_organization(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Params(params): Params<OrganizationParams>,
) -> Result<ApiResponse<Organization>, MarketplaceError> {
    let repo = state.repo();
    let usecase = CreateOrganizationUseCase { repo: repo.clone() };
    created(&repo, usecase.execute(&principal, params).await?).await
}

pub async fn update_organization(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Params(params): Params<OrganizationParams>,
) -> Result<ApiResponse<Organization>, MarketplaceError> {
    let repo = state.repo();
    let usecase = UpdateOrganizationUseCase { repo: repo.clone() };
    let org = usecase
        .execute(&principal, resource_id(&id), params)
        .await?;
    updated(&repo, org).await
}
