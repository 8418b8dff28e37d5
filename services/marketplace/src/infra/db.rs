use anyhow::Context as _;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, SqlErr, TransactionError, TransactionTrait,
    sea_query::{Alias, Expr, Func, OnConflict, SimpleExpr},
};
use uuid::Uuid;

use stagehand_domain::booking::BookingStatus;
use stagehand_domain::pagination::{Paged, Sort};
use stagehand_domain::policy::Scope;
use stagehand_domain::user::UserStatus;
use stagehand_marketplace_schema::{
    artist_profiles, availabilities, bookings, organizations, payments, reviews,
    service_categories, services, users,
};

use crate::domain::record::{ListQuery, Record};
use crate::domain::repository::{
    ArtistProfileLookup, DashboardRepository, PaymentLookup, Repository, ReviewLookup,
    ServiceCategoryLookup, UserLookup,
};
use crate::domain::sort::SortField;
use crate::domain::types::{
    ArtistProfile, Availability, Booking, BookingCounts, Organization, Payment, Review, Service,
    ServiceCategory, User,
};
use crate::error::MarketplaceError;

/// Postgres-backed storage for every resource.
#[derive(Clone)]
pub struct DbRepository {
    pub db: DatabaseConnection,
}

impl DbRepository {
    /// Round-trip a trivial query; used by `/readyz`.
    pub async fn ping(&self) -> Result<(), MarketplaceError> {
        self.db.ping().await.context("ping database")?;
        Ok(())
    }
}

// ── Table mapping ────────────────────────────────────────────────────────────

/// Columns a [`Scope`] restricts on. A scope naming a column the table does
/// not have admits nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Owners {
    pub user: Option<&'static str>,
    pub artist_profile: Option<&'static str>,
    pub customer: Option<&'static str>,
}

/// Maps a domain record onto its sea-orm entity.
pub trait Table: Record {
    type Entity: EntityTrait;

    const OWNERS: Owners;

    /// Field reported when a write trips the table's unique index.
    const UNIQUE_FIELD: Option<&'static str> = None;

    fn from_model(model: <Self::Entity as EntityTrait>::Model) -> anyhow::Result<Self>;

    fn to_active(&self) -> <Self::Entity as EntityTrait>::ActiveModel;

    fn filtered(select: Select<Self::Entity>, _filter: &Self::Filter) -> Select<Self::Entity> {
        select
    }
}

/// `table.column`, qualified so joined queries stay unambiguous.
fn col<E: EntityTrait>(name: &str) -> Expr {
    Expr::col((E::default(), Alias::new(name)))
}

fn never() -> SimpleExpr {
    Expr::cust("FALSE")
}

/// `None` when the scope admits every row.
fn scope_condition<E: EntityTrait>(scope: Scope, owners: Owners) -> Option<Condition> {
    let restriction = match scope {
        Scope::All => return None,
        Scope::Nothing => None,
        Scope::User(id) => owners.user.map(|c| (c, id)),
        Scope::ArtistProfile(id) => owners.artist_profile.map(|c| (c, id)),
        Scope::Customer(id) => owners.customer.map(|c| (c, id)),
    };
    Some(match restriction {
        Some((column, id)) => Condition::all().add(col::<E>(column).eq(id)),
        None => Condition::all().add(never()),
    })
}

trait Scoped: QueryFilter + Sized {
    /// Restrict to the rows `scope` admits, with owner columns read from `E`.
    fn scoped<E: EntityTrait>(self, scope: Scope, owners: Owners) -> Self {
        match scope_condition::<E>(scope, owners) {
            Some(condition) => self.filter(condition),
            None => self,
        }
    }
}

impl<Q: QueryFilter> Scoped for Q {}

fn order(sort: Sort) -> Order {
    match sort {
        Sort::Asc => Order::Asc,
        Sort::Desc => Order::Desc,
    }
}

/// Apply the query's ordering, then `created_at` and `id` so that equal
/// sort keys still page deterministically.
fn ordered<T: Table>(mut select: Select<T::Entity>, query: &ListQuery<T>) -> Select<T::Entity> {
    let ordering = query.ordering();
    for sort in &ordering {
        let column = SimpleExpr::from(col::<T::Entity>(sort.field.column()));
        select = select.order_by(column, order(sort.order));
    }
    if !ordering.iter().any(|s| s.field.column() == "created_at") {
        select = select.order_by(SimpleExpr::from(col::<T::Entity>("created_at")), Order::Asc);
    }
    select.order_by(SimpleExpr::from(col::<T::Entity>("id")), Order::Asc)
}

/// A unique-index violation on a table with a unique field is the same 422
/// the up-front duplicate check gives.
fn unique_conflict<T: Table>(sql_err: Option<SqlErr>) -> Option<MarketplaceError> {
    match (sql_err, T::UNIQUE_FIELD) {
        (Some(SqlErr::UniqueConstraintViolation(_)), Some(field)) => {
            Some(MarketplaceError::taken(field))
        }
        _ => None,
    }
}

fn write_failed<T: Table>(err: DbErr, action: &str) -> MarketplaceError {
    unique_conflict::<T>(err.sql_err()).unwrap_or_else(|| {
        anyhow::Error::new(err)
            .context(format!("{action} {}", T::KIND))
            .into()
    })
}

fn by_id<E: EntityTrait>(id: Uuid) -> SimpleExpr {
    col::<E>("id").eq(id)
}

// ── Generic repository ───────────────────────────────────────────────────────

impl<T> Repository<T> for DbRepository
where
    T: Table,
    <T::Entity as EntityTrait>::Model:
        IntoActiveModel<<T::Entity as EntityTrait>::ActiveModel> + Sync,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, MarketplaceError> {
        let model = T::Entity::find()
            .filter(by_id::<T::Entity>(id))
            .one(&self.db)
            .await
            .with_context(|| format!("find {} by id", T::KIND))?;
        Ok(model.map(T::from_model).transpose()?)
    }

    async fn list(&self, scope: Scope, query: &ListQuery<T>) -> Result<Paged<T>, MarketplaceError> {
        if scope == Scope::Nothing {
            return Ok(Paged::empty(query.page));
        }
        let select = T::filtered(
            T::Entity::find().scoped::<T::Entity>(scope, T::OWNERS),
            &query.filter,
        );
        let total = select
            .clone()
            .count(&self.db)
            .await
            .with_context(|| format!("count {}", T::KIND))?;

        let page = query.page.clamped();
        let models = ordered(select, query)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .with_context(|| format!("list {}", T::KIND))?;
        let items = models
            .into_iter()
            .map(T::from_model)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Paged::new(items, page, total))
    }

    async fn insert(&self, record: &T) -> Result<(), MarketplaceError> {
        T::Entity::insert(record.to_active())
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| write_failed::<T>(e, "insert"))?;
        Ok(())
    }

    async fn update(&self, record: &T) -> Result<(), MarketplaceError> {
        T::Entity::update_many()
            .set(record.to_active())
            .filter(by_id::<T::Entity>(record.id()))
            .exec(&self.db)
            .await
            .map_err(|e| write_failed::<T>(e, "update"))?;
        Ok(())
    }

    /// Dependents go with the row through `ON DELETE CASCADE`.
    async fn delete(&self, id: Uuid) -> Result<bool, MarketplaceError> {
        let result = T::Entity::delete_many()
            .filter(by_id::<T::Entity>(id))
            .exec(&self.db)
            .await
            .with_context(|| format!("delete {}", T::KIND))?;
        Ok(result.rows_affected > 0)
    }
}

// ── User ─────────────────────────────────────────────────────────────────────

impl Table for User {
    type Entity = users::Entity;

    const OWNERS: Owners = Owners {
        user: Some("id"),
        artist_profile: None,
        customer: None,
    };

    const UNIQUE_FIELD: Option<&'static str> = Some("email");

    fn from_model(model: users::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: model.id,
            role: model.role.parse()?,
            status: model.status.parse()?,
            email: model.email,
            password_digest: model.password_digest,
            name: model.name,
            phone: model.phone,
            address: model.address,
            loyalty_status: model.loyalty_status,
            preferences: model.preferences,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn to_active(&self) -> users::ActiveModel {
        users::ActiveModel {
            id: Set(self.id),
            email: Set(self.email.clone()),
            password_digest: Set(self.password_digest.clone()),
            role: Set(self.role.as_str().to_owned()),
            status: Set(self.status.as_str().to_owned()),
            name: Set(self.name.clone()),
            phone: Set(self.phone.clone()),
            address: Set(self.address.clone()),
            loyalty_status: Set(self.loyalty_status.clone()),
            preferences: Set(self.preferences.clone()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }

    fn filtered(mut select: Select<users::Entity>, filter: &Self::Filter) -> Select<users::Entity> {
        if let Some(role) = filter.role {
            select = select.filter(users::Column::Role.eq(role.as_str()));
        }
        if let Some(status) = filter.status {
            select = select.filter(users::Column::Status.eq(status.as_str()));
        }
        select
    }
}

impl UserLookup for DbRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, MarketplaceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(User::from_model).transpose()?)
    }

    async fn insert_with_profile(
        &self,
        user: &User,
        profile: &ArtistProfile,
    ) -> Result<(), MarketplaceError> {
        let (user, profile) = (user.to_active(), profile.to_active());
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    users::Entity::insert(user).exec_without_returning(txn).await?;
                    artist_profiles::Entity::insert(profile)
                        .exec_without_returning(txn)
                        .await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(e) | TransactionError::Transaction(e) => {
                    write_failed::<User>(e, "insert artist")
                }
            })
    }

    async fn count_active(&self, scope: Scope) -> Result<u64, MarketplaceError> {
        let count = users::Entity::find()
            .scoped::<users::Entity>(scope, User::OWNERS)
            .filter(users::Column::Status.eq(UserStatus::Active.as_str()))
            .count(&self.db)
            .await
            .context("count active users")?;
        Ok(count)
    }

    async fn count_created_since(
        &self,
        scope: Scope,
        since: DateTime<Utc>,
    ) -> Result<u64, MarketplaceError> {
        let count = users::Entity::find()
            .scoped::<users::Entity>(scope, User::OWNERS)
            .filter(users::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .context("count recent users")?;
        Ok(count)
    }
}

// ── ArtistProfile ────────────────────────────────────────────────────────────

impl Table for ArtistProfile {
    type Entity = artist_profiles::Entity;

    const OWNERS: Owners = Owners {
        user: Some("user_id"),
        artist_profile: Some("id"),
        customer: None,
    };

    const UNIQUE_FIELD: Option<&'static str> = Some("user");

    fn from_model(model: artist_profiles::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            bio: model.bio,
            city: model.city,
            experience_years: model.experience_years,
            base_price: model.base_price,
            is_approved: model.is_approved,
            approved_at: model.approved_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn to_active(&self) -> artist_profiles::ActiveModel {
        artist_profiles::ActiveModel {
            id: Set(self.id),
            user_id: Set(self.user_id),
            name: Set(self.name.clone()),
            bio: Set(self.bio.clone()),
            city: Set(self.city.clone()),
            experience_years: Set(self.experience_years),
            base_price: Set(self.base_price),
            is_approved: Set(self.is_approved),
            approved_at: Set(self.approved_at),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

impl ArtistProfileLookup for DbRepository {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ArtistProfile>, MarketplaceError> {
        let model = artist_profiles::Entity::find()
            .filter(artist_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find artist profile by user")?;
        Ok(model.map(ArtistProfile::from_model).transpose()?)
    }

    async fn insert_if_absent(&self, profile: &ArtistProfile) -> Result<bool, MarketplaceError> {
        let rows = artist_profiles::Entity::insert(profile.to_active())
            .on_conflict(
                OnConflict::column(artist_profiles::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert artist profile if absent")?;
        Ok(rows > 0)
    }

    async fn services_of(&self, profile_id: Uuid) -> Result<Vec<Service>, MarketplaceError> {
        let models = services::Entity::find()
            .filter(services::Column::ArtistProfileId.eq(profile_id))
            .order_by_asc(services::Column::Name)
            .order_by_asc(services::Column::Id)
            .all(&self.db)
            .await
            .context("list services of artist profile")?;
        Ok(models
            .into_iter()
            .map(Service::from_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }
}

// ── Service ──────────────────────────────────────────────────────────────────

impl Table for Service {
    type Entity = services::Entity;

    const OWNERS: Owners = Owners {
        user: None,
        artist_profile: Some("artist_profile_id"),
        customer: None,
    };

    fn from_model(model: services::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: model.id,
            artist_profile_id: model.artist_profile_id,
            service_category_id: model.service_category_id,
            name: model.name,
            description: model.description,
            price: model.price,
            duration_minutes: model.duration_minutes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn to_active(&self) -> services::ActiveModel {
        services::ActiveModel {
            id: Set(self.id),
            artist_profile_id: Set(self.artist_profile_id),
            service_category_id: Set(self.service_category_id),
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            price: Set(self.price),
            duration_minutes: Set(self.duration_minutes),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }

    fn filtered(
        select: Select<services::Entity>,
        filter: &Self::Filter,
    ) -> Select<services::Entity> {
        match filter.service_category_id {
            Some(category_id) => select.filter(services::Column::ServiceCategoryId.eq(category_id)),
            None => select,
        }
    }
}

// ── ServiceCategory ──────────────────────────────────────────────────────────

impl Table for ServiceCategory {
    type Entity = service_categories::Entity;

    const OWNERS: Owners = Owners {
        user: None,
        artist_profile: None,
        customer: None,
    };

    const UNIQUE_FIELD: Option<&'static str> = Some("name");

    fn from_model(model: service_categories::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: model.id,
            name: model.name,
            description: model.description,
            icon: model.icon,
            sort_order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn to_active(&self) -> service_categories::ActiveModel {
        service_categories::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            icon: Set(self.icon.clone()),
            sort_order: Set(self.sort_order),
            is_active: Set(self.is_active),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }

    fn filtered(
        select: Select<service_categories::Entity>,
        filter: &Self::Filter,
    ) -> Select<service_categories::Entity> {
        match filter.is_active {
            Some(active) => select.filter(service_categories::Column::IsActive.eq(active)),
            None => select,
        }
    }
}

impl ServiceCategoryLookup for DbRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<ServiceCategory>, MarketplaceError> {
        let model = service_categories::Entity::find()
            .filter(service_categories::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find service category by name")?;
        Ok(model.map(ServiceCategory::from_model).transpose()?)
    }

    async fn count_services_in(&self, category_id: Uuid) -> Result<u64, MarketplaceError> {
        let count = services::Entity::find()
            .filter(services::Column::ServiceCategoryId.eq(category_id))
            .count(&self.db)
            .await
            .context("count services in category")?;
        Ok(count)
    }
}

// ── Availability ─────────────────────────────────────────────────────────────

impl Table for Availability {
    type Entity = availabilities::Entity;

    const OWNERS: Owners = Owners {
        user: None,
        artist_profile: Some("artist_profile_id"),
        customer: None,
    };

    fn from_model(model: availabilities::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: model.id,
            artist_profile_id: model.artist_profile_id,
            available_date: model.available_date,
            start_time: model.start_time,
            end_time: model.end_time,
            is_booked: model.is_booked,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn to_active(&self) -> availabilities::ActiveModel {
        availabilities::ActiveModel {
            id: Set(self.id),
            artist_profile_id: Set(self.artist_profile_id),
            available_date: Set(self.available_date),
            start_time: Set(self.start_time),
            end_time: Set(self.end_time),
            is_booked: Set(self.is_booked),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }

    fn filtered(
        mut select: Select<availabilities::Entity>,
        filter: &Self::Filter,
    ) -> Select<availabilities::Entity> {
        if let Some(booked) = filter.is_booked {
            select = select.filter(availabilities::Column::IsBooked.eq(booked));
        }
        if let Some(from) = filter.from_date {
            select = select.filter(availabilities::Column::AvailableDate.gte(from));
        }
        select
    }
}

// ── Booking ──────────────────────────────────────────────────────────────────

impl Table for Booking {
    type Entity = bookings::Entity;

    const OWNERS: Owners = Owners {
        user: None,
        artist_profile: Some("artist_profile_id"),
        customer: Some("customer_id"),
    };

    fn from_model(model: bookings::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: model.id,
            service_id: model.service_id,
            artist_profile_id: model.artist_profile_id,
            customer_id: model.customer_id,
            booking_date: model.booking_date,
            start_time: model.start_time,
            end_time: model.end_time,
            status: model.status.parse()?,
            total_amount: model.total_amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn to_active(&self) -> bookings::ActiveModel {
        bookings::ActiveModel {
            id: Set(self.id),
            service_id: Set(self.service_id),
            artist_profile_id: Set(self.artist_profile_id),
            customer_id: Set(self.customer_id),
            booking_date: Set(self.booking_date),
            start_time: Set(self.start_time),
            end_time: Set(self.end_time),
            status: Set(self.status.as_str().to_owned()),
            total_amount: Set(self.total_amount),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }

    fn filtered(
        select: Select<bookings::Entity>,
        filter: &Self::Filter,
    ) -> Select<bookings::Entity> {
        match filter.status {
            Some(status) => select.filter(bookings::Column::Status.eq(status.as_str())),
            None => select,
        }
    }
}

// ── Payment ──────────────────────────────────────────────────────────────────

impl Table for Payment {
    type Entity = payments::Entity;

    const OWNERS: Owners = Owners {
        user: None,
        artist_profile: None,
        customer: None,
    };

    const UNIQUE_FIELD: Option<&'static str> = Some("booking");

    fn from_model(model: payments::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: model.id,
            booking_id: model.booking_id,
            amount: model.amount,
            currency: model.currency,
            payment_status: model.payment_status,
            processor_reference: model.processor_reference,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn to_active(&self) -> payments::ActiveModel {
        payments::ActiveModel {
            id: Set(self.id),
            booking_id: Set(self.booking_id),
            amount: Set(self.amount),
            currency: Set(self.currency.clone()),
            payment_status: Set(self.payment_status.clone()),
            processor_reference: Set(self.processor_reference.clone()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

impl PaymentLookup for DbRepository {
    async fn find_payment_for_booking(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<Payment>, MarketplaceError> {
        let model = payments::Entity::find()
            .filter(payments::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .context("find payment for booking")?;
        Ok(model.map(Payment::from_model).transpose()?)
    }
}

// ── Review ───────────────────────────────────────────────────────────────────

impl Table for Review {
    type Entity = reviews::Entity;

    const OWNERS: Owners = Owners {
        user: None,
        artist_profile: Some("artist_profile_id"),
        customer: Some("customer_id"),
    };

    const UNIQUE_FIELD: Option<&'static str> = Some("booking");

    fn from_model(model: reviews::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: model.id,
            booking_id: model.booking_id,
            artist_profile_id: model.artist_profile_id,
            customer_id: model.customer_id,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn to_active(&self) -> reviews::ActiveModel {
        reviews::ActiveModel {
            id: Set(self.id),
            booking_id: Set(self.booking_id),
            artist_profile_id: Set(self.artist_profile_id),
            customer_id: Set(self.customer_id),
            rating: Set(self.rating),
            comment: Set(self.comment.clone()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

impl ReviewLookup for DbRepository {
    async fn find_review_for_booking(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<Review>, MarketplaceError> {
        let model = reviews::Entity::find()
            .filter(reviews::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .context("find review for booking")?;
        Ok(model.map(Review::from_model).transpose()?)
    }
}

// ── Organization ─────────────────────────────────────────────────────────────

impl Table for Organization {
    type Entity = organizations::Entity;

    const OWNERS: Owners = Owners {
        user: None,
        artist_profile: None,
        customer: None,
    };

    fn from_model(model: organizations::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: model.id,
            status: model.status.parse()?,
            name: model.name,
            description: model.description,
            phone: model.phone,
            email: model.email,
            address: model.address,
            city: model.city,
            state: model.state,
            country: model.country,
            logo_url: model.logo_url,
            website: model.website,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn to_active(&self) -> organizations::ActiveModel {
        organizations::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            phone: Set(self.phone.clone()),
            email: Set(self.email.clone()),
            address: Set(self.address.clone()),
            city: Set(self.city.clone()),
            state: Set(self.state.clone()),
            country: Set(self.country.clone()),
            logo_url: Set(self.logo_url.clone()),
            website: Set(self.website.clone()),
            status: Set(self.status.as_str().to_owned()),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }

    fn filtered(
        select: Select<organizations::Entity>,
        filter: &Self::Filter,
    ) -> Select<organizations::Entity> {
        match filter.status {
            Some(status) => select.filter(organizations::Column::Status.eq(status.as_str())),
            None => select,
        }
    }
}

// ── Dashboards ───────────────────────────────────────────────────────────────

impl DashboardRepository for DbRepository {
    async fn count_users(&self, status: Option<UserStatus>) -> Result<u64, MarketplaceError> {
        let mut select = users::Entity::find();
        if let Some(status) = status {
            select = select.filter(users::Column::Status.eq(status.as_str()));
        }
        Ok(select.count(&self.db).await.context("count users")?)
    }

    async fn count_artist_profiles(
        &self,
        approved: Option<bool>,
    ) -> Result<u64, MarketplaceError> {
        let mut select = artist_profiles::Entity::find();
        if let Some(approved) = approved {
            select = select.filter(artist_profiles::Column::IsApproved.eq(approved));
        }
        Ok(select.count(&self.db).await.context("count artist profiles")?)
    }

    async fn booking_counts(&self, scope: Scope) -> Result<BookingCounts, MarketplaceError> {
        #[derive(Debug, FromQueryResult)]
        struct StatusCount {
            status: String,
            count: i64,
        }

        let rows = bookings::Entity::find()
            .select_only()
            .column(bookings::Column::Status)
            .column_as(bookings::Column::Id.count(), "count")
            .scoped::<bookings::Entity>(scope, Booking::OWNERS)
            .group_by(bookings::Column::Status)
            .into_model::<StatusCount>()
            .all(&self.db)
            .await
            .context("count bookings by status")?;

        let mut counts = BookingCounts::default();
        for row in rows {
            let status: BookingStatus = row.status.parse().context("booking status")?;
            counts.add(status, u64::try_from(row.count).unwrap_or_default());
        }
        Ok(counts)
    }

    async fn count_upcoming_bookings(
        &self,
        scope: Scope,
        today: NaiveDate,
    ) -> Result<u64, MarketplaceError> {
        let open = BookingStatus::ALL
            .into_iter()
            .filter(|s| s.is_open())
            .map(BookingStatus::as_str);
        let count = bookings::Entity::find()
            .scoped::<bookings::Entity>(scope, Booking::OWNERS)
            .filter(bookings::Column::Status.is_in(open))
            .filter(bookings::Column::BookingDate.gte(today))
            .count(&self.db)
            .await
            .context("count upcoming bookings")?;
        Ok(count)
    }

    async fn count_services(&self, scope: Scope) -> Result<u64, MarketplaceError> {
        let count = services::Entity::find()
            .scoped::<services::Entity>(scope, Service::OWNERS)
            .count(&self.db)
            .await
            .context("count services")?;
        Ok(count)
    }

    async fn count_reviews(&self, scope: Scope) -> Result<u64, MarketplaceError> {
        let count = reviews::Entity::find()
            .scoped::<reviews::Entity>(scope, Review::OWNERS)
            .count(&self.db)
            .await
            .context("count reviews")?;
        Ok(count)
    }

    async fn average_rating(&self, scope: Scope) -> Result<Option<f64>, MarketplaceError> {
        let average = reviews::Entity::find()
            .select_only()
            .column_as(
                Expr::expr(Func::avg(Expr::col(reviews::Column::Rating)))
                    .cast_as(Alias::new("float8")),
                "average",
            )
            .scoped::<reviews::Entity>(scope, Review::OWNERS)
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .context("average review rating")?;
        Ok(average.flatten())
    }

    /// Payments carry no owner columns of their own; they are scoped through
    /// the booking they settle.
    async fn payment_total(&self, scope: Scope) -> Result<Decimal, MarketplaceError> {
        let total = payments::Entity::find()
            .select_only()
            .column_as(
                Expr::expr(Func::sum(col::<payments::Entity>("amount"))),
                "total",
            )
            .join(JoinType::InnerJoin, payments::Relation::Booking.def())
            .scoped::<bookings::Entity>(scope, Booking::OWNERS)
            .into_tuple::<Option<Decimal>>()
            .one(&self.db)
            .await
            .context("sum payments")?;
        Ok(total.flatten().unwrap_or_default())
    }

    async fn count_organizations(&self) -> Result<u64, MarketplaceError> {
        Ok(organizations::Entity::find()
            .count(&self.db)
            .await
            .context("count organizations")?)
    }
}
