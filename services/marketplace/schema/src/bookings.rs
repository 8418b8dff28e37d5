use sea_orm::entity::prelude::*;

/// A customer's appointment for one service. `artist_profile_id` is
/// denormalized from the service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: Uuid,
    pub artist_profile_id: Uuid,
    pub customer_id: Uuid,
    pub booking_date: Option<Date>,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub total_amount: Option<Decimal>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id",
        on_delete = "Cascade"
    )]
    Service,
    #[sea_orm(
        belongs_to = "super::artist_profiles::Entity",
        from = "Column::ArtistProfileId",
        to = "super::artist_profiles::Column::Id",
        on_delete = "Cascade"
    )]
    ArtistProfile,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(has_one = "super::payments::Entity")]
    Payment,
    #[sea_orm(has_one = "super::reviews::Entity")]
    Review,
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::artist_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtistProfile.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
