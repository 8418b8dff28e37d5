use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub artist_profile_id: Uuid,
    pub service_category_id: Option<Uuid>,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artist_profiles::Entity",
        from = "Column::ArtistProfileId",
        to = "super::artist_profiles::Column::Id",
        on_delete = "Cascade"
    )]
    ArtistProfile,
    #[sea_orm(
        belongs_to = "super::service_categories::Entity",
        from = "Column::ServiceCategoryId",
        to = "super::service_categories::Column::Id",
        on_delete = "SetNull"
    )]
    ServiceCategory,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
}

impl Related<super::artist_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtistProfile.def()
    }
}

impl Related<super::service_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceCategory.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
