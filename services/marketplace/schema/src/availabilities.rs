use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "availabilities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub artist_profile_id: Uuid,
    pub available_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub is_booked: bool,
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
}

impl Related<super::artist_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtistProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
