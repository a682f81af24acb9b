use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Availability of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RoomStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Occupied")]
    Occupied,
}

/// A rentable room. Belongs to exactly one house and carries the nominal
/// monthly rent used when drafting a new agreement.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub house_id: i32,
    pub name: String,
    /// Nominal monthly rent. The agreed rent lives on the rent agreement;
    /// this is only the asking price.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub monthly_rent: Decimal,
    pub status: RoomStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::house::Entity",
        from = "Column::HouseId",
        to = "super::house::Column::Id",
        on_delete = "Cascade"
    )]
    House,
    #[sea_orm(has_many = "super::rent::Entity")]
    Rent,
    #[sea_orm(has_many = "super::monthly_service::Entity")]
    MonthlyService,
}

impl Related<super::house::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::House.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
