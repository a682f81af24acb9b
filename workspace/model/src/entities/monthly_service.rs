use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A monthly utility bill for one room. Created once per room per billing
/// month, independent of whether a payment exists yet.
///
/// `total_amount` must equal the sum of the four components; missing
/// components are stored as zero.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "monthly_services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub room_id: i32,
    /// First day of the billing month.
    pub month: NaiveDate,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub water_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub electricity_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub trash_fee: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub maintenance_fee: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total_amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_delete = "Restrict"
    )]
    Room,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
