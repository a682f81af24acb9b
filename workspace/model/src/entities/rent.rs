use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A rent agreement: the lease of one room to one tenant for a fixed term.
///
/// Core terms must satisfy `total_rent == monthly_rent * months`; the
/// invariant is checked at creation and on every edit.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tenant_id: i32,
    pub room_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub monthly_rent: Decimal,
    /// Term length in months.
    pub months: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total_rent: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Public URL of the signed contract PDF, if uploaded.
    pub contract_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenant::Entity",
        from = "Column::TenantId",
        to = "super::tenant::Column::Id",
        on_delete = "Restrict"
    )]
    Tenant,
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

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
