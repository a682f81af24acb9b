use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Catalog entry for a maintenance job and its current price. Requests
/// snapshot the price at creation time, so editing the catalog never
/// changes an existing request.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "maintenance_issues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::maintenance_request_issue::Entity")]
    MaintenanceRequestIssue,
}

impl Related<super::maintenance_request::Entity> for Entity {
    fn to() -> RelationDef {
        super::maintenance_request_issue::Relation::Request.def()
    }
    fn via() -> Option<RelationDef> {
        Some(
            super::maintenance_request_issue::Relation::Issue
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
