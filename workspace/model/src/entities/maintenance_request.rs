use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Workflow state of a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RequestStatus {
    #[sea_orm(string_value = "Open")]
    Open,
    #[sea_orm(string_value = "InProgress")]
    InProgress,
    #[sea_orm(string_value = "Done")]
    Done,
}

/// A maintenance request filed for a room. `total_price` is the sum of the
/// issue prices snapshotted on the join rows at request time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "maintenance_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tenant_id: i32,
    pub room_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total_price: Decimal,
    pub status: RequestStatus,
    pub requested_on: NaiveDate,
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
    #[sea_orm(has_many = "super::maintenance_request_issue::Entity")]
    MaintenanceRequestIssue,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::maintenance_issue::Entity> for Entity {
    fn to() -> RelationDef {
        super::maintenance_request_issue::Relation::Issue.def()
    }
    fn via() -> Option<RelationDef> {
        Some(
            super::maintenance_request_issue::Relation::Request
                .def()
                .rev(),
        )
    }
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
