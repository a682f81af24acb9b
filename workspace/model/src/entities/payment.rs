use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// Which kind of obligation a ledger row settles. Exactly one of the three
/// obligation foreign keys is set, and it must agree with this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentKind {
    #[sea_orm(string_value = "Rent")]
    Rent,
    #[sea_orm(string_value = "Service")]
    Service,
    #[sea_orm(string_value = "Maintenance")]
    Maintenance,
}

impl std::fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentKind::Rent => write!(f, "rent"),
            PaymentKind::Service => write!(f, "service"),
            PaymentKind::Maintenance => write!(f, "maintenance"),
        }
    }
}

/// Ledger entry variant. Payments are money received; adjustments are
/// compensating corrections and may carry a negative amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum EntryKind {
    #[sea_orm(string_value = "Payment")]
    Payment,
    #[sea_orm(string_value = "Adjustment")]
    Adjustment,
}

/// One append-only ledger entry against an obligation.
///
/// Rows are never edited or deleted; corrections are issued as new
/// `Adjustment` entries so the payment history stays auditable.
/// `balance_after` records the remaining balance computed inside the same
/// transaction that inserted the row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tenant_id: i32,
    pub kind: PaymentKind,
    pub rent_id: Option<i32>,
    pub monthly_service_id: Option<i32>,
    pub maintenance_request_id: Option<i32>,
    pub entry: EntryKind,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    /// Remaining balance of the obligation right after this entry.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub balance_after: Decimal,
    pub paid_on: NaiveDate,
    /// Client-supplied key making retried submissions single-shot.
    #[sea_orm(unique)]
    pub idempotency_key: Option<String>,
    pub note: Option<String>,
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
        belongs_to = "super::rent::Entity",
        from = "Column::RentId",
        to = "super::rent::Column::Id",
        on_delete = "Restrict"
    )]
    Rent,
    #[sea_orm(
        belongs_to = "super::monthly_service::Entity",
        from = "Column::MonthlyServiceId",
        to = "super::monthly_service::Column::Id",
        on_delete = "Restrict"
    )]
    MonthlyService,
    #[sea_orm(
        belongs_to = "super::maintenance_request::Entity",
        from = "Column::MaintenanceRequestId",
        to = "super::maintenance_request::Column::Id",
        on_delete = "Restrict"
    )]
    MaintenanceRequest,
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl Related<super::rent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rent.def()
    }
}

impl Related<super::monthly_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyService.def()
    }
}

impl Related<super::maintenance_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaintenanceRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
