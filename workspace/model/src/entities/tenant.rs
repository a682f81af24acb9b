use sea_orm::entity::prelude::*;

/// A person renting a room. Referenced by rent agreements, maintenance
/// requests, and payments; deleting a tenant with any of those on file is
/// rejected at the handler level and restricted at the database level.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub id_card_number: Option<String>,
    /// Public URL of the tenant photo, produced by the external
    /// file-storage collaborator.
    pub photo_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rent::Entity")]
    Rent,
    #[sea_orm(has_many = "super::maintenance_request::Entity")]
    MaintenanceRequest,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::rent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
