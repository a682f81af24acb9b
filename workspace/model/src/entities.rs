//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the property management application here:
//! reference data (houses, rooms, tenants), the three obligation kinds
//! (rents, monthly services, maintenance requests), and the append-only
//! payment ledger.

pub mod house;
pub mod maintenance_issue;
pub mod maintenance_request;
pub mod maintenance_request_issue;
pub mod monthly_service;
pub mod payment;
pub mod rent;
pub mod room;
pub mod tenant;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::house::Entity as House;
    pub use super::maintenance_issue::Entity as MaintenanceIssue;
    pub use super::maintenance_request::Entity as MaintenanceRequest;
    pub use super::maintenance_request_issue::Entity as MaintenanceRequestIssue;
    pub use super::monthly_service::Entity as MonthlyService;
    pub use super::payment::Entity as Payment;
    pub use super::rent::Entity as Rent;
    pub use super::room::Entity as Room;
    pub use super::tenant::Entity as Tenant;
    pub use super::user::Entity as User;
}
