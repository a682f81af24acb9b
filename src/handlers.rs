pub mod health;
pub mod houses;
pub mod maintenance;
pub mod monthly_services;
pub mod payments;
pub mod rents;
pub mod reports;
pub mod rooms;
pub mod tenants;
pub mod users;

use sea_orm::DbErr;

/// Whether a database error is a constraint violation (unique index or
/// foreign key), as opposed to an infrastructure failure.
pub(crate) fn is_constraint_violation(err: &DbErr) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains("unique") || msg.contains("foreign key") || msg.contains("constraint")
}
