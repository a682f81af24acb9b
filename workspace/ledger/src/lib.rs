//! Balance reconciliation engine.
//!
//! Pure money math (balance derivation, contract classification, entry
//! validation) lives beside the async resolvers that feed it from the
//! database. Handlers call [`record_payment`] to append to the ledger and
//! [`balance::tenant_balance_report`] to read it back.

use rust_decimal::Decimal;

pub mod balance;
pub mod error;
pub mod expiry;
pub mod obligation;
pub mod record;
pub mod resolver;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use balance::{compute_balance, tenant_balance_report};
pub use error::{LedgerError, Result};
pub use expiry::classify_contract;
pub use obligation::Obligation;
pub use record::{NewPayment, record_payment};

/// Comparisons of money amounts ignore differences up to one cent.
pub fn amount_tolerance() -> Decimal {
    Decimal::new(1, 2)
}
