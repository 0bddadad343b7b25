//! Ledger module: posting generation, aggregation and statements

pub mod accounts;
pub mod entries;
pub mod statements;
pub mod trial_balance;
pub mod validator;

pub use accounts::*;
pub use entries::*;
pub use statements::*;
pub use trial_balance::*;
pub use validator::*;
