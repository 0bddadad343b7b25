//! Tax declaration calculators
//!
//! Each calculator is independent and receives its configuration and the
//! processing period explicitly.

pub mod gross_receipts;
pub mod income;
pub mod personal_assets;
pub mod vat;

pub use gross_receipts::*;
pub use income::*;
pub use personal_assets::*;
pub use vat::*;
