//! Utility modules

pub mod date_format;
pub mod lenient;
pub mod memory_storage;
pub mod money;
pub mod validation;

pub use memory_storage::*;
pub use validation::*;
