//! Plain-text renderers for the declarations

pub mod declarations;

pub use declarations::*;
