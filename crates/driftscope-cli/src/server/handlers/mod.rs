//! API request handlers.

mod alerts;
mod drift;
mod reports;

pub use alerts::*;
pub use drift::*;
pub use reports::*;
