pub mod bands;
pub mod composer;
pub mod error;
pub mod preview;
pub mod types;

pub use composer::{compose_report, INSUFFICIENT_DATA_MESSAGE};
pub use error::*;
pub use types::*;
