//! Type definitions for bikedash

mod error;
mod records;

pub use error::*;
pub use records::*;
