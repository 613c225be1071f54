//! Browser-automation extraction workflows, one per target site.

pub mod property;
pub mod riding;

pub use property::{extract_assessed_value, parse_assessed_value};
pub use riding::{extract_riding, parse_riding};
