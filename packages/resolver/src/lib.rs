//! Civic Address Resolution Library
//!
//! Resolves a free-text civic address into two facts no official API
//! provides: the electoral riding containing the address, and the
//! government-assessed property value.
//!
//! # Design
//!
//! Two independent resolution paths:
//!
//! - **Browser automation** — drives the public lookup sites through a
//!   long-lived managed browser ([`browser::SessionManager`] +
//!   [`workflows`]). Markup knowledge lives in versioned pattern tables
//!   ([`sites`]), not in workflow logic.
//! - **Geocode + boundary containment** — pure network fallback
//!   ([`geocode::RidingResolver`]) that never fails: service errors
//!   degrade to none-confidence results.
//!
//! Every path returns a confidence-graded [`types::Resolution`]; callers
//! persist it and surface `needs_review` to a human.
//!
//! # Modules
//!
//! - [`normalize`] - free-text address canonicalization
//! - [`browser`] - session lifecycle and the [`browser::PageDriver`] seam
//! - [`sites`] - per-site pattern tables (the only markup coupling)
//! - [`workflows`] - riding and assessed-value extraction pipelines
//! - [`geocode`] - geocoder/boundary clients and the fallback resolver
//! - [`types`] - shared confidence vocabulary
//! - [`testing`] - mock page driver for exercising workflows offline

pub mod browser;
pub mod error;
pub mod geocode;
pub mod normalize;
pub mod sites;
pub mod testing;
pub mod types;
pub mod workflows;

// Re-export core types at crate root
pub use error::{AutomationError, AutomationResult};
pub use types::{AddressParts, Confidence, Coordinate, LookupSource, Resolution};

pub use browser::{CdpDriver, PageDriver, SessionManager, Tolerance};
pub use geocode::{BoundaryClient, NominatimClient, RidingResolver};
pub use normalize::{extract_parts, normalize};
pub use workflows::{extract_assessed_value, extract_riding, parse_assessed_value, parse_riding};
