//! Browser automation: session lifecycle, page driving, pacing.

pub mod driver;
pub mod pacing;
pub mod session;

pub use driver::{CdpDriver, PageDriver, Tolerance};
pub use session::SessionManager;
