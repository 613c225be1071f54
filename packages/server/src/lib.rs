// Address Resolution Service
//
// HTTP surface over the resolver library: the volunteer-management UI
// posts an address and gets back a riding or an assessed value.

pub mod config;
pub mod server;

pub use config::*;
