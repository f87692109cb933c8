//! Shared building blocks for the querydesk crates: wire types that are not
//! tied to a resource, and logging setup.

pub mod types;
pub mod utils;
