//! Query resource: domain types, repository abstraction and the service
//! enforcing the one-query-per-form-data rules.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::QueryService;
