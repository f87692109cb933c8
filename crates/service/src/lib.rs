//! Service layer: the query and form data rules on top of `models`.
//! - Repository traits keep handlers independent of the store.
//! - Every store failure is logged here and mapped to a stable error.

pub mod errors;
pub mod pagination;
pub mod query;
pub mod form_data;
pub mod repo;
#[cfg(test)]
pub mod test_support;
