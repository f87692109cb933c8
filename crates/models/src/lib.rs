pub mod errors;
pub mod db;
pub mod form_data;
pub mod query;

#[cfg(test)]
mod tests;
