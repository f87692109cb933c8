//! Repository implementations: SeaORM for the running service, an
//! in-memory store for tests, benches and doc examples.

pub mod mock;
pub mod seaorm;
