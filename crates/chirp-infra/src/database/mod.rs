//! Post store adapters.

mod connections;
pub mod entity;
mod memory;
mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use memory::InMemoryPostRepository;
pub use postgres_repo::PostgresPostRepository;

#[cfg(test)]
mod tests;
