//! Record store adapters.

mod connections;
mod memory;
mod postgres_base;
mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect, share_connection};
pub use memory::MemoryStore;
pub use postgres_repo::{
    PostgresContactRepository, PostgresPostRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
