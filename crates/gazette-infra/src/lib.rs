//! # Gazette Infrastructure
//!
//! Concrete implementations of the ports defined in `gazette-core`:
//! SeaORM-backed repositories, an in-memory store for tests and
//! database-less operation, JWT + Argon2 authentication services, and the
//! local-filesystem media store.

pub mod auth;
pub mod database;
pub mod media;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, MemoryStore, PostgresContactRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};
pub use media::LocalMediaStore;
