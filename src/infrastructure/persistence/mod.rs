//! Store backend implementations.
//!
//! Concrete implementations of the domain store traits. The backend is
//! chosen once at startup ([`crate::server::run`]); the services are
//! oblivious to the choice.
//!
//! # Backends
//!
//! - [`PgUserStore`] / [`PgTokenStore`] - PostgreSQL via SQLx
//! - [`MemoryUserStore`] / [`MemoryTokenStore`] - mutex-guarded maps for
//!   DATABASE_URL-less runs and tests

pub mod memory_token_store;
pub mod memory_user_store;
pub mod pg_token_store;
pub mod pg_user_store;

pub use memory_token_store::MemoryTokenStore;
pub use memory_user_store::MemoryUserStore;
pub use pg_token_store::PgTokenStore;
pub use pg_user_store::PgUserStore;
