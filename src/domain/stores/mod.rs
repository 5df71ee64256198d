//! Store trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern:
//! the traits define the contract, concrete backends live in
//! `crate::infrastructure::persistence`, and `mockall` generates mocks for
//! unit tests.
//!
//! # Available Stores
//!
//! - [`UserStore`] - user records, keyed by username
//! - [`TokenStore`] - tokens, keyed by globally unique name

pub mod token_store;
pub mod user_store;

pub use token_store::TokenStore;
pub use user_store::UserStore;

#[cfg(test)]
pub use token_store::MockTokenStore;
#[cfg(test)]
pub use user_store::MockUserStore;
