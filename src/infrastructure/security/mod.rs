//! Security collaborators.

pub mod password_hasher;

pub use password_hasher::{HmacPasswordHasher, PasswordHasher};
