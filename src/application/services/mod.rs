//! Business logic services for the application layer.

pub mod token_registry;
pub mod user_service;

pub use token_registry::TokenRegistry;
pub use user_service::UserService;
