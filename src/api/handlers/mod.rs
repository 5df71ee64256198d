//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod follow;
pub mod health;
pub mod tokens;
pub mod users;

pub use follow::follow_handler;
pub use health::health_handler;
pub use tokens::{
    create_token_handler, delete_token_handler, get_token_handler, list_tokens_handler,
    protect_token_handler, update_token_handler,
};
pub use users::{create_user_handler, delete_user_handler, get_user_handler};
