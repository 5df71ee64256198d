//! API route configuration.
//!
//! Authentication state is populated for every route by
//! [`crate::api::auth::middleware`]; the handlers enforce what each
//! operation requires.

use crate::api::handlers::{
    create_token_handler, create_user_handler, delete_token_handler, delete_user_handler,
    get_token_handler, get_user_handler, list_tokens_handler, protect_token_handler,
    update_token_handler,
};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

/// User lifecycle routes.
///
/// # Endpoints
///
/// - `POST   /user` - register (public)
/// - `GET    /user` - the authenticated user
/// - `DELETE /user` - delete the authenticated user, cascading to tokens
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/user",
        post(create_user_handler)
            .get(get_user_handler)
            .delete(delete_user_handler),
    )
}

/// Token management routes, all owner-scoped.
///
/// # Endpoints
///
/// - `GET    /token`                 - list own tokens
/// - `POST   /token`                 - create a token
/// - `GET    /token/{name}`          - fetch an owned token
/// - `PUT    /token/{name}`          - merge-update target URL / protect token
/// - `PUT    /token/{name}/protect`  - set or clear only the protect token
/// - `DELETE /token/{name}`          - delete an owned token
pub fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/token", get(list_tokens_handler).post(create_token_handler))
        .route(
            "/token/{name}",
            get(get_token_handler)
                .put(update_token_handler)
                .delete(delete_token_handler),
        )
        .route("/token/{name}/protect", put(protect_token_handler))
}
