//! API route configuration.
//!
//! Authentication is per handler: protected handlers take a
//! [`crate::api::extract::CurrentUser`] argument, which lets the public
//! redirect and the protected delete share the `/urls/{key}` path.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, health_handler, link_info_handler,
    list_links_handler, login_handler, me_handler, redirect_handler, root_handler,
    signup_handler, update_me_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /`                 - Welcome message (public)
/// - `GET    /health`           - Storage connectivity (public)
/// - `POST   /signup`           - Register an account (public)
/// - `POST   /login`            - Form login, returns a bearer token (public)
/// - `GET    /users/me`         - Current user's profile
/// - `PATCH  /users/me`         - Update first/last name
/// - `POST   /urls`             - Shorten a URL
/// - `GET    /urls/all`         - List own links (paginated)
/// - `GET    /urls/info/{key}`  - Link detail with click history
/// - `GET    /urls/{key}`       - Redirect to target (public)
/// - `DELETE /urls/{key}`       - Delete own link
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .route("/users/me", get(me_handler).patch(update_me_handler))
        .route("/urls", post(create_link_handler))
        .route("/urls/all", get(list_links_handler))
        .route("/urls/info/{key}", get(link_info_handler))
        .route(
            "/urls/{key}",
            get(redirect_handler).delete(delete_link_handler),
        )
}
