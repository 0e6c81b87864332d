use super::handlers;
use super::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn home_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(handlers::home::index))
}

pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(handlers::users::index))
        .route(
            "/users/new",
            get(handlers::users::new_user).post(handlers::users::create_user),
        )
        .route("/users/:id", get(handlers::users::show_user))
        .route(
            "/users/:id/edit",
            get(handlers::users::edit_user).post(handlers::users::update_user),
        )
        .route("/users/:id/delete", post(handlers::users::delete_user))
}

pub fn post_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users/:id/posts/new",
            get(handlers::posts::new_post).post(handlers::posts::create_post),
        )
        .route("/posts/:id", get(handlers::posts::show_post))
        .route(
            "/posts/:id/edit",
            get(handlers::posts::edit_post).post(handlers::posts::update_post),
        )
        .route("/posts/:id/delete", post(handlers::posts::delete_post))
}

pub fn tag_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tags", get(handlers::tags::index))
        .route(
            "/tags/new",
            get(handlers::tags::new_tag).post(handlers::tags::create_tag),
        )
        .route("/tags/:id", get(handlers::tags::show_tag))
        .route(
            "/tags/:id/edit",
            get(handlers::tags::edit_tag).post(handlers::tags::update_tag),
        )
        .route("/tags/:id/delete", post(handlers::tags::delete_tag))
}
