//! Resource CRUD routes. Every resource mounts the same five operations;
//! the handlers differ only in rules, messages, and service calls.

use axum::routing::get;
use axum::Router;

use crate::handlers::{category, dept, flag, link, price, product};
use crate::state::AppState;

/// All six resource routers nested under their public paths. Mount under
/// `/api`.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .nest("/products", products(state.clone()))
        .nest("/prices", prices(state.clone()))
        .nest("/categories", categories(state.clone()))
        .nest("/depts", depts(state.clone()))
        .nest("/flags", flags(state.clone()))
        .nest("/links", links(state))
}

fn products(state: AppState) -> Router {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route(
            "/:id",
            get(product::read).put(product::update).delete(product::delete),
        )
        .with_state(state)
}

fn prices(state: AppState) -> Router {
    Router::new()
        .route("/", get(price::list).post(price::create))
        .route(
            "/:id",
            get(price::read).put(price::update).delete(price::delete),
        )
        .with_state(state)
}

fn categories(state: AppState) -> Router {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route(
            "/:id",
            get(category::read)
                .put(category::update)
                .delete(category::delete),
        )
        .with_state(state)
}

fn depts(state: AppState) -> Router {
    Router::new()
        .route("/", get(dept::list).post(dept::create))
        .route("/:id", get(dept::read).put(dept::update).delete(dept::delete))
        .with_state(state)
}

fn flags(state: AppState) -> Router {
    Router::new()
        .route("/", get(flag::list).post(flag::create))
        .route("/:id", get(flag::read).put(flag::update).delete(flag::delete))
        .with_state(state)
}

fn links(state: AppState) -> Router {
    Router::new()
        .route("/", get(link::list).post(link::create))
        .route("/:id", get(link::read).put(link::update).delete(link::delete))
        .with_state(state)
}
