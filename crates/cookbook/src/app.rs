use std::time::Duration;

use axum::{
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    handlers::{
        health::{healthz, livez, stats},
        recipes::{create_recipe, delete_recipe, get_recipe, update_recipe},
    },
    middleware::{deadline, request_id, timer},
    state::AppState,
};

/// Bounds every request through `route` by `timeout`.
fn with_deadline(route: MethodRouter<AppState>, timeout: Duration) -> MethodRouter<AppState> {
    route.layer(middleware::from_fn_with_state(timeout, deadline))
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    let recipe_routes = Router::new()
        .route(
            "/recipe",
            with_deadline(post(create_recipe), config.create_recipe_timeout()),
        )
        .route(
            "/recipe/{id}",
            with_deadline(get(get_recipe), config.get_recipe_timeout())
                .merge(with_deadline(put(update_recipe), config.update_recipe_timeout()))
                .merge(with_deadline(delete(delete_recipe), config.delete_recipe_timeout())),
        );

    Router::new()
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .route("/stats", get(stats))
        .merge(recipe_routes)
        .layer(middleware::from_fn_with_state(state.stats.clone(), timer))
        .layer(middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
