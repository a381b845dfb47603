pub mod auth;
pub mod error;
pub mod middleware;
pub mod posts;
pub mod votes;

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::error;

use tally_db::Database;

use crate::error::AppError;
use crate::middleware::require_auth;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

/// Full HTTP surface. `/`, `/auth/register` and `/auth/login` are public;
/// everything else requires a bearer token.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(posts::index))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/create", get(posts::create_form).post(posts::create))
        .route("/{id}", get(posts::read))
        .route("/{id}/update", get(posts::update_form).post(posts::update))
        .route("/{id}/delete", post(posts::delete))
        .route("/{id}/like", post(votes::like))
        .route("/{id}/dislike", post(votes::dislike))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
}

/// Run blocking DB work off the async runtime.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    let result = tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            anyhow::Error::from(e)
        })??;
    Ok(result)
}
