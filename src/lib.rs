pub mod appresult;
pub mod auth;
pub mod body;
pub mod config;
pub mod db;
pub mod tweets;
pub mod users;

use axum::{extract::FromRef, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult, StoreContext};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

/// The full HTTP surface.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/tweets", tweets::router(app_state.clone()))
        .nest("/users", users::router(app_state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
