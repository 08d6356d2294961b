mod profile;
mod signin;
mod signup;

use axum::{middleware, routing::{post, put}, Router};

use crate::{auth, AppState};

pub fn router(state: AppState) -> Router<AppState> {
    let gated = Router::new()
        .route("/picture", put(profile::update_picture))
        .route("/firstname", put(profile::update_firstname))
        .route_layer(middleware::from_fn_with_state(state, auth::require_token));

    Router::new()
        .route("/signup", post(signup::signup))
        .route("/signin", post(signin::signin))
        .merge(gated)
}
