use axum::{debug_handler, extract::State, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::debug;

use crate::{auth, body::{check_body, JsonBody}, db, AppError, AppResult, AppState, StoreContext};

#[debug_handler(state = AppState)]
pub(crate) async fn signin(
    State(db_pool): State<SqlitePool>,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    let Some([username, password]) = check_body(&body, ["username", "password"]) else {
        return Err(AppError::Validation("Missing or empty fields".into()));
    };

    let Some(user) = db::find_user_by_username(&db_pool, username)
        .await
        .store_err("Database error during signin")?
    else {
        return Err(AppError::WrongCredentials("User not found"));
    };

    if !auth::verify_password(password, &user.password_hash) {
        debug!(%username, "wrong password");
        return Err(AppError::WrongCredentials("Wrong password"));
    }

    Ok(Json(json!({
        "result": true,
        "token": user.token,
        "firstname": user.firstname,
        "image": user.image,
    })).into_response())
}
