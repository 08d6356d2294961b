use axum::{debug_handler, extract::State, response::{IntoResponse, Response}, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{auth::CurrentUser, body::{check_body, JsonBody}, AppError, AppResult, AppState, StoreContext};

#[debug_handler(state = AppState)]
pub(crate) async fn update_picture(
    State(db_pool): State<SqlitePool>,
    CurrentUser(user): CurrentUser,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    // an empty string clears the avatar back to the default
    let Some(image) = body.get("image").and_then(Value::as_str) else {
        return Err(AppError::Validation("Missing or empty fields".into()));
    };

    let Some((token, image)): Option<(String, String)> =
        sqlx::query_as("UPDATE users SET image=? WHERE id=? RETURNING token,image")
            .bind(image)
            .bind(&user.id)
            .fetch_optional(&db_pool)
            .await
            .store_err("Database update error")?
    else {
        return Err(AppError::NotApplied("Profile picture not updated"));
    };

    Ok(Json(json!({ "result": true, "token": token, "image": image })).into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn update_firstname(
    State(db_pool): State<SqlitePool>,
    CurrentUser(user): CurrentUser,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    let Some([firstname]) = check_body(&body, ["firstname"]) else {
        return Err(AppError::Validation("Missing or empty fields".into()));
    };

    let Some((token, firstname)): Option<(String, String)> =
        sqlx::query_as("UPDATE users SET firstname=? WHERE id=? RETURNING token,firstname")
            .bind(firstname)
            .bind(&user.id)
            .fetch_optional(&db_pool)
            .await
            .store_err("Database update error")?
    else {
        return Err(AppError::NotApplied("Firstname not updated"));
    };

    Ok(Json(json!({ "result": true, "token": token, "firstname": firstname })).into_response())
}
