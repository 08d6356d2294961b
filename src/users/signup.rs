use axum::{debug_handler, extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::{auth, body::{check_body, JsonBody}, db, AppError, AppResult, AppState, StoreContext};

const STORE_FAILED: &str = "Database error during signup";

#[debug_handler(state = AppState)]
pub(crate) async fn signup(
    State(db_pool): State<SqlitePool>,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    let Some([firstname, username, password]) = check_body(&body, ["firstname", "username", "password"]) else {
        return Err(AppError::Validation("Missing or empty fields".into()));
    };

    if db::find_user_by_username(&db_pool, username)
        .await
        .store_err(STORE_FAILED)?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists"));
    }

    let password_hash = auth::hash_password(password).store_err(STORE_FAILED)?;
    let token = auth::generate_token();

    let inserted = sqlx::query("INSERT INTO users (id,username,password_hash,token,firstname,image) VALUES (?,?,?,?,?,'')")
        .bind(Uuid::now_v7().to_string())
        .bind(username)
        .bind(&password_hash)
        .bind(&token)
        .bind(firstname)
        .execute(&db_pool)
        .await;

    match inserted {
        Ok(_) => {}
        // lost a race with another signup for the same name
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::Conflict("User already exists"));
        }
        Err(e) => {
            return Err(AppError::Store { message: STORE_FAILED, source: e.into() });
        }
    }

    info!(%username, "signed up");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "result": true, "token": token })),
    ).into_response())
}
