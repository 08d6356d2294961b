use axum::{debug_handler, extract::State, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{AppError, AppResult, AppState, StoreContext};

use super::fetch_tweets;

#[debug_handler(state = AppState)]
pub(crate) async fn all_tweets(
    State(db_pool): State<SqlitePool>,
) -> AppResult<Response> {
    let tweets = fetch_tweets(&db_pool, None)
        .await
        .store_err("Error fetching tweets")?;

    if tweets.is_empty() {
        return Err(AppError::NotFound("No tweet to display"));
    }

    Ok(Json(json!({ "result": true, "tweetsList": tweets })).into_response())
}
