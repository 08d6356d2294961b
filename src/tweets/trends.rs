use axum::{debug_handler, extract::{Path, State}, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{AppError, AppResult, AppState, StoreContext};

use super::fetch_tweets;

/// Every distinct hashtag, in the order it first showed up.
#[debug_handler(state = AppState)]
pub(crate) async fn all_hashtags(
    State(db_pool): State<SqlitePool>,
) -> AppResult<Response> {
    let (tweet_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tweets")
        .fetch_one(&db_pool)
        .await
        .store_err("Error fetching hashtags")?;
    if tweet_count == 0 {
        return Err(AppError::NotFound("No hashtag to display"));
    }

    let hashtags: Vec<(String,)> =
        sqlx::query_as("SELECT hashtag FROM tweet_hashtags GROUP BY hashtag ORDER BY MIN(rowid)")
            .fetch_all(&db_pool)
            .await
            .store_err("Error fetching hashtags")?;
    let hashtag_list: Vec<String> = hashtags.into_iter().map(|(tag,)| tag).collect();

    Ok(Json(json!({ "result": true, "hashtagList": hashtag_list })).into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn tweets_by_hashtag(
    State(db_pool): State<SqlitePool>,
    Path(hashtag): Path<String>,
) -> AppResult<Response> {
    let hashtag = hashtag.to_lowercase();
    let tweets = fetch_tweets(&db_pool, Some(&hashtag))
        .await
        .store_err("Error fetching tweets by hashtag")?;

    if tweets.is_empty() {
        return Err(AppError::NotFound("No tweets found with this hashtag"));
    }

    Ok(Json(json!({ "result": true, "tweetsList": tweets })).into_response())
}
