use axum::{debug_handler, extract::{Path, State}, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;

use crate::{auth::CurrentUser, AppError, AppResult, AppState, StoreContext};

use super::fetch_tweets;

#[debug_handler(state = AppState)]
pub(crate) async fn delete_tweet(
    State(db_pool): State<SqlitePool>,
    CurrentUser(user): CurrentUser,
    Path(tweet_id): Path<String>,
) -> AppResult<Response> {
    let Some((author_id,)): Option<(String,)> =
        sqlx::query_as("SELECT author_id FROM tweets WHERE id=?")
            .bind(&tweet_id)
            .fetch_optional(&db_pool)
            .await
            .store_err("Error fetching tweet")?
    else {
        return Err(AppError::NotFound("Tweet not found"));
    };

    if author_id != user.id {
        return Err(AppError::Forbidden("Unauthorized: you are not the author of this tweet"));
    }

    let deleted = remove_tweet(&db_pool, &tweet_id)
        .await
        .store_err("Error deleting tweet")?;
    if !deleted {
        return Err(AppError::NotApplied("Tweet not deleted"));
    }

    info!(tweet = %tweet_id, author = %user.username, "deleted tweet");

    let tweets = fetch_tweets(&db_pool, None)
        .await
        .store_err("Error deleting tweet")?;

    Ok(Json(json!({ "result": true, "tweetsList": tweets })).into_response())
}

/// Drops the tweet with its likes and tags. Rolls back if the tweet was
/// already gone.
async fn remove_tweet(db_pool: &SqlitePool, tweet_id: &str) -> Result<bool, sqlx::Error> {
    let mut tx = db_pool.begin().await?;

    let removed = sqlx::query("DELETE FROM tweets WHERE id=?")
        .bind(tweet_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if removed == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::query("DELETE FROM tweet_likes WHERE tweet_id=?")
        .bind(tweet_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM tweet_hashtags WHERE tweet_id=?")
        .bind(tweet_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}
