use axum::{debug_handler, extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::{auth::CurrentUser, body::{check_body, JsonBody}, db, AppError, AppResult, AppState, StoreContext};

use super::{extract_hashtags, fetch_tweets, MAX_TWEET_CHARS};

#[debug_handler(state = AppState)]
pub(crate) async fn post_new_tweet(
    State(db_pool): State<SqlitePool>,
    CurrentUser(user): CurrentUser,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    let Some([content]) = check_body(&body, ["content"]) else {
        return Err(AppError::Validation("Missing or empty content".into()));
    };

    if content.chars().count() > MAX_TWEET_CHARS {
        return Err(AppError::Validation("Tweet is too long".into()));
    }

    let hashtags = extract_hashtags(content);
    let id = Uuid::now_v7();
    insert_tweet(&db_pool, id, &user.id, content, &hashtags)
        .await
        .store_err("Error posting tweet")?;

    info!(tweet = %id, author = %user.username, ?hashtags, "posted tweet");

    let tweets = fetch_tweets(&db_pool, None)
        .await
        .store_err("Error posting tweet")?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "result": true, "tweetsList": tweets })),
    ).into_response())
}

/// The tweet and its tags land together or not at all.
async fn insert_tweet(
    db_pool: &SqlitePool,
    id: Uuid,
    author_id: &str,
    content: &str,
    hashtags: &[String],
) -> Result<(), sqlx::Error> {
    let mut tx = db_pool.begin().await?;

    sqlx::query("INSERT INTO tweets (id,content,author_id,created_at) VALUES (?,?,?,?)")
        .bind(id.to_string())
        .bind(content)
        .bind(author_id)
        .bind(db::now_millis())
        .execute(&mut *tx)
        .await?;

    for tag in hashtags {
        sqlx::query("INSERT INTO tweet_hashtags (tweet_id,hashtag) VALUES (?,?)")
            .bind(id.to_string())
            .bind(tag)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await
}
