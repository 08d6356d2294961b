use axum::{debug_handler, extract::{Path, State}, response::{IntoResponse, Response}, Json};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;

use crate::{auth::CurrentUser, AppError, AppResult, AppState, StoreContext};

use super::fetch_tweets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    NotLiked,
}

#[debug_handler(state = AppState)]
pub(crate) async fn toggle_like(
    State(db_pool): State<SqlitePool>,
    CurrentUser(user): CurrentUser,
    Path(tweet_id): Path<String>,
) -> AppResult<Response> {
    let exists = sqlx::query_as::<_, (i64,)>("SELECT 1 FROM tweets WHERE id=?")
        .bind(&tweet_id)
        .fetch_optional(&db_pool)
        .await
        .store_err("Error fetching tweet")?
        .is_some();
    if !exists {
        return Err(AppError::NotFound("Tweet not found"));
    }

    let Some(now) = toggle(&db_pool, &tweet_id, &user.id)
        .await
        .store_err("Error updating like")?
    else {
        return Err(AppError::NotApplied("Tweet not updated"));
    };

    info!(tweet = %tweet_id, user = %user.username, ?now, "toggled like");

    let tweets = fetch_tweets(&db_pool, None)
        .await
        .store_err("Error updating like")?;

    Ok(Json(json!({ "result": true, "tweetsList": tweets })).into_response())
}

/// Flips `(tweet, user)` between liked and not liked in one transaction and
/// returns the new state. `None` means nothing changed, which includes the
/// tweet having been deleted in the meantime.
pub(crate) async fn toggle(
    db_pool: &SqlitePool,
    tweet_id: &str,
    user_id: &str,
) -> Result<Option<LikeState>, sqlx::Error> {
    let mut tx = db_pool.begin().await?;

    let unliked = sqlx::query("DELETE FROM tweet_likes WHERE tweet_id=? AND user_id=?")
        .bind(tweet_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let now = if unliked > 0 {
        Some(LikeState::NotLiked)
    } else {
        let liked = sqlx::query(
            "INSERT OR IGNORE INTO tweet_likes (tweet_id,user_id) \
             SELECT ?,? WHERE EXISTS (SELECT 1 FROM tweets WHERE id=?)",
        )
        .bind(tweet_id)
        .bind(user_id)
        .bind(tweet_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        (liked > 0).then_some(LikeState::Liked)
    };

    tx.commit().await?;
    Ok(now)
}
