mod delete;
mod hashtags;
mod liked;
mod list;
mod new;
mod trends;

use std::collections::HashMap;

use axum::{middleware, routing::{delete, get, post, put}, Router};
use serde::Serialize;
use sqlx::{FromRow, Sqlite, SqlitePool};

use crate::{auth, db::PublicUser, AppState};

pub use hashtags::extract_hashtags;

pub const MAX_TWEET_CHARS: usize = 280;

pub fn router(state: AppState) -> Router<AppState> {
    let gated = Router::new()
        .route("/new", post(new::post_new_tweet))
        .route("/delete/{id}", delete(delete::delete_tweet))
        .route("/liked/{id}", put(liked::toggle_like))
        .route_layer(middleware::from_fn_with_state(state, auth::require_token));

    Router::new()
        .route("/", get(list::all_tweets))
        .route("/trends", get(trends::all_hashtags))
        .route("/trends/{hashtag}", get(trends::tweets_by_hashtag))
        .merge(gated)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetView {
    pub id: String,
    pub content: String,
    pub author: PublicUser,
    /// Unix milliseconds.
    pub date: i64,
    pub is_liked: Vec<PublicUser>,
    pub hashtag: Vec<String>,
}

#[derive(FromRow)]
struct TweetRow {
    id: String,
    content: String,
    created_at: i64,
    username: String,
    firstname: String,
    image: String,
}

/// Tweets newest first, with author and likers filled in. `hashtag` must
/// already be lowercase.
pub(crate) async fn fetch_tweets(
    db_pool: &SqlitePool,
    hashtag: Option<&str>,
) -> Result<Vec<TweetView>, sqlx::Error> {
    let filter = |column: &str| match hashtag {
        Some(_) => format!("WHERE {column} IN (SELECT tweet_id FROM tweet_hashtags WHERE hashtag=?)"),
        None => String::new(),
    };

    let tweets_sql = format!(
        "SELECT t.id,t.content,t.created_at,u.username,u.firstname,u.image \
         FROM tweets t JOIN users u ON u.id=t.author_id {} \
         ORDER BY t.created_at DESC, t.rowid DESC",
        filter("t.id")
    );
    let likes_sql = format!(
        "SELECT l.tweet_id,u.username,u.firstname,u.image \
         FROM tweet_likes l JOIN users u ON u.id=l.user_id {} \
         ORDER BY l.rowid",
        filter("l.tweet_id")
    );
    let tags_sql = format!(
        "SELECT h.tweet_id,h.hashtag FROM tweet_hashtags h {} ORDER BY h.rowid",
        filter("h.tweet_id")
    );

    let mut rows_query = sqlx::query_as::<Sqlite, TweetRow>(&tweets_sql);
    let mut likes_query = sqlx::query_as::<Sqlite, (String, String, String, String)>(&likes_sql);
    let mut tags_query = sqlx::query_as::<Sqlite, (String, String)>(&tags_sql);
    if let Some(tag) = hashtag {
        rows_query = rows_query.bind(tag);
        likes_query = likes_query.bind(tag);
        tags_query = tags_query.bind(tag);
    }

    let rows = rows_query.fetch_all(db_pool).await?;
    let likes = likes_query.fetch_all(db_pool).await?;
    let tags = tags_query.fetch_all(db_pool).await?;

    let mut likes_by_tweet: HashMap<String, Vec<PublicUser>> = HashMap::new();
    for (tweet_id, username, firstname, image) in likes {
        likes_by_tweet
            .entry(tweet_id)
            .or_default()
            .push(PublicUser { username, firstname, image });
    }

    let mut tags_by_tweet: HashMap<String, Vec<String>> = HashMap::new();
    for (tweet_id, tag) in tags {
        tags_by_tweet.entry(tweet_id).or_default().push(tag);
    }

    Ok(rows
        .into_iter()
        .map(|row| TweetView {
            is_liked: likes_by_tweet.remove(&row.id).unwrap_or_default(),
            hashtag: tags_by_tweet.remove(&row.id).unwrap_or_default(),
            author: PublicUser {
                username: row.username,
                firstname: row.firstname,
                image: row.image,
            },
            date: row.created_at,
            content: row.content,
            id: row.id,
        })
        .collect())
}
