use serde::Serialize;
use sqlx::{sqlite::SqlitePoolOptions, FromRow, SqlitePool};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub token: String,
    pub firstname: String,
    pub image: String,

    // unique: id
    // unique: username
    // unique: token
}

/// What other people get to see of a user.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PublicUser {
    pub username: String,
    pub firstname: String,
    pub image: String,
}

pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    init_schema(&db_pool).await?;
    Ok(db_pool)
}

pub async fn init_schema(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            token TEXT UNIQUE NOT NULL,
            firstname TEXT NOT NULL,
            image TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tweets (
            id TEXT PRIMARY KEY,
            content TEXT NOT NULL,
            author_id TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tweet_likes (
            tweet_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            PRIMARY KEY (tweet_id, user_id)
        )
        "#,
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tweet_hashtags (
            tweet_id TEXT NOT NULL,
            hashtag TEXT NOT NULL,
            PRIMARY KEY (tweet_id, hashtag)
        )
        "#,
    )
    .execute(db_pool)
    .await?;

    Ok(())
}

pub async fn find_user_by_token(db_pool: &SqlitePool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE token=?")
        .bind(token)
        .fetch_optional(db_pool)
        .await
}

pub async fn find_user_by_username(db_pool: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username=?")
        .bind(username)
        .fetch_optional(db_pool)
        .await
}

/// Unix time in milliseconds.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
