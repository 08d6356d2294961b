use axum::{
    body::{self, Body},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::debug;

use crate::{body::JsonBody, db, AppError, AppResult, StoreContext};

use super::{find_credential, CurrentUser};

const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Resolves the request's token to a user and stashes it for the handler.
///
/// The body is buffered so a `token` field can be read from it, then handed
/// on untouched.
pub async fn require_token(
    State(db_pool): State<SqlitePool>,
    req: Request,
    next: Next,
) -> AppResult<Response> {
    let (mut parts, raw) = req.into_parts();
    let bytes = body::to_bytes(raw, BODY_LIMIT)
        .await
        .map_err(|_| AppError::Validation("Unreadable request body".into()))?;

    // a body that isn't JSON just has no token in it; the handler reports it
    let json = JsonBody::parse(&bytes).map(|JsonBody(v)| v).unwrap_or(Value::Null);

    let Some((source, token)) = find_credential(&parts, &json) else {
        return Err(AppError::Unauthenticated);
    };

    let Some(user) = db::find_user_by_token(&db_pool, &token)
        .await
        .store_err("Error checking token")?
    else {
        debug!(?source, "rejected unknown token");
        return Err(AppError::InvalidCredential);
    };

    debug!(username = %user.username, ?source, "authenticated");
    parts.extensions.insert(CurrentUser(user));

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
