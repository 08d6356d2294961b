use axum::{body::Bytes, extract::{FromRequest, Request}};
use serde_json::{Map, Value};

use crate::{AppError, AppResult};

/// A request body parsed as loose JSON. An empty body reads as `{}`.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl JsonBody {
    pub fn parse(bytes: &[u8]) -> AppResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        serde_json::from_slice(bytes)
            .map(JsonBody)
            .map_err(|_| AppError::Validation("Malformed JSON body".into()))
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::Validation("Unreadable request body".into()))?;
        JsonBody::parse(&bytes)
    }
}

pub trait GetField {
    /// A field that is present, a string, and not empty.
    fn get_str_field(&self, field: &str) -> Option<&str>;
}

impl GetField for Value {
    fn get_str_field(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Pulls every named field out of `body`, or `None` if any is missing or empty.
pub fn check_body<'a, const N: usize>(body: &'a Value, fields: [&str; N]) -> Option<[&'a str; N]> {
    let mut found = [""; N];
    for (slot, field) in found.iter_mut().zip(fields) {
        *slot = body.get_str_field(field)?;
    }
    Some(found)
}
