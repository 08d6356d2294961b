use std::collections::HashMap;

use axum::{
    extract::Query as QueryParams,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde_json::Value;

use crate::body::GetField;

const TOKEN_FIELD: &str = "token";

/// Where a bearer token may be found on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Body,
    Header,
    Query,
}

impl CredentialSource {
    /// Sources in the order they are tried. First hit wins.
    pub const PRIORITY: [CredentialSource; 3] = [
        CredentialSource::Body,
        CredentialSource::Header,
        CredentialSource::Query,
    ];

    pub fn extract(self, parts: &Parts, body: &Value) -> Option<String> {
        match self {
            CredentialSource::Body => body.get_str_field(TOKEN_FIELD).map(str::to_owned),
            CredentialSource::Header => parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.strip_prefix("Bearer ").unwrap_or(v))
                .filter(|v| !v.is_empty())
                .map(str::to_owned),
            CredentialSource::Query => QueryParams::<HashMap<String, String>>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|QueryParams(mut params)| params.remove(TOKEN_FIELD))
                .filter(|v| !v.is_empty()),
        }
    }
}

pub fn find_credential(parts: &Parts, body: &Value) -> Option<(CredentialSource, String)> {
    CredentialSource::PRIORITY
        .into_iter()
        .find_map(|source| source.extract(parts, body).map(|token| (source, token)))
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use serde_json::json;

    use super::*;

    fn parts(uri: &str, authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn body_beats_header_beats_query() {
        let parts = parts("/tweets/new?token=from-query", Some("from-header"));

        let found = find_credential(&parts, &json!({ "token": "from-body" }));
        assert_eq!(found, Some((CredentialSource::Body, "from-body".to_owned())));

        let found = find_credential(&parts, &json!({}));
        assert_eq!(found, Some((CredentialSource::Header, "from-header".to_owned())));
    }

    #[test]
    fn query_is_the_last_resort() {
        let parts = parts("/users/picture?token=abc", None);
        let found = find_credential(&parts, &Value::Null);
        assert_eq!(found, Some((CredentialSource::Query, "abc".to_owned())));
    }

    #[test]
    fn query_token_sits_among_other_params() {
        let with_token = parts("/tweets/liked/abc?page=2&token=xyz&sort=new", None);
        let without = parts("/tweets?page=2", None);

        assert_eq!(CredentialSource::Query.extract(&with_token, &Value::Null), Some("xyz".to_owned()));
        assert_eq!(CredentialSource::Query.extract(&without, &Value::Null), None);
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        let parts = parts("/", Some("Bearer abc"));
        assert_eq!(CredentialSource::Header.extract(&parts, &Value::Null), Some("abc".to_owned()));
    }

    #[test]
    fn empty_values_count_as_absent() {
        let parts = parts("/?token=", Some(""));
        assert_eq!(find_credential(&parts, &json!({ "token": "" })), None);
    }
}
