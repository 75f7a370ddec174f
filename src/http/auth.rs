//! Token authentication, applied as a middleware stage around every
//! extension route.
//!
//! Clients present the server token the same way notebook servers accept it:
//! `Authorization: token <t>`, `Authorization: Bearer <t>`, or `?token=<t>`.

use std::sync::Arc;

use axum::extract::{Query, Request};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::error::ApiError;

/// The token every request must carry.
#[derive(Clone)]
pub struct TokenAuth {
    token: Arc<str>,
}

impl TokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }

    /// Constant-time comparison against the server token.
    pub fn verify(&self, presented: &str) -> bool {
        !presented.is_empty() && bool::from(presented.as_bytes().ct_eq(self.token.as_bytes()))
    }
}

impl std::fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuth").finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Extract the token a request presents, header first.
pub fn presented_token(request: &Request) -> Option<String> {
    let from_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().split_once(' '))
        .filter(|(scheme, _)| {
            scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer")
        })
        .map(|(_, token)| token.trim().to_string());

    from_header.or_else(|| {
        Query::<TokenQuery>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(q)| q.token)
    })
}

/// Reject the request with 403 unless it carries the server token.
pub async fn token_auth(
    Extension(auth): Extension<TokenAuth>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match presented_token(&request) {
        Some(token) if auth.verify(&token) => {
            debug!(path = %request.uri().path(), "authenticated");
            Ok(next.run(request).await)
        }
        presented => {
            warn!(
                path = %request.uri().path(),
                token_present = presented.is_some(),
                "rejected unauthenticated request"
            );
            Err(ApiError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str, auth: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_token_from_header() {
        assert_eq!(
            presented_token(&request("/x", Some("token abc"))).as_deref(),
            Some("abc")
        );
        assert_eq!(
            presented_token(&request("/x", Some("Bearer abc"))).as_deref(),
            Some("abc")
        );
        assert_eq!(presented_token(&request("/x", Some("Basic abc"))), None);
    }

    #[test]
    fn test_token_from_query() {
        assert_eq!(
            presented_token(&request("/x?foo=1&token=abc", None)).as_deref(),
            Some("abc")
        );
        assert_eq!(presented_token(&request("/x?foo=1", None)), None);
        assert_eq!(presented_token(&request("/x", None)), None);
    }

    #[test]
    fn test_verify() {
        let auth = TokenAuth::new("secret");
        assert!(auth.verify("secret"));
        assert!(!auth.verify("Secret"));
        assert!(!auth.verify(""));
        assert!(!auth.verify("secre"));
        assert!(!auth.verify("secret "));
        assert!(!TokenAuth::new("").verify(""));
        assert!(!format!("{:?}", auth).contains("secret"));
    }
}
