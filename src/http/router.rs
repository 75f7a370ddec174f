//! Route registration.

use std::sync::Arc;

use axum::{
    middleware as axum_mw,
    routing::get,
    Extension, Router,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::auth::{token_auth, TokenAuth};
use super::handlers;
use crate::introspection::IntrospectionEncoding;

pub const HELLO_ENDPOINT: &str = "hello";
pub const INTROSPECTION_ENDPOINT: &str = "introspection-code";

/// Join URL path segments with exactly one `/` between them and a leading `/`.
///
/// A trailing `/` on the last segment is kept.
pub fn url_path_join(parts: &[&str]) -> String {
    let mut joined = String::from("/");
    joined.push_str(
        &parts
            .iter()
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("/"),
    );
    if parts.last().map_or(false, |p| p.ends_with('/')) && !joined.ends_with('/') {
        joined.push('/');
    }
    joined
}

/// Full path of an endpoint under `base_url` and `extension_name`.
pub fn endpoint_path(base_url: &str, extension_name: &str, endpoint: &str) -> String {
    url_path_join(&[base_url, extension_name, endpoint])
}

/// Build the router: both endpoints behind token auth, plus request tracing.
pub fn build_router(
    base_url: &str,
    extension_name: &str,
    auth: TokenAuth,
    encoding: Arc<dyn IntrospectionEncoding>,
) -> Router {
    let hello_path = endpoint_path(base_url, extension_name, HELLO_ENDPOINT);
    let introspection_path = endpoint_path(base_url, extension_name, INTROSPECTION_ENDPOINT);
    debug!(hello = %hello_path, introspection = %introspection_path, "registering routes");

    Router::new()
        .route(&hello_path, get(handlers::hello))
        .route(
            &introspection_path,
            get(handlers::introspection_code).post(handlers::render_introspection_code),
        )
        // Route layer: unmatched paths fall through to the 404 fallback.
        .route_layer(axum_mw::from_fn(token_auth))
        .layer(Extension(auth))
        .layer(Extension(encoding))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_path_join() {
        assert_eq!(url_path_join(&["/", "ext", "hello"]), "/ext/hello");
        assert_eq!(url_path_join(&["/user/alice/", "/ext/", "hello"]), "/user/alice/ext/hello");
        assert_eq!(url_path_join(&["base", "ext", "dir/"]), "/base/ext/dir/");
        assert_eq!(url_path_join(&["/"]), "/");
        assert_eq!(url_path_join(&[]), "/");
    }

    #[test]
    fn test_endpoint_path() {
        assert_eq!(
            endpoint_path("/", "jupyterlab-jump-to-definition-fix", INTROSPECTION_ENDPOINT),
            "/jupyterlab-jump-to-definition-fix/introspection-code"
        );
    }
}
