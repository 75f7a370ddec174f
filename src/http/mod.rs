//! HTTP surface: two authenticated endpoints under
//! `<base_url>/<extension_name>/`.
//!
//! - `GET  hello` — fixed greeting, used by clients to detect the server.
//! - `GET  introspection-code` — the introspection template, placeholders intact.
//! - `POST introspection-code` — the same code rendered for a typed request.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use auth::TokenAuth;
pub use error::ApiError;
pub use router::{build_router, endpoint_path, url_path_join, HELLO_ENDPOINT, INTROSPECTION_ENDPOINT};
