//! Endpoint handlers. Authentication has already happened by the time any of
//! these run.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::ApiError;
use crate::introspection::{IntrospectionEncoding, IntrospectionRequest};

pub const GREETING: &str = "Hello, world! This is the '/jupyterlab-jump-to-definition-fix/hello' endpoint. Try visiting me in your browser!";

#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CodeResponse {
    pub code: String,
}

/// GET `<base>/<ext>/hello`
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        data: GREETING.to_string(),
    })
}

/// GET `<base>/<ext>/introspection-code` — the template, placeholders intact.
pub async fn introspection_code(
    Extension(encoding): Extension<Arc<dyn IntrospectionEncoding>>,
) -> Json<CodeResponse> {
    info!(encoding = encoding.name(), "introspection code requested");
    Json(CodeResponse {
        code: encoding.template().to_string(),
    })
}

/// POST `<base>/<ext>/introspection-code` — the code with the request's
/// values already substituted.
pub async fn render_introspection_code(
    Extension(encoding): Extension<Arc<dyn IntrospectionEncoding>>,
    payload: Result<Json<IntrospectionRequest>, JsonRejection>,
) -> Result<Json<CodeResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    debug!(
        encoding = encoding.name(),
        line = request.line,
        column = request.column,
        path = %request.path,
        source_len = request.source.len(),
        "rendering introspection code"
    );
    let code = encoding.encode(&request)?;
    Ok(Json(CodeResponse { code }))
}
