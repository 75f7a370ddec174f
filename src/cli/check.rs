//! `jumpdef check` — confirm a server is reachable and serving a usable template.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{JumpDefError, Result};
use crate::http::handlers::{CodeResponse, HelloResponse};
use crate::http::{endpoint_path, HELLO_ENDPOINT, INTROSPECTION_ENDPOINT};
use crate::introspection::Placeholder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub greeting: String,
    pub template_len: usize,
}

/// GET both endpoints on the server at `url` (scheme, host and base path).
pub fn check_server(url: &str, extension_name: &str, token: &str) -> Result<CheckReport> {
    let client = Client::new();

    let hello: HelloResponse = fetch(&client, url, extension_name, HELLO_ENDPOINT, token)?;
    let code: CodeResponse = fetch(&client, url, extension_name, INTROSPECTION_ENDPOINT, token)?;

    let missing: Vec<&str> = Placeholder::ALL
        .iter()
        .map(Placeholder::token)
        .filter(|t| !code.code.contains(t))
        .collect();
    if !missing.is_empty() {
        return Err(JumpDefError::ServerCheck(format!(
            "template is missing placeholders: {}",
            missing.join(", ")
        )));
    }

    Ok(CheckReport {
        greeting: hello.data,
        template_len: code.code.len(),
    })
}

fn fetch<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    extension_name: &str,
    endpoint: &str,
    token: &str,
) -> Result<T> {
    let full = format!(
        "{}{}",
        url.trim_end_matches('/'),
        endpoint_path("/", extension_name, endpoint)
    );
    debug!(url = %full, "probing");

    let response = client
        .get(&full)
        .header(reqwest::header::AUTHORIZATION, format!("token {}", token))
        .send()?;

    match response.status() {
        StatusCode::FORBIDDEN => Err(JumpDefError::ServerCheck(format!(
            "{}: token rejected",
            endpoint
        ))),
        StatusCode::NOT_FOUND => Err(JumpDefError::ServerCheck(format!(
            "{}: not found (wrong base URL or extension name?)",
            endpoint
        ))),
        _ => Ok(response.error_for_status()?.json()?),
    }
}
