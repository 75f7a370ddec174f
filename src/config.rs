//! Server configuration: TOML file, then `JUMPDEF_*` environment overrides.
//!
//! ```toml
//! bind = "127.0.0.1:8888"
//! base_url = "/user/alice/"
//! extension_name = "jupyterlab-jump-to-definition-fix"
//! token = "secret"
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{JumpDefError, Result};

/// URL segment the routes are registered under.
pub const DEFAULT_EXTENSION_NAME: &str = "jupyterlab-jump-to-definition-fix";

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "jumpdef.toml";

const DEFAULT_BIND: &str = "127.0.0.1:8888";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: String,
    /// Base URL prefix every route lives under.
    pub base_url: String,
    /// Path segment between the base URL and the endpoint name.
    pub extension_name: String,
    /// Shared secret clients must present. Generated at startup when unset.
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            base_url: "/".to_string(),
            extension_name: DEFAULT_EXTENSION_NAME.to_string(),
            token: None,
        }
    }
}

impl ServerConfig {
    /// Load config from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| JumpDefError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| JumpDefError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `JUMPDEF_BIND`, `JUMPDEF_BASE_URL`, `JUMPDEF_TOKEN` and
    /// `JUMPDEF_EXTENSION_NAME` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with an
    /// explicit variable lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup("JUMPDEF_BIND") {
            self.bind = bind;
        }
        if let Some(base_url) = lookup("JUMPDEF_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(name) = lookup("JUMPDEF_EXTENSION_NAME") {
            self.extension_name = name;
        }
        if let Some(token) = lookup("JUMPDEF_TOKEN").filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        self
    }

    /// Check values that can't be expressed in the type.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if !self.base_url.starts_with('/') {
            return Err(JumpDefError::ConfigValue {
                key: "base_url",
                reason: format!("must start with '/', got {:?}", self.base_url),
            });
        }
        check_literal_segments("base_url", &self.base_url)?;
        let name = self.extension_name.trim_matches('/');
        if name.is_empty() || name.contains('/') {
            return Err(JumpDefError::ConfigValue {
                key: "extension_name",
                reason: format!("must be a single path segment, got {:?}", self.extension_name),
            });
        }
        check_literal_segments("extension_name", name)?;
        Ok(())
    }

    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e| JumpDefError::ConfigValue {
            key: "bind",
            reason: format!("{:?}: {}", self.bind, e),
        })
    }

    /// Return the configured token, generating a random one if none is set.
    ///
    /// The second value is `true` when the token was generated.
    pub fn ensure_token(&mut self) -> (String, bool) {
        match &self.token {
            Some(token) => (token.clone(), false),
            None => {
                let token = Uuid::new_v4().simple().to_string();
                self.token = Some(token.clone());
                (token, true)
            }
        }
    }
}

/// Route paths are matched by the router, so a segment must not read as a
/// capture (`:name`), a wildcard (`*rest`) or a brace pattern.
fn check_literal_segments(key: &'static str, path: &str) -> Result<()> {
    let bad = path.split('/').find(|segment| {
        segment.starts_with(':')
            || segment.starts_with('*')
            || segment.contains('{')
            || segment.contains('}')
    });
    match bad {
        Some(segment) => Err(JumpDefError::ConfigValue {
            key,
            reason: format!("segment {:?} is not a literal path segment", segment),
        }),
        None => Ok(()),
    }
}
