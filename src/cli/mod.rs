//! CLI definitions for the `jumpdef` and `jumpdef-server` binaries.
//!
//! Commands:
//! - Template: template, render
//! - Kernel output: parse-result
//! - Server: check

pub mod check;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ServerConfig, DEFAULT_CONFIG_FILE, DEFAULT_EXTENSION_NAME};
use crate::error::Result;

#[derive(Parser)]
#[command(name = "jumpdef")]
#[command(about = "Kernel-side jump-to-definition for notebooks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the introspection template with placeholders intact
    Template,

    /// Render the introspection code for a cursor position
    Render {
        /// Notebook source file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        source: String,

        /// 1-based line
        #[arg(short, long)]
        line: u32,

        /// 0-based column
        #[arg(short, long, default_value = "0")]
        column: u32,

        /// Notebook path passed to Jedi
        #[arg(short, long)]
        path: String,
    },

    /// Parse what the kernel printed into a typed resolution
    ParseResult {
        /// Captured kernel stdout ("-" for stdin)
        #[arg(default_value = "-")]
        input: String,

        /// Path to the kernel's working directory, to relativize the result
        #[arg(long, requires = "notebook")]
        kernel_cwd: Option<String>,

        /// Notebook path, to relativize the result
        #[arg(long)]
        notebook: Option<String>,
    },

    /// Probe a running server's endpoints
    Check {
        /// Server URL including base path
        #[arg(short, long, default_value = "http://127.0.0.1:8888/")]
        url: String,

        /// Server token (default: $JUMPDEF_TOKEN)
        #[arg(short, long)]
        token: Option<String>,

        #[arg(long, default_value = DEFAULT_EXTENSION_NAME)]
        extension_name: String,
    },
}

/// Flags for `jumpdef-server`. Each one overrides the config file and the
/// environment.
#[derive(Parser, Debug)]
#[command(name = "jumpdef-server")]
#[command(about = "Serve the jump-to-definition endpoints")]
pub struct ServerArgs {
    /// Config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Listen address
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Base URL prefix
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path segment the endpoints live under
    #[arg(long)]
    pub extension_name: Option<String>,

    /// Token clients must present
    #[arg(long)]
    pub token: Option<String>,
}

impl ServerArgs {
    /// Config file, then environment, then flags.
    pub fn load_config(&self) -> Result<ServerConfig> {
        let config = ServerConfig::load(&self.config)?.with_env_overrides();
        Ok(self.overrides.apply(config))
    }
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(name) = &self.extension_name {
            config.extension_name = name.clone();
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        config
    }
}

/// Read a file, or stdin for "-".
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}
