//! jumpdef CLI — work with the introspection template outside a browser.
//!
//! Usage:
//!   jumpdef template                              # Print the raw template
//!   jumpdef render -l 3 -c 4 -p nb.ipynb < src.py # Render for a cursor position
//!   jumpdef parse-result out.txt                  # Parse captured kernel stdout
//!   jumpdef check -u http://host:8888/ -t TOKEN   # Probe a running server

use anyhow::{Context, Result};
use clap::Parser;

use jumpdef::cli::{check::check_server, read_input, Cli, Commands};
use jumpdef::introspection::{
    parse_kernel_output, relativize_definition_path, IntrospectionEncoding, IntrospectionRequest,
    PythonJediTemplate, Resolution,
};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Template => {
            print!("{}", PythonJediTemplate.template());
        }

        Commands::Render {
            source,
            line,
            column,
            path,
        } => {
            let text = read_input(&source).with_context(|| format!("reading {}", source))?;
            let request = IntrospectionRequest::new(text, line, column, path);
            let code = PythonJediTemplate.encode(&request)?;
            print!("{}", code);
        }

        Commands::ParseResult {
            input,
            kernel_cwd,
            notebook,
        } => {
            let stdout = read_input(&input).with_context(|| format!("reading {}", input))?;
            let mut resolution = parse_kernel_output(&stdout)?.into_resolution()?;

            if let (Some(cwd), Some(notebook), Resolution::Definition { file, .. }) =
                (&kernel_cwd, &notebook, &mut resolution)
            {
                *file = relativize_definition_path(file.as_str(), cwd, notebook);
            }

            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }

        Commands::Check {
            url,
            token,
            extension_name,
        } => {
            let token = token
                .or_else(|| std::env::var("JUMPDEF_TOKEN").ok())
                .context("no token given (use --token or JUMPDEF_TOKEN)")?;
            let report = check_server(&url, &extension_name, &token)?;
            println!("✓ hello: {}", report.greeting);
            println!("✓ introspection-code: {} bytes, all placeholders present", report.template_len);
        }
    }

    Ok(())
}
