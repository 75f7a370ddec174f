//! # jumpdef
//!
//! Jump-to-definition for notebooks, resolved in the kernel's environment.
//!
//! The notebook server usually lives in a different environment than the
//! kernel, so static analysis run server-side can't see the packages the
//! notebook imports. jumpdef instead hands the client a small piece of Python
//! that runs Jedi *inside the kernel* and prints one JSON result.
//!
//! ## Pieces
//!
//! - **HTTP server** ([`http`]): `hello` and `introspection-code` endpoints
//!   behind token authentication.
//! - **Introspection** ([`introspection`]): the Python template, a single-pass
//!   renderer, the typed request/result schema, and notebook helpers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jumpdef::introspection::{
//!     build_request, parse_kernel_output, IntrospectionEncoding, NotebookCell, PythonJediTemplate,
//! };
//!
//! let cells = vec![NotebookCell::code("def foo(): pass\nfoo()")];
//! let request = build_request(&cells, 0, 1, 0, "nb.ipynb")?;
//! let code = PythonJediTemplate.encode(&request)?;
//! // ... execute `code` in the kernel, collect its stdout ...
//! # let stdout = String::new();
//! let resolution = parse_kernel_output(&stdout)?.into_resolution()?;
//! # Ok::<(), jumpdef::JumpDefError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod introspection;

// Re-exports for convenience
pub use config::ServerConfig;
pub use error::{JumpDefError, Result};
pub use introspection::{
    IntrospectionEncoding, IntrospectionRequest, IntrospectionResult, PythonJediTemplate,
    Resolution,
};

#[cfg(test)]
mod tests {
    use super::*;
    use introspection::*;

    #[test]
    fn test_notebook_to_resolution() {
        let cells = vec![
            NotebookCell::code("import numpy as np"),
            NotebookCell::markdown("## Helpers"),
            NotebookCell::code("def foo():\n    pass"),
            NotebookCell::code("foo()"),
        ];
        let request = build_request(&cells, 3, 0, 1, "analysis/nb.ipynb").unwrap();
        assert_eq!(request.line, 4);

        let code = PythonJediTemplate.encode(&request).unwrap();
        assert!(code.contains("_cursor_line = 4\n"));
        assert!(code.contains("_notebook_path = \"analysis/nb.ipynb\""));

        // What the kernel prints when Jedi lands on `def foo` in the notebook.
        let stdout = "[cell output]\n{\"file\": \"/srv/lab/analysis/nb.ipynb\", \"line\": 2, \"error\": null}\n";
        let resolution = parse_kernel_output(stdout)
            .unwrap()
            .into_resolution()
            .unwrap();

        let Resolution::Definition { file, line } = resolution else {
            panic!("expected a definition");
        };
        assert_eq!(line, 2);
        assert_eq!(
            relativize_definition_path(&file, "/srv/lab/analysis", &request.path),
            "analysis/nb.ipynb"
        );
    }

    #[test]
    fn test_missing_jedi_roundtrip() {
        let stdout = serde_json::to_string(&IntrospectionResult::error(JEDI_MISSING_MESSAGE)).unwrap();
        let resolution = parse_kernel_output(&stdout)
            .unwrap()
            .into_resolution()
            .unwrap();
        assert_eq!(
            resolution,
            Resolution::Failed {
                kind: FailureKind::MissingDependency,
                message: JEDI_MISSING_MESSAGE.to_string(),
            }
        );
        assert_eq!(
            IntrospectionResult::from(resolution),
            IntrospectionResult::error(JEDI_MISSING_MESSAGE)
        );
    }
}
