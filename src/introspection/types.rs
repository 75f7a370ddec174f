//! Request and result types exchanged with the kernel-side introspection code.

use serde::{Deserialize, Serialize};

use crate::error::{JumpDefError, Result};

/// Emitted when `import jedi` fails inside the kernel.
pub const JEDI_MISSING_MESSAGE: &str =
    "Jedi not installed in kernel environment. Install with: pip install jedi";

/// Emitted when goto returns no candidates.
pub const NO_DEFINITION_MESSAGE: &str = "No definition found";

/// Emitted when the first candidate has no module path.
pub const NO_SOURCE_FILE_MESSAGE: &str =
    "Definition found but no source file available (builtin or compiled module)";

/// Prefix of the message for any other exception raised during resolution.
pub const UNEXPECTED_ERROR_PREFIX: &str = "Jedi error: ";

/// A goto-definition query: where the cursor is, and in what source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionRequest {
    /// Concatenated source of the notebook's code cells.
    pub source: String,
    /// 1-based line within `source`.
    pub line: u32,
    /// 0-based column.
    pub column: u32,
    /// Notebook path, used by Jedi as the script path.
    pub path: String,
}

impl IntrospectionRequest {
    pub fn new(source: impl Into<String>, line: u32, column: u32, path: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            line,
            column,
            path: path.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.line == 0 {
            return Err(JumpDefError::InvalidPosition { line: self.line });
        }
        Ok(())
    }
}

/// The JSON object the introspection code prints on stdout.
///
/// Either `file` (with `line`) or `error` is set once the code has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionResult {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub error: Option<String>,
}

impl IntrospectionResult {
    pub fn definition(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            file: None,
            line: None,
            error: Some(message.into()),
        }
    }

    /// Convert into the typed outcome.
    ///
    /// A definition without a line resolves to line 1.
    pub fn into_resolution(self) -> Result<Resolution> {
        match (self.file, self.error) {
            (Some(file), Some(error)) => Err(JumpDefError::InconsistentResult { file, error }),
            (Some(file), None) => Ok(Resolution::Definition {
                file,
                line: self.line.filter(|l| *l > 0).unwrap_or(1),
            }),
            (None, Some(message)) => Ok(Resolution::Failed {
                kind: FailureKind::classify(&message),
                message,
            }),
            (None, None) => Err(JumpDefError::IncompleteResult),
        }
    }
}

/// Why the kernel could not produce a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Jedi is not importable in the kernel.
    MissingDependency,
    /// Goto returned zero candidates.
    NoDefinition,
    /// A candidate exists but maps to no file (builtin or compiled).
    NoSourceFile,
    /// Anything else.
    Unexpected,
}

impl FailureKind {
    pub fn classify(message: &str) -> Self {
        match message {
            JEDI_MISSING_MESSAGE => FailureKind::MissingDependency,
            NO_DEFINITION_MESSAGE => FailureKind::NoDefinition,
            NO_SOURCE_FILE_MESSAGE => FailureKind::NoSourceFile,
            _ => FailureKind::Unexpected,
        }
    }
}

/// Typed outcome of a goto-definition query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Definition { file: String, line: u32 },
    Failed { kind: FailureKind, message: String },
}

impl From<Resolution> for IntrospectionResult {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Definition { file, line } => IntrospectionResult::definition(file, line),
            Resolution::Failed { message, .. } => IntrospectionResult::error(message),
        }
    }
}

/// Parse what the kernel wrote to stdout into a result.
///
/// The whole (trimmed) output is tried first, then each non-empty line from
/// the end, so output printed by earlier user code is skipped.
pub fn parse_kernel_output(stdout: &str) -> Result<IntrospectionResult> {
    let trimmed = stdout.trim();
    if let Ok(result) = serde_json::from_str(trimmed) {
        return Ok(result);
    }
    trimmed
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .find_map(|line| serde_json::from_str(line).ok())
        .ok_or_else(|| JumpDefError::KernelOutput(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_definition() {
        let result =
            parse_kernel_output("{\"file\": \"/work/nb.ipynb\", \"line\": 1, \"error\": null}\n")
                .unwrap();
        assert_eq!(result, IntrospectionResult::definition("/work/nb.ipynb", 1));
        assert_eq!(
            result.into_resolution().unwrap(),
            Resolution::Definition {
                file: "/work/nb.ipynb".into(),
                line: 1
            }
        );
    }

    #[test]
    fn test_parse_skips_earlier_output() {
        let stdout = "hello from a cell\n42\n{\"file\": null, \"line\": null, \"error\": \"No definition found\"}\n";
        let result = parse_kernel_output(stdout).unwrap();
        assert_eq!(result.error.as_deref(), Some(NO_DEFINITION_MESSAGE));
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_kernel_output("Traceback (most recent call last):\n  oops").unwrap_err();
        assert!(matches!(err, JumpDefError::KernelOutput(_)));
        assert!(parse_kernel_output("").is_err());
    }

    #[test]
    fn test_classify_failures() {
        let cases = [
            (JEDI_MISSING_MESSAGE, FailureKind::MissingDependency),
            (NO_DEFINITION_MESSAGE, FailureKind::NoDefinition),
            (NO_SOURCE_FILE_MESSAGE, FailureKind::NoSourceFile),
            ("Jedi error: boom", FailureKind::Unexpected),
        ];
        for (message, kind) in cases {
            let resolution = IntrospectionResult::error(message).into_resolution().unwrap();
            assert_eq!(
                resolution,
                Resolution::Failed {
                    kind,
                    message: message.to_string()
                }
            );
        }
    }

    #[test]
    fn test_builtin_symbol_result() {
        let stdout = format!(
            "{{\"file\": null, \"line\": null, \"error\": \"{}\"}}",
            NO_SOURCE_FILE_MESSAGE
        );
        let result = parse_kernel_output(&stdout).unwrap();
        assert!(result.file.is_none());
        match result.into_resolution().unwrap() {
            Resolution::Failed { kind, message } => {
                assert_eq!(kind, FailureKind::NoSourceFile);
                assert!(message.contains("no source file"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_line_defaults_to_one() {
        let result = IntrospectionResult {
            file: Some("/lib/mod.py".into()),
            line: None,
            error: None,
        };
        assert_eq!(
            result.into_resolution().unwrap(),
            Resolution::Definition {
                file: "/lib/mod.py".into(),
                line: 1
            }
        );
    }

    #[test]
    fn test_inconsistent_and_incomplete() {
        let both = IntrospectionResult {
            file: Some("a.py".into()),
            line: Some(3),
            error: Some("x".into()),
        };
        assert!(matches!(
            both.into_resolution(),
            Err(JumpDefError::InconsistentResult { .. })
        ));
        assert!(matches!(
            IntrospectionResult::default().into_resolution(),
            Err(JumpDefError::IncompleteResult)
        ));
    }

    #[test]
    fn test_result_serializes_nulls() {
        let json = serde_json::to_value(IntrospectionResult::error(NO_DEFINITION_MESSAGE)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"file": null, "line": null, "error": "No definition found"})
        );
    }

    #[test]
    fn test_request_validation() {
        assert!(IntrospectionRequest::new("x = 1", 1, 0, "nb.ipynb").validate().is_ok());
        assert!(matches!(
            IntrospectionRequest::new("x = 1", 0, 0, "nb.ipynb").validate(),
            Err(JumpDefError::InvalidPosition { line: 0 })
        ));
    }
}
