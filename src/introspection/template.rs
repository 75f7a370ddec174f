//! The Python introspection code run inside the kernel, and its rendering.
//!
//! The template resolves a goto-definition query with Jedi against the
//! kernel's own `sys.path`, so definitions are found in whatever environment
//! the notebook actually runs in. It always ends by printing exactly one
//! [`IntrospectionResult`](super::IntrospectionResult) JSON object to stdout;
//! progress and tracebacks go to stderr.

use crate::error::Result;

use super::types::IntrospectionRequest;

/// Python source with the four [`Placeholder`] tokens left in.
pub const INTROSPECTION_TEMPLATE: &str = r#"
import sys
import json

_result = {'file': None, 'line': None, 'error': None}

try:
    try:
        import jedi
    except ImportError:
        _result['error'] = 'Jedi not installed in kernel environment. Install with: pip install jedi'
        raise SystemExit

    _notebook_source = __NOTEBOOK_SOURCE__
    _cursor_line = __CURSOR_LINE__
    _cursor_column = __CURSOR_COLUMN__
    _notebook_path = __NOTEBOOK_PATH__

    print(f'[Jedi] Analyzing at line {_cursor_line}, column {_cursor_column}', file=sys.stderr)
    print(f'[Jedi] Notebook source length: {len(_notebook_source)} chars', file=sys.stderr)
    print(f'[Jedi] Kernel sys.path has {len(sys.path)} entries', file=sys.stderr)

    _project = jedi.Project(path=_notebook_path, sys_path=sys.path)
    _script = jedi.Script(code=_notebook_source, path=_notebook_path, project=_project)

    _definitions = _script.goto(
        line=_cursor_line,
        column=_cursor_column,
        follow_imports=True,
        follow_builtin_imports=True
    )

    print(f'[Jedi] Found {len(_definitions)} definition(s)', file=sys.stderr)

    if _definitions:
        _defn = _definitions[0]
        print(f'[Jedi] Definition: {_defn.name} at {_defn.module_path}:{_defn.line}', file=sys.stderr)

        if _defn.module_path:
            _result['file'] = str(_defn.module_path)
            _result['line'] = _defn.line if _defn.line else 1
        else:
            _result['error'] = 'Definition found but no source file available (builtin or compiled module)'
    else:
        _result['error'] = 'No definition found'

except SystemExit:
    pass
except Exception as _e:
    import traceback
    _result['error'] = f'Jedi error: {str(_e)}'
    print(f'[Jedi] Exception: {traceback.format_exc()}', file=sys.stderr)

print(json.dumps(_result))
"#;

/// A substitution point in [`INTROSPECTION_TEMPLATE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    NotebookSource,
    CursorLine,
    CursorColumn,
    NotebookPath,
}

impl Placeholder {
    pub const ALL: [Placeholder; 4] = [
        Placeholder::NotebookSource,
        Placeholder::CursorLine,
        Placeholder::CursorColumn,
        Placeholder::NotebookPath,
    ];

    /// The literal marker in the template.
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::NotebookSource => "__NOTEBOOK_SOURCE__",
            Placeholder::CursorLine => "__CURSOR_LINE__",
            Placeholder::CursorColumn => "__CURSOR_COLUMN__",
            Placeholder::NotebookPath => "__NOTEBOOK_PATH__",
        }
    }

    /// Python literal for this placeholder's value in `request`.
    ///
    /// Strings are written as JSON string literals, which Python accepts.
    fn literal(&self, request: &IntrospectionRequest) -> Result<String> {
        Ok(match self {
            Placeholder::NotebookSource => serde_json::to_string(&request.source)?,
            Placeholder::CursorLine => request.line.to_string(),
            Placeholder::CursorColumn => request.column.to_string(),
            Placeholder::NotebookPath => serde_json::to_string(&request.path)?,
        })
    }
}

/// Substitute every placeholder in `template` with values from `request`.
///
/// Single pass: substituted text is never scanned again, so a notebook that
/// itself contains `__CURSOR_LINE__` comes through untouched.
pub fn render(template: &str, request: &IntrospectionRequest) -> Result<String> {
    request.validate()?;

    let mut out = String::with_capacity(template.len() + request.source.len() + request.path.len());
    let mut rest = template;

    while let Some(idx) = rest.find("__") {
        let (head, tail) = rest.split_at(idx);
        out.push_str(head);
        match Placeholder::ALL.iter().find(|p| tail.starts_with(p.token())) {
            Some(placeholder) => {
                out.push_str(&placeholder.literal(request)?);
                rest = &tail[placeholder.token().len()..];
            }
            None => {
                out.push('_');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    Ok(out)
}

/// Turns an [`IntrospectionRequest`] into code a kernel can execute.
///
/// The textual template is one encoding; the HTTP layer only sees this trait.
pub trait IntrospectionEncoding: Send + Sync {
    /// Short identifier, used in logs.
    fn name(&self) -> &'static str;

    /// The code with placeholders left in, for clients that substitute
    /// themselves.
    fn template(&self) -> &str;

    /// The code with the request's values filled in.
    fn encode(&self, request: &IntrospectionRequest) -> Result<String> {
        render(self.template(), request)
    }
}

/// Jedi-based goto for Python kernels.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonJediTemplate;

impl IntrospectionEncoding for PythonJediTemplate {
    fn name(&self) -> &'static str {
        "python-jedi"
    }

    fn template(&self) -> &str {
        INTROSPECTION_TEMPLATE
    }
}
