//! Client-side glue: turning notebook state into a request, and a resolved
//! definition path back into something the notebook server can open.

use serde::{Deserialize, Serialize};

use crate::error::{JumpDefError, Result};

use super::types::IntrospectionRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Code,
    Markdown,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookCell {
    pub kind: CellKind,
    pub source: String,
}

impl NotebookCell {
    pub fn code(source: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Code,
            source: source.into(),
        }
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Markdown,
            source: source.into(),
        }
    }

    fn line_count(&self) -> Option<u32> {
        // "a\n" is two lines: the trailing empty line still separates cells.
        u32::try_from(self.source.split('\n').count()).ok()
    }
}

/// Build a request for the cursor at (`cursor_line`, `cursor_column`) in the
/// cell at `active_index`.
///
/// Only code cells contribute source. They are joined with `\n`, so the
/// absolute line is the cursor's (0-based) line plus one, plus the line count
/// of every code cell before the active one.
pub fn build_request(
    cells: &[NotebookCell],
    active_index: usize,
    cursor_line: u32,
    cursor_column: u32,
    notebook_path: &str,
) -> Result<IntrospectionRequest> {
    let active = cells.get(active_index).ok_or_else(|| {
        JumpDefError::InvalidCell(format!(
            "active cell {} out of range ({} cells)",
            active_index,
            cells.len()
        ))
    })?;
    if active.kind != CellKind::Code {
        return Err(JumpDefError::InvalidCell(format!(
            "active cell {} is not a code cell",
            active_index
        )));
    }

    let source = cells
        .iter()
        .filter(|c| c.kind == CellKind::Code)
        .map(|c| c.source.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let preceding = cells[..active_index]
        .iter()
        .filter(|c| c.kind == CellKind::Code)
        .try_fold(0u32, |total, cell| total.checked_add(cell.line_count()?))
        .ok_or_else(|| {
            JumpDefError::InvalidCell(format!(
                "code cells before cell {} exceed {} lines",
                active_index,
                u32::MAX
            ))
        })?;

    let line = cursor_line
        .checked_add(1)
        .and_then(|line| line.checked_add(preceding))
        .ok_or(JumpDefError::InvalidPosition { line: u32::MAX })?;

    Ok(IntrospectionRequest::new(
        source,
        line,
        cursor_column,
        notebook_path,
    ))
}

/// Map an absolute definition path to one relative to the notebook server
/// root.
///
/// The server root is the kernel's working directory with the notebook's own
/// directory stripped off its end. Paths outside the root come back unchanged;
/// the root only matches whole path components.
pub fn relativize_definition_path(file: &str, kernel_cwd: &str, notebook_path: &str) -> String {
    let notebook_dir = notebook_path
        .rfind('/')
        .map(|idx| &notebook_path[..idx])
        .unwrap_or("");

    let server_root = kernel_cwd
        .strip_suffix(notebook_dir)
        .filter(|_| !notebook_dir.is_empty())
        .unwrap_or(kernel_cwd);

    let rest = file
        .strip_prefix(server_root)
        .filter(|rest| rest.is_empty() || rest.starts_with('/') || server_root.ends_with('/'));
    match rest {
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest).to_string(),
        None => file.to_string(),
    }
}

/// Whether a kernel, by its display name, can run the Python template.
pub fn is_python_kernel(display_name: &str) -> bool {
    display_name == "Python 3 (ipykernel)" || display_name.contains("Python")
}
