//! Kernel-side goto-definition: the Python code template, the typed
//! request/result schema around it, and notebook helpers.

pub mod notebook;
pub mod template;
pub mod types;

pub use notebook::{build_request, is_python_kernel, relativize_definition_path, CellKind, NotebookCell};
pub use template::{render, IntrospectionEncoding, Placeholder, PythonJediTemplate, INTROSPECTION_TEMPLATE};
pub use types::{
    parse_kernel_output, FailureKind, IntrospectionRequest, IntrospectionResult, Resolution,
    JEDI_MISSING_MESSAGE, NO_DEFINITION_MESSAGE, NO_SOURCE_FILE_MESSAGE, UNEXPECTED_ERROR_PREFIX,
};
