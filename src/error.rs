//! Error types.
//!
//! Contract violations on math types (bad element counts, bad indices through
//! the fallible accessors) surface as [`MathError`]. Mesh/material loading
//! reports [`LoadError`]. The application layer wraps both in [`EngineError`].
//!
//! Numeric degeneracy (zero-length normals, `w == 0`) is never an error: the
//! pipeline resolves it by policy and drops the affected geometry.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from vector, matrix and polygon construction or element access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("expected {expected} elements, got {actual}")]
    ElementCount { expected: usize, actual: usize },
}

/// Errors that can occur while loading a model or material library.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a .obj file")]
    UnsupportedExtension { path: PathBuf },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: face index {index} does not refer to a loaded element")]
    InvalidIndex { line: usize, index: i64 },

    #[error("failed to load material library {path}: {source}")]
    Material {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
}

impl LoadError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Top-level errors for the windowed application.
#[derive(Debug, Error)]
pub enum EngineError {
    /// SDL reports failures as strings.
    #[error("window error: {0}")]
    Window(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

impl From<String> for EngineError {
    fn from(message: String) -> Self {
        Self::Window(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::IndexOutOfRange { index: 3, len: 3 };
        assert!(format!("{err}").contains("out of range"));

        let err = MathError::ElementCount {
            expected: 16,
            actual: 9,
        };
        assert_eq!(format!("{err}"), "expected 16 elements, got 9");

        let err = LoadError::parse(7, "bad float");
        assert_eq!(format!("{err}"), "line 7: bad float");
    }

    #[test]
    fn window_errors_convert_from_strings() {
        let err: EngineError = String::from("no display").into();
        assert!(matches!(err, EngineError::Window(ref m) if m == "no display"));
    }
}
