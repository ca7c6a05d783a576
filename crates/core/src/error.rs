use std::fmt;

/// Everything that can go wrong between receiving an upload and having a
/// normalized node ready for the viewport. None of these are fatal to the
/// session; a later load can recover it.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    UnsupportedFormat(String),
    Parse(String),
    EmptyGeometry,
    DegenerateGeometry,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnsupportedFormat(ext) => {
                write!(f, "unsupported model format: {ext}")
            }
            ImportError::Parse(detail) => write!(f, "failed to parse model: {detail}"),
            ImportError::EmptyGeometry => write!(f, "model contains no vertices"),
            ImportError::DegenerateGeometry => {
                write!(f, "model has zero extent and cannot be framed")
            }
        }
    }
}

impl std::error::Error for ImportError {}
