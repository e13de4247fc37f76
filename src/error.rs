use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a merge run. Every variant aborts the run before any output is written.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("unexpected document structure in {}: missing or invalid `{segment}`", path.display())]
    StructureError { path: PathBuf, segment: String },

    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MergeError {
    /// Process exit code for this failure. `0` is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            MergeError::FileNotFound { .. } | MergeError::Read { .. } => 1,
            MergeError::ParseError { .. } | MergeError::StructureError { .. } => 2,
            MergeError::WriteError { .. } => 3,
        }
    }

    pub(crate) fn structure(path: impl Into<PathBuf>, segment: impl Into<String>) -> Self {
        MergeError::StructureError {
            path: path.into(),
            segment: segment.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_failure_class() {
        let missing = MergeError::FileNotFound { path: "a.json".into() };
        let parse = MergeError::ParseError {
            path: "a.json".into(),
            message: "EOF".into(),
        };
        let structure = MergeError::structure("a.json", "objdata");
        let write = MergeError::WriteError {
            path: "out.json".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(missing.exit_code(), 1);
        assert_eq!(parse.exit_code(), 2);
        assert_eq!(structure.exit_code(), 2);
        assert_eq!(write.exit_code(), 3);
    }

    #[test]
    fn structure_error_names_segment() {
        let e = MergeError::structure("b.json", "LocStringValues");
        assert!(e.to_string().contains("`LocStringValues`"));
        assert!(e.to_string().contains("b.json"));
    }
}
