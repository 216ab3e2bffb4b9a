use std::path::{Path, PathBuf};

/// Errors produced while locating, reading or rewriting labeled archives.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path is missing or cannot be read.
    #[error("cannot access {}: {source}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive is not a readable zip file, or uses features we don't support.
    #[error("invalid archive: {0}")]
    ArchiveFormat(String),

    /// An archive entry would be written outside the extraction directory.
    #[error("illegal file path in archive: {0}")]
    ArchiveTraversal(String),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The label metadata document could not be parsed.
    #[error("malformed label document: {0}")]
    XmlDecode(String),
}

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn path(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Path {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        Error::ArchiveFormat(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
