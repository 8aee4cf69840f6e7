use std::path::{Path, PathBuf};

use crate::hash::Oid;

pub type Result<T> = std::result::Result<T, Error>;

/// every way a core operation can fail
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("unsupported repositoryformatversion {0}")]
    UnsupportedFormat(String),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("{0} is not empty")]
    NotEmpty(PathBuf),

    #[error("malformed object {0:?}: {1}")]
    MalformedObject(Option<Oid>, String),

    #[error("unknown object type {0:?}")]
    UnknownType(Vec<u8>),

    #[error("no such reference {0}")]
    UnknownRef(String),

    #[error("ambiguous reference {name}: candidates are {candidates:?}")]
    AmbiguousRef { name: String, candidates: Vec<String> },

    #[error("reference indirection exceeded depth bound resolving {0}")]
    RefCycle(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),
}

/// attaches the path under operation to a bare io::Result at the call site
pub trait IoResultExt<T> {
    fn ctx(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn ctx(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}
