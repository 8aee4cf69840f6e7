//! path helpers rooted at a repository's metadata directory
//!
//! mirrors the reference tool's `repo_path`/`repo_dir`/`repo_file` trio:
//! every path below `.git` is computed relative to it, and directories are
//! created lazily only when the caller says so.

use std::path::{Path, PathBuf};

use crate::error::{Error, IoResultExt, Result};

/// pure join of path segments under `metadir`
pub fn repo_path(metadir: &Path, parts: &[&str]) -> PathBuf {
    let mut p = metadir.to_path_buf();
    for part in parts {
        p.push(part);
    }
    p
}

/// returns the existing directory at `parts`, creating it (and parents) if
/// `mkdir` is set and it is absent; fails `NotADirectory` if present but not
/// a directory
pub fn repo_dir(metadir: &Path, parts: &[&str], mkdir: bool) -> Result<Option<PathBuf>> {
    let path = repo_path(metadir, parts);
    if path.exists() {
        if path.is_dir() {
            return Ok(Some(path));
        }
        return Err(Error::NotADirectory(path));
    }

    if mkdir {
        std::fs::create_dir_all(&path).ctx(&path)?;
        Ok(Some(path))
    } else {
        Ok(None)
    }
}

/// returns the path to a file at `parts`, ensuring its parent directory
/// exists (respecting `mkdir`); never creates the file itself
pub fn repo_file(metadir: &Path, parts: &[&str], mkdir: bool) -> Result<PathBuf> {
    let (dirname, _) = parts.split_at(parts.len() - 1);
    repo_dir(metadir, dirname, mkdir)?;
    Ok(repo_path(metadir, parts))
}
