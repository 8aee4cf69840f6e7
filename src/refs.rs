//! the reference namespace: textual pointer files under `refs/` and `HEAD`,
//! with recursive `ref: ` indirection.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, IoResultExt, Result};
use crate::repo::Repository;

const MAX_INDIRECTION: usize = 10;

/// a leaf (resolved hash) or an internal node mirroring a refs subdirectory
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefTree {
    Leaf(String),
    Node(BTreeMap<String, RefTree>),
}

/// read `metadir/refname`, following `ref: ` indirection up to a depth bound
pub fn resolve(repo: &Repository, refname: &str) -> Result<String> {
    resolve_at(repo, refname, 0)
}

fn resolve_at(repo: &Repository, refname: &str, depth: usize) -> Result<String> {
    if depth >= MAX_INDIRECTION {
        return Err(Error::RefCycle(refname.to_string()));
    }

    let path = repo.metadir().join(refname);
    log::trace!("resolving ref {refname} at {}", path.display());
    let contents = std::fs::read_to_string(&path).ctx(&path)?;
    let contents = contents.strip_suffix('\n').unwrap_or(&contents);

    match contents.strip_prefix("ref: ") {
        Some(target) => {
            log::debug!("ref {refname} points to {target}");
            resolve_at(repo, target, depth + 1)
        }
        None => Ok(contents.to_string()),
    }
}

/// walk `metadir/refs/` in sorted order, resolving every leaf
pub fn list(repo: &Repository) -> Result<BTreeMap<String, RefTree>> {
    list_dir(repo, &repo.metadir().join("refs"), "refs")
}

fn list_dir(repo: &Repository, dir: &Path, prefix: &str) -> Result<BTreeMap<String, RefTree>> {
    let mut out = BTreeMap::new();
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .ctx(dir)?
        .collect::<std::io::Result<Vec<_>>>()
        .ctx(dir)?;
    names.sort_by_key(|e| e.file_name());

    for entry in names {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        let refname = format!("{prefix}/{name}");

        let node = if path.is_dir() {
            RefTree::Node(list_dir(repo, &path, &refname)?)
        } else {
            RefTree::Leaf(resolve(repo, &refname)?)
        };
        out.insert(name, node);
    }

    Ok(out)
}
