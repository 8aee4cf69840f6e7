//! tree materialization: writes a tree's blob and subtree entries into a
//! target directory.

use std::path::Path;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Oid;
use crate::obj::{self, Tree};
use crate::repo::Repository;

/// checkout `tree` into `target`, which must not already contain anything
pub fn checkout(repo: &Repository, tree: &Tree, target: &Path) -> Result<()> {
    if target.exists() {
        if !target.is_dir() {
            return Err(Error::NotADirectory(target.to_path_buf()));
        }
        let mut entries = std::fs::read_dir(target).ctx(target)?;
        if entries.next().is_some() {
            return Err(Error::NotEmpty(target.to_path_buf()));
        }
    } else {
        std::fs::create_dir_all(target).ctx(target)?;
    }

    materialize(repo, tree, target)
}

fn materialize(repo: &Repository, tree: &Tree, target: &Path) -> Result<()> {
    for entry in &tree.entries {
        let path = target.join(String::from_utf8_lossy(&entry.path).as_ref());

        if entry.is_directory() {
            std::fs::create_dir_all(&path).ctx(&path)?;
            let subtree = read_subtree(repo, &entry.oid)?;
            materialize(repo, &subtree, &path)?;
        } else {
            let blob = obj::read(repo, &entry.oid)?;
            let blob = blob.as_blob().ok_or_else(|| {
                Error::MalformedObject(Some(entry.oid), "tree entry mode is a file but target is not a blob".to_string())
            })?;
            std::fs::write(&path, &blob.bytes).ctx(&path)?;
        }
    }
    Ok(())
}

fn read_subtree(repo: &Repository, oid: &Oid) -> Result<Tree> {
    let object = obj::read(repo, oid)?;
    object
        .as_tree()
        .cloned()
        .ok_or_else(|| Error::MalformedObject(Some(*oid), "tree entry mode is a directory but target is not a tree".to_string()))
}
