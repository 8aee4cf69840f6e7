//! depth-first walk over the commit parent relation.

use std::collections::HashSet;

use crate::error::Result;
use crate::hash::Oid;
use crate::obj;
use crate::repo::Repository;

/// one `(commit, parent)` edge in the ancestor graph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub commit: Oid,
    pub parent: Oid,
}

/// walk the commit-parent relation from `start`, visiting each commit once
/// and emitting exactly one edge per `(commit, parent)` pair
pub fn log(repo: &Repository, start: Oid) -> Result<Vec<Edge>> {
    let mut edges = Vec::new();
    let mut visited = HashSet::new();
    walk(repo, start, &mut visited, &mut edges)?;
    Ok(edges)
}

fn walk(repo: &Repository, commit: Oid, visited: &mut HashSet<Oid>, edges: &mut Vec<Edge>) -> Result<()> {
    if !visited.insert(commit) {
        return Ok(());
    }

    let object = obj::read(repo, &commit)?;
    let Some(commit_obj) = object.as_commit() else {
        return Ok(());
    };

    for parent in commit_obj.parents() {
        edges.push(Edge { commit, parent });
        walk(repo, parent, visited, edges)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::{Commit, Object};
    use crate::repo::Repository;
    use tempfile::tempdir;

    fn commit(repo: &Repository, parents: &[Oid], message: &str) -> Oid {
        let mut raw = format!("tree {}\n", "a".repeat(40));
        for parent in parents {
            raw.push_str(&format!("parent {}\n", parent.to_hex()));
        }
        raw.push_str(&format!("author a <a@b> 0 +0000\ncommitter a <a@b> 0 +0000\n\n{message}\n"));
        let c = Commit::parse(raw.as_bytes()).unwrap();
        obj::write(Some(repo), &Object::Commit(c), true).unwrap()
    }

    #[test]
    fn linear_history_emits_one_edge_per_link() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();

        let root = commit(&repo, &[], "root");
        let second = commit(&repo, &[root], "second");
        let third = commit(&repo, &[second], "third");

        let edges = log(&repo, third).unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges.contains(&Edge { commit: third, parent: second }));
        assert!(edges.contains(&Edge { commit: second, parent: root }));
    }

    #[test]
    fn merge_commit_visits_both_parents() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();

        let base = commit(&repo, &[], "base");
        let left = commit(&repo, &[base], "left");
        let right = commit(&repo, &[base], "right");
        let merge = commit(&repo, &[left, right], "merge");

        let edges = log(&repo, merge).unwrap();
        // merge->left, merge->right, left->base, right->base: base is shared
        // but each (commit, parent) pair still only appears once.
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn diamond_history_visits_shared_ancestor_once() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();

        let base = commit(&repo, &[], "base");
        let left = commit(&repo, &[base], "left");
        let right = commit(&repo, &[base], "right");
        let merge = commit(&repo, &[left, right], "merge");

        let mut visited = HashSet::new();
        let mut edges = Vec::new();
        walk(&repo, merge, &mut visited, &mut edges).unwrap();
        assert_eq!(visited.len(), 4);
    }
}
