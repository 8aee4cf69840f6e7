//! name resolution: map a user-supplied identifier to candidate hashes, then
//! collapse to a single hash with typed follow-through.

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Oid;
use crate::obj::{self, Object};
use crate::refs;
use crate::repo::Repository;

/// the expected type a `find` caller wants to peel down to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedType {
    Commit,
    Tree,
    Tag,
    Blob,
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// return every hash `name` could plausibly refer to
pub fn resolve(repo: &Repository, name: &str) -> Result<Vec<String>> {
    if name.is_empty() {
        return Ok(Vec::new());
    }

    if name == "HEAD" {
        return Ok(vec![refs::resolve(repo, "HEAD")?]);
    }

    if name.len() == 40 && is_hex(name) {
        return Ok(vec![name.to_lowercase()]);
    }

    let mut candidates = Vec::new();

    if (4..40).contains(&name.len()) && is_hex(name) {
        let lower = name.to_lowercase();
        let (prefix, rest) = lower.split_at(2);
        let dir = crate::path::repo_path(repo.metadir(), &["objects", prefix]);
        if dir.is_dir() {
            let mut names: Vec<_> = std::fs::read_dir(&dir)
                .ctx(&dir)?
                .collect::<std::io::Result<Vec<_>>>()
                .ctx(&dir)?
                .into_iter()
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .filter(|n| n.starts_with(rest))
                .collect();
            names.sort();
            candidates.extend(names.into_iter().map(|n| format!("{prefix}{n}")));
        }
    }

    for parts in [
        &["refs", "tags"][..],
        &["refs", "heads"][..],
        &["refs", "remotes"][..],
    ] {
        let mut refname_parts = parts.to_vec();
        refname_parts.push(name);
        let refname = refname_parts.join("/");
        let path = crate::path::repo_path(repo.metadir(), &refname_parts);
        if path.is_file() {
            candidates.push(refs::resolve(repo, &refname)?);
        }
    }

    Ok(candidates)
}

/// resolve `name` to exactly one hash, optionally peeling to `expected`
pub fn find(
    repo: &Repository,
    name: &str,
    expected: Option<ExpectedType>,
    follow: bool,
) -> Result<Oid> {
    let candidates = resolve(repo, name)?;

    match candidates.len() {
        0 => Err(Error::UnknownRef(name.to_string())),
        1 => {
            let oid = Oid::from_hex(&candidates[0])?;
            match expected {
                Some(expected) => peel(repo, oid, expected, follow),
                None => Ok(oid),
            }
        }
        _ => Err(Error::AmbiguousRef {
            name: name.to_string(),
            candidates,
        }),
    }
}

fn peel(repo: &Repository, oid: Oid, expected: ExpectedType, follow: bool) -> Result<Oid> {
    let object = obj::read(repo, &oid)?;

    let matches = matches!(
        (&object, expected),
        (Object::Commit(_), ExpectedType::Commit)
            | (Object::Tree(_), ExpectedType::Tree)
            | (Object::Tag(_), ExpectedType::Tag)
            | (Object::Blob(_), ExpectedType::Blob)
    );
    if matches {
        return Ok(oid);
    }

    if !follow {
        return Err(Error::UnknownRef(oid.to_hex()));
    }

    match object {
        Object::Tag(tag) => {
            let target = tag.target().ok_or_else(|| Error::UnknownRef(oid.to_hex()))?;
            peel(repo, target, expected, follow)
        }
        Object::Commit(commit) if expected == ExpectedType::Tree => {
            let tree = commit.tree().ok_or_else(|| Error::UnknownRef(oid.to_hex()))?;
            peel(repo, tree, expected, follow)
        }
        _ => Err(Error::UnknownRef(oid.to_hex())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::{Blob, Commit, Object, Tag};
    use crate::repo::Repository;
    use tempfile::tempdir;

    #[test]
    fn empty_name_yields_no_candidates() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();
        assert!(resolve(&repo, "").unwrap().is_empty());
    }

    #[test]
    fn full_hex_hash_resolves_to_itself() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();
        let hash = "a".repeat(40);
        assert_eq!(resolve(&repo, &hash).unwrap(), vec![hash]);
    }

    #[test]
    fn short_hash_prefix_is_disambiguated() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();

        let a = obj::write(Some(&repo), &Object::Blob(Blob::new(b"one".to_vec())), true).unwrap();
        let b = obj::write(Some(&repo), &Object::Blob(Blob::new(b"two".to_vec())), true).unwrap();
        let c = obj::write(Some(&repo), &Object::Blob(Blob::new(b"three".to_vec())), true).unwrap();

        for oid in [a, b, c] {
            let prefix = &oid.to_hex()[..6];
            let matches = resolve(&repo, prefix).unwrap();
            assert_eq!(matches, vec![oid.to_hex()]);
        }
    }

    #[test]
    fn branch_name_resolves_through_refs_heads() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();
        let hash = "b".repeat(40);
        std::fs::write(repo.metadir().join("refs/heads/master"), format!("{hash}\n")).unwrap();

        assert_eq!(resolve(&repo, "master").unwrap(), vec![hash]);
    }

    #[test]
    fn find_fails_ambiguous_when_a_name_is_both_branch_and_tag() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();

        std::fs::write(repo.metadir().join("refs/heads/stable"), format!("{}\n", "a".repeat(40))).unwrap();
        std::fs::write(repo.metadir().join("refs/tags/stable"), format!("{}\n", "b".repeat(40))).unwrap();

        let err = find(&repo, "stable", None, false).unwrap_err();
        assert!(matches!(err, Error::AmbiguousRef { .. }));
    }

    #[test]
    fn find_peels_tag_to_its_target() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();

        let blob = obj::write(Some(&repo), &Object::Blob(Blob::new(b"x".to_vec())), true).unwrap();
        let tag_raw = format!("object {}\ntype blob\ntag t\ntagger a <a@b> 0 +0000\n\nmsg\n", blob.to_hex());
        let tag = Tag::parse(tag_raw.as_bytes()).unwrap();
        let tag_oid = obj::write(Some(&repo), &Object::Tag(tag), true).unwrap();

        let found = find(&repo, &tag_oid.to_hex(), Some(ExpectedType::Blob), true).unwrap();
        assert_eq!(found, blob);
    }

    #[test]
    fn find_peels_commit_to_its_tree() {
        let dir = tempdir().unwrap();
        let repo = Repository::create(&dir.path().join("repo")).unwrap();

        let tree = crate::obj::Tree::default();
        let tree_oid = obj::write(Some(&repo), &Object::Tree(tree), true).unwrap();
        let commit_raw = format!(
            "tree {}\nauthor a <a@b> 0 +0000\ncommitter a <a@b> 0 +0000\n\nmsg\n",
            tree_oid.to_hex()
        );
        let commit = Commit::parse(commit_raw.as_bytes()).unwrap();
        let commit_oid = obj::write(Some(&repo), &Object::Commit(commit), true).unwrap();

        let found = find(&repo, &commit_oid.to_hex(), Some(ExpectedType::Tree), true).unwrap();
        assert_eq!(found, tree_oid);
    }
}
