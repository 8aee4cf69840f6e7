use crate::error::Result;
use crate::hash::Oid;
use crate::kvlm::{self, Kvlm};

/// a commit: a key-value-list-with-message naming a root tree, zero or more
/// parents, authorship, and a message. structurally identical to `Tag` but
/// kept as a separate type — they are parallel variants, not one a subtype
/// of the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    pub kvlm: Kvlm,
}

impl Commit {
    pub fn parse(raw: &[u8]) -> Result<Self> {
        Ok(Self { kvlm: kvlm::parse(raw)? })
    }

    pub fn serialize(&self) -> Vec<u8> {
        kvlm::serialize(&self.kvlm)
    }

    /// the `tree` header, if present and well-formed
    pub fn tree(&self) -> Option<Oid> {
        self.header_oid(b"tree")
    }

    /// all `parent` headers in order
    pub fn parents(&self) -> Vec<Oid> {
        self.kvlm
            .get(&Some(b"parent".to_vec()))
            .into_iter()
            .flatten()
            .filter_map(|v| std::str::from_utf8(v).ok().and_then(|s| Oid::from_hex(s).ok()))
            .collect()
    }

    fn header_oid(&self, key: &[u8]) -> Option<Oid> {
        let values = self.kvlm.get(&Some(key.to_vec()))?;
        let value = values.first()?;
        let s = std::str::from_utf8(value).ok()?;
        Oid::from_hex(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> Vec<u8> {
        format!(
            "tree {}\nparent {}\nauthor a <a@example.com> 0 +0000\ncommitter a <a@example.com> 0 +0000\n\nmessage\n",
            "a".repeat(40),
            "b".repeat(40)
        )
        .into_bytes()
    }

    #[test]
    fn parses_tree_and_parents() {
        let commit = Commit::parse(&sample_raw()).unwrap();
        assert_eq!(commit.tree().unwrap().to_hex(), "a".repeat(40));
        assert_eq!(commit.parents().len(), 1);
        assert_eq!(commit.parents()[0].to_hex(), "b".repeat(40));
    }

    #[test]
    fn roundtrips_byte_identical() {
        let raw = sample_raw();
        let commit = Commit::parse(&raw).unwrap();
        assert_eq!(commit.serialize(), raw);
    }

    #[test]
    fn root_commit_has_no_parents() {
        let raw = format!("tree {}\n\nroot\n", "c".repeat(40)).into_bytes();
        let commit = Commit::parse(&raw).unwrap();
        assert!(commit.parents().is_empty());
    }

    #[test]
    fn merge_commit_has_multiple_parents() {
        let raw = format!(
            "tree {}\nparent {}\nparent {}\n\nmerge\n",
            "a".repeat(40),
            "b".repeat(40),
            "c".repeat(40)
        )
        .into_bytes();
        let commit = Commit::parse(&raw).unwrap();
        assert_eq!(commit.parents().len(), 2);
    }
}
