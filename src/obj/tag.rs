use crate::error::Result;
use crate::hash::Oid;
use crate::kvlm::{self, Kvlm};

/// a tag: a key-value-list-with-message naming a target object and its
/// type. shares `Kvlm`'s shape with `Commit` but is a distinct, parallel
/// type — distinguished by the object type tag, not by inheritance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub kvlm: Kvlm,
}

impl Tag {
    pub fn parse(raw: &[u8]) -> Result<Self> {
        Ok(Self { kvlm: kvlm::parse(raw)? })
    }

    pub fn serialize(&self) -> Vec<u8> {
        kvlm::serialize(&self.kvlm)
    }

    /// the `object` header: the hash this tag points at
    pub fn target(&self) -> Option<Oid> {
        let values = self.kvlm.get(&Some(b"object".to_vec()))?;
        let value = values.first()?;
        Oid::from_hex(std::str::from_utf8(value).ok()?).ok()
    }

    /// the `type` header: the type of the target object
    pub fn target_type(&self) -> Option<&[u8]> {
        self.kvlm
            .get(&Some(b"type".to_vec()))
            .and_then(|v| v.first())
            .map(|v| v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_and_type_headers() {
        let raw = format!(
            "object {}\ntype commit\ntag v1.0\ntagger a <a@example.com> 0 +0000\n\nrelease\n",
            "d".repeat(40)
        )
        .into_bytes();

        let tag = Tag::parse(&raw).unwrap();
        assert_eq!(tag.target().unwrap().to_hex(), "d".repeat(40));
        assert_eq!(tag.target_type(), Some(b"commit".as_slice()));
        assert_eq!(tag.serialize(), raw);
    }
}
