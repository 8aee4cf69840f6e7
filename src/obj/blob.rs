//! opaque file content. a blob's canonical payload is exactly its bytes.

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Blob {
    pub bytes: Vec<u8>,
}

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    pub fn parse(raw: &[u8]) -> Self {
        Self { bytes: raw.to_vec() }
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}
