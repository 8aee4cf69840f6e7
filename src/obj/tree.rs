//! the tree binary entry stream: `mode SP path NUL hash20`, repeated,
//! already sorted by path on disk (directories sort as if their name carried
//! a trailing slash).

use crate::error::{Error, Result};
use crate::hash::Oid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    /// ascii mode, e.g. `100644` or `40000`
    pub mode: Vec<u8>,
    /// raw path bytes; never contains NUL
    pub path: Vec<u8>,
    pub oid: Oid,
}

impl TreeEntry {
    pub fn new(mode: impl Into<Vec<u8>>, path: impl Into<Vec<u8>>, oid: Oid) -> Self {
        Self { mode: mode.into(), path: path.into(), oid }
    }

    pub fn is_directory(&self) -> bool {
        self.mode.as_slice() == b"40000"
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut pos = 0usize;

        while pos < raw.len() {
            let space = raw[pos..]
                .iter()
                .position(|&b| b == b' ')
                .map(|i| i + pos)
                .ok_or_else(|| {
                    Error::MalformedObject(None, "tree entry missing mode separator".to_string())
                })?;
            let mode = raw[pos..space].to_vec();

            let nul = raw[space + 1..]
                .iter()
                .position(|&b| b == 0)
                .map(|i| i + space + 1)
                .ok_or_else(|| {
                    Error::MalformedObject(None, "tree entry missing path terminator".to_string())
                })?;
            let path = raw[space + 1..nul].to_vec();

            if nul + 21 > raw.len() {
                return Err(Error::MalformedObject(
                    None,
                    "tree entry truncated before 20-byte hash".to_string(),
                ));
            }
            let oid = Oid::from_slice(&raw[nul + 1..nul + 21])?;

            entries.push(TreeEntry { mode, path, oid });
            pos = nul + 21;
        }

        Ok(Self { entries })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.extend_from_slice(&entry.mode);
            out.push(b' ');
            out.extend_from_slice(&entry.path);
            out.push(0);
            out.extend_from_slice(entry.oid.as_bytes());
        }
        out
    }
}
