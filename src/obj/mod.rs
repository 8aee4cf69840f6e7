//! the object codec: the length-prefixed, type-tagged, zlib-framed on-disk
//! format, and the four typed variants it deserializes into.

pub mod blob;
pub mod commit;
pub mod tag;
pub mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use tag::Tag;
pub use tree::{Tree, TreeEntry};

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::{sha1, Oid};
use crate::repo::Repository;

/// one of the four object variants
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    pub fn type_tag(&self) -> &'static [u8] {
        match self {
            Object::Blob(_) => b"blob",
            Object::Tree(_) => b"tree",
            Object::Commit(_) => b"commit",
            Object::Tag(_) => b"tag",
        }
    }

    pub fn canonical_payload(&self) -> Result<Vec<u8>> {
        Ok(match self {
            Object::Blob(blob) => blob.serialize(),
            Object::Tree(tree) => tree.serialize(),
            Object::Commit(commit) => commit.serialize(),
            Object::Tag(tag) => tag.serialize(),
        })
    }

    /// construct the variant matching `type_tag` from an already-canonical payload
    pub fn from_typed_payload(type_tag: &[u8], payload: &[u8]) -> Result<Self> {
        Ok(match type_tag {
            b"blob" => Object::Blob(Blob::parse(payload)),
            b"tree" => Object::Tree(Tree::parse(payload)?),
            b"commit" => Object::Commit(Commit::parse(payload)?),
            b"tag" => Object::Tag(Tag::parse(payload)?),
            other => return Err(Error::UnknownType(other.to_vec())),
        })
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Object::Commit(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Object::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Object::Tag(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Object::Blob(b) => Some(b),
            _ => None,
        }
    }
}

fn object_path(repo: &Repository, oid: &Oid) -> std::path::PathBuf {
    let (dir, file) = oid.to_path_components();
    crate::path::repo_path(repo.metadir(), &["objects", &dir, &file])
}

/// read and decode the object stored under `hash`
pub fn read(repo: &Repository, oid: &Oid) -> Result<Object> {
    let path = object_path(repo, oid);
    log::debug!("reading object {oid} from {}", path.display());

    let file = std::fs::File::open(&path).ctx(&path)?;
    let mut raw = Vec::new();
    ZlibDecoder::new(file).read_to_end(&mut raw).ctx(&path)?;

    let space = raw.iter().position(|&b| b == b' ').ok_or_else(|| {
        Error::MalformedObject(Some(*oid), "header missing type separator".to_string())
    })?;
    let type_tag = raw[..space].to_vec();

    let nul = raw[space + 1..]
        .iter()
        .position(|&b| b == 0)
        .map(|i| i + space + 1)
        .ok_or_else(|| Error::MalformedObject(Some(*oid), "header missing size terminator".to_string()))?;

    let size_str = std::str::from_utf8(&raw[space + 1..nul])
        .map_err(|_| Error::MalformedObject(Some(*oid), "size is not valid utf8".to_string()))?;
    let size: usize = size_str
        .parse()
        .map_err(|_| Error::MalformedObject(Some(*oid), "size is not a decimal integer".to_string()))?;

    let payload = &raw[nul + 1..];
    if size != payload.len() {
        return Err(Error::MalformedObject(
            Some(*oid),
            format!("declared size {size} does not match payload length {}", payload.len()),
        ));
    }

    Object::from_typed_payload(&type_tag, payload)
}

/// compute the canonical `type SP size NUL payload` bytes and their hash,
/// writing the zlib-compressed form to the object store when `actually_write`
pub fn write(repo: Option<&Repository>, obj: &Object, actually_write: bool) -> Result<Oid> {
    let payload = obj.canonical_payload()?;
    let mut store = Vec::with_capacity(payload.len() + 16);
    store.extend_from_slice(obj.type_tag());
    store.push(b' ');
    store.extend_from_slice(payload.len().to_string().as_bytes());
    store.push(0);
    store.extend_from_slice(&payload);

    let oid = sha1(&store);

    if actually_write {
        if let Some(repo) = repo {
            let path = object_path(repo, &oid);
            if !path.exists() {
                log::debug!("writing object {oid} to {}", path.display());
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).ctx(parent)?;
                }
                let file = std::fs::File::create(&path).ctx(&path)?;
                let mut encoder = ZlibEncoder::new(file, Compression::default());
                encoder.write_all(&store).ctx(&path)?;
                encoder.finish().ctx(&path)?;
            }
        }
    }

    Ok(oid)
}

/// read raw bytes from `content`, treat them as the canonical payload for
/// `type_tag`, and delegate to `write` (writing only when `repo` is given)
pub fn hash(mut content: impl Read, type_tag: &[u8], repo: Option<&Repository>) -> Result<Oid> {
    let mut data = Vec::new();
    content.read_to_end(&mut data).ctx(std::path::Path::new("<hash-object input>"))?;
    let obj = Object::from_typed_payload(type_tag, &data)?;
    write(repo, &obj, repo.is_some())
}
