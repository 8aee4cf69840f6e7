//! ogit - a minimal, read-compatible content-addressed object store
//!
//! reimplements the on-disk core of the dominant distributed VCS: an
//! immutable object database (blob/tree/commit/tag) addressed by SHA-1 over
//! a zlib-framed canonical byte form, a reference namespace of plain files
//! under `refs/` plus `HEAD`, name resolution from hash prefixes and branch
//! or tag names, commit-graph traversal, and tree checkout.
//!
//! packfiles, the staging index, merge/rebase/diff, network transports, and
//! working-tree status are all out of scope; this crate reads and writes
//! the object store only.
//!
//! # Example
//!
//! ```no_run
//! use ogit::repo::Repository;
//! use ogit::obj::{self, Blob, Object};
//! use std::path::Path;
//!
//! let repo = Repository::create(Path::new("/path/to/repo")).unwrap();
//! let oid = obj::write(Some(&repo), &Object::Blob(Blob::new(b"hello".to_vec())), true).unwrap();
//! let back = obj::read(&repo, &oid).unwrap();
//! assert_eq!(back.as_blob().unwrap().bytes, b"hello");
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod hash;
pub mod kvlm;
pub mod obj;
pub mod path;
pub mod refs;
pub mod repo;
pub mod rev;
pub mod revwalk;

pub use error::{Error, Result};
pub use hash::Oid;
pub use repo::Repository;
