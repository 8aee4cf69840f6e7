//! key-value-list-with-message: the shared textual format behind commit and
//! tag payloads.
//!
//! an ordered mapping from byte-string key to one-or-more byte-string
//! values (duplicate keys collapse into a sequence, in first-insertion
//! order), plus a distinguished message bound to the empty-key slot.
//!
//! parsing and serializing both walk the buffer with a plain byte offset
//! rather than recursing line-by-line: payloads can be arbitrarily large
//! (big merge commits list many parents) and there is no reason to tie
//! stack depth to that size.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// `None` is the message slot; every other key may carry multiple values
pub type Kvlm = IndexMap<Option<Vec<u8>>, Vec<Vec<u8>>>;

/// parse a commit or tag payload into an ordered key-value-list-with-message
pub fn parse(raw: &[u8]) -> Result<Kvlm> {
    let mut kvlm = Kvlm::new();
    let mut pos = 0usize;

    loop {
        // a blank line (or end of input) starts the message
        if pos >= raw.len() || raw[pos] == b'\n' {
            let msg_start = if pos >= raw.len() { pos } else { pos + 1 };
            let message = raw[msg_start..].to_vec();
            kvlm.entry(None).or_default().push(message);
            return Ok(kvlm);
        }

        let space = find(raw, pos, b' ').ok_or_else(|| {
            Error::MalformedObject(None, "header line missing a space".to_string())
        })?;
        let key = raw[pos..space].to_vec();

        // the value runs until a newline NOT followed by a continuation space
        let end = find_value_end(raw, space + 1)?;
        let value = dequote_continuations(&raw[space + 1..end]);

        kvlm.entry(Some(key)).or_default().push(value);
        pos = end + 1;
    }
}

/// locates the newline that actually terminates a (possibly continued) value
fn find_value_end(raw: &[u8], mut pos: usize) -> Result<usize> {
    loop {
        let nl = find(raw, pos, b'\n').ok_or_else(|| {
            Error::MalformedObject(None, "header value missing terminator".to_string())
        })?;
        if nl + 1 < raw.len() && raw[nl + 1] == b' ' {
            pos = nl + 2;
            continue;
        }
        return Ok(nl);
    }
}

/// strips the `\n ` continuation marker back down to a bare `\n`
fn dequote_continuations(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    let mut i = 0;
    while i < value.len() {
        if value[i] == b'\n' && i + 1 < value.len() && value[i + 1] == b' ' {
            out.push(b'\n');
            i += 2;
        } else {
            out.push(value[i]);
            i += 1;
        }
    }
    out
}

fn find(raw: &[u8], from: usize, byte: u8) -> Option<usize> {
    raw[from..].iter().position(|&b| b == byte).map(|i| i + from)
}

/// serialize a key-value-list-with-message back to its canonical byte form
pub fn serialize(kvlm: &Kvlm) -> Vec<u8> {
    let mut out = Vec::new();

    for (key, values) in kvlm {
        let Some(key) = key else { continue };
        for value in values {
            out.extend_from_slice(key);
            out.push(b' ');
            out.extend_from_slice(&requote_continuations(value));
            out.push(b'\n');
        }
    }

    out.push(b'\n');
    if let Some(messages) = kvlm.get(&None) {
        if let Some(message) = messages.first() {
            out.extend_from_slice(message);
        }
    }

    out
}

/// re-escapes embedded newlines as `\n ` continuations
fn requote_continuations(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for &b in value {
        out.push(b);
        if b == b'\n' {
            out.push(b' ');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commit_header() {
        let raw = b"tree abc\nparent p1\nparent p2\n\nmsg\n";
        let kvlm = parse(raw).unwrap();

        assert_eq!(kvlm.get(&Some(b"tree".to_vec())).unwrap(), &vec![b"abc".to_vec()]);
        assert_eq!(
            kvlm.get(&Some(b"parent".to_vec())).unwrap(),
            &vec![b"p1".to_vec(), b"p2".to_vec()]
        );
        assert_eq!(kvlm.get(&None).unwrap(), &vec![b"msg\n".to_vec()]);
    }

    #[test]
    fn roundtrip_is_byte_identical() {
        let raw = b"tree abc\nparent p1\nparent p2\n\nmsg\n".to_vec();
        let kvlm = parse(&raw).unwrap();
        assert_eq!(serialize(&kvlm), raw);
    }

    #[test]
    fn handles_multiline_continuation_values() {
        let raw: &[u8] = b"tree abc\ngpgsig -----BEGIN PGP SIGNATURE-----\n \n iQIz\n \n -----END PGP SIGNATURE-----\n\nmsg\n";
        let kvlm = parse(raw).unwrap();

        let sig = &kvlm.get(&Some(b"gpgsig".to_vec())).unwrap()[0];
        assert!(sig.starts_with(b"-----BEGIN PGP SIGNATURE-----\n"));
        assert!(sig.ends_with(b"-----END PGP SIGNATURE-----"));

        assert_eq!(serialize(&kvlm), raw);
    }

    #[test]
    fn preserves_key_first_insertion_order() {
        let raw = b"tree abc\nauthor a\ncommitter c\nparent p1\n\nmsg\n";
        let kvlm = parse(raw).unwrap();
        let keys: Vec<_> = kvlm.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                Some(b"tree".to_vec()),
                Some(b"author".to_vec()),
                Some(b"committer".to_vec()),
                Some(b"parent".to_vec()),
                None,
            ]
        );
    }

    #[test]
    fn message_only_body_is_empty_headers() {
        let raw = b"\nstandalone message\n";
        let kvlm = parse(raw).unwrap();
        assert!(kvlm.get(&Some(b"tree".to_vec())).is_none());
        assert_eq!(kvlm.get(&None).unwrap(), &vec![b"standalone message\n".to_vec()]);
    }

    #[test]
    fn rejects_header_without_space() {
        let raw = b"malformed\n\nmsg\n";
        assert!(parse(raw).is_err());
    }
}
