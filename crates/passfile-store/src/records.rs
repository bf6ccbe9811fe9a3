//! On-disk record format.
//!
//! The backing file is plain text, one credential per line:
//!
//! ```text
//! <identity_token>:<hash_token>
//! ```
//!
//! The identity token is the codec-encoded username and the hash token is
//! the hasher's storable output. Hash tokens may themselves contain colons
//! (the default PBKDF2 token is `base64(salt):base64(hash)`), so a line is
//! split on the FIRST colon only and never re-split.
//!
//! [`parse`] and [`format`] are pure functions and round-trip:
//! `parse(&format(&m))? == m` for any mapping with unique keys.

use std::collections::BTreeMap;

use crate::error::{StoreError, StoreResult};

/// Parse the full contents of a backing file into the credential mapping.
///
/// Empty lines are skipped. A non-empty line with no `:` separator fails
/// the whole parse with [`StoreError::MalformedRecord`] carrying its
/// 1-based line number; a dropped record is a locked-out user, so partial
/// results are never returned.
pub fn parse(contents: &str) -> StoreResult<BTreeMap<String, String>> {
    let mut records = BTreeMap::new();

    for (idx, line) in contents.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let (identity, hash) = line
            .split_once(':')
            .ok_or(StoreError::MalformedRecord { line: idx + 1 })?;

        // Duplicate keys on disk collapse to the last occurrence, matching
        // the upsert semantics of `create`.
        records.insert(identity.to_string(), hash.to_string());
    }

    Ok(records)
}

/// Serialize the credential mapping to backing-file contents.
///
/// One `identity_token:hash_token` line per entry, newline-terminated, in
/// ascending key order so repeated rewrites of the same mapping are
/// byte-identical.
pub fn format(records: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (identity, hash) in records {
        out.push_str(identity);
        out.push(':');
        out.push_str(hash);
        out.push('\n');
    }
    out
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_splits_on_first_colon_only() {
        let records = parse("YWxpY2U=:c2FsdA==:aGFzaA==\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records.get("YWxpY2U=").map(String::as_str),
            Some("c2FsdA==:aGFzaA==")
        );
    }

    #[test]
    fn parse_empty_contents_yields_empty_mapping() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_line_without_separator() {
        let err = parse("YWxpY2U=:aGFzaA==\nnot-a-record\n").unwrap_err();
        match err {
            StoreError::MalformedRecord { line } => assert_eq!(line, 2),
            other => panic!("expected MalformedRecord, got: {other}"),
        }
    }

    #[test]
    fn format_sorts_by_key_and_terminates_lines() {
        let m = mapping(&[("b", "2"), ("a", "1"), ("c", "3")]);
        assert_eq!(format(&m), "a:1\nb:2\nc:3\n");
    }

    #[test]
    fn format_of_empty_mapping_is_empty() {
        assert_eq!(format(&BTreeMap::new()), "");
    }

    #[test]
    fn round_trip_preserves_mapping() {
        let m = mapping(&[
            ("YWxpY2U=", "c2FsdDE=:aGFzaDE="),
            ("Ym9i", "c2FsdDI=:aGFzaDI="),
            ("Y2Fyb2w=", "cGxhaW4taGFzaA=="),
        ]);
        assert_eq!(parse(&format(&m)).unwrap(), m);
    }

    #[test]
    fn duplicate_keys_collapse_to_last_occurrence() {
        let records = parse("a:old\na:new\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records.get("a").map(String::as_str), Some("new"));
    }
}
