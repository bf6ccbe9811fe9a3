//! Store action names.
//!
//! The CLI's action argument maps onto this closed enumeration. Parsing is
//! case-insensitive and total: anything outside the five known tokens is
//! [`Action::Missing`], which callers must treat as a request-validation
//! failure and never dispatch.

use serde::{Deserialize, Serialize};

/// An operation requested against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Create a user, or overwrite an existing one (upsert).
    Create,
    /// Check a password against the stored hash.
    Verify,
    /// Remove a user's record.
    Delete,
    /// Alias of `Delete`.
    Remove,
    /// Print every stored username.
    List,
    /// Unrecognized action token.
    Missing,
}

impl Action {
    /// Parse an action token, case-insensitively.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Self::Create,
            "VERIFY" => Self::Verify,
            "DELETE" => Self::Delete,
            "REMOVE" => Self::Remove,
            "LIST" => Self::List,
            _ => Self::Missing,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Verify => "verify",
            Self::Delete => "delete",
            Self::Remove => "remove",
            Self::List => "list",
            Self::Missing => "missing",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Action::parse("CREATE"), Action::Create);
        assert_eq!(Action::parse("create"), Action::Create);
        assert_eq!(Action::parse("Verify"), Action::Verify);
        assert_eq!(Action::parse("dElEtE"), Action::Delete);
        assert_eq!(Action::parse("remove"), Action::Remove);
        assert_eq!(Action::parse("LIST"), Action::List);
    }

    #[test]
    fn unknown_tokens_map_to_missing() {
        assert_eq!(Action::parse(""), Action::Missing);
        assert_eq!(Action::parse("update"), Action::Missing);
        assert_eq!(Action::parse("creat"), Action::Missing);
        assert_eq!(Action::parse("list "), Action::Missing);
    }

    #[test]
    fn display_matches_canonical_name() {
        assert_eq!(Action::Create.to_string(), "create");
        assert_eq!(Action::Missing.to_string(), "missing");
    }
}
