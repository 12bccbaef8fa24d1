//! Credential model and helpers for parsing credential lists.
//!
//! A `Credential` is an opaque token. Nothing about its structure is checked
//! beyond being non-empty after trimming. Use [`parse_credentials`] for
//! in-memory contents and [`dedup_preserving_order`] before handing a list to
//! the aggregator.
use std::collections::HashSet;
use std::fmt;

/// Number of leading characters shown when a credential is displayed.
pub const DEFAULT_PREVIEW_LEN: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("credential is empty")]
    Empty,
}

/// An opaque authentication token, immutable once constructed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from raw input, trimming surrounding whitespace.
    pub fn new(raw: &str) -> Result<Self, CredentialError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` characters followed by `...`. Safe on multi-byte input.
    pub fn preview(&self, len: usize) -> String {
        let head: String = self.0.chars().take(len).collect();
        format!("{}...", head)
    }
}

// Keep raw tokens out of `{:?}` output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential")
            .field(&self.preview(DEFAULT_PREVIEW_LEN))
            .finish()
    }
}

impl std::str::FromStr for Credential {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// One credential per line; blank lines are ignored.
pub fn parse_credentials(contents: &str) -> Vec<Credential> {
    contents
        .lines()
        .filter_map(|l| Credential::new(l).ok())
        .collect()
}

/// Drop repeated credentials, keeping the first occurrence of each. Returns
/// the surviving list and the number of duplicates removed.
pub fn dedup_preserving_order(creds: Vec<Credential>) -> (Vec<Credential>, usize) {
    let before = creds.len();
    let mut seen: HashSet<Credential> = HashSet::with_capacity(before);
    let kept: Vec<Credential> = creds
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}
