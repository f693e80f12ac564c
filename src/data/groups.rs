//! Column group membership by name prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a composite prefix string is split into individual prefixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMode {
    /// Comma-separated tokens, each trimmed; empty tokens are ignored.
    /// `"S, KO"` matches columns starting with `S` or `KO`.
    #[default]
    Tokens,
    /// Every character of the raw string is a one-character prefix.
    /// `"S, KO"` matches columns starting with `S`, `,`, ` `, `K` or `O`.
    Characters,
}

impl fmt::Display for PrefixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixMode::Tokens => write!(f, "tokens"),
            PrefixMode::Characters => write!(f, "characters"),
        }
    }
}

/// A set of column-name prefixes defining one group (QC, blank, samples).
///
/// Membership is plain `starts_with` matching. Groups built from overlapping
/// prefixes overlap; no attempt is made to disambiguate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSet {
    prefixes: Vec<String>,
}

impl PrefixSet {
    /// A group defined by exactly one prefix.
    pub fn single(prefix: &str) -> Self {
        Self {
            prefixes: vec![prefix.to_string()],
        }
    }

    /// Parse a composite prefix string.
    pub fn parse(value: &str, mode: PrefixMode) -> Self {
        let prefixes = match mode {
            PrefixMode::Tokens => value
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(String::from)
                .collect(),
            PrefixMode::Characters => value.chars().map(String::from).collect(),
        };
        Self { prefixes }
    }

    /// The individual prefixes.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// True if no prefix was parsed from the string.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Whether a column name belongs to this group.
    pub fn matches(&self, name: &str) -> bool {
        self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

impl fmt::Display for PrefixSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefixes.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_prefix() {
        let qc = PrefixSet::single("QC");
        assert!(qc.matches("QC_01"));
        assert!(qc.matches("QC"));
        assert!(!qc.matches("Pooled_QC"));
        assert!(!qc.matches("qc_01"));
    }

    #[test]
    fn test_token_mode_splits_on_commas() {
        let samples = PrefixSet::parse("S, KO", PrefixMode::Tokens);
        assert_eq!(samples.prefixes(), &["S", "KO"]);
        assert!(samples.matches("S1"));
        assert!(samples.matches("KO_3"));
        assert!(!samples.matches("Blank1"));
        // "O" alone is not a prefix in token mode
        assert!(!samples.matches("OE_1"));
    }

    #[test]
    fn test_token_mode_ignores_empty_tokens() {
        let samples = PrefixSet::parse(" , WT,,", PrefixMode::Tokens);
        assert_eq!(samples.prefixes(), &["WT"]);
    }

    #[test]
    fn test_character_mode_uses_every_character() {
        let samples = PrefixSet::parse("S, KO", PrefixMode::Characters);
        assert_eq!(samples.prefixes().len(), 5);
        assert!(samples.matches("S1"));
        assert!(samples.matches("KO_3"));
        assert!(samples.matches("OE_1"));
        assert!(samples.matches(" padded"));
        assert!(!samples.matches("Blank1"));
    }

    #[test]
    fn test_modes_agree_on_single_character_default() {
        let tokens = PrefixSet::parse("S", PrefixMode::Tokens);
        let chars = PrefixSet::parse("S", PrefixMode::Characters);
        assert_eq!(tokens, chars);
    }

    #[test]
    fn test_overlapping_prefixes_overlap() {
        let samples = PrefixSet::parse("S", PrefixMode::Tokens);
        // A sample prefix of "S" also claims "Solvent_blank"; this is left as is.
        assert!(samples.matches("Solvent_blank"));
    }
}
