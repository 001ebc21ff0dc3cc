//! Raw counselor name canonicalization.
//!
//! Everything downstream (scoring, candidate ranking) compares
//! `NormalizedName` values, never raw strings. Normalization is total:
//! garbage in yields an empty normalized form, never an error, so the
//! import pipeline does not need per-record handling for malformed names.

use crate::nicknames;

/// Courtesy titles dropped during cleaning.
const PREFIXES: &[&str] = &["mr", "mrs", "ms", "dr", "prof"];

/// Generational suffixes dropped during cleaning.
const SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv"];

/// One cleaned name token plus its nickname-canonical form, when the token
/// is a known given-name variant. The original token is kept — the exact
/// tier compares originals, the nickname tier compares canonical forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameToken {
    pub text: String,
    pub canonical: Option<&'static str>,
}

impl NameToken {
    /// The canonical form if one exists, otherwise the token itself.
    pub fn canonical_text(&self) -> &str {
        self.canonical.unwrap_or(&self.text)
    }
}

/// A raw name reduced to comparable form: lowercased, de-punctuated,
/// whitespace-collapsed ordered tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    pub tokens: Vec<NameToken>,
}

impl NormalizedName {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined in original order ("john smith").
    pub fn joined(&self) -> String {
        let parts: Vec<&str> = self.tokens.iter().map(|t| t.text.as_str()).collect();
        parts.join(" ")
    }

    /// Tokens joined in reversed order ("smith john") — catches
    /// "Last, First" input, since commas are stripped during cleaning.
    pub fn reordered(&self) -> String {
        let parts: Vec<&str> = self.tokens.iter().rev().map(|t| t.text.as_str()).collect();
        parts.join(" ")
    }

    /// Original token texts, sorted. Two names are an exact match when
    /// these agree (order-insensitive, duplicates significant).
    pub fn sorted_tokens(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.tokens.iter().map(|t| t.text.as_str()).collect();
        out.sort_unstable();
        out
    }

    /// Nickname-canonical token texts, sorted.
    pub fn sorted_canonical_tokens(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.tokens.iter().map(|t| t.canonical_text()).collect();
        out.sort_unstable();
        out
    }

    /// First token text, if any.
    pub fn first(&self) -> Option<&str> {
        self.tokens.first().map(|t| t.text.as_str())
    }

    /// Last token text, if any.
    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(|t| t.text.as_str())
    }
}

/// Strip parenthesized runs — rosters carry nicknames as `Robert (Bob)`.
/// Unclosed parens drop the rest of the string, matching how a reader
/// would treat a mangled export cell.
fn strip_parenthesized(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for ch in raw.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Normalize a raw name into comparable tokens.
///
/// Steps: drop parenthesized content, lowercase, strip punctuation except
/// hyphens inside a token, split on whitespace, drop courtesy
/// prefixes/suffixes, annotate each surviving token with its
/// nickname-canonical form. Deterministic and total.
pub fn normalize(raw: &str) -> NormalizedName {
    let cleaned = strip_parenthesized(raw).to_lowercase();

    let mut tokens = Vec::new();
    for word in cleaned.split_whitespace() {
        // Keep letters, digits, and interior hyphens; everything else
        // (commas, periods, apostrophes) separates or disappears.
        let kept: String = word
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-')
            .collect();
        let trimmed = kept.trim_matches('-');
        if trimmed.is_empty() {
            continue;
        }
        if PREFIXES.contains(&trimmed) || SUFFIXES.contains(&trimmed) {
            continue;
        }
        tokens.push(NameToken {
            canonical: nicknames::canonical_for(trimmed),
            text: trimmed.to_string(),
        });
    }

    NormalizedName { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(name: &NormalizedName) -> Vec<&str> {
        name.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_basic_cleaning() {
        let n = normalize("  John   Smith ");
        assert_eq!(texts(&n), vec!["john", "smith"]);
    }

    #[test]
    fn test_last_comma_first() {
        let n = normalize("Smith, John");
        assert_eq!(texts(&n), vec!["smith", "john"]);
        assert_eq!(n.reordered(), "john smith");
    }

    #[test]
    fn test_prefix_suffix_removed() {
        let n = normalize("Dr. John Smith Jr.");
        assert_eq!(texts(&n), vec!["john", "smith"]);
    }

    #[test]
    fn test_parenthesized_nickname_dropped() {
        let n = normalize("Robert (Bob) Jones");
        assert_eq!(texts(&n), vec!["robert", "jones"]);
    }

    #[test]
    fn test_hyphen_kept_inside_token() {
        let n = normalize("Mary Smith-Jones");
        assert_eq!(texts(&n), vec!["mary", "smith-jones"]);
    }

    #[test]
    fn test_nickname_annotation_keeps_original() {
        let n = normalize("Mike Johnson");
        assert_eq!(n.tokens[0].text, "mike");
        assert_eq!(n.tokens[0].canonical, Some("michael"));
        assert_eq!(n.tokens[1].canonical, None);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   ").is_empty());
        assert!(normalize("...,,,").is_empty());
        assert!(normalize("(nothing here)").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let a = normalize("Smith, John (Jack) Jr.");
        let b = normalize("Smith, John (Jack) Jr.");
        assert_eq!(a, b);
    }
}
