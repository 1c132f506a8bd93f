//! Salt composition equivalence.
//!
//! Composition strings arrive as free text with no normalization at
//! source: casing, whitespace, ingredient ordering, and separators all
//! vary ("Paracetamol (650mg)" vs "paracetamol 650mg"). Two
//! compositions are treated as equivalent when their normalized token
//! multisets match, with a fuzzy per-token tolerance for upstream
//! misspellings.

use strsim::jaro_winkler;

/// Minimum per-token similarity for two non-identical tokens to count
/// as the same ingredient word.
const TOKEN_SIMILARITY_THRESHOLD: f64 = 0.92;

/// A salt composition string in normalized token form.
#[derive(Debug, Clone, PartialEq)]
pub struct SaltComposition {
    tokens: Vec<String>,
}

impl SaltComposition {
    /// Parse a free-text composition string: lowercase, split on
    /// whitespace and `+ , ( )`, drop empty tokens, sort.
    pub fn parse(raw: &str) -> Self {
        let mut tokens: Vec<String> = raw
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || matches!(c, '+' | ',' | '(' | ')'))
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect();
        tokens.sort();
        Self { tokens }
    }

    /// Whether the source string contained no usable tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token-multiset equivalence with fuzzy per-token tolerance.
    ///
    /// Empty compositions never match anything, including each other:
    /// an item with no composition data cannot be verified equivalent.
    pub fn matches(&self, other: &SaltComposition) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if self.tokens.len() != other.tokens.len() {
            return false;
        }

        // Greedy one-to-one assignment; token counts are small.
        let mut taken = vec![false; other.tokens.len()];
        'outer: for token in &self.tokens {
            for (i, candidate) in other.tokens.iter().enumerate() {
                if taken[i] {
                    continue;
                }
                if token == candidate || jaro_winkler(token, candidate) >= TOKEN_SIMILARITY_THRESHOLD
                {
                    taken[i] = true;
                    continue 'outer;
                }
            }
            return false;
        }
        true
    }
}

/// Convenience check on raw composition strings.
pub fn same_composition(a: &str, b: &str) -> bool {
    SaltComposition::parse(a).matches(&SaltComposition::parse(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert!(same_composition(
            "Paracetamol 650mg",
            "paracetamol   650mg"
        ));
    }

    #[test]
    fn test_token_order_insensitive() {
        assert!(same_composition(
            "Amoxicillin 500mg + Clavulanic Acid 125mg",
            "Clavulanic Acid 125mg + Amoxicillin 500mg"
        ));
    }

    #[test]
    fn test_separator_variants() {
        assert!(same_composition(
            "Paracetamol (650mg)",
            "Paracetamol 650mg"
        ));
        assert!(same_composition(
            "Domperidone, Pantoprazole",
            "Pantoprazole + Domperidone"
        ));
    }

    #[test]
    fn test_minor_misspelling_tolerated() {
        assert!(same_composition(
            "Paracetamol 650mg",
            "Paracetamole 650mg"
        ));
    }

    #[test]
    fn test_different_ingredient_rejected() {
        assert!(!same_composition(
            "Paracetamol 650mg",
            "Ibuprofen 650mg"
        ));
    }

    #[test]
    fn test_different_strength_rejected() {
        assert!(!same_composition(
            "Paracetamol 650mg",
            "Paracetamol 500mg"
        ));
    }

    #[test]
    fn test_extra_ingredient_rejected() {
        assert!(!same_composition(
            "Paracetamol 650mg",
            "Paracetamol 650mg + Caffeine 50mg"
        ));
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!same_composition("", ""));
        assert!(!same_composition("Paracetamol", ""));
        assert!(SaltComposition::parse("  ").is_empty());
    }
}
