//! Term folding shared by the index and the query side.
//!
//! A term only matches if the indexed token and the query word fold to the
//! same string, so both [`tokenize`](crate::tokenize) and the CLI phrase parser
//! call [`fold_term`] on every word.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Fold one word into its index term: lowercase, diacritics removed, no
/// surrounding whitespace.
///
/// ```text
/// "Café"  → "cafe"
/// "NAÏVE" → "naive"
/// ```
#[cfg(feature = "unicode-normalization")]
pub fn fold_term(word: &str) -> String {
    word.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Without Unicode tables only case is folded; accented input stays accented.
#[cfg(not(feature = "unicode-normalization"))]
pub fn fold_term(word: &str) -> String {
    word.trim().to_lowercase()
}
