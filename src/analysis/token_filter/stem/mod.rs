//! Stemming token filter and per-language stemmer implementations.
//!
//! Each stemmer reduces an inflected word form to a canonical root so that
//! a search index can match morphological variants to the same term. The
//! reduction is a pure, stateless transformation: an orthographic
//! normalization pass, a region computation, and an ordered cascade of
//! region-gated suffix rewrites.
//!
//! # Examples
//!
//! ```
//! use falx::analysis::token_filter::stem::{stem, Language};
//!
//! assert_eq!(stem("caresses", "en"), "caress");
//! assert_eq!(stem("heureusement", "fr"), "heureux");
//! assert_eq!(stem("möglichkeiten", "de"), "moglich");
//!
//! // Unrecognized tags fall back to English.
//! assert_eq!(Language::from_tag("xx"), Language::English);
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

// Stemmer implementations
pub mod english;
pub mod french;
pub mod german;

mod region;

// Re-export stemmers
pub use english::EnglishStemmer;
pub use french::FrenchStemmer;
pub use german::GermanStemmer;

/// Languages with a dedicated stemming cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    /// English (tag `en`)
    English,
    /// French (tag `fr`)
    French,
    /// German (tag `de`)
    German,
}

impl Language {
    /// Resolve a language tag. Any unrecognized tag (including the empty
    /// string) resolves to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "fr" => Language::French,
            "de" => Language::German,
            _ => Language::English,
        }
    }

    /// The tag this language is registered under.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::German => "de",
        }
    }

    /// Create a boxed stemmer for this language.
    pub fn stemmer(&self) -> Box<dyn Stemmer> {
        match self {
            Language::English => Box::new(EnglishStemmer::new()),
            Language::French => Box::new(FrenchStemmer::new()),
            Language::German => Box::new(GermanStemmer::new()),
        }
    }

    fn stem_word(&self, word: &str) -> String {
        match self {
            Language::English => EnglishStemmer::new().stem(word),
            Language::French => FrenchStemmer::new().stem(word),
            Language::German => GermanStemmer::new().stem(word),
        }
    }
}

/// Stem a single token for the given language tag.
///
/// Unrecognized tags behave identically to `"en"`.
pub fn stem(token: &str, language_tag: &str) -> String {
    Language::from_tag(language_tag).stem_word(token)
}

/// Filter that applies stemming to tokens.
///
/// Stopped tokens pass through unchanged. A token carrying a language hint
/// is stemmed with that language's cascade (unrecognized hints fall back to
/// English); tokens without a hint use the filter's configured stemmer.
pub struct StemFilter {
    /// The stemmer applied to tokens without a language hint.
    stemmer: Box<dyn Stemmer>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the English stemmer.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Language::English.stemmer(),
        }
    }

    /// Create a stem filter for the language registered under `tag`.
    pub fn for_language(tag: &str) -> Self {
        StemFilter {
            stemmer: Language::from_tag(tag).stemmer(),
        }
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Box<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let stemmed = match token.language.as_deref() {
                        Some(tag) => Language::from_tag(tag).stem_word(&token.text),
                        None => self.stemmer.stem(&token.text),
                    };
                    token.with_text(stemmed)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

/// Check whether `word` ends with `suffix`, comparing scalar values.
fn ends_with(word: &[char], suffix: &str) -> bool {
    let n = suffix.chars().count();
    word.len() >= n && word[word.len() - n..].iter().copied().eq(suffix.chars())
}

/// Check whether `word` starts with `prefix`, comparing scalar values.
fn starts_with(word: &[char], prefix: &str) -> bool {
    let n = prefix.chars().count();
    word.len() >= n && word[..n].iter().copied().eq(prefix.chars())
}

/// Remove the last `n` characters of `word`.
fn chop(word: &mut Vec<char>, n: usize) {
    let new_len = word.len().saturating_sub(n);
    word.truncate(new_len);
}

/// Replace the last `n` characters of `word` with `replacement`.
fn replace_end(word: &mut Vec<char>, n: usize, replacement: &str) {
    chop(word, n);
    word.extend(replacement.chars());
}
