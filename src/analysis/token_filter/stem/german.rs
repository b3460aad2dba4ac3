//! German stemming cascade.
//!
//! Three ordered stages: declension endings (with the `niss` special
//! case), verb/comparative endings, and derivational suffixes, all gated
//! on R1/R2 with R1 floored at offset 3. Normalization expands `ß` to
//! `ss` and marks `u`/`y` between vowels as consonant-acting; the final
//! pass folds umlauts to their base vowels.
//!
//! # Examples
//!
//! ```
//! use falx::analysis::token_filter::stem::Stemmer;
//! use falx::analysis::token_filter::stem::german::GermanStemmer;
//!
//! let stemmer = GermanStemmer::new();
//!
//! assert_eq!(stemmer.stem("automatisierung"), "automatisier");
//! assert_eq!(stemmer.stem("möglichkeiten"), "moglich");
//! assert_eq!(stemmer.stem("häusern"), "haus");
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::region::region_after;
use super::{chop, ends_with};
use crate::analysis::token_filter::stem::Stemmer;

static STRIP_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zäöüéç]").expect("valid pattern"));

/// `u` between vowels acts as a consonant.
static CONSONANT_U: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([aeiouyäöü])u([aeiouyäöü])").expect("valid pattern"));

/// `y` between vowels acts as a consonant.
static CONSONANT_Y: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([aeiouyäöü])y([aeiouyäöü])").expect("valid pattern"));

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'ä' | 'ö' | 'ü')
}

/// Consonants that license a bare `s` ending in step 1.
fn valid_s_ending(c: char) -> bool {
    matches!(
        c,
        'b' | 'd' | 'f' | 'g' | 'h' | 'k' | 'l' | 'm' | 'n' | 'r' | 't'
    )
}

/// Consonants that license a `st` ending in step 2 (no `r` here).
fn valid_st_ending(c: char) -> bool {
    matches!(c, 'b' | 'd' | 'f' | 'g' | 'h' | 'k' | 'l' | 'm' | 'n' | 't')
}

/// German stemmer.
#[derive(Debug, Clone, Default)]
pub struct GermanStemmer;

impl GermanStemmer {
    /// Create a new German stemmer.
    pub fn new() -> Self {
        GermanStemmer
    }

    fn normalize(&self, word: &str) -> Vec<char> {
        let word = word.to_lowercase().replace('ß', "ss");
        let word = STRIP_CHARS.replace_all(&word, "");
        let word = CONSONANT_U.replace_all(&word, "${1}U${2}");
        let word = CONSONANT_Y.replace_all(&word, "${1}Y${2}");
        word.chars().collect()
    }

    /// R1 (floored at 3) and R2. R2 derives from the unfloored R1.
    fn regions(&self, word: &[char]) -> (usize, usize) {
        let r1 = region_after(word, 0, is_vowel);
        let r2 = region_after(word, r1, is_vowel);
        (r1.max(3), r2)
    }

    /// Step 1: declension endings, longest first. Stripping one of
    /// `en`/`es`/`e` off a `niss` stem drops the doubled `s` too.
    fn step1(&self, word: &mut Vec<char>, r1: usize) {
        let (n, nominal) = if ends_with(word, "ern") {
            (3, false)
        } else if ends_with(word, "em") || ends_with(word, "er") {
            (2, false)
        } else if ends_with(word, "en") || ends_with(word, "es") {
            (2, true)
        } else if ends_with(word, "e") {
            (1, true)
        } else if ends_with(word, "s")
            && word.len() >= 2
            && valid_s_ending(word[word.len() - 2])
        {
            (1, false)
        } else {
            return;
        };

        if word.len() - n >= r1 {
            chop(word, n);
            if nominal && ends_with(word, "niss") {
                chop(word, 1);
            }
        }
    }

    /// Step 2: verb and comparative endings.
    fn step2(&self, word: &mut Vec<char>, r1: usize) {
        let n = if ends_with(word, "est") {
            3
        } else if ends_with(word, "en") || ends_with(word, "er") {
            2
        } else if word.len() >= 6
            && ends_with(word, "st")
            && valid_st_ending(word[word.len() - 3])
        {
            2
        } else {
            return;
        };

        if word.len() - n >= r1 {
            chop(word, n);
        }
    }

    /// Step 3: derivational suffixes, one family per word.
    fn step3(&self, word: &mut Vec<char>, r1: usize, r2: usize) {
        if ends_with(word, "end") || ends_with(word, "ung") {
            if word.len() - 3 >= r2 {
                chop(word, 3);
                let n = word.len();
                if ends_with(word, "ig") && n >= 3 && word[n - 3] != 'e' && n - 2 >= r2 {
                    chop(word, 2);
                }
            }
        } else if let Some(n) = [("isch", 4), ("ig", 2), ("ik", 2)]
            .iter()
            .find(|(s, _)| ends_with(word, s))
            .map(|&(_, n)| n)
        {
            let len = word.len();
            if len > n && word[len - n - 1] != 'e' && len - n >= r2 {
                chop(word, n);
            }
        } else if ends_with(word, "lich") || ends_with(word, "heit") {
            if word.len() - 4 >= r2 {
                chop(word, 4);
                let n = word.len();
                if (ends_with(word, "er") || ends_with(word, "en")) && n - 2 >= r1 {
                    chop(word, 2);
                }
            }
        } else if ends_with(word, "keit") && word.len() - 4 >= r2 {
            chop(word, 4);
            let n = word.len();
            if ends_with(word, "lich") && n - 4 >= r2 {
                chop(word, 4);
            } else if ends_with(word, "ig") && n - 2 >= r2 {
                chop(word, 2);
            }
        }
    }

    /// Fold umlauts to their base vowels.
    fn fold_umlauts(&self, word: &str) -> String {
        word.chars()
            .map(|c| match c {
                'ä' => 'a',
                'ö' => 'o',
                'ü' => 'u',
                other => other,
            })
            .collect()
    }
}

impl Stemmer for GermanStemmer {
    fn stem(&self, word: &str) -> String {
        let mut word = self.normalize(word);
        let (r1, r2) = self.regions(&word);

        self.step1(&mut word, r1);
        self.step2(&mut word, r1);
        self.step3(&mut word, r1, r2);

        let lowered = word.iter().collect::<String>().to_lowercase();
        self.fold_umlauts(&lowered)
    }

    fn name(&self) -> &'static str {
        "german"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declension_endings() {
        let stemmer = GermanStemmer::new();

        assert_eq!(stemmer.stem("häusern"), "haus");
        assert_eq!(stemmer.stem("bücher"), "buch");
        assert_eq!(stemmer.stem("kindes"), "kind");
        assert_eq!(stemmer.stem("frauen"), "frau");
        assert_eq!(stemmer.stem("mannes"), "mann");
        assert_eq!(stemmer.stem("blume"), "blum");
        assert_eq!(stemmer.stem("bauers"), "bau");
        assert_eq!(stemmer.stem("neuem"), "neu");
    }

    #[test]
    fn test_niss_special_case() {
        let stemmer = GermanStemmer::new();

        assert_eq!(stemmer.stem("erkenntnisse"), "erkenntnis");
        assert_eq!(stemmer.stem("erkenntnissen"), "erkenntnis");
        assert_eq!(stemmer.stem("ereignisses"), "ereignis");
        assert_eq!(stemmer.stem("kenntnis"), "kenntnis");
        assert_eq!(stemmer.stem("bedürfnisse"), "bedurfnis");
    }

    #[test]
    fn test_verb_and_comparative_endings() {
        let stemmer = GermanStemmer::new();

        assert_eq!(stemmer.stem("schneller"), "schnell");
        assert_eq!(stemmer.stem("schnellst"), "schnell");
        assert_eq!(stemmer.stem("schnellsten"), "schnell");
        assert_eq!(stemmer.stem("studieren"), "studi");
        assert_eq!(stemmer.stem("studiert"), "studiert");
        assert_eq!(stemmer.stem("gelaufen"), "gelauf");
        assert_eq!(stemmer.stem("lauft"), "lauft");
    }

    #[test]
    fn test_derivational_suffixes() {
        let stemmer = GermanStemmer::new();

        assert_eq!(stemmer.stem("automatisierung"), "automatisier");
        assert_eq!(stemmer.stem("bedeutung"), "bedeut");
        assert_eq!(stemmer.stem("hoffnung"), "hoffnung");
        assert_eq!(stemmer.stem("laufend"), "laufend");
        assert_eq!(stemmer.stem("automatisch"), "automat");
        assert_eq!(stemmer.stem("technisch"), "technisch");
        assert_eq!(stemmer.stem("königlich"), "konig");
        assert_eq!(stemmer.stem("freundlichkeit"), "freundlich");
        assert_eq!(stemmer.stem("möglichkeit"), "moglich");
        assert_eq!(stemmer.stem("wichtigkeit"), "wichtig");
        assert_eq!(stemmer.stem("abhängigkeit"), "abhang");
        assert_eq!(stemmer.stem("schönheit"), "schonheit");
    }

    #[test]
    fn test_eszett_and_umlauts() {
        let stemmer = GermanStemmer::new();

        assert_eq!(stemmer.stem("straße"), "strass");
        assert_eq!(stemmer.stem("größe"), "gross");
        assert_eq!(stemmer.stem("weiß"), "weiss");
        assert_eq!(stemmer.stem("fleißig"), "fleissig");
        assert_eq!(stemmer.stem("läuft"), "lauft");
    }

    #[test]
    fn test_consonant_marking() {
        let stemmer = GermanStemmer::new();

        // the u of "bauern" sits between vowels, so it does not extend R1
        assert_eq!(stemmer.stem("bauern"), "bau");
        assert_eq!(stemmer.stem("steuerung"), "steuer");
        assert_eq!(stemmer.stem("abenteuer"), "abenteu");
    }

    #[test]
    fn test_no_region_never_fires() {
        let stemmer = GermanStemmer::new();

        assert_eq!(stemmer.stem("äää"), "aaa");
        assert_eq!(stemmer.stem("eieiei"), "eieiei");
        assert_eq!(stemmer.stem("bcdfg"), "bcdfg");
    }

    #[test]
    fn test_name() {
        assert_eq!(GermanStemmer::new().name(), "german");
    }
}
