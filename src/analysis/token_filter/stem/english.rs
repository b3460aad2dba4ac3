//! English stemming cascade.
//!
//! A Porter-family algorithm: after orthographic normalization and region
//! computation, the word passes through nine ordered stages (possessive
//! stripping, plural and participle resolution, derivational rewrite
//! tables, and a final `e`/`ll` cleanup), each gated on the R1/R2
//! validity regions. Two exception dictionaries short-circuit the cascade
//! for known-irregular words.
//!
//! # Examples
//!
//! ```
//! use falx::analysis::token_filter::stem::Stemmer;
//! use falx::analysis::token_filter::stem::english::EnglishStemmer;
//!
//! let stemmer = EnglishStemmer::new();
//!
//! assert_eq!(stemmer.stem("caresses"), "caress");
//! assert_eq!(stemmer.stem("ponies"), "poni");
//! assert_eq!(stemmer.stem("dying"), "die");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::region::region_after;
use super::{chop, ends_with, replace_end, starts_with};
use crate::analysis::token_filter::stem::Stemmer;

/// Irregular words mapped straight to their final stem, consulted before
/// any other processing.
static EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("skis", "ski"),
        ("skies", "sky"),
        ("dying", "die"),
        ("lying", "lie"),
        ("tying", "tie"),
        ("idly", "idl"),
        ("gently", "gentl"),
        ("ugly", "ugli"),
        ("early", "earli"),
        ("only", "onli"),
        ("singly", "singl"),
        ("sky", "sky"),
        ("news", "news"),
        ("howe", "howe"),
        ("atlas", "atlas"),
        ("cosmos", "cosmos"),
        ("bias", "bias"),
        ("andes", "andes"),
    ])
});

/// Words left alone once plural stripping has run; the verb rules would
/// otherwise mangle them.
static EXCEPTIONS_AFTER_1A: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("inning", "inning"),
        ("outing", "outing"),
        ("canning", "canning"),
        ("herring", "herring"),
        ("earring", "earring"),
        ("proceed", "proceed"),
        ("exceed", "exceed"),
        ("succeed", "succeed"),
    ])
});

/// Step 2 derivational rewrites, longest overall pattern first. `ogi`
/// applies only after `l`, `li` only after one of `cdeghkmnrt`.
const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ization", "ize"),
    ("fulness", "ful"),
    ("iveness", "ive"),
    ("ational", "ate"),
    ("ousness", "ous"),
    ("tional", "tion"),
    ("biliti", "ble"),
    ("lessli", "less"),
    ("ation", "ate"),
    ("alism", "al"),
    ("aliti", "al"),
    ("ousli", "ous"),
    ("iviti", "ive"),
    ("fulli", "ful"),
    ("entli", "ent"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("abli", "able"),
    ("izer", "ize"),
    ("ator", "ate"),
    ("alli", "al"),
    ("ogi", "og"),
    ("bli", "ble"),
    ("li", ""),
];

/// Step 3 derivational rewrites; `ative` deletes only past R2.
const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("alize", "al"),
    ("icate", "ic"),
    ("iciti", "ic"),
    ("ative", "ative"),
    ("ical", "ic"),
    ("ness", ""),
    ("ful", ""),
];

/// Step 4 deletions, longest overall pattern first. `ion` applies only
/// after `s` or `t`.
const STEP4_SUFFIXES: &[&str] = &[
    "ement", "ance", "ence", "able", "ible", "ment", "ion", "ant", "ent", "ism", "ate", "iti",
    "ous", "ive", "ize", "al", "er", "ic",
];

/// Word prefixes that force R1 to the offset just past them.
const R1_PREFIXES: &[&str] = &["gener", "commun", "arsen"];

static STRIP_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z']").expect("valid pattern"));

/// Marks a leading `y`, or a `y` right after a vowel, as consonant-acting.
static CONSONANT_Y: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^y|([aeiouy])y").expect("valid pattern"));

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// English stemmer.
#[derive(Debug, Clone, Default)]
pub struct EnglishStemmer;

impl EnglishStemmer {
    /// Create a new English stemmer.
    pub fn new() -> Self {
        EnglishStemmer
    }

    /// Normalize a lowercased word: drop a leading apostrophe, strip
    /// disallowed characters, and mark consonant-acting `y` as `Y`.
    fn normalize(&self, word: &str) -> Vec<char> {
        let word = word.strip_prefix('\'').unwrap_or(word);
        let word = STRIP_CHARS.replace_all(word, "");
        let word = CONSONANT_Y.replace_all(&word, "${1}Y");
        word.chars().collect()
    }

    fn regions(&self, word: &[char]) -> (usize, usize) {
        let r1 = match R1_PREFIXES.iter().find(|p| starts_with(word, p)) {
            Some(prefix) => prefix.len(),
            None => region_after(word, 0, is_vowel),
        };
        let r2 = region_after(word, r1, is_vowel);
        (r1, r2)
    }

    /// Step 0: strip a trailing possessive.
    fn step0(&self, word: &mut Vec<char>) {
        if ends_with(word, "'s'") {
            chop(word, 3);
        } else if ends_with(word, "'s") {
            chop(word, 2);
        } else if ends_with(word, "'") {
            chop(word, 1);
        }
    }

    /// Step 1a: plural resolution, longest pattern first.
    fn step1a(&self, word: &mut Vec<char>) {
        if ends_with(word, "sses") {
            chop(word, 2);
        } else if word.len() >= 5 && (ends_with(word, "ied") || ends_with(word, "ies")) {
            // keep through the i: "..ies" -> "..i"
            chop(word, 2);
        } else if ends_with(word, "us") || ends_with(word, "ss") {
            // unchanged, but the stage is consumed
        } else if word.len() >= 4 && (ends_with(word, "ied") || ends_with(word, "ies")) {
            // short stems keep the e: ".ies" -> ".ie"
            chop(word, 1);
        } else if ends_with(word, "s")
            && word[..word.len().saturating_sub(2)].iter().any(|&c| is_vowel(c))
        {
            chop(word, 1);
        }
    }

    /// Step 1b: `eed(ly)` lengthening vs. `ed`/`ing` deletion.
    fn step1b(&self, word: &mut Vec<char>, r1: usize) {
        let s1 = if ends_with(word, "eedly") {
            5
        } else if ends_with(word, "eed") {
            3
        } else {
            0
        };
        let s2 = [("ingly", 5), ("edly", 4), ("ing", 3), ("ed", 2)]
            .iter()
            .find(|(sfx, n)| {
                ends_with(word, sfx) && word[..word.len() - n].iter().any(|&c| is_vowel(c))
            })
            .map(|&(_, n)| n)
            .unwrap_or(0);

        if s1 > s2 {
            if word.len() - s1 >= r1 {
                replace_end(word, s1, "ee");
            }
        } else if s2 > s1 {
            chop(word, s2);
            if ends_with(word, "at") || ends_with(word, "bl") || ends_with(word, "iz") {
                word.push('e');
            } else if self.ends_double_consonant(word) {
                chop(word, 1);
            } else if word.len() <= r1 && self.ends_short_syllable(word) {
                word.push('e');
            }
        }
    }

    fn ends_double_consonant(&self, word: &[char]) -> bool {
        let n = word.len();
        n >= 2
            && word[n - 1] == word[n - 2]
            && matches!(
                word[n - 1],
                'b' | 'd' | 'f' | 'g' | 'm' | 'n' | 'p' | 'r' | 't'
            )
    }

    /// A short syllable at the end of the word: consonant-vowel-consonant
    /// where the final consonant is not `w`, `x`, or consonant-acting `Y`,
    /// or the whole word is vowel(-consonant).
    fn ends_short_syllable(&self, word: &[char]) -> bool {
        let n = word.len();
        if n >= 3 {
            let (a, b, c) = (word[n - 3], word[n - 2], word[n - 1]);
            return !is_vowel(a) && is_vowel(b) && !is_vowel(c) && !matches!(c, 'w' | 'x' | 'Y');
        }
        match n {
            2 => is_vowel(word[0]) && !is_vowel(word[1]),
            1 => is_vowel(word[0]),
            _ => false,
        }
    }

    /// Step 1c: word-final `y` after a non-vowel becomes `i`.
    fn step1c(&self, word: &mut Vec<char>) {
        let n = word.len();
        if n >= 3 && matches!(word[n - 1], 'y' | 'Y') && !is_vowel(word[n - 2]) {
            word[n - 1] = 'i';
        }
    }

    /// Step 2: derivational rewrites gated on R1.
    fn step2(&self, word: &mut Vec<char>, r1: usize) {
        for &(sfx, replacement) in STEP2_SUFFIXES {
            if !ends_with(word, sfx) {
                continue;
            }
            let start = word.len() - sfx.len();
            match sfx {
                "ogi" if start == 0 || word[start - 1] != 'l' => continue,
                "li" if start == 0
                    || !matches!(
                        word[start - 1],
                        'c' | 'd' | 'e' | 'g' | 'h' | 'k' | 'm' | 'n' | 'r' | 't'
                    ) =>
                {
                    continue;
                }
                _ => {}
            }
            if start >= r1 {
                replace_end(word, sfx.len(), replacement);
            }
            // first match consumes the stage even when the gate fails
            return;
        }
    }

    /// Step 3: derivational rewrites gated on R1, `ative` also on R2.
    fn step3(&self, word: &mut Vec<char>, r1: usize, r2: usize) {
        for &(sfx, replacement) in STEP3_SUFFIXES {
            if !ends_with(word, sfx) {
                continue;
            }
            let start = word.len() - sfx.len();
            if start >= r1 {
                if sfx == "ative" {
                    if start >= r2 {
                        chop(word, 5);
                    }
                } else {
                    replace_end(word, sfx.len(), replacement);
                }
            }
            return;
        }
    }

    /// Step 4: deletions gated on R2.
    fn step4(&self, word: &mut Vec<char>, r2: usize) {
        for &sfx in STEP4_SUFFIXES {
            if !ends_with(word, sfx) {
                continue;
            }
            let start = word.len() - sfx.len();
            if sfx == "ion" && (start == 0 || !matches!(word[start - 1], 's' | 't')) {
                continue;
            }
            if start >= r2 {
                chop(word, sfx.len());
            }
            return;
        }
    }

    /// Step 5: final `e` and `ll` cleanup.
    fn step5(&self, word: &mut Vec<char>, r1: usize, r2: usize) {
        if ends_with(word, "e") {
            let n = word.len();
            if n > r2 || (n > r1 && !self.short_syllable_before_e(word)) {
                chop(word, 1);
            }
        } else if ends_with(word, "ll") && word.len() > r2 {
            chop(word, 1);
        }
    }

    fn short_syllable_before_e(&self, word: &[char]) -> bool {
        let n = word.len();
        if n >= 4 {
            let (a, b, c) = (word[n - 4], word[n - 3], word[n - 2]);
            if !is_vowel(a) && is_vowel(b) && !is_vowel(c) && !matches!(c, 'w' | 'x' | 'Y') {
                return true;
            }
        }
        n == 3 && is_vowel(word[0]) && !is_vowel(word[1])
    }
}

impl Stemmer for EnglishStemmer {
    fn stem(&self, word: &str) -> String {
        if word.chars().count() < 3 {
            return word.to_string();
        }

        let lowered = word.to_lowercase();
        if let Some(&stem) = EXCEPTIONS.get(lowered.as_str()) {
            return stem.to_string();
        }

        let mut word = self.normalize(&lowered);
        let (r1, r2) = self.regions(&word);

        self.step0(&mut word);
        self.step1a(&mut word);

        let current: String = word.iter().collect();
        if let Some(&stem) = EXCEPTIONS_AFTER_1A.get(current.as_str()) {
            return stem.to_string();
        }

        self.step1b(&mut word, r1);
        self.step1c(&mut word);
        self.step2(&mut word, r1);
        self.step3(&mut word, r1, r2);
        self.step4(&mut word, r2);
        self.step5(&mut word, r1, r2);

        word.iter().collect::<String>().to_lowercase()
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceptions() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("skis"), "ski");
        assert_eq!(stemmer.stem("skies"), "sky");
        assert_eq!(stemmer.stem("dying"), "die");
        assert_eq!(stemmer.stem("news"), "news");
        // consulted after lowercasing
        assert_eq!(stemmer.stem("Sky"), "sky");
    }

    #[test]
    fn test_exceptions_after_plural_stripping() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("inning"), "inning");
        assert_eq!(stemmer.stem("herring"), "herring");
        assert_eq!(stemmer.stem("proceed"), "proceed");
        assert_eq!(stemmer.stem("exceed"), "exceed");
    }

    #[test]
    fn test_short_words_unchanged() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("a"), "a");
        assert_eq!(stemmer.stem("ab"), "ab");
        assert_eq!(stemmer.stem("io"), "io");
    }

    #[test]
    fn test_plural_resolution() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("caresses"), "caress");
        assert_eq!(stemmer.stem("ponies"), "poni");
        assert_eq!(stemmer.stem("ties"), "tie");
        assert_eq!(stemmer.stem("dies"), "die");
        assert_eq!(stemmer.stem("caress"), "caress");
        assert_eq!(stemmer.stem("cats"), "cat");
        assert_eq!(stemmer.stem("gas"), "gas");
    }

    #[test]
    fn test_verb_endings() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("agreed"), "agre");
        assert_eq!(stemmer.stem("feed"), "feed");
        assert_eq!(stemmer.stem("plastered"), "plaster");
        assert_eq!(stemmer.stem("bled"), "bled");
        assert_eq!(stemmer.stem("motoring"), "motor");
        assert_eq!(stemmer.stem("sing"), "sing");
        assert_eq!(stemmer.stem("sized"), "size");
        assert_eq!(stemmer.stem("hopping"), "hop");
        assert_eq!(stemmer.stem("falling"), "fall");
        assert_eq!(stemmer.stem("filing"), "file");
    }

    #[test]
    fn test_forced_r1_prefixes() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("generate"), "generat");
        assert_eq!(stemmer.stem("generous"), "generous");
        assert_eq!(stemmer.stem("generously"), "generous");
        assert_eq!(stemmer.stem("communities"), "communiti");
        assert_eq!(stemmer.stem("arsenal"), "arsenal");
    }

    #[test]
    fn test_derivational_suffixes() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("vietnamization"), "vietnam");
        assert_eq!(stemmer.stem("predication"), "predic");
        assert_eq!(stemmer.stem("operator"), "oper");
        assert_eq!(stemmer.stem("sensibiliti"), "sensibl");
        assert_eq!(stemmer.stem("conformabli"), "conform");
        assert_eq!(stemmer.stem("analogousli"), "analog");
        assert_eq!(stemmer.stem("vileli"), "vile");
        assert_eq!(stemmer.stem("happily"), "happili");
        assert_eq!(stemmer.stem("triplicate"), "triplic");
        assert_eq!(stemmer.stem("formative"), "format");
        assert_eq!(stemmer.stem("hopeful"), "hope");
        assert_eq!(stemmer.stem("goodness"), "good");
        assert_eq!(stemmer.stem("replacement"), "replac");
        assert_eq!(stemmer.stem("adoption"), "adopt");
        assert_eq!(stemmer.stem("homologou"), "homologou");
    }

    #[test]
    fn test_final_e_and_ll() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("probate"), "probat");
        assert_eq!(stemmer.stem("rate"), "rate");
        assert_eq!(stemmer.stem("cease"), "ceas");
        assert_eq!(stemmer.stem("controll"), "control");
        assert_eq!(stemmer.stem("roll"), "roll");
    }

    #[test]
    fn test_consonant_y_marking() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("toy"), "toy");
        assert_eq!(stemmer.stem("stays"), "stay");
        assert_eq!(stemmer.stem("sprayed"), "spray");
        assert_eq!(stemmer.stem("crying"), "cri");
        assert_eq!(stemmer.stem("happy"), "happi");
        assert_eq!(stemmer.stem("syzygy"), "syzygi");
        // sequential marking: only the first y of a run after a vowel flips
        assert_eq!(stemmer.stem("oyy"), "oyi");
        assert_eq!(stemmer.stem("yyy"), "yyy");
    }

    #[test]
    fn test_apostrophes() {
        let stemmer = EnglishStemmer::new();

        assert_eq!(stemmer.stem("cats'"), "cat");
        assert_eq!(stemmer.stem("dogs's"), "dog");
        assert_eq!(stemmer.stem("james'"), "jame");
        assert_eq!(stemmer.stem("'cause"), "caus");
        assert_eq!(stemmer.stem("don't"), "don't");
    }

    #[test]
    fn test_no_region_never_fires() {
        let stemmer = EnglishStemmer::new();

        // no vowel/non-vowel transition: R1 and R2 are never satisfied
        assert_eq!(stemmer.stem("aaa"), "aaa");
        assert_eq!(stemmer.stem("eee"), "eee");
        assert_eq!(stemmer.stem("bcdfg"), "bcdfg");
    }

    #[test]
    fn test_name() {
        assert_eq!(EnglishStemmer::new().name(), "english");
    }
}
