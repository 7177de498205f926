//! Identifier similarity scoring.
//!
//! Rules, best result kept:
//! - identifier equals phrase: 1.0
//! - identifier contains phrase: `len(phrase) / len(identifier) * 0.9`
//! - an identifier word equals the phrase: 0.8
//! - an identifier word contains, or is contained in, the phrase: 0.6. A word shorter
//!   than three characters only counts as contained when it is a whole word of the
//!   phrase, so `o2` meets `o2 sat` but `b` never meets `blood pressure`.

pub const EXACT: f64 = 1.0;
pub const SUBSTRING_WEIGHT: f64 = 0.9;
pub const WORD_EXACT: f64 = 0.8;
pub const WORD_PARTIAL: f64 = 0.6;

/// Shorter words need a whole-word hit in the phrase to count as partial.
const MIN_PARTIAL_WORD: usize = 3;

/// Highest score of `identifier` against any of `phrases`.
pub fn score(identifier: &str, phrases: &[&str]) -> f64 {
    phrases
        .iter()
        .map(|phrase| score_phrase(identifier, phrase))
        .fold(0.0, f64::max)
}

pub fn score_phrase(identifier: &str, phrase: &str) -> f64 {
    let identifier = identifier.trim();
    let phrase = phrase.trim();
    if identifier.is_empty() || phrase.is_empty() {
        return 0.0;
    }
    if identifier == phrase {
        return EXACT;
    }

    let mut best: f64 = 0.0;
    if identifier.contains(phrase) {
        best = phrase.len() as f64 / identifier.len() as f64 * SUBSTRING_WEIGHT;
    }
    for word in words(identifier) {
        if word == phrase {
            best = best.max(WORD_EXACT);
        } else if word.contains(phrase) || contained_in_phrase(word, phrase) {
            best = best.max(WORD_PARTIAL);
        }
    }
    best
}

fn contained_in_phrase(word: &str, phrase: &str) -> bool {
    if word.len() >= MIN_PARTIAL_WORD {
        phrase.contains(word)
    } else {
        words(phrase).any(|part| part == word)
    }
}

fn words(identifier: &str) -> impl Iterator<Item = &str> {
    identifier
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
}
