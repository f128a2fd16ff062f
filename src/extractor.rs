//! Symptom extraction from free text
//!
//! Text is lowercased, commas and periods become spaces, and the result is
//! split on whitespace. A run of words matches a term when the words joined
//! with `_` equal it, so "chest pain" and "chest_pain" both yield
//! `chest_pain`. The longest run wins at each position.

use crate::vocabulary::Vocabulary;

/// Lowercase, strip sentence punctuation and split into words.
pub fn normalize(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .replace([',', '.'], " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Terms found in `words`, in the order encountered. Duplicates are kept.
pub fn match_terms(words: &[String], terms: &[&'static str]) -> Vec<&'static str> {
    let max_words = terms
        .iter()
        .map(|t| t.split('_').count())
        .max()
        .unwrap_or(1);

    let mut found = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let mut matched = None;
        for len in (1..=max_words.min(words.len() - i)).rev() {
            let candidate = words[i..i + len].join("_");
            if let Some(term) = terms.iter().find(|t| **t == candidate) {
                matched = Some((*term, len));
                break;
            }
        }

        match matched {
            Some((term, len)) => {
                found.push(term);
                i += len;
            }
            None => i += 1,
        }
    }
    found
}

/// Vocabulary tokens mentioned in `raw`, in order of appearance.
pub fn extract(raw: &str, vocabulary: &Vocabulary) -> Vec<&'static str> {
    match_terms(&normalize(raw), vocabulary.tokens())
}
