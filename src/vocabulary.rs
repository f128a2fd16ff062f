//! Symptom vocabulary
//!
//! The ordered list of canonical symptom tokens. Position in this list is the
//! position in every feature vector handed to the classifier, so the order
//! must match the order the model was trained with.

use std::collections::HashSet;

/// Canonical symptom tokens in feature-vector order.
pub const SYMPTOMS: &[&str] = &[
    "fever",
    "cough",
    "sore_throat",
    "runny_nose",
    "headache",
    "fatigue",
    "nausea",
    "vomiting",
    "diarrhea",
    "abdominal_pain",
    "chest_pain",
    "shortness_of_breath",
    "dizziness",
    "leg_swelling",
    "bleeding",
    "rash",
    "joint_pain",
    "loss_of_smell",
    "loss_of_taste",
    "sore_eyes",
];

/// Immutable, ordered symptom vocabulary.
///
/// Built once at startup and shared read-only between conversations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<&'static str>,
}

impl Vocabulary {
    /// The built-in symptom vocabulary.
    pub fn builtin() -> Self {
        Self::from_tokens(SYMPTOMS)
    }

    /// Build a vocabulary from an ordered token list. Later duplicates are dropped.
    pub fn from_tokens(tokens: &[&'static str]) -> Self {
        let mut seen = HashSet::new();
        let tokens = tokens
            .iter()
            .copied()
            .filter(|t| seen.insert(*t))
            .collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&token)
    }

    pub fn tokens(&self) -> &[&'static str] {
        &self.tokens
    }

    /// Position of a token in feature-vector order
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| *t == token)
    }

    /// Binary feature vector: slot `i` is 1 iff `tokens()[i]` appears in `present`.
    pub fn vectorize<S: AsRef<str>>(&self, present: &[S]) -> Vec<u8> {
        let set: HashSet<&str> = present.iter().map(AsRef::as_ref).collect();
        self.tokens
            .iter()
            .map(|t| u8::from(set.contains(t)))
            .collect()
    }

    /// Tokens joined for display (the `list` command)
    pub fn joined(&self, separator: &str) -> String {
        self.tokens.join(separator)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
