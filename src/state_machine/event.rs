//! Classification of raw user input
//!
//! The global commands are recognized here, before any phase logic runs.

use crate::extractor;
use serde::Serialize;

const FAREWELL_KEYWORDS: &[&str] = &[
    "thank",
    "thanks",
    "thankyou",
    "bye",
    "goodbye",
    "see you",
    "take care",
];

const GREETINGS: &[&str] = &["hi", "hello", "hey", "start", "good morning", "good evening"];

const EXIT_COMMANDS: &[&str] = &["exit", "quit"];

const LIST_COMMAND: &str = "list";

/// A user turn after the global intercepts have been applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Nothing but whitespace
    Blank,
    /// Gratitude or goodbye anywhere in the text
    Farewell,
    /// Exactly one of the greeting phrases
    Greeting,
    /// `exit` or `quit`
    Exit,
    /// `list`
    List,
    /// Anything else, trimmed and lowercased
    Message { text: String },
}

impl Event {
    /// Classify raw input. Farewell matching is by substring, the commands
    /// must match the whole (trimmed, lowercased) input.
    pub fn from_input(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return Event::Blank;
        }
        if FAREWELL_KEYWORDS.iter().any(|k| text.contains(k)) {
            return Event::Farewell;
        }
        if GREETINGS.contains(&text.as_str()) {
            return Event::Greeting;
        }
        if EXIT_COMMANDS.contains(&text.as_str()) {
            return Event::Exit;
        }
        if text == LIST_COMMAND {
            return Event::List;
        }
        Event::Message { text }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Event::Blank => "blank",
            Event::Farewell => "farewell",
            Event::Greeting => "greeting",
            Event::Exit => "exit",
            Event::List => "list",
            Event::Message { .. } => "message",
        }
    }
}

/// True when the words of `phrase` occur contiguously in `text`'s words.
///
/// Sentence punctuation does not count toward a word, so "Yes." and "sure!"
/// contain `yes` and `sure`.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let words = answer_words(text);
    let needle = answer_words(phrase);
    !needle.is_empty() && words.windows(needle.len()).any(|w| w == needle.as_slice())
}

fn answer_words(text: &str) -> Vec<String> {
    extractor::normalize(text)
        .into_iter()
        .map(|w| w.trim_end_matches(['!', '?']).to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// True when any of `phrases` is contained in `text` at word boundaries.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| contains_phrase(text, p))
}
