//! Emergency detection
//!
//! Rule-based screen that runs before any statistical prediction. A direct
//! critical term wins over the compound chest-pain rule, and the first
//! critical term in token order is the one reported.

use serde::Serialize;

/// Terms that are an emergency on their own.
pub const CRITICAL_TERMS: &[&str] = &[
    "cardiac_arrest",
    "heart_attack",
    "stroke",
    "severe_bleeding",
    "unconscious",
    "loss_of_consciousness",
    "difficulty_breathing",
    "severe_chest_pain",
];

/// Label reported when the compound chest-pain rule fires.
pub const COMPOUND_CHEST_PAIN: &str = "chest_pain + shortness_of_breath";

const GENERIC_ADVICE: &str =
    "🚨 Critical condition detected. Seek emergency medical help immediately.";

/// A detected emergency and the term that triggered it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Emergency {
    pub term: &'static str,
}

impl Emergency {
    /// Canned first-aid advice for the matched term
    pub fn advice(&self) -> &'static str {
        advice_for(self.term)
    }
}

/// Screen tokens for an emergency. `None` means nothing dangerous was found.
pub fn check<S: AsRef<str>>(tokens: &[S]) -> Option<Emergency> {
    let direct = tokens
        .iter()
        .find_map(|t| CRITICAL_TERMS.iter().copied().find(|c| *c == t.as_ref()));
    if let Some(term) = direct {
        return Some(Emergency { term });
    }

    let has = |needle: &str| tokens.iter().any(|t| t.as_ref() == needle);
    if has("chest_pain") && (has("shortness_of_breath") || has("dizziness")) {
        return Some(Emergency {
            term: COMPOUND_CHEST_PAIN,
        });
    }

    None
}

/// Advice text keyed by substring of the matched term, with a generic fallback.
pub fn advice_for(term: &str) -> &'static str {
    let term = term.to_lowercase();
    if term.contains("cardiac") || term.contains("heart") {
        "🚑 Possible cardiac arrest or heart attack.<br>\
         • Call emergency services (108 / 112) immediately.<br>\
         • Begin CPR if the person is unresponsive and not breathing.<br>\
         • Use an AED if available.<br>\
         • Do NOT give food or medication unless advised by a doctor."
    } else if term.contains("stroke") {
        "🚑 Possible stroke detected.<br>\
         • Call emergency services immediately.<br>\
         • Note the time symptoms began.<br>\
         • Do NOT give food or water; keep patient calm and upright."
    } else if term.contains("bleeding") {
        "🚑 Severe bleeding detected.<br>\
         • Apply firm pressure with a clean cloth.<br>\
         • Do not remove a soaked cloth, add another on top.<br>\
         • Seek emergency medical attention immediately."
    } else if term.contains("unconscious") {
        "🚨 Unconscious person detected.<br>\
         • Check breathing and pulse.<br>\
         • If absent, begin CPR and call emergency services.<br>\
         • Keep airway open and stay with the person."
    } else if term.contains("difficulty_breathing") {
        "🚨 Severe breathing difficulty detected.<br>\
         • Sit upright and loosen tight clothing.<br>\
         • Use inhaler if prescribed.<br>\
         • Call emergency services right away."
    } else {
        GENERIC_ADVICE
    }
}
