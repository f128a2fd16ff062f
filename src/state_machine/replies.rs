//! Reply text
//!
//! Replies use `<br>` for line breaks; front ends render it as they see fit.

use crate::catalog;
use crate::emergency::Emergency;
use crate::prediction::Prediction;
use crate::vocabulary::Vocabulary;
use std::fmt::Write;

pub const DESCRIBE_SYMPTOMS: &str = "Please describe your symptoms.";

pub const THANKS: &str =
    "You're most welcome! 🌿 Take care of your health and have a wonderful day!";

pub const GREETING: &str = "🤖 Hello! I'm your AI-based Smart Healthcare Assistant.<br>\
     I can help you understand possible conditions based on your symptoms.<br>\
     Type 'list' to view all symptoms or 'exit' to quit anytime.<br><br>\
     Please tell me what symptoms you're experiencing:";

pub const GOODBYE: &str = "Take care of your health. Goodbye! 🩺";

pub const NO_SYMPTOMS: &str = "You mentioned no symptoms, that's great! 😊 \
     Stay healthy and hydrated.<br>\
     If you ever feel unwell later, just type 'hi' to start again.";

pub const NOT_RECOGNIZED: &str = "I'm not sure I recognized any symptoms there.<br>\
     Try describing your symptoms more clearly, for example: fever, sore throat, or fatigue.";

pub const ASK_DURATION: &str = "How long have you had these symptoms? (e.g., 2 days, 1 week)";

pub const ASK_SEVERITY: &str = "On a scale of 1 to 10, how severe would you say they are?";

pub const ASK_YES_OR_NO: &str = "Please respond with 'yes' or 'no' 🙂";

pub const ASK_MORE_SYMPTOMS: &str = "Would you like to describe any other symptoms? (yes/no)";

pub const SKIP_ADVICE: &str = "Alright, no worries! I hope you feel better soon 💙<br>\
     Would you like to describe any other symptoms? (yes/no)";

pub const ASK_SYMPTOMS_AGAIN: &str = "Please tell me what symptoms you're experiencing:";

pub const CLOSING: &str = "Okay! Take rest and monitor your health. Bye 👋";

/// The `list` command: the vocabulary, comma separated
pub fn symptom_list(vocabulary: &Vocabulary) -> String {
    vocabulary.joined(", ")
}

pub fn emergency(hit: &Emergency) -> String {
    format!(
        "🚨 That sounds serious, detected '{}'.<br>{}<br>⚕️ Please contact emergency services immediately.",
        hit.term,
        hit.advice()
    )
}

/// Ranked predictions followed by the offer of advice
pub fn predictions(predictions: &[Prediction]) -> String {
    let mut reply = String::from("Here's what I found:<br>");
    for p in predictions {
        let _ = write!(reply, "➡️ {} - {} likelihood<br>", p.condition, p.percent());
    }
    reply.push_str("<br>Would you like my advice for these? (yes/no)");
    reply
}

/// Catalog advice for each stored prediction
pub fn recommendations(predictions: &[Prediction]) -> String {
    let mut reply = String::from("💡 Recommendations:<br>");
    for p in predictions {
        let _ = write!(
            reply,
            "<b>{}</b>: {}<br><br>",
            p.condition,
            catalog::lookup(&p.condition)
        );
    }
    reply.push_str(ASK_MORE_SYMPTOMS);
    reply
}

/// Strip markup for plain-text front ends
pub fn to_plain_text(reply: &str) -> String {
    reply
        .replace("<br>", "\n")
        .replace("<b>", "")
        .replace("</b>", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predictions_reply() {
        let reply = predictions(&[
            Prediction::new("Common Cold", 0.6),
            Prediction::new("Influenza", 0.3),
        ]);
        assert!(reply.contains("Common Cold - 60.0% likelihood"));
        assert!(reply.contains("Influenza - 30.0% likelihood"));
        assert!(reply.ends_with("(yes/no)"));
    }

    #[test]
    fn test_recommendations_reply_uses_catalog() {
        let reply = recommendations(&[Prediction::new("Migraine", 0.9)]);
        assert!(reply.contains("<b>Migraine</b>"));
        assert!(reply.contains(catalog::lookup("Migraine")));
        assert!(reply.ends_with(ASK_MORE_SYMPTOMS));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(to_plain_text("<b>A</b>: x<br>y"), "A: x\ny");
    }

    #[test]
    fn test_symptom_list() {
        let list = symptom_list(&Vocabulary::builtin());
        assert!(list.starts_with("fever, cough, sore_throat"));
        assert!(list.ends_with("sore_eyes"));
    }
}
