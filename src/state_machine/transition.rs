//! Pure state transition function
//!
//! Maps (session, event) to a new session, a list of effects and the reply
//! text. Nothing here touches storage; the runtime applies the effects.

use super::event::contains_any;
use super::{replies, Effect, Event};
use crate::emergency::{self, CRITICAL_TERMS};
use crate::extractor;
use crate::model::ModelError;
use crate::prediction::PredictionEngine;
use crate::session::{Phase, Session};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Input that means "I have no symptoms" at the symptom prompt
const NEGATIONS: &[&str] = &[
    "no",
    "none",
    "nothing",
    "not really",
    "i'm fine",
    "i’m fine",
    "i am fine",
    "feeling good",
    "nothing serious",
];

const ADVICE_YES: &[&str] = &[
    "yes",
    "y",
    "yeah",
    "sure",
    "ok",
    "okay",
    "of course",
    "please",
    "yes please",
];

const ADVICE_NO: &[&str] = &["no", "n", "nope", "not now"];

const CONTINUE_YES: &[&str] = &["yes", "y", "sure", "ok", "okay"];

/// Read-only inputs to a transition
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub engine: &'a PredictionEngine,
    pub now: DateTime<Utc>,
}

impl<'a> TurnContext<'a> {
    pub fn new(engine: &'a PredictionEngine, now: DateTime<Utc>) -> Self {
        Self { engine, now }
    }
}

/// Result of a state transition
#[derive(Debug, Clone)]
pub struct TransitionResult {
    pub new_session: Session,
    pub effects: Vec<Effect>,
    pub reply: String,
}

impl TransitionResult {
    /// Reply only; the session is left exactly as it was
    fn reply(session: &Session, reply: impl Into<String>) -> Self {
        Self {
            new_session: session.clone(),
            effects: vec![],
            reply: reply.into(),
        }
    }

    /// Store `session` and reply
    fn persist(session: Session, reply: impl Into<String>) -> Self {
        Self {
            new_session: session,
            effects: vec![Effect::PersistSession],
            reply: reply.into(),
        }
    }

    /// Forget the conversation and reply
    fn cleared(now: DateTime<Utc>, reply: impl Into<String>) -> Self {
        Self {
            new_session: Session::new(now),
            effects: vec![Effect::ClearSession],
            reply: reply.into(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Prediction failed: {0}")]
    Prediction(#[from] ModelError),
}

/// Pure transition function
///
/// Global commands are handled first, in any phase. Emergency screening only
/// happens at symptom intake: text sent while the session is collecting
/// duration or severity is stored verbatim and never screened.
pub fn transition(
    session: &Session,
    ctx: &TurnContext<'_>,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (session.phase, event) {
        // ============================================================
        // Global intercepts
        // ============================================================
        (_, Event::Blank) => Ok(TransitionResult::reply(session, replies::DESCRIBE_SYMPTOMS)),

        (_, Event::Farewell) => Ok(TransitionResult::cleared(ctx.now, replies::THANKS)),

        (_, Event::Greeting) => Ok(TransitionResult::cleared(ctx.now, replies::GREETING)
            .with_effect(Effect::PersistSession)),

        (_, Event::Exit) => Ok(TransitionResult::cleared(ctx.now, replies::GOODBYE)),

        (_, Event::List) => Ok(TransitionResult::reply(
            session,
            replies::symptom_list(ctx.engine.vocabulary()),
        )),

        // ============================================================
        // Phase handlers
        // ============================================================
        (Phase::Symptom, Event::Message { text }) => Ok(symptom_intake(session, ctx, &text)),

        (Phase::Duration, Event::Message { text }) => {
            let mut next = session.clone();
            next.duration = Some(text);
            next.phase = Phase::Severity;
            Ok(TransitionResult::persist(next, replies::ASK_SEVERITY))
        }

        (Phase::Severity, Event::Message { text }) => {
            let predictions = ctx.engine.predict(&session.symptoms)?;
            let reply = replies::predictions(&predictions);

            let mut next = session.clone();
            next.severity = Some(text);
            next.predictions = predictions;
            next.phase = Phase::AskRecommendations;
            Ok(TransitionResult::persist(next, reply))
        }

        (Phase::AskRecommendations, Event::Message { text }) => {
            let reply = if contains_any(&text, ADVICE_YES) {
                replies::recommendations(&session.predictions)
            } else if contains_any(&text, ADVICE_NO) {
                replies::SKIP_ADVICE.to_string()
            } else {
                return Ok(TransitionResult::persist(session.clone(), replies::ASK_YES_OR_NO));
            };

            let mut next = session.clone();
            next.phase = Phase::MoreSymptoms;
            Ok(TransitionResult::persist(next, reply))
        }

        (Phase::MoreSymptoms, Event::Message { text }) => {
            if contains_any(&text, CONTINUE_YES) {
                let mut next = session.clone();
                next.phase = Phase::Symptom;
                Ok(TransitionResult::persist(next, replies::ASK_SYMPTOMS_AGAIN))
            } else {
                Ok(TransitionResult::cleared(ctx.now, replies::CLOSING))
            }
        }
    }
}

/// Symptom phase: negation, extraction, then the emergency screen.
fn symptom_intake(session: &Session, ctx: &TurnContext<'_>, text: &str) -> TransitionResult {
    if NEGATIONS.contains(&text) {
        return TransitionResult::cleared(ctx.now, replies::NO_SYMPTOMS);
    }

    let words = extractor::normalize(text);
    let symptoms = extractor::match_terms(&words, ctx.engine.vocabulary().tokens());

    // Critical terms are not vocabulary tokens, so they are matched separately
    // and screened ahead of the symptoms.
    let mut screened = extractor::match_terms(&words, CRITICAL_TERMS);
    screened.extend(symptoms.iter().copied());

    if let Some(hit) = emergency::check(&screened) {
        return TransitionResult::reply(session, replies::emergency(&hit))
            .with_effect(Effect::FlagEmergency { term: hit.term });
    }

    if symptoms.is_empty() {
        return TransitionResult::reply(session, replies::NOT_RECOGNIZED);
    }

    let mut next = session.clone();
    next.symptoms = symptoms.into_iter().map(str::to_string).collect();
    next.phase = Phase::Duration;
    TransitionResult::persist(next, replies::ASK_DURATION)
}
