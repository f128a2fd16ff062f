//! Turn runtime
//!
//! Loads the session for a conversation, runs the pure transition and applies
//! its effects to the store. One in-flight turn per conversation identifier
//! is assumed; different identifiers may be served concurrently.

#[cfg(test)]
pub mod testing;

use crate::prediction::PredictionEngine;
use crate::session::{Phase, SessionStore, StoreError};
use crate::state_machine::{transition, Effect, Event, TransitionError, TurnContext};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReply {
    pub reply: String,
    /// Phase the conversation is in after this turn
    pub phase: Phase,
}

/// Dialogue runtime over a session store
pub struct TriageRuntime<S> {
    engine: Arc<PredictionEngine>,
    store: S,
}

impl<S: SessionStore> TriageRuntime<S> {
    pub fn new(engine: Arc<PredictionEngine>, store: S) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one utterance for a conversation
    pub fn handle_turn(&self, session_id: &str, raw_text: &str) -> Result<TurnReply, TurnError> {
        self.handle_turn_at(session_id, raw_text, Utc::now())
    }

    /// Handle one utterance as of `now`
    pub fn handle_turn_at(
        &self,
        session_id: &str,
        raw_text: &str,
        now: DateTime<Utc>,
    ) -> Result<TurnReply, TurnError> {
        let span = tracing::info_span!("turn", session_id = %session_id);
        let _enter = span.enter();

        let session = self.store.get(session_id, now)?;
        let event = Event::from_input(raw_text);
        let event_kind = event.kind();
        let ctx = TurnContext::new(&self.engine, now);

        let result = transition(&session, &ctx, event)?;
        let mut new_session = result.new_session;

        for effect in &result.effects {
            match effect {
                Effect::ClearSession => {
                    self.store.clear(session_id)?;
                }
                Effect::PersistSession => {
                    new_session.touch(now);
                    self.store.put(session_id, &new_session)?;
                }
                Effect::FlagEmergency { term } => {
                    tracing::warn!(term = %term, "Emergency detected, intake halted");
                }
            }
        }

        tracing::info!(
            event = event_kind,
            from = %session.phase,
            to = %new_session.phase,
            symptoms = new_session.symptoms.len(),
            "Turn handled"
        );

        Ok(TurnReply {
            reply: result.reply,
            phase: new_session.phase,
        })
    }

    /// Forget a conversation
    pub fn end_session(&self, session_id: &str) -> Result<(), TurnError> {
        self.store.clear(session_id)?;
        Ok(())
    }

    /// Drop idle sessions; returns how many were removed
    pub fn purge_expired(&self) -> Result<usize, TurnError> {
        Ok(self.store.purge_expired(Utc::now())?)
    }
}
