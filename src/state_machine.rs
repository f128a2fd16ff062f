//! Dialogue state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! raw turn is classified into an `Event`, `transition` computes the next
//! session, the reply and the effects, and the runtime applies the effects.

mod effect;
pub mod event;
pub mod replies;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use transition::{transition, TransitionError, TransitionResult, TurnContext};
