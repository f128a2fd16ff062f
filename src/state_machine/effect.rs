//! Effects produced by state transitions

/// Side effects the runtime applies after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Drop whatever is stored for this conversation
    ClearSession,

    /// Store the transition's new session
    PersistSession,

    /// An emergency was detected; nothing is stored for the turn
    FlagEmergency { term: &'static str },
}
