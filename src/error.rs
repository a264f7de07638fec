//! Recoverable errors
//!
//! Nothing here is fatal: every error is reported to the caller and logged,
//! and the game state is left exactly as it was before the failing request.

use std::fmt;

use crate::sim::state::GameMode;

/// Why a level file could not be turned into a playable layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadFailureReason {
    /// No level with that id exists in the source
    Missing,
    /// The file exists but could not be read
    Io(String),
    /// The contents did not match the level schema
    Malformed(String),
}

impl fmt::Display for LoadFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "level not found"),
            Self::Io(msg) => write!(f, "read failed: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed level: {msg}"),
        }
    }
}

/// A command that is not allowed in the current mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidTransition {
    /// "Continue" after a win with no successor level recorded
    NoNextLevel,
    /// Random rounds can only be restarted from the first round
    CannotRestartRound { round: u32 },
    /// Restart requested for a fixed level but nothing has been played
    NoLevelToRestart,
    /// Command has no meaning in this mode
    NotAvailable { mode: GameMode, command: &'static str },
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoNextLevel => write!(f, "there are no more levels left"),
            Self::CannotRestartRound { round } => {
                write!(f, "only the first round can be restarted (current round {round})")
            }
            Self::NoLevelToRestart => write!(f, "no level has been played yet"),
            Self::NotAvailable { mode, command } => {
                write!(f, "`{command}` is not available in {mode:?}")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    LevelLoad { level: String, reason: LoadFailureReason },
    InvalidTransition(InvalidTransition),
    /// Programming-level fault; the offending request was ignored
    InvariantViolation(&'static str),
    Settings { path: String, reason: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelLoad { level, reason } => {
                write!(f, "failed to load level `{level}`: {reason}")
            }
            Self::InvalidTransition(t) => write!(f, "{t}"),
            Self::InvariantViolation(what) => write!(f, "invariant violation: {what}"),
            Self::Settings { path, reason } => {
                write!(f, "failed to load settings from {path}: {reason}")
            }
        }
    }
}

impl std::error::Error for GameError {}

impl From<InvalidTransition> for GameError {
    fn from(t: InvalidTransition) -> Self {
        Self::InvalidTransition(t)
    }
}
