//! Interpreter status, suspension points and resume inputs

use serde::{Deserialize, Serialize};

/// Where the interpreter currently stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    /// Not started, or reset
    #[default]
    Idle,
    /// Waiting for something outside the interpreter
    Paused(Suspension),
    /// Cursor is past the last event
    Finished,
}

impl Status {
    pub fn is_finished(&self) -> bool {
        matches!(self, Status::Finished)
    }

    pub fn suspension(&self) -> Option<&Suspension> {
        match self {
            Status::Paused(suspension) => Some(suspension),
            _ => None,
        }
    }
}

/// Why the interpreter returned control to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suspension {
    /// A text message is showing; the player must confirm it
    AwaitingConfirm,
    /// A choice menu is open
    AwaitingChoice,
    /// An actor is walking; resumes when it hands back its completion
    AwaitingWalk { actor: String },
}

/// External input that lets a paused interpreter continue
#[derive(Debug)]
pub enum Resume {
    /// Confirm key pressed on a text message
    Confirm,
    /// Choice menu option activated (0-based)
    Choice(usize),
    /// An actor finished the walk it was given
    WalkFinished(WalkCompletion),
}

/// One-shot completion handle given to an actor with each scripted walk
///
/// The actor keeps it while moving and hands it back on arrival. It cannot be
/// cloned, so a walk completes at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a walk only completes when its completion is handed back"]
pub struct WalkCompletion {
    ticket: u64,
}

impl WalkCompletion {
    pub(crate) fn new(ticket: u64) -> Self {
        Self { ticket }
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}
