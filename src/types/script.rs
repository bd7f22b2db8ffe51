//! Scripts and NPC talking entries

use crate::error::ScriptError;
use crate::types::event::ScriptEvent;
use serde::{Deserialize, Serialize};

/// An immutable ordered list of events plus the gate used to select it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Flags that must all be present for this script to be eligible.
    /// Only consulted when choosing between scripts, never per event.
    #[serde(default)]
    pub required_flags: Vec<String>,
    /// Events to execute in order
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// One of possibly several scripts attached to an NPC
pub type TalkingEntry = Script;

impl Script {
    pub fn new(required_flags: Vec<String>, events: Vec<ScriptEvent>) -> Self {
        Self {
            required_flags,
            events,
        }
    }

    /// Ungated script
    pub fn from_events(events: Vec<ScriptEvent>) -> Self {
        Self::new(Vec::new(), events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScriptEvent> {
        self.events.get(index)
    }

    /// Index of the last event, `-1` for an empty script
    pub fn last_index(&self) -> isize {
        self.events.len() as isize - 1
    }
}

/// Parse the per-NPC authoring format: a JSON array of talking entries
pub fn parse_talking(json: &str) -> Result<Vec<TalkingEntry>, ScriptError> {
    serde_json::from_str(json).map_err(|e| ScriptError::Format {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })
}
