//! Script events as authored in NPC talking data

use crate::types::direction::{Direction, FacingDirective};
use serde::{Deserialize, Serialize};

/// A single step of a script
///
/// Serialized with a `type` tag matching the authoring format:
/// `textMessage`, `walk`, `addFlag`, `removeFlag`, `transaction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScriptEvent {
    /// Show a line of text, optionally gated and optionally offering choices
    TextMessage {
        text: String,
        #[serde(default, rename = "direction")]
        facing: FacingDirective,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        required_flags: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        choices: Vec<ChoiceOption>,
    },
    /// Move an actor a whole number of tiles
    Walk {
        tile_distance: u32,
        direction: Direction,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actor_ref: Option<String>,
    },
    /// Persist a flag
    AddFlag {
        #[serde(alias = "flag")]
        key: String,
        value: String,
    },
    /// Delete a flag
    RemoveFlag {
        #[serde(alias = "flag")]
        key: String,
    },
    /// Apply a signed amount to the player's balance
    Transaction { amount: f64 },
}

impl ScriptEvent {
    /// Plain text message facing the given way, no gate, no choices
    pub fn text(text: impl Into<String>, facing: FacingDirective) -> Self {
        ScriptEvent::TextMessage {
            text: text.into(),
            facing,
            required_flags: Vec::new(),
            choices: Vec::new(),
        }
    }

    pub fn walk(tile_distance: u32, direction: Direction) -> Self {
        ScriptEvent::Walk {
            tile_distance,
            direction,
            actor_ref: None,
        }
    }

    pub fn add_flag(key: impl Into<String>, value: impl Into<String>) -> Self {
        ScriptEvent::AddFlag {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn remove_flag(key: impl Into<String>) -> Self {
        ScriptEvent::RemoveFlag { key: key.into() }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptEvent::TextMessage { .. } => "textMessage",
            ScriptEvent::Walk { .. } => "walk",
            ScriptEvent::AddFlag { .. } => "addFlag",
            ScriptEvent::RemoveFlag { .. } => "removeFlag",
            ScriptEvent::Transaction { .. } => "transaction",
        }
    }
}

/// One selectable answer in a choice menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    #[serde(alias = "content")]
    pub label: String,
    pub flag: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            flag: flag.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_message_defaults_optional_fields() {
        let event: ScriptEvent =
            serde_json::from_str(r#"{"type": "textMessage", "text": "Helloooo"}"#).unwrap();
        assert_eq!(
            event,
            ScriptEvent::text("Helloooo", FacingDirective::Keep)
        );
    }

    #[test]
    fn walk_reads_camel_case_fields() {
        let event: ScriptEvent = serde_json::from_str(
            r#"{"type": "walk", "tileDistance": 3, "direction": "up", "actorRef": "Banker"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ScriptEvent::Walk {
                tile_distance: 3,
                direction: Direction::Up,
                actor_ref: Some("Banker".to_string()),
            }
        );
    }

    #[test]
    fn flag_events_accept_flag_alias() {
        let event: ScriptEvent =
            serde_json::from_str(r#"{"type": "addFlag", "flag": "metBanker", "value": "1"}"#)
                .unwrap();
        assert_eq!(event, ScriptEvent::add_flag("metBanker", "1"));

        let event: ScriptEvent =
            serde_json::from_str(r#"{"type": "removeFlag", "flag": "metBanker"}"#).unwrap();
        assert_eq!(event, ScriptEvent::remove_flag("metBanker"));
    }

    #[test]
    fn choice_option_accepts_content_alias() {
        let option: ChoiceOption =
            serde_json::from_str(r#"{"content": "Sure", "flag": "saidYes"}"#).unwrap();
        assert_eq!(option, ChoiceOption::new("Sure", "saidYes"));
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let event: Result<ScriptEvent, _> = serde_json::from_str(r#"{"type": "dance"}"#);
        assert!(event.is_err());
    }
}
