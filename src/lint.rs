//! Static checks over authored talking entries

use crate::types::{ScriptEvent, TalkingEntry};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// One finding, located by NPC, entry and event index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub npc: String,
    pub entry: Option<usize>,
    pub event: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    fn new(severity: Severity, npc: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            npc: npc.to_string(),
            entry: None,
            event: None,
            message: message.into(),
        }
    }

    fn at(mut self, entry: usize, event: Option<usize>) -> Self {
        self.entry = Some(entry);
        self.event = event;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}: {}", self.npc)?;
        if let Some(entry) = self.entry {
            write!(f, " entry {entry}")?;
        }
        if let Some(event) = self.event {
            write!(f, " event {event}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Check one NPC's entries. `known_actors` are the names a walk may target.
pub fn check_entries(npc: &str, entries: &[TalkingEntry], known_actors: &[&str]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if entries.is_empty() {
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            npc,
            "has no talking entries",
        ));
        return diagnostics;
    }

    for (entry_index, entry) in entries.iter().enumerate() {
        if entry.is_empty() {
            diagnostics.push(
                Diagnostic::new(Severity::Warning, npc, "entry has no events").at(entry_index, None),
            );
        }

        for (event_index, event) in entry.events.iter().enumerate() {
            check_event(npc, event, known_actors, &mut diagnostics, entry_index, event_index);
        }
    }

    check_reachability(npc, entries, &mut diagnostics);
    diagnostics
}

fn check_event(
    npc: &str,
    event: &ScriptEvent,
    known_actors: &[&str],
    diagnostics: &mut Vec<Diagnostic>,
    entry: usize,
    index: usize,
) {
    match event {
        ScriptEvent::Walk {
            tile_distance,
            actor_ref,
            ..
        } => {
            if let Some(actor) = actor_ref
                && !known_actors.contains(&actor.as_str())
            {
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Error,
                        npc,
                        format!("walk names unknown actor '{actor}'"),
                    )
                    .at(entry, Some(index)),
                );
            }
            if *tile_distance == 0 {
                diagnostics.push(
                    Diagnostic::new(Severity::Warning, npc, "walk of zero tiles")
                        .at(entry, Some(index)),
                );
            }
        }
        ScriptEvent::TextMessage { choices, .. } => {
            let mut seen = HashSet::new();
            for choice in choices {
                if choice.label.trim().is_empty() || choice.flag.trim().is_empty() {
                    diagnostics.push(
                        Diagnostic::new(
                            Severity::Error,
                            npc,
                            "choice option needs both a label and a flag",
                        )
                        .at(entry, Some(index)),
                    );
                }
                if !choice.flag.is_empty() && !seen.insert(choice.flag.as_str()) {
                    diagnostics.push(
                        Diagnostic::new(
                            Severity::Warning,
                            npc,
                            format!("choice flag '{}' used by more than one option", choice.flag),
                        )
                        .at(entry, Some(index)),
                    );
                }
            }
        }
        ScriptEvent::AddFlag { key, .. } | ScriptEvent::RemoveFlag { key } => {
            if key.trim().is_empty() {
                diagnostics.push(
                    Diagnostic::new(Severity::Error, npc, "flag event with empty key")
                        .at(entry, Some(index)),
                );
            }
        }
        ScriptEvent::Transaction { amount } => {
            if !amount.is_finite() {
                diagnostics.push(
                    Diagnostic::new(Severity::Error, npc, "transaction amount is not finite")
                        .at(entry, Some(index)),
                );
            }
        }
    }
}

/// An entry can only win selection by requiring strictly more flags than
/// every entry it could be compared against.
fn check_reachability(npc: &str, entries: &[TalkingEntry], diagnostics: &mut Vec<Diagnostic>) {
    let head_len = entries[0].required_flags.len();

    for (index, entry) in entries.iter().enumerate().skip(1) {
        let len = entry.required_flags.len();
        if len <= head_len {
            diagnostics.push(
                Diagnostic::new(
                    Severity::Warning,
                    npc,
                    format!(
                        "entry is never selected: it needs {len} flag(s), the first entry needs {head_len}"
                    ),
                )
                .at(index, None),
            );
            continue;
        }

        let gate: HashSet<&str> = entry.required_flags.iter().map(String::as_str).collect();
        let shadowed_by = entries[1..index].iter().position(|earlier| {
            earlier.required_flags.len() >= len
                && earlier
                    .required_flags
                    .iter()
                    .all(|flag| gate.contains(flag.as_str()))
        });
        if let Some(earlier) = shadowed_by {
            diagnostics.push(
                Diagnostic::new(
                    Severity::Warning,
                    npc,
                    format!("entry is never selected: entry {} always wins first", earlier + 1),
                )
                .at(index, None),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChoiceOption, Direction, FacingDirective, Script};

    fn gated(flags: &[&str], events: Vec<ScriptEvent>) -> TalkingEntry {
        Script::new(flags.iter().map(|f| f.to_string()).collect(), events)
    }

    #[test]
    fn clean_entries_have_no_findings() {
        let entries = vec![
            gated(&[], vec![ScriptEvent::text("Hi", FacingDirective::FacePlayer)]),
            gated(&["metBanker"], vec![ScriptEvent::walk(2, Direction::Up)]),
        ];
        assert!(check_entries("Banker", &entries, &["Player", "Banker"]).is_empty());
    }

    #[test]
    fn reports_missing_entries() {
        let diagnostics = check_entries("Ghost", &[], &[]);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_error());
    }

    #[test]
    fn reports_unknown_walker_and_zero_walk() {
        let entries = vec![gated(
            &[],
            vec![ScriptEvent::Walk {
                tile_distance: 0,
                direction: Direction::Left,
                actor_ref: Some("Mayor".to_string()),
            }],
        )];

        let diagnostics = check_entries("Banker", &entries, &["Player", "Banker"]);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.contains("Mayor"));
        assert_eq!(diagnostics[0].event, Some(0));
        assert_eq!(diagnostics[1].severity, Severity::Warning);
    }

    #[test]
    fn reports_bad_choices() {
        let entries = vec![gated(
            &[],
            vec![ScriptEvent::TextMessage {
                text: "Deposit?".to_string(),
                facing: FacingDirective::Keep,
                required_flags: Vec::new(),
                choices: vec![
                    ChoiceOption::new("Yes", "deposit"),
                    ChoiceOption::new("Sure", "deposit"),
                    ChoiceOption::new("", "no"),
                ],
            }],
        )];

        let diagnostics = check_entries("Banker", &entries, &[]);
        assert_eq!(
            diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Warning)
                .count(),
            1
        );
        assert_eq!(diagnostics.iter().filter(|d| d.is_error()).count(), 1);
    }

    #[test]
    fn reports_unreachable_entries() {
        let entries = vec![
            gated(&["a"], vec![]),
            gated(&["b"], vec![ScriptEvent::add_flag("x", "1")]),
            gated(&["a", "b"], vec![ScriptEvent::add_flag("y", "1")]),
            gated(&["a", "b"], vec![ScriptEvent::add_flag("z", "1")]),
        ];

        let diagnostics = check_entries("Banker", &entries, &[]);
        let unreachable: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.message.contains("never selected"))
            .map(|d| d.entry)
            .collect();
        assert_eq!(unreachable, vec![Some(1), Some(3)]);
    }

    #[test]
    fn display_includes_location() {
        let diagnostic = Diagnostic::new(Severity::Error, "Banker", "boom").at(2, Some(4));
        assert_eq!(diagnostic.to_string(), "error: Banker entry 2 event 4: boom");
    }
}
