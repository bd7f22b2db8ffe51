//! Scripted event interpreter
//!
//! An [`Interpreter`] walks one script from its first event to its last. It
//! runs transparent events (flag writes, transactions, gated-out messages)
//! back to back inside a single call and returns control to the host whenever
//! it needs something from outside: a confirm key, a menu choice, or an actor
//! arriving at the end of a walk. The host feeds that input back through
//! [`Interpreter::resume`].

use crate::{
    dialogue::ChoiceMenu,
    host::{FlagStore, Host},
    types::{Resume, Script, ScriptEvent, Status, Suspension, WalkCompletion},
};
use std::collections::BTreeSet;
use std::sync::Arc;

pub mod debug;
pub mod facing;


use debug::{DebugCategory, DebugConfig, LogLevel};

/// Value stored under a choice option's flag when it is picked
pub const CHOICE_FLAG_VALUE: &str = "true";

/// Outcome of dispatching a single event
enum Dispatch {
    Advance,
    Suspend(Suspension),
}

/// Who the running script is bound to
#[derive(Debug, Clone)]
struct Binding {
    player: String,
    initiator: Option<String>,
}

/// Executes one script against the host's collaborators
#[derive(Debug)]
pub struct Interpreter {
    script: Arc<Script>,
    cursor: usize,
    binding: Option<Binding>,
    status: Status,
    pending_choice: Option<ChoiceMenu>,
    pending_walk: Option<u64>,
    next_ticket: u64,
    ephemeral_flags: BTreeSet<String>,
    debug: DebugConfig,
}

impl Interpreter {
    pub fn new(script: impl Into<Arc<Script>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
            binding: None,
            status: Status::Idle,
            pending_choice: None,
            pending_walk: None,
            next_ticket: 1,
            ephemeral_flags: BTreeSet::new(),
            debug: DebugConfig::default(),
        }
    }

    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.debug = debug;
        self
    }

    /// Number walk tickets from `ticket` on. Interpreters that share a scene
    /// must not reuse each other's tickets.
    pub fn with_first_ticket(mut self, ticket: u64) -> Self {
        self.next_ticket = ticket;
        self
    }

    /// Bind the actors, rewind, and run until the first suspension
    pub fn start(&mut self, player: &str, initiator: Option<&str>, host: &mut Host<'_>) -> Status {
        self.purge_ephemeral(host.flags);
        self.cursor = 0;
        self.pending_choice = None;
        self.pending_walk = None;
        self.binding = Some(Binding {
            player: player.to_string(),
            initiator: initiator.map(str::to_string),
        });

        debug::log(
            &self.debug,
            DebugCategory::Engine,
            LogLevel::Info,
            &format!(
                "[Start] player={} initiator={:?} events={}",
                player,
                initiator,
                self.script.len()
            ),
        );

        self.continue_to_next_event(host)
    }

    /// Process the event under the cursor, then keep going until something
    /// needs outside input or the script runs out.
    ///
    /// Calling this while paused dispatches the current event again.
    pub fn continue_to_next_event(&mut self, host: &mut Host<'_>) -> Status {
        if self.binding.is_none() {
            return self.status.clone();
        }
        self.pending_choice = None;
        self.pending_walk = None;

        let script = Arc::clone(&self.script);
        loop {
            let Some(event) = script.get(self.cursor) else {
                return self.finish();
            };

            debug::log(
                &self.debug,
                DebugCategory::Engine,
                LogLevel::Trace,
                &format!(
                    "[Engine] Executing index={} kind={} event={:?}",
                    self.cursor,
                    event.kind(),
                    event
                ),
            );

            match self.dispatch(event, host) {
                Dispatch::Advance => self.cursor += 1,
                Dispatch::Suspend(suspension) => {
                    debug::log(
                        &self.debug,
                        DebugCategory::Flow,
                        LogLevel::Debug,
                        &format!("[Flow] Paused at index={} ({:?})", self.cursor, suspension),
                    );
                    self.status = Status::Paused(suspension);
                    return self.status.clone();
                }
            }
        }
    }

    /// Feed outside input back in. Input that does not answer the current
    /// suspension is ignored.
    pub fn resume(&mut self, input: Resume, host: &mut Host<'_>) -> Status {
        let suspension = self.status.suspension().cloned();

        match (suspension, input) {
            (Some(Suspension::AwaitingConfirm), Resume::Confirm) => {
                self.cursor += 1;
                self.continue_to_next_event(host)
            }
            (Some(Suspension::AwaitingChoice), Resume::Choice(index)) => {
                self.resolve_choice(index, host)
            }
            (Some(Suspension::AwaitingWalk { actor }), Resume::WalkFinished(completion)) => {
                self.finish_walk(&actor, completion, host)
            }
            (suspension, input) => {
                debug::log(
                    &self.debug,
                    DebugCategory::Flow,
                    LogLevel::Debug,
                    &format!("[Flow] Ignoring {:?} while {:?}", input, suspension),
                );
                self.status.clone()
            }
        }
    }

    /// Abandon the script: purge choice flags and rewind. Safe to call at any
    /// point, any number of times.
    pub fn reset(&mut self, flags: &mut dyn FlagStore) {
        self.purge_ephemeral(flags);
        self.cursor = 0;
        self.binding = None;
        self.pending_choice = None;
        self.pending_walk = None;
        self.status = Status::Idle;
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.script.len()
    }

    pub fn is_waiting_for_choice(&self) -> bool {
        self.pending_choice
            .as_ref()
            .is_some_and(ChoiceMenu::is_waiting_for_choice)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// Index of the last event, `-1` for an empty script
    pub fn max_index(&self) -> isize {
        self.script.last_index()
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Ticket the next walk will be issued
    pub fn next_ticket(&self) -> u64 {
        self.next_ticket
    }

    pub fn choice_menu(&self) -> Option<&ChoiceMenu> {
        self.pending_choice.as_ref()
    }

    /// Flags set by choices in this run
    pub fn ephemeral_flags(&self) -> &BTreeSet<String> {
        &self.ephemeral_flags
    }

    fn dispatch(&mut self, event: &ScriptEvent, host: &mut Host<'_>) -> Dispatch {
        match event {
            ScriptEvent::TextMessage {
                text,
                facing,
                required_flags,
                choices,
            } => {
                if !host.flags_satisfied(required_flags) {
                    debug::log(
                        &self.debug,
                        DebugCategory::Flow,
                        LogLevel::Debug,
                        &format!(
                            "[Gate] Skipping message at index={}, requires {:?}",
                            self.cursor, required_flags
                        ),
                    );
                    return Dispatch::Advance;
                }

                host.ui.show_text(text);
                self.apply_facing(*facing, host);

                if choices.is_empty() {
                    Dispatch::Suspend(Suspension::AwaitingConfirm)
                } else {
                    self.pending_choice = Some(ChoiceMenu::open(choices.clone(), host.ui));
                    Dispatch::Suspend(Suspension::AwaitingChoice)
                }
            }
            ScriptEvent::Walk {
                tile_distance,
                direction,
                actor_ref,
            } => {
                host.ui.hide_text();
                let name = self.walker_name(actor_ref.as_deref());

                match host.actors.require_mut(&name) {
                    Ok(actor) => {
                        let ticket = self.next_ticket;
                        self.next_ticket += 1;
                        self.pending_walk = Some(ticket);

                        debug::log(
                            &self.debug,
                            DebugCategory::Actors,
                            LogLevel::Debug,
                            &format!(
                                "[Walk] {} walks {} tile(s) {} (ticket {})",
                                name, tile_distance, direction, ticket
                            ),
                        );
                        actor.walk_for_script(
                            *tile_distance,
                            *direction,
                            WalkCompletion::new(ticket),
                        );
                        Dispatch::Suspend(Suspension::AwaitingWalk { actor: name })
                    }
                    Err(err) => {
                        log::warn!("{err}; skipping walk at index {}", self.cursor);
                        Dispatch::Advance
                    }
                }
            }
            ScriptEvent::AddFlag { key, value } => {
                debug::log(
                    &self.debug,
                    DebugCategory::Flags,
                    LogLevel::Debug,
                    &format!("[Flag] Setting {}={}", key, value),
                );
                host.flags.set(key, value);
                Dispatch::Advance
            }
            ScriptEvent::RemoveFlag { key } => {
                debug::log(
                    &self.debug,
                    DebugCategory::Flags,
                    LogLevel::Debug,
                    &format!("[Flag] Removing {}", key),
                );
                host.flags.remove(key);
                Dispatch::Advance
            }
            ScriptEvent::Transaction { amount } => {
                host.ledger.apply_delta(*amount);
                let balance = host.ledger.balance();
                debug::log(
                    &self.debug,
                    DebugCategory::Ledger,
                    LogLevel::Debug,
                    &format!("[Ledger] Applied {} -> balance {}", amount, balance),
                );
                host.ui.refresh_balance(balance);
                Dispatch::Advance
            }
        }
    }

    fn resolve_choice(&mut self, index: usize, host: &mut Host<'_>) -> Status {
        let Some(menu) = self.pending_choice.as_mut() else {
            return self.status.clone();
        };
        let Some(option) = menu.select(index, host.ui) else {
            debug::log(
                &self.debug,
                DebugCategory::Flow,
                LogLevel::Debug,
                &format!("[Choice] Ignoring option {} at index={}", index, self.cursor),
            );
            return self.status.clone();
        };

        debug::log(
            &self.debug,
            DebugCategory::Flags,
            LogLevel::Debug,
            &format!("[Choice] '{}' chose flag {}", option.label, option.flag),
        );
        host.flags.set(&option.flag, CHOICE_FLAG_VALUE);
        self.ephemeral_flags.insert(option.flag);
        self.pending_choice = None;
        self.cursor += 1;
        self.continue_to_next_event(host)
    }

    fn finish_walk(
        &mut self,
        actor: &str,
        completion: WalkCompletion,
        host: &mut Host<'_>,
    ) -> Status {
        if self.pending_walk != Some(completion.ticket()) {
            debug::log(
                &self.debug,
                DebugCategory::Actors,
                LogLevel::Debug,
                &format!(
                    "[Walk] Ignoring stale completion ticket {} (waiting on {:?})",
                    completion.ticket(),
                    self.pending_walk
                ),
            );
            return self.status.clone();
        }

        debug::log(
            &self.debug,
            DebugCategory::Actors,
            LogLevel::Debug,
            &format!("[Walk] {} arrived", actor),
        );
        self.pending_walk = None;
        self.cursor += 1;
        self.continue_to_next_event(host)
    }

    fn apply_facing(&self, directive: crate::types::FacingDirective, host: &mut Host<'_>) {
        let Some(binding) = &self.binding else {
            return;
        };
        // Player-triggered scripts have no speaker to turn
        let Some(speaker) = binding.initiator.as_deref() else {
            return;
        };

        let player = host
            .actors
            .lookup(&binding.player)
            .map(|actor| actor.position());
        let Some(actor) = host.actors.lookup_mut(speaker) else {
            log::warn!("Speaker '{speaker}' not found in scene; facing unchanged");
            return;
        };

        let direction = facing::resolve(directive, actor.position(), actor.direction(), player);
        debug::log(
            &self.debug,
            DebugCategory::Actors,
            LogLevel::Trace,
            &format!("[Face] {} faces {} ({:?})", speaker, direction, directive),
        );
        actor.face_direction(direction);
    }

    /// Explicit actor, else the initiator, else the player
    fn walker_name(&self, actor_ref: Option<&str>) -> String {
        if let Some(name) = actor_ref {
            return name.to_string();
        }
        match &self.binding {
            Some(binding) => binding
                .initiator
                .clone()
                .unwrap_or_else(|| binding.player.clone()),
            None => String::new(),
        }
    }

    fn finish(&mut self) -> Status {
        if !self.status.is_finished() {
            log::info!(
                "Cutscene finished at index {} (max index {})",
                self.cursor,
                self.max_index()
            );
        }
        self.status = Status::Finished;
        Status::Finished
    }

    fn purge_ephemeral(&mut self, flags: &mut dyn FlagStore) {
        for flag in std::mem::take(&mut self.ephemeral_flags) {
            debug::log(
                &self.debug,
                DebugCategory::Flags,
                LogLevel::Debug,
                &format!("[Reset] Purging choice flag {}", flag),
            );
            flags.remove(&flag);
        }
    }
}
