//! Interaction sessions
//!
//! Only one cutscene may run at a time against the shared flag store. The
//! [`Director`] owns that slot: it picks the NPC's script, builds a fresh
//! interpreter for it, routes player input to it with a [`SessionToken`] and
//! tears everything down when the script finishes or is abandoned.

use crate::{
    config::{EngineConfig, SelectorFallback},
    dialogue::{self, Selection},
    error::SessionError,
    host::Host,
    runtime::Interpreter,
    types::{Resume, Status, TalkingEntry, WalkCompletion},
};

/// Proof of which interaction an input belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct ActiveInteraction {
    token: SessionToken,
    npc: String,
    selection: Selection,
    interpreter: Interpreter,
}

/// Owner of the single active interaction
#[derive(Debug)]
pub struct Director {
    config: EngineConfig,
    active: Option<ActiveInteraction>,
    next_token: u64,
    next_ticket: u64,
}

impl Director {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            active: None,
            next_token: 1,
            next_ticket: 1,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_npc(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.npc.as_str())
    }

    /// How the running script was chosen
    pub fn active_selection(&self) -> Option<Selection> {
        self.active.as_ref().map(|active| active.selection)
    }

    pub fn interpreter(&self) -> Option<&Interpreter> {
        self.active.as_ref().map(|active| &active.interpreter)
    }

    /// Start talking to `npc`.
    ///
    /// The returned status may already be `Finished` (empty script, or every
    /// message gated out), in which case the slot is free again.
    pub fn begin(
        &mut self,
        npc: &str,
        player: &str,
        entries: &[TalkingEntry],
        host: &mut Host<'_>,
    ) -> Result<(SessionToken, Status), SessionError> {
        if let Some(active) = &self.active {
            return Err(SessionError::AlreadyActive {
                npc: active.npc.clone(),
            });
        }

        let selection =
            dialogue::select_entry(entries, &*host.flags).ok_or_else(|| SessionError::NoScripts {
                npc: npc.to_string(),
            })?;

        if selection.is_fallback() {
            match self.config.selector_fallback {
                SelectorFallback::StayIdle => {
                    log::info!("No eligible script for '{npc}'; staying idle");
                    return Err(SessionError::NoEligibleScript {
                        npc: npc.to_string(),
                    });
                }
                SelectorFallback::PlayFirst => {
                    log::warn!("No eligible script for '{npc}'; playing its first entry");
                }
            }
        }

        let token = SessionToken(self.next_token);
        self.next_token += 1;

        let script = entries[selection.index()].clone();
        let mut interpreter = Interpreter::new(script)
            .with_debug(self.config.debug.clone())
            .with_first_ticket(self.next_ticket);

        log::debug!(
            "Interaction {} with '{}' using entry {}",
            token.0,
            npc,
            selection.index()
        );
        let status = interpreter.start(player, Some(npc), host);
        self.active = Some(ActiveInteraction {
            token,
            npc: npc.to_string(),
            selection,
            interpreter,
        });

        Ok((token, self.settle(status, host)))
    }

    /// Confirm key. Finishes the typewriter first if text is still appearing.
    pub fn confirm(
        &mut self,
        token: SessionToken,
        host: &mut Host<'_>,
    ) -> Result<Status, SessionError> {
        let active = self.active_mut(token)?;
        if host.ui.is_typing() {
            host.ui.skip_typing();
            return Ok(active.interpreter.status().clone());
        }

        let status = active.interpreter.resume(Resume::Confirm, host);
        Ok(self.settle(status, host))
    }

    /// A choice menu option was activated
    pub fn choose(
        &mut self,
        token: SessionToken,
        index: usize,
        host: &mut Host<'_>,
    ) -> Result<Status, SessionError> {
        let active = self.active_mut(token)?;
        let status = active.interpreter.resume(Resume::Choice(index), host);
        Ok(self.settle(status, host))
    }

    /// An actor handed back a walk completion
    pub fn walk_finished(
        &mut self,
        token: SessionToken,
        completion: WalkCompletion,
        host: &mut Host<'_>,
    ) -> Result<Status, SessionError> {
        let active = self.active_mut(token)?;
        let status = active
            .interpreter
            .resume(Resume::WalkFinished(completion), host);
        Ok(self.settle(status, host))
    }

    /// Drop the running interaction wherever it is
    pub fn abandon(&mut self, token: SessionToken, host: &mut Host<'_>) -> Result<(), SessionError> {
        self.active_mut(token)?;
        self.end(host);
        Ok(())
    }

    fn active_mut(&mut self, token: SessionToken) -> Result<&mut ActiveInteraction, SessionError> {
        match self.active.as_mut() {
            None => Err(SessionError::NotActive),
            Some(active) if active.token != token => {
                Err(SessionError::StaleToken { token: token.0 })
            }
            Some(active) => Ok(active),
        }
    }

    fn settle(&mut self, status: Status, host: &mut Host<'_>) -> Status {
        if status.is_finished() {
            self.end(host);
        }
        status
    }

    fn end(&mut self, host: &mut Host<'_>) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        // Walkers from this interaction may still arrive later
        self.next_ticket = active.interpreter.next_ticket();

        host.ui.hide_choices();
        host.ui.hide_text();
        active.interpreter.reset(host.flags);
        if let Err(err) = host.flags.flush() {
            log::error!("Failed to persist flags after talking to '{}': {err}", active.npc);
        }
        log::info!("Interaction {} with '{}' ended", active.token.0, active.npc);
    }
}

impl Default for Director {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
