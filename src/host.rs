//! Collaborators the interpreter drives
//!
//! The interpreter owns no game objects. Every call receives a [`Host`] that
//! lends it the flag store, the scene's actors, the balance ledger and the
//! presentation layer for the duration of that call.

use crate::error::{ActorNotFound, StoreError};
use crate::types::{ChoiceOption, Direction, Position, WalkCompletion};

/// Persistent string-to-string flag storage
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    fn remove(&mut self, key: &str);

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Write pending changes to durable storage
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Anything that can stand somewhere, turn, and walk on request
pub trait WalkableActor {
    fn name(&self) -> &str;

    fn position(&self) -> Position;

    /// Live facing direction
    fn direction(&self) -> Direction;

    fn face_direction(&mut self, direction: Direction);

    /// Start a straight walk of `tiles` tiles. The actor moves itself on its own
    /// frame ticks and hands `on_complete` back to the host when it arrives.
    fn walk_for_script(&mut self, tiles: u32, direction: Direction, on_complete: WalkCompletion);
}

/// Name lookup over the active scene's actors
pub trait ActorRegistry {
    fn lookup(&self, name: &str) -> Option<&dyn WalkableActor>;

    fn lookup_mut(&mut self, name: &str) -> Option<&mut dyn WalkableActor>;

    fn require_mut(&mut self, name: &str) -> Result<&mut dyn WalkableActor, ActorNotFound> {
        self.lookup_mut(name).ok_or_else(|| ActorNotFound {
            name: name.to_string(),
        })
    }
}

/// The player's money
pub trait BalanceLedger {
    fn balance(&self) -> f64;

    /// Apply a signed amount. No floor or ceiling is enforced here.
    fn apply_delta(&mut self, amount: f64);
}

/// Text box, choice menu and balance HUD
pub trait Presenter {
    fn show_text(&mut self, text: &str);

    fn hide_text(&mut self);

    fn show_choices(&mut self, options: &[ChoiceOption]);

    fn hide_choices(&mut self);

    fn refresh_balance(&mut self, balance: f64);

    /// Whether a text reveal animation is still running
    fn is_typing(&self) -> bool {
        false
    }

    fn skip_typing(&mut self) {}
}

/// Borrowed bundle of collaborators for one interpreter call
pub struct Host<'a> {
    pub flags: &'a mut dyn FlagStore,
    pub actors: &'a mut dyn ActorRegistry,
    pub ledger: &'a mut dyn BalanceLedger,
    pub ui: &'a mut dyn Presenter,
}

impl<'a> Host<'a> {
    pub fn new(
        flags: &'a mut dyn FlagStore,
        actors: &'a mut dyn ActorRegistry,
        ledger: &'a mut dyn BalanceLedger,
        ui: &'a mut dyn Presenter,
    ) -> Self {
        Self {
            flags,
            actors,
            ledger,
            ui,
        }
    }

    /// True when every flag in `required` is present
    pub fn flags_satisfied(&self, required: &[String]) -> bool {
        required.iter().all(|flag| self.flags.contains(flag))
    }
}
