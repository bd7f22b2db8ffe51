//! Reference host: the town the cutscenes play in
//!
//! Bundles a cast of walking actors, a flag store, the player's wallet and a
//! recorded screen into a [`World`] that can lend the interpreter a
//! [`Host`] and be ticked frame by frame.

use crate::host::{BalanceLedger, FlagStore, Host};
use crate::types::WalkCompletion;
use crate::ui::Screen;

pub mod actor;
pub mod data;

pub use actor::{Cast, MovementState, TownActor};
pub use data::{ActorData, NpcData, TownData};

/// The player's money. Any amount is accepted, including going negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Wallet {
    balance: f64,
}

impl Wallet {
    pub fn new(balance: f64) -> Self {
        Self { balance }
    }
}

impl BalanceLedger for Wallet {
    fn balance(&self) -> f64 {
        self.balance
    }

    fn apply_delta(&mut self, amount: f64) {
        self.balance += amount;
    }
}

/// Everything a cutscene can touch
pub struct World {
    pub map: String,
    pub player: String,
    pub cast: Cast,
    pub flags: Box<dyn FlagStore>,
    pub wallet: Wallet,
    pub screen: Screen,
}

impl World {
    pub fn new(player: impl Into<String>, cast: Cast, flags: Box<dyn FlagStore>) -> Self {
        Self {
            map: "World".to_string(),
            player: player.into(),
            cast,
            flags,
            wallet: Wallet::default(),
            screen: Screen::new(),
        }
    }

    pub fn with_wallet(mut self, wallet: Wallet) -> Self {
        self.wallet = wallet;
        self
    }

    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.screen = screen;
        self
    }

    /// Lend the collaborators out for one interpreter call
    pub fn host(&mut self) -> Host<'_> {
        Host::new(
            self.flags.as_mut(),
            &mut self.cast,
            &mut self.wallet,
            &mut self.screen,
        )
    }

    /// One frame: move walkers and reveal text
    pub fn tick(&mut self, elapsed_ms: f32) -> Vec<WalkCompletion> {
        self.screen.tick();
        self.cast.tick(elapsed_ms)
    }
}
