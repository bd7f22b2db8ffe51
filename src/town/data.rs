//! Town content file: the player, the NPCs and what they say
//!
//! ```json
//! {
//!   "map": "World",
//!   "balance": 20,
//!   "player": { "name": "Player", "pos": { "x": 192, "y": 192 } },
//!   "npcs": [
//!     {
//!       "name": "TestNpc",
//!       "pos": { "x": 100, "y": 100 },
//!       "talking": [
//!         { "requiredFlags": [], "events": [ { "type": "textMessage", "text": "Helloooo" } ] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::config::EngineConfig;
use crate::error::ScriptError;
use crate::host::FlagStore;
use crate::town::{Cast, TownActor, Wallet, World};
use crate::types::{Direction, Position, TalkingEntry};
use crate::ui::Screen;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_map() -> String {
    "World".to_string()
}

/// Where an actor starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorData {
    pub name: String,
    pub pos: Position,
    #[serde(default)]
    pub direction: Direction,
}

/// An NPC and its talking entries, in authoring order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcData {
    pub name: String,
    pub pos: Position,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub talking: Vec<TalkingEntry>,
}

/// A whole town file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TownData {
    #[serde(default = "default_map")]
    pub map: String,
    #[serde(default)]
    pub balance: f64,
    pub player: ActorData,
    #[serde(default)]
    pub npcs: Vec<NpcData>,
}

impl TownData {
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json).map_err(|e| ScriptError::Format {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn npc(&self, name: &str) -> Option<&NpcData> {
        self.npcs.iter().find(|npc| npc.name == name)
    }

    /// Talking entries of `npc`, if it exists
    pub fn talking(&self, npc: &str) -> Option<&[TalkingEntry]> {
        self.npc(npc).map(|npc| npc.talking.as_slice())
    }

    /// Every actor name in the town, player first
    pub fn actor_names(&self) -> Vec<&str> {
        std::iter::once(self.player.name.as_str())
            .chain(self.npcs.iter().map(|npc| npc.name.as_str()))
            .collect()
    }

    /// Place everyone and build a world around `flags`
    pub fn build_world(&self, flags: Box<dyn FlagStore>, config: &EngineConfig) -> World {
        let mut cast = Cast::new();
        cast.add(
            TownActor::new(&self.player.name, self.player.pos, self.player.direction)
                .with_motion(config.tile_size, config.walk_speed),
        );
        for npc in &self.npcs {
            cast.add(
                TownActor::new(&npc.name, npc.pos, npc.direction)
                    .with_motion(config.tile_size, config.walk_speed),
            );
        }

        let mut world = World::new(&self.player.name, cast, flags)
            .with_wallet(Wallet::new(self.balance))
            .with_screen(Screen::with_text_speed(config.text_speed));
        world.map = self.map.clone();
        world
    }
}
