//! # budgetville
//!
//! The cutscene engine of a small town-simulation game. NPCs carry several
//! authored scripts; when the player talks to one, the dialogue selector picks
//! the most specific script whose flags are satisfied, and an interpreter plays
//! it event by event: text messages (optionally gated by flags, optionally with
//! a choice menu), scripted walks, flag writes and money transactions.
//!
//! The interpreter owns no game objects. Flags, actors, the wallet and the
//! screen are lent to it through a [`Host`] on every call, and it hands control
//! back whenever it waits on the player or on an actor.
//!
//! ## Quick Start
//!
//! ```rust
//! use budgetville::{Director, Status, Suspension};
//! use budgetville::storage::MemoryFlagStore;
//! use budgetville::town::{Cast, TownActor, World};
//! use budgetville::types::{Direction, FacingDirective, Position, Script, ScriptEvent};
//!
//! let mut cast = Cast::new();
//! cast.add(TownActor::new("Player", Position::new(192.0, 192.0), Direction::Up));
//! cast.add(TownActor::new("Banker", Position::new(192.0, 160.0), Direction::Left));
//! let mut world = World::new("Player", cast, Box::new(MemoryFlagStore::new()));
//!
//! let entries = vec![Script::from_events(vec![
//!     ScriptEvent::add_flag("metBanker", "1"),
//!     ScriptEvent::text("Welcome to the bank!", FacingDirective::FacePlayer),
//! ])];
//!
//! let mut director = Director::default();
//! let (token, status) = director.begin("Banker", "Player", &entries, &mut world.host())?;
//! assert_eq!(status, Status::Paused(Suspension::AwaitingConfirm));
//! assert_eq!(world.screen.current_text(), Some("Welcome to the bank!"));
//!
//! let status = director.confirm(token, &mut world.host())?;
//! assert!(status.is_finished());
//! # Ok::<(), budgetville::error::SessionError>(())
//! ```

pub mod cli;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod host;
pub mod lint;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod town;
pub mod types;
pub mod ui;

pub use config::{EngineConfig, SelectorFallback};
pub use dialogue::{ChoiceMenu, Selection, select_entry};
pub use host::{ActorRegistry, BalanceLedger, FlagStore, Host, Presenter, WalkableActor};
pub use runtime::Interpreter;
pub use session::{Director, SessionToken};
pub use types::{
    ChoiceOption, Direction, FacingDirective, Position, Resume, Script, ScriptEvent, Status,
    Suspension, TalkingEntry, WalkCompletion,
};
