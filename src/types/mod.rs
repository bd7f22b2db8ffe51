//! Core types for the budgetville cutscene engine
//!
//! This module contains the data model shared by the interpreter, the
//! dialogue selector and the host:
//! - Direction / Position: where actors are and which way they look
//! - ScriptEvent: one step of an authored script
//! - Script: an ordered list of events plus its selection gate
//! - Flow: interpreter status, suspension reasons and resume inputs

pub mod direction;
pub mod event;
pub mod flow;
pub mod script;

pub use direction::{Direction, FacingDirective, Position};
pub use event::{ChoiceOption, ScriptEvent};
pub use flow::{Resume, Status, Suspension, WalkCompletion};
pub use script::{Script, TalkingEntry};
