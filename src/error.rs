//! Error types
//!
//! The interpreter itself never fails; these cover loading content,
//! persisting flags, and misuse of the interaction director.

use thiserror::Error;

/// Authoring content could not be loaded
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Invalid script data at line {line}, column {column}: {message}")]
    Format {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Flag store persistence failed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on flag file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Flag file {path} is not a JSON object of strings: {message}")]
    Corrupt { path: String, message: String },
}

/// A walk named an actor that is not in the scene
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Actor '{name}' not found in scene")]
pub struct ActorNotFound {
    pub name: String,
}

/// The interaction director was driven out of order
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("An interaction with '{npc}' is already active")]
    AlreadyActive { npc: String },

    #[error("No interaction is active")]
    NotActive,

    #[error("Session token {token} does not match the active interaction")]
    StaleToken { token: u64 },

    #[error("'{npc}' has no scripts")]
    NoScripts { npc: String },

    #[error("'{npc}' has no script whose flags are satisfied")]
    NoEligibleScript { npc: String },
}
