//! Player progress save data
//!
//! Where the player stands when a session ends, keyed by save slot name.

use crate::types::{Direction, Position};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Save slot used when none is configured
pub const DEFAULT_SAVE_KEY: &str = "Budgetville_Save1";

/// Snapshot of where the player is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub current_map: String,
    pub player_pos: Position,
    pub player_direction: Direction,
    pub save_key: String,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            current_map: "World".to_string(),
            player_pos: Position::new(192.0, 192.0),
            player_direction: Direction::Down,
            save_key: DEFAULT_SAVE_KEY.to_string(),
        }
    }
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Save data not found for key: {key}")]
    NotFound { key: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

/// Storage for progress snapshots
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Save under `progress.save_key`, replacing what was there
    async fn save(&self, progress: &Progress) -> Result<(), RepositoryError>;

    async fn load(&self, save_key: &str) -> Result<Option<Progress>, RepositoryError>;

    async fn delete(&self, save_key: &str) -> Result<(), RepositoryError>;
}

/// One JSON file per save key
pub struct JsonProgressRepository {
    base_path: PathBuf,
}

impl JsonProgressRepository {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn get_save_path(&self, save_key: &str) -> PathBuf {
        self.base_path.join(format!("{save_key}.save.json"))
    }
}

#[async_trait]
impl ProgressRepository for JsonProgressRepository {
    async fn save(&self, progress: &Progress) -> Result<(), RepositoryError> {
        let path = self.get_save_path(&progress.save_key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::IoError {
                    message: format!("Failed to create save directory: {e}"),
                })?;
        }

        let json = serde_json::to_string_pretty(progress).map_err(|e| {
            RepositoryError::SerializationError {
                message: format!("Failed to serialize progress: {e}"),
            }
        })?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|e| RepositoryError::IoError {
                message: format!("Failed to write save file {}: {}", path.display(), e),
            })
    }

    async fn load(&self, save_key: &str) -> Result<Option<Progress>, RepositoryError> {
        let path = self.get_save_path(save_key);

        if !path.exists() {
            return Ok(None);
        }

        let content =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| RepositoryError::IoError {
                    message: format!("Failed to read save file {}: {}", path.display(), e),
                })?;

        let progress =
            serde_json::from_str(&content).map_err(|e| RepositoryError::SerializationError {
                message: format!("Failed to deserialize progress: {e}"),
            })?;

        Ok(Some(progress))
    }

    async fn delete(&self, save_key: &str) -> Result<(), RepositoryError> {
        let path = self.get_save_path(save_key);

        if !path.exists() {
            return Err(RepositoryError::NotFound {
                key: save_key.to_string(),
            });
        }

        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| RepositoryError::IoError {
                message: format!("Failed to delete save file {}: {}", path.display(), e),
            })
    }
}

/// Progress kept in memory, for tests
#[derive(Default)]
pub struct InMemoryProgressRepository {
    saves: Mutex<HashMap<String, Progress>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn save(&self, progress: &Progress) -> Result<(), RepositoryError> {
        let mut saves = self.saves.lock().map_err(|e| RepositoryError::IoError {
            message: format!("Save table poisoned: {e}"),
        })?;
        saves.insert(progress.save_key.clone(), progress.clone());
        Ok(())
    }

    async fn load(&self, save_key: &str) -> Result<Option<Progress>, RepositoryError> {
        let saves = self.saves.lock().map_err(|e| RepositoryError::IoError {
            message: format!("Save table poisoned: {e}"),
        })?;
        Ok(saves.get(save_key).cloned())
    }

    async fn delete(&self, save_key: &str) -> Result<(), RepositoryError> {
        let mut saves = self.saves.lock().map_err(|e| RepositoryError::IoError {
            message: format!("Save table poisoned: {e}"),
        })?;
        saves
            .remove(save_key)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound {
                key: save_key.to_string(),
            })
    }
}
