//! Compass directions, positions and facing directives

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four directions an actor can face or walk in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in screen coordinates (y grows downwards)
    pub fn unit(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position `distance` pixels away in `direction`
    pub fn offset(self, direction: Direction, distance: f32) -> Self {
        let (dx, dy) = direction.unit();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }

    pub fn distance_to(self, other: Position) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// How the speaking actor should orient itself when a text message shows
///
/// Authored as a plain string: `"up"`, `"down"`, `"left"`, `"right"`,
/// `"mainChar"` (turn towards the player) or `"keep"`. A missing value means
/// keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum FacingDirective {
    /// Face this direction verbatim
    Toward(Direction),
    /// Turn towards the player based on relative position
    FacePlayer,
    /// Re-apply whatever direction the actor currently has
    #[default]
    Keep,
}

impl TryFrom<String> for FacingDirective {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "mainChar" => Ok(FacingDirective::FacePlayer),
            "keep" | "" => Ok(FacingDirective::Keep),
            other => Direction::parse(other)
                .map(FacingDirective::Toward)
                .ok_or_else(|| format!("unknown facing directive '{other}'")),
        }
    }
}

impl From<FacingDirective> for String {
    fn from(value: FacingDirective) -> Self {
        match value {
            FacingDirective::Toward(direction) => direction.as_str().to_string(),
            FacingDirective::FacePlayer => "mainChar".to_string(),
            FacingDirective::Keep => "keep".to_string(),
        }
    }
}
