//! Actors that walk on their own frame ticks

use crate::host::{ActorRegistry, WalkableActor};
use crate::types::{Direction, Position, WalkCompletion};

/// Tile edge in pixels
pub const DEFAULT_TILE_SIZE: f32 = 16.0;
/// Walking speed in pixels per millisecond
pub const DEFAULT_WALK_SPEED: f32 = 0.08;

/// Animation state the sprite layer would play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementState {
    #[default]
    Idle,
    Walk,
}

#[derive(Debug)]
struct ActiveWalk {
    target: Position,
    direction: Direction,
    completion: WalkCompletion,
}

/// Player or NPC standing in the town
#[derive(Debug)]
pub struct TownActor {
    name: String,
    position: Position,
    direction: Direction,
    movement: MovementState,
    tile_size: f32,
    walk_speed: f32,
    walking: Option<ActiveWalk>,
}

impl TownActor {
    pub fn new(name: impl Into<String>, position: Position, direction: Direction) -> Self {
        Self {
            name: name.into(),
            position,
            direction,
            movement: MovementState::Idle,
            tile_size: DEFAULT_TILE_SIZE,
            walk_speed: DEFAULT_WALK_SPEED,
            walking: None,
        }
    }

    pub fn with_motion(mut self, tile_size: f32, walk_speed: f32) -> Self {
        self.tile_size = tile_size;
        self.walk_speed = walk_speed;
        self
    }

    pub fn movement(&self) -> MovementState {
        self.movement
    }

    pub fn is_walking(&self) -> bool {
        self.walking.is_some()
    }

    /// Move along the current walk. Returns the completion on the frame the
    /// actor reaches its target, and never again for that walk.
    pub fn tick(&mut self, elapsed_ms: f32) -> Option<WalkCompletion> {
        let walk = self.walking.as_ref()?;
        let remaining = self.position.distance_to(walk.target);
        let step = self.walk_speed * elapsed_ms;

        if step < remaining {
            self.position = self.position.offset(walk.direction, step);
            return None;
        }

        let walk = self.walking.take()?;
        self.position = walk.target;
        self.movement = MovementState::Idle;
        Some(walk.completion)
    }
}

impl WalkableActor for TownActor {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Position {
        self.position
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn face_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    fn walk_for_script(&mut self, tiles: u32, direction: Direction, on_complete: WalkCompletion) {
        let target = self
            .position
            .offset(direction, tiles as f32 * self.tile_size);
        self.direction = direction;
        self.movement = MovementState::Walk;
        self.walking = Some(ActiveWalk {
            target,
            direction,
            completion: on_complete,
        });
    }
}

/// The actors of the active scene, looked up by name
#[derive(Debug, Default)]
pub struct Cast {
    actors: Vec<TownActor>,
}

impl Cast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, actor: TownActor) {
        self.actors.push(actor);
    }

    pub fn get(&self, name: &str) -> Option<&TownActor> {
        self.actors.iter().find(|actor| actor.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TownActor> {
        self.actors.iter_mut().find(|actor| actor.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actors.iter().map(|actor| actor.name.as_str())
    }

    pub fn is_anyone_walking(&self) -> bool {
        self.actors.iter().any(TownActor::is_walking)
    }

    /// Advance every walker, collecting walks that finished this frame
    pub fn tick(&mut self, elapsed_ms: f32) -> Vec<WalkCompletion> {
        self.actors
            .iter_mut()
            .filter_map(|actor| actor.tick(elapsed_ms))
            .collect()
    }
}

impl ActorRegistry for Cast {
    fn lookup(&self, name: &str) -> Option<&dyn WalkableActor> {
        self.get(name).map(|actor| actor as &dyn WalkableActor)
    }

    fn lookup_mut(&mut self, name: &str) -> Option<&mut dyn WalkableActor> {
        self.get_mut(name)
            .map(|actor| actor as &mut dyn WalkableActor)
    }
}
