//! Resolving which way a speaker turns

use crate::types::{Direction, FacingDirective, Position};

/// Direction an NPC at `npc` must face to look at a player at `player`.
/// Ties between the axes go to the vertical branch.
pub fn face_toward(npc: Position, player: Position) -> Direction {
    let dx = player.x - npc.x;
    let dy = player.y - npc.y;

    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Turn a directive into a concrete direction.
///
/// `current` is the speaker's live direction, read at the moment the message
/// shows; `player` is only needed for `FacePlayer`.
pub fn resolve(
    directive: FacingDirective,
    speaker: Position,
    current: Direction,
    player: Option<Position>,
) -> Direction {
    match directive {
        FacingDirective::Toward(direction) => direction,
        FacingDirective::Keep => current,
        FacingDirective::FacePlayer => match player {
            Some(player) => face_toward(speaker, player),
            None => current,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_offset_wins_when_larger() {
        let npc = Position::new(100.0, 100.0);
        assert_eq!(face_toward(npc, Position::new(140.0, 110.0)), Direction::Right);
        assert_eq!(face_toward(npc, Position::new(60.0, 90.0)), Direction::Left);
    }

    #[test]
    fn vertical_offset_wins_when_larger() {
        let npc = Position::new(100.0, 100.0);
        assert_eq!(face_toward(npc, Position::new(105.0, 130.0)), Direction::Down);
        assert_eq!(face_toward(npc, Position::new(95.0, 70.0)), Direction::Up);
    }

    #[test]
    fn ties_go_vertical() {
        let npc = Position::new(0.0, 0.0);
        assert_eq!(face_toward(npc, Position::new(16.0, 16.0)), Direction::Down);
        assert_eq!(face_toward(npc, Position::new(-16.0, -16.0)), Direction::Up);
        // Same spot: dy is not positive
        assert_eq!(face_toward(npc, npc), Direction::Up);
    }

    #[test]
    fn resolve_keeps_live_direction() {
        let here = Position::new(0.0, 0.0);
        assert_eq!(
            resolve(FacingDirective::Keep, here, Direction::Left, None),
            Direction::Left
        );
        assert_eq!(
            resolve(
                FacingDirective::Toward(Direction::Up),
                here,
                Direction::Left,
                None
            ),
            Direction::Up
        );
        assert_eq!(
            resolve(
                FacingDirective::FacePlayer,
                here,
                Direction::Left,
                Some(Position::new(48.0, 0.0))
            ),
            Direction::Right
        );
    }
}
