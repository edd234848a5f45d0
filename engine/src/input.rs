//! Pure input mapping. Capturing keyboard or touch events is the
//! caller's business; this module only translates them into engine
//! commands.

use crate::game::Direction;

/// Minimum swipe distance, in input-space units, before a gesture
/// registers.
pub const SWIPE_THRESHOLD: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Space,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    Turn(Direction),
    TogglePause,
}

pub fn command_for_key(key: GameKey) -> InputCommand {
    match key {
        GameKey::ArrowUp | GameKey::W => InputCommand::Turn(Direction::Up),
        GameKey::ArrowDown | GameKey::S => InputCommand::Turn(Direction::Down),
        GameKey::ArrowLeft | GameKey::A => InputCommand::Turn(Direction::Left),
        GameKey::ArrowRight | GameKey::D => InputCommand::Turn(Direction::Right),
        GameKey::Space => InputCommand::TogglePause,
    }
}

/// Maps a swipe delta to a direction along its dominant axis. Swipes
/// below the threshold on both axes are ignored; diagonal ties go
/// vertical.
pub fn swipe_direction(dx: f32, dy: f32) -> Option<Direction> {
    if dx.abs() < SWIPE_THRESHOLD && dy.abs() < SWIPE_THRESHOLD {
        return None;
    }

    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd_agree() {
        assert_eq!(command_for_key(GameKey::ArrowUp), command_for_key(GameKey::W));
        assert_eq!(command_for_key(GameKey::ArrowDown), command_for_key(GameKey::S));
        assert_eq!(command_for_key(GameKey::ArrowLeft), command_for_key(GameKey::A));
        assert_eq!(command_for_key(GameKey::ArrowRight), command_for_key(GameKey::D));
        assert_eq!(command_for_key(GameKey::Space), InputCommand::TogglePause);
    }

    #[test]
    fn test_short_swipes_are_ignored() {
        assert_eq!(swipe_direction(29.9, 0.0), None);
        assert_eq!(swipe_direction(-20.0, 20.0), None);
        assert_eq!(swipe_direction(0.0, 0.0), None);
    }

    #[test]
    fn test_dominant_axis_wins() {
        assert_eq!(swipe_direction(40.0, 10.0), Some(Direction::Right));
        assert_eq!(swipe_direction(-40.0, 10.0), Some(Direction::Left));
        assert_eq!(swipe_direction(10.0, 40.0), Some(Direction::Down));
        assert_eq!(swipe_direction(10.0, -40.0), Some(Direction::Up));
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(swipe_direction(30.0, 0.0), Some(Direction::Right));
        assert_eq!(swipe_direction(0.0, -30.0), Some(Direction::Up));
    }
}
