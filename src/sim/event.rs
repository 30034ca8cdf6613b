//! Events the arena delivers to entities
//!
//! Plain data carriers: an activation field plus where/at what angle the
//! contact happened. Sensors read them, nothing else does.

use serde::{Deserialize, Serialize};

use super::geometry::Position;
use crate::error::ArenaError;

/// What kind of thing a proximity sensor picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntityType {
    Robot,
    SuperBot,
    Player,
    HomeBase,
    RechargeStation,
    Wall,
    #[default]
    None,
}

/// Contact between two entities, or an entity and a wall
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionEvent {
    pub collided: bool,
    pub point_of_contact: Position,
    /// Contact angle in degrees (already negated for the touch sensor)
    pub angle_of_contact: f64,
}

impl CollisionEvent {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn hit(point_of_contact: Position, angle_of_contact: f64) -> Self {
        Self {
            collided: true,
            point_of_contact,
            angle_of_contact,
        }
    }
}

/// Something is within proximity range
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProximityEvent {
    pub activated: bool,
    pub point_of_contact: Position,
    pub angle_of_contact: f64,
}

/// A frozen robot was spotted nearby
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistressEvent {
    pub activated: bool,
    pub point_of_contact: Position,
}

/// Classification of a proximity hit
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EntityTypeEvent {
    pub entity_type: EntityType,
    pub point_of_contact: Position,
}

/// Player touched the recharge station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RechargeEvent;

/// Directional command for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    TurnLeft,
    TurnRight,
    SpeedUp,
    SlowDown,
}

/// Raw key codes the viewer forwards
pub mod keys {
    pub const RIGHT_ARROW: i32 = 262;
    pub const LEFT_ARROW: i32 = 263;
    pub const DOWN_ARROW: i32 = 264;
    pub const UP_ARROW: i32 = 265;
}

impl Command {
    /// Key code that produces this command
    pub fn key_code(&self) -> i32 {
        match self {
            Command::TurnLeft => keys::LEFT_ARROW,
            Command::TurnRight => keys::RIGHT_ARROW,
            Command::SpeedUp => keys::UP_ARROW,
            Command::SlowDown => keys::DOWN_ARROW,
        }
    }
}

impl TryFrom<i32> for Command {
    type Error = ArenaError;

    fn try_from(key: i32) -> Result<Self, Self::Error> {
        match key {
            keys::LEFT_ARROW => Ok(Command::TurnLeft),
            keys::RIGHT_ARROW => Ok(Command::TurnRight),
            keys::UP_ARROW => Ok(Command::SpeedUp),
            keys::DOWN_ARROW => Ok(Command::SlowDown),
            other => Err(ArenaError::UnknownCommand(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_commands() {
        assert_eq!(Command::try_from(263).ok(), Some(Command::TurnLeft));
        assert_eq!(Command::try_from(262).ok(), Some(Command::TurnRight));
        assert_eq!(Command::try_from(265).ok(), Some(Command::SpeedUp));
        assert_eq!(Command::try_from(264).ok(), Some(Command::SlowDown));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Command::try_from(32).unwrap_err();
        assert!(matches!(err, ArenaError::UnknownCommand(32)));
    }

    #[test]
    fn test_key_code_inverts_mapping() {
        for cmd in [
            Command::TurnLeft,
            Command::TurnRight,
            Command::SpeedUp,
            Command::SlowDown,
        ] {
            assert_eq!(Command::try_from(cmd.key_code()).ok(), Some(cmd));
        }
    }
}
