//! Pre-contact sensing for robots and superbots
//!
//! Robots and superbots read the same scan differently, so each sensing kind
//! has its own classifier.

use super::collision::{Wall, circles_within};
use super::entity::{Entity, EntityKind};
use super::event::{DistressEvent, EntityType, EntityTypeEvent, ProximityEvent};

/// Everything one proximity scan hands to the sensing entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProximityReading {
    pub proximity: ProximityEvent,
    pub entity_type: EntityTypeEvent,
    pub distress: DistressEvent,
}

impl ProximityReading {
    /// Turn away from whatever was sensed
    fn avoid(sensor: &Entity, nearby: &Entity, entity_type: EntityType) -> Self {
        Self {
            proximity: ProximityEvent {
                activated: true,
                point_of_contact: nearby.position(),
                angle_of_contact: sensor.heading(),
            },
            entity_type: EntityTypeEvent {
                entity_type,
                point_of_contact: nearby.position(),
            },
            distress: DistressEvent::default(),
        }
    }

    /// Keep heading; only the classification is reported
    fn ignore(nearby: &Entity, entity_type: EntityType) -> Self {
        Self {
            entity_type: EntityTypeEvent {
                entity_type,
                point_of_contact: nearby.position(),
            },
            ..Default::default()
        }
    }

    /// A frozen robot: raise distress instead of steering away
    fn distress(nearby: &Entity) -> Self {
        Self {
            distress: DistressEvent {
                activated: true,
                point_of_contact: nearby.position(),
            },
            ..Default::default()
        }
    }

    /// Fold a later classification over an earlier one within the same scan
    fn merge(&mut self, next: ProximityReading) {
        self.proximity = next.proximity;
        if next.entity_type.entity_type != EntityType::None {
            self.entity_type = next.entity_type;
        }
        if next.distress.activated {
            self.distress = next.distress;
        }
    }
}

/// Nearby entity inside `sensor`'s proximity range
pub fn in_range(sensor: &Entity, nearby: &Entity) -> bool {
    circles_within(
        sensor.position(),
        sensor.radius(),
        nearby.position(),
        nearby.radius(),
        sensor.proximity_range(),
    )
}

/// Wall within proximity range; the sensing entity is not moved
pub fn check_wall_proximity(sensor: &Entity, x_dim: u32, y_dim: u32) -> Option<ProximityReading> {
    let pos = sensor.position();
    let wall = Wall::touched_by(pos, sensor.radius(), sensor.proximity_range(), x_dim, y_dim)?;
    let point_of_contact = wall.point_of_contact(pos, x_dim, y_dim);
    Some(ProximityReading {
        proximity: ProximityEvent {
            activated: true,
            point_of_contact,
            angle_of_contact: wall.contact_angle(sensor.heading()),
        },
        entity_type: EntityTypeEvent {
            entity_type: EntityType::Wall,
            point_of_contact,
        },
        distress: DistressEvent::default(),
    })
}

/// How a plain robot reacts to something in range
pub fn classify_for_robot(sensor: &Entity, nearby: &Entity) -> ProximityReading {
    match nearby.kind() {
        EntityKind::Robot if !nearby.is_frozen() => {
            ProximityReading::avoid(sensor, nearby, EntityType::Robot)
        }
        EntityKind::Robot => ProximityReading::distress(nearby),
        EntityKind::HomeBase => ProximityReading::ignore(nearby, EntityType::HomeBase),
        kind => ProximityReading::avoid(sensor, nearby, kind.entity_type()),
    }
}

/// How a superbot reacts to something in range; it closes in on the player
pub fn classify_for_superbot(sensor: &Entity, nearby: &Entity) -> ProximityReading {
    match nearby.kind() {
        EntityKind::Player => ProximityReading::ignore(nearby, EntityType::Player),
        EntityKind::Robot if !nearby.is_frozen() => {
            ProximityReading::avoid(sensor, nearby, EntityType::Robot)
        }
        EntityKind::Robot => ProximityReading::distress(nearby),
        kind => ProximityReading::avoid(sensor, nearby, kind.entity_type()),
    }
}

/// Full scan for one sensing entity: walls first, then `others` in order
/// until something calls for avoidance
pub fn scan<'a>(
    sensor: &Entity,
    others: impl IntoIterator<Item = &'a Entity>,
    x_dim: u32,
    y_dim: u32,
) -> ProximityReading {
    if let Some(reading) = check_wall_proximity(sensor, x_dim, y_dim) {
        return reading;
    }

    let classify: fn(&Entity, &Entity) -> ProximityReading = match sensor.kind() {
        EntityKind::SuperBot => classify_for_superbot,
        _ => classify_for_robot,
    };

    let mut reading = ProximityReading::default();
    for nearby in others {
        if nearby.id() == sensor.id() {
            continue;
        }
        if !in_range(sensor, nearby) {
            reading.proximity = ProximityEvent::default();
            continue;
        }
        reading.merge(classify(sensor, nearby));
        if reading.proximity.activated {
            break;
        }
    }
    reading
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PlayerParams, RobotParams};
    use crate::sim::geometry::Position;

    fn robot(id: usize, x: i32, y: i32) -> Entity {
        Entity::robot(
            id,
            &RobotParams {
                heading: 40.0,
                ..RobotParams::at(Position::new(x, y))
            },
        )
    }

    fn superbot(id: usize, x: i32, y: i32) -> Entity {
        Entity::superbot(
            id,
            &RobotParams {
                pos: Position::new(x, y),
                heading: 40.0,
                ..RobotParams::dormant_superbot()
            },
        )
    }

    fn player_at(id: usize, x: i32, y: i32) -> Entity {
        Entity::player(
            id,
            &PlayerParams {
                pos: Position::new(x, y),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_robot_avoids_moving_robot() {
        let sensor = robot(0, 400, 400);
        let other = robot(1, 450, 400);
        let reading = classify_for_robot(&sensor, &other);
        assert!(reading.proximity.activated);
        assert_eq!(reading.proximity.angle_of_contact, 40.0);
        assert_eq!(reading.entity_type.entity_type, EntityType::Robot);
    }

    #[test]
    fn test_frozen_robot_raises_distress() {
        let sensor = robot(0, 400, 400);
        let mut other = robot(1, 450, 400);
        other.set_frozen(true);
        for reading in [
            classify_for_robot(&sensor, &other),
            classify_for_superbot(&superbot(2, 400, 400), &other),
        ] {
            assert!(!reading.proximity.activated);
            assert!(reading.distress.activated);
        }
    }

    #[test]
    fn test_robot_keeps_heading_toward_home_base() {
        let sensor = robot(0, 400, 400);
        let home = Entity::home_base(1, &PlayerParams::home_base());
        let reading = classify_for_robot(&sensor, &home);
        assert!(!reading.proximity.activated);
        assert_eq!(reading.entity_type.entity_type, EntityType::HomeBase);

        // A superbot steers clear of the home base instead
        assert!(classify_for_superbot(&superbot(2, 400, 400), &home).proximity.activated);
    }

    #[test]
    fn test_superbot_keeps_heading_toward_player() {
        let player = player_at(1, 430, 400);
        let reading = classify_for_superbot(&superbot(0, 400, 400), &player);
        assert!(!reading.proximity.activated);
        assert_eq!(reading.entity_type.entity_type, EntityType::Player);

        // A plain robot avoids the player
        let reading = classify_for_robot(&robot(2, 400, 400), &player);
        assert!(reading.proximity.activated);
        assert_eq!(reading.entity_type.entity_type, EntityType::Player);
    }

    #[test]
    fn test_superbots_are_not_robots_to_the_classifier() {
        let sensor = robot(0, 400, 400);
        let mut other = superbot(1, 440, 400);
        other.set_frozen(true);
        let reading = classify_for_robot(&sensor, &other);
        assert!(reading.proximity.activated);
        assert!(!reading.distress.activated);
        assert_eq!(reading.entity_type.entity_type, EntityType::SuperBot);
    }

    #[test]
    fn test_walls_win_over_entities() {
        let sensor = robot(0, 1040, 400);
        let other = robot(1, 1000, 400);
        let reading = scan(&sensor, [&other], 1100, 740);
        assert!(reading.proximity.activated);
        assert_eq!(reading.entity_type.entity_type, EntityType::Wall);
        assert_eq!(reading.proximity.angle_of_contact, -((360.0 - 40.0) + 180.0));
        assert_eq!(reading.proximity.point_of_contact, Position::new(1100, 400));
        // Sensing never moves anything
        assert_eq!(sensor.position(), Position::new(1040, 400));
    }

    #[test]
    fn test_scan_stops_at_first_avoidance() {
        let sensor = robot(0, 400, 400);
        let mut frozen = robot(1, 440, 400);
        frozen.set_frozen(true);
        let moving = robot(2, 400, 460);
        let far = robot(3, 700, 700);
        let reading = scan(&sensor, [&sensor, &frozen, &moving, &far], 1100, 740);
        assert!(reading.proximity.activated);
        assert!(reading.distress.activated);
        assert_eq!(reading.entity_type.entity_type, EntityType::Robot);
    }

    #[test]
    fn test_out_of_range_clears_proximity() {
        let sensor = robot(0, 400, 400);
        let home = Entity::home_base(1, &PlayerParams::home_base());
        let far = robot(2, 700, 700);
        let reading = scan(&sensor, [&home, &far], 1100, 740);
        assert!(!reading.proximity.activated);
        // Classification from earlier in the scan survives
        assert_eq!(reading.entity_type.entity_type, EntityType::HomeBase);
    }
}
