//! Collision detection and response for circular entities
//!
//! Contact is a plain center-distance test. The response is a heading
//! derived from the center-to-center vector and the mover's heading, which
//! the touch sensor then negates into the entity's new heading.

use super::entity::Entity;
use super::event::CollisionEvent;
use super::geometry::Position;
use crate::consts::{CONTACT_DEG_PER_RAD, WALL_NUDGE};

/// Arena boundary, listed in the order walls are tested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Right,
    Left,
    Bottom,
    Top,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Right, Wall::Left, Wall::Bottom, Wall::Top];

    /// First wall within `margin` of a circle's edge
    pub fn touched_by(
        pos: Position,
        radius: f64,
        margin: f64,
        x_dim: u32,
        y_dim: u32,
    ) -> Option<Wall> {
        let (x, y) = (pos.x(), pos.y());
        Wall::ALL.into_iter().find(|wall| match wall {
            Wall::Right => x + radius + margin >= x_dim as f64,
            Wall::Left => x - radius - margin <= 0.0,
            Wall::Bottom => y + radius + margin >= y_dim as f64,
            Wall::Top => y - radius - margin <= 0.0,
        })
    }

    /// Side walls and top/bottom walls reflect differently
    pub fn contact_angle(self, heading: f64) -> f64 {
        match self {
            Wall::Right | Wall::Left => -((360.0 - heading) + 180.0),
            Wall::Bottom | Wall::Top => heading,
        }
    }

    /// Point on the wall level with `pos`
    pub fn point_of_contact(self, pos: Position, x_dim: u32, y_dim: u32) -> Position {
        match self {
            Wall::Right => Position::new(x_dim as i32, pos.y),
            Wall::Left => Position::new(0, pos.y),
            Wall::Bottom => Position::new(pos.x, y_dim as i32),
            Wall::Top => Position::new(pos.x, 0),
        }
    }

    /// Inward push applied to an entity that crossed this wall
    pub fn nudge(self) -> (i32, i32) {
        match self {
            Wall::Right => (-WALL_NUDGE, 0),
            Wall::Left => (WALL_NUDGE, 0),
            Wall::Bottom => (0, -WALL_NUDGE),
            Wall::Top => (0, WALL_NUDGE),
        }
    }
}

/// Distance test shared by collisions and proximity; symmetric in `a` and `b`
pub fn circles_within(a: Position, a_radius: f64, b: Position, b_radius: f64, slack: f64) -> bool {
    a.distance(&b) <= a_radius + b_radius + slack
}

/// Angle handed to the touch sensor of an entity at `from`, moving along
/// `heading`, that hit something centered at `to`
///
/// Centers sharing an x coordinate count as a straight vertical contact.
pub fn contact_angle(from: Position, to: Position, heading: f64) -> f64 {
    let adj = to.x() - from.x();
    let opp = to.y() - from.y();
    let angle = if adj == 0.0 {
        if opp >= 0.0 { 90.0 } else { -90.0 }
    } else {
        (opp / adj).atan() * CONTACT_DEG_PER_RAD
    };
    let bounce_angle = angle + 90.0;
    let adjusted_angle = (180.0 - bounce_angle) + (heading - 180.0);
    let new_head = bounce_angle - adjusted_angle;
    -new_head
}

/// Point on the perimeter of the circle at `from` facing `to`
fn perimeter_point(from: Position, radius: f64, to: Position) -> Position {
    let dir = (to.as_dvec2() - from.as_dvec2()).normalize_or_zero();
    let p = from.as_dvec2() + dir * radius;
    Position::from_f64(p.x, p.y)
}

/// Check `ent1` against `ent2`, using `ent1`'s collision delta and heading
pub fn check_entity_collision(ent1: &Entity, ent2: &Entity) -> CollisionEvent {
    let (p1, p2) = (ent1.position(), ent2.position());
    if !circles_within(p1, ent1.radius(), p2, ent2.radius(), ent1.collision_delta()) {
        return CollisionEvent::miss();
    }
    CollisionEvent::hit(
        perimeter_point(p1, ent1.radius(), p2),
        contact_angle(p1, p2, ent1.heading()),
    )
}

/// Reflect an entity that reached a wall, pushing it back inside
///
/// Only the first wall in test order applies.
pub fn check_out_of_bounds(ent: &mut Entity, x_dim: u32, y_dim: u32) -> CollisionEvent {
    let pos = ent.position();
    let Some(wall) = Wall::touched_by(pos, ent.radius(), 0.0, x_dim, y_dim) else {
        return CollisionEvent::miss();
    };

    let (dx, dy) = wall.nudge();
    ent.set_position(pos.offset(dx, dy));
    log::trace!("{} {} hit {:?} wall at {:?}", ent.name(), ent.id(), wall, pos);
    CollisionEvent::hit(
        wall.point_of_contact(pos, x_dim, y_dim),
        wall.contact_angle(ent.heading()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{EntityParams, RobotParams};
    use crate::sim::geometry::Color;
    use proptest::prelude::*;

    fn robot_at(x: i32, y: i32, heading: f64) -> Entity {
        Entity::robot(
            0,
            &RobotParams {
                heading,
                ..RobotParams::at(Position::new(x, y))
            },
        )
    }

    #[test]
    fn test_contact_requires_combined_radii_plus_delta() {
        let a = robot_at(100, 100, 0.0);
        // 20 + 20 + 1 = 41
        let touching = robot_at(141, 100, 0.0);
        let apart = robot_at(142, 100, 0.0);
        assert!(check_entity_collision(&a, &touching).collided);
        assert!(!check_entity_collision(&a, &apart).collided);
    }

    #[test]
    fn test_head_on_contact_angle() {
        // Horizontal hit while heading east: bounce back west
        let aoc = contact_angle(Position::new(0, 0), Position::new(10, 0), 0.0);
        assert!((aoc - (-180.0)).abs() < 1e-9);
    }

    #[test]
    fn test_shared_x_is_vertical_contact() {
        let down = contact_angle(Position::new(5, 5), Position::new(5, 20), 90.0);
        let up = contact_angle(Position::new(5, 20), Position::new(5, 5), 90.0);
        assert!(down.is_finite() && up.is_finite());
        // new_head = 2 * bounce - heading
        assert!((down - (-(2.0 * 180.0 - 90.0))).abs() < 1e-9);
        assert!((up - (-(2.0 * 0.0 - 90.0))).abs() < 1e-9);
        // Coincident centers use the same rule
        assert!(contact_angle(Position::new(7, 7), Position::new(7, 7), 10.0).is_finite());
    }

    #[test]
    fn test_contact_angle_depends_on_mover() {
        let a = robot_at(100, 100, 30.0);
        let b = robot_at(120, 130, 200.0);
        let ab = check_entity_collision(&a, &b);
        let ba = check_entity_collision(&b, &a);
        assert!(ab.collided && ba.collided);
        assert_ne!(ab.angle_of_contact, ba.angle_of_contact);
    }

    #[test]
    fn test_point_of_contact_on_perimeter() {
        let a = robot_at(100, 100, 0.0);
        let b = robot_at(130, 100, 0.0);
        assert_eq!(check_entity_collision(&a, &b).point_of_contact, Position::new(120, 100));
    }

    #[test]
    fn test_right_wall_reflection() {
        let mut robot = robot_at(1085, 300, 30.0);
        let event = check_out_of_bounds(&mut robot, 1100, 740);
        assert!(event.collided);
        assert_eq!(event.angle_of_contact, -((360.0 - 30.0) + 180.0));
        assert_eq!(event.point_of_contact, Position::new(1100, 300));
        assert_eq!(robot.position(), Position::new(1075, 300));
    }

    #[test]
    fn test_wall_priority_and_vertical_walls() {
        // Past both the right and bottom walls: right wins
        let mut corner = robot_at(1095, 735, 45.0);
        check_out_of_bounds(&mut corner, 1100, 740);
        assert_eq!(corner.position(), Position::new(1085, 735));

        let mut top = robot_at(500, 10, 250.0);
        let event = check_out_of_bounds(&mut top, 1100, 740);
        assert_eq!(event.angle_of_contact, 250.0);
        assert_eq!(event.point_of_contact, Position::new(500, 0));
        assert_eq!(top.position(), Position::new(500, 20));
    }

    #[test]
    fn test_left_wall_reflection() {
        let mut robot = robot_at(15, 300, 200.0);
        let event = check_out_of_bounds(&mut robot, 1100, 740);
        assert!(event.collided);
        assert_eq!(event.angle_of_contact, -((360.0 - 200.0) + 180.0));
        assert_eq!(event.point_of_contact, Position::new(0, 300));
        assert_eq!(robot.position(), Position::new(25, 300));
    }

    #[test]
    fn test_bottom_wall_reflection() {
        let mut robot = robot_at(500, 730, 80.0);
        let event = check_out_of_bounds(&mut robot, 1100, 740);
        assert!(event.collided);
        assert_eq!(event.angle_of_contact, 80.0);
        assert_eq!(event.point_of_contact, Position::new(500, 740));
        assert_eq!(robot.position(), Position::new(500, 720));
    }

    #[test]
    fn test_every_wall_nudges_inward() {
        let (x_dim, y_dim) = (1100, 740);
        let cases = [
            (Wall::Right, Position::new(1090, 370)),
            (Wall::Left, Position::new(10, 370)),
            (Wall::Bottom, Position::new(550, 730)),
            (Wall::Top, Position::new(550, 10)),
        ];
        let center = Position::new(550, 370);
        for (wall, pos) in cases {
            assert_eq!(Wall::touched_by(pos, 20.0, 0.0, x_dim, y_dim), Some(wall));
            let (dx, dy) = wall.nudge();
            let nudged = pos.offset(dx, dy);
            assert!(nudged.distance(&center) < pos.distance(&center), "{wall:?}");
        }
    }

    #[test]
    fn test_inside_is_a_miss() {
        let mut robot = robot_at(500, 300, 0.0);
        assert!(!check_out_of_bounds(&mut robot, 1100, 740).collided);
        assert_eq!(robot.position(), Position::new(500, 300));
    }

    #[test]
    fn test_immobile_targets_collide_too() {
        let robot = robot_at(100, 100, 0.0);
        let rock_params = EntityParams::new(30.0, Position::new(150, 100), Color::WHITE);
        let rock = Entity::obstacle(1, 0, &rock_params);
        assert!(check_entity_collision(&robot, &rock).collided);
    }

    proptest! {
        #[test]
        fn prop_contact_test_is_symmetric(
            ax in 0i32..1100, ay in 0i32..740, bx in 0i32..1100, by in 0i32..740,
            ar in 1.0f64..60.0, br in 1.0f64..60.0, slack in 0.0f64..10.0,
        ) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert_eq!(
                circles_within(a, ar, b, br, slack),
                circles_within(b, br, a, ar, slack)
            );
        }

        #[test]
        fn prop_contact_angle_is_finite(
            ax in -2000i32..2000, ay in -2000i32..2000,
            bx in -2000i32..2000, by in -2000i32..2000,
            heading in 0.0f64..360.0,
        ) {
            let aoc = contact_angle(Position::new(ax, ay), Position::new(bx, by), heading);
            prop_assert!(aoc.is_finite());
        }
    }
}
