//! Motion handlers (sensor readings and commands -> heading/speed) and
//! motion behavior (heading + speed + dt -> new position)

use super::event::Command;
use super::geometry::Position;
use super::sensor::{ProximitySensor, TouchSensor};
use crate::consts::{DEFAULT_ANGLE_DELTA, DEFAULT_MAX_SPEED, PROXIMITY_TURN_BIAS};
use crate::{heading_to_direction, normalize_degrees};

/// Heading and speed actuators for one mobile entity
#[derive(Debug, Clone, PartialEq)]
pub struct MotionHandler {
    /// Degrees, always in [0, 360)
    heading: f64,
    /// Always in [0, max_speed]
    speed: f64,
    max_speed: f64,
    /// Turn step for player commands
    angle_delta: f64,
}

impl Default for MotionHandler {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_MAX_SPEED, DEFAULT_ANGLE_DELTA)
    }
}

impl MotionHandler {
    pub fn new(heading: f64, speed: f64, max_speed: f64, angle_delta: f64) -> Self {
        let max_speed = max_speed.max(0.0);
        Self {
            heading: normalize_degrees(heading),
            speed: speed.clamp(0.0, max_speed),
            max_speed,
            angle_delta,
        }
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = normalize_degrees(heading);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.0, self.max_speed);
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn angle_delta(&self) -> f64 {
        self.angle_delta
    }

    /// Bounce off whatever the touch sensor last hit
    pub fn update_from_touch(&mut self, touch: &TouchSensor) {
        if touch.activated() {
            self.set_heading(-touch.angle_of_contact());
        }
    }

    /// Veer away from a nearby entity; turns harder than a bounce
    pub fn update_from_proximity(&mut self, proximity: &ProximitySensor) {
        if proximity.activated() {
            self.set_heading(proximity.angle_of_contact() + PROXIMITY_TURN_BIAS);
        }
    }

    /// Apply a directional command from the player's input
    pub fn accept_command(&mut self, cmd: Command) {
        match cmd {
            Command::TurnLeft => self.set_heading(self.heading - self.angle_delta),
            Command::TurnRight => self.set_heading(self.heading + self.angle_delta),
            Command::SpeedUp => self.set_speed(self.speed + 1.0),
            Command::SlowDown => self.set_speed(self.speed - 1.0),
        }
    }
}

/// Advance `pos` along `heading` for `dt` timesteps at `speed`
///
/// Stored coordinates are integers, so the result truncates.
pub fn integrate(pos: Position, heading: f64, speed: f64, dt: u32) -> Position {
    let next = pos.as_dvec2() + heading_to_direction(heading) * speed * dt as f64;
    Position::from_f64(next.x, next.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::event::{CollisionEvent, ProximityEvent};

    #[test]
    fn test_speed_is_clamped() {
        let mut motion = MotionHandler::new(0.0, 5.0, 15.0, 10.0);
        motion.set_speed(40.0);
        assert_eq!(motion.speed(), 15.0);
        motion.set_speed(-3.0);
        assert_eq!(motion.speed(), 0.0);
    }

    #[test]
    fn test_commands_turn_and_throttle() {
        let mut motion = MotionHandler::new(5.0, 14.0, 15.0, 10.0);
        motion.accept_command(Command::TurnLeft);
        assert_eq!(motion.heading(), 355.0);
        motion.accept_command(Command::TurnRight);
        motion.accept_command(Command::TurnRight);
        assert_eq!(motion.heading(), 15.0);

        motion.accept_command(Command::SpeedUp);
        motion.accept_command(Command::SpeedUp);
        assert_eq!(motion.speed(), 15.0);

        let mut stopped = MotionHandler::new(0.0, 0.0, 15.0, 10.0);
        stopped.accept_command(Command::SlowDown);
        assert_eq!(stopped.speed(), 0.0);
    }

    #[test]
    fn test_touch_negates_contact_angle() {
        let mut motion = MotionHandler::new(0.0, 5.0, 15.0, 10.0);
        let mut touch = TouchSensor::default();
        touch.accept(&CollisionEvent::hit(Position::default(), -180.0));
        motion.update_from_touch(&touch);
        assert_eq!(motion.heading(), 180.0);

        touch.accept(&CollisionEvent::hit(Position::default(), 30.0));
        motion.update_from_touch(&touch);
        assert_eq!(motion.heading(), 330.0);
    }

    #[test]
    fn test_inactive_sensors_leave_heading_alone() {
        let mut motion = MotionHandler::new(42.0, 5.0, 15.0, 10.0);
        motion.update_from_touch(&TouchSensor::default());
        motion.update_from_proximity(&ProximitySensor::default());
        assert_eq!(motion.heading(), 42.0);
    }

    #[test]
    fn test_proximity_adds_bias() {
        let mut motion = MotionHandler::new(0.0, 5.0, 15.0, 10.0);
        let mut proximity = ProximitySensor::default();
        proximity.accept(&ProximityEvent {
            activated: true,
            angle_of_contact: 350.0,
            ..Default::default()
        });
        motion.update_from_proximity(&proximity);
        assert_eq!(motion.heading(), 5.0);
    }

    #[test]
    fn test_integrate_follows_heading() {
        let start = Position::new(100, 100);
        assert_eq!(integrate(start, 0.0, 5.0, 1), Position::new(105, 100));
        assert_eq!(integrate(start, 90.0, 5.0, 1), Position::new(100, 105));
        assert_eq!(integrate(start, 180.0, 5.0, 2), Position::new(90, 100));
        // Fractional steps are lost to truncation
        assert_eq!(integrate(start, 0.0, 0.5, 1), start);
    }
}
