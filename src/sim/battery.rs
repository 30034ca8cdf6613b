//! Player battery: drains with distance, pays a flat penalty per collision,
//! refills (past capacity) at the recharge station

use super::event::CollisionEvent;
use super::geometry::Position;
use crate::consts::{BATTERY_COLLISION_PENALTY, BATTERY_LINEAR_SCALE, RECHARGE_OVERSHOOT};

#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    charge: f64,
    max_charge: f64,
}

impl Battery {
    pub fn new(max_charge: f64) -> Self {
        Self {
            charge: max_charge,
            max_charge,
        }
    }

    pub fn level(&self) -> f64 {
        self.charge
    }

    pub fn is_empty(&self) -> bool {
        self.charge <= 0.0
    }

    /// Drain by distance travelled; `dt` does not enter the cost
    pub fn deplete(&mut self, old_pos: Position, new_pos: Position, _dt: u32) -> f64 {
        let distance = old_pos.distance(&new_pos);
        self.charge = (self.charge - distance * BATTERY_LINEAR_SCALE).max(0.0);
        self.charge
    }

    pub fn accept(&mut self, event: &CollisionEvent) {
        if event.collided {
            self.charge = (self.charge - BATTERY_COLLISION_PENALTY).max(0.0);
        }
    }

    /// Recharge station visit; overshoots capacity on purpose
    pub fn recharge(&mut self) {
        self.charge = self.max_charge + RECHARGE_OVERSHOOT;
    }

    pub fn reset(&mut self) {
        self.charge = self.max_charge;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deplete_scales_with_distance() {
        let mut battery = Battery::new(100.0);
        let level = battery.deplete(Position::new(0, 0), Position::new(30, 40), 1);
        assert!((level - 99.5).abs() < 1e-12);

        // dt is accepted but ignored
        battery.deplete(Position::new(0, 0), Position::new(30, 40), 7);
        assert!((battery.level() - 99.0).abs() < 1e-12);
    }

    #[test]
    fn test_collision_penalty_and_floor() {
        let mut battery = Battery::new(7.0);
        battery.accept(&CollisionEvent::hit(Position::default(), 0.0));
        assert!((battery.level() - 2.0).abs() < 1e-12);

        battery.accept(&CollisionEvent::miss());
        assert!((battery.level() - 2.0).abs() < 1e-12);

        battery.accept(&CollisionEvent::hit(Position::default(), 0.0));
        assert_eq!(battery.level(), 0.0);
        assert!(battery.is_empty());

        battery.deplete(Position::new(0, 0), Position::new(1000, 0), 1);
        assert_eq!(battery.level(), 0.0);
    }

    #[test]
    fn test_recharge_overshoots_and_reset_restores() {
        let mut battery = Battery::new(100.0);
        battery.deplete(Position::new(0, 0), Position::new(0, 500), 1);
        battery.recharge();
        assert_eq!(battery.level(), 105.0);

        battery.reset();
        assert_eq!(battery.level(), 100.0);
    }
}
