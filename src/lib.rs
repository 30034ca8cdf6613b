//! Robot Arena - a 2D arena where a player herds robots away from a wandering home base
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, sensors, collisions, per-tick pipeline)
//! - `params`: Construction parameter bundle (serde, JSON load/save)
//! - `error`: Error types for commands and parameter validation

pub mod error;
pub mod params;
pub mod sim;

pub use error::{ArenaError, ParamsError};
pub use params::ArenaParams;
pub use sim::{Arena, GameStatus};

/// Simulation constants
pub mod consts {
    /// Timesteps integrated per `advance_time` call
    pub const TICK_DT: u32 = 1;
    /// Real seconds per tick when a runner paces the simulation
    pub const REALTIME_TICK_SECS: f64 = 0.05;
    /// Max ticks per frame (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default cap on mobile entity speed
    pub const DEFAULT_MAX_SPEED: f64 = 15.0;
    /// Default player turn step (degrees per turn command)
    pub const DEFAULT_ANGLE_DELTA: f64 = 10.0;
    /// Default proximity sensor range (beyond combined radii)
    pub const DEFAULT_PROXIMITY_RANGE: f64 = 50.0;
    /// Default battery capacity
    pub const DEFAULT_BATTERY_MAX_CHARGE: f64 = 100.0;

    /// Speed robots and the home base return to after reset or an unfreeze
    pub const CRUISE_SPEED: f64 = 5.0;

    /// Battery drained per unit of distance travelled
    pub const BATTERY_LINEAR_SCALE: f64 = 0.01;
    /// Flat battery penalty per registered collision
    pub const BATTERY_COLLISION_PENALTY: f64 = 5.0;
    /// Charge above max granted by a recharge station visit
    pub const RECHARGE_OVERSHOOT: f64 = 5.0;

    /// Ticks the player stays frozen after a superbot hit
    pub const SUPERBOT_PAUSE_TICKS: u32 = 100;

    /// Distance an out-of-bounds entity is pushed back inside
    pub const WALL_NUDGE: i32 = 10;

    /// Proximity avoidance turns this many degrees past the contact angle
    pub const PROXIMITY_TURN_BIAS: f64 = 15.0;

    /// Home base changes heading when a draw from `0..=HOME_BASE_JITTER_SPAN` hits this value
    pub const HOME_BASE_JITTER_SPAN: u32 = 36;
    pub const HOME_BASE_JITTER_HIT: u32 = 1;

    /// Speed the headless autopilot throttles up to
    pub const AUTOPILOT_CRUISE_SPEED: f64 = 8.0;

    /// Converted robots are parked this far past the right/bottom edges
    pub const PARKING_INSET_X: i32 = 50;
    pub const PARKING_OFFSET_Y: i32 = 120;

    /// Degrees per radian, with pi truncated the way the contact-angle formula expects
    #[allow(clippy::approx_constant)]
    pub const CONTACT_DEG_PER_RAD: f64 = 180.0 / 3.14159265;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit direction vector for a heading in degrees
#[inline]
pub fn heading_to_direction(heading: f64) -> glam::DVec2 {
    let radians = heading.to_radians();
    glam::DVec2::new(radians.cos(), radians.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees_wraps_both_ways() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-720.0), 0.0);
        assert!((normalize_degrees(-1e-18) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_heading_to_direction_cardinals() {
        let east = heading_to_direction(0.0);
        assert!((east.x - 1.0).abs() < 1e-12 && east.y.abs() < 1e-12);

        let south = heading_to_direction(90.0);
        assert!(south.x.abs() < 1e-12 && (south.y - 1.0).abs() < 1e-12);
    }
}
