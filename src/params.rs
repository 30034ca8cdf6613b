//! Arena construction parameters
//!
//! One bundle, supplied at startup and never changed while the arena runs.
//! Missing JSON fields fall back to the stock arena.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ParamsError;
use crate::sim::geometry::{Color, Position};

/// Immobile entity: obstacle or recharge station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityParams {
    pub radius: f64,
    pub pos: Position,
    pub color: Color,
}

impl Default for EntityParams {
    fn default() -> Self {
        Self {
            radius: 20.0,
            pos: Position::default(),
            color: Color::WHITE,
        }
    }
}

impl EntityParams {
    pub fn new(radius: f64, pos: Position, color: Color) -> Self {
        Self { radius, pos, color }
    }
}

/// Player and home base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerParams {
    pub radius: f64,
    pub pos: Position,
    pub color: Color,
    pub collision_delta: f64,
    /// Degrees turned per turn command
    pub angle_delta: f64,
    pub heading: f64,
    pub speed: f64,
    pub max_speed: f64,
    pub battery_max_charge: f64,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            radius: 20.0,
            pos: Position::new(500, 500),
            color: Color::BLUE,
            collision_delta: 1.0,
            angle_delta: DEFAULT_ANGLE_DELTA,
            heading: 37.0,
            speed: CRUISE_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            battery_max_charge: DEFAULT_BATTERY_MAX_CHARGE,
        }
    }
}

impl PlayerParams {
    /// Stock home base: red, wandering from the middle of the arena
    pub fn home_base() -> Self {
        Self {
            pos: Position::new(400, 400),
            color: Color::RED,
            heading: 75.0,
            ..Default::default()
        }
    }
}

/// Robot and superbot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotParams {
    pub radius: f64,
    /// Starting position, and where the robot respawns on reset
    pub pos: Position,
    pub color: Color,
    pub collision_delta: f64,
    pub angle_delta: f64,
    pub heading: f64,
    pub speed: f64,
    pub max_speed: f64,
    pub proximity_range: f64,
}

impl Default for RobotParams {
    fn default() -> Self {
        Self {
            radius: 20.0,
            pos: Position::default(),
            color: Color::CYAN,
            collision_delta: 1.0,
            angle_delta: DEFAULT_ANGLE_DELTA,
            heading: 270.0,
            speed: CRUISE_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            proximity_range: DEFAULT_PROXIMITY_RANGE,
        }
    }
}

impl RobotParams {
    pub fn at(pos: Position) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }

    /// A superbot waiting to be activated: parked at the origin, not moving
    pub fn dormant_superbot() -> Self {
        Self {
            color: Color::CLEAR_YELLOW,
            heading: 0.0,
            speed: 0.0,
            ..Default::default()
        }
    }
}

/// Everything needed to build an arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaParams {
    pub x_dim: u32,
    pub y_dim: u32,
    /// Seed for the home base's wandering
    pub seed: u64,
    pub player: PlayerParams,
    pub home_base: PlayerParams,
    pub recharge_station: EntityParams,
    pub obstacles: Vec<EntityParams>,
    pub robots: Vec<RobotParams>,
    /// One per robot; missing entries are filled with dormant defaults
    pub superbots: Vec<RobotParams>,
}

impl Default for ArenaParams {
    fn default() -> Self {
        let robots = [(700, 175), (800, 400), (175, 700), (320, 277), (570, 630)]
            .into_iter()
            .map(|p| RobotParams::at(p.into()))
            .collect::<Vec<_>>();

        Self {
            x_dim: 1100,
            y_dim: 740,
            seed: 0,
            player: PlayerParams::default(),
            home_base: PlayerParams::home_base(),
            recharge_station: EntityParams::new(20.0, Position::new(500, 300), Color::TEAL),
            obstacles: vec![
                EntityParams::new(30.0, Position::new(200, 200), Color::WHITE),
                EntityParams::new(45.0, Position::new(180, 400), Color::WHITE),
                EntityParams::new(20.0, Position::new(400, 520), Color::WHITE),
                EntityParams::new(50.0, Position::new(600, 464), Color::WHITE),
                EntityParams::new(30.0, Position::new(450, 175), Color::WHITE),
            ],
            superbots: vec![RobotParams::dormant_superbot(); robots.len()],
            robots,
        }
    }
}

impl ArenaParams {
    /// Superbot parameters for robot slot `index`
    pub fn superbot(&self, index: usize) -> RobotParams {
        self.superbots
            .get(index)
            .cloned()
            .unwrap_or_else(RobotParams::dormant_superbot)
    }

    /// Where converted robots are parked, just outside the arena
    pub fn parking_position(&self) -> Position {
        Position::new(
            self.x_dim as i32 - PARKING_INSET_X,
            self.y_dim as i32 + PARKING_OFFSET_Y,
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: ArenaParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Load and validate a JSON parameter file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let params = Self::from_json_str(&json)?;
        log::info!(
            "Loaded arena params from {} ({} robots, {} obstacles)",
            path.as_ref().display(),
            params.robots.len(),
            params.obstacles.len()
        );
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String, ParamsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.x_dim == 0 || self.y_dim == 0 {
            return Err(ParamsError::NonPositiveDimension {
                x_dim: self.x_dim,
                y_dim: self.y_dim,
            });
        }
        if self.robots.is_empty() {
            return Err(ParamsError::NoRobots);
        }

        check_player("player", &self.player)?;
        check_player("home base", &self.home_base)?;
        check_radius("recharge station", self.recharge_station.radius)?;
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            check_radius(&format!("obstacle {i}"), obstacle.radius)?;
        }
        for (i, robot) in self.robots.iter().enumerate() {
            check_robot(&format!("robot {i}"), robot)?;
            check_robot(&format!("superbot {i}"), &self.superbot(i))?;
        }
        Ok(())
    }
}

fn check_radius(entity: &str, radius: f64) -> Result<(), ParamsError> {
    if radius > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NonPositiveRadius {
            entity: entity.to_string(),
            radius,
        })
    }
}

fn check_mobile(
    entity: &str,
    radius: f64,
    delta: f64,
    speed: f64,
    max_speed: f64,
) -> Result<(), ParamsError> {
    check_radius(entity, radius)?;
    if delta < 0.0 {
        return Err(ParamsError::NegativeCollisionDelta {
            entity: entity.to_string(),
            delta,
        });
    }
    if max_speed <= 0.0 || speed > max_speed {
        return Err(ParamsError::MaxSpeed {
            entity: entity.to_string(),
            speed,
            max_speed,
        });
    }
    Ok(())
}

fn check_player(entity: &str, p: &PlayerParams) -> Result<(), ParamsError> {
    check_mobile(entity, p.radius, p.collision_delta, p.speed, p.max_speed)?;
    if p.battery_max_charge <= 0.0 {
        return Err(ParamsError::NonPositiveBatteryCharge {
            entity: entity.to_string(),
            charge: p.battery_max_charge,
        });
    }
    Ok(())
}

fn check_robot(entity: &str, r: &RobotParams) -> Result<(), ParamsError> {
    check_mobile(entity, r.radius, r.collision_delta, r.speed, r.max_speed)
}
