//! Arena entities
//!
//! One flat record for every kind of thing in the arena. The `kind` tag
//! decides which capabilities apply and how each event is handled.

use serde::{Deserialize, Serialize};

use super::battery::Battery;
use super::event::{
    CollisionEvent, Command, DistressEvent, EntityType, EntityTypeEvent, ProximityEvent,
    RechargeEvent,
};
use super::geometry::{Color, Position};
use super::motion::{MotionHandler, integrate};
use super::sensor::SensorSuite;
use crate::consts::CRUISE_SPEED;
use crate::params::{EntityParams, PlayerParams, RobotParams};

/// Stable slot index into the arena's entity table
pub type EntityId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    HomeBase,
    RechargeStation,
    Obstacle,
    Robot,
    SuperBot,
}

/// What an entity kind can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub mobile: bool,
    pub battery: bool,
    pub commands: bool,
    /// Carries proximity/distress/entity-type sensors
    pub sensing: bool,
}

impl EntityKind {
    pub fn capabilities(self) -> Capabilities {
        match self {
            EntityKind::Player => Capabilities {
                mobile: true,
                battery: true,
                commands: true,
                sensing: false,
            },
            EntityKind::HomeBase => Capabilities {
                mobile: true,
                battery: true,
                commands: false,
                sensing: false,
            },
            EntityKind::Robot | EntityKind::SuperBot => Capabilities {
                mobile: true,
                battery: false,
                commands: false,
                sensing: true,
            },
            EntityKind::RechargeStation | EntityKind::Obstacle => Capabilities {
                mobile: false,
                battery: false,
                commands: false,
                sensing: false,
            },
        }
    }

    pub fn is_mobile(self) -> bool {
        self.capabilities().mobile
    }

    /// How a proximity sensor would label this kind
    pub fn entity_type(self) -> EntityType {
        match self {
            EntityKind::Player => EntityType::Player,
            EntityKind::HomeBase => EntityType::HomeBase,
            EntityKind::RechargeStation => EntityType::RechargeStation,
            EntityKind::Robot => EntityType::Robot,
            EntityKind::SuperBot => EntityType::SuperBot,
            EntityKind::Obstacle => EntityType::None,
        }
    }
}

/// State an entity returns to on reset
#[derive(Debug, Clone, PartialEq)]
struct Initial {
    pos: Position,
    heading: f64,
    speed: f64,
}

#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    name: String,
    radius: f64,
    pos: Position,
    color: Color,
    /// Extra buffer added to combined radii when testing contact
    collision_delta: f64,
    motion: MotionHandler,
    sensors: SensorSuite,
    battery: Option<Battery>,
    /// Ticks left frozen after a superbot hit (player only)
    pause_ticks: u32,
    /// Stopped by touching the player (robots only)
    frozen: bool,
    /// Converted at the home base and out of play (robots only)
    converted: bool,
    /// Present in the arena's active roster
    active: bool,
    initial: Initial,
}

impl Entity {
    fn base(
        id: EntityId,
        kind: EntityKind,
        name: String,
        radius: f64,
        pos: Position,
        color: Color,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            radius,
            pos,
            color,
            collision_delta: 0.0,
            motion: MotionHandler::default(),
            sensors: SensorSuite::default(),
            battery: None,
            pause_ticks: 0,
            frozen: false,
            converted: false,
            active: true,
            initial: Initial {
                pos,
                heading: 0.0,
                speed: 0.0,
            },
        }
    }

    /// Obstacles are named by their ordinal among obstacles
    pub fn obstacle(id: EntityId, ordinal: usize, p: &EntityParams) -> Self {
        Self::base(id, EntityKind::Obstacle, format!("Obstacle{ordinal}"), p.radius, p.pos, p.color)
    }

    pub fn recharge_station(id: EntityId, p: &EntityParams) -> Self {
        Self::base(
            id,
            EntityKind::RechargeStation,
            "Recharge Station".to_string(),
            p.radius,
            p.pos,
            p.color,
        )
    }

    pub fn player(id: EntityId, p: &PlayerParams) -> Self {
        Self::battery_powered(id, EntityKind::Player, "Player", p)
    }

    pub fn home_base(id: EntityId, p: &PlayerParams) -> Self {
        Self::battery_powered(id, EntityKind::HomeBase, "Home Base", p)
    }

    fn battery_powered(id: EntityId, kind: EntityKind, name: &str, p: &PlayerParams) -> Self {
        let mut entity = Self::base(id, kind, name.to_string(), p.radius, p.pos, p.color);
        entity.collision_delta = p.collision_delta;
        entity.motion = MotionHandler::new(p.heading, p.speed, p.max_speed, p.angle_delta);
        entity.battery = kind
            .capabilities()
            .battery
            .then(|| Battery::new(p.battery_max_charge));
        entity.initial = Initial {
            pos: p.pos,
            heading: entity.motion.heading(),
            speed: entity.motion.speed(),
        };
        entity
    }

    pub fn robot(id: EntityId, p: &RobotParams) -> Self {
        Self::sensing(id, EntityKind::Robot, "Robot", p, true)
    }

    /// Superbots start out of the active roster
    pub fn superbot(id: EntityId, p: &RobotParams) -> Self {
        Self::sensing(id, EntityKind::SuperBot, "SuperBot", p, false)
    }

    fn sensing(id: EntityId, kind: EntityKind, name: &str, p: &RobotParams, active: bool) -> Self {
        let mut entity = Self::base(id, kind, name.to_string(), p.radius, p.pos, p.color);
        entity.collision_delta = p.collision_delta;
        entity.motion = MotionHandler::new(p.heading, p.speed, p.max_speed, p.angle_delta);
        entity.sensors = SensorSuite::with_proximity_range(p.proximity_range);
        entity.active = active;
        entity.initial = Initial {
            pos: p.pos,
            heading: entity.motion.heading(),
            speed: entity.motion.speed(),
        };
        entity
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn set_position(&mut self, pos: Position) {
        self.pos = pos;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn collision_delta(&self) -> f64 {
        self.collision_delta
    }

    pub fn heading(&self) -> f64 {
        self.motion.heading()
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.motion.set_heading(heading);
    }

    pub fn speed(&self) -> f64 {
        self.motion.speed()
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.motion.set_speed(speed);
    }

    pub fn motion(&self) -> &MotionHandler {
        &self.motion
    }

    pub fn sensors(&self) -> &SensorSuite {
        &self.sensors
    }

    pub fn proximity_range(&self) -> f64 {
        self.sensors.proximity_range()
    }

    pub fn battery(&self) -> Option<&Battery> {
        self.battery.as_ref()
    }

    pub fn battery_level(&self) -> Option<f64> {
        self.battery.as_ref().map(Battery::level)
    }

    pub fn pause_ticks(&self) -> u32 {
        self.pause_ticks
    }

    pub fn set_pause_ticks(&mut self, ticks: u32) {
        self.pause_ticks = ticks;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn is_super(&self) -> bool {
        self.converted
    }

    pub fn set_super(&mut self, converted: bool) {
        self.converted = converted;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Starting position this entity resets to
    pub fn initial_position(&self) -> Position {
        self.initial.pos
    }

    /// Steer from sensor state, then move `dt` timesteps
    pub fn timestep_update(&mut self, dt: u32) {
        match self.kind {
            EntityKind::Obstacle | EntityKind::RechargeStation => {}
            EntityKind::Player | EntityKind::HomeBase => {
                let old_pos = self.pos;
                self.motion.update_from_touch(&self.sensors.touch);
                self.advance(dt);
                if let Some(battery) = self.battery.as_mut() {
                    battery.deplete(old_pos, self.pos, dt);
                }
            }
            EntityKind::Robot | EntityKind::SuperBot => {
                self.motion.update_from_touch(&self.sensors.touch);
                if let Some(proximity) = self.sensors.active_proximity() {
                    self.motion.update_from_proximity(proximity);
                }
                self.advance(dt);
            }
        }
    }

    fn advance(&mut self, dt: u32) {
        self.pos = integrate(self.pos, self.motion.heading(), self.motion.speed(), dt);
    }

    pub fn accept_collision(&mut self, event: &CollisionEvent) {
        match self.kind {
            EntityKind::Obstacle | EntityKind::RechargeStation => {}
            EntityKind::Player => self.absorb_hit(event),
            EntityKind::HomeBase => {
                self.absorb_hit(event);
                self.motion.set_speed(CRUISE_SPEED);
            }
            EntityKind::Robot | EntityKind::SuperBot => self.sensors.touch.accept(event),
        }
    }

    /// Battery-powered response: bounce, pay the penalty, lose a little speed
    fn absorb_hit(&mut self, event: &CollisionEvent) {
        self.sensors.touch.accept(event);
        if let Some(battery) = self.battery.as_mut() {
            battery.accept(event);
        }
        if event.collided && self.motion.speed() > 1.0 {
            self.motion.set_speed(self.motion.speed() - 1.0);
        }
    }

    pub fn accept_recharge(&mut self, _event: &RechargeEvent) {
        if let Some(battery) = self.battery.as_mut() {
            battery.recharge();
        }
    }

    pub fn accept_proximity(&mut self, event: &ProximityEvent) {
        if self.kind.capabilities().sensing {
            self.sensors.accept_proximity(event);
        }
    }

    pub fn accept_distress(&mut self, event: &DistressEvent) {
        if self.kind.capabilities().sensing {
            self.sensors.distress.accept(event);
        }
    }

    pub fn accept_entity_type(&mut self, event: &EntityTypeEvent) {
        if self.kind.capabilities().sensing {
            self.sensors.entity_type.accept(event);
        }
    }

    /// Directional input; ignored by kinds that take no commands
    pub fn accept_command(&mut self, cmd: Command) {
        if self.kind.capabilities().commands {
            self.motion.accept_command(cmd);
        }
    }

    /// Back to the constructed state. Roster membership is the arena's call.
    pub fn reset(&mut self) {
        self.pos = self.initial.pos;
        self.motion.set_heading(self.initial.heading);
        self.motion.set_speed(self.initial.speed);
        self.sensors.reset();
        if let Some(battery) = self.battery.as_mut() {
            battery.reset();
        }
        self.pause_ticks = 0;
        self.frozen = false;
        self.converted = false;
    }
}
