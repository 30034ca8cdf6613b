//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod arena;
pub mod battery;
pub mod collision;
pub mod entity;
pub mod event;
pub mod geometry;
pub mod motion;
pub mod proximity;
pub mod sensor;
pub mod tick;

pub use arena::{Arena, ArenaSnapshot, EntitySnapshot};
pub use battery::Battery;
pub use collision::{Wall, check_entity_collision, check_out_of_bounds, contact_angle};
pub use entity::{Capabilities, Entity, EntityId, EntityKind};
pub use event::{
    CollisionEvent, Command, DistressEvent, EntityType, EntityTypeEvent, ProximityEvent,
    RechargeEvent,
};
pub use geometry::{Color, Position};
pub use motion::{MotionHandler, integrate};
pub use proximity::{ProximityReading, classify_for_robot, classify_for_superbot};
pub use sensor::{DistressSensor, EntityTypeSensor, ProximitySensor, SensorSuite, TouchSensor};
pub use tick::{GameStatus, autopilot_command, tick};
