//! Sensors carried by mobile entities
//!
//! Each sensor holds an activation flag plus whatever contact data its event
//! carries. The only way to change a reading is to `accept` an event.

use super::event::{CollisionEvent, DistressEvent, EntityType, EntityTypeEvent, ProximityEvent};
use super::geometry::Position;
use crate::consts::DEFAULT_PROXIMITY_RANGE;

#[derive(Debug, Clone, Default)]
pub struct TouchSensor {
    activated: bool,
    point_of_contact: Position,
    angle_of_contact: f64,
}

impl TouchSensor {
    pub fn activated(&self) -> bool {
        self.activated
    }

    pub fn point_of_contact(&self) -> Position {
        self.point_of_contact
    }

    pub fn angle_of_contact(&self) -> f64 {
        self.angle_of_contact
    }

    /// A miss deactivates the sensor but keeps the last contact data
    pub fn accept(&mut self, event: &CollisionEvent) {
        if event.collided {
            self.activated = true;
            self.point_of_contact = event.point_of_contact;
            self.angle_of_contact = event.angle_of_contact;
        } else {
            self.activated = false;
        }
    }

    pub fn reset(&mut self) {
        self.activated = false;
    }
}

#[derive(Debug, Clone)]
pub struct ProximitySensor {
    activated: bool,
    point_of_contact: Position,
    angle_of_contact: f64,
    range: f64,
}

impl Default for ProximitySensor {
    fn default() -> Self {
        Self::with_range(DEFAULT_PROXIMITY_RANGE)
    }
}

impl ProximitySensor {
    pub fn with_range(range: f64) -> Self {
        Self {
            activated: false,
            point_of_contact: Position::default(),
            angle_of_contact: 0.0,
            range,
        }
    }

    pub fn activated(&self) -> bool {
        self.activated
    }

    pub fn point_of_contact(&self) -> Position {
        self.point_of_contact
    }

    pub fn angle_of_contact(&self) -> f64 {
        self.angle_of_contact
    }

    /// Detection distance beyond the two entities' combined radii
    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn accept(&mut self, event: &ProximityEvent) {
        if event.activated {
            self.activated = true;
            self.point_of_contact = event.point_of_contact;
            self.angle_of_contact = event.angle_of_contact;
        } else {
            self.activated = false;
        }
    }

    pub fn reset(&mut self) {
        self.activated = false;
    }
}

#[derive(Debug, Clone, Default)]
pub struct DistressSensor {
    activated: bool,
}

impl DistressSensor {
    pub fn activated(&self) -> bool {
        self.activated
    }

    pub fn accept(&mut self, event: &DistressEvent) {
        self.activated = event.activated;
    }

    pub fn reset(&mut self) {
        self.activated = false;
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntityTypeSensor {
    entity_type: EntityType,
}

impl EntityTypeSensor {
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// `EntityType::None` readings leave the last classification in place
    pub fn accept(&mut self, event: &EntityTypeEvent) {
        if event.entity_type != EntityType::None {
            self.entity_type = event.entity_type;
        }
    }

    pub fn reset(&mut self) {
        self.entity_type = EntityType::None;
    }
}

/// Every sensor a mobile entity may carry
///
/// Players and the home base only ever feed the touch sensor; robots and
/// superbots use the whole suite.
#[derive(Debug, Clone, Default)]
pub struct SensorSuite {
    pub touch: TouchSensor,
    pub proximity: [ProximitySensor; 2],
    pub distress: DistressSensor,
    pub entity_type: EntityTypeSensor,
}

impl SensorSuite {
    pub fn with_proximity_range(range: f64) -> Self {
        Self {
            proximity: [
                ProximitySensor::with_range(range),
                ProximitySensor::with_range(range),
            ],
            ..Default::default()
        }
    }

    /// Range used when scanning for nearby entities
    pub fn proximity_range(&self) -> f64 {
        self.proximity[0].range()
    }

    /// Both proximity sensors share one reading
    pub fn accept_proximity(&mut self, event: &ProximityEvent) {
        for sensor in &mut self.proximity {
            sensor.accept(event);
        }
    }

    /// First activated proximity sensor, if any
    pub fn active_proximity(&self) -> Option<&ProximitySensor> {
        self.proximity.iter().find(|s| s.activated())
    }

    pub fn reset(&mut self) {
        self.touch.reset();
        for sensor in &mut self.proximity {
            sensor.reset();
        }
        self.distress.reset();
        self.entity_type.reset();
    }
}
