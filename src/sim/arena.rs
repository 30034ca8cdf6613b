//! Arena: entity registry and query surface
//!
//! Entities live in one slot table indexed by `EntityId`. Typed rosters
//! (obstacles, robots, superbots) hold ids into that table, and roster
//! membership is the per-slot `active` flag rather than list surgery.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::event::Command;
use super::geometry::{Color, Position};
use super::tick::GameStatus;
use crate::error::{ArenaError, ParamsError};
use crate::params::ArenaParams;

/// Drawable state of one active entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    pub pos: Position,
    pub heading: f64,
    pub speed: f64,
    pub radius: f64,
    pub color: Color,
}

/// Everything a renderer or telemetry sink needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub tick: u64,
    pub status: GameStatus,
    pub battery: f64,
    pub entities: Vec<EntitySnapshot>,
}

#[derive(Debug, Clone)]
pub struct Arena {
    params: ArenaParams,
    pub(crate) entities: Vec<Entity>,
    pub(crate) player: EntityId,
    pub(crate) recharge_station: EntityId,
    pub(crate) home_base: EntityId,
    pub(crate) obstacles: Vec<EntityId>,
    pub(crate) robots: Vec<EntityId>,
    /// One per robot, activated in conversion order
    pub(crate) superbots: Vec<EntityId>,
    /// Conversions so far; indexes the next dormant superbot
    pub(crate) n_superbots: usize,
    pub(crate) x_dim: u32,
    pub(crate) y_dim: u32,
    pub(crate) rng: Pcg32,
    pub(crate) ticks: u64,
    pub(crate) status: GameStatus,
    next_id: EntityId,
}

impl Arena {
    /// Build an arena from an already-valid parameter bundle
    pub fn new(params: ArenaParams) -> Self {
        let mut arena = Self {
            entities: Vec::new(),
            player: 0,
            recharge_station: 0,
            home_base: 0,
            obstacles: Vec::new(),
            robots: Vec::new(),
            superbots: Vec::new(),
            n_superbots: 0,
            x_dim: params.x_dim,
            y_dim: params.y_dim,
            rng: Pcg32::seed_from_u64(params.seed),
            ticks: 0,
            status: GameStatus::Continue,
            next_id: 0,
            params,
        };
        arena.populate();

        log::info!(
            "Arena {}x{} ready: {} robots, {} obstacles, seed {}",
            arena.x_dim,
            arena.y_dim,
            arena.robots.len(),
            arena.obstacles.len(),
            arena.params.seed
        );
        arena
    }

    /// Validate `params` first
    pub fn try_new(params: ArenaParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self::new(params))
    }

    /// Allocate a new entity id
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn(&mut self, make: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(make(id));
        debug_assert_eq!(self.entities.len(), self.next_id);
        id
    }

    fn populate(&mut self) {
        let params = self.params.clone();

        self.player = self.spawn(|id| Entity::player(id, &params.player));
        self.recharge_station =
            self.spawn(|id| Entity::recharge_station(id, &params.recharge_station));
        self.home_base = self.spawn(|id| Entity::home_base(id, &params.home_base));

        for (ordinal, obstacle) in params.obstacles.iter().enumerate() {
            let id = self.spawn(|id| Entity::obstacle(id, ordinal, obstacle));
            self.obstacles.push(id);
        }
        for robot in &params.robots {
            let id = self.spawn(|id| Entity::robot(id, robot));
            self.robots.push(id);
        }
        for index in 0..params.robots.len() {
            let superbot = params.superbot(index);
            let id = self.spawn(|id| Entity::superbot(id, &superbot));
            self.superbots.push(id);
        }
    }

    /// Restore the constructed state: converted robots come back, superbots
    /// go dormant, every entity resets in place
    pub fn reset(&mut self) {
        for &id in &self.robots {
            self.entities[id].set_active(true);
        }
        for &id in &self.superbots {
            self.entities[id].set_active(false);
        }
        for entity in &mut self.entities {
            entity.reset();
        }
        self.n_superbots = 0;
        self.rng = Pcg32::seed_from_u64(self.params.seed);
        self.ticks = 0;
        self.status = GameStatus::Continue;
        log::info!("Arena reset");
    }

    /// Advance one tick. 0 = lose, 1 = win, 2 = continue (see [`GameStatus`]).
    pub fn advance_time(&mut self) -> GameStatus {
        super::tick::tick(self)
    }

    /// Translate a raw key code and forward it to the player
    pub fn try_accept(&mut self, key: i32) -> Result<(), ArenaError> {
        let cmd = Command::try_from(key)?;
        self.accept_command(cmd);
        Ok(())
    }

    /// Like [`Arena::try_accept`], but an unknown key code is a caller bug
    ///
    /// # Panics
    /// On any key code outside the four arrow keys.
    pub fn accept(&mut self, key: i32) {
        if let Err(err) = self.try_accept(key) {
            log::error!("{err}");
            panic!("{err}");
        }
    }

    pub fn accept_command(&mut self, cmd: Command) {
        self.entities[self.player].accept_command(cmd);
    }

    pub fn home_base_change_direction(&mut self, heading: f64) {
        self.entities[self.home_base].set_heading(heading);
    }

    pub fn player_battery_level(&self) -> f64 {
        self.player().battery_level().unwrap_or(0.0)
    }

    pub fn params(&self) -> &ArenaParams {
        &self.params
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.x_dim, self.y_dim)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Status returned by the last tick
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn n_superbots(&self) -> usize {
        self.n_superbots
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn player(&self) -> &Entity {
        &self.entities[self.player]
    }

    pub fn home_base(&self) -> &Entity {
        &self.entities[self.home_base]
    }

    pub fn recharge_station(&self) -> &Entity {
        &self.entities[self.recharge_station]
    }

    /// Active entities in id order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_active())
    }

    pub fn mobile_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities().filter(|e| e.kind().is_mobile())
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Entity> {
        self.obstacles.iter().map(|&id| &self.entities[id])
    }

    /// Robots still in play
    pub fn robots(&self) -> impl Iterator<Item = &Entity> {
        self.robot_roster().filter(|e| e.is_active())
    }

    /// Every robot slot, converted ones included
    pub fn robot_roster(&self) -> impl Iterator<Item = &Entity> {
        self.robots.iter().map(|&id| &self.entities[id])
    }

    /// Activated superbots
    pub fn superbots(&self) -> impl Iterator<Item = &Entity> {
        self.superbots
            .iter()
            .map(|&id| &self.entities[id])
            .filter(|e| e.is_active())
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            tick: self.ticks,
            status: self.status,
            battery: self.player_battery_level(),
            entities: self
                .entities()
                .map(|e| EntitySnapshot {
                    id: e.id(),
                    kind: e.kind(),
                    name: e.name().to_string(),
                    pos: e.position(),
                    heading: e.heading(),
                    speed: e.speed(),
                    radius: e.radius(),
                    color: e.color(),
                })
                .collect(),
        }
    }

    /// Swap `robot` for the next dormant superbot
    ///
    /// The superbot takes over the robot's position, heading and speed. The
    /// robot is parked outside the arena, flagged super and dropped from play.
    pub(crate) fn convert_robot(&mut self, robot: EntityId) {
        let Some(&superbot) = self.superbots.get(self.n_superbots) else {
            log::error!("No dormant superbot left for robot {robot}");
            return;
        };

        let (pos, heading, speed) = {
            let r = &self.entities[robot];
            (r.position(), r.heading(), r.speed())
        };
        let sb = &mut self.entities[superbot];
        sb.set_position(pos);
        sb.set_heading(heading);
        sb.set_speed(speed);
        sb.set_active(true);

        let parking = self.params.parking_position();
        let r = &mut self.entities[robot];
        r.set_position(parking);
        r.set_super(true);
        r.set_active(false);

        self.n_superbots += 1;
        log::debug!(
            "Robot {robot} reached home base at {pos:?}; superbot {superbot} activated ({}/{})",
            self.n_superbots,
            self.robots.len()
        );
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ArenaParams::default())
    }
}
