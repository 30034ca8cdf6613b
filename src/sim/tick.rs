//! Fixed timestep simulation tick
//!
//! One call runs the whole update pipeline to completion. Every stage sees
//! the mutations of the stages before it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::{check_entity_collision, check_out_of_bounds};
use super::entity::EntityId;
use super::event::{CollisionEvent, Command, RechargeEvent};
use super::proximity;
use crate::consts::*;
use crate::normalize_degrees;

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Battery ran out, or every robot reached the home base
    Lose = 0,
    /// Every robot is frozen or converted
    Win = 1,
    Continue = 2,
}

impl GameStatus {
    /// Numeric status: 0 lose, 1 win, 2 continue
    pub fn as_code(self) -> i32 {
        self as i32
    }

    pub fn is_over(self) -> bool {
        self != GameStatus::Continue
    }
}

/// Advance the arena by one timestep
pub fn tick(arena: &mut Arena) -> GameStatus {
    arena.ticks += 1;
    let status = run_pipeline(arena);
    if status.is_over() && status != arena.status {
        log::info!(
            "Game over after {} ticks: {:?} (battery {:.2}, {} converted)",
            arena.ticks,
            status,
            arena.player_battery_level(),
            arena.n_superbots
        );
    }
    arena.status = status;
    status
}

fn run_pipeline(arena: &mut Arena) -> GameStatus {
    integrate(arena);

    if let Some(status) = update_player(arena) {
        return status;
    }
    jitter_home_base(arena);
    check_recharge(arena);

    resolve_robots(arena);
    resolve_superbots(arena);
    resolve_general_collisions(arena);
    sense_proximity(arena);

    evaluate_endgame(arena)
}

/// Steer every active entity from its sensors and move it one step
fn integrate(arena: &mut Arena) {
    for entity in arena.entities.iter_mut().filter(|e| e.is_active()) {
        entity.timestep_update(TICK_DT);
    }
}

/// Flat battery ends the game; a paused player stays put
fn update_player(arena: &mut Arena) -> Option<GameStatus> {
    let player = &mut arena.entities[arena.player];
    if player.battery().is_some_and(|b| b.is_empty()) {
        return Some(GameStatus::Lose);
    }
    if player.pause_ticks() > 0 {
        player.set_speed(0.0);
        player.set_pause_ticks(player.pause_ticks() - 1);
    }
    None
}

/// Player touching the recharge station refills past capacity
pub(crate) fn check_recharge(arena: &mut Arena) {
    let event = check_entity_collision(arena.player(), arena.recharge_station());
    if event.collided {
        let player = &mut arena.entities[arena.player];
        player.accept_recharge(&RechargeEvent);
        log::debug!("Player recharged to {:.2}", arena.player_battery_level());
    }
}

/// The home base occasionally picks a new random heading
fn jitter_home_base(arena: &mut Arena) {
    if arena.rng.random_range(0..=HOME_BASE_JITTER_SPAN) == HOME_BASE_JITTER_HIT {
        let heading = arena.rng.random_range(0..360u32);
        arena.entities[arena.home_base].set_heading(heading as f64);
    }
}

/// Home base converts, player freezes, sibling contact unfreezes
fn resolve_robots(arena: &mut Arena) {
    for i in 0..arena.robots.len() {
        let id = arena.robots[i];
        if !arena.entities[id].is_active() {
            continue;
        }

        let home = check_entity_collision(&arena.entities[id], &arena.entities[arena.home_base]);
        if home.collided {
            arena.convert_robot(id);
            continue;
        }

        let event = check_entity_collision(&arena.entities[id], &arena.entities[arena.player]);
        if event.collided {
            let robot = &mut arena.entities[id];
            robot.set_speed(0.0);
            robot.set_frozen(true);
            log::debug!("Robot {id} frozen by player");
        }
        resolve_robot_contacts(arena, id, event);
    }
}

/// Superbots pause the player on contact
fn resolve_superbots(arena: &mut Arena) {
    for i in 0..arena.superbots.len() {
        let id = arena.superbots[i];
        if !arena.entities[id].is_active() {
            continue;
        }

        let event = check_entity_collision(&arena.entities[id], &arena.entities[arena.player]);
        if event.collided {
            let player = &mut arena.entities[arena.player];
            player.set_pause_ticks(SUPERBOT_PAUSE_TICKS);
            player.set_speed(0.0);
            log::debug!("Superbot {id} paused the player");
        }
        resolve_robot_contacts(arena, id, event);
    }
}

/// Unless `event` already registered a hit, look for a robot `id` is
/// touching and unfreeze it. Whatever results goes to `id`'s touch sensor.
fn resolve_robot_contacts(arena: &mut Arena, id: EntityId, mut event: CollisionEvent) {
    if !event.collided {
        let mover = &arena.entities[id];
        let sibling = arena
            .robots
            .iter()
            .map(|&other| &arena.entities[other])
            .filter(|other| other.id() != id && other.is_active())
            .find_map(|other| {
                let hit = check_entity_collision(mover, other);
                hit.collided.then_some((other.id(), hit))
            });

        if let Some((other, hit)) = sibling {
            event = hit;
            let robot = &mut arena.entities[other];
            if robot.is_frozen() {
                log::debug!("Robot {other} unfrozen by {id}");
            }
            robot.set_frozen(false);
            robot.set_speed(CRUISE_SPEED);
        }
    }
    arena.entities[id].accept_collision(&event);
}

/// Walls first, then the first entity each mobile entity touches
fn resolve_general_collisions(arena: &mut Arena) {
    let (x_dim, y_dim) = arena.dimensions();
    for id in 0..arena.entities.len() {
        let entity = &arena.entities[id];
        if !entity.is_active() || !entity.kind().is_mobile() {
            continue;
        }

        let mut event = check_out_of_bounds(&mut arena.entities[id], x_dim, y_dim);
        if !event.collided {
            let mover = &arena.entities[id];
            if let Some(hit) = arena
                .entities
                .iter()
                .filter(|other| other.is_active() && other.id() != id)
                .map(|other| check_entity_collision(mover, other))
                .find(|hit| hit.collided)
            {
                event = hit;
            }
        }
        arena.entities[id].accept_collision(&event);
    }
}

/// Robots, then superbots, scan for walls and nearby entities
fn sense_proximity(arena: &mut Arena) {
    let (x_dim, y_dim) = arena.dimensions();
    let sensing: Vec<EntityId> = arena
        .robots
        .iter()
        .chain(arena.superbots.iter())
        .copied()
        .filter(|&id| arena.entities[id].is_active())
        .collect();

    for id in sensing {
        let reading = proximity::scan(
            &arena.entities[id],
            arena.entities.iter().filter(|e| e.is_active()),
            x_dim,
            y_dim,
        );
        if reading.proximity.activated {
            log::trace!(
                "{} {id} sensed {:?} at {:?}",
                arena.entities[id].name(),
                reading.entity_type.entity_type,
                reading.proximity.point_of_contact
            );
        }

        let entity = &mut arena.entities[id];
        entity.accept_proximity(&reading.proximity);
        entity.accept_entity_type(&reading.entity_type);
        entity.accept_distress(&reading.distress);
    }
}

/// All converted: lose. All frozen or converted: win.
fn evaluate_endgame(arena: &Arena) -> GameStatus {
    if arena.robot_roster().all(|r| r.is_super()) {
        GameStatus::Lose
    } else if arena.robot_roster().all(|r| r.is_frozen() || r.is_super()) {
        GameStatus::Win
    } else {
        GameStatus::Continue
    }
}

/// Headless input: steer the player toward the nearest robot still moving
///
/// Returns the command a human would press this tick, if any.
pub fn autopilot_command(arena: &Arena) -> Option<Command> {
    let player = arena.player();
    let target = arena
        .robots()
        .filter(|r| !r.is_frozen())
        .min_by(|a, b| {
            let dist_a = a.position().distance(&player.position());
            let dist_b = b.position().distance(&player.position());
            dist_a
                .partial_cmp(&dist_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let to_target = target.position().as_dvec2() - player.position().as_dvec2();
    let desired = normalize_degrees(to_target.y.atan2(to_target.x).to_degrees());
    let turn = normalize_degrees(desired - player.heading());
    let tolerance = player.motion().angle_delta() / 2.0;

    if turn > tolerance && turn <= 180.0 {
        Some(Command::TurnRight)
    } else if turn > 180.0 && 360.0 - turn > tolerance {
        Some(Command::TurnLeft)
    } else if player.speed() < AUTOPILOT_CRUISE_SPEED {
        Some(Command::SpeedUp)
    } else {
        None
    }
}
