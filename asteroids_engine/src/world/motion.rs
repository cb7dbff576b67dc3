/// Per-tick kinematics for every entity kind.
///
/// Motion never touches the entity arena directly. Everything a moving
/// entity produces (fired projectiles, the shot counter) goes into the
/// `TickContext`, which the World drains after the motion loop.

use glam::Vec2;
use rand::Rng;
use rand::rngs::StdRng;
use crate::spatial::BoundingBox;
use super::entity::{Entity, EntityKey, EntityKind, Projectile, Asteroid, Ship, BotShip, PROJECTILE_SPEED};

/// Player turn rate (degrees per second)
pub const PLAYER_TURN_RATE: f32 = 270.0;
/// Bot turn rate (degrees per second)
pub const BOT_TURN_RATE: f32 = 400.0;
/// Targets farther than this (top-left to top-left) are ignored
pub const BOT_SEARCH_RADIUS: f32 = 100_000.0;
/// Bot backs away from targets closer than this
pub const BOT_FLEE_DISTANCE: f32 = 180.0;
/// Bot only fires when its heading is within this many degrees of the aim
pub const BOT_AIM_TOLERANCE: f32 = 10.0;
/// Chance (percent) that an aimed bot fires on a given tick
pub const BOT_FIRE_CHANCE: u32 = 15;

// ===== INPUT =====

/// Player controls for one tick.
///
/// `fire` is an edge: one projectile per tick at most.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipControls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

// ===== TICK CONTEXT =====

/// Mutable state shared by every motion update within one tick.
pub struct TickContext<'a> {
    /// Elapsed time for this tick (seconds)
    pub dt: f32,
    /// Player input
    pub controls: ShipControls,
    /// World bounds used for wrap-around
    pub play_field: BoundingBox,
    /// Random source for bot decisions
    pub rng: &'a mut StdRng,
    /// Shots fired during this tick
    pub shots_fired: u32,
    /// Projectiles fired during this tick, appended by the World afterwards
    pub spawned: Vec<Entity>,
}

impl<'a> TickContext<'a> {
    pub fn new(dt: f32, controls: ShipControls, play_field: BoundingBox, rng: &'a mut StdRng) -> Self {
        Self {
            dt,
            controls,
            play_field,
            rng,
            shots_fired: 0,
            spawned: Vec::new(),
        }
    }

    /// Queue a projectile leaving `origin` along `angle_deg` and count the shot.
    pub fn fire(&mut self, origin: Vec2, angle_deg: f32) {
        self.spawned.push(Entity::projectile(origin, angle_deg));
        self.shots_fired += 1;
    }
}

// ===== WRAP-AROUND =====

/// Wrap rule for projectiles and ships: leaving one edge re-enters at the
/// opposite edge.
pub fn wrap_to_edge(position: &mut Vec2, field: &BoundingBox) {
    if position.x > field.right() {
        position.x = field.x;
    }
    if position.x < field.x {
        position.x = field.right();
    }
    if position.y > field.bottom() {
        position.y = field.y;
    }
    if position.y < field.y {
        position.y = field.bottom();
    }
}

/// Wrap rule for asteroids: the box slides fully off-screen before it
/// re-enters on the other side.
pub fn wrap_past_edge(position: &mut Vec2, size: Vec2, field: &BoundingBox) {
    if position.x > field.right() {
        position.x = field.x - size.x;
    }
    if position.x < field.x - size.x {
        position.x = field.right();
    }
    if position.y > field.bottom() {
        position.y = field.y - size.y;
    }
    if position.y < field.y - size.y {
        position.y = field.bottom();
    }
}

// ===== BOT TARGETING =====

/// Snapshot of the asteroid a bot is aiming at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotTarget {
    pub key: EntityKey,
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    /// Distance between the bot's and the target's top-left corners
    pub distance: f32,
}

/// Pick the nearest active asteroid to `ship`.
///
/// Distance is measured between top-left corners. Ties keep the first
/// asteroid in iteration order.
pub fn find_bot_target<'a, I>(ship: &Entity, entities: I) -> Option<BotTarget>
where
    I: IntoIterator<Item = (EntityKey, &'a Entity)>,
{
    let mut best: Option<BotTarget> = None;
    let mut best_distance = BOT_SEARCH_RADIUS;

    for (key, entity) in entities {
        if !entity.active {
            continue;
        }
        let Some(asteroid) = entity.as_asteroid() else {
            continue;
        };
        let distance = entity.position.distance(ship.position);
        if distance < best_distance {
            best_distance = distance;
            best = Some(BotTarget {
                key,
                position: entity.position,
                size: entity.size,
                velocity: asteroid.velocity,
                distance,
            });
        }
    }

    best
}

/// Heading (degrees, in [0, 360)) from `from` to `to`.
pub fn heading_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x).to_degrees();
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// Signed shortest turn from `current` to `desired`, in [-180, 180).
pub fn angle_difference(desired: f32, current: f32) -> f32 {
    (desired - current + 180.0).rem_euclid(360.0) - 180.0
}

// ===== UPDATE =====

/// Advance one entity by `ctx.dt`.
///
/// `target` is only read by bot ships; the World resolves it beforehand so
/// this function never needs to look at other entities.
pub fn update_entity(entity: &mut Entity, target: Option<BotTarget>, ctx: &mut TickContext) {
    let Entity { position, size, active, kind, .. } = entity;
    match kind {
        EntityKind::Projectile(projectile) => update_projectile(projectile, position, active, ctx),
        EntityKind::Asteroid(asteroid) => update_asteroid(asteroid, position, *size, ctx),
        EntityKind::PlayerShip(ship) => update_player(ship, position, *size, ctx),
        EntityKind::BotShip(bot) => update_bot(bot, position, *size, target, ctx),
    }
}

fn update_projectile(projectile: &mut Projectile, position: &mut Vec2, active: &mut bool, ctx: &TickContext) {
    *position += projectile.velocity * ctx.dt;
    projectile.life_time -= ctx.dt;
    if projectile.life_time <= 0.0 {
        *active = false;
    }
    wrap_to_edge(position, &ctx.play_field);
}

fn update_asteroid(asteroid: &Asteroid, position: &mut Vec2, size: Vec2, ctx: &TickContext) {
    *position += asteroid.velocity * ctx.dt;
    wrap_past_edge(position, size, &ctx.play_field);
}

fn update_player(ship: &mut Ship, position: &mut Vec2, size: Vec2, ctx: &mut TickContext) {
    let dt = ctx.dt;
    let controls = ctx.controls;

    if controls.turn_left {
        ship.rotation -= PLAYER_TURN_RATE * dt;
    }
    if controls.turn_right {
        ship.rotation += PLAYER_TURN_RATE * dt;
    }
    if controls.thrust {
        ship.velocity += Vec2::from_angle(ship.rotation.to_radians()) * ship.acceleration * dt;
    }
    if controls.fire {
        ctx.fire(*position + size * 0.5, ship.rotation);
    }

    *position += ship.velocity * dt;
    ship.velocity *= ship.friction;
    wrap_to_edge(position, &ctx.play_field);
}

fn update_bot(bot: &mut BotShip, position: &mut Vec2, size: Vec2, target: Option<BotTarget>, ctx: &mut TickContext) {
    let dt = ctx.dt;
    let ship = &mut bot.ship;
    bot.target = target.map(|t| t.key);

    if let Some(target) = target {
        let center = *position + size * 0.5;
        let lead_time = target.distance / PROJECTILE_SPEED;
        let aim = target.position + target.velocity * lead_time + target.size * 0.5;
        let desired = heading_to(center, aim);
        let diff = angle_difference(desired, ship.rotation);

        if diff > 0.0 {
            ship.rotation += BOT_TURN_RATE * dt;
        } else {
            ship.rotation -= BOT_TURN_RATE * dt;
        }

        if diff.abs() < BOT_AIM_TOLERANCE && ctx.rng.random_range(0..100) < BOT_FIRE_CHANCE {
            ctx.fire(center, ship.rotation);
        }

        if target.distance < BOT_FLEE_DISTANCE {
            ship.velocity -= Vec2::from_angle(desired.to_radians()) * ship.acceleration * dt;
        } else {
            ship.velocity *= ship.friction;
        }
    }

    *position += ship.velocity * dt;
    wrap_to_edge(position, &ctx.play_field);
}

#[cfg(test)]
#[path = "motion_tests.rs"]
mod tests;
