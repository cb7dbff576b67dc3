/// Entity types for the simulation.
///
/// An Entity is a plain data record: a box in world space, an active flag,
/// a collision category, and kind-specific state. The World owns every
/// entity in a SlotMap; other systems refer to them by `EntityKey`.

use bitflags::bitflags;
use glam::Vec2;
use rand::Rng;
use slotmap::new_key_type;
use crate::spatial::{BoundingBox, SpatialObject};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable, generation-tagged key for an Entity within a World.
    ///
    /// A key becomes invalid when its entity is removed; lookups with a
    /// stale key return None instead of aliasing a newer entity.
    pub struct EntityKey;
}

// ===== COLLISION CATEGORIES =====

bitflags! {
    /// What an entity is, as far as collision rules are concerned.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionCategory: u8 {
        /// Destroys breakables it touches, and is spent doing so
        const PROJECTILE = 1 << 0;
        /// Destroyed by projectiles; may split into smaller pieces
        const BREAKABLE  = 1 << 1;
        /// Player or bot ship (no collision rule yet)
        const SHIP       = 1 << 2;
    }
}

// ===== TUNING =====

/// Projectile side length
pub const PROJECTILE_SIZE: f32 = 5.0;
/// Projectile speed (units per second)
pub const PROJECTILE_SPEED: f32 = 1100.0;
/// Projectile lifetime in seconds
pub const PROJECTILE_LIFETIME: f32 = 0.4;
/// Ship side length
pub const SHIP_SIZE: f32 = 20.0;
/// Largest asteroid size level (spawned by a world reset)
pub const ASTEROID_MAX_SIZE_LEVEL: u8 = 3;

// ===== KIND-SPECIFIC STATE =====

/// A fired shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Velocity in units per second
    pub velocity: Vec2,
    /// Remaining lifetime in seconds
    pub life_time: f32,
}

/// A rock. Size level 1 is the smallest and does not split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    /// Velocity in units per second
    pub velocity: Vec2,
    /// 3 = large, 2 = medium, 1 = small
    pub size_level: u8,
}

impl Asteroid {
    /// Radius for a size level (box side is twice this)
    pub fn radius_for(size_level: u8) -> f32 {
        match size_level {
            3 => 30.0,
            2 => 20.0,
            _ => 10.0,
        }
    }

    /// Speed for a size level: smaller rocks move faster
    pub fn speed_for(size_level: u8) -> f32 {
        match size_level {
            3 => 100.0,
            2 => 150.0,
            _ => 250.0,
        }
    }

    /// Whether destroying this asteroid spawns fragments
    pub fn splits(&self) -> bool {
        self.size_level > 1
    }
}

/// Thrust/turn state shared by the player and bot ships.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    /// Velocity in units per second
    pub velocity: Vec2,
    /// Heading in degrees (0 = +x, clockwise on screen)
    pub rotation: f32,
    /// Thrust acceleration (units per second²)
    pub acceleration: f32,
    /// Velocity multiplier applied per tick
    pub friction: f32,
}

impl Ship {
    /// Player ship handling
    pub fn player() -> Self {
        Self {
            velocity: Vec2::ZERO,
            rotation: 0.0,
            acceleration: 900.0,
            friction: 0.98,
        }
    }

    /// Bot ship handling: stronger thrust, more drag
    pub fn bot() -> Self {
        Self {
            acceleration: 1800.0,
            friction: 0.94,
            ..Self::player()
        }
    }
}

/// Autopilot ship state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotShip {
    /// Flight state
    pub ship: Ship,
    /// Asteroid currently aimed at (re-chosen every tick)
    pub target: Option<EntityKey>,
}

/// Closed set of entity kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// Shot fired by a ship
    Projectile(Projectile),
    /// Breakable rock
    Asteroid(Asteroid),
    /// Ship steered by `ShipControls`
    PlayerShip(Ship),
    /// Ship steered by the autopilot
    BotShip(BotShip),
}

// ===== ENTITY =====

/// A simulated object.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Top-left corner in world space
    pub position: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Cleared when the entity is destroyed; removed at the end of the tick
    pub active: bool,
    /// Collision rule selector
    pub category: CollisionCategory,
    /// Kind-specific state
    pub kind: EntityKind,
}

impl Entity {
    /// Projectile whose top-left corner is `origin`, flying along `angle_deg`.
    pub fn projectile(origin: Vec2, angle_deg: f32) -> Self {
        let direction = Vec2::from_angle(angle_deg.to_radians());
        Self {
            position: origin,
            size: Vec2::splat(PROJECTILE_SIZE),
            active: true,
            category: CollisionCategory::PROJECTILE,
            kind: EntityKind::Projectile(Projectile {
                velocity: direction * PROJECTILE_SPEED,
                life_time: PROJECTILE_LIFETIME,
            }),
        }
    }

    /// Asteroid at `position` heading in a random direction.
    pub fn asteroid<R: Rng + ?Sized>(position: Vec2, size_level: u8, rng: &mut R) -> Self {
        let heading = rng.random_range(0.0..360.0_f32);
        Self::asteroid_with_heading(position, size_level, heading)
    }

    /// Asteroid at `position` moving along `heading_deg`.
    pub fn asteroid_with_heading(position: Vec2, size_level: u8, heading_deg: f32) -> Self {
        let side = Asteroid::radius_for(size_level) * 2.0;
        let velocity = Vec2::from_angle(heading_deg.to_radians()) * Asteroid::speed_for(size_level);
        Self {
            position,
            size: Vec2::splat(side),
            active: true,
            category: CollisionCategory::BREAKABLE,
            kind: EntityKind::Asteroid(Asteroid { velocity, size_level }),
        }
    }

    /// Player ship centered on `center`.
    pub fn player_ship(center: Vec2) -> Self {
        Self {
            position: center - Vec2::splat(SHIP_SIZE / 2.0),
            size: Vec2::splat(SHIP_SIZE),
            active: true,
            category: CollisionCategory::SHIP,
            kind: EntityKind::PlayerShip(Ship::player()),
        }
    }

    /// Bot ship centered on `center`.
    pub fn bot_ship(center: Vec2) -> Self {
        Self {
            kind: EntityKind::BotShip(BotShip { ship: Ship::bot(), target: None }),
            ..Self::player_ship(center)
        }
    }

    /// Center of the entity's box
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Asteroid state, if this is an asteroid
    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match &self.kind {
            EntityKind::Asteroid(asteroid) => Some(asteroid),
            _ => None,
        }
    }

    /// Ship state for both player and bot ships
    pub fn as_ship(&self) -> Option<&Ship> {
        match &self.kind {
            EntityKind::PlayerShip(ship) => Some(ship),
            EntityKind::BotShip(bot) => Some(&bot.ship),
            _ => None,
        }
    }

    /// Whether this entity is an asteroid
    pub fn is_asteroid(&self) -> bool {
        matches!(self.kind, EntityKind::Asteroid(_))
    }

    /// Whether this entity is a projectile
    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, EntityKind::Projectile(_))
    }
}

impl SpatialObject for Entity {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_position_size(self.position, self.size)
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
