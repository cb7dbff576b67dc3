/// World - entity arena, simulation tick and per-session statistics.
///
/// A World owns every entity (SlotMap arena), the iteration order, the
/// quadtree used by the collision pass, and the random source. One call to
/// `tick` advances the simulation by one frame:
///
/// 1. accumulate elapsed time
/// 2. move every entity; projectiles fired this tick are appended afterwards
/// 3. count asteroids (zero = victory)
/// 4. resolve collisions and sweep destroyed entities
/// 5. fold the tick's shot count into the session statistics

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::spatial::{BoundingBox, Quadtree, QuadtreeDesc, SpatialIndex};
use crate::utils::Sequence;
use super::collision::{CollisionPass, CollisionReport};
use super::entity::{Entity, EntityKey, EntityKind, Ship, ASTEROID_MAX_SIZE_LEVEL};
use super::motion::{self, ShipControls, TickContext};

/// Asteroids spawned closer than this to the horizontal center are pushed
/// aside so they do not start on top of the ship.
const SPAWN_CLEARANCE: f32 = 100.0;
/// How far a spawn inside the clearance band is pushed to the right
const SPAWN_SHIFT: f32 = 200.0;

// ===== CONFIGURATION =====

/// Descriptor for creating a World.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldDesc {
    /// Play-field rectangle (wrap-around bounds and quadtree root)
    pub play_field: BoundingBox,
    /// Quadtree subdivision limits
    pub quadtree: QuadtreeDesc,
    /// Size-3 asteroids spawned by `reset`
    pub initial_asteroids: usize,
    /// Random seed (None = seeded from the OS)
    pub seed: Option<u64>,
}

impl Default for WorldDesc {
    fn default() -> Self {
        Self {
            play_field: BoundingBox::new(0.0, 0.0, 800.0, 500.0),
            quadtree: QuadtreeDesc::default(),
            initial_asteroids: 8,
            seed: None,
        }
    }
}

impl WorldDesc {
    /// Check that the descriptor describes a usable world.
    pub fn validate(&self) -> Result<()> {
        let field = &self.play_field;
        if !field.is_valid() || !(field.width > 0.0 && field.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "play field must be finite with a positive size, got {}x{} at ({}, {})",
                field.width, field.height, field.x, field.y
            )));
        }
        if self.quadtree.max_objects == 0 {
            return Err(Error::InvalidConfig("quadtree max_objects must be at least 1".to_string()));
        }
        if self.quadtree.max_levels == 0 {
            return Err(Error::InvalidConfig("quadtree max_levels must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Which ship a reset spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Player-controlled ship
    Solo,
    /// Autopilot ship
    WithBot,
}

// ===== STATISTICS =====

/// Running statistics for the current round.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    /// Projectiles fired since the last reset
    pub shots_fired: u32,
    /// Simulated seconds since the last reset
    pub elapsed: f32,
}

impl SessionStats {
    /// Score in [0, 100]: 1000 / shots, capped at 100. Zero shots scores 0.
    pub fn precision_score(&self) -> f32 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        (1000.0 / self.shots_fired as f32).min(100.0)
    }
}

// ===== TICK RESULT =====

/// Whether the round is still going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Asteroids remained after motion
    Running,
    /// No asteroid was left after motion
    Victory,
}

/// Summary of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// Asteroids counted after motion, before collisions
    pub asteroids: usize,
    /// Shots fired during this tick
    pub shots_fired: u32,
    pub collisions: CollisionReport,
}

// ===== WORLD =====

/// A simulated play field.
pub struct World {
    desc: WorldDesc,
    entities: SlotMap<EntityKey, Entity>,
    /// Iteration order (insertion order, compacted by the sweep)
    order: Sequence<EntityKey>,
    index: Quadtree<EntityKey>,
    collision_pass: CollisionPass,
    rng: StdRng,
    stats: SessionStats,
    ship: Option<EntityKey>,
}

impl World {
    /// Create an empty world.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the descriptor fails validation.
    pub fn new(desc: WorldDesc) -> Result<Self> {
        if let Err(error) = desc.validate() {
            crate::engine_error!("asteroids::World", "Rejected world config: {}", error);
            return Err(error);
        }

        let rng = match desc.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        crate::engine_info!("asteroids::World",
            "World created ({}x{}, quadtree {}/{})",
            desc.play_field.width, desc.play_field.height,
            desc.quadtree.max_objects, desc.quadtree.max_levels);

        Ok(Self {
            desc,
            entities: SlotMap::with_key(),
            order: Sequence::new(),
            index: Quadtree::with_desc(desc.play_field, desc.quadtree),
            collision_pass: CollisionPass::new(),
            rng,
            stats: SessionStats::default(),
            ship: None,
        })
    }

    /// Start a new round: clear everything, spawn the ship and the
    /// initial asteroids.
    pub fn reset(&mut self, mode: GameMode) {
        self.entities.clear();
        self.order.clear();
        self.index.clear();
        self.stats = SessionStats::default();

        let field = self.desc.play_field;
        let center = field.center();
        let ship = match mode {
            GameMode::Solo => Entity::player_ship(center),
            GameMode::WithBot => Entity::bot_ship(center),
        };
        self.ship = Some(self.spawn(ship));

        for _ in 0..self.desc.initial_asteroids {
            let mut position = Vec2::new(
                field.x + self.rng.random_range(0.0..field.width),
                field.y + self.rng.random_range(0.0..field.height),
            );
            if (position.x - center.x).abs() < SPAWN_CLEARANCE {
                position.x += SPAWN_SHIFT;
            }
            let asteroid = Entity::asteroid(position, ASTEROID_MAX_SIZE_LEVEL, &mut self.rng);
            self.spawn(asteroid);
        }

        crate::engine_info!("asteroids::World",
            "World reset ({:?}): {} asteroids", mode, self.desc.initial_asteroids);
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32, controls: ShipControls) -> TickReport {
        self.stats.elapsed += dt;

        let mut ctx = TickContext::new(dt, controls, self.desc.play_field, &mut self.rng);
        for i in 0..self.order.len() {
            let key = self.order[i];

            // Bot targets are chosen against the world as it is right now
            let target = match self.entities.get(key) {
                Some(entity) if matches!(entity.kind, EntityKind::BotShip(_)) => {
                    motion::find_bot_target(entity, self.order.iter().filter_map(|&k| {
                        self.entities.get(k).map(|e| (k, e))
                    }))
                }
                _ => None,
            };

            if let Some(entity) = self.entities.get_mut(key) {
                motion::update_entity(entity, target, &mut ctx);
            }
        }

        // Shots fired this tick join the end of the ordering and get their
        // first update now, like any entity the walk reaches
        let fired = std::mem::take(&mut ctx.spawned);
        for mut projectile in fired {
            motion::update_entity(&mut projectile, None, &mut ctx);
            let key = self.entities.insert(projectile);
            self.order.push(key);
        }
        let shots_fired = ctx.shots_fired;

        let asteroids = self.asteroid_count();
        let outcome = if asteroids == 0 { TickOutcome::Victory } else { TickOutcome::Running };

        let collisions = self.resolve_collisions();

        self.stats.shots_fired += shots_fired;

        if outcome == TickOutcome::Victory {
            crate::engine_info!("asteroids::World",
                "Victory after {:.2}s with {} shots", self.stats.elapsed, self.stats.shots_fired);
        }

        TickReport {
            outcome,
            asteroids,
            shots_fired,
            collisions,
        }
    }

    /// Run the collision pass on the current entities.
    pub fn resolve_collisions(&mut self) -> CollisionReport {
        self.collision_pass.run(&mut self.index, &mut self.entities, &mut self.order, &mut self.rng)
    }

    /// Add an entity at the end of the iteration order.
    pub fn spawn(&mut self, entity: Entity) -> EntityKey {
        let key = self.entities.insert(entity);
        self.order.push(key);
        key
    }

    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Entities in iteration order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityKey, &Entity)> + '_ {
        self.order.iter().filter_map(move |&key| self.entities.get(key).map(|e| (key, e)))
    }

    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    /// Number of asteroids, active or not
    pub fn asteroid_count(&self) -> usize {
        self.entities().filter(|(_, e)| e.is_asteroid()).count()
    }

    /// Key of the ship spawned by the last reset
    pub fn ship(&self) -> Option<EntityKey> {
        self.ship
    }

    /// Flight state of the ship.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEntity` if no ship was spawned or its key no
    /// longer resolves to a ship.
    pub fn ship_state(&self) -> Result<Ship> {
        let key = self.ship
            .ok_or_else(|| Error::InvalidEntity("world has no ship, call reset() first".to_string()))?;
        self.entities.get(key)
            .and_then(|entity| entity.as_ship().copied())
            .ok_or_else(|| Error::InvalidEntity(format!("ship key {:?} is stale", key)))
    }

    /// Regions of the quadtree built by the last collision pass.
    pub fn index_bounds(&self) -> Sequence<BoundingBox> {
        let mut bounds = Sequence::new();
        self.index.enumerate_bounds(&mut bounds);
        bounds
    }

    /// Quadtree built by the last collision pass
    pub fn index(&self) -> &Quadtree<EntityKey> {
        &self.index
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn desc(&self) -> &WorldDesc {
        &self.desc
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;
