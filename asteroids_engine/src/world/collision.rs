/// Collision resolution pass.
///
/// Runs once per tick, after motion:
/// 1. Rebuild the spatial index from every active entity.
/// 2. Walk a snapshot of the entity ordering; for each active entity,
///    retrieve candidates and apply the category rules.
/// 3. Sweep the ordering end-to-start, removing inactive entities from both
///    the ordering and the arena.
///
/// Entities are only flagged during step 2, never removed, so the index and
/// the snapshot stay valid for the whole pass.

use rand::rngs::StdRng;
use slotmap::SlotMap;
use crate::engine_debug;
use crate::spatial::{SpatialIndex, SpatialObject, rebuild_index};
use crate::utils::Sequence;
use super::entity::{Entity, EntityKey, CollisionCategory};

/// Number of fragments a splitting asteroid breaks into
pub const FRAGMENTS_PER_SPLIT: usize = 2;

/// What happened during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Entities inserted into the index
    pub indexed: usize,
    /// Candidate pairs returned by the index (self-pairs excluded)
    pub pairs_tested: usize,
    /// Projectile/breakable hits
    pub hits: usize,
    /// Fragments created by splits
    pub spawned: usize,
    /// Entities removed by the sweep
    pub removed: usize,
}

/// Reusable collision pass.
///
/// Holds scratch buffers so that steady-state ticks do not allocate.
#[derive(Debug, Default)]
pub struct CollisionPass {
    snapshot: Sequence<EntityKey>,
    candidates: Sequence<EntityKey>,
    pending: Vec<Entity>,
}

impl CollisionPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve collisions for every entity in `order`.
    ///
    /// `order` is the World's iteration order. Fragments are appended to it
    /// after all pairs are evaluated; inactive entities are then removed.
    pub fn run(
        &mut self,
        index: &mut dyn SpatialIndex<EntityKey>,
        entities: &mut SlotMap<EntityKey, Entity>,
        order: &mut Sequence<EntityKey>,
        rng: &mut StdRng,
    ) -> CollisionReport {
        let mut report = CollisionReport {
            indexed: rebuild_index(index, order.iter().filter_map(|&key| entities.get(key).map(|e| (key, e)))),
            ..Default::default()
        };

        self.snapshot.clear();
        self.snapshot.extend(order.iter().copied());
        self.pending.clear();

        for i in 0..self.snapshot.len() {
            let key = self.snapshot[i];
            let Some(entity) = entities.get(key) else {
                continue;
            };
            if !entity.active {
                continue;
            }
            let bounds = entity.bounds();
            let category = entity.category;

            self.candidates.clear();
            index.retrieve(&mut self.candidates, &bounds);

            for j in 0..self.candidates.len() {
                let other = self.candidates[j];
                if other == key {
                    continue;
                }
                report.pairs_tested += 1;

                if category.contains(CollisionCategory::PROJECTILE)
                    && Self::projectile_hits_breakable(key, other, entities, &mut self.pending, rng)
                {
                    report.hits += 1;
                }
            }
        }

        report.spawned = self.pending.len();
        for fragment in self.pending.drain(..) {
            order.push(entities.insert(fragment));
        }

        report.removed = sweep_inactive(entities, order);
        report
    }

    /// Projectile vs breakable. Returns true when the pair hit.
    ///
    /// Flags only apply at the sweep, so every overlapping pair counts: one
    /// projectile can break several breakables and a breakable hit twice
    /// splits twice.
    fn projectile_hits_breakable(
        projectile: EntityKey,
        other: EntityKey,
        entities: &mut SlotMap<EntityKey, Entity>,
        pending: &mut Vec<Entity>,
        rng: &mut StdRng,
    ) -> bool {
        let (Some(shot), Some(target)) = (entities.get(projectile), entities.get(other)) else {
            return false;
        };
        if !target.category.contains(CollisionCategory::BREAKABLE) {
            return false;
        }
        if !shot.bounds().intersects(&target.bounds()) {
            return false;
        }

        let position = target.position;
        let split = target.as_asteroid().map(|a| (a.size_level, a.splits()));

        if let Some(shot) = entities.get_mut(projectile) {
            shot.active = false;
        }
        if let Some(target) = entities.get_mut(other) {
            target.active = false;
        }

        match split {
            Some((level, true)) => {
                for _ in 0..FRAGMENTS_PER_SPLIT {
                    pending.push(Entity::asteroid(position, level - 1, rng));
                }
                engine_debug!("asteroids::CollisionPass",
                    "Asteroid (size {}) split at ({:.1}, {:.1})", level, position.x, position.y);
            }
            Some((level, false)) => {
                engine_debug!("asteroids::CollisionPass",
                    "Asteroid (size {}) destroyed at ({:.1}, {:.1})", level, position.x, position.y);
            }
            None => {}
        }

        true
    }
}

/// Remove every inactive entity, walking the ordering end-to-start so
/// erasing never skips an element. Returns the number removed.
pub fn sweep_inactive(entities: &mut SlotMap<EntityKey, Entity>, order: &mut Sequence<EntityKey>) -> usize {
    let mut removed = 0;
    for i in (0..order.len()).rev() {
        let key = order[i];
        let dead = !matches!(entities.get(key), Some(entity) if entity.active);
        if dead {
            order.erase(i);
            entities.remove(key);
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
#[path = "collision_tests.rs"]
mod tests;
