use super::*;
use glam::Vec2;
use rand::SeedableRng;
use crate::spatial::{BoundingBox, BruteForceIndex, Quadtree};

const FIELD: BoundingBox = BoundingBox::new(0.0, 0.0, 800.0, 500.0);

struct Fixture {
    entities: SlotMap<EntityKey, Entity>,
    order: Sequence<EntityKey>,
    rng: StdRng,
}

impl Fixture {
    fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Sequence::new(),
            rng: StdRng::seed_from_u64(1234),
        }
    }

    fn spawn(&mut self, entity: Entity) -> EntityKey {
        let key = self.entities.insert(entity);
        self.order.push(key);
        key
    }

    fn run(&mut self, index: &mut dyn SpatialIndex<EntityKey>) -> CollisionReport {
        CollisionPass::new().run(index, &mut self.entities, &mut self.order, &mut self.rng)
    }

    fn asteroids(&self) -> Vec<&Entity> {
        self.order.iter().map(|&k| &self.entities[k]).filter(|e| e.is_asteroid()).collect()
    }
}

// ============================================================================
// Projectile vs breakable
// ============================================================================

#[test]
fn test_large_asteroid_splits_in_two() {
    let mut fx = Fixture::new();
    let shot = fx.spawn(Entity::projectile(Vec2::new(100.0, 100.0), 0.0));
    let rock = fx.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 3, 0.0));
    let mut index = Quadtree::<EntityKey>::new(FIELD);

    let report = fx.run(&mut index);

    assert_eq!(report.hits, 1);
    assert_eq!(report.spawned, 2);
    assert_eq!(report.removed, 2);
    assert!(fx.entities.get(shot).is_none());
    assert!(fx.entities.get(rock).is_none());

    let fragments = fx.asteroids();
    assert_eq!(fragments.len(), 2);
    for fragment in fragments {
        assert_eq!(fragment.position, Vec2::new(90.0, 90.0));
        assert_eq!(fragment.as_asteroid().unwrap().size_level, 2);
        assert!(fragment.active);
    }
    assert_eq!(fx.order.len(), 2);
}

#[test]
fn test_small_asteroid_leaves_nothing() {
    let mut fx = Fixture::new();
    fx.spawn(Entity::projectile(Vec2::new(100.0, 100.0), 0.0));
    fx.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 1, 0.0));
    let mut index = Quadtree::<EntityKey>::new(FIELD);

    let report = fx.run(&mut index);

    assert_eq!(report.hits, 1);
    assert_eq!(report.spawned, 0);
    assert!(fx.entities.is_empty());
    assert!(fx.order.is_empty());
}

#[test]
fn test_touching_edges_do_not_collide() {
    let mut fx = Fixture::new();
    // Projectile right edge at x = 90, asteroid starts at x = 90
    fx.spawn(Entity::projectile(Vec2::new(85.0, 100.0), 0.0));
    fx.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 3, 0.0));
    let mut index = Quadtree::<EntityKey>::new(FIELD);

    let report = fx.run(&mut index);

    assert_eq!(report.hits, 0);
    assert_eq!(fx.entities.len(), 2);
}

#[test]
fn test_asteroid_pairs_ignore_each_other() {
    let mut fx = Fixture::new();
    fx.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 3, 0.0));
    fx.spawn(Entity::asteroid_with_heading(Vec2::new(100.0, 100.0), 3, 0.0));
    fx.spawn(Entity::player_ship(Vec2::new(110.0, 110.0)));
    let mut index = Quadtree::<EntityKey>::new(FIELD);

    let report = fx.run(&mut index);

    assert!(report.pairs_tested > 0);
    assert_eq!(report.hits, 0);
    assert_eq!(fx.entities.len(), 3);
}

#[test]
fn test_projectiles_ignore_ships() {
    let mut fx = Fixture::new();
    fx.spawn(Entity::player_ship(Vec2::new(400.0, 250.0)));
    fx.spawn(Entity::projectile(Vec2::new(400.0, 250.0), 0.0));
    let mut index = Quadtree::<EntityKey>::new(FIELD);

    assert_eq!(fx.run(&mut index).hits, 0);
    assert_eq!(fx.entities.len(), 2);
}

#[test]
fn test_two_projectiles_on_one_asteroid_are_both_spent() {
    let mut fx = Fixture::new();
    fx.spawn(Entity::projectile(Vec2::new(100.0, 100.0), 0.0));
    fx.spawn(Entity::projectile(Vec2::new(110.0, 110.0), 0.0));
    fx.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 3, 0.0));
    let mut index = Quadtree::<EntityKey>::new(FIELD);

    let report = fx.run(&mut index);

    // Each projectile hits the same asteroid, each hit splits it
    assert_eq!(report.hits, 2);
    assert_eq!(report.spawned, 4);
    let projectiles = fx.order.iter().filter(|&&k| fx.entities[k].is_projectile()).count();
    assert_eq!(projectiles, 0);
    assert_eq!(fx.asteroids().len(), 4);
    assert!(fx.asteroids().iter().all(|a| a.as_asteroid().unwrap().size_level == 2));
}

#[test]
fn test_one_projectile_destroys_every_overlapping_asteroid() {
    let mut fx = Fixture::new();
    fx.spawn(Entity::projectile(Vec2::new(100.0, 100.0), 0.0));
    fx.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 1, 0.0));
    fx.spawn(Entity::asteroid_with_heading(Vec2::new(95.0, 95.0), 1, 0.0));
    let mut index = Quadtree::<EntityKey>::new(FIELD);

    let report = fx.run(&mut index);

    assert_eq!(report.hits, 2);
    assert!(fx.asteroids().is_empty());
    assert!(fx.order.is_empty());
}

#[test]
fn test_fragments_not_tested_in_same_pass() {
    let mut fx = Fixture::new();
    // Fragments appear under the spent projectile but are not tested this pass
    fx.spawn(Entity::projectile(Vec2::new(100.0, 100.0), 0.0));
    fx.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 3, 0.0));
    let mut index = Quadtree::<EntityKey>::new(FIELD);

    let report = fx.run(&mut index);

    assert_eq!(report.spawned, 2);
    assert!(fx.asteroids().iter().all(|a| a.active));
}

// ============================================================================
// Inactive handling
// ============================================================================

#[test]
fn test_inactive_entities_are_swept_without_colliding() {
    let mut fx = Fixture::new();
    let mut expired = Entity::projectile(Vec2::new(100.0, 100.0), 0.0);
    expired.active = false;
    fx.spawn(expired);
    let rock = fx.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 3, 0.0));
    let mut index = Quadtree::<EntityKey>::new(FIELD);

    let report = fx.run(&mut index);

    assert_eq!(report.indexed, 1);
    assert_eq!(report.hits, 0);
    assert_eq!(report.removed, 1);
    assert_eq!(fx.order.as_slice(), &[rock]);
}

#[test]
fn test_sweep_keeps_survivor_order() {
    let mut fx = Fixture::new();
    let keys: Vec<EntityKey> = (0..6)
        .map(|i| fx.spawn(Entity::asteroid_with_heading(Vec2::new(i as f32 * 100.0, 0.0), 1, 0.0)))
        .collect();
    for &k in &[keys[0], keys[3], keys[5]] {
        fx.entities[k].active = false;
    }

    let removed = sweep_inactive(&mut fx.entities, &mut fx.order);

    assert_eq!(removed, 3);
    assert_eq!(fx.order.as_slice(), &[keys[1], keys[2], keys[4]]);
    assert_eq!(fx.entities.len(), 3);
}

// ============================================================================
// Index independence
// ============================================================================

#[test]
fn test_brute_force_index_gives_same_outcome() {
    let build = |fx: &mut Fixture| {
        fx.spawn(Entity::projectile(Vec2::new(100.0, 100.0), 0.0));
        fx.spawn(Entity::asteroid_with_heading(Vec2::new(90.0, 90.0), 3, 0.0));
        fx.spawn(Entity::projectile(Vec2::new(600.0, 400.0), 0.0));
        fx.spawn(Entity::asteroid_with_heading(Vec2::new(580.0, 380.0), 2, 0.0));
        fx.spawn(Entity::asteroid_with_heading(Vec2::new(300.0, 300.0), 1, 0.0));
    };

    let mut quad = Fixture::new();
    build(&mut quad);
    let quad_report = quad.run(&mut Quadtree::<EntityKey>::new(FIELD));

    let mut brute = Fixture::new();
    build(&mut brute);
    let brute_report = brute.run(&mut BruteForceIndex::<EntityKey>::new(FIELD));

    assert_eq!(quad_report.hits, 2);
    assert_eq!(quad_report.hits, brute_report.hits);
    assert_eq!(quad_report.spawned, brute_report.spawned);
    assert_eq!(quad.entities.len(), brute.entities.len());
    assert!(quad_report.pairs_tested <= brute_report.pairs_tested);
}
