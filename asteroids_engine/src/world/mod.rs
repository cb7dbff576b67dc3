/// World module - entities, kinematics, collision resolution and the
/// per-session simulation state.

mod entity;
mod motion;
mod collision;
mod world;

pub use entity::{
    Entity, EntityKey, EntityKind, CollisionCategory,
    Projectile, Asteroid, Ship, BotShip,
    PROJECTILE_SIZE, PROJECTILE_SPEED, PROJECTILE_LIFETIME, SHIP_SIZE, ASTEROID_MAX_SIZE_LEVEL,
};
pub use motion::{
    ShipControls, TickContext, BotTarget,
    update_entity, find_bot_target, wrap_to_edge, wrap_past_edge, heading_to, angle_difference,
};
pub use collision::{CollisionPass, CollisionReport, sweep_inactive, FRAGMENTS_PER_SPLIT};
pub use world::{World, WorldDesc, GameMode, SessionStats, TickOutcome, TickReport};
