//! Spatial partitioning for collision queries
//!
//! Provides the bounding box type, the `SpatialIndex` trait with its
//! quadtree and brute-force implementations, and the `SpatialObject`
//! capability that anything insertable must expose.

mod bounding_box;
mod spatial_index;
mod quadtree;

pub use bounding_box::BoundingBox;
pub use spatial_index::{SpatialIndex, SpatialObject, BruteForceIndex, rebuild_index};
pub use quadtree::{Quadtree, QuadtreeDesc, Quadrant, classify_quadrant};
