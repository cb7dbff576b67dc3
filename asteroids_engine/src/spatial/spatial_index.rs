/// Spatial acceleration structures for collision queries.
///
/// A SpatialIndex maps object keys to the bounding box they had when
/// inserted, and answers "what could this box touch?" with a candidate
/// set. Candidates are an over-approximation: callers re-check every pair
/// with `BoundingBox::intersects`.
///
/// Ownership: the index stores keys, never objects. It is rebuilt every
/// frame from the entity arena, so a key it returns is always one that was
/// live when the frame started.

use crate::utils::Sequence;
use super::bounding_box::BoundingBox;

/// Capability required from anything inserted into a spatial index.
pub trait SpatialObject {
    /// Current world-space bounding box
    fn bounds(&self) -> BoundingBox;

    /// Inactive objects are skipped when the index is rebuilt
    fn is_active(&self) -> bool;
}

/// Trait for spatial indexing of keyed objects.
///
/// Used by the collision pass (candidate queries) and by debug overlays
/// (region enumeration). The caller owns the index and passes it in.
pub trait SpatialIndex<K: Copy> {
    /// Remove every object and every subdivision.
    fn clear(&mut self);

    /// Insert an object with its bounding box.
    fn insert(&mut self, key: K, bounds: BoundingBox);

    /// Append every object that may intersect `query` to `results`.
    ///
    /// Never misses a true intersection; may return extra candidates,
    /// including the queried object itself.
    fn retrieve(&self, results: &mut Sequence<K>, query: &BoundingBox);

    /// Append the region of every node (debug/visualization).
    fn enumerate_bounds(&self, results: &mut Sequence<BoundingBox>);

    /// Number of objects currently stored.
    fn len(&self) -> usize;

    /// Whether no object is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clear `index` and insert every active object.
///
/// Returns the number of inserted objects.
pub fn rebuild_index<'a, K, T, I>(index: &mut dyn SpatialIndex<K>, objects: I) -> usize
where
    K: Copy,
    T: SpatialObject + 'a,
    I: IntoIterator<Item = (K, &'a T)>,
{
    index.clear();
    let mut inserted = 0;
    for (key, object) in objects {
        if object.is_active() {
            index.insert(key, object.bounds());
            inserted += 1;
        }
    }
    inserted
}

/// Brute-force index - every query returns every object.
///
/// The O(n²) baseline. Suitable for tiny worlds and as the reference the
/// quadtree is compared against in tests.
#[derive(Debug, Clone)]
pub struct BruteForceIndex<K> {
    bounds: BoundingBox,
    keys: Sequence<K>,
}

impl<K: Copy> BruteForceIndex<K> {
    /// Create an empty index covering `bounds` (reported by `enumerate_bounds`).
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            keys: Sequence::new(),
        }
    }
}

impl<K: Copy> SpatialIndex<K> for BruteForceIndex<K> {
    fn clear(&mut self) {
        self.keys.clear();
    }

    fn insert(&mut self, key: K, _bounds: BoundingBox) {
        self.keys.push(key);
    }

    fn retrieve(&self, results: &mut Sequence<K>, _query: &BoundingBox) {
        results.extend(self.keys.iter().copied());
    }

    fn enumerate_bounds(&self, results: &mut Sequence<BoundingBox>) {
        results.push(self.bounds);
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}
