/// Quadtree - dynamic region quadtree rebuilt every frame.
///
/// Each object is stored in exactly one node: the deepest node whose
/// quadrant fully contains it at insertion time. An object that sits on or
/// across a node's midline stays in that node.
///
/// Unlike a static tree, nodes are created on demand: a leaf splits when it
/// holds more than `max_objects` and its level is below `max_levels`.
/// All nodes live in one flat arena; the four children of a node are
/// contiguous and referenced by the index of the first one. Clearing
/// truncates the arena back to the root, so the whole tree is torn down
/// without recursion and its storage is reused on the next frame.

use crate::utils::Sequence;
use super::bounding_box::BoundingBox;
use super::spatial_index::SpatialIndex;

/// Index of the root node in the flat node array.
const ROOT: usize = 0;

/// One of the four children of a split node.
///
/// The discriminant is the child's offset from the node's first child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Right half, top half
    NorthEast = 0,
    /// Left half, top half
    NorthWest = 1,
    /// Left half, bottom half
    SouthWest = 2,
    /// Right half, bottom half
    SouthEast = 3,
}

impl Quadrant {
    /// All quadrants in child order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::NorthWest,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Offset of this quadrant's child from the first child
    pub fn index(self) -> usize {
        self as usize
    }

    /// Region of this quadrant inside `parent`
    pub fn region(self, parent: &BoundingBox) -> BoundingBox {
        let half_w = parent.width / 2.0;
        let half_h = parent.height / 2.0;
        let (x, y) = match self {
            Quadrant::NorthEast => (parent.x + half_w, parent.y),
            Quadrant::NorthWest => (parent.x, parent.y),
            Quadrant::SouthWest => (parent.x, parent.y + half_h),
            Quadrant::SouthEast => (parent.x + half_w, parent.y + half_h),
        };
        BoundingBox::new(x, y, half_w, half_h)
    }
}

/// Determine which quadrant of `node` fully holds `object`.
///
/// Returns `None` when the object touches or crosses either midline.
/// All comparisons are strict: an edge lying exactly on a midline counts as
/// straddling. This tie-break decides which objects stay at a node level
/// and must not be relaxed.
pub fn classify_quadrant(node: &BoundingBox, object: &BoundingBox) -> Option<Quadrant> {
    let v_mid = node.x + node.width / 2.0;
    let h_mid = node.y + node.height / 2.0;

    let top = object.y < h_mid && object.bottom() < h_mid;
    let bottom = object.y > h_mid;

    if object.x < v_mid && object.right() < v_mid {
        if top {
            Some(Quadrant::NorthWest)
        } else if bottom {
            Some(Quadrant::SouthWest)
        } else {
            None
        }
    } else if object.x > v_mid {
        if top {
            Some(Quadrant::NorthEast)
        } else if bottom {
            Some(Quadrant::SouthEast)
        } else {
            None
        }
    } else {
        None
    }
}

/// Subdivision limits for a quadtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadtreeDesc {
    /// Objects a node holds before it tries to split
    pub max_objects: usize,
    /// Deepest level a split may create (root = 0)
    pub max_levels: u32,
}

impl QuadtreeDesc {
    /// Default objects-per-node threshold
    pub const DEFAULT_MAX_OBJECTS: usize = 4;
    /// Default maximum depth
    pub const DEFAULT_MAX_LEVELS: u32 = 5;
}

impl Default for QuadtreeDesc {
    fn default() -> Self {
        Self {
            max_objects: Self::DEFAULT_MAX_OBJECTS,
            max_levels: Self::DEFAULT_MAX_LEVELS,
        }
    }
}

/// An object reference held by a node: its key and the bounds it had
/// when inserted.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QuadEntry<K> {
    /// Caller-side handle
    key: K,
    /// Bounds captured at insertion
    bounds: BoundingBox,
}

/// A single node in the quadtree.
#[derive(Debug, Clone)]
struct QuadNode<K> {
    /// Depth of this node (root = 0)
    level: u32,
    /// Region covered by this node
    bounds: BoundingBox,
    /// Index of the first of four contiguous children (None = leaf)
    first_child: Option<usize>,
    /// Objects that straddle a midline, or arrived before the split
    objects: Sequence<QuadEntry<K>>,
}

impl<K> QuadNode<K> {
    fn new(level: u32, bounds: BoundingBox) -> Self {
        Self {
            level,
            bounds,
            first_child: None,
            objects: Sequence::new(),
        }
    }
}

/// Dynamic quadtree spatial index.
///
/// Constructed with the play-field bounds. Objects outside the bounds are
/// still accepted: classification only looks at the midlines, so they sink
/// toward the nearest border node and remain retrievable.
#[derive(Debug, Clone)]
pub struct Quadtree<K> {
    /// Flat array of nodes, root first
    nodes: Vec<QuadNode<K>>,
    /// Split threshold and depth ceiling
    desc: QuadtreeDesc,
    /// Total number of stored objects
    len: usize,
}

impl<K: Copy> Quadtree<K> {
    /// Create an empty quadtree over `bounds` with the default limits.
    pub fn new(bounds: BoundingBox) -> Self {
        Self::with_desc(bounds, QuadtreeDesc::default())
    }

    /// Create an empty quadtree over `bounds` with custom limits.
    pub fn with_desc(bounds: BoundingBox, desc: QuadtreeDesc) -> Self {
        Self {
            nodes: vec![QuadNode::new(0, bounds)],
            desc,
            len: 0,
        }
    }

    /// Region covered by the root node
    pub fn bounds(&self) -> BoundingBox {
        self.nodes[ROOT].bounds
    }

    /// Subdivision limits
    pub fn desc(&self) -> QuadtreeDesc {
        self.desc
    }

    /// Number of live nodes (root included)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest level currently present (0 = root only)
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|node| node.level).max().unwrap_or(0)
    }

    /// Whether the root has been split
    pub fn is_split(&self) -> bool {
        self.nodes[ROOT].first_child.is_some()
    }

    /// Create the four children of a leaf. Returns the first child index.
    ///
    /// Objects already held by the node are left in place; re-homing them
    /// is the caller's job.
    fn split(&mut self, node_idx: usize) -> usize {
        debug_assert!(self.nodes[node_idx].first_child.is_none(), "splitting a split node");

        let level = self.nodes[node_idx].level + 1;
        let parent = self.nodes[node_idx].bounds;
        let first_child = self.nodes.len();

        for quadrant in Quadrant::ALL {
            self.nodes.push(QuadNode::new(level, quadrant.region(&parent)));
        }

        self.nodes[node_idx].first_child = Some(first_child);
        first_child
    }

    /// Insert an entry starting at `node_idx`.
    ///
    /// Descends while the entry fits a child, appends it to the node where
    /// it stops, then splits and re-homes if the node overflowed.
    fn insert_at(&mut self, mut node_idx: usize, entry: QuadEntry<K>) {
        while let Some(first_child) = self.nodes[node_idx].first_child {
            match classify_quadrant(&self.nodes[node_idx].bounds, &entry.bounds) {
                Some(quadrant) => node_idx = first_child + quadrant.index(),
                None => break,
            }
        }

        self.nodes[node_idx].objects.push(entry);

        let node = &self.nodes[node_idx];
        if node.objects.len() <= self.desc.max_objects || node.level >= self.desc.max_levels {
            return;
        }

        let existing_children = node.first_child;
        let first_child = match existing_children {
            Some(first_child) => first_child,
            None => self.split(node_idx),
        };

        // Re-home everything that now fits a child. Erasing shifts the
        // tail left, so the cursor only advances past entries that stay.
        let mut i = 0;
        while i < self.nodes[node_idx].objects.len() {
            let candidate = self.nodes[node_idx].objects[i];
            match classify_quadrant(&self.nodes[node_idx].bounds, &candidate.bounds) {
                Some(quadrant) => {
                    self.nodes[node_idx].objects.erase(i);
                    self.insert_at(first_child + quadrant.index(), candidate);
                }
                None => i += 1,
            }
        }
    }

    /// Collect candidates for `query` starting at `node_idx`.
    fn retrieve_at(&self, node_idx: usize, results: &mut Sequence<K>, query: &BoundingBox) {
        let node = &self.nodes[node_idx];
        let quadrant = classify_quadrant(&node.bounds, query);

        if let (Some(quadrant), Some(first_child)) = (quadrant, node.first_child) {
            self.retrieve_at(first_child + quadrant.index(), results, query);
        }

        // Local objects span this node's midlines: every query sees them
        results.extend(node.objects.iter().map(|entry| entry.key));

        if let (None, Some(first_child)) = (quadrant, node.first_child) {
            for quadrant in Quadrant::ALL {
                self.retrieve_at(first_child + quadrant.index(), results, query);
            }
        }
    }
}

// ===== SPATIAL INDEX TRAIT =====

impl<K: Copy> SpatialIndex<K> for Quadtree<K> {
    fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[ROOT];
        root.objects.clear();
        root.first_child = None;
        self.len = 0;
    }

    fn insert(&mut self, key: K, bounds: BoundingBox) {
        self.insert_at(ROOT, QuadEntry { key, bounds });
        self.len += 1;
    }

    fn retrieve(&self, results: &mut Sequence<K>, query: &BoundingBox) {
        self.retrieve_at(ROOT, results, query);
    }

    fn enumerate_bounds(&self, results: &mut Sequence<BoundingBox>) {
        // Pre-order with an explicit stack; children pushed in reverse so
        // they come out NE, NW, SW, SE.
        let mut stack = vec![ROOT];
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            results.push(node.bounds);
            if let Some(first_child) = node.first_child {
                for quadrant in Quadrant::ALL.iter().rev() {
                    stack.push(first_child + quadrant.index());
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
#[path = "quadtree_tests.rs"]
mod tests;
