use std::ops::{Index, IndexMut};

/// Capacity of a freshly created sequence
const INITIAL_CAPACITY: usize = 10;

/// Growable, indexable sequence with doubling growth.
///
/// Used for the entity ordering of a World, quadtree node contents,
/// candidate sets returned by spatial queries, and debug bounds.
///
/// Contract:
/// - `push` is amortized O(1); a full sequence doubles its capacity
/// - `erase` is O(n) and keeps the relative order of the remaining elements
/// - `clear` resets the length only, capacity is kept for the next frame
///
/// Elements are usually keys (`EntityKey`) or plain values. The sequence
/// owns its elements, never the objects those keys refer to.
///
/// # Example
///
/// ```ignore
/// let mut seq = Sequence::new();
/// seq.push(1);
/// seq.push(2);
/// seq.push(3);
/// seq.erase(0);           // [2, 3]
/// assert_eq!(seq[0], 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<T> {
    items: Vec<T>,
}

impl<T> Sequence<T> {
    /// Create an empty sequence with the initial capacity
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create an empty sequence with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// Append an element, doubling the capacity when full
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            let grow_by = self.items.capacity().max(1);
            self.items.reserve_exact(grow_by);
        }
        self.items.push(item);
    }

    /// Remove the element at `index`, shifting the tail left.
    ///
    /// Returns `None` (and does nothing) when `index` is out of range.
    pub fn erase(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }

    /// Reset the length to zero. Capacity is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence holds no element
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements the sequence can hold before growing
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Checked access
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Checked mutable access
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Last element, if any
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Iterate over elements in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// View the elements as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Whether an element equal to `item` is present (linear scan)
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Unchecked-by-contract access: an out-of-range index is a caller bug and panics.
impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Sequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
