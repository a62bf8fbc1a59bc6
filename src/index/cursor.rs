//! Range iterators over an `OrderedMultiMap`
//!
//! A `RangeIterator` is either `Valid(node, chain position)` or `Invalid`.
//! Invalid is terminal: no step can make it valid again.
//!
//! Direction is part of the type. Iterators from `find_equal` and
//! `find_equal_or_successor` are `Ascending` and only move forward;
//! iterators from `find_equal_or_predecessor` are `Descending` and only move
//! backward. Driving one iterator in both directions cannot be expressed.

use std::fmt;
use std::marker::PhantomData;

use super::multimap::{OrderedMultiMap, Position, RecordId};

mod sealed {
    pub trait Sealed {}
}

/// Traversal direction of a `RangeIterator`
pub trait Direction: sealed::Sealed {
    /// Name used in plan output
    const NAME: &'static str;

    #[doc(hidden)]
    fn step(map: &OrderedMultiMap, pos: Position) -> Option<Position>;
}

/// In-order traversal: chain head to tail, then the successor key
#[derive(Debug, Clone, Copy)]
pub enum Ascending {}

/// Reverse traversal: chain tail to head, then the predecessor key
#[derive(Debug, Clone, Copy)]
pub enum Descending {}

impl sealed::Sealed for Ascending {}
impl sealed::Sealed for Descending {}

impl Direction for Ascending {
    const NAME: &'static str = "asc";

    fn step(map: &OrderedMultiMap, pos: Position) -> Option<Position> {
        map.step_forward(pos)
    }
}

impl Direction for Descending {
    const NAME: &'static str = "desc";

    fn step(map: &OrderedMultiMap, pos: Position) -> Option<Position> {
        map.step_backward(pos)
    }
}

/// Cursor over one `OrderedMultiMap`.
///
/// Borrows the map, so the map cannot be mutated while a cursor is alive.
pub struct RangeIterator<'a, D: Direction> {
    map: &'a OrderedMultiMap,
    position: Option<Position>,
    _direction: PhantomData<D>,
}

impl<'a, D: Direction> RangeIterator<'a, D> {
    pub(crate) fn new(map: &'a OrderedMultiMap, position: Option<Position>) -> Self {
        Self {
            map,
            position,
            _direction: PhantomData,
        }
    }

    pub(crate) fn invalid(map: &'a OrderedMultiMap) -> Self {
        Self::new(map, None)
    }

    pub(crate) fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns true while the iterator points at an entry
    pub fn is_valid(&self) -> bool {
        self.position.is_some()
    }

    /// Key of the current node
    pub fn key(&self) -> Option<&'a str> {
        let map = self.map;
        self.position.map(|pos| map.key_at(pos))
    }

    /// Record id at the current chain position
    pub fn value(&self) -> Option<RecordId> {
        self.position.map(|pos| self.map.value_at(pos))
    }

    /// Moves one entry in this iterator's direction.
    ///
    /// Returns false, and becomes invalid, once the traversal runs off the
    /// end of the map. Always false on an invalid iterator.
    pub fn advance(&mut self) -> bool {
        self.position = match self.position {
            Some(pos) => D::step(self.map, pos),
            None => None,
        };
        self.position.is_some()
    }

    /// Consumes the cursor into an iterator of `(key, id)` pairs starting at
    /// the current position.
    pub fn entries(self) -> Entries<'a, D> {
        Entries { cursor: self }
    }
}

impl<D: Direction> Clone for RangeIterator<'_, D> {
    fn clone(&self) -> Self {
        Self::new(self.map, self.position)
    }
}

impl<D: Direction> fmt::Debug for RangeIterator<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeIterator")
            .field("direction", &D::NAME)
            .field("key", &self.key())
            .field("value", &self.value())
            .finish()
    }
}

/// Iterator adapter yielding the current entry, then advancing
pub struct Entries<'a, D: Direction> {
    cursor: RangeIterator<'a, D>,
}

impl<'a, D: Direction> Iterator for Entries<'a, D> {
    type Item = (&'a str, RecordId);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.cursor.key().zip(self.cursor.value())?;
        self.cursor.advance();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderedMultiMap {
        let mut map = OrderedMultiMap::new();
        for (id, key) in ["d", "b", "f", "b", "a", "c", "e", "g", "d"].iter().enumerate() {
            map.insert(*key, id);
        }
        map
    }

    #[test]
    fn test_forward_walk_visits_chains_in_order() {
        let map = sample();
        let walked: Vec<(&str, RecordId)> = map.find_equal_or_successor("a").entries().collect();
        assert_eq!(
            walked,
            vec![
                ("a", 4),
                ("b", 1),
                ("b", 3),
                ("c", 5),
                ("d", 0),
                ("d", 8),
                ("e", 6),
                ("f", 2),
                ("g", 7),
            ]
        );
    }

    #[test]
    fn test_backward_walk_visits_chains_in_reverse() {
        let map = sample();
        let walked: Vec<(&str, RecordId)> = map.find_equal_or_predecessor("z").entries().collect();
        assert_eq!(
            walked,
            vec![
                ("g", 7),
                ("f", 2),
                ("e", 6),
                ("d", 8),
                ("d", 0),
                ("c", 5),
                ("b", 3),
                ("b", 1),
                ("a", 4),
            ]
        );
    }

    #[test]
    fn test_invalid_is_terminal() {
        let map = sample();
        let mut it = map.find_equal("g");
        assert!(it.is_valid());
        assert!(!it.advance());
        assert!(!it.is_valid());
        assert_eq!(it.key(), None);
        assert_eq!(it.value(), None);
        assert!(!it.advance());
        assert!(!it.is_valid());
    }

    #[test]
    fn test_chain_then_successor() {
        let map = sample();
        let mut it = map.find_equal("b");
        assert_eq!(it.value(), Some(1));
        assert!(it.advance());
        assert_eq!(it.value(), Some(3));
        assert!(it.advance());
        assert_eq!(it.key(), Some("c"));
    }

    #[test]
    fn test_clone_keeps_position() {
        let map = sample();
        let mut it = map.find_equal("d");
        let snapshot = it.clone();
        it.advance();
        assert_eq!(snapshot.value(), Some(0));
        assert_eq!(it.value(), Some(8));
    }
}
