//! Ordered multi-valued index
//!
//! An unbalanced binary search tree keyed on column values. Every node owns
//! an insertion-ordered, doubly-linked chain of record ids sharing its key.
//!
//! Nodes and chain entries live in two arenas and refer to each other by
//! index, so parent back-references cost nothing in ownership terms and
//! ascent during iteration stays O(1) per step.
//!
//! # Invariants
//!
//! - Left subtree keys < node key < right subtree keys
//! - Keys are unique per node; equal-key inserts append to the chain tail
//! - A chain's head is the first inserted id, its tail the most recent
//! - Nothing is removed except by `clear`

use super::cursor::{Ascending, Descending, RangeIterator};

/// Ordinal position of a row in insertion order
pub type RecordId = usize;

/// Arena index of a tree node
pub(crate) type NodeId = usize;

/// Arena index of a chain entry
pub(crate) type EntryId = usize;

/// A single tree node
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) key: String,
    pub(crate) head: EntryId,
    pub(crate) tail: EntryId,
    pub(crate) len: usize,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

/// A single duplicate-chain link
#[derive(Debug, Clone)]
pub(crate) struct ChainEntry {
    pub(crate) id: RecordId,
    pub(crate) prev: Option<EntryId>,
    pub(crate) next: Option<EntryId>,
}

/// Cursor location inside the map: a node and one of its chain entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub(crate) node: NodeId,
    pub(crate) entry: EntryId,
}

/// Key-ordered tree mapping a string key to an insertion-ordered chain of
/// record ids.
///
/// `Clone` is a full structural copy: both arenas are duplicated, so the
/// clone shares no node or chain entry with the original.
#[derive(Debug, Clone, Default)]
pub struct OrderedMultiMap {
    nodes: Vec<Node>,
    entries: Vec<ChainEntry>,
    root: Option<NodeId>,
}

impl OrderedMultiMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            entries: Vec::new(),
            root: None,
        }
    }

    /// Inserts `id` under `key`.
    ///
    /// Descends from the root comparing keys lexicographically. An equal key
    /// appends to that node's chain tail; otherwise a new leaf is linked
    /// below the last visited node. O(depth), worst case O(n).
    pub fn insert(&mut self, key: impl Into<String>, id: RecordId) {
        let key = key.into();

        let mut cur = match self.root {
            Some(root) => root,
            None => {
                let node = self.alloc_node(key, id, None);
                self.root = Some(node);
                return;
            }
        };

        loop {
            let ordering = key.as_str().cmp(self.nodes[cur].key.as_str());
            match ordering {
                std::cmp::Ordering::Equal => {
                    self.append_to_chain(cur, id);
                    return;
                }
                std::cmp::Ordering::Less => match self.nodes[cur].left {
                    Some(left) => cur = left,
                    None => {
                        let node = self.alloc_node(key, id, Some(cur));
                        self.nodes[cur].left = Some(node);
                        return;
                    }
                },
                std::cmp::Ordering::Greater => match self.nodes[cur].right {
                    Some(right) => cur = right,
                    None => {
                        let node = self.alloc_node(key, id, Some(cur));
                        self.nodes[cur].right = Some(node);
                        return;
                    }
                },
            }
        }
    }

    /// Returns an iterator on the chain head of `key`, or an invalid
    /// iterator if the key is absent.
    pub fn find_equal(&self, key: &str) -> RangeIterator<'_, Ascending> {
        let mut cur = self.root;
        while let Some(node) = cur {
            let n = &self.nodes[node];
            match key.cmp(n.key.as_str()) {
                std::cmp::Ordering::Equal => return RangeIterator::new(self, Some(self.head_of(node))),
                std::cmp::Ordering::Less => cur = n.left,
                std::cmp::Ordering::Greater => cur = n.right,
            }
        }
        RangeIterator::invalid(self)
    }

    /// Returns an iterator on the chain head of the smallest key `>= key`
    /// (the ceiling), or an invalid iterator if every key is smaller.
    pub fn find_equal_or_successor(&self, key: &str) -> RangeIterator<'_, Ascending> {
        let mut cur = self.root;
        while let Some(node) = cur {
            let n = &self.nodes[node];
            match key.cmp(n.key.as_str()) {
                std::cmp::Ordering::Equal => return RangeIterator::new(self, Some(self.head_of(node))),
                std::cmp::Ordering::Less => {
                    if n.left.is_none() {
                        return RangeIterator::new(self, Some(self.head_of(node)));
                    }
                    cur = n.left;
                }
                std::cmp::Ordering::Greater => {
                    if n.right.is_none() {
                        // The ceiling, if any, is the first ancestor above the probe.
                        let ceiling = self.ascend_until(node, |ancestor| ancestor > key);
                        return RangeIterator::new(self, ceiling.map(|a| self.head_of(a)));
                    }
                    cur = n.right;
                }
            }
        }
        RangeIterator::invalid(self)
    }

    /// Returns an iterator on the chain tail of the largest key `<= key`
    /// (the floor), or an invalid iterator if every key is larger.
    pub fn find_equal_or_predecessor(&self, key: &str) -> RangeIterator<'_, Descending> {
        let mut cur = self.root;
        while let Some(node) = cur {
            let n = &self.nodes[node];
            match key.cmp(n.key.as_str()) {
                std::cmp::Ordering::Equal => return RangeIterator::new(self, Some(self.tail_of(node))),
                std::cmp::Ordering::Less => cur = n.left,
                std::cmp::Ordering::Greater => {
                    let right = match n.right {
                        Some(right) => right,
                        None => return RangeIterator::new(self, Some(self.tail_of(node))),
                    };
                    // Lookahead: if even the smallest key on the right exceeds
                    // the probe, this node is the floor.
                    let smallest_right = self.leftmost(right);
                    if self.nodes[smallest_right].key.as_str() > key {
                        return RangeIterator::new(self, Some(self.tail_of(node)));
                    }
                    cur = Some(right);
                }
            }
        }
        RangeIterator::invalid(self)
    }

    /// Releases every node and chain entry. O(n).
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.entries.clear();
        self.root = None;
    }

    /// Returns true if no key has been inserted
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of distinct keys
    pub fn key_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of record ids across all chains
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the chain length for `key` (0 if absent)
    pub fn chain_len(&self, key: &str) -> usize {
        self.find_equal(key)
            .position()
            .map(|pos| self.nodes[pos.node].len)
            .unwrap_or(0)
    }

    /// Returns all keys in ascending order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        let mut cur = self.root.map(|root| self.leftmost(root));
        while let Some(node) = cur {
            keys.push(self.nodes[node].key.as_str());
            cur = self.successor_node(node);
        }
        keys
    }

    /// Returns the depth of the tree (0 when empty)
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let n = &self.nodes[node];
            if let Some(left) = n.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = n.right {
                stack.push((right, depth + 1));
            }
        }
        max_depth
    }

    // ------------------------------------------------------------------
    // Cursor support
    // ------------------------------------------------------------------

    pub(crate) fn key_at(&self, pos: Position) -> &str {
        &self.nodes[pos.node].key
    }

    pub(crate) fn value_at(&self, pos: Position) -> RecordId {
        self.entries[pos.entry].id
    }

    /// Ascending step: next chain entry, else the in-order successor's head.
    pub(crate) fn step_forward(&self, pos: Position) -> Option<Position> {
        if let Some(next) = self.entries[pos.entry].next {
            return Some(Position {
                node: pos.node,
                entry: next,
            });
        }
        self.successor_node(pos.node).map(|node| self.head_of(node))
    }

    /// Descending step: previous chain entry, else the in-order
    /// predecessor's tail.
    pub(crate) fn step_backward(&self, pos: Position) -> Option<Position> {
        if let Some(prev) = self.entries[pos.entry].prev {
            return Some(Position {
                node: pos.node,
                entry: prev,
            });
        }
        self.predecessor_node(pos.node).map(|node| self.tail_of(node))
    }

    // ------------------------------------------------------------------
    // Tree helpers
    // ------------------------------------------------------------------

    fn alloc_node(&mut self, key: String, id: RecordId, parent: Option<NodeId>) -> NodeId {
        let entry = self.entries.len();
        self.entries.push(ChainEntry {
            id,
            prev: None,
            next: None,
        });

        let node = self.nodes.len();
        self.nodes.push(Node {
            key,
            head: entry,
            tail: entry,
            len: 1,
            left: None,
            right: None,
            parent,
        });
        node
    }

    fn append_to_chain(&mut self, node: NodeId, id: RecordId) {
        let tail = self.nodes[node].tail;
        let entry = self.entries.len();
        self.entries.push(ChainEntry {
            id,
            prev: Some(tail),
            next: None,
        });
        self.entries[tail].next = Some(entry);

        let n = &mut self.nodes[node];
        n.tail = entry;
        n.len += 1;
    }

    fn head_of(&self, node: NodeId) -> Position {
        Position {
            node,
            entry: self.nodes[node].head,
        }
    }

    fn tail_of(&self, node: NodeId) -> Position {
        Position {
            node,
            entry: self.nodes[node].tail,
        }
    }

    fn leftmost(&self, mut node: NodeId) -> NodeId {
        while let Some(left) = self.nodes[node].left {
            node = left;
        }
        node
    }

    fn rightmost(&self, mut node: NodeId) -> NodeId {
        while let Some(right) = self.nodes[node].right {
            node = right;
        }
        node
    }

    /// Walks parent links from `node` and returns the first ancestor whose
    /// key satisfies `accept`.
    fn ascend_until(&self, node: NodeId, accept: impl Fn(&str) -> bool) -> Option<NodeId> {
        let mut cur = self.nodes[node].parent;
        while let Some(ancestor) = cur {
            if accept(self.nodes[ancestor].key.as_str()) {
                return Some(ancestor);
            }
            cur = self.nodes[ancestor].parent;
        }
        None
    }

    fn successor_node(&self, node: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes[node].right {
            return Some(self.leftmost(right));
        }
        let key = self.nodes[node].key.as_str();
        self.ascend_until(node, |ancestor| ancestor > key)
    }

    fn predecessor_node(&self, node: NodeId) -> Option<NodeId> {
        if let Some(left) = self.nodes[node].left {
            return Some(self.rightmost(left));
        }
        let key = self.nodes[node].key.as_str();
        self.ascend_until(node, |ancestor| ancestor < key)
    }
}
