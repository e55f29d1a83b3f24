//! Ancestor traversal over commits in an object store.
//!
//! A walk starts at one commit, records it, and repeatedly expands a node
//! from the frontier: each parent (first, then second) not yet seen is
//! recorded and pushed onto the frontier. Every node is expanded once.
//!
//! The resulting *set* does not depend on how the frontier is drained, but
//! the recorded discovery order does. [`TraversalOrder`] selects between a
//! FIFO queue (true breadth-first order) and a min-queue keyed by commit id.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use sprig_store::ObjectStore;
use sprig_types::ObjectId;
use tracing::debug;

use crate::error::DagResult;

/// How the walker drains its frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// First discovered, first expanded. Discovery order tracks graph
    /// distance from the start commit.
    #[default]
    BreadthFirst,
    /// Always expand the smallest id in the frontier. Ids are content
    /// hashes, so this order is unrelated to graph distance; it exists for
    /// compatibility with repositories whose merge history was produced
    /// under it.
    Lexicographic,
}

enum Frontier {
    Fifo(VecDeque<ObjectId>),
    Ordered(BinaryHeap<Reverse<ObjectId>>),
}

impl Frontier {
    fn new(order: TraversalOrder) -> Self {
        match order {
            TraversalOrder::BreadthFirst => Self::Fifo(VecDeque::new()),
            TraversalOrder::Lexicographic => Self::Ordered(BinaryHeap::new()),
        }
    }

    fn push(&mut self, id: ObjectId) {
        match self {
            Self::Fifo(queue) => queue.push_back(id),
            Self::Ordered(heap) => heap.push(Reverse(id)),
        }
    }

    fn pop(&mut self) -> Option<ObjectId> {
        match self {
            Self::Fifo(queue) => queue.pop_front(),
            Self::Ordered(heap) => heap.pop().map(|Reverse(id)| id),
        }
    }
}

/// All commits reachable from a start commit, start included, in the order
/// they were discovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AncestorSet {
    order: Vec<ObjectId>,
    members: HashSet<ObjectId>,
}

impl AncestorSet {
    fn seeded(start: ObjectId) -> Self {
        Self {
            order: vec![start],
            members: HashSet::from([start]),
        }
    }

    /// Record `id`. Returns `false` if it was already present.
    fn insert(&mut self, id: ObjectId) -> bool {
        if self.members.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    /// The commit the walk started from.
    pub fn start(&self) -> ObjectId {
        self.order[0]
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.members.contains(id)
    }

    /// Ancestors in discovery order, starting with the start commit.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`: a set contains at least its start commit.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The first member in discovery order that is also in `other`, with
    /// its position (0 for the start commit).
    pub fn first_shared_with(&self, other: &AncestorSet) -> Option<(ObjectId, usize)> {
        self.order
            .iter()
            .enumerate()
            .find(|(_, id)| other.contains(id))
            .map(|(steps, id)| (*id, steps))
    }
}

/// Computes ancestor sets by reading commits from an [`ObjectStore`].
pub struct AncestorWalker<'a> {
    store: &'a dyn ObjectStore,
    order: TraversalOrder,
}

impl<'a> AncestorWalker<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self {
            store,
            order: TraversalOrder::default(),
        }
    }

    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// Every commit reachable from `start` through first and second parent
    /// edges, `start` included.
    ///
    /// A commit that cannot be read from the store is
    /// [`DagError::CommitNotFound`](crate::DagError::CommitNotFound).
    pub fn ancestors(&self, start: &ObjectId) -> DagResult<AncestorSet> {
        let mut result = AncestorSet::seeded(*start);
        let mut frontier = Frontier::new(self.order);
        frontier.push(*start);

        while let Some(current) = frontier.pop() {
            let commit = self.store.get_commit(&current)?;
            for parent in commit.parents() {
                if result.insert(parent) {
                    frontier.push(parent);
                }
            }
        }

        debug!(
            start = %start.short_hex(),
            order = ?self.order,
            count = result.len(),
            "collected ancestors"
        );
        Ok(result)
    }
}
