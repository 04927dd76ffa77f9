//! Pending-work containers for the three search disciplines.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use mazestep_core::Cell;

use crate::error::SearchError;

/// How a [`Frontier`] orders its entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// First in, first out (breadth-first).
    Fifo,
    /// Last in, first out (depth-first).
    Lifo,
    /// Smallest priority first, ties broken by cell order.
    Priority,
}

/// A popped frontier entry. `priority` is `None` for FIFO/LIFO frontiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub cell: Cell,
    pub priority: Option<i32>,
}

/// Heap element, ordered so `BinaryHeap` (a max-heap) pops the smallest
/// `(priority, cell)` first.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Ranked {
    priority: i32,
    cell: Cell,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug)]
enum Queue {
    Fifo(VecDeque<Cell>),
    Lifo(Vec<Cell>),
    Priority(BinaryHeap<Ranked>),
}

/// Discovered-but-not-yet-expanded cells.
///
/// The priority variant keeps superseded entries for a cell until they are
/// popped; deciding whether a popped entry is stale is up to the caller.
#[derive(Clone, Debug)]
pub struct Frontier {
    queue: Queue,
}

impl Frontier {
    /// An empty frontier of the given discipline.
    pub fn new(discipline: Discipline) -> Self {
        let queue = match discipline {
            Discipline::Fifo => Queue::Fifo(VecDeque::new()),
            Discipline::Lifo => Queue::Lifo(Vec::new()),
            Discipline::Priority => Queue::Priority(BinaryHeap::new()),
        };
        Self { queue }
    }

    pub fn discipline(&self) -> Discipline {
        match self.queue {
            Queue::Fifo(_) => Discipline::Fifo,
            Queue::Lifo(_) => Discipline::Lifo,
            Queue::Priority(_) => Discipline::Priority,
        }
    }

    /// Add `cell`. `priority` is only meaningful for the priority variant,
    /// where a missing priority counts as 0.
    pub fn push(&mut self, cell: Cell, priority: Option<i32>) {
        match &mut self.queue {
            Queue::Fifo(q) => q.push_back(cell),
            Queue::Lifo(s) => s.push(cell),
            Queue::Priority(h) => h.push(Ranked {
                priority: priority.unwrap_or(0),
                cell,
            }),
        }
    }

    /// Remove the next entry according to the discipline.
    pub fn pop(&mut self) -> Result<Entry, SearchError> {
        let entry = match &mut self.queue {
            Queue::Fifo(q) => q.pop_front().map(|cell| Entry {
                cell,
                priority: None,
            }),
            Queue::Lifo(s) => s.pop().map(|cell| Entry {
                cell,
                priority: None,
            }),
            Queue::Priority(h) => h.pop().map(|r| Entry {
                cell: r.cell,
                priority: Some(r.priority),
            }),
        };
        entry.ok_or(SearchError::EmptyFrontier)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        match &self.queue {
            Queue::Fifo(q) => q.len(),
            Queue::Lifo(s) => s.len(),
            Queue::Priority(h) => h.len(),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.queue {
            Queue::Fifo(q) => q.clear(),
            Queue::Lifo(s) => s.clear(),
            Queue::Priority(h) => h.clear(),
        }
    }
}
