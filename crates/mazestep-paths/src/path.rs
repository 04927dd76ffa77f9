//! Predecessor bookkeeping and path reconstruction.

use mazestep_core::{Bounds, Cell};

use crate::error::SearchError;

/// Child-to-parent links recorded as cells are discovered.
///
/// Stored flat over the grid bounds, one slot per cell.
#[derive(Clone, Debug)]
pub struct PredecessorMap {
    bounds: Bounds,
    parents: Vec<Option<Cell>>,
    len: usize,
}

impl PredecessorMap {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            parents: vec![None; bounds.len()],
            len: 0,
        }
    }

    /// Parent of `child`, if one was recorded.
    #[inline]
    pub fn get(&self, child: Cell) -> Option<Cell> {
        self.bounds.index(child).and_then(|i| self.parents[i])
    }

    /// Record (or overwrite) the parent of `child`. Out-of-bounds children
    /// are ignored.
    pub fn insert(&mut self, child: Cell, parent: Cell) {
        if let Some(i) = self.bounds.index(child) {
            if self.parents[i].replace(parent).is_none() {
                self.len += 1;
            }
        }
    }

    /// Number of cells with a recorded parent.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.parents.fill(None);
        self.len = 0;
    }
}

/// Outcome of walking the predecessor chain back from the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconstruction {
    /// Cells in travel order, both endpoints included when the chain is
    /// intact.
    pub cells: Vec<Cell>,
    /// Set when the walk stopped before reaching the start.
    pub anomaly: Option<SearchError>,
}

impl Reconstruction {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.anomaly.is_none()
    }

    /// Number of cells in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Walk `cell <- parent(cell)` from `end` back to `start` and return the
/// path in `start -> end` order.
///
/// A missing link (or a cycle, detected by walking more links than the map
/// holds) yields the partial path collected so far together with a
/// [`SearchError::BrokenPredecessorChain`].
pub fn reconstruct(preds: &PredecessorMap, start: Cell, end: Cell) -> Reconstruction {
    let mut cells = vec![end];
    let mut cur = end;
    let mut anomaly = None;

    while cur != start {
        if cells.len() > preds.len() {
            anomaly = Some(SearchError::BrokenPredecessorChain { at: cur });
            break;
        }
        match preds.get(cur) {
            Some(parent) => {
                cells.push(parent);
                cur = parent;
            }
            None => {
                anomaly = Some(SearchError::BrokenPredecessorChain { at: cur });
                break;
            }
        }
    }

    if let Some(err) = &anomaly {
        log::warn!("partial path of {} cells: {err}", cells.len());
    }

    cells.reverse();
    Reconstruction { cells, anomaly }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(links: &[((i32, i32), (i32, i32))]) -> PredecessorMap {
        let mut preds = PredecessorMap::new(Bounds::new(4, 4));
        for &(child, parent) in links {
            preds.insert(child.into(), parent.into());
        }
        preds
    }

    #[test]
    fn walks_back_to_start() {
        let preds = chain(&[((0, 1), (0, 0)), ((1, 1), (0, 1)), ((1, 2), (1, 1))]);
        let r = reconstruct(&preds, Cell::new(0, 0), Cell::new(1, 2));
        assert!(r.is_complete());
        assert_eq!(
            r.cells,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(1, 2)
            ]
        );
        assert_eq!(r.len(), 4);
    }

    #[test]
    fn start_equal_to_end_is_a_single_cell() {
        let preds = PredecessorMap::new(Bounds::new(2, 2));
        let r = reconstruct(&preds, Cell::new(1, 1), Cell::new(1, 1));
        assert_eq!(r.cells, vec![Cell::new(1, 1)]);
        assert!(r.is_complete());
    }

    #[test]
    fn broken_chain_returns_partial_path() {
        let preds = chain(&[((2, 2), (2, 1)), ((2, 1), (2, 0))]);
        let r = reconstruct(&preds, Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(r.cells, vec![Cell::new(2, 0), Cell::new(2, 1), Cell::new(2, 2)]);
        assert_eq!(
            r.anomaly,
            Some(SearchError::BrokenPredecessorChain {
                at: Cell::new(2, 0)
            })
        );
    }

    #[test]
    fn cyclic_chain_terminates() {
        let preds = chain(&[((1, 1), (1, 2)), ((1, 2), (1, 1))]);
        let r = reconstruct(&preds, Cell::new(0, 0), Cell::new(1, 1));
        assert!(!r.is_complete());
        assert!(r.len() <= 3);
    }

    #[test]
    fn insert_overwrites_without_double_counting() {
        let mut preds = PredecessorMap::new(Bounds::new(2, 2));
        preds.insert(Cell::new(1, 1), Cell::new(0, 1));
        preds.insert(Cell::new(1, 1), Cell::new(1, 0));
        preds.insert(Cell::new(5, 5), Cell::new(0, 0));
        assert_eq!(preds.len(), 1);
        assert_eq!(preds.get(Cell::new(1, 1)), Some(Cell::new(1, 0)));
        preds.clear();
        assert!(preds.is_empty());
        assert_eq!(preds.get(Cell::new(1, 1)), None);
    }
}
