//! Maze grids.
//!
//! [`Grid`] is the live, editable maze. Cloning a `Grid` yields another handle
//! to the **same** storage, so an editor and a renderer can share it.
//! [`GridModel`] is an owned, frozen copy taken with [`Grid::snapshot`]; a
//! search runs against a `GridModel` and never observes later edits.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::geom::{Bounds, BoundsIter, Cell};

// ---------------------------------------------------------------------------
// CellKind / Edit
// ---------------------------------------------------------------------------

/// What occupies a grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Wall,
    #[default]
    Free,
    Start,
    End,
}

impl CellKind {
    /// Character used in the text form of a maze.
    pub const fn to_char(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Free => '.',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    /// Parse a text-form character. Both `.` and space mean free.
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Self::Wall),
            '.' | ' ' => Some(Self::Free),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// A single editor mutation: paint `kind` at (`row`, `col`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edit {
    pub row: i32,
    pub col: i32,
    pub kind: CellKind,
}

impl Edit {
    pub const fn new(row: i32, col: i32, kind: CellKind) -> Self {
        Self { row, col, kind }
    }

    #[inline]
    pub const fn cell(self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing the text form of a maze.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Lines have different widths.
    #[error("maze line {line} has width {found}, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside `# . S E` and space.
    #[error("invalid maze character {ch:?} at {cell}")]
    InvalidChar { ch: char, cell: Cell },
    /// More than one `S` or `E`.
    #[error("duplicate {kind:?} at {cell}")]
    DuplicateEndpoint { kind: CellKind, cell: Cell },
}

// ---------------------------------------------------------------------------
// Shared editable buffer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct GridBuffer {
    bounds: Bounds,
    cells: Vec<CellKind>,
    start: Option<Cell>,
    end: Option<Cell>,
}

impl GridBuffer {
    fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![CellKind::Free; bounds.len()],
            start: None,
            end: None,
        }
    }

    fn put(&mut self, c: Cell, kind: CellKind) {
        if let Some(i) = self.bounds.index(c) {
            self.cells[i] = kind;
        }
    }

    /// Apply an edit following the editor's tool rules. Returns `false` for
    /// out-of-bounds edits.
    fn apply(&mut self, c: Cell, kind: CellKind) -> bool {
        if !self.bounds.contains(c) {
            return false;
        }
        match kind {
            CellKind::Start => {
                if let Some(prev) = self.start.take() {
                    self.put(prev, CellKind::Free);
                }
                if self.end == Some(c) {
                    self.end = None;
                }
                self.start = Some(c);
            }
            CellKind::End => {
                if let Some(prev) = self.end.take() {
                    self.put(prev, CellKind::Free);
                }
                if self.start == Some(c) {
                    self.start = None;
                }
                self.end = Some(c);
            }
            CellKind::Wall | CellKind::Free => {
                if self.start == Some(c) {
                    self.start = None;
                }
                if self.end == Some(c) {
                    self.end = None;
                }
            }
        }
        self.put(c, kind);
        true
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// The live, editable maze backed by shared storage.
///
/// Cloning produces another handle to the same buffer. Edits keep at most one
/// [`CellKind::Start`] and one [`CellKind::End`] on the grid: placing a new
/// endpoint clears the previous one, and overwriting an endpoint unsets it.
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: Rc<RefCell<GridBuffer>>,
}

impl Grid {
    /// Create a `rows` x `cols` grid of free cells with no endpoints.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(GridBuffer::new(Bounds::new(rows, cols)))),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.buffer.borrow().bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds().rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds().cols
    }

    /// Kind at `c`, or `None` outside the grid.
    pub fn get(&self, c: Cell) -> Option<CellKind> {
        let buf = self.buffer.borrow();
        buf.bounds.index(c).map(|i| buf.cells[i])
    }

    /// Paint `kind` at `c`. Returns `false` (and changes nothing) when `c`
    /// is outside the grid.
    pub fn set(&self, c: Cell, kind: CellKind) -> bool {
        self.buffer.borrow_mut().apply(c, kind)
    }

    /// Apply an editor mutation.
    pub fn apply(&self, edit: Edit) -> bool {
        self.set(edit.cell(), edit.kind)
    }

    pub fn start(&self) -> Option<Cell> {
        self.buffer.borrow().start
    }

    pub fn end(&self) -> Option<Cell> {
        self.buffer.borrow().end
    }

    /// Reset every cell to free and unset both endpoints.
    pub fn clear(&self) {
        let mut buf = self.buffer.borrow_mut();
        buf.cells.fill(CellKind::Free);
        buf.start = None;
        buf.end = None;
    }

    /// Take a frozen copy for a search run.
    pub fn snapshot(&self) -> GridModel {
        let buf = self.buffer.borrow();
        GridModel {
            bounds: buf.bounds,
            cells: buf.cells.clone(),
            start: buf.start,
            end: buf.end,
        }
    }
}

impl From<&GridModel> for Grid {
    fn from(model: &GridModel) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(GridBuffer {
                bounds: model.bounds,
                cells: model.cells.clone(),
                start: model.start,
                end: model.end,
            })),
        }
    }
}

// ---------------------------------------------------------------------------
// GridModel
// ---------------------------------------------------------------------------

/// An immutable snapshot of a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    bounds: Bounds,
    cells: Vec<CellKind>,
    start: Option<Cell>,
    end: Option<Cell>,
}

impl GridModel {
    /// An all-free `rows` x `cols` model without endpoints.
    pub fn new(rows: i32, cols: i32) -> Self {
        Grid::new(rows, cols).snapshot()
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds.contains(c)
    }

    /// Kind at `c`, or `None` outside the grid.
    #[inline]
    pub fn cell_kind(&self, c: Cell) -> Option<CellKind> {
        self.bounds.index(c).map(|i| self.cells[i])
    }

    /// True iff `c` is inside the grid and not a wall.
    #[inline]
    pub fn is_walkable(&self, c: Cell) -> bool {
        self.cell_kind(c).is_some_and(CellKind::is_walkable)
    }

    /// In-bounds neighbours of `c`, always in up, down, left, right order.
    pub fn neighbors(&self, c: Cell) -> impl Iterator<Item = Cell> + '_ {
        c.neighbors_4().into_iter().filter(|&n| self.contains(n))
    }

    /// The unique start cell, if placed.
    #[inline]
    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    /// The unique end cell, if placed.
    #[inline]
    pub fn end(&self) -> Option<Cell> {
        self.end
    }

    /// Number of cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Row-major iterator over `(Cell, CellKind)` pairs.
    pub fn iter(&self) -> GridModelIter<'_> {
        GridModelIter {
            model: self,
            inner: self.bounds.iter(),
        }
    }

    /// Parse the text form: one line per row, `#` wall, `.` or space free,
    /// `S` start, `E` end. Empty leading/trailing lines are ignored.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = s
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .skip_while(|l| l.is_empty())
            .collect();
        let lines: Vec<&str> = match lines.iter().rposition(|l| !l.is_empty()) {
            Some(last) => lines[..=last].to_vec(),
            None => Vec::new(),
        };

        let width = lines.first().map_or(0, |l| l.chars().count());
        let mut buf = GridBuffer::new(Bounds::new(lines.len() as i32, width as i32));

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::InconsistentWidth {
                    line: row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::new(row as i32, col as i32);
                let kind = CellKind::from_char(ch).ok_or(ParseError::InvalidChar { ch, cell })?;
                let taken = match kind {
                    CellKind::Start => buf.start.is_some(),
                    CellKind::End => buf.end.is_some(),
                    _ => false,
                };
                if taken {
                    return Err(ParseError::DuplicateEndpoint { kind, cell });
                }
                buf.apply(cell, kind);
            }
        }

        Ok(Self {
            bounds: buf.bounds,
            cells: buf.cells,
            start: buf.start,
            end: buf.end,
        })
    }
}

impl FromStr for GridModel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let kind = self.cell_kind(Cell::new(row, col)).unwrap_or_default();
                write!(f, "{}", kind.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over `(Cell, CellKind)` pairs of a [`GridModel`].
pub struct GridModelIter<'a> {
    model: &'a GridModel,
    inner: BoundsIter,
}

impl Iterator for GridModelIter<'_> {
    type Item = (Cell, CellKind);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.inner.next()?;
        Some((c, self.model.cell_kind(c).unwrap_or_default()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_free() {
        let g = Grid::new(3, 4);
        assert_eq!(g.bounds(), Bounds::new(3, 4));
        assert_eq!(g.get(Cell::new(2, 3)), Some(CellKind::Free));
        assert_eq!(g.get(Cell::new(3, 0)), None);
        assert_eq!(g.start(), None);
    }

    #[test]
    fn placing_start_moves_previous_start() {
        let g = Grid::new(3, 3);
        assert!(g.set(Cell::new(0, 0), CellKind::Start));
        assert!(g.set(Cell::new(1, 1), CellKind::Start));
        assert_eq!(g.get(Cell::new(0, 0)), Some(CellKind::Free));
        assert_eq!(g.get(Cell::new(1, 1)), Some(CellKind::Start));
        assert_eq!(g.start(), Some(Cell::new(1, 1)));
        assert_eq!(g.snapshot().count(CellKind::Start), 1);
    }

    #[test]
    fn wall_over_endpoint_unsets_it() {
        let g = Grid::new(3, 3);
        g.apply(Edit::new(2, 2, CellKind::End));
        g.apply(Edit::new(2, 2, CellKind::Wall));
        assert_eq!(g.end(), None);
        assert_eq!(g.get(Cell::new(2, 2)), Some(CellKind::Wall));
    }

    #[test]
    fn end_over_start_unsets_start() {
        let g = Grid::new(2, 2);
        g.set(Cell::new(0, 0), CellKind::Start);
        g.set(Cell::new(0, 0), CellKind::End);
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), Some(Cell::new(0, 0)));
    }

    #[test]
    fn out_of_bounds_edit_is_rejected() {
        let g = Grid::new(2, 2);
        assert!(!g.set(Cell::new(-1, 0), CellKind::Wall));
        assert!(!g.apply(Edit::new(0, 2, CellKind::Start)));
        assert_eq!(g.start(), None);
    }

    #[test]
    fn clones_share_storage_but_snapshots_do_not() {
        let g = Grid::new(2, 2);
        let view = g.clone();
        let snap = g.snapshot();
        view.set(Cell::new(1, 1), CellKind::Wall);
        assert_eq!(g.get(Cell::new(1, 1)), Some(CellKind::Wall));
        assert!(snap.is_walkable(Cell::new(1, 1)));
    }

    #[test]
    fn clear_resets_everything() {
        let g = Grid::new(2, 2);
        g.set(Cell::new(0, 0), CellKind::Start);
        g.set(Cell::new(0, 1), CellKind::Wall);
        g.clear();
        assert_eq!(g.start(), None);
        assert_eq!(g.snapshot().count(CellKind::Free), 4);
    }

    #[test]
    fn model_queries() {
        let m = GridModel::parse(
            "\
S.#
...
#.E",
        )
        .unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.start(), Some(Cell::new(0, 0)));
        assert_eq!(m.end(), Some(Cell::new(2, 2)));
        assert_eq!(m.cell_kind(Cell::new(0, 2)), Some(CellKind::Wall));
        assert!(!m.is_walkable(Cell::new(0, 2)));
        assert!(m.is_walkable(Cell::new(2, 2)));
        assert!(!m.is_walkable(Cell::new(3, 0)));
        assert_eq!(m.count(CellKind::Wall), 2);
    }

    #[test]
    fn neighbors_are_bounded_and_ordered() {
        let m = GridModel::new(3, 3);
        let corner: Vec<_> = m.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(0, 1)]);
        let center: Vec<_> = m.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2)
            ]
        );
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            GridModel::parse("..\n..."),
            Err(ParseError::InconsistentWidth {
                line: 1,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            GridModel::parse(".x"),
            Err(ParseError::InvalidChar {
                ch: 'x',
                cell: Cell::new(0, 1)
            })
        );
        assert_eq!(
            GridModel::parse("S.S"),
            Err(ParseError::DuplicateEndpoint {
                kind: CellKind::Start,
                cell: Cell::new(0, 2)
            })
        );
    }

    #[test]
    fn display_uses_text_form() {
        let text = "S#.\n..E\n";
        let m: GridModel = text.parse().unwrap();
        assert_eq!(m.to_string(), text);
        assert_eq!(Grid::from(&m).snapshot(), m);
    }

    #[test]
    fn iter_pairs_cells_with_kinds() {
        let m = GridModel::parse("S#").unwrap();
        let pairs: Vec<_> = m.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (Cell::new(0, 0), CellKind::Start),
                (Cell::new(0, 1), CellKind::Wall)
            ]
        );
    }
}
