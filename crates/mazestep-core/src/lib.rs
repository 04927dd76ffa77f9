//! **mazestep-core** — grid model for the mazestep pathfinding visualiser.
//!
//! Provides the [`Cell`] coordinate type, [`CellKind`], the shared editable
//! [`Grid`] and the frozen [`GridModel`] snapshot that searches run against.

pub mod geom;
pub mod grid;

pub use geom::{Bounds, CARDINAL_OFFSETS, Cell};
pub use grid::{CellKind, Edit, Grid, GridModel, ParseError};
