//! Random maze generation for mazestep.

pub mod mapgen;

pub use mapgen::{DEFAULT_WALL_PROB, MazeGen};
