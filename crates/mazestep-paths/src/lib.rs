//! Incremental pathfinding for mazestep grids.
//!
//! The engine advances a search by exactly one unit of work per call so it
//! can be animated tick by tick:
//!
//! - **BFS** over a FIFO [`Frontier`]
//! - **DFS** over a LIFO [`Frontier`]
//! - **Dijkstra** and **A\*** over a priority [`Frontier`] with lazy
//!   deletion of stale entries
//!
//! All four run behind [`SearchStepper`]; see its
//! [`step`](SearchStepper::step) method for the stepping contract.
//!
//! # Example
//!
//! ```
//! use mazestep_core::GridModel;
//! use mazestep_paths::{Algorithm, SearchConfig, SearchStepper};
//!
//! let grid = GridModel::parse("S..\n.#.\n..E").unwrap();
//! let mut stepper = SearchStepper::new();
//! stepper.initialize(SearchConfig::new(Algorithm::AStar, &grid)).unwrap();
//! let done = stepper.run_to_end().unwrap();
//! assert!(done.found);
//! assert_eq!(stepper.stats().unwrap().path_length, 5);
//! ```

mod algorithm;
mod distance;
mod error;
mod frontier;
mod path;
mod stats;
mod stepper;

pub use algorithm::Algorithm;
pub use distance::manhattan;
pub use error::{ConfigError, SearchError};
pub use frontier::{Discipline, Entry, Frontier};
pub use path::{PredecessorMap, Reconstruction, reconstruct};
pub use stats::{StatsCollector, StatsSnapshot};
pub use stepper::{SearchConfig, SearchStatus, SearchStepper, StepResult};
