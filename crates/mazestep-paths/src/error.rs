use mazestep_core::Cell;

/// Why a search configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no start cell")]
    MissingStart,
    #[error("no end cell")]
    MissingEnd,
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),
    #[error("cell {0} is a wall")]
    Blocked(Cell),
    /// Start and end coincide on a cell with nowhere to go.
    #[error("start and end are both {0} and no other cell is reachable")]
    Isolated(Cell),
    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),
}

/// Errors raised by the search engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The run never started; supply a valid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// `pop` on an empty frontier. Callers check `is_empty` first.
    #[error("pop from an empty frontier")]
    EmptyFrontier,
    /// `step` called with no initialized run.
    #[error("no search is running")]
    NotRunning,
    /// Path reconstruction hit a cell without a predecessor before reaching
    /// the start. Reported alongside the partial path, never fatal.
    #[error("predecessor chain broken at {at}")]
    BrokenPredecessorChain { at: Cell },
}
