//! The single-steppable search state machine.
//!
//! A [`SearchStepper`] is driven from outside: every call to
//! [`step`](SearchStepper::step) performs exactly one unit of work (one
//! frontier pop and at most four neighbour relaxations) and reports what
//! changed, so an animation timer can call it once per tick.

use mazestep_core::{Cell, GridModel};

use crate::algorithm::Algorithm;
use crate::distance::manhattan;
use crate::error::{ConfigError, SearchError};
use crate::frontier::{Entry, Frontier};
use crate::path::{PredecessorMap, reconstruct};
use crate::stats::{StatsCollector, StatsSnapshot};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Where a run is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    #[default]
    Idle,
    Running,
    Found,
    NotFound,
}

impl SearchStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::NotFound)
    }
}

/// Everything needed to start a run.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub grid: GridModel,
    pub start: Option<Cell>,
    pub end: Option<Cell>,
}

impl SearchConfig {
    /// Configuration using the grid's own start and end cells.
    pub fn new(algorithm: Algorithm, grid: &GridModel) -> Self {
        Self {
            algorithm,
            grid: grid.clone(),
            start: grid.start(),
            end: grid.end(),
        }
    }

    /// Override the endpoints.
    pub fn with_endpoints(mut self, start: Cell, end: Cell) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Check the configuration, returning the validated endpoints.
    pub fn validate(&self) -> Result<(Cell, Cell), SearchError> {
        let start = self.start.ok_or(ConfigError::MissingStart)?;
        let end = self.end.ok_or(ConfigError::MissingEnd)?;
        for c in [start, end] {
            if !self.grid.contains(c) {
                return Err(ConfigError::OutOfBounds(c).into());
            }
            if !self.grid.is_walkable(c) {
                return Err(ConfigError::Blocked(c).into());
            }
        }
        if start == end && !self.grid.neighbors(start).any(|n| self.grid.is_walkable(n)) {
            return Err(ConfigError::Isolated(start).into());
        }
        Ok((start, end))
    }
}

/// What one call to [`SearchStepper::step`] changed.
///
/// Start and end are never listed in `newly_visited` / `newly_frontier`;
/// they keep their endpoint appearance for the whole run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepResult {
    pub terminal: bool,
    pub found: bool,
    /// Cell expanded by this step.
    pub newly_visited: Vec<Cell>,
    /// Cells pushed onto the frontier by this step.
    pub newly_frontier: Vec<Cell>,
    /// Reconstructed path, start to end, on the `found` step.
    pub path: Option<Vec<Cell>>,
    /// Set when the path is partial because the predecessor chain broke at
    /// this cell.
    pub broken_chain: Option<Cell>,
}

impl StepResult {
    /// A step that changed nothing visible (a stale frontier entry).
    fn quiet() -> Self {
        Self::default()
    }

    fn not_found() -> Self {
        Self {
            terminal: true,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

struct Run {
    algorithm: Algorithm,
    grid: GridModel,
    start: Cell,
    end: Cell,
    status: SearchStatus,
    frontier: Frontier,
    visited: Vec<bool>,
    predecessors: PredecessorMap,
    best: Vec<Option<i32>>,
    nodes_expanded: usize,
    steps: usize,
    stats: StatsCollector,
    outcome: Option<StepResult>,
    // scratch buffer for neighbour queries
    nbuf: Vec<Cell>,
}

impl Run {
    fn new(algorithm: Algorithm, grid: GridModel, start: Cell, end: Cell) -> Self {
        let bounds = grid.bounds();
        let mut run = Self {
            algorithm,
            start,
            end,
            status: SearchStatus::Running,
            frontier: Frontier::new(algorithm.discipline()),
            visited: vec![false; bounds.len()],
            predecessors: PredecessorMap::new(bounds),
            best: vec![None; bounds.len()],
            nodes_expanded: 0,
            steps: 0,
            stats: StatsCollector::start(algorithm),
            outcome: None,
            nbuf: Vec::with_capacity(4),
            grid,
        };

        let seed = match algorithm {
            Algorithm::Bfs | Algorithm::Dfs => None,
            Algorithm::Dijkstra => Some(0),
            Algorithm::AStar => Some(manhattan(start, end)),
        };
        if algorithm.tracks_distance() {
            run.set_best(start, 0);
        }
        run.mark_visited(start);
        run.frontier.push(start, seed);
        run
    }

    #[inline]
    fn idx(&self, c: Cell) -> Option<usize> {
        self.grid.bounds().index(c)
    }

    fn is_visited(&self, c: Cell) -> bool {
        self.idx(c).is_some_and(|i| self.visited[i])
    }

    fn mark_visited(&mut self, c: Cell) {
        if let Some(i) = self.idx(c) {
            self.visited[i] = true;
        }
    }

    fn best_at(&self, c: Cell) -> Option<i32> {
        self.idx(c).and_then(|i| self.best[i])
    }

    fn set_best(&mut self, c: Cell, d: i32) {
        if let Some(i) = self.idx(c) {
            self.best[i] = Some(d);
        }
    }

    #[inline]
    fn is_endpoint(&self, c: Cell) -> bool {
        c == self.start || c == self.end
    }

    /// Distance-from-start implied by a priority-frontier entry.
    fn cost_of(&self, entry: Entry) -> i32 {
        let priority = entry.priority.unwrap_or(0);
        match self.algorithm {
            Algorithm::AStar => priority - manhattan(entry.cell, self.end),
            _ => priority,
        }
    }

    /// An entry is stale when a strictly better distance has been recorded
    /// for its cell since it was pushed.
    fn is_stale(&self, entry: Entry) -> bool {
        if !self.algorithm.tracks_distance() {
            return false;
        }
        match self.best_at(entry.cell) {
            Some(best) => self.cost_of(entry) > best,
            None => false,
        }
    }

    fn advance(&mut self) -> Result<StepResult, SearchError> {
        self.steps += 1;

        if self.frontier.is_empty() {
            return Ok(self.finish(StepResult::not_found()));
        }
        let entry = self.frontier.pop()?;
        let current = entry.cell;

        if self.is_stale(entry) {
            log::trace!("step {}: skipped stale entry for {current}", self.steps);
            return Ok(StepResult::quiet());
        }

        self.mark_visited(current);

        if current == self.end {
            let rec = reconstruct(&self.predecessors, self.start, self.end);
            let broken_chain = match rec.anomaly {
                Some(SearchError::BrokenPredecessorChain { at }) => Some(at),
                _ => None,
            };
            return Ok(self.finish(StepResult {
                terminal: true,
                found: true,
                path: Some(rec.cells),
                broken_chain,
                ..StepResult::default()
            }));
        }

        let mut result = StepResult::default();
        if !self.is_endpoint(current) {
            result.newly_visited.push(current);
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend(self.grid.neighbors(current).filter(|&n| self.grid.is_walkable(n)));

        match self.algorithm {
            Algorithm::Bfs | Algorithm::Dfs => {
                for &n in nbuf.iter() {
                    if self.is_visited(n) {
                        continue;
                    }
                    self.mark_visited(n);
                    self.predecessors.insert(n, current);
                    self.frontier.push(n, None);
                    self.nodes_expanded += 1;
                    if !self.is_endpoint(n) {
                        result.newly_frontier.push(n);
                    }
                }
            }
            Algorithm::Dijkstra | Algorithm::AStar => {
                let g = self.cost_of(entry);
                for &n in nbuf.iter() {
                    let tentative = g + 1;
                    let known = self.best_at(n);
                    if known.is_some_and(|d| tentative >= d) {
                        continue;
                    }
                    if known.is_none() {
                        self.nodes_expanded += 1;
                    }
                    self.set_best(n, tentative);
                    self.predecessors.insert(n, current);
                    let priority = match self.algorithm {
                        Algorithm::AStar => tentative + manhattan(n, self.end),
                        _ => tentative,
                    };
                    self.frontier.push(n, Some(priority));
                    if !self.is_endpoint(n) {
                        result.newly_frontier.push(n);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        log::trace!(
            "step {}: expanded {current}, {} new frontier cells",
            self.steps,
            result.newly_frontier.len()
        );
        Ok(result)
    }

    /// Record a terminal result and freeze the statistics.
    fn finish(&mut self, result: StepResult) -> StepResult {
        self.status = if result.found {
            SearchStatus::Found
        } else {
            SearchStatus::NotFound
        };
        let path_length = result.path.as_ref().map_or(0, Vec::len);
        let snap = self
            .stats
            .finish(result.found, self.nodes_expanded, path_length);
        log::debug!(
            "{} search finished after {} steps: found={} expanded={} path={}",
            self.algorithm,
            self.steps,
            snap.found,
            snap.nodes_expanded,
            snap.path_length
        );
        self.outcome = Some(result.clone());
        result
    }
}

// ---------------------------------------------------------------------------
// SearchStepper
// ---------------------------------------------------------------------------

/// Incremental pathfinding engine.
///
/// States move `Idle -> Running -> Found | NotFound`; only
/// [`reset`](Self::reset) or a new [`initialize`](Self::initialize) leave a
/// terminal state.
#[derive(Default)]
pub struct SearchStepper {
    run: Option<Run>,
}

impl SearchStepper {
    /// An idle stepper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run, discarding any previous one.
    ///
    /// The grid in `config` is owned by the run, so later edits to the live
    /// editor grid cannot affect it. On error the stepper is left idle.
    pub fn initialize(&mut self, config: SearchConfig) -> Result<(), SearchError> {
        self.run = None;
        let (start, end) = config.validate()?;
        log::debug!(
            "starting {} search on {} grid from {start} to {end}",
            config.algorithm,
            config.grid.bounds()
        );
        self.run = Some(Run::new(config.algorithm, config.grid, start, end));
        Ok(())
    }

    /// Perform one unit of work.
    ///
    /// Once the run is terminal, further calls return the terminal result
    /// again without doing any work.
    pub fn step(&mut self) -> Result<StepResult, SearchError> {
        let run = self.run.as_mut().ok_or(SearchError::NotRunning)?;
        if let Some(done) = &run.outcome {
            return Ok(done.clone());
        }
        run.advance()
    }

    /// Step until the run is terminal and return the terminal result.
    ///
    /// Each iteration is an ordinary [`step`](Self::step); this is a
    /// convenience for headless drivers.
    pub fn run_to_end(&mut self) -> Result<StepResult, SearchError> {
        loop {
            let result = self.step()?;
            if result.terminal {
                return Ok(result);
            }
        }
    }

    /// Drop all run state and return to [`SearchStatus::Idle`].
    pub fn reset(&mut self) {
        if self.run.take().is_some() {
            log::debug!("search reset");
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.run.as_ref().map_or(SearchStatus::Idle, |r| r.status)
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.run.as_ref().map(|r| r.algorithm)
    }

    /// The frozen grid the current run searches.
    pub fn grid(&self) -> Option<&GridModel> {
        self.run.as_ref().map(|r| &r.grid)
    }

    /// Cells discovered so far, the start excluded.
    pub fn nodes_expanded(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.nodes_expanded)
    }

    /// Number of non-repeated `step` calls, stale skips and the terminal one
    /// included.
    pub fn steps(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.steps)
    }

    pub fn is_visited(&self, c: Cell) -> bool {
        self.run.as_ref().is_some_and(|r| r.is_visited(c))
    }

    /// Pending frontier entries, stale ones included.
    pub fn frontier_len(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.frontier.len())
    }

    /// Best known distance from the start (Dijkstra / A* only).
    pub fn best_distance(&self, c: Cell) -> Option<i32> {
        self.run.as_ref().and_then(|r| r.best_at(c))
    }

    pub fn predecessor(&self, c: Cell) -> Option<Cell> {
        self.run.as_ref().and_then(|r| r.predecessors.get(c))
    }

    /// The reconstructed path once the run has found the end.
    pub fn path(&self) -> Option<&[Cell]> {
        self.run
            .as_ref()
            .and_then(|r| r.outcome.as_ref())
            .and_then(|o| o.path.as_deref())
    }

    /// Final statistics, available once the run is terminal.
    pub fn stats(&self) -> Option<StatsSnapshot> {
        self.run.as_ref().and_then(|r| r.stats.snapshot())
    }
}
