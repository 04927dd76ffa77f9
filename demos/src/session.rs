//! Editor session: the live maze, the running search and what to paint.

use mazestep_core::{Bounds, Cell, CellKind, Edit, Grid};
use mazestep_gen::MazeGen;
use mazestep_paths::{
    Algorithm, SearchConfig, SearchError, SearchStatus, SearchStepper, StatsSnapshot, StepResult,
};
use rand::Rng;

/// Search paint for one cell, drawn over the maze layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Frontier,
    Visited,
    Path,
}

/// Ties the editable grid to a [`SearchStepper`] and keeps the overlay in
/// sync with the step deltas.
///
/// The grid cannot be edited while a search is running. Endpoints are never
/// painted.
pub struct Session {
    grid: Grid,
    stepper: SearchStepper,
    overlay: Vec<Overlay>,
    last: Option<StatsSnapshot>,
}

impl Session {
    pub fn new(grid: Grid) -> Self {
        let overlay = vec![Overlay::None; grid.bounds().len()];
        Self {
            grid,
            stepper: SearchStepper::new(),
            overlay,
            last: None,
        }
    }

    /// Handle to the live grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn bounds(&self) -> Bounds {
        self.grid.bounds()
    }

    pub fn status(&self) -> SearchStatus {
        self.stepper.status()
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.stepper.algorithm()
    }

    pub fn nodes_expanded(&self) -> usize {
        self.stepper.nodes_expanded()
    }

    /// Statistics of the last finished run, kept until the next start,
    /// reset or clear.
    pub fn stats(&self) -> Option<StatsSnapshot> {
        self.last
    }

    pub fn overlay_at(&self, c: Cell) -> Overlay {
        self.bounds()
            .index(c)
            .map_or(Overlay::None, |i| self.overlay[i])
    }

    /// Apply an editor mutation. Refused (returns `false`) while a search is
    /// running or when the cell is out of bounds.
    pub fn edit(&mut self, edit: Edit) -> bool {
        if self.status() == SearchStatus::Running {
            return false;
        }
        let applied = self.grid.apply(edit);
        if let Some(i) = self.bounds().index(edit.cell()) {
            self.overlay[i] = Overlay::None;
        }
        applied
    }

    /// Begin a new search over a snapshot of the current grid.
    ///
    /// Any previous overlay is cleared first. On a configuration error the
    /// session stays idle.
    pub fn start(&mut self, algorithm: Algorithm) -> Result<(), SearchError> {
        self.reset_search();
        let config = SearchConfig::new(algorithm, &self.grid.snapshot());
        if let Err(err) = self.stepper.initialize(config) {
            log::warn!("cannot start {algorithm}: {err}");
            return Err(err);
        }
        Ok(())
    }

    /// Advance the search by one step and paint its deltas.
    pub fn tick(&mut self) -> Result<StepResult, SearchError> {
        let was_running = self.status() == SearchStatus::Running;
        let result = self.stepper.step()?;
        for &c in &result.newly_visited {
            self.paint(c, Overlay::Visited);
        }
        for &c in &result.newly_frontier {
            self.paint(c, Overlay::Frontier);
        }
        if was_running && result.terminal {
            if let Some(path) = &result.path {
                for &c in path {
                    self.paint(c, Overlay::Path);
                }
            }
            self.last = self.stepper.stats();
        }
        Ok(result)
    }

    /// Stop the current search and wipe the overlay. The maze is kept.
    pub fn reset_search(&mut self) {
        self.stepper.reset();
        self.overlay.fill(Overlay::None);
        self.last = None;
    }

    /// Stop any search and reset every cell to free with no endpoints.
    pub fn clear_maze(&mut self) {
        self.reset_search();
        self.grid.clear();
    }

    /// Stop any search and refill the maze with random walls.
    pub fn generate<R: Rng>(&mut self, mapgen: &mut MazeGen<R>, wall_prob: f64) -> usize {
        self.reset_search();
        mapgen.scatter_walls(&self.grid, wall_prob)
    }

    fn paint(&mut self, c: Cell, overlay: Overlay) {
        if matches!(self.grid.get(c), Some(CellKind::Start | CellKind::End)) {
            return;
        }
        if let Some(i) = self.bounds().index(c) {
            self.overlay[i] = overlay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazestep_core::GridModel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(text: &str) -> Session {
        let model: GridModel = text.parse().unwrap();
        Session::new(Grid::from(&model))
    }

    fn painted(s: &Session, overlay: Overlay) -> Vec<Cell> {
        s.bounds()
            .iter()
            .filter(|&c| s.overlay_at(c) == overlay)
            .collect()
    }

    fn finish(s: &mut Session) -> StepResult {
        loop {
            let r = s.tick().unwrap();
            if r.terminal {
                return r;
            }
        }
    }

    #[test]
    fn first_tick_paints_frontier_but_not_endpoints() {
        let mut s = session("S..\n...\n..E");
        s.start(Algorithm::Bfs).unwrap();
        s.tick().unwrap();
        assert_eq!(painted(&s, Overlay::Frontier), vec![Cell::new(0, 1), Cell::new(1, 0)]);
        assert_eq!(s.overlay_at(Cell::new(0, 0)), Overlay::None);
    }

    #[test]
    fn finished_run_paints_path_between_endpoints() {
        let mut s = session("S..\n...\n..E");
        s.start(Algorithm::Bfs).unwrap();
        let last = finish(&mut s);
        assert!(last.found);
        assert_eq!(
            painted(&s, Overlay::Path),
            vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(2, 1)]
        );
        assert_eq!(s.overlay_at(Cell::new(2, 2)), Overlay::None);
        let stats = s.stats().unwrap();
        assert_eq!(stats.path_length, 5);
        assert_eq!(s.status(), SearchStatus::Found);
    }

    #[test]
    fn unreachable_end_leaves_no_path() {
        let mut s = session("S#.\n.#.\n.#E");
        s.start(Algorithm::Dijkstra).unwrap();
        let last = finish(&mut s);
        assert!(!last.found);
        assert!(painted(&s, Overlay::Path).is_empty());
        assert_eq!(s.stats().map(|st| st.found), Some(false));
    }

    #[test]
    fn edits_are_refused_while_running() {
        let mut s = session("S..\n...\n..E");
        s.start(Algorithm::Dfs).unwrap();
        s.tick().unwrap();
        assert!(!s.edit(Edit::new(1, 1, CellKind::Wall)));
        assert_eq!(s.grid().get(Cell::new(1, 1)), Some(CellKind::Free));
        finish(&mut s);
        assert!(s.edit(Edit::new(1, 1, CellKind::Wall)));
        assert_eq!(s.overlay_at(Cell::new(1, 1)), Overlay::None);
    }

    #[test]
    fn reset_search_keeps_the_maze() {
        let mut s = session("S#.\n...\n..E");
        s.start(Algorithm::AStar).unwrap();
        s.tick().unwrap();
        s.reset_search();
        assert_eq!(s.status(), SearchStatus::Idle);
        assert!(painted(&s, Overlay::Frontier).is_empty());
        assert_eq!(s.grid().get(Cell::new(0, 1)), Some(CellKind::Wall));
        assert_eq!(s.tick(), Err(SearchError::NotRunning));
    }

    #[test]
    fn clear_maze_drops_endpoints() {
        let mut s = session("S#.\n...\n..E");
        s.clear_maze();
        assert_eq!(s.grid().start(), None);
        assert_eq!(s.grid().snapshot().count(CellKind::Wall), 0);
        assert!(s.start(Algorithm::Bfs).is_err());
        assert_eq!(s.status(), SearchStatus::Idle);
    }

    #[test]
    fn generated_maze_is_searchable() {
        let mut s = Session::new(Grid::new(12, 16));
        let mut mapgen = MazeGen::new(StdRng::seed_from_u64(11));
        s.generate(&mut mapgen, 0.2);
        s.start(Algorithm::Bfs).unwrap();
        let last = finish(&mut s);
        assert_eq!(last.found, s.stats().unwrap().found);
    }
}
