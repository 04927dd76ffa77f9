//! Run statistics.

use std::fmt;
use std::time::{Duration, Instant};

use crate::algorithm::Algorithm;

/// Final numbers for a finished run.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    pub algorithm: Algorithm,
    pub found: bool,
    pub nodes_expanded: usize,
    /// Cells in the reconstructed path, endpoints included. 0 when not found.
    pub path_length: usize,
    pub elapsed_seconds: f64,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Found: {}", if self.found { "yes" } else { "no" })?;
        writeln!(f, "Nodes expanded: {}", self.nodes_expanded)?;
        writeln!(f, "Path length: {}", self.path_length)?;
        write!(f, "Time (s): {:.3}", self.elapsed_seconds)
    }
}

/// Accumulates statistics while a run is in flight.
///
/// [`snapshot`](Self::snapshot) stays `None` until [`finish`](Self::finish)
/// is called on the terminal step.
#[derive(Clone, Debug)]
pub struct StatsCollector {
    algorithm: Algorithm,
    started: Instant,
    finished: Option<StatsSnapshot>,
}

impl StatsCollector {
    /// Start timing a run.
    pub fn start(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            started: Instant::now(),
            finished: None,
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Freeze the statistics. Later calls keep the first snapshot.
    pub fn finish(&mut self, found: bool, nodes_expanded: usize, path_length: usize) -> StatsSnapshot {
        let algorithm = self.algorithm;
        let elapsed_seconds = self.elapsed().as_secs_f64();
        *self.finished.get_or_insert(StatsSnapshot {
            algorithm,
            found,
            nodes_expanded,
            path_length: if found { path_length } else { 0 },
            elapsed_seconds,
        })
    }

    #[inline]
    pub fn snapshot(&self) -> Option<StatsSnapshot> {
        self.finished
    }
}
