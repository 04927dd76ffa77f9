use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, SearchError};
use crate::frontier::Discipline;

/// The search strategy driving a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 4] = [Self::Bfs, Self::Dfs, Self::Dijkstra, Self::AStar];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
        }
    }

    /// Frontier discipline used by this algorithm.
    pub const fn discipline(self) -> Discipline {
        match self {
            Self::Bfs => Discipline::Fifo,
            Self::Dfs => Discipline::Lifo,
            Self::Dijkstra | Self::AStar => Discipline::Priority,
        }
    }

    /// Whether the run tracks best-known distances (and can see stale
    /// frontier entries).
    #[inline]
    pub const fn tracks_distance(self) -> bool {
        matches!(self.discipline(), Discipline::Priority)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::Bfs),
            "dfs" | "depth-first" => Ok(Self::Dfs),
            "dijkstra" => Ok(Self::Dijkstra),
            "a*" | "astar" | "a-star" => Ok(Self::AStar),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!("dfs".parse::<Algorithm>(), Ok(Algorithm::Dfs));
        assert_eq!("Dijkstra".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("AStar".parse::<Algorithm>(), Ok(Algorithm::AStar));
    }

    #[test]
    fn unknown_tag_is_invalid_configuration() {
        let err = "greedy".parse::<Algorithm>().unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidConfiguration(ConfigError::UnknownAlgorithm("greedy".into()))
        );
    }

    #[test]
    fn names_round_trip_through_parse() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>(), Ok(alg));
        }
    }

    #[test]
    fn only_priority_algorithms_track_distance() {
        assert!(!Algorithm::Bfs.tracks_distance());
        assert!(!Algorithm::Dfs.tracks_distance());
        assert!(Algorithm::Dijkstra.tracks_distance());
        assert!(Algorithm::AStar.tracks_distance());
    }
}
