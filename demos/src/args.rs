use clap::Parser;
use mazestep_gen::DEFAULT_WALL_PROB;
use mazestep_paths::Algorithm;

/// Watch BFS, DFS, Dijkstra and A* explore a random maze one step at a time.
#[derive(Parser, Debug, Clone)]
#[command(name = "mazestep")]
#[command(about = "Step-by-step grid pathfinding visualizer")]
pub struct DemoArgs {
    /// Search algorithm: bfs, dfs, dijkstra or astar
    #[arg(short, long, default_value = "bfs")]
    pub algorithm: Algorithm,

    /// Maze height in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(1..=200))]
    pub rows: i32,

    /// Maze width in cells
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(1..=200))]
    pub cols: i32,

    /// Probability that a cell becomes a wall (0.0-1.0)
    #[arg(
        short = 'w',
        long,
        value_name = "PROB",
        default_value_t = DEFAULT_WALL_PROB,
        value_parser = parse_probability
    )]
    pub wall_prob: f64,

    /// Seed for the maze generator (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Delay between search steps in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = 80)]
    pub tick_ms: u64,

    /// Run every algorithm headless on the same maze and print their stats
    #[arg(short, long)]
    pub compare: bool,
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{s} is not between 0.0 and 1.0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = DemoArgs::try_parse_from(["mazestep"]).unwrap();
        assert_eq!(args.algorithm, Algorithm::Bfs);
        assert_eq!((args.rows, args.cols), (20, 30));
        assert_eq!(args.wall_prob, DEFAULT_WALL_PROB);
        assert_eq!(args.tick_ms, 80);
        assert_eq!(args.seed, None);
        assert!(!args.compare);
    }

    #[test]
    fn parses_flags() {
        let args = DemoArgs::try_parse_from([
            "mazestep", "-a", "a*", "--rows", "5", "--cols", "7", "-s", "9", "--compare",
        ])
        .unwrap();
        assert_eq!(args.algorithm, Algorithm::AStar);
        assert_eq!((args.rows, args.cols), (5, 7));
        assert_eq!(args.seed, Some(9));
        assert!(args.compare);
    }

    #[test]
    fn rejects_unknown_algorithm() {
        assert!(DemoArgs::try_parse_from(["mazestep", "-a", "greedy"]).is_err());
        assert!(DemoArgs::try_parse_from(["mazestep", "--rows", "0"]).is_err());
    }

    #[test]
    fn wall_probability_must_be_in_range() {
        for bad in ["NaN", "inf", "-0.1", "1.5", "lots"] {
            assert!(
                DemoArgs::try_parse_from(["mazestep", "--wall-prob", bad]).is_err(),
                "{bad} accepted"
            );
        }
        let args = DemoArgs::try_parse_from(["mazestep", "-w", "1"]).unwrap();
        assert_eq!(args.wall_prob, 1.0);
    }
}
