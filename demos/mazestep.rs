//! Terminal pathfinding visualizer.
//!
//! Run: cargo run --bin mazestep -- --algorithm astar --seed 7
//! Headless: cargo run --bin mazestep -- --compare

use std::time::{Duration, Instant};

use clap::Parser;
use mazestep_core::Grid;
use mazestep_demos::{DemoArgs, Session, logging, term::{Command, Terminal}};
use mazestep_gen::MazeGen;
use mazestep_paths::{Algorithm, SearchStatus};
use rand::{RngExt, SeedableRng, rngs::StdRng};

fn main() {
    let args = DemoArgs::parse();
    if let Err(e) = logging::init_logging() {
        eprintln!("Error: cannot initialize logging: {e}");
    }
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("maze seed {seed}");
    let mut mapgen = MazeGen::new(StdRng::seed_from_u64(seed));
    let mut session = Session::new(Grid::new(args.rows, args.cols));
    session.generate(&mut mapgen, args.wall_prob);

    if args.compare {
        println!("{}", session.grid().snapshot());
        for stats in mazestep_demos::compare(&session.grid().snapshot())? {
            println!("{stats}\n");
        }
        println!("seed: {seed}");
        return Ok(());
    }

    animate(&args, &mut session, &mut mapgen)
}

fn animate(
    args: &DemoArgs,
    session: &mut Session,
    mapgen: &mut MazeGen<StdRng>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(args.tick_ms);
    let mut algorithm = args.algorithm;
    let mut term = Terminal::init()?;
    session.start(algorithm)?;
    term.draw(session)?;

    let mut next = Instant::now() + tick;
    loop {
        let timeout = next.saturating_duration_since(Instant::now());
        match term.poll(timeout)? {
            Some(Command::Quit) => break,
            Some(Command::Restart) => session.start(algorithm)?,
            Some(Command::NewMaze) => {
                session.generate(mapgen, args.wall_prob);
                session.start(algorithm)?;
            }
            Some(Command::Pick(i)) => {
                if let Some(&alg) = Algorithm::ALL.get(i) {
                    algorithm = alg;
                    session.start(algorithm)?;
                }
            }
            None => {}
        }
        if Instant::now() >= next {
            if session.status() == SearchStatus::Running {
                session.tick()?;
            }
            next = Instant::now() + tick;
        }
        term.draw(session)?;
    }

    term.close();
    Ok(())
}
