//! Driver pieces for the `mazestep` binary: the editor session, the
//! crossterm view, CLI arguments and log setup.

pub mod args;
pub mod logging;
pub mod session;
pub mod term;

use mazestep_core::GridModel;
use mazestep_paths::{Algorithm, SearchConfig, SearchError, SearchStepper, StatsSnapshot};

pub use args::DemoArgs;
pub use session::{Overlay, Session};

/// Run every algorithm to completion on the same maze.
///
/// Stops at the first configuration error, which is the same for all of them.
pub fn compare(model: &GridModel) -> Result<Vec<StatsSnapshot>, SearchError> {
    let mut stepper = SearchStepper::new();
    let mut out = Vec::with_capacity(Algorithm::ALL.len());
    for alg in Algorithm::ALL {
        stepper.initialize(SearchConfig::new(alg, model))?;
        stepper.run_to_end()?;
        out.extend(stepper.stats());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_reports_every_algorithm() {
        let model = GridModel::parse("S...\n.##.\n...E").unwrap();
        let stats = compare(&model).unwrap();
        let algs: Vec<_> = stats.iter().map(|s| s.algorithm).collect();
        assert_eq!(algs, Algorithm::ALL.to_vec());
        assert!(stats.iter().all(|s| s.found));
        assert!(stats.iter().all(|s| s.path_length == 6));
    }

    #[test]
    fn compare_fails_without_endpoints() {
        let model = GridModel::new(3, 3);
        assert!(compare(&model).is_err());
    }
}
