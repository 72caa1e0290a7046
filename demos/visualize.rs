//! Animated shortest-path search in the terminal.
//!
//! Run with: cargo run --bin pathviz -- --algorithm dijkstra --walls 0.25
//!
//! With `--no-animate` the search runs unobserved and the final grid is
//! printed as text.

use std::error::Error;
use std::process::ExitCode;

use rand::SeedableRng;
use rand::rngs::StdRng;

use pathviz_demo::{ConfigError, DemoConfig, USAGE, animate, build_board, summary};
use pathviz_search::Unobserved;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(ConfigError::HelpRequested) = e.downcast_ref::<ConfigError>() {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            eprintln!("pathviz: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cfg = DemoConfig::from_args(std::env::args().skip(1))?;
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut board = build_board(&cfg, &mut rng)?;

    if cfg.animate {
        let outcome = animate(&cfg, &mut board)?;
        println!("{}", summary(cfg.algorithm, &Ok(outcome)));
    } else {
        let outcome = cfg.algorithm.run_board(&mut board, &mut Unobserved);
        print!("{}", board.grid());
        println!("{}", summary(cfg.algorithm, &outcome));
        outcome?;
    }
    Ok(())
}
