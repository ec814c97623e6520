//! Command-line interface for courier dispatch planning.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;

use plan::{DefaultPlannerBuilder, PlanArgs, run_plan};

const ARG_NODES: &str = "nodes";
const ARG_EDGES: &str = "edges";
const ARG_DELIVERIES: &str = "deliveries";
const ARG_DEPOT: &str = "depot";
const ARG_COURIERS: &str = "couriers";
const ARG_SEED: &str = "seed";
const ARG_MAX_ITERATIONS: &str = "max-iterations";
const ARG_OUT: &str = "out";
const ENV_COURIERS: &str = "COURIER_CMDS_PLAN_COURIERS";

/// Run the courier CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, loading,
/// planning or writing outputs fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args, &DefaultPlannerBuilder),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Split deliveries between couriers and route each one",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan courier tours over a road graph.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
