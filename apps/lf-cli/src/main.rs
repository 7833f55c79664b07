mod compile;
mod error;
mod report;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::compile::compile_scenario;
use crate::error::{AppError, AppResult};
use crate::report::RecordOutcome;

#[derive(Parser)]
#[command(name = "lf-cli")]
#[command(about = "LeafFlux CLI - coupled leaf photosynthesis and energy balance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Solve every forcing record in a scenario
    Solve {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Output CSV file path (optional, prints a table otherwise)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include per-leaf state alongside canopy fluxes
        #[arg(long)]
        detailed: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Solve {
            scenario_path,
            output,
            detailed,
        } => cmd_solve(&scenario_path, output.as_deref(), detailed),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = lf_project::load(scenario_path)?;
    compile_scenario(&scenario)?;
    println!(
        "✓ Scenario '{}' is valid ({} forcing records)",
        scenario.name,
        scenario.forcing.len()
    );
    Ok(())
}

fn cmd_solve(scenario_path: &Path, output: Option<&Path>, detailed: bool) -> AppResult<()> {
    let scenario = lf_project::load(scenario_path)?;
    let runtime = compile_scenario(&scenario)?;
    let solver = runtime.solver()?;
    info!(
        scenario = %runtime.name,
        records = runtime.forcing.len(),
        "solving scenario"
    );

    let outcomes: Vec<RecordOutcome> = runtime
        .forcing
        .iter()
        .map(|(id, forcing)| {
            let result = solver.solve_detailed(forcing).map_err(|e| {
                warn!(record = %id, error = %e, "record failed");
                e.to_string()
            });
            RecordOutcome {
                id: id.clone(),
                result,
            }
        })
        .collect();

    if let Some(path) = output {
        let csv = report::to_csv(&outcomes, detailed);
        std::fs::write(path, csv).map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        println!(
            "✓ Wrote {} records to {}",
            outcomes.len(),
            path.display()
        );
    } else {
        report::print_table(&outcomes, detailed);
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(AppError::RecordsFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}
