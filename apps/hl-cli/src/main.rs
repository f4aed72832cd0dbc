use clap::{Parser, Subcommand};
use hl_app::{AppResult, Simulation, branch_flows_lps, format_table, node_pressures_barg};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "hl-cli")]
#[command(about = "HydroLoop CLI - steady-state hydraulic loop solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a topology and build its network without solving
    Validate {
        /// Path to the topology file (.json, .yaml or .yml)
        topology_path: PathBuf,
    },
    /// Solve for steady-state flows and pressures
    Solve {
        /// Path to the topology file (.json, .yaml or .yml)
        topology_path: PathBuf,
        /// Seed for the initial-guess generator (overrides the file)
        #[arg(long)]
        seed: Option<u64>,
        /// Number of attempts before giving up (overrides the file)
        #[arg(long)]
        max_retries: Option<usize>,
        /// Let branch flows go negative instead of clamping them
        /// (overrides the file; `false` forces clamping)
        #[arg(long, value_name = "true|false")]
        allow_reverse_flow: Option<bool>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { topology_path } => cmd_validate(&topology_path),
        Commands::Solve {
            topology_path,
            seed,
            max_retries,
            allow_reverse_flow,
        } => cmd_solve(&topology_path, seed, max_retries, allow_reverse_flow),
    }
}

fn cmd_validate(topology_path: &Path) -> AppResult<()> {
    println!("Validating topology: {}", topology_path.display());
    let sim = Simulation::from_path(topology_path)?;
    let model = sim.model();
    println!("✓ Topology is valid");
    println!(
        "  {} nodes ({} reference), {} branches",
        model.nodes.len(),
        model.reference_count(),
        model.branches.len()
    );
    let self_loops: Vec<&str> = model.graph.self_loops().map(|b| b.name.as_str()).collect();
    if !self_loops.is_empty() {
        println!("  self-loops (no effect on mass balance): {}", self_loops.join(", "));
    }
    Ok(())
}

fn cmd_solve(
    topology_path: &Path,
    seed: Option<u64>,
    max_retries: Option<usize>,
    allow_reverse_flow: Option<bool>,
) -> AppResult<()> {
    let mut sim =
        Simulation::from_path(topology_path)?.with_overrides(max_retries, allow_reverse_flow)?;
    if seed.is_some() {
        sim = sim.with_seed(seed);
    }

    let start = Instant::now();
    let solution = sim.solve_steady_state()?;
    info!(
        attempts = solution.attempts,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "solve finished"
    );

    println!(
        "✓ Converged on attempt {} ({} iterations, residual {:.3e})",
        solution.attempts,
        solution.iterations(),
        solution.residual_norm()
    );
    println!();
    print!(
        "{}",
        format_table("Branch", "Flow (l/s)", &branch_flows_lps(sim.model(), &solution))
    );
    println!();
    print!(
        "{}",
        format_table(
            "Node",
            "Pressure (barg)",
            &node_pressures_barg(sim.model(), &solution)
        )
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn reverse_flow_flag_takes_an_explicit_value() {
        let Commands::Solve {
            allow_reverse_flow, ..
        } = parse(&["hl-cli", "solve", "loop.yaml", "--allow-reverse-flow", "false"])
        else {
            panic!("expected solve");
        };
        assert_eq!(allow_reverse_flow, Some(false));

        let Commands::Solve {
            allow_reverse_flow,
            seed,
            ..
        } = parse(&["hl-cli", "solve", "loop.yaml", "--seed", "3"])
        else {
            panic!("expected solve");
        };
        assert_eq!(allow_reverse_flow, None);
        assert_eq!(seed, Some(3));
    }
}
