use std::path::{Path, PathBuf};

use anyhow::anyhow;
use clap::{Parser, ValueEnum};
use nbody_simulator::config::ScenarioConfig;
use nbody_simulator::export::summary::{RunSummary, write_summaries};
use nbody_simulator::export::trajectory::writer_for_path;
use nbody_simulator::report::{run_summary, write_trajectory_csv};
use nbody_simulator::scenario::{Scenario, load_scenarios, select};
use nbody_simulator::{Method, RunOutcome};
use tracing::info;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Fixed-step n-body simulator (Euler / RK4) with energy diagnostics"
)]
struct Cli {
    /// Scenario manifest (YAML list, TOML file, or directory)
    #[arg(long, default_value = "configs/scenarios")]
    scenario: PathBuf,

    /// Scenario name (case-insensitive, defaults to the first one)
    #[arg(long)]
    name: Option<String>,

    /// Override the integration method from the manifest
    #[arg(long, value_enum)]
    method: Option<MethodArg>,

    /// Output trajectory CSV (use '-' for stdout); suffixed per method when several run
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output JSON summary of every run
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print diagnostics for every k-th recorded point (0 disables)
    #[arg(long, default_value_t = 0)]
    print_every: usize,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum MethodArg {
    Euler,
    Rk4,
    Both,
}

impl MethodArg {
    fn methods(self) -> Vec<Method> {
        match self {
            MethodArg::Euler => vec![Method::Euler],
            MethodArg::Rk4 => vec![Method::Rk4Fixed],
            MethodArg::Both => vec![Method::Euler, Method::Rk4Fixed],
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let configs = load_scenarios(&cli.scenario)?;
    let config = select(&configs, cli.name.as_deref())?;
    let dimensions = config
        .dimensions()
        .ok_or_else(|| anyhow!("scenario '{}' has no bodies", config.name))?;

    let summaries = match (dimensions, config.bodies.len()) {
        (2, 2) => run::<2, 2>(config, &cli)?,
        (2, 3) => run::<2, 3>(config, &cli)?,
        (2, 4) => run::<2, 4>(config, &cli)?,
        (3, 2) => run::<3, 2>(config, &cli)?,
        (3, 3) => run::<3, 3>(config, &cli)?,
        (3, 4) => run::<3, 4>(config, &cli)?,
        (d, n) => {
            return Err(anyhow!(
                "unsupported shape: {d} dimensions x {n} bodies (supported: 2-3 dimensions, 2-4 bodies)"
            ));
        }
    };

    if let Some(path) = &cli.summary {
        write_summaries(path, &summaries)?;
        info!(path = %path.display(), "wrote run summary");
    }
    Ok(())
}

fn run<const D: usize, const N: usize>(
    config: &ScenarioConfig,
    cli: &Cli,
) -> anyhow::Result<Vec<RunSummary>> {
    let scenario = Scenario::<D, N>::try_from(config)?;
    let methods = cli
        .method
        .map(MethodArg::methods)
        .unwrap_or_else(|| scenario.methods.clone());

    println!("=== Scenario: {} ===", scenario.name);
    println!(
        "Bodies          : {} ({}D)",
        scenario.body_names.join(", "),
        D
    );
    println!(
        "Span            : [{}, {}] step {}",
        scenario.span.start(),
        scenario.span.end(),
        scenario.step
    );

    let mut summaries = Vec::with_capacity(methods.len());
    for &method in &methods {
        let mut sim = scenario.simulator();
        let outcome = sim.simulate(method, scenario.step, scenario.span, scenario.initial)?;

        println!("--- {} ---", method);
        if cli.print_every > 0 {
            for point in sim.result().iter().step_by(cli.print_every) {
                let kinetic = sim.calculate_kinetic(point);
                let potential = sim.calculate_potential(point);
                println!(
                    "t={:<12.6} motion={:?} kinetic={:.6e} potential={:.6e} energy={:.6e}",
                    point.time,
                    sim.calculate_total_motion(point),
                    kinetic,
                    potential,
                    kinetic + potential
                );
            }
        }

        match &outcome {
            RunOutcome::Completed { points } => {
                println!("Outcome         : completed ({points} points)");
            }
            RunOutcome::Collided { time, collision } => {
                println!(
                    "Outcome         : stopped by a future collision between {} and {} after t = {}",
                    scenario.body_names[collision.first],
                    scenario.body_names[collision.second],
                    time
                );
            }
        }
        if let Some(report) = sim.energy_report() {
            println!(
                "Energy          : {:.9e} -> {:.9e} (relative drift {:.3e})",
                report.initial, report.final_energy, report.relative_drift
            );
        }
        if let Some(last) = sim.result().last() {
            println!("Final momentum  : {:?}", sim.calculate_total_motion(last));
        }

        if let Some(path) = &cli.csv {
            let target = csv_path_for(path, method, methods.len() > 1);
            let mut writer = writer_for_path(&target)?;
            write_trajectory_csv(&sim, writer.as_mut())?;
            info!(path = %target.display(), method = %method, "wrote trajectory");
        }

        summaries.push(run_summary(
            &scenario,
            method,
            &outcome,
            &sim,
            chrono::Utc::now().to_rfc3339(),
        ));
    }

    Ok(summaries)
}

fn csv_path_for(path: &Path, method: Method, suffix: bool) -> PathBuf {
    if !suffix || path == Path::new("-") {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("trajectory");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("csv");
    path.with_file_name(format!("{stem}_{}.{ext}", method.label()))
}
