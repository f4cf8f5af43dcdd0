use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use hs_app::{AppError, AppResult, HttpSolver, RequestController, SolverConfig};
use hs_core::{ScenarioDraft, SimulationResult, validate};
use hs_present::svg::{render_inertia_svg, render_load_bars_svg, render_plot_svg};
use hs_present::{AnalyticsView, PlotScene, ResultView, SettlePolicy, ViewTab};
use tracing_subscriber::EnvFilter;

mod text;

#[derive(Parser)]
#[command(name = "hs-cli")]
#[command(about = "Hospital siting client - submit scenarios to the solver and inspect results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check scenario parameters without contacting the solver
    Validate {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
    /// Submit a scenario to the solver and show the result
    Simulate {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[command(flatten)]
        solver: SolverArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show a solver response previously saved as JSON
    Render {
        /// Path to the solver payload
        payload_path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct ScenarioArgs {
    /// Side of the square grid
    #[arg(long)]
    m: String,
    /// Number of neighborhoods to place
    #[arg(long = "neighborhoods")]
    num_neighborhoods: String,
    /// Number of hospitals (clusters)
    #[arg(long)]
    k: String,
    /// Random seed; omitted when blank
    #[arg(long, default_value = "")]
    seed: String,
}

impl ScenarioArgs {
    fn to_draft(&self) -> ScenarioDraft {
        ScenarioDraft {
            m: self.m.clone(),
            num_neighborhoods: self.num_neighborhoods.clone(),
            k: self.k.clone(),
            random_seed: self.seed.clone(),
        }
    }
}

#[derive(Args)]
struct SolverArgs {
    /// YAML file with `base_url` / `request_timeout_s`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Solver base URL (overrides config and SOLVER_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
    /// Request timeout in seconds, 0 to wait forever
    #[arg(long)]
    timeout: Option<f64>,
}

impl SolverArgs {
    fn resolve(&self) -> AppResult<SolverConfig> {
        let mut config = SolverConfig::load(self.config.as_deref())?;
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_s = timeout;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Which result view to print
    #[arg(long, value_enum, default_value_t = ViewArg::All)]
    view: ViewArg,
    /// Directory to write plot.svg, inertia.svg and loads.svg into
    #[arg(long)]
    svg: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ViewArg {
    Plot,
    Analytics,
    Detail,
    All,
}

impl ViewArg {
    fn tabs(self) -> Vec<ViewTab> {
        match self {
            ViewArg::Plot => vec![ViewTab::Plot],
            ViewArg::Analytics => vec![ViewTab::Analytics],
            ViewArg::Detail => vec![ViewTab::Detail],
            ViewArg::All => ViewTab::ALL.to_vec(),
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario } => cmd_validate(&scenario),
        Commands::Simulate {
            scenario,
            solver,
            output,
        } => cmd_simulate(&scenario, &solver, &output),
        Commands::Render {
            payload_path,
            output,
        } => cmd_render(&payload_path, &output),
    }
}

fn cmd_validate(scenario: &ScenarioArgs) -> AppResult<()> {
    let errors = validate(&scenario.to_draft());
    if errors.is_empty() {
        println!("✓ Scenario is valid");
        Ok(())
    } else {
        for error in &errors {
            println!("✗ {}", error);
        }
        Err(AppError::InvalidScenario(errors))
    }
}

fn cmd_simulate(scenario: &ScenarioArgs, solver: &SolverArgs, output: &OutputArgs) -> AppResult<()> {
    let config = solver.resolve()?;
    let transport = HttpSolver::new(&config)?;
    println!("Submitting scenario to {}", transport.endpoint());

    let mut controller = RequestController::new(Arc::new(transport), SettlePolicy::default());
    controller.edit_draft(scenario.to_draft());

    let started = Instant::now();
    let result = controller.run_to_completion()?;
    println!(
        "✓ Simulation completed in {:.2}s ({} hospitals, {} neighborhoods)\n",
        started.elapsed().as_secs_f64(),
        result.hospitals.len(),
        result.neighborhoods.len()
    );

    show_result(&result, output)
}

fn cmd_render(payload_path: &Path, output: &OutputArgs) -> AppResult<()> {
    let contents =
        std::fs::read_to_string(payload_path).map_err(|source| AppError::PayloadRead {
            path: payload_path.to_path_buf(),
            source,
        })?;
    let result: SimulationResult =
        serde_json::from_str(&contents).map_err(|e| AppError::Payload(e.to_string()))?;
    if let Err(e) = result.check_consistency() {
        tracing::warn!(error = %e, "payload is inconsistent");
    }

    show_result(&result, output)
}

fn show_result(result: &SimulationResult, output: &OutputArgs) -> AppResult<()> {
    for tab in output.view.tabs() {
        let rendered = match ResultView::for_tab(tab, result) {
            ResultView::Plot(scene) => text::plot(&scene),
            ResultView::Analytics(analytics) => text::analytics(&analytics),
            ResultView::Detail(rows) => text::detail(&rows),
        };
        println!("=== {} ===", tab.label());
        println!("{}", rendered);
    }

    if let Some(dir) = &output.svg {
        write_svgs(result, dir)?;
    }
    Ok(())
}

fn write_svgs(result: &SimulationResult, dir: &Path) -> AppResult<()> {
    std::fs::create_dir_all(dir)?;
    let analytics = AnalyticsView::build(result);

    let files = [
        ("plot.svg", render_plot_svg(&PlotScene::build(result))),
        ("inertia.svg", render_inertia_svg(&analytics.inertia)),
        ("loads.svg", render_load_bars_svg(&analytics.load_bars)),
    ];
    for (name, contents) in files {
        let path = dir.join(name);
        std::fs::write(&path, contents)?;
        println!("✓ Wrote {}", path.display());
    }
    Ok(())
}
