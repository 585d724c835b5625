use anyhow::{Context, Result};
use appliance_energy::model::config::{
    CARBON_INTENSITY_KG_PER_KWH, DEFAULT_SAMPLE_COUNT, DEFAULT_SEED,
};
use appliance_energy::report::{self, OutputFormat, TOP_SENSITIVITY};
use appliance_energy::{
    Catalog, Category, ModelConfig, catalog, run_catalog, run_category, run_combined,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

#[derive(Parser)]
#[command(name = "appliance-energy")]
#[command(about = "Annual electricity and CO2e estimates for UK household devices", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Seed for the Monte Carlo generator
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Monte Carlo trials per device
    #[arg(long, global = true, default_value_t = DEFAULT_SAMPLE_COUNT)]
    samples: usize,

    /// Grid emissions factor in kg CO2e per kWh
    #[arg(long, global = true, default_value_t = CARBON_INTENSITY_KG_PER_KWH)]
    carbon_intensity: f64,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate, simulate and validate one device category
    Category {
        #[arg(value_enum)]
        name: CategoryArg,
    },

    /// Run every category as an independent seeded run
    AllCategories,

    /// Combined totals, category shares and sensitivity ranking
    Overview {
        /// Number of sensitivity rows to list
        #[arg(long, default_value_t = TOP_SENSITIVITY)]
        top: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Kitchen,
    Entertainment,
    Personal,
    Office,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Kitchen => Category::Kitchen,
            CategoryArg::Entertainment => Category::Entertainment,
            CategoryArg::Personal => Category::Personal,
            CategoryArg::Office => Category::Office,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn run_one(category: Category, config: &ModelConfig, format: OutputFormat) -> Result<String> {
    let profiles = catalog::profiles(category)
        .with_context(|| format!("Invalid {category} device table"))?;
    let run = run_category(category, &profiles, catalog::reference_gwh(category), config)
        .with_context(|| format!("{category} run failed"))?;
    match format {
        OutputFormat::Text => Ok(report::render_category(&run)),
        OutputFormat::Json => report::to_json(&run),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("appliance_energy={log_level}").into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ModelConfig::new()
        .with_seed(cli.seed)
        .with_sample_count(cli.samples)
        .with_carbon_intensity(cli.carbon_intensity);
    config.validate().context("Invalid model configuration")?;
    info!(
        seed = config.seed,
        samples = config.sample_count,
        carbon = config.carbon_intensity_kg_per_kwh,
        "appliance-energy v{}",
        env!("CARGO_PKG_VERSION")
    );

    let format = OutputFormat::from(cli.format);
    match cli.command {
        Commands::Category { name } => {
            println!("{}", run_one(name.into(), &config, format)?);
        }
        Commands::AllCategories => {
            let catalog = Catalog::builtin().context("Invalid built-in device catalog")?;
            let runs = run_catalog(&catalog, &config).context("Category runs failed")?;
            match format {
                OutputFormat::Text => {
                    for run in &runs {
                        println!("{}", report::render_category(run));
                    }
                }
                OutputFormat::Json => println!("{}", report::to_json(&runs)?),
            }
        }
        Commands::Overview { top } => {
            let catalog = Catalog::builtin().context("Invalid built-in device catalog")?;
            let run = run_combined(&catalog, &config).context("Combined analysis failed")?;
            let out = match format {
                OutputFormat::Text => report::render_combined(&run, top),
                OutputFormat::Json => report::to_json(&run)?,
            };
            println!("{out}");
        }
    }

    Ok(())
}
