mod commands;
mod output;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "aroma",
    version,
    about = "Safety and daily-usage checks for essential-oil formulas"
)]
struct Cli {
    /// Log engine decisions (debug level) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the formula catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Safety assessment of one catalog formula
    Assess {
        /// Formula id (e.g. "formula-a")
        formula_id: String,

        /// Formula catalog JSON (default: built-in catalog)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Custom limits table JSON (default: built-in table)
        #[arg(long, value_name = "FILE")]
        limits: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Daily skin-contact exposure per scenario of a plan file
    Usage {
        /// Plan file (JSON, possibly wrapped in text)
        plan_file: PathBuf,

        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        limits: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Validate a plan file against the catalog and selected usage types
    Validate {
        /// Plan file (JSON, possibly wrapped in text)
        plan_file: PathBuf,

        /// Usage types the user selected (e.g. 涂抹, 扩香)
        #[arg(short, long = "usage", value_name = "TYPE", required = true)]
        usage: Vec<String>,

        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect and validate limits tables
    Limits {
        #[command(subcommand)]
        action: LimitsAction,
    },
    /// Oil volume and drop count for a blend
    Dilute {
        /// Total blend volume in ml
        total_ml: Decimal,

        /// Target concentration in %
        pct: Decimal,

        /// Drops per ml
        #[arg(long, default_value_t = aroma_core::dilution::DEFAULT_DROPS_PER_ML)]
        dpm: u32,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List formulas with medium, oil volume and daily dose
    List {
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        limits: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum LimitsAction {
    /// Print a limits table (default: built-in preset)
    Show {
        /// Preset name
        #[arg(short, long, default_value = "default")]
        preset: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Validate a custom limits file
    Validate {
        /// Path to JSON limits file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { catalog, limits } => {
                commands::catalog::list(catalog.as_deref(), limits.as_deref())
            }
        },
        Commands::Assess {
            formula_id,
            catalog,
            limits,
            output,
        } => commands::assess::run(&formula_id, catalog.as_deref(), limits.as_deref(), &output),
        Commands::Usage {
            plan_file,
            catalog,
            limits,
            output,
        } => commands::usage::run(&plan_file, catalog.as_deref(), limits.as_deref(), &output),
        Commands::Validate {
            plan_file,
            usage,
            catalog,
            output,
        } => commands::validate::run(&plan_file, &usage, catalog.as_deref(), &output),
        Commands::Limits { action } => match action {
            LimitsAction::Show { preset, output } => commands::limits::show(&preset, &output),
            LimitsAction::Validate { file } => commands::limits::validate(&file),
        },
        Commands::Dilute { total_ml, pct, dpm } => commands::dilute::run(total_ml, pct, dpm),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
