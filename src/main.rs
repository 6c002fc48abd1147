//! CorpusDash - entity and keyword analytics dashboard
//!
//! A CLI tool that loads two pre-extracted news corpora (Macron/France
//! and Poutine/Russie), aggregates their entity counts for the selected
//! filters and writes every dashboard chart as a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success (including placeholder reports for invalid selections)
//!   1 - Fatal error (bad arguments, unreadable data, unwritable output)

mod analysis;
mod cli;
mod config;
mod context;
mod dashboard;
mod loader;
mod models;
mod report;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE};
use context::DashboardContext;
use dashboard::{Dashboard, Selection};
use models::{CorpusId, ReportMetadata};
use rand::rngs::StdRng;
use rand::SeedableRng;
use report::Report;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("CorpusDash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_dashboard(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Dashboard failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .corpusdash.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize data paths, themes, heatmap keywords and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load the corpora, compute the dashboard and write the report.
async fn run_dashboard(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    println!("📥 Loading corpora...");
    let ctx = loader::load_context(&config.data)
        .await
        .context("Failed to load corpus data")?;

    if args.check {
        return handle_check(&ctx, &config);
    }

    let start_time = Instant::now();

    let seed = config.matrix.resolve_seed();
    info!("Association matrix seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let selection = Selection::parse(
        &config.dashboard.corpus,
        &config.dashboard.period,
        &config.dashboard.category,
        config.dashboard.top_n,
        args.focus.as_deref(),
    );

    let dashboard = match selection {
        Ok(selection) => {
            println!(
                "🔬 Computing dashboard: {} | period {} | {} | top {}",
                selection.corpus, selection.period, selection.category, selection.top_n
            );
            dashboard::build(&ctx, &selection, &config, &mut rng)
        }
        Err(e) => {
            warn!("Invalid selection: {}", e);
            println!("⚠️  {}", e);
            Dashboard::invalid(e.to_string())
        }
    };

    let report = Report {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            macron_source: config.data.macron_path.display().to_string(),
            poutine_source: config.data.poutine_path.display().to_string(),
            seed,
            duration_seconds: start_time.elapsed().as_secs_f64(),
        },
        dashboard,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    std::fs::write(&args.output, &output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    let kpis = &report.dashboard.kpis;
    println!("\n📊 Dashboard Summary:");
    println!("   Articles: {} over {} months", kpis.total_articles, kpis.months_covered);
    println!(
        "   Unique keywords: {} | locations: {} | organizations: {} | persons: {}",
        kpis.unique_keywords, kpis.unique_locations, kpis.unique_organizations, kpis.unique_persons
    );
    for notice in &report.dashboard.notices {
        println!("   ⚠️  {}", notice);
    }
    println!("\n✅ Report saved to: {}", args.output.display());

    Ok(0)
}

/// Handle --check: report what was loaded and exit.
fn handle_check(ctx: &DashboardContext, config: &Config) -> Result<i32> {
    println!("\n🔍 Data check\n");

    for (id, path) in [
        (CorpusId::Macron, &config.data.macron_path),
        (CorpusId::Poutine, &config.data.poutine_path),
    ] {
        let corpus = ctx.corpus(id);
        let totals = analysis::select_corpus(ctx, id.name())?;
        println!("   ✅ {} ({})", id, path.display());
        println!(
            "      └─ {} keywords, {} locations, {} organizations, {} persons",
            totals.keywords.len(),
            totals.locations.len(),
            totals.organizations.len(),
            totals.persons.len()
        );
        println!(
            "      └─ {} articles over {} calendar months",
            corpus.total_articles(),
            corpus.calendar.len()
        );
    }

    println!("\n✅ All data files are OK.");
    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
