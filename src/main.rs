use analytics::{PnlEngine, ProfitStructure, ReportSummary};
use analyzer::{AbcClassifier, SkuQuery, SortField};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, ConfigOverrides};
use core_types::AbcTier;
use economics::{ReportSeed, UnitEconomicsProjector};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod io;
mod render;
mod telemetry;

/// The main entry point for the settlement reconciliation tool.
fn main() -> Result<()> {
    // SETTLEMENT__* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config_from(cli.overrides.config.as_deref())
        .context("Failed to load configuration")?;
    cli.overrides.apply(&mut config);
    config.validate()?;

    let _guard = telemetry::init(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Pnl(args) => handle_pnl(args, &config),
        Commands::Skus(args) => handle_skus(args, &config),
        Commands::Project(args) => handle_project(args, &config),
        Commands::Costs(args) => handle_costs(args),
        Commands::Snapshot(args) => handle_snapshot(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Reconciles marketplace settlement reports and projects unit economics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the profit-and-loss waterfall of a report.
    Pnl(PnlArgs),
    /// Rank SKUs by net profit and assign ABC tiers.
    Skus(SkusArgs),
    /// Project per-unit and per-day economics for a product.
    Project(ProjectArgs),
    /// Add new barcodes from a report to the cost registry and list missing costs.
    Costs(CostsArgs),
    /// Print the headline figures of a report as JSON.
    Snapshot(ReportArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Parsed report rows (JSON array). Repeat to merge several reports in order.
    #[arg(long, required = true, num_args = 1..)]
    rows: Vec<PathBuf>,

    /// Cost registry (JSON array of cost items).
    #[arg(long)]
    costs: Option<PathBuf>,
}

#[derive(Args)]
struct PnlArgs {
    #[command(flatten)]
    report: ReportArgs,

    /// Print the summary as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SkusArgs {
    #[command(flatten)]
    report: ReportArgs,

    /// Case-insensitive substring of the vendor code or title.
    #[arg(long)]
    search: Option<String>,

    /// Show a single ABC tier (A, B, C or D).
    #[arg(long)]
    tier: Option<AbcTier>,

    /// qty-sold, buyout, revenue, cogs, logistics, net-profit or margin.
    #[arg(long, default_value = "net-profit")]
    sort: SortField,

    /// Sort ascending instead of descending.
    #[arg(long)]
    asc: bool,
}

#[derive(Args)]
struct ProjectArgs {
    /// TOML file with the product model (default: the [economics] configuration section).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Report rows to seed the price, buyout and commission from.
    #[arg(long, num_args = 1..)]
    seed_rows: Vec<PathBuf>,

    /// Price to test in the hypothesis, instead of the fact price.
    #[arg(long)]
    hypothesis_price: Option<Decimal>,

    /// Print the projection as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CostsArgs {
    /// Report rows whose barcodes should be registered.
    #[arg(long, num_args = 1..)]
    rows: Vec<PathBuf>,

    /// Cost registry to update (created if missing).
    #[arg(long)]
    costs: PathBuf,

    /// Set a unit cost, as BARCODE=COST. Repeatable.
    #[arg(long = "set", value_parser = parse_cost_assignment)]
    assignments: Vec<(String, Decimal)>,

    /// Save the updated registry back to disk.
    #[arg(long)]
    write: bool,
}

fn parse_cost_assignment(raw: &str) -> Result<(String, Decimal), String> {
    let (barcode, cost) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected BARCODE=COST, got '{raw}'"))?;
    let cost: Decimal = cost
        .trim()
        .parse()
        .map_err(|e| format!("invalid cost '{cost}': {e}"))?;
    if cost < Decimal::ZERO {
        return Err(format!("cost must not be negative, got {cost}"));
    }
    Ok((barcode.trim().to_string(), cost))
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_pnl(args: PnlArgs, config: &Config) -> Result<()> {
    let rows = io::load_rows(&args.report.rows)?;
    let registry = io::load_registry(args.report.costs.as_deref())?;

    let summary = PnlEngine::new(config.report.tax_regime).aggregate(&rows, &registry);
    let structure = ProfitStructure::from_summary(&summary);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("--- P&L ({}) ---", config.report.tax_regime);
    println!("{}", render::pnl(&summary));
    println!("--- Logistics ---");
    println!("{}", render::logistics(&summary.logistics));
    println!("--- Profit Structure ---");
    println!("{}", render::structure(&structure));
    Ok(())
}

fn handle_skus(args: SkusArgs, config: &Config) -> Result<()> {
    let rows = io::load_rows(&args.report.rows)?;
    let registry = io::load_registry(args.report.costs.as_deref())?;

    let classifier = AbcClassifier::new(
        config.report.abc_a_threshold_pct,
        config.report.abc_b_threshold_pct,
    )?;
    let statements = PnlEngine::new(config.report.tax_regime).per_sku(&rows, &registry);
    let ranked = classifier.rank(statements);

    let query = SkuQuery {
        search: args.search,
        tier: args.tier,
        sort: args.sort,
        descending: !args.asc,
    };
    let view = query.apply(&ranked);

    println!("{}", render::skus(&view));
    println!("{} of {} SKUs shown.", view.len(), ranked.len());
    Ok(())
}

fn handle_project(args: ProjectArgs, config: &Config) -> Result<()> {
    let mut model = match &args.model {
        Some(path) => configuration::load_model(path)?,
        None => config.economics.clone(),
    };

    if !args.seed_rows.is_empty() {
        let rows = io::load_rows(&args.seed_rows)?;
        let seed = ReportSeed::from_rows(&rows);
        tracing::info!(
            price = %seed.avg_price,
            buyout_pct = %seed.buyout_pct,
            commission_pct = %seed.commission_pct,
            "Model seeded from report."
        );
        seed.apply_to(&mut model);
    }
    if let Some(price) = args.hypothesis_price {
        model.hypothesis.price = Some(price);
    }

    let result = UnitEconomicsProjector::new(model)?.project();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render::projection(&result));
    }
    Ok(())
}

fn handle_costs(args: CostsArgs) -> Result<()> {
    let mut registry = io::load_registry(Some(args.costs.as_path()))?;
    let now = Utc::now();

    if !args.rows.is_empty() {
        let rows = io::load_rows(&args.rows)?;
        let added = registry.sync_from_rows(&rows, now);
        println!("{added} new barcodes registered.");
    }
    for (barcode, cost) in &args.assignments {
        registry.set_cost(barcode, *cost, now)?;
    }

    let pending = registry.pending();
    let missing = pending.iter().filter(|item| item.cost.is_zero()).count();
    println!("{}", render::registry(&pending));
    println!("{missing} of {} items have no unit cost.", registry.len());

    if args.write {
        io::write_registry(&args.costs, &registry)?;
    }
    Ok(())
}

fn handle_snapshot(args: ReportArgs, config: &Config) -> Result<()> {
    let rows = io::load_rows(&args.rows)?;
    let registry = io::load_registry(args.costs.as_deref())?;

    let summary = PnlEngine::new(config.report.tax_regime).aggregate(&rows, &registry);
    let snapshot = ReportSummary::from_aggregate(&summary, &rows);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn cost_assignments_parse() {
        assert_eq!(
            parse_cost_assignment("2000000000011=312.5"),
            Ok(("2000000000011".to_string(), dec!(312.5)))
        );
        assert!(parse_cost_assignment("2000000000011").is_err());
        assert!(parse_cost_assignment("2000000000011=abc").is_err());
        assert!(parse_cost_assignment("2000000000011=-1").is_err());
    }

    #[test]
    fn skus_arguments_parse() {
        let cli = Cli::try_parse_from([
            "settlement", "--tax", "usn15", "skus", "--rows", "a.json", "b.json", "--tier", "A",
            "--sort", "margin", "--asc",
        ])
        .unwrap();

        assert_eq!(cli.overrides.tax, Some(core_types::TaxRegime::Usn15));
        match cli.command {
            Commands::Skus(args) => {
                assert_eq!(args.report.rows.len(), 2);
                assert_eq!(args.tier, Some(AbcTier::A));
                assert_eq!(args.sort, SortField::Margin);
                assert!(args.asc);
            }
            _ => panic!("expected the skus subcommand"),
        }
    }
}
