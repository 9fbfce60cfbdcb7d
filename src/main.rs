//! bugzilla-dashboard CLI - Bugzilla component metrics table and charts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use bugzilla_dashboard::{
    components::{
        build_columns, load_records, ChartOptions, ChartProps, ChartType, ChartView,
        ComponentTable, DashboardConfig, Dataset, SortDirection,
    },
    report::{self, OutputFormat},
};

/// bugzilla-dashboard: Bugzilla component metrics for the dashboard
#[derive(Parser, Debug)]
#[command(name = "bugzilla-dashboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the dashboard configuration JSON file
    #[arg(long, global = true, env = "BZ_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build and print the components table
    Table(TableArgs),

    /// List the table columns
    Columns(ColumnsArgs),

    /// Build a Chart.js configuration from datasets
    Chart(ChartArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Parser, Debug)]
struct TableArgs {
    /// Path to the component records JSON file
    #[arg(short, long, value_name = "FILE")]
    components: PathBuf,

    /// Leave out the detail-link column
    #[arg(long, default_value = "false")]
    no_detail_link: bool,

    /// Table column to sort on
    #[arg(long)]
    sort_column: Option<usize>,

    /// Sort direction (asc or desc)
    #[arg(long, default_value = "asc")]
    direction: SortDirection,

    /// Page to print (1-based)
    #[arg(long, default_value = "1")]
    page: usize,

    /// Output format (text, markdown, json)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ColumnsArgs {
    /// Leave out the detail-link column
    #[arg(long, default_value = "false")]
    no_detail_link: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ChartArgs {
    /// Path to the datasets JSON file; a missing file shows the loading state
    #[arg(short, long, value_name = "FILE")]
    datasets: PathBuf,

    /// Chart title
    #[arg(long, default_value = "")]
    title: String,

    /// Chart type (line, bar, scatter)
    #[arg(long = "type", default_value = "line")]
    chart_type: ChartType,

    /// Size of the loading placeholder
    #[arg(long, default_value = "8rem")]
    size: String,

    /// Path to a chart options JSON file
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Table(args) => table_command(args, config),
        Commands::Columns(args) => columns_command(args, &config),
        Commands::Chart(args) => chart_command(args),
        Commands::Config => config_command(&config),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<DashboardConfig> {
    match path {
        Some(path) => {
            debug!("Loading configuration from {:?}", path);
            DashboardConfig::load_existing(path)
                .with_context(|| format!("Failed to load configuration: {:?}", path))
        }
        None => Ok(DashboardConfig::default()),
    }
}

/// Build, sort and print the components table
fn table_command(args: TableArgs, mut config: DashboardConfig) -> Result<()> {
    let records = load_records(&args.components)
        .with_context(|| format!("Failed to load component records: {:?}", args.components))?;

    info!("Loaded {} components", records.len());

    if args.no_detail_link {
        config.detail_link = false;
    }

    let Some(mut table) = ComponentTable::from_config(&records, &config) else {
        println!("No components.");
        return Ok(());
    };

    if let Some(column) = args.sort_column {
        report::check_column(&table, column)?;
        debug!("Sorting on column {} {}", column, args.direction);
        table.sort_by_column(column, args.direction);
    }

    if args.page == 0 {
        warn!("Pages are numbered from 1, showing the first page");
    }

    let output = report::render_table(&table, args.page.saturating_sub(1), args.format)
        .with_context(|| "Failed to render table")?;
    println!("{}", output);

    Ok(())
}

/// Print the column definitions
fn columns_command(args: ColumnsArgs, config: &DashboardConfig) -> Result<()> {
    let detail_link = config.detail_link && !args.no_detail_link;
    let columns = build_columns(&config.metrics, detail_link);

    println!("{}", report::render_columns(&columns, args.format)?);

    Ok(())
}

/// Print the Chart.js configuration for a datasets file
fn chart_command(args: ChartArgs) -> Result<()> {
    let datasets: Option<Vec<Dataset>> = if args.datasets.exists() {
        let content = std::fs::read_to_string(&args.datasets)
            .with_context(|| format!("Failed to read datasets file: {:?}", args.datasets))?;
        Some(serde_json::from_str(&content).with_context(|| "Failed to parse datasets")?)
    } else {
        info!("Datasets file {:?} not found, chart is loading", args.datasets);
        None
    };

    let options: ChartOptions = match &args.options {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read chart options: {:?}", path))?;
            serde_json::from_str(&content).with_context(|| "Failed to parse chart options")?
        }
        None => ChartOptions::default(),
    };

    let props = ChartProps {
        title: args.title,
        chart_type: args.chart_type,
        size: args.size,
        options,
    };

    let view = ChartView::build(datasets, &props).with_context(|| "Failed to build chart")?;
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}

/// Print the configuration in effect
fn config_command(config: &DashboardConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
