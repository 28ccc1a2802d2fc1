//! Mosaic CLI - compile report visuals against CSV datasets
//!
//! Usage:
//!   mosaic inspect <data.csv>
//!   mosaic compile <data.csv> --visual <visual.toml>
//!   mosaic compile <data.csv> --dimension <col> --measure <col> [--aggregation avg]
//!
//! Examples:
//!   mosaic inspect staff.csv
//!   mosaic compile staff.csv --dimension dept --measure salary --aggregation avg
//!   mosaic compile staff.csv --visual salary_by_dept.toml --format json
//!   mosaic compile staff.csv -d dept -m salary --filter "salary:GT:60"

use clap::{Parser, Subcommand, ValueEnum};
use mosaic::config::{OutputFormat, Settings};
use mosaic::dataset::{Dataset, Value};
use mosaic::engine::compile;
use mosaic::ingest;
use mosaic::visual::{validate_config, Aggregation, ChartKind, Filter, FilterOperator, VisualConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mosaic")]
#[command(about = "Mosaic - compile report visuals into chart-ready result tables")]
#[command(version)]
struct Cli {
    /// Path to a mosaic.toml settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the columns and inferred types of a CSV file
    Inspect {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Compile a visual against a CSV file and print the result table
    Compile {
        /// Path to the CSV file
        file: PathBuf,

        /// Visual config file (.toml or .json); flags below override it
        #[arg(long)]
        visual: Option<PathBuf>,

        /// Dimension column
        #[arg(short, long)]
        dimension: Option<String>,

        /// Measure column (repeatable)
        #[arg(short, long = "measure")]
        measures: Vec<String>,

        /// Aggregation mode
        #[arg(short, long)]
        aggregation: Option<AggregationArg>,

        /// Chart kind, e.g. bar-percent
        #[arg(long)]
        chart: Option<ChartKind>,

        /// Filter as column:OPERATOR:value[:upper] (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Output format (defaults to the settings file)
        #[arg(short, long)]
        format: Option<FormatArg>,
    },
}

#[derive(Clone, ValueEnum)]
enum AggregationArg {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl From<AggregationArg> for Aggregation {
    fn from(arg: AggregationArg) -> Self {
        match arg {
            AggregationArg::Sum => Aggregation::Sum,
            AggregationArg::Avg => Aggregation::Avg,
            AggregationArg::Count => Aggregation::Count,
            AggregationArg::Min => Aggregation::Min,
            AggregationArg::Max => Aggregation::Max,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum FormatArg {
    /// Aligned text table
    Table,
    /// JSON array of rows
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Inspect { file } => cmd_inspect(&settings, &file),
        Commands::Compile {
            file,
            visual,
            dimension,
            measures,
            aggregation,
            chart,
            filters,
            format,
        } => {
            let overrides = Overrides {
                dimension,
                measures,
                aggregation: aggregation.map(Into::into),
                chart,
                filters,
            };
            let format = format.map(Into::into).unwrap_or(settings.output.format);
            cmd_compile(&settings, &file, visual.as_deref(), overrides, format)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MOSAIC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_dataset(settings: &Settings, file: &Path) -> Result<Dataset, String> {
    let options = settings.ingest.csv_options().map_err(|e| e.to_string())?;
    let (name, rows) = ingest::load_csv(file, &options)
        .map_err(|e| format!("Failed to load '{}': {}", file.display(), e))?;
    Ok(Dataset::new(name, rows))
}

fn cmd_inspect(settings: &Settings, file: &Path) -> ExitCode {
    let dataset = match load_dataset(settings, file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Dataset: {}", dataset.name());
    println!("Records: {}", dataset.row_count());
    println!();
    println!("Columns:");
    for column in dataset.columns() {
        println!("  - {} ({})", column.name, column.column_type);
    }

    ExitCode::SUCCESS
}

struct Overrides {
    dimension: Option<String>,
    measures: Vec<String>,
    aggregation: Option<Aggregation>,
    chart: Option<ChartKind>,
    filters: Vec<String>,
}

impl Overrides {
    fn apply(self, mut config: VisualConfig) -> Result<VisualConfig, String> {
        if let Some(dimension) = self.dimension {
            config = config.with_dimension(dimension);
        }
        if !self.measures.is_empty() {
            config = config.with_measures(self.measures);
        }
        if let Some(aggregation) = self.aggregation {
            config = config.with_aggregation(aggregation);
        }
        if let Some(chart) = self.chart {
            config = config.with_chart_kind(chart);
        }
        for raw in &self.filters {
            config = config.with_filter(parse_filter(raw)?);
        }
        Ok(config)
    }
}

/// Parse `column:OPERATOR:value[:upper]`.
fn parse_filter(arg: &str) -> Result<Filter, String> {
    let parts: Vec<&str> = arg.splitn(4, ':').collect();
    let (column, operator) = match parts.as_slice() {
        [column, operator, ..] => (*column, FilterOperator::parse(operator)),
        _ => return Err(format!("Invalid filter '{}': expected column:OPERATOR[:value]", arg)),
    };
    if operator == FilterOperator::Unrecognized {
        return Err(format!("Invalid filter '{}': unknown operator", arg));
    }
    let value = parts
        .get(2)
        .map(|raw| match mosaic::dataset::parse_numeric_cell(raw) {
            Some(n) => Value::Number(n),
            None => Value::Text(raw.to_string()),
        })
        .unwrap_or(Value::Text(String::new()));
    let mut filter = Filter::new(column, operator, value);
    if let Some(upper) = parts.get(3) {
        let upper = upper
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid filter '{}': upper bound is not a number", arg))?;
        filter = filter.with_secondary(upper);
    }
    Ok(filter)
}

fn read_visual(path: &Path) -> Result<VisualConfig, String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("Error reading file '{}': {}", path.display(), e))?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        serde_json::from_str(&source).map_err(|e| format!("Invalid visual '{}': {}", path.display(), e))
    } else {
        toml::from_str(&source).map_err(|e| format!("Invalid visual '{}': {}", path.display(), e))
    }
}

fn cmd_compile(
    settings: &Settings,
    file: &Path,
    visual: Option<&Path>,
    overrides: Overrides,
    format: OutputFormat,
) -> ExitCode {
    let config = visual
        .map(read_visual)
        .transpose()
        .and_then(|base| overrides.apply(base.unwrap_or_default()));
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let dataset = match load_dataset(settings, file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for warning in validate_config(&config, &dataset) {
        eprintln!("warning: {}", warning);
    }

    let table = compile(&dataset, &config);

    match format {
        OutputFormat::Table => {
            print!(
                "{}",
                table.render_text(&config.dimension, &config.measures, settings.output.precision)
            );
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&table) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing result: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
