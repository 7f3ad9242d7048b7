//! # stockcast
//!
//! Command-line interface for the forecasting and reorder-decision operations.

use clap::{Parser, Subcommand};
use forecast_facade::{
    default_service, ArimaOrder, AutoForecastRequest, DataPoint, EvaluationRequest,
    ManualForecastRequest, Operation, ReorderAlertRequest, SeasonalOrder,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "stockcast")]
#[command(about = "Demand forecasting and reorder alerts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast a series (automatic order search unless --order is given)
    Forecast {
        /// Input file (CSV with date,value columns or JSON [{date, value}])
        #[arg(short, long)]
        input: PathBuf,

        /// Number of steps to forecast
        #[arg(short, long, default_value = "6")]
        steps: usize,

        /// Disable seasonal modeling
        #[arg(long)]
        non_seasonal: bool,

        /// Seasonal period (default: 12)
        #[arg(short, long)]
        period: Option<usize>,

        /// Prediction interval coverage in [0.5, 0.99)
        #[arg(short, long, default_value = "0.95")]
        confidence: f64,

        /// Manual order as p,d,q
        #[arg(long)]
        order: Option<String>,

        /// Manual seasonal order as P,D,Q,m (requires --order)
        #[arg(long, requires = "order")]
        seasonal_order: Option<String>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Backtest on a held-out tail of the series
    Evaluate {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of trailing points held out
        #[arg(short, long, default_value = "6")]
        test_size: usize,

        /// Disable seasonal modeling
        #[arg(long)]
        non_seasonal: bool,

        /// Seasonal period (default: 12)
        #[arg(short, long)]
        period: Option<usize>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check stock against a 30-day usage forecast
    Reorder {
        /// Daily usage history (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Units currently in stock
        #[arg(long)]
        stock: f64,

        /// Stock level that triggers a reorder
        #[arg(long)]
        reorder_point: f64,

        /// Supplier lead time in days
        #[arg(long, default_value = "3")]
        lead_time: usize,

        /// Extra buffer on top of the reorder point
        #[arg(long, default_value = "0.0")]
        safety_stock: f64,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Read `date,value` rows; empty values become missing observations
fn points_from_csv<R: Read>(reader: R) -> CliResult<Vec<DataPoint>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut points = Vec::new();
    for record in reader.deserialize() {
        let point: DataPoint = record.map_err(|e| format!("Failed to read record: {}", e))?;
        points.push(point);
    }
    Ok(points)
}

/// Read `[{date, value}]` or `{"series": [{date, value}]}`
fn points_from_json<R: Read>(reader: R) -> CliResult<Vec<DataPoint>> {
    let json: serde_json::Value =
        serde_json::from_reader(reader).map_err(|e| format!("Failed to parse JSON: {}", e))?;
    let series = match json {
        serde_json::Value::Object(mut obj) => obj
            .remove("series")
            .ok_or_else(|| "JSON object has no \"series\" field".to_string())?,
        other => other,
    };
    serde_json::from_value(series).map_err(|e| format!("Invalid series: {}", e))
}

/// Load data from file (format from the extension, CSV otherwise)
fn load_points(path: &Path) -> CliResult<Vec<DataPoint>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let reader = BufReader::new(file);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let points = match ext.as_str() {
        "json" => points_from_json(reader)?,
        _ => points_from_csv(reader)?,
    };
    tracing::info!("loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Parse a comma-separated list of exactly `N` non-negative integers
fn parse_orders<const N: usize>(raw: &str) -> CliResult<[usize; N]> {
    let parts = raw
        .split(',')
        .map(|p| p.trim().parse::<usize>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid order '{}': {}", raw, e))?;
    parts
        .try_into()
        .map_err(|_| format!("Invalid order '{}': expected {} values", raw, N))
}

/// Write results to file or stdout
fn write_output<T: Serialize>(value: &T, output: Option<&PathBuf>) -> CliResult<()> {
    if let Some(path) = output {
        let mut file = File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
        serde_json::to_writer_pretty(&mut file, value)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;
        eprintln!("Results written to {:?}", path);
    } else {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| format!("Failed to encode JSON: {}", e))?;
        println!("{}", json);
    }
    Ok(())
}

fn execute<O: Operation>(request: O) -> CliResult<O::Response> {
    request
        .execute(&default_service())
        .map_err(|e| format!("{} [{}]", e, e.code()))
}

#[allow(clippy::too_many_arguments)]
fn run_forecast(
    input: PathBuf,
    steps: usize,
    seasonal: bool,
    period: Option<usize>,
    confidence: f64,
    order: Option<String>,
    seasonal_order: Option<String>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let series = load_points(&input)?;

    let response = match order {
        Some(order) => {
            let [p, d, q] = parse_orders::<3>(&order)?;
            let seasonal_order = seasonal_order
                .map(|raw| parse_orders::<4>(&raw).map(|[sp, sd, sq, m]| SeasonalOrder::new(sp, sd, sq, m)))
                .transpose()?;
            execute(ManualForecastRequest {
                series,
                steps,
                order: ArimaOrder::new(p, d, q),
                seasonal_order,
                confidence_level: confidence,
            })?
        }
        None => execute(AutoForecastRequest {
            series,
            steps,
            seasonal,
            seasonal_period: period,
            confidence_level: confidence,
        })?,
    };

    eprintln!("Model: {}", response.model);
    write_output(&response, output.as_ref())
}

fn run_evaluate(
    input: PathBuf,
    test_size: usize,
    seasonal: bool,
    period: Option<usize>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let response = execute(EvaluationRequest {
        series: load_points(&input)?,
        test_size,
        seasonal,
        seasonal_period: period,
    })?;

    eprintln!(
        "Model: {}  MAE {:.4}  RMSE {:.4}  MAPE {:.2}%",
        response.model, response.metrics.mae, response.metrics.rmse, response.metrics.mape
    );
    write_output(&response, output.as_ref())
}

fn run_reorder(
    input: PathBuf,
    current_stock: f64,
    reorder_point: f64,
    lead_time_days: usize,
    safety_stock: f64,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let ingredient_id = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("ingredient")
        .to_string();

    let response = execute(ReorderAlertRequest {
        ingredient_id,
        current_stock,
        usage_history: load_points(&input)?,
        reorder_point,
        lead_time_days,
        safety_stock,
    })?;

    eprintln!("{}", response.alert_message);
    write_output(&response, output.as_ref())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockcast=info,forecast_core=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Forecast {
            input,
            steps,
            non_seasonal,
            period,
            confidence,
            order,
            seasonal_order,
            output,
        } => run_forecast(
            input,
            steps,
            !non_seasonal,
            period,
            confidence,
            order,
            seasonal_order,
            output,
        ),

        Commands::Evaluate {
            input,
            test_size,
            non_seasonal,
            period,
            output,
        } => run_evaluate(input, test_size, !non_seasonal, period, output),

        Commands::Reorder {
            input,
            stock,
            reorder_point,
            lead_time,
            safety_stock,
            output,
        } => run_reorder(input, stock, reorder_point, lead_time, safety_stock, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
