use anyhow::{Context as _, Result};
use autoviz::analyser::Workspace;
use autoviz::analyser::logic::{
    Aggregation, CategoryOrder, ChartKind, ChartResult, ChartSeries, ChartSpec, ColumnProfile,
    Dataset, RegressionResult, SummaryReport,
};
use autoviz::config::AnalysisConfig;
use autoviz::utils::{fmt_bytes, fmt_number, fmt_opt};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "autoviz",
    about = "Explore a CSV file: column types, charts, regression and summary statistics"
)]
pub struct Cli {
    /// Path to a JSON loader configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List columns with their inferred type, cardinality and memory estimate
    Inspect {
        /// CSV file to load
        file: PathBuf,
    },
    /// Show the first rows of the file as loaded
    Preview {
        file: PathBuf,

        /// Number of rows to show. Defaults to `preview_rows` from the config.
        #[arg(long)]
        rows: Option<usize>,
    },
    /// Aggregate the data the way a chart would plot it
    Chart {
        file: PathBuf,

        #[arg(long, value_enum)]
        kind: KindArg,

        /// Category column (bar, pie) or x column (line)
        #[arg(long)]
        x: String,

        /// Value column (bar) or y column (line)
        #[arg(long)]
        y: Option<String>,

        /// Aggregation for bar and pie charts. Defaults to sum with a value column, count without.
        #[arg(long, value_enum)]
        agg: Option<AggArg>,

        #[arg(long, value_enum, default_value_t = OrderArg::First)]
        order: OrderArg,
    },
    /// Fit y = intercept + slope * x by ordinary least squares
    Regress {
        file: PathBuf,

        #[arg(long)]
        x: String,

        #[arg(long)]
        y: String,
    },
    /// Descriptive statistics for every column
    Summary { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Bar,
    Line,
    Pie,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AggArg {
    Sum,
    Mean,
    Count,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OrderArg {
    /// Order of first appearance in the file
    First,
    Label,
    ValueAsc,
    ValueDesc,
}

impl From<KindArg> for ChartKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Bar => Self::Bar,
            KindArg::Line => Self::Line,
            KindArg::Pie => Self::Pie,
        }
    }
}

impl From<AggArg> for Aggregation {
    fn from(agg: AggArg) -> Self {
        match agg {
            AggArg::Sum => Self::Sum,
            AggArg::Mean => Self::Mean,
            AggArg::Count => Self::Count,
        }
    }
}

impl From<OrderArg> for CategoryOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::First => Self::FirstAppearance,
            OrderArg::Label => Self::LabelAscending,
            OrderArg::ValueAsc => Self::ValueAscending,
            OrderArg::ValueDesc => Self::ValueDescending,
        }
    }
}

impl Cli {
    /// Config from `--config`, or defaults.
    pub fn load_config(&self) -> Result<AnalysisConfig> {
        match &self.config {
            Some(path) => Ok(AnalysisConfig::load(path)?),
            None => Ok(AnalysisConfig::default()),
        }
    }
}

pub fn run(cli: Cli, config: AnalysisConfig) -> Result<()> {
    let json = cli.json;
    let workspace = Workspace::new(config);

    match cli.command {
        Commands::Inspect { file } => {
            load(&workspace, &file)?;
            let profiles = workspace.inspect()?;
            emit(json, profiles.as_slice(), print_profiles)
        }
        Commands::Preview { file, rows } => {
            let dataset = load(&workspace, &file)?;
            let limit = rows.unwrap_or(workspace.config().preview_rows);
            let preview = Preview {
                columns: dataset.column_names(),
                rows: dataset.preview(limit),
            };
            emit(json, &preview, print_preview)
        }
        Commands::Chart {
            file,
            kind,
            x,
            y,
            agg,
            order,
        } => {
            load(&workspace, &file)?;
            let spec = ChartSpec {
                kind: kind.into(),
                x_column: x,
                value_column: y,
                aggregation: agg.map(Aggregation::from),
                order: order.into(),
            };
            let chart = workspace.aggregate(&spec)?;
            emit(json, &chart, print_chart)
        }
        Commands::Regress { file, x, y } => {
            load(&workspace, &file)?;
            let fit = workspace.fit_ols(&x, &y)?;
            emit(json, &fit, print_regression)
        }
        Commands::Summary { file } => {
            load(&workspace, &file)?;
            let report = workspace.summarize()?;
            emit(json, &report, print_summary)
        }
    }
}

fn load(workspace: &Workspace, file: &Path) -> Result<Arc<Dataset>> {
    workspace
        .load_path(file)
        .with_context(|| format!("Failed to load {}", file.display()))
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, text: fn(&T)) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("Failed to serialize result")?
        );
    } else {
        text(value);
    }
    Ok(())
}

#[derive(Serialize)]
struct Preview<'a> {
    columns: Vec<&'a str>,
    rows: Vec<Vec<String>>,
}

fn print_profiles(profiles: &[ColumnProfile]) {
    println!(
        "{:<24} {:<12} {:>11} {:>7} {:>10}",
        "Column", "Type", "Cardinality", "Nulls", "Size"
    );
    for p in profiles {
        println!(
            "{:<24} {:<12} {:>11} {:>7} {:>10}",
            p.name,
            p.kind.as_str(),
            p.cardinality,
            p.null_count,
            fmt_bytes(p.byte_size)
        );
    }
}

fn print_preview(preview: &Preview<'_>) {
    println!("{}", preview.columns.join("\t"));
    for row in &preview.rows {
        println!("{}", row.join("\t"));
    }
}

fn print_chart(chart: &ChartResult) {
    println!("{} ({})", chart.title(), chart.kind.as_str());
    match &chart.series {
        ChartSeries::Categories(values) => {
            for v in values {
                println!("  {:<24} {}", v.label, fmt_number(v.value));
            }
        }
        ChartSeries::Points(points) => {
            for p in points {
                println!("  {:<24} {}", p.x_label, fmt_number(p.y));
            }
        }
    }
    if chart.excluded_rows > 0 {
        println!("{} rows with missing values excluded", chart.excluded_rows);
    }
}

fn print_regression(fit: &RegressionResult) {
    let d = &fit.diagnostics;
    println!("{} ~ {} (n = {})", fit.y_column, fit.x_column, fit.n_observations);
    println!("  slope        {:>14}   se {}", fmt_opt(Some(fit.slope)), fmt_opt(d.slope_std_error));
    println!(
        "  intercept    {:>14}   se {}",
        fmt_opt(Some(fit.intercept)),
        fmt_opt(d.intercept_std_error)
    );
    println!("  R²           {:>14}", fmt_opt(Some(fit.r_squared)));
    println!("  adj. R²      {:>14}", fmt_opt(d.adj_r_squared));
    println!("  slope p      {:>14}", fmt_opt(d.slope_p_value));
    for line in &fit.interpretation {
        println!("{line}");
    }
}

fn print_summary(report: &SummaryReport) {
    println!(
        "{} rows, {} columns, {} in memory",
        report.row_count,
        report.column_count,
        fmt_bytes(report.memory_bytes)
    );
    for (name, s) in &report.numeric {
        println!(
            "{name}: count {} mean {} std {} min {} 25% {} 50% {} 75% {} max {}",
            s.count,
            fmt_opt(s.mean),
            fmt_opt(s.std_dev),
            fmt_opt(s.min),
            fmt_opt(s.q1),
            fmt_opt(s.median),
            fmt_opt(s.q3),
            fmt_opt(s.max)
        );
    }
    for (name, s) in &report.categorical {
        println!(
            "{name}: count {} unique {} top {} freq {}",
            s.count,
            s.unique,
            s.top.as_deref().unwrap_or("—"),
            s.freq
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chart_args_parse() -> Result<()> {
        let cli = Cli::try_parse_from([
            "autoviz", "--json", "chart", "sales.csv", "--kind", "bar", "--x", "Department", "--y",
            "Profit", "--order", "value-desc",
        ])?;
        assert!(cli.json);
        let Commands::Chart { kind, order, agg, .. } = cli.command else {
            anyhow::bail!("expected chart command");
        };
        assert_eq!(ChartKind::from(kind), ChartKind::Bar);
        assert_eq!(CategoryOrder::from(order), CategoryOrder::ValueDescending);
        assert!(agg.is_none());
        Ok(())
    }
}
