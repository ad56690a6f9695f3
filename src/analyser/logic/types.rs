use crate::error::{AutovizError, Result};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// DATASET

#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Debug)]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Datetime,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::Categorical => "Categorical",
            Self::Datetime => "Datetime",
        }
    }

    /// Whether values of this kind have a natural numeric position on an axis.
    pub fn is_ordinal(&self) -> bool {
        matches!(self, Self::Numeric | Self::Datetime)
    }
}

/// Typed cell storage for one column. `None` marks a null cell.
#[derive(Clone, PartialEq, Debug)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Datetime(Vec<Option<NaiveDateTime>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Datetime(_) => ColumnKind::Datetime,
            Self::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Datetime(v) => v.len(),
            Self::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_null(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).is_none_or(Option::is_none),
            ColumnData::Datetime(v) => v.get(row).is_none_or(Option::is_none),
            ColumnData::Categorical(v) => v.get(row).is_none_or(Option::is_none),
        }
    }

    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_null(i)).count()
    }

    /// Position of a cell on a numeric axis. Datetimes map to epoch milliseconds.
    pub fn axis_value(&self, row: usize) -> Option<f64> {
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).copied().flatten(),
            ColumnData::Datetime(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|dt| dt.and_utc().timestamp_millis() as f64),
            ColumnData::Categorical(_) => None,
        }
    }

    /// Display form of a cell, `None` for nulls.
    pub fn display_value(&self, row: usize) -> Option<String> {
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).copied().flatten().map(crate::utils::fmt_number),
            ColumnData::Datetime(v) => v.get(row).copied().flatten().map(crate::utils::fmt_datetime),
            ColumnData::Categorical(v) => v.get(row).cloned().flatten(),
        }
    }

    /// Non-null numeric values in row order; empty for non-numeric columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        match &self.data {
            ColumnData::Numeric(v) => v.iter().flatten().copied().collect(),
            ColumnData::Datetime(_) | ColumnData::Categorical(_) => Vec::new(),
        }
    }
}

/// An immutable, fully typed table.
///
/// Column names are unique and every column has the same length. The only
/// way to build one is [`Dataset::new`], which checks both.
#[derive(Clone, PartialEq, Debug)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// # Errors
    ///
    /// Returns [`AutovizError::Parse`] if two columns share a name or the
    /// columns differ in length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);

        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(AutovizError::Parse(format!(
                    "duplicate column name '{}'",
                    col.name()
                )));
            }
            if col.len() != row_count {
                return Err(AutovizError::Parse(format!(
                    "column '{}' has {} rows, expected {row_count}",
                    col.name(),
                    col.len()
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Looks up a column or fails with [`AutovizError::InvalidAxis`].
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| AutovizError::InvalidAxis(format!("column '{name}' not found")))
    }

    /// First `limit` rows as display strings, nulls rendered empty.
    pub fn preview(&self, limit: usize) -> Vec<Vec<String>> {
        (0..self.row_count.min(limit))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.display_value(row).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

// SCHEMA

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    /// Distinct non-null values.
    pub cardinality: usize,
    pub null_count: usize,
    pub non_null_count: usize,
    pub byte_size: usize,
}

// CHARTS

#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "Bar Chart",
            Self::Line => "Line Chart",
            Self::Pie => "Pie Chart",
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Aggregation {
    Sum,
    Mean,
    Count,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Count => "count",
        }
    }
}

#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum CategoryOrder {
    /// Order in which each category first occurs in the file.
    #[default]
    FirstAppearance,
    LabelAscending,
    ValueAscending,
    ValueDescending,
}

/// What the user asked to plot.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct ChartSpec {
    pub kind: ChartKind,
    /// Category axis for bar/pie, x axis for line.
    pub x_column: String,
    /// Value axis for bar/pie, y axis for line.
    pub value_column: Option<String>,
    pub aggregation: Option<Aggregation>,
    pub order: CategoryOrder,
}

impl ChartSpec {
    pub fn bar(category: impl Into<String>, value: impl Into<String>, agg: Aggregation) -> Self {
        Self {
            kind: ChartKind::Bar,
            x_column: category.into(),
            value_column: Some(value.into()),
            aggregation: Some(agg),
            order: CategoryOrder::default(),
        }
    }

    /// Distribution of a categorical column (row count per category).
    pub fn pie(category: impl Into<String>) -> Self {
        Self {
            kind: ChartKind::Pie,
            x_column: category.into(),
            value_column: None,
            aggregation: Some(Aggregation::Count),
            order: CategoryOrder::default(),
        }
    }

    pub fn line(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            kind: ChartKind::Line,
            x_column: x.into(),
            value_column: Some(y.into()),
            aggregation: None,
            order: CategoryOrder::default(),
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: CategoryOrder) -> Self {
        self.order = order;
        self
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    /// Display form of x; differs from `x` for datetime axes.
    pub x_label: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub enum ChartSeries {
    Categories(Vec<CategoryValue>),
    Points(Vec<ChartPoint>),
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        match self {
            Self::Categories(v) => v.len(),
            Self::Points(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ChartResult {
    pub kind: ChartKind,
    pub x_column: String,
    pub value_column: Option<String>,
    pub aggregation: Option<Aggregation>,
    pub series: ChartSeries,
    /// Rows dropped because a selected column was null.
    pub excluded_rows: usize,
}

impl ChartResult {
    pub fn title(&self) -> String {
        match (&self.kind, &self.value_column) {
            (ChartKind::Line, Some(y)) => format!("{y} over {}", self.x_column),
            (ChartKind::Bar | ChartKind::Pie, Some(v)) => format!("{v} by {}", self.x_column),
            _ => format!("Distribution of {}", self.x_column),
        }
    }
}

// REGRESSION

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct RegressionResult {
    pub x_column: String,
    pub y_column: String,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub n_observations: usize,
    pub diagnostics: RegressionDiagnostics,
    pub interpretation: Vec<String>,
}

impl RegressionResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Inference statistics. Fields needing residual degrees of freedom are
/// `None` when only two observations were fitted.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Debug)]
pub struct RegressionDiagnostics {
    pub adj_r_squared: Option<f64>,
    pub residual_std_error: Option<f64>,
    pub slope_std_error: Option<f64>,
    pub intercept_std_error: Option<f64>,
    pub slope_t: Option<f64>,
    pub intercept_t: Option<f64>,
    pub slope_p_value: Option<f64>,
    pub intercept_p_value: Option<f64>,
    pub sum_squared_residuals: f64,
    pub residual_min: f64,
    pub residual_max: f64,
    pub excluded_rows: usize,
}

// SUMMARY

#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Debug)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct SummaryReport {
    pub row_count: usize,
    pub column_count: usize,
    pub numeric: IndexMap<String, NumericSummary>,
    pub categorical: IndexMap<String, CategoricalSummary>,
    pub memory_bytes: usize,
}

impl SummaryReport {
    pub fn memory_mb(&self) -> f64 {
        self.memory_bytes as f64 / (1024.0 * 1024.0)
    }
}
