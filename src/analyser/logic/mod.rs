pub mod aggregation;
pub mod interpretation;
pub mod io;
pub mod ml;
pub mod naming;
pub mod profiling;
pub mod summary;
pub mod types;

pub use aggregation::aggregate;
pub use io::{load, load_path, load_with_config};
pub use ml::fit_ols;
pub use profiling::{inspect, memory_usage};
pub use summary::summarize;
pub use types::{
    Aggregation, CategoricalSummary, CategoryOrder, CategoryValue, ChartKind, ChartPoint,
    ChartResult, ChartSeries, ChartSpec, Column, ColumnData, ColumnKind, ColumnProfile, Dataset,
    NumericSummary, RegressionDiagnostics, RegressionResult, SummaryReport,
};
