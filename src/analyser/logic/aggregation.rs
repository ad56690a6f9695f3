//! Reduces dataset rows into chart-ready series.
//!
//! Bar and pie charts group rows by the category column and fold the value
//! column with a [`Aggregation`] function. Line charts keep every row as an
//! `(x, y)` point sorted by x. Rows with a null in any selected column are
//! left out and counted in [`ChartResult::excluded_rows`].

use super::types::{
    Aggregation, CategoryOrder, CategoryValue, ChartKind, ChartPoint, ChartResult, ChartSeries,
    ChartSpec, Column, ColumnKind, Dataset,
};
use crate::error::{AutovizError, Result};
use indexmap::IndexMap;

/// # Errors
///
/// [`AutovizError::InvalidAxis`] when a named column is missing or a required
/// value column is not named; [`AutovizError::TypeMismatch`] when a column's
/// kind does not suit the chart.
pub fn aggregate(dataset: &Dataset, spec: &ChartSpec) -> Result<ChartResult> {
    let x = dataset.require_column(&spec.x_column)?;
    let value = spec
        .value_column
        .as_deref()
        .map(|name| dataset.require_column(name))
        .transpose()?;

    let result = match spec.kind {
        ChartKind::Bar | ChartKind::Pie => aggregate_categories(spec, x, value)?,
        ChartKind::Line => aggregate_points(spec, x, value)?,
    };

    log::info!(
        "Generated {}: {} entries, {} rows excluded",
        spec.kind.as_str(),
        result.series.len(),
        result.excluded_rows
    );
    Ok(result)
}

#[derive(Default)]
struct GroupAcc {
    sum: f64,
    count: usize,
}

fn aggregate_categories(spec: &ChartSpec, x: &Column, value: Option<&Column>) -> Result<ChartResult> {
    if spec.kind == ChartKind::Pie && x.kind() != ColumnKind::Categorical {
        return Err(AutovizError::type_mismatch(
            x.name(),
            ColumnKind::Categorical.as_str(),
            x.kind(),
        ));
    }

    let agg = spec.aggregation.unwrap_or(if value.is_some() {
        Aggregation::Sum
    } else {
        Aggregation::Count
    });

    if agg != Aggregation::Count {
        let Some(v) = value else {
            return Err(AutovizError::InvalidAxis(format!(
                "{} with {} requires a value column",
                spec.kind.as_str(),
                agg.as_str()
            )));
        };
        if v.kind() != ColumnKind::Numeric {
            return Err(AutovizError::type_mismatch(
                v.name(),
                ColumnKind::Numeric.as_str(),
                v.kind(),
            ));
        }
    }

    let mut groups: IndexMap<String, GroupAcc> = IndexMap::new();
    let mut excluded_rows = 0;

    for row in 0..x.len() {
        let Some(label) = x.display_value(row) else {
            excluded_rows += 1;
            continue;
        };
        let amount = match value {
            Some(v) if v.is_null(row) => {
                excluded_rows += 1;
                continue;
            }
            Some(v) => v.axis_value(row).unwrap_or(0.0),
            None => 0.0,
        };

        let acc = groups.entry(label).or_default();
        acc.sum += amount;
        acc.count += 1;
    }

    let mut values: Vec<CategoryValue> = groups
        .into_iter()
        .map(|(label, acc)| CategoryValue {
            label,
            value: match agg {
                Aggregation::Sum => acc.sum,
                Aggregation::Mean => acc.sum / acc.count as f64,
                Aggregation::Count => acc.count as f64,
            },
        })
        .collect();

    match spec.order {
        CategoryOrder::FirstAppearance => {}
        CategoryOrder::LabelAscending => values.sort_by(|a, b| a.label.cmp(&b.label)),
        CategoryOrder::ValueAscending => values.sort_by(|a, b| a.value.total_cmp(&b.value)),
        CategoryOrder::ValueDescending => values.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }

    Ok(ChartResult {
        kind: spec.kind,
        x_column: x.name().to_owned(),
        value_column: value.map(|v| v.name().to_owned()),
        aggregation: Some(agg),
        series: ChartSeries::Categories(values),
        excluded_rows,
    })
}

fn aggregate_points(spec: &ChartSpec, x: &Column, value: Option<&Column>) -> Result<ChartResult> {
    if !x.kind().is_ordinal() {
        return Err(AutovizError::type_mismatch(
            x.name(),
            "Numeric or Datetime",
            x.kind(),
        ));
    }
    let Some(y) = value else {
        return Err(AutovizError::InvalidAxis(
            "Line Chart requires a y column".to_owned(),
        ));
    };
    if y.kind() != ColumnKind::Numeric {
        return Err(AutovizError::type_mismatch(
            y.name(),
            ColumnKind::Numeric.as_str(),
            y.kind(),
        ));
    }
    if spec.aggregation.is_some() {
        log::debug!("Aggregation is ignored for line charts");
    }

    let mut points = Vec::with_capacity(x.len());
    let mut excluded_rows = 0;

    for row in 0..x.len() {
        match (x.axis_value(row), y.axis_value(row), x.display_value(row)) {
            (Some(px), Some(py), Some(x_label)) => points.push(ChartPoint {
                x: px,
                y: py,
                x_label,
            }),
            _ => excluded_rows += 1,
        }
    }

    // sort_by is stable: equal x keep file order
    points.sort_by(|a, b| a.x.total_cmp(&b.x));

    Ok(ChartResult {
        kind: ChartKind::Line,
        x_column: x.name().to_owned(),
        value_column: Some(y.name().to_owned()),
        aggregation: None,
        series: ChartSeries::Points(points),
        excluded_rows,
    })
}
