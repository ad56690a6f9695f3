//! Descriptive statistics for the loaded dataset.
//!
//! Numeric columns get count, mean, sample standard deviation (n - 1), min,
//! max and linearly interpolated quartiles. Categorical columns get count,
//! unique, top and freq. Datetime columns appear in neither mapping but still
//! count towards memory usage.

use super::profiling;
use super::types::{CategoricalSummary, ColumnData, Dataset, NumericSummary, SummaryReport};
use indexmap::IndexMap;

pub fn summarize(dataset: &Dataset) -> SummaryReport {
    let mut numeric = IndexMap::new();
    let mut categorical = IndexMap::new();

    for col in dataset.columns() {
        match col.data() {
            ColumnData::Numeric(values) => {
                let present: Vec<f64> = values.iter().flatten().copied().collect();
                numeric.insert(col.name().to_owned(), describe_numeric(&present));
            }
            ColumnData::Categorical(values) => {
                categorical.insert(
                    col.name().to_owned(),
                    describe_categorical(values.iter().flatten().map(String::as_str)),
                );
            }
            ColumnData::Datetime(_) => {}
        }
    }

    let report = SummaryReport {
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        numeric,
        categorical,
        memory_bytes: profiling::memory_usage(dataset),
    };
    log::debug!(
        "Summarized {} numeric and {} categorical columns",
        report.numeric.len(),
        report.categorical.len()
    );
    report
}

pub fn describe_numeric(values: &[f64]) -> NumericSummary {
    let count = values.len();
    if count == 0 {
        return NumericSummary::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = values.iter().sum::<f64>() / count as f64;
    let std_dev = (count > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    NumericSummary {
        count,
        mean: Some(mean),
        std_dev,
        min: sorted.first().copied(),
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Linear interpolation between closest ranks at position `(n - 1) * q`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let lo = *sorted.get(lower)?;
    let hi = *sorted.get(upper)?;
    Some(lo + (hi - lo) * (pos - lower as f64))
}

/// Ties for the most frequent value go to the one seen first.
pub fn describe_categorical<'a>(values: impl Iterator<Item = &'a str>) -> CategoricalSummary {
    let mut freq: IndexMap<&str, usize> = IndexMap::new();
    let mut count = 0;
    for v in values {
        *freq.entry(v).or_insert(0) += 1;
        count += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for (value, n) in &freq {
        if top.is_none_or(|(_, best)| *n > best) {
            top = Some((*value, *n));
        }
    }

    CategoricalSummary {
        count,
        unique: freq.len(),
        top: top.map(|(v, _)| v.to_owned()),
        freq: top.map_or(0, |(_, n)| n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantiles_match_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile_sorted(&[7.0], 0.75), Some(7.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_describe_numeric() {
        let s = describe_numeric(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.count, 8);
        assert_eq!(s.mean, Some(5.0));
        let std = s.std_dev.unwrap();
        assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, Some(2.0));
        assert_eq!(s.max, Some(9.0));
        assert_eq!(s.median, Some(4.5));
    }

    #[test]
    fn test_describe_numeric_edge_cases() {
        assert_eq!(describe_numeric(&[]), NumericSummary::default());
        let single = describe_numeric(&[3.0]);
        assert_eq!(single.count, 1);
        assert_eq!(single.std_dev, None);
        assert_eq!(single.q1, Some(3.0));
    }

    #[test]
    fn test_describe_categorical_tie_goes_to_first() {
        let s = describe_categorical(["b", "a", "a", "b", "c"].into_iter());
        assert_eq!(s.count, 5);
        assert_eq!(s.unique, 3);
        assert_eq!(s.top.as_deref(), Some("b"));
        assert_eq!(s.freq, 2);
    }
}
