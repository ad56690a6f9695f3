//! Per-column schema profiling.
//!
//! Byte sizes are estimates for the memory metric only:
//!
//! - numeric: 8 bytes per row
//! - datetime: 8 bytes per row (epoch milliseconds)
//! - text: UTF-8 length of every non-null value plus [`STRING_OVERHEAD_BYTES`] per row

use super::types::{Column, ColumnData, ColumnProfile, Dataset};
use std::collections::HashSet;

pub const NUMERIC_CELL_BYTES: usize = 8;
pub const DATETIME_CELL_BYTES: usize = 8;
/// Pointer, capacity and length of a `String` header.
pub const STRING_OVERHEAD_BYTES: usize = 24;

pub fn inspect(dataset: &Dataset) -> Vec<ColumnProfile> {
    dataset.columns().iter().map(profile_column).collect()
}

pub fn profile_column(col: &Column) -> ColumnProfile {
    let null_count = col.null_count();
    ColumnProfile {
        name: col.name().to_owned(),
        kind: col.kind(),
        cardinality: distinct_count(col.data()),
        null_count,
        non_null_count: col.len() - null_count,
        byte_size: estimate_bytes(col.data()),
    }
}

pub fn distinct_count(data: &ColumnData) -> usize {
    match data {
        // -0.0 and 0.0 compare equal, so normalise before hashing the bit pattern
        ColumnData::Numeric(v) => v
            .iter()
            .flatten()
            .map(|x| if *x == 0.0 { 0.0f64.to_bits() } else { x.to_bits() })
            .collect::<HashSet<_>>()
            .len(),
        ColumnData::Datetime(v) => v.iter().flatten().collect::<HashSet<_>>().len(),
        ColumnData::Categorical(v) => v.iter().flatten().collect::<HashSet<_>>().len(),
    }
}

pub fn estimate_bytes(data: &ColumnData) -> usize {
    match data {
        ColumnData::Numeric(v) => v.len() * NUMERIC_CELL_BYTES,
        ColumnData::Datetime(v) => v.len() * DATETIME_CELL_BYTES,
        ColumnData::Categorical(v) => {
            let payload: usize = v.iter().flatten().map(String::len).sum();
            payload + v.len() * STRING_OVERHEAD_BYTES
        }
    }
}

/// Total estimated footprint of the dataset.
pub fn memory_usage(dataset: &Dataset) -> usize {
    dataset
        .columns()
        .iter()
        .map(|c| estimate_bytes(c.data()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyser::logic::types::ColumnKind;

    fn text(values: &[Option<&str>]) -> ColumnData {
        ColumnData::Categorical(values.iter().map(|v| v.map(str::to_owned)).collect())
    }

    #[test]
    fn test_cardinality_ignores_nulls() {
        let data = text(&[Some("Sales"), None, Some("Sales"), Some("Marketing")]);
        assert_eq!(distinct_count(&data), 2);

        let data = ColumnData::Numeric(vec![Some(0.0), Some(-0.0), Some(1.0), None]);
        assert_eq!(distinct_count(&data), 2);
    }

    #[test]
    fn test_byte_estimates() {
        let data = ColumnData::Numeric(vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(estimate_bytes(&data), 24);

        let data = text(&[Some("ab"), None, Some("cde")]);
        assert_eq!(estimate_bytes(&data), 5 + 3 * STRING_OVERHEAD_BYTES);
    }

    #[test]
    fn test_profile_column() {
        let col = Column::new("Dept", text(&[Some("a"), Some("b"), None]));
        let profile = profile_column(&col);
        assert_eq!(profile.kind, ColumnKind::Categorical);
        assert_eq!(profile.cardinality, 2);
        assert_eq!(profile.null_count, 1);
        assert_eq!(profile.non_null_count, 2);
    }
}
