use super::{SAMPLE_CSV, sample};
use crate::analyser::logic::*;
use crate::config::{AnalysisConfig, DuplicateHeaders};
use crate::error::{AutovizError, Result};
use chrono::NaiveDate;

#[test]
fn test_sample_shape() {
    let ds = sample();
    assert_eq!(ds.row_count(), 6);
    assert_eq!(ds.column_count(), 5);
    assert_eq!(
        ds.column_names(),
        vec!["Department", "Month", "Revenue", "Expenses", "Profit"]
    );
}

#[test]
fn test_numeric_inference_with_nulls() -> Result<()> {
    let ds = load(b"a,b\n1,x\n,y\nNA,z\n2.5,w\n")?;
    let a = ds.column("a").unwrap();
    assert_eq!(a.kind(), ColumnKind::Numeric);
    assert_eq!(
        a.data(),
        &ColumnData::Numeric(vec![Some(1.0), None, None, Some(2.5)])
    );
    Ok(())
}

#[test]
fn test_one_bad_value_makes_column_text() -> Result<()> {
    let ds = load(b"a\n1\n2\nthree\n")?;
    assert_eq!(ds.column("a").unwrap().kind(), ColumnKind::Categorical);
    Ok(())
}

#[test]
fn test_non_finite_numbers_are_text() -> Result<()> {
    let ds = load(b"a\n1\ninf\n")?;
    assert_eq!(ds.column("a").unwrap().kind(), ColumnKind::Categorical);
    Ok(())
}

#[test]
fn test_all_null_column_is_numeric() -> Result<()> {
    let ds = load(b"a,b\n1,\n2,\n")?;
    let b = ds.column("b").unwrap();
    assert_eq!(b.kind(), ColumnKind::Numeric);
    assert_eq!(b.null_count(), 2);
    Ok(())
}

#[test]
fn test_datetime_inference() -> Result<()> {
    let ds = load(b"day,ts\n2024-01-05,2024-01-05T10:00:00Z\n2024-02-29,2024-01-06T11:30:00+02:00\n")?;

    let day = ds.column("day").unwrap();
    assert_eq!(day.kind(), ColumnKind::Datetime);
    let expected = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(day.data(), &ColumnData::Datetime(vec![
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(0, 0, 0),
        Some(expected),
    ]));

    let ts = ds.column("ts").unwrap();
    assert_eq!(ts.kind(), ColumnKind::Datetime);
    // offsets normalise to UTC
    assert_eq!(ts.display_value(1).as_deref(), Some("2024-01-06 09:30:00"));
    Ok(())
}

#[test]
fn test_datetime_needs_single_format() -> Result<()> {
    // day-first and ISO mixed in one column: no single format parses both
    let ds = load(b"d\n2024-01-05\n31/12/2024\n")?;
    assert_eq!(ds.column("d").unwrap().kind(), ColumnKind::Categorical);
    Ok(())
}

#[test]
fn test_month_names_stay_categorical() {
    let ds = sample();
    assert_eq!(ds.column("Month").unwrap().kind(), ColumnKind::Categorical);
}

#[test]
fn test_inconsistent_row_length_is_parse_error() {
    let res = load(b"a,b,c\n1,2,3\n4,5\n");
    assert!(matches!(res, Err(AutovizError::Parse(_))));
}

#[test]
fn test_invalid_utf8_is_parse_error() {
    let res = load(b"a,b\n1,\xff\xfe\n");
    assert!(matches!(res, Err(AutovizError::Parse(_))));
}

#[test]
fn test_empty_inputs() {
    assert!(matches!(load(b""), Err(AutovizError::EmptyInput)));
    assert!(matches!(load(b"a,b,c\n"), Err(AutovizError::EmptyInput)));
    assert!(matches!(load(b"a,b\n,\nNA,\n"), Err(AutovizError::EmptyInput)));
}

#[test]
fn test_blank_and_empty_rows_dropped() -> Result<()> {
    let ds = load(b"a,b\n1,x\n\n,\n2,y\n")?;
    assert_eq!(ds.row_count(), 2);

    let keep_all = AnalysisConfig {
        drop_empty_rows: false,
        ..Default::default()
    };
    let ds = load_with_config(b"a,b\n1,x\n,\n2,y\n", &keep_all)?;
    assert_eq!(ds.row_count(), 3);
    Ok(())
}

#[test]
fn test_bom_and_whitespace_trimmed() -> Result<()> {
    let ds = load(b"\xEF\xBB\xBF name , value \n alpha , 1 \n")?;
    assert_eq!(ds.column_names(), vec!["name", "value"]);
    assert_eq!(ds.column("name").unwrap().display_value(0).as_deref(), Some("alpha"));
    assert_eq!(ds.column("value").unwrap().kind(), ColumnKind::Numeric);
    Ok(())
}

#[test]
fn test_quoted_fields() -> Result<()> {
    let ds = load(b"label,v\n\"Smith, J\",1\n\"line\nbreak\",2\n")?;
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.column("label").unwrap().display_value(0).as_deref(), Some("Smith, J"));
    Ok(())
}

#[test]
fn test_duplicate_headers_renamed_by_default() -> Result<()> {
    let ds = load(b"x,x,y\n1,2,3\n")?;
    assert_eq!(ds.column_names(), vec!["x", "x_1", "y"]);
    assert_eq!(ds.column("x_1").unwrap().axis_value(0), Some(2.0));
    Ok(())
}

#[test]
fn test_duplicate_headers_rejected_when_configured() {
    let config = AnalysisConfig {
        duplicate_headers: DuplicateHeaders::Reject,
        ..Default::default()
    };
    let res = load_with_config(b"x,x\n1,2\n", &config);
    assert!(matches!(res, Err(AutovizError::Parse(_))));
}

#[test]
fn test_custom_null_tokens() -> Result<()> {
    let config = AnalysisConfig {
        null_tokens: vec!["missing".to_owned()],
        ..Default::default()
    };
    let ds = load_with_config(b"a,b\n1,x\nmissing,y\nNA,z\n", &config)?;
    assert_eq!(ds.row_count(), 3);
    // NA is no longer a null token, so the column cannot be numeric
    assert_eq!(ds.column("a").unwrap().kind(), ColumnKind::Categorical);
    assert_eq!(ds.column("a").unwrap().null_count(), 1);
    assert_eq!(ds.column("b").unwrap().null_count(), 0);
    Ok(())
}

#[test]
fn test_load_path_roundtrip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sales.csv");
    std::fs::write(&path, SAMPLE_CSV)?;

    let ds = load_path(&path, &AnalysisConfig::default())?;
    assert_eq!(ds, sample());
    Ok(())
}

#[test]
fn test_load_path_missing_file() {
    let res = load_path(
        std::path::Path::new("does/not/exist.csv"),
        &AnalysisConfig::default(),
    );
    assert!(matches!(res, Err(AutovizError::Io(_))));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn csv_from(columns: usize, rows: &[Vec<i32>]) -> String {
        let header: Vec<String> = (0..columns).map(|c| format!("c{c}")).collect();
        let mut csv = header.join(",");
        csv.push('\n');
        for row in rows {
            let cells: Vec<String> = row.iter().take(columns).map(i32::to_string).collect();
            csv.push_str(&cells.join(","));
            csv.push('\n');
        }
        csv
    }

    proptest! {
        #[test]
        fn prop_shape_matches_generated_csv(
            (columns, rows) in (1usize..8).prop_flat_map(|columns| (
                Just(columns),
                prop::collection::vec(prop::collection::vec(-1000i32..1000, columns), 1..40),
            ))
        ) {
            let ds = load(csv_from(columns, &rows).as_bytes()).unwrap();
            prop_assert_eq!(ds.row_count(), rows.len());
            prop_assert_eq!(ds.column_count(), columns);
            for col in ds.columns() {
                prop_assert_eq!(col.len(), rows.len());
                prop_assert_eq!(col.kind(), ColumnKind::Numeric);
            }
        }
    }
}
