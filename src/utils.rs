use chrono::{NaiveDateTime, NaiveTime, Timelike as _};

/// Formats an optional f64 to 4 decimal places, or returns "—" if None or non-finite.
pub fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.4}"),
        _ => "—".to_owned(),
    }
}

/// Whole numbers print without a fractional part so they group the way they read in the file.
/// Negative zero prints as `0`.
pub fn fmt_number(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        v.to_string()
    }
}

/// Midnight prints as a bare date; sub-second parts print only when present.
pub fn fmt_datetime(dt: NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}

pub fn fmt_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.2} {}", UNITS.get(unit).copied().unwrap_or("GB"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fmt_number() {
        assert_eq!(fmt_number(85000.0), "85000");
        assert_eq!(fmt_number(-3.0), "-3");
        assert_eq!(fmt_number(2.5), "2.5");
        assert_eq!(fmt_number(-0.0), "0");
    }

    #[test]
    fn test_fmt_datetime_drops_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(fmt_datetime(date.and_time(NaiveTime::MIN)), "2024-03-01");
        let dt = date.and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(fmt_datetime(dt), "2024-03-01 08:30:00");
        let dt = date.and_hms_milli_opt(8, 30, 0, 250).unwrap();
        assert_eq!(fmt_datetime(dt), "2024-03-01 08:30:00.250");
    }

    #[test]
    fn test_fmt_bytes() {
        assert_eq!(fmt_bytes(512), "512 B");
        assert_eq!(fmt_bytes(2048), "2.00 KB");
        assert_eq!(fmt_bytes(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(1.23456)), "1.2346");
        assert_eq!(fmt_opt(None), "—");
        assert_eq!(fmt_opt(Some(f64::NAN)), "—");
    }
}
