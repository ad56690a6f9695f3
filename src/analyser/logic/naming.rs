use crate::config::DuplicateHeaders;
use crate::error::{AutovizError, Result};
use std::collections::HashSet;

/// Cleans raw header cells into unique column names.
///
/// Blank headers become `Unnamed: <index>`. Repeated names are either renamed
/// with a numeric suffix (`Revenue`, `Revenue_1`, `Revenue_2`) or rejected,
/// depending on `policy`. A suffix that would collide with a name appearing
/// anywhere in the header is skipped.
pub fn resolve_column_names(raw: &[String], policy: DuplicateHeaders) -> Result<Vec<String>> {
    let base_names: Vec<String> = raw
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                format!("Unnamed: {i}")
            } else {
                trimmed.to_owned()
            }
        })
        .collect();

    let reserved: HashSet<&str> = base_names.iter().map(String::as_str).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut resolved = Vec::with_capacity(base_names.len());

    for base in &base_names {
        if !seen.contains(base) {
            seen.insert(base.clone());
            resolved.push(base.clone());
            continue;
        }

        if policy == DuplicateHeaders::Reject {
            return Err(AutovizError::Parse(format!("duplicate column name '{base}'")));
        }

        let mut count = 0;
        let mut candidate = base.clone();
        while seen.contains(&candidate) || reserved.contains(candidate.as_str()) {
            count += 1;
            candidate = format!("{base}_{count}");
        }

        log::debug!("Renamed duplicate column '{base}' to '{candidate}'");
        seen.insert(candidate.clone());
        resolved.push(candidate);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_unique_names_pass_through() {
        let out = resolve_column_names(&names(&["a", " b ", "c"]), DuplicateHeaders::Rename).unwrap();
        assert_eq!(out, names(&["a", "b", "c"]));
    }

    #[test]
    fn test_duplicates_get_suffixes() {
        let out =
            resolve_column_names(&names(&["x", "x", "y", "x"]), DuplicateHeaders::Rename).unwrap();
        assert_eq!(out, names(&["x", "x_1", "y", "x_2"]));
    }

    #[test]
    fn test_suffix_skips_existing_header() {
        let out =
            resolve_column_names(&names(&["x", "x", "x_1"]), DuplicateHeaders::Rename).unwrap();
        assert_eq!(out, names(&["x", "x_2", "x_1"]));
    }

    #[test]
    fn test_blank_headers_are_named_by_position() {
        let out = resolve_column_names(&names(&["", "b", "  "]), DuplicateHeaders::Rename).unwrap();
        assert_eq!(out, names(&["Unnamed: 0", "b", "Unnamed: 2"]));
    }

    #[test]
    fn test_reject_policy() {
        let res = resolve_column_names(&names(&["a", "a"]), DuplicateHeaders::Reject);
        assert!(matches!(res, Err(AutovizError::Parse(msg)) if msg.contains("'a'")));
    }
}
