//! Column sorting for the components table

use crate::collate::locale_compare;
use crate::error::{Error, Result};
use crate::rows::{DisplayRow, Slot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction requested by the table
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Key a slot sorts by. Absent counts sort below every present count.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Label(&'a str),
    Count(Option<u64>),
}

fn sort_key<'a>(row: &'a DisplayRow, column_index: usize) -> Option<SortKey<'a>> {
    match row.slot(column_index)? {
        Slot::Header(header) => Some(SortKey::Label(&header.label)),
        Slot::Metric(value) => Some(SortKey::Count(value.and_then(|v| v.count))),
    }
}

/// Compare two rows on one column
///
/// Column 0 compares labels, metric columns compare counts. Equal keys
/// return `Equal` so a stable sort keeps their relative order. An index
/// past the end of the rows compares everything as equal.
pub fn compare_rows(
    a: &DisplayRow,
    b: &DisplayRow,
    column_index: usize,
    direction: SortDirection,
) -> Ordering {
    let ordering = match (sort_key(a, column_index), sort_key(b, column_index)) {
        (Some(SortKey::Label(x)), Some(SortKey::Label(y))) => locale_compare(x, y),
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    };

    direction.apply(ordering)
}

/// Stable in-place sort of rows on one column
pub fn sort_rows(rows: &mut [DisplayRow], column_index: usize, direction: SortDirection) {
    tracing::debug!("Sorting {} rows on column {} {}", rows.len(), column_index, direction);
    rows.sort_by(|a, b| compare_rows(a, b, column_index, direction));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MetricConfig, MetricSpec};
    use crate::data::{ComponentRecord, MetricValue};
    use crate::rows::build_rows;
    use pretty_assertions::assert_eq;

    fn config() -> MetricConfig {
        MetricConfig::empty()
            .with_metric("p1", MetricSpec::new("P1"))
            .with_metric("p2", MetricSpec::new("P2"))
    }

    fn rows() -> Vec<DisplayRow> {
        let records = vec![
            ComponentRecord::new("Audio", "Core", "Audio")
                .with_metric("p1", MetricValue::new(5, "a")),
            ComponentRecord::new("Bookmarks", "Firefox", "Bookmarks"),
            ComponentRecord::new("css", "Core", "CSS")
                .with_metric("p1", MetricValue::new(0, "c"))
                .with_metric("p2", MetricValue::new(4, "c2")),
            ComponentRecord::new("DOM", "Core", "DOM")
                .with_metric("p1", MetricValue::new(5, "d")),
        ];
        build_rows(&records, &config())
    }

    fn labels(rows: &[DisplayRow]) -> Vec<&str> {
        rows.iter().map(|r| r.header.label.as_str()).collect()
    }

    #[test]
    fn test_absent_sorts_first_ascending() {
        let rows = rows();
        let audio = &rows[0];
        let bookmarks = &rows[1];

        assert_eq!(compare_rows(bookmarks, audio, 1, SortDirection::Asc), Ordering::Less);
        assert_eq!(compare_rows(audio, bookmarks, 1, SortDirection::Asc), Ordering::Greater);
    }

    #[test]
    fn test_absent_below_zero() {
        let rows = rows();
        // Bookmarks has no p1, css has p1 = 0
        assert_eq!(compare_rows(&rows[1], &rows[2], 1, SortDirection::Asc), Ordering::Less);
    }

    #[test]
    fn test_direction_inverts() {
        let rows = rows();
        for i in 0..rows[0].len() {
            for a in &rows {
                for b in &rows {
                    assert_eq!(
                        compare_rows(a, b, i, SortDirection::Desc),
                        compare_rows(a, b, i, SortDirection::Asc).reverse()
                    );
                }
            }
        }
    }

    #[test]
    fn test_antisymmetric() {
        let rows = rows();
        for i in 0..rows[0].len() {
            for a in &rows {
                for b in &rows {
                    assert_eq!(
                        compare_rows(a, b, i, SortDirection::Asc),
                        compare_rows(b, a, i, SortDirection::Asc).reverse()
                    );
                }
            }
        }
    }

    #[test]
    fn test_equal_counts_are_equal() {
        let rows = rows();
        // Audio and DOM both have p1 = 5
        assert_eq!(compare_rows(&rows[0], &rows[3], 1, SortDirection::Asc), Ordering::Equal);
        assert_eq!(compare_rows(&rows[0], &rows[3], 1, SortDirection::Desc), Ordering::Equal);
    }

    #[test]
    fn test_sort_rows_stable() {
        let mut rows = rows();
        sort_rows(&mut rows, 1, SortDirection::Desc);
        assert_eq!(labels(&rows), vec!["Audio", "DOM", "css", "Bookmarks"]);

        sort_rows(&mut rows, 1, SortDirection::Asc);
        assert_eq!(labels(&rows), vec!["Bookmarks", "css", "Audio", "DOM"]);
    }

    #[test]
    fn test_header_column_sorts_by_label() {
        let mut rows = rows();
        sort_rows(&mut rows, 0, SortDirection::Desc);
        assert_eq!(labels(&rows), vec!["DOM", "css", "Bookmarks", "Audio"]);
    }

    #[test]
    fn test_out_of_range_column() {
        let rows = rows();
        assert_eq!(compare_rows(&rows[0], &rows[2], 9, SortDirection::Asc), Ordering::Equal);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!(matches!(
            "up".parse::<SortDirection>(),
            Err(Error::InvalidDirection(_))
        ));
    }
}
