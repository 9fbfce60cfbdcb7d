//! Assembled components table: rows, columns and widget options

use crate::cell::{self, Cell};
use crate::columns::{build_columns, ColumnDef};
use crate::config::{DashboardConfig, MetricConfig, DEFAULT_ROWS_PER_PAGE};
use crate::data::ComponentRecord;
use crate::rows::{build_rows, DisplayRow};
use crate::sort::{sort_rows, SortDirection};
use serde::Serialize;

/// Options handed to the data-table widget
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub filter: bool,
    pub selectable_rows: bool,
    pub sort: bool,
    pub responsive: String,
    pub rows_per_page: usize,
    pub download: bool,
    pub print: bool,
    pub view_columns: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            filter: false,
            selectable_rows: false,
            sort: true,
            responsive: "stacked".to_string(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            download: false,
            print: false,
            view_columns: true,
        }
    }
}

/// Rows and columns ready for the data-table widget
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTable {
    pub title: String,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<DisplayRow>,
    pub options: TableOptions,
    pub detail_link: bool,
}

impl ComponentTable {
    /// Build the table. Returns `None` for an empty record list, in which
    /// case nothing should be rendered.
    pub fn build(
        title: impl Into<String>,
        records: &[ComponentRecord],
        metrics: &MetricConfig,
        detail_link: bool,
        rows_per_page: usize,
    ) -> Option<Self> {
        if records.is_empty() {
            tracing::debug!("No component records, skipping table");
            return None;
        }

        Some(Self {
            title: title.into(),
            columns: build_columns(metrics, detail_link),
            rows: build_rows(records, metrics),
            options: TableOptions {
                rows_per_page: rows_per_page.max(1),
                ..TableOptions::default()
            },
            detail_link,
        })
    }

    /// Build the table from a loaded [`DashboardConfig`]
    pub fn from_config(records: &[ComponentRecord], config: &DashboardConfig) -> Option<Self> {
        Self::build(
            config.title.clone(),
            records,
            &config.metrics,
            config.detail_link,
            config.rows_per_page,
        )
    }

    /// Row slot shown under a table column
    pub fn slot_index(&self, column_index: usize) -> usize {
        if self.detail_link {
            column_index
        } else {
            column_index + 1
        }
    }

    /// Sort rows on a table column
    pub fn sort_by_column(&mut self, column_index: usize, direction: SortDirection) {
        let slot = self.slot_index(column_index);
        sort_rows(&mut self.rows, slot, direction);
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.options.rows_per_page)
    }

    /// Rows on zero-based page `page`; empty past the last page
    pub fn page(&self, page: usize) -> &[DisplayRow] {
        let size = self.options.rows_per_page;
        let start = page.saturating_mul(size).min(self.rows.len());
        let end = start.saturating_add(size).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Render a row into one cell per column
    pub fn render_row(&self, row: &DisplayRow) -> Vec<Cell> {
        row.data(self.detail_link)
            .into_iter()
            .zip(&self.columns)
            .map(|(slot, column)| cell::render(slot, column))
            .collect()
    }

    /// Columns shown when the table first renders
    pub fn visible_columns(&self) -> impl Iterator<Item = (usize, &ColumnDef)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.default_visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellColor;
    use crate::config::MetricSpec;
    use crate::data::MetricValue;
    use pretty_assertions::assert_eq;

    fn config() -> MetricConfig {
        MetricConfig::empty()
            .with_metric("P1Defect", MetricSpec::new("P1 Defects").alert())
            .with_metric("P2Defect", MetricSpec::new("P2 Defects").hidden())
    }

    fn records(n: usize) -> Vec<ComponentRecord> {
        (0..n)
            .map(|i| {
                ComponentRecord::new(format!("Component {:02}", i), "Core", "C")
                    .with_metric("P1Defect", MetricValue::new((i % 3) as u64, "p1"))
            })
            .collect()
    }

    #[test]
    fn test_empty_records_no_table() {
        assert!(ComponentTable::build("T", &[], &config(), true, 25).is_none());
    }

    #[test]
    fn test_default_options() {
        let options = TableOptions::default();
        assert_eq!(options.rows_per_page, 25);
        assert_eq!(options.responsive, "stacked");
        assert!(options.sort);
        assert!(!options.filter);
    }

    #[test]
    fn test_pagination() {
        let table = ComponentTable::build("T", &records(30), &config(), true, 25).unwrap();

        assert_eq!(table.page_count(), 2);
        assert_eq!(table.page(0).len(), 25);
        assert_eq!(table.page(1).len(), 5);
        assert!(table.page(2).is_empty());
        assert_eq!(table.page(1)[0].header.label, "Component 25");
    }

    #[test]
    fn test_sort_without_detail_link_offsets_column() {
        let mut table = ComponentTable::build("T", &records(4), &config(), false, 25).unwrap();
        assert_eq!(table.columns.len(), 2);

        // table column 0 is the P1 metric when there is no detail-link column
        table.sort_by_column(0, SortDirection::Desc);
        let counts: Vec<_> = table
            .rows
            .iter()
            .map(|r| r.cells[0].as_ref().and_then(|v| v.count))
            .collect();
        assert_eq!(counts, vec![Some(2), Some(1), Some(0), Some(0)]);
    }

    #[test]
    fn test_render_row_aligns_with_columns() {
        let table = ComponentTable::build("T", &records(3), &config(), true, 25).unwrap();
        let cells = table.render_row(&table.rows[2]);

        assert_eq!(cells.len(), table.columns.len());
        assert_eq!(cells[0].text(), "Component 02");
        match &cells[1] {
            Cell::Metric(cell) => {
                assert_eq!(cell.text, "2");
                assert_eq!(cell.color, CellColor::Alert);
            }
            other => panic!("expected metric cell, got {:?}", other),
        }
        assert_eq!(cells[2].text(), "");
    }

    #[test]
    fn test_visible_columns_skip_hidden() {
        let table = ComponentTable::build("T", &records(1), &config(), true, 25).unwrap();
        let visible: Vec<_> = table.visible_columns().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![0, 1]);
    }

    #[test]
    fn test_from_config() {
        let config = DashboardConfig {
            rows_per_page: 2,
            detail_link: false,
            ..DashboardConfig::default()
        };
        let table = ComponentTable::from_config(&records(3), &config).unwrap();

        assert_eq!(table.title, "Components");
        assert_eq!(table.page_count(), 2);
        assert_eq!(table.columns.len(), config.metrics.len());
    }
}
