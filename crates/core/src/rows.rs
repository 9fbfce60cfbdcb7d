//! Row construction for the components table
//!
//! Each row is a header slot describing the component followed by one
//! metric slot per configured metric, in configuration order.

use crate::collate::locale_compare;
use crate::config::MetricConfig;
use crate::data::{ComponentRecord, MetricValue, OneOrMany};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Header slot of a row, used by the detail-link cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RowHeader {
    pub label: String,
    pub component: OneOrMany,
    pub product: OneOrMany,
    pub metrics: BTreeMap<String, MetricValue>,
    pub team_key: Option<Value>,
}

/// Borrowed view of one slot of a [`DisplayRow`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<'a> {
    Header(&'a RowHeader),
    /// `None` when the record has no value for the metric
    Metric(Option<&'a MetricValue>),
}

/// A single table row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayRow {
    pub header: RowHeader,
    /// Metric values in [`MetricConfig`] order
    pub cells: Vec<Option<MetricValue>>,
}

impl DisplayRow {
    /// Number of slots, header included
    pub fn len(&self) -> usize {
        self.cells.len() + 1
    }

    /// A row always has its header slot
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Slot at `index`; 0 is the header, `None` past the end
    pub fn slot(&self, index: usize) -> Option<Slot<'_>> {
        match index {
            0 => Some(Slot::Header(&self.header)),
            i => self.cells.get(i - 1).map(|cell| Slot::Metric(cell.as_ref())),
        }
    }

    /// Slots laid out for the table's columns. Without the detail-link
    /// column the header slot is left out so data and columns line up.
    pub fn data(&self, detail_link: bool) -> Vec<Slot<'_>> {
        let skip = usize::from(!detail_link);
        (skip..self.len()).filter_map(|i| self.slot(i)).collect()
    }
}

/// Build the table rows: records sorted by label, then one slot per
/// configured metric
pub fn build_rows(records: &[ComponentRecord], config: &MetricConfig) -> Vec<DisplayRow> {
    let mut sorted: Vec<&ComponentRecord> = records.iter().collect();
    sorted.sort_by(|a, b| locale_compare(&a.label, &b.label));

    let rows: Vec<DisplayRow> = sorted
        .into_iter()
        .map(|record| DisplayRow {
            header: RowHeader {
                label: record.label.clone(),
                component: record.component.clone(),
                product: record.product.clone(),
                metrics: record.metrics.clone(),
                team_key: record.team_key.clone(),
            },
            cells: config
                .keys()
                .map(|key| record.metrics.get(key).cloned())
                .collect(),
        })
        .collect();

    tracing::debug!(
        "Built {} rows with {} metric slots each",
        rows.len(),
        config.len()
    );

    rows
}
