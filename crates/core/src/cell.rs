//! Cell rendering policy
//!
//! Turns a row slot into what the table draws in it. Painting the result
//! is left to the caller.

use crate::columns::{CellKind, ColumnDef};
use crate::data::MetricValue;
use crate::rows::{RowHeader, Slot};
use serde::Serialize;
use serde_json::Value;

/// Link target used when a cell has nothing to point at
pub const DEAD_LINK: &str = "#";

/// Text colour of a metric cell
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CellColor {
    Normal,
    Alert,
}

impl CellColor {
    pub fn css(self) -> &'static str {
        match self {
            CellColor::Normal => "blue",
            CellColor::Alert => "red",
        }
    }
}

/// Contents of the detail-link cell
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetailLink {
    /// `{product}::{component}`
    pub component_key: String,
    pub team_key: Option<Value>,
    pub label: String,
}

/// Contents of a metric cell
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricCell {
    pub text: String,
    pub href: String,
    pub color: CellColor,
}

/// A rendered cell
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Cell {
    Detail(Option<DetailLink>),
    Metric(MetricCell),
}

impl Cell {
    /// Plain-text form of the cell
    pub fn text(&self) -> &str {
        match self {
            Cell::Detail(Some(link)) => &link.label,
            Cell::Detail(None) => "",
            Cell::Metric(cell) => &cell.text,
        }
    }
}

/// Detail link for a header slot; nothing when the slot is absent
pub fn detail_link(header: Option<&RowHeader>) -> Option<DetailLink> {
    header.map(|h| DetailLink {
        component_key: format!("{}::{}", h.product, h.component),
        team_key: h.team_key.clone(),
        label: h.label.clone(),
    })
}

/// Metric cell for a value in a column of the given kind
///
/// The alert colour applies only to alert metrics with a positive count.
pub fn metric_cell(value: Option<&MetricValue>, kind: &CellKind) -> MetricCell {
    let Some(value) = value else {
        return MetricCell {
            text: String::new(),
            href: DEAD_LINK.to_string(),
            color: CellColor::Normal,
        };
    };

    let alert_metric = matches!(kind, CellKind::Metric { alert: true, .. });
    let color = if alert_metric && value.count.unwrap_or(0) > 0 {
        CellColor::Alert
    } else {
        CellColor::Normal
    };

    MetricCell {
        text: value.count.map(|c| c.to_string()).unwrap_or_default(),
        href: value.link.clone().unwrap_or_else(|| DEAD_LINK.to_string()),
        color,
    }
}

/// Render one slot under its column
pub fn render(slot: Slot<'_>, column: &ColumnDef) -> Cell {
    match (slot, &column.kind) {
        (Slot::Header(header), CellKind::DetailLink) => Cell::Detail(detail_link(Some(header))),
        (Slot::Metric(value), kind @ CellKind::Metric { .. }) => Cell::Metric(metric_cell(value, kind)),
        (Slot::Header(_), CellKind::Metric { .. }) | (Slot::Metric(_), CellKind::DetailLink) => {
            tracing::warn!("Slot does not match column '{}'", column.name);
            Cell::Detail(None)
        }
    }
}
