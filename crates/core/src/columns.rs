//! Column definitions for the components table

use crate::config::MetricConfig;
use serde::{Deserialize, Serialize};

/// What a column's cells show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cellKind", rename_all = "kebab-case")]
pub enum CellKind {
    /// Link to the component's detail view, built from the header slot
    DetailLink,
    /// Count of one metric, linked to its Bugzilla query
    Metric { key: String, alert: bool },
}

/// A single table column, shaped like the data-table widget's column
/// options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub name: String,
    pub label: String,
    /// Listed in the view-columns toggle (the config's `hidden` flag)
    #[serde(rename = "viewColumns")]
    pub toggleable: bool,
    /// Shown when the table first renders
    #[serde(rename = "display")]
    pub default_visible: bool,
    pub filter: bool,
    #[serde(flatten)]
    pub kind: CellKind,
}

impl ColumnDef {
    /// The leading detail-link column: unnamed, always shown, never
    /// filterable or toggleable
    pub fn detail_link() -> Self {
        Self {
            name: String::new(),
            label: String::new(),
            toggleable: false,
            default_visible: true,
            filter: false,
            kind: CellKind::DetailLink,
        }
    }

    /// Same as `toggleable`, under the configuration's name for it
    pub fn hidden(&self) -> bool {
        self.toggleable
    }

    /// Metric key for metric columns
    pub fn metric_key(&self) -> Option<&str> {
        match &self.kind {
            CellKind::Metric { key, .. } => Some(key),
            CellKind::DetailLink => None,
        }
    }
}

/// Build the column list: an optional detail-link column followed by one
/// column per configured metric, in configuration order
pub fn build_columns(config: &MetricConfig, detail_link: bool) -> Vec<ColumnDef> {
    let leading = detail_link.then(ColumnDef::detail_link);

    let metrics = config.iter().map(|(key, spec)| ColumnDef {
        name: spec.label.clone(),
        label: spec.label.clone(),
        toggleable: spec.toggleable(),
        default_visible: spec.default_visible(),
        filter: false,
        kind: CellKind::Metric {
            key: key.to_string(),
            alert: spec.alert,
        },
    });

    leading.into_iter().chain(metrics).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetricSpec;
    use pretty_assertions::assert_eq;

    fn priority_config() -> MetricConfig {
        MetricConfig::empty()
            .with_metric("p1", MetricSpec::new("P1 Defects"))
            .with_metric("p2", MetricSpec::new("P2 Defects").hidden())
    }

    #[test]
    fn test_metric_columns_visibility() {
        let columns = build_columns(&priority_config(), false);

        assert_eq!(columns.len(), 2);
        assert!(!columns[0].hidden());
        assert!(columns[0].default_visible);
        assert!(columns[1].hidden());
        assert!(!columns[1].default_visible);
        assert_eq!(columns[1].name, "P2 Defects");
        assert_eq!(columns[1].metric_key(), Some("p2"));
    }

    #[test]
    fn test_detail_link_column_prepended() {
        let config = priority_config();
        let with_link = build_columns(&config, true);
        let without = build_columns(&config, false);

        assert_eq!(with_link.len(), without.len() + 1);
        assert_eq!(with_link[0], ColumnDef::detail_link());
        assert_eq!(&with_link[1..], &without[..]);
    }

    #[test]
    fn test_detail_link_column_ignores_hidden() {
        let hidden_only = MetricConfig::empty().with_metric("x", MetricSpec::new("X").hidden());
        let columns = build_columns(&hidden_only, true);

        assert_eq!(columns[0].name, "");
        assert!(!columns[0].toggleable);
        assert!(!columns[0].filter);
        assert!(columns[0].default_visible);
        assert_eq!(columns[0].metric_key(), None);
    }

    #[test]
    fn test_alert_flag_carried() {
        let config = MetricConfig::default();
        let alerting: Vec<_> = build_columns(&config, false)
            .into_iter()
            .filter(|c| matches!(c.kind, CellKind::Metric { alert: true, .. }))
            .map(|c| c.label)
            .collect();

        assert_eq!(alerting, vec!["P1 Defects"]);
    }

    #[test]
    fn test_widget_json_shape() {
        let columns = build_columns(&priority_config(), true);
        let json = serde_json::to_value(&columns).unwrap();

        assert_eq!(
            json[0],
            serde_json::json!({
                "name": "", "label": "", "viewColumns": false, "display": true,
                "filter": false, "cellKind": "detail-link"
            })
        );
        assert_eq!(json[2]["viewColumns"], true);
        assert_eq!(json[2]["display"], false);
        assert_eq!(json[2]["cellKind"], "metric");
        assert_eq!(json[2]["key"], "p2");
    }

    #[test]
    fn test_build_is_repeatable() {
        let config = MetricConfig::default();
        for detail_link in [true, false] {
            assert_eq!(
                build_columns(&config, detail_link),
                build_columns(&config, detail_link)
            );
        }
    }

    #[test]
    fn test_empty_config() {
        assert!(build_columns(&MetricConfig::empty(), false).is_empty());
        assert_eq!(build_columns(&MetricConfig::empty(), true).len(), 1);
    }
}
