//! Metric configuration for the components table
//!
//! The metric configuration is an ordered mapping from metric key to its
//! display settings. Its order is the column order of the table and the
//! order in which metric values are pulled out of each component record,
//! so it must survive a JSON round trip without being re-sorted.

use crate::error::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Rows per page used by the data table when nothing else is configured
pub const DEFAULT_ROWS_PER_PAGE: usize = 25;

/// Built-in metrics: (key, label, hidden, alert)
const DEFAULT_METRICS: &[(&str, &str, bool, bool)] = &[
    ("untriaged", "Untriaged", false, false),
    ("needinfo", "Needinfo", false, false),
    ("P1Defect", "P1 Defects", false, true),
    ("P1Task", "P1 Tasks", false, false),
    ("P2Defect", "P2 Defects", true, false),
    ("P2Task", "P2 Tasks", true, false),
    ("newDefects", "New Defects", true, false),
];

/// Display settings for a single metric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricSpec {
    /// Column header label
    pub label: String,
    /// Offer the column in the view-columns list and hide it by default.
    /// `false` keeps the column always visible and out of the list.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    /// Non-zero counts of this metric are flagged with the alert colour
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub alert: bool,
}

impl MetricSpec {
    /// Create a visible, non-alerting metric
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hidden: false,
            alert: false,
        }
    }

    /// Mark the metric as hidden by default (but toggleable)
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark the metric as the alert metric
    pub fn alert(mut self) -> Self {
        self.alert = true;
        self
    }

    /// Whether the column shows up in the view-columns toggle list
    pub fn toggleable(&self) -> bool {
        self.hidden
    }

    /// Whether the column is displayed when the table first renders
    pub fn default_visible(&self) -> bool {
        !self.hidden
    }
}

/// Ordered mapping from metric key to [`MetricSpec`]
///
/// Duplicate keys are not rejected; the configuration is a fixed constant
/// and a duplicate simply yields two columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricConfig {
    entries: Vec<(String, MetricSpec)>,
}

impl MetricConfig {
    /// Create an empty configuration
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a metric, keeping insertion order
    pub fn with_metric(mut self, key: impl Into<String>, spec: MetricSpec) -> Self {
        self.entries.push((key.into(), spec));
        self
    }

    /// Parse a configuration from a JSON object, keeping document order
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Iterate over `(key, spec)` in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricSpec)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }

    /// Metric keys in configuration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Look up a metric by key (first match)
    pub fn get(&self, key: &str) -> Option<&MetricSpec> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MetricConfig {
    fn default() -> Self {
        let entries = DEFAULT_METRICS
            .iter()
            .map(|&(key, label, hidden, alert)| {
                (
                    key.to_string(),
                    MetricSpec {
                        label: label.to_string(),
                        hidden,
                        alert,
                    },
                )
            })
            .collect();

        Self { entries }
    }
}

impl Serialize for MetricConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, spec) in &self.entries {
            map.serialize_entry(key, spec)?;
        }
        map.end()
    }
}

struct MetricConfigVisitor;

impl<'de> Visitor<'de> for MetricConfigVisitor {
    type Value = MetricConfig;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping metric keys to { label, hidden?, alert? }")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, spec)) = access.next_entry::<String, MetricSpec>()? {
            entries.push((key, spec));
        }
        Ok(MetricConfig { entries })
    }
}

impl<'de> Deserialize<'de> for MetricConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MetricConfigVisitor)
    }
}

/// File-level configuration for the components table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// Table title
    pub title: String,
    /// Tracked metrics, in column order
    pub metrics: MetricConfig,
    /// Prefix the table with the detail-link column
    pub detail_link: bool,
    /// Page size of the data table
    pub rows_per_page: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Components".to_string(),
            metrics: MetricConfig::default(),
            detail_link: true,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file does not exist
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file the caller named explicitly; a
    /// missing file is an error rather than a fallback to defaults
    pub fn load_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigError(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Self::load_from_file(path)
    }

    /// Reject settings the table cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.rows_per_page == 0 {
            return Err(Error::ConfigError(
                "rowsPerPage must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_json_keeps_document_order() {
        let config = MetricConfig::from_json_str(
            r#"{"zeta": {"label": "Z"}, "alpha": {"label": "A", "hidden": true}, "mid": {"label": "M"}}"#,
        )
        .unwrap();

        let keys: Vec<_> = config.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert!(config.get("alpha").unwrap().hidden);
        assert!(!config.get("zeta").unwrap().hidden);
    }

    #[test]
    fn test_serialize_keeps_order() {
        let config = MetricConfig::empty()
            .with_metric("p2", MetricSpec::new("P2").hidden())
            .with_metric("p1", MetricSpec::new("P1").alert());

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"p2":{"label":"P2","hidden":true},"p1":{"label":"P1","alert":true}}"#
        );
    }

    #[test]
    fn test_default_has_single_alert_metric() {
        let config = MetricConfig::default();
        let alerts: Vec<_> = config
            .iter()
            .filter(|(_, spec)| spec.alert)
            .map(|(key, _)| key)
            .collect();
        assert_eq!(alerts, vec!["P1Defect"]);
    }

    #[test]
    fn test_visibility_accessors() {
        let shown = MetricSpec::new("Shown");
        assert!(shown.default_visible());
        assert!(!shown.toggleable());

        let hidden = MetricSpec::new("Hidden").hidden();
        assert!(!hidden.default_visible());
        assert!(hidden.toggleable());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_from_file(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.rows_per_page, 25);
    }

    #[test]
    fn test_load_existing_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardConfig::load_existing(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigError(msg) if msg.contains("nope.json")));
    }

    #[test]
    fn test_load_existing_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "Firefox"}}"#).unwrap();
        let config = DashboardConfig::load_existing(file.path()).unwrap();
        assert_eq!(config.title, "Firefox");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"title": "Firefox", "detailLink": false, "metrics": {{"bugs": {{"label": "Bugs"}}}}}}"#
        )
        .unwrap();

        let config = DashboardConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.title, "Firefox");
        assert!(!config.detail_link);
        assert_eq!(config.rows_per_page, DEFAULT_ROWS_PER_PAGE);
        assert_eq!(config.metrics.keys().collect::<Vec<_>>(), vec!["bugs"]);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rowsPerPage": 0}}"#).unwrap();

        let err = DashboardConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
