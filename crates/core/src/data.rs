//! Data structures for Bugzilla component records

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A product or component name: one string, or several for records that
/// aggregate more than one Bugzilla component
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany {
    Scalar(String),
    List(Vec<String>),
}

impl fmt::Display for OneOrMany {
    /// Lists are joined with `,`, matching how the dashboard builds
    /// detail-link keys for multi-component rows
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OneOrMany::Scalar(s) => f.write_str(s),
            OneOrMany::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(s: &str) -> Self {
        OneOrMany::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(items: Vec<String>) -> Self {
        OneOrMany::List(items)
    }
}

/// Count of bugs for one metric and the Bugzilla query that lists them
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl MetricValue {
    pub fn new(count: u64, link: impl Into<String>) -> Self {
        Self {
            count: Some(count),
            link: Some(link.into()),
        }
    }
}

/// One component as reported by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    /// Display name, also the default sort key
    pub label: String,
    pub product: OneOrMany,
    pub component: OneOrMany,
    /// Metric values keyed by metric key; `null` entries count as absent
    #[serde(default, deserialize_with = "skip_null_metrics")]
    pub metrics: BTreeMap<String, MetricValue>,
    /// Team the component belongs to, carried through as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_key: Option<Value>,
}

impl ComponentRecord {
    /// Create a record with no metrics and no team
    pub fn new(
        label: impl Into<String>,
        product: impl Into<OneOrMany>,
        component: impl Into<OneOrMany>,
    ) -> Self {
        Self {
            label: label.into(),
            product: product.into(),
            component: component.into(),
            metrics: BTreeMap::new(),
            team_key: None,
        }
    }

    /// Add a metric value
    pub fn with_metric(mut self, key: impl Into<String>, value: MetricValue) -> Self {
        self.metrics.insert(key.into(), value);
        self
    }

    pub fn with_team(mut self, team_key: impl Into<Value>) -> Self {
        self.team_key = Some(team_key.into());
        self
    }
}

fn skip_null_metrics<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, MetricValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<BTreeMap<String, Option<MetricValue>>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect())
}

/// Parse a JSON array of component records
pub fn records_from_json_str(json: &str) -> Result<Vec<ComponentRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Load component records from a JSON file
pub fn load_records(path: &Path) -> Result<Vec<ComponentRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let records = records_from_json_str(&content)?;
    tracing::debug!("Loaded {} component records from {}", records.len(), path.display());
    Ok(records)
}
