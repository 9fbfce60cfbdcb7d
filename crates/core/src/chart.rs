//! Chart.js data shaping for time-series charts
//!
//! Wraps datasets and caller-supplied options into a Chart.js config.
//! Option generation itself belongs to the caller; options pass through
//! unchanged.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

/// Canvas height handed to Chart.js
pub const CHART_HEIGHT: u32 = 75;

/// X coordinate: a timestamp or a category label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum XValue {
    Date(DateTime<Utc>),
    Label(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: XValue,
    pub y: f64,
}

/// One line on the chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub label: String,
    #[serde(default)]
    pub data: Vec<Point>,
    /// Extra Chart.js dataset properties (colours, fill, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<Point>) -> Self {
        Self {
            label: label.into(),
            data,
            extra: serde_json::Map::new(),
        }
    }
}

/// Caller-facing chart options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    pub reverse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub tooltip_format: bool,
    /// Any other Chart.js options (tooltips, scales, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Scatter,
}

impl FromStr for ChartType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartType::Line),
            "bar" => Ok(ChartType::Bar),
            "scatter" => Ok(ChartType::Scatter),
            _ => Err(Error::InvalidChartType(s.to_string())),
        }
    }
}

/// Chart wrapper properties
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartProps {
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    /// CSS size of the loading placeholder
    pub size: String,
    pub options: ChartOptions,
}

impl Default for ChartProps {
    fn default() -> Self {
        Self {
            title: String::new(),
            chart_type: ChartType::Line,
            size: "8rem".to_string(),
            options: ChartOptions::default(),
        }
    }
}

/// What the chart wrapper shows
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ChartView {
    /// Data not available yet; show a spinner of the given size
    Loading { size: String },
    Ready {
        title: Option<String>,
        height: u32,
        config: Value,
    },
}

impl ChartView {
    /// Shape datasets for Chart.js, or a loading placeholder when there
    /// is no data yet
    pub fn build(datasets: Option<Vec<Dataset>>, props: &ChartProps) -> Result<Self> {
        let Some(datasets) = datasets else {
            return Ok(ChartView::Loading {
                size: props.size.clone(),
            });
        };

        tracing::debug!("Building {:?} chart with {} datasets", props.chart_type, datasets.len());

        let config = json!({
            "type": props.chart_type,
            "data": { "datasets": serde_json::to_value(&datasets)? },
            "options": serde_json::to_value(&props.options)?,
        });

        Ok(ChartView::Ready {
            title: (!props.title.is_empty()).then(|| props.title.clone()),
            height: CHART_HEIGHT,
            config,
        })
    }
}
