//! bugzilla-dashboard-core - Table and chart data for the Bugzilla dashboard
//!
//! This crate contains WASM-compatible code shared between the CLI and any
//! frontend that renders the components table.
//!
//! # Features
//!
//! - Metric configuration with stable column order
//! - Row and column construction for the components table
//! - Locale-aware label ordering and a column comparator for sorting
//! - Cell rendering policy (detail links, alert colouring)
//! - Chart.js dataset shaping

pub mod cell;
pub mod chart;
pub mod collate;
pub mod columns;
pub mod config;
pub mod data;
pub mod error;
pub mod rows;
pub mod sort;
pub mod table;

pub use cell::{Cell, CellColor, DetailLink, MetricCell};
pub use chart::{ChartOptions, ChartProps, ChartType, ChartView, Dataset, Point, XValue};
pub use collate::locale_compare;
pub use columns::{build_columns, CellKind, ColumnDef};
pub use config::{DashboardConfig, MetricConfig, MetricSpec};
pub use data::{load_records, ComponentRecord, MetricValue, OneOrMany};
pub use error::{Error, Result};
pub use rows::{build_rows, DisplayRow, RowHeader, Slot};
pub use sort::{compare_rows, sort_rows, SortDirection};
pub use table::{ComponentTable, TableOptions};
