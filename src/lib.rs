//! bugzilla-dashboard - Bugzilla component metrics for the dashboard
//!
//! Builds the components table (rows, columns, sorting, cell colouring)
//! and Chart.js data from component records and a metric configuration,
//! and formats them for the command line.
//!
//! # Example
//!
//! ```no_run
//! use bugzilla_dashboard::{components, report};
//!
//! let records = components::load_records("components.json".as_ref()).unwrap();
//! let config = components::DashboardConfig::load_from_file("dashboard.json".as_ref()).unwrap();
//!
//! if let Some(mut table) = components::ComponentTable::from_config(&records, &config) {
//!     table.sort_by_column(1, components::SortDirection::Desc);
//!     println!("{}", report::render_markdown(&table, 0).unwrap());
//! }
//! ```

pub mod error;
pub mod report;

pub use bugzilla_dashboard_core as components;
pub use error::{Error, Result};
