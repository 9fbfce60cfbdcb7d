//! Command-line output for the components table

use crate::error::{Error, Result};
use bugzilla_dashboard_core::cell::DEAD_LINK;
use bugzilla_dashboard_core::{Cell, CellColor, CellKind, ColumnDef, ComponentTable};
use std::fmt;
use std::str::FromStr;

/// Header shown for the unnamed detail-link column
const DETAIL_HEADER: &str = "Component";

/// Output format for table and column listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format '{}' (expected text, markdown or json)",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Markdown => f.write_str("markdown"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

fn header_text(column: &ColumnDef) -> &str {
    match column.kind {
        CellKind::DetailLink => DETAIL_HEADER,
        CellKind::Metric { .. } => &column.label,
    }
}

fn check_page(table: &ComponentTable, page: usize) -> Result<()> {
    let pages = table.page_count();
    if page >= pages {
        return Err(Error::PageOutOfRange { page, pages });
    }
    Ok(())
}

/// Rendered cells of one page, restricted to the initially visible columns
fn visible_page(table: &ComponentTable, page: usize) -> Vec<Vec<Cell>> {
    let visible: Vec<usize> = table.visible_columns().map(|(i, _)| i).collect();

    table
        .page(page)
        .iter()
        .map(|row| {
            let cells = table.render_row(row);
            visible.iter().filter_map(|&i| cells.get(i).cloned()).collect()
        })
        .collect()
}

fn markdown_cell(cell: &Cell) -> String {
    match cell {
        Cell::Detail(Some(link)) => format!("**{}**", link.label),
        Cell::Detail(None) => String::new(),
        Cell::Metric(metric) if metric.text.is_empty() => String::new(),
        Cell::Metric(metric) => {
            let text = if metric.href == DEAD_LINK {
                metric.text.clone()
            } else {
                format!("[{}]({})", metric.text, metric.href)
            };
            match metric.color {
                CellColor::Alert => format!("🔴 {}", text),
                CellColor::Normal => text,
            }
        }
    }
}

/// Render one page of the table as a Markdown table
pub fn render_markdown(table: &ComponentTable, page: usize) -> Result<String> {
    check_page(table, page)?;

    let headers: Vec<&str> = table.visible_columns().map(|(_, c)| header_text(c)).collect();
    let mut lines = Vec::new();

    if !table.title.is_empty() {
        lines.push(format!("## {}\n", table.title));
    }

    lines.push(format!("| {} |", headers.join(" | ")));
    lines.push(format!(
        "|{}|",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
    ));

    for cells in visible_page(table, page) {
        let cells: Vec<String> = cells.iter().map(markdown_cell).collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    lines.push(String::new());
    lines.push(page_footer(table, page));

    Ok(lines.join("\n"))
}

fn page_footer(table: &ComponentTable, page: usize) -> String {
    format!(
        "Page {} of {} ({} components)",
        page + 1,
        table.page_count(),
        table.rows.len()
    )
}

/// Render one page of the table as aligned plain text. Alert counts are
/// suffixed with `!`.
pub fn render_text(table: &ComponentTable, page: usize) -> Result<String> {
    check_page(table, page)?;

    let headers: Vec<String> = table
        .visible_columns()
        .map(|(_, c)| header_text(c).to_string())
        .collect();

    let body: Vec<Vec<String>> = visible_page(table, page)
        .iter()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| match cell {
                    Cell::Metric(m) if m.color == CellColor::Alert => format!("{}!", m.text),
                    other => other.text().to_string(),
                })
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(&headers)];
    lines.extend(body.iter().map(|row| format_line(row)));
    lines.push(String::new());
    lines.push(page_footer(table, page));

    Ok(lines.join("\n"))
}

/// Render one page of the table as JSON: columns, options and rendered
/// cells for every column
pub fn render_json(table: &ComponentTable, page: usize) -> Result<String> {
    check_page(table, page)?;

    let rows: Vec<Vec<Cell>> = table
        .page(page)
        .iter()
        .map(|row| table.render_row(row))
        .collect();

    let output = serde_json::json!({
        "title": table.title,
        "columns": table.columns,
        "options": table.options,
        "page": page,
        "pageCount": table.page_count(),
        "rows": rows,
    });

    Ok(serde_json::to_string_pretty(&output)?)
}

/// Render a page of the table in the requested format
pub fn render_table(table: &ComponentTable, page: usize, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(table, page),
        OutputFormat::Markdown => render_markdown(table, page),
        OutputFormat::Json => render_json(table, page),
    }
}

/// List columns with their visibility settings
pub fn render_columns(columns: &[ColumnDef], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(columns)?);
    }

    let lines: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let kind = match &column.kind {
                CellKind::DetailLink => "detail-link".to_string(),
                CellKind::Metric { key, alert: true } => format!("metric {} (alert)", key),
                CellKind::Metric { key, .. } => format!("metric {}", key),
            };
            let visibility = match (column.default_visible, column.toggleable) {
                (true, false) => "always shown",
                (true, true) => "shown, toggleable",
                (false, true) => "hidden, toggleable",
                (false, false) => "hidden",
            };
            format!("{:>2}  {:<16} {:<24} {}", i, header_text(column), kind, visibility)
        })
        .collect();

    Ok(lines.join("\n"))
}

/// Make sure a requested sort column exists
pub fn check_column(table: &ComponentTable, index: usize) -> Result<()> {
    if index >= table.columns.len() {
        return Err(Error::ColumnOutOfRange {
            index,
            columns: table.columns.len(),
        });
    }
    Ok(())
}
