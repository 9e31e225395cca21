//! Tabular rendering into named display regions.
//!
//! [`build_grid`] turns headers plus records plus a row formatter into a
//! display-ready [`Grid`]. It never sorts or filters, so callers pre-sort and
//! pre-filter. [`Layout`] owns the named regions a page draws into; rendering
//! replaces a region's whole content, and rendering into a region that does
//! not exist only logs a warning.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::{trace, warn};

/// Message shown in place of an empty table.
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Visual emphasis of a badge cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Good / done
    Success,
    /// In progress / informational
    Info,
    /// Needs attention
    Warning,
    /// Bad / urgent
    Danger,
}

impl Tone {
    /// CSS class used by [`Grid::to_html`].
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "badge badge-success",
            Self::Info => "badge badge-info",
            Self::Warning => "badge badge-warning",
            Self::Danger => "badge badge-danger",
        }
    }
}

/// One table cell: text, optionally shown as a badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell text
    pub text: String,
    /// Badge tone, `None` for plain text
    pub tone: Option<Tone>,
}

impl Cell {
    /// Plain text cell
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
        }
    }

    /// Badge cell
    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

/// Display-ready table content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grid {
    /// Shown instead of a header-only table when there are no rows
    Placeholder {
        /// Number of columns the message spans
        colspan: usize,
        /// Informational text
        message: String,
    },
    /// Headers followed by rows, both in input order
    Table {
        /// Column headers, not deduplicated
        headers: Vec<String>,
        /// Formatted rows
        rows: Vec<Vec<Cell>>,
    },
}

/// Materializes `rows` into a grid using `formatter`, preserving input order.
pub fn build_grid<T, H, F>(headers: &[H], rows: &[T], formatter: F) -> Grid
where
    H: AsRef<str>,
    F: FnMut(&T) -> Vec<Cell>,
{
    if rows.is_empty() {
        return Grid::Placeholder {
            colspan: headers.len(),
            message: NO_DATA_MESSAGE.to_string(),
        };
    }

    Grid::Table {
        headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
        rows: rows.iter().map(formatter).collect(),
    }
}

impl Grid {
    /// True for the no-data placeholder
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Header cells; empty for the placeholder.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        match self {
            Self::Placeholder { .. } => &[],
            Self::Table { headers, .. } => headers,
        }
    }

    /// Data rows; empty for the placeholder.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        match self {
            Self::Placeholder { .. } => &[],
            Self::Table { rows, .. } => rows,
        }
    }

    /// Column-aligned plain text, two spaces between columns.
    #[must_use]
    pub fn to_text(&self) -> String {
        let (headers, rows) = match self {
            Self::Placeholder { message, .. } => return format!("{message}\n"),
            Self::Table { headers, rows } => (headers, rows),
        };

        let columns = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for (i, header) in headers.iter().enumerate() {
            widths[i] = widths[i].max(header.chars().count());
        }
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.text.chars().count());
            }
        }

        let mut out = String::new();
        push_text_line(&mut out, headers.iter().map(String::as_str), &widths);
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule_width));
        out.push('\n');
        for row in rows {
            push_text_line(&mut out, row.iter().map(|c| c.text.as_str()), &widths);
        }
        out
    }

    /// `<thead>`/`<tbody>` markup with escaped text; the placeholder becomes a
    /// single `<td colspan=N>` row.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        match self {
            Self::Placeholder { colspan, message } => {
                let _ = write!(
                    html,
                    "<tr><td colspan=\"{colspan}\" class=\"no-data\">{}</td></tr>",
                    escape_html(message)
                );
            }
            Self::Table { headers, rows } => {
                html.push_str("<thead><tr>");
                for header in headers {
                    let _ = write!(html, "<th>{}</th>", escape_html(header));
                }
                html.push_str("</tr></thead><tbody>");
                for row in rows {
                    html.push_str("<tr>");
                    for cell in row {
                        match cell.tone {
                            Some(tone) => {
                                let _ = write!(
                                    html,
                                    "<td><span class=\"{}\">{}</span></td>",
                                    tone.css_class(),
                                    escape_html(&cell.text)
                                );
                            }
                            None => {
                                let _ = write!(html, "<td>{}</td>", escape_html(&cell.text));
                            }
                        }
                    }
                    html.push_str("</tr>");
                }
                html.push_str("</tbody>");
            }
        }
        html
    }
}

fn push_text_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, text) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{text:<width$}", width = widths[i]);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Escapes text for HTML element content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// The named display regions of a page.
///
/// Regions are declared up front; each holds the grid from its most recent
/// render, or nothing if it was never rendered.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    regions: BTreeMap<String, Option<Grid>>,
}

impl Layout {
    /// Empty layout with no regions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout with the given regions, all empty.
    pub fn with_regions<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: keys.into_iter().map(|k| (k.into(), None)).collect(),
        }
    }

    /// Declares a region. An existing region keeps its content.
    pub fn add_region(&mut self, key: impl Into<String>) {
        self.regions.entry(key.into()).or_insert(None);
    }

    /// True when the region exists
    #[must_use]
    pub fn has_region(&self, key: &str) -> bool {
        self.regions.contains_key(key)
    }

    /// Current content of a region
    #[must_use]
    pub fn grid(&self, key: &str) -> Option<&Grid> {
        self.regions.get(key).and_then(Option::as_ref)
    }

    /// Regions in key order with their content
    pub fn regions(&self) -> impl Iterator<Item = (&str, Option<&Grid>)> {
        self.regions.iter().map(|(k, g)| (k.as_str(), g.as_ref()))
    }

    /// Builds a grid and replaces the content of `target` with it.
    ///
    /// Returns `false` (after logging a warning) when `target` is not a
    /// declared region; the grid is not built in that case.
    pub fn render<T, H, F>(&mut self, target: &str, headers: &[H], rows: &[T], formatter: F) -> bool
    where
        H: AsRef<str>,
        F: FnMut(&T) -> Vec<Cell>,
    {
        let Some(region) = self.regions.get_mut(target) else {
            warn!(region = target, "Display region not found, skipping render");
            return false;
        };
        let grid = build_grid(headers, rows, formatter);
        trace!(region = target, rows = grid.rows().len(), "Rendered table");
        *region = Some(grid);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_tracing;

    fn number_row(n: &u32) -> Vec<Cell> {
        vec![Cell::plain(n.to_string()), Cell::plain(format!("#{n}"))]
    }

    #[test]
    fn test_build_grid_empty_is_placeholder_spanning_headers() {
        let grid = build_grid(&["A", "B", "C"], &[] as &[u32], number_row);
        assert_eq!(
            grid,
            Grid::Placeholder {
                colspan: 3,
                message: NO_DATA_MESSAGE.to_string()
            }
        );
        assert!(grid.headers().is_empty());
    }

    #[test]
    fn test_build_grid_empty_headers_and_rows() {
        let grid = build_grid::<u32, &str, _>(&[], &[], number_row);
        assert!(matches!(grid, Grid::Placeholder { colspan: 0, .. }));
    }

    #[test]
    fn test_build_grid_keeps_order_and_duplicates() {
        let grid = build_grid(&["A", "A"], &[2, 1], number_row);
        assert_eq!(grid.headers(), ["A", "A"]);
        assert_eq!(grid.rows().len(), 2);
        assert_eq!(grid.rows()[0][0].text, "2");
        assert_eq!(grid.rows()[1][0].text, "1");
    }

    #[test]
    fn test_render_replaces_previous_content() {
        let mut layout = Layout::with_regions(["numbers"]);
        assert!(layout.render("numbers", &["N", "Label"], &[1, 2, 3], number_row));
        assert!(layout.render("numbers", &["N", "Label"], &[9], number_row));

        let grid = layout.grid("numbers").cloned();
        assert_eq!(grid.map(|g| g.rows().len()), Some(1));
    }

    #[test]
    fn test_render_missing_region_is_noop() {
        init_test_tracing();
        let mut layout = Layout::with_regions(["numbers"]);
        assert!(!layout.render("missing", &["N", "Label"], &[1], number_row));
        assert!(!layout.has_region("missing"));
        assert!(layout.grid("numbers").is_none());
    }

    #[test]
    fn test_add_region_keeps_existing_content() {
        let mut layout = Layout::new();
        layout.add_region("numbers");
        layout.render("numbers", &["N", "Label"], &[1], number_row);
        layout.add_region("numbers");
        assert!(layout.grid("numbers").is_some());
    }

    #[test]
    fn test_to_text_aligns_columns() {
        let grid = build_grid(&["N", "Label"], &[7, 10], number_row);
        assert_eq!(grid.to_text(), "N   Label\n---------\n7   #7\n10  #10\n");
    }

    #[test]
    fn test_to_text_placeholder() {
        let grid = build_grid(&["N"], &[] as &[u32], number_row);
        assert_eq!(grid.to_text(), "No data available\n");
    }

    #[test]
    fn test_to_html_placeholder_has_colspan() {
        let grid = build_grid(&["A", "B"], &[] as &[u32], number_row);
        assert_eq!(
            grid.to_html(),
            "<tr><td colspan=\"2\" class=\"no-data\">No data available</td></tr>"
        );
    }

    #[test]
    fn test_to_html_escapes_and_renders_badges() {
        let grid = build_grid(&["Title", "Status"], &["<b>&"], |t: &&str| {
            vec![Cell::plain(*t), Cell::badge("Open", Tone::Warning)]
        });
        assert_eq!(
            grid.to_html(),
            "<thead><tr><th>Title</th><th>Status</th></tr></thead><tbody><tr>\
             <td>&lt;b&gt;&amp;</td><td><span class=\"badge badge-warning\">Open</span></td>\
             </tr></tbody>"
        );
    }
}
