//! Pipe table parsing.
use std::sync::LazyLock;

use regex::Regex;

use crate::{inline::process_inline_markup, utils::never_matching_regex};

/// Rows made only of pipes, dashes, plus signs, colons and whitespace.
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\|[\s\-+:|]+\|$").unwrap_or_else(|e| {
    log::error!("Failed to compile SEPARATOR_RE regex: {e}");
    never_matching_regex()
  })
});

/// Rows of a pipe table, separators removed, cells trimmed but not yet
/// inline-transformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  pub rows: Vec<Vec<String>>,
}

impl Table {
  /// The first row, rendered as the table head.
  #[must_use]
  pub fn header(&self) -> Option<&[String]> {
    self.rows.first().map(Vec::as_slice)
  }

  /// Every row after the first.
  #[must_use]
  pub fn body(&self) -> &[Vec<String>] {
    self.rows.get(1..).unwrap_or_default()
  }

  /// Render the table as HTML, one tag group per line.
  ///
  /// An empty table renders as an empty string.
  #[must_use]
  pub fn to_html(&self) -> String {
    let Some(header) = self.header() else {
      return String::new();
    };

    let mut html = vec!["<table>".to_string(), "<thead><tr>".to_string()];
    html.extend(
      header
        .iter()
        .map(|cell| format!("<th>{}</th>", process_inline_markup(cell))),
    );
    html.push("</tr></thead>".to_string());

    let body = self.body();
    if !body.is_empty() {
      html.push("<tbody>".to_string());
      for row in body {
        html.push("<tr>".to_string());
        html.extend(
          row
            .iter()
            .map(|cell| format!("<td>{}</td>", process_inline_markup(cell))),
        );
        html.push("</tr>".to_string());
      }
      html.push("</tbody>".to_string());
    }

    html.push("</table>".to_string());
    html.join("\n")
  }
}

/// Output of [`parse_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
  /// Rendered table, empty when only separator rows were found.
  pub html:     String,
  /// Number of input lines consumed, separator rows included.
  pub consumed: usize,
}

/// Return true if `line` starts a table: trimmed, it begins with a pipe and
/// contains at least one more.
#[must_use]
pub fn is_table_start(line: &str) -> bool {
  line
    .trim()
    .strip_prefix('|')
    .is_some_and(|rest| rest.contains('|'))
}

/// Return true if `line` is a separator row such as `|---+---|`.
#[must_use]
pub fn is_separator_row(line: &str) -> bool {
  SEPARATOR_RE.is_match(line.trim())
}

/// Split a trimmed row on `|`, dropping the fields before the first and after
/// the last pipe.
fn split_cells(row: &str) -> Vec<String> {
  let fields: Vec<&str> = row.split('|').collect();
  fields
    .get(1..fields.len().saturating_sub(1))
    .unwrap_or_default()
    .iter()
    .map(|cell| cell.trim().to_string())
    .collect()
}

/// Collect the run of table lines at the start of `lines`.
///
/// Returns the table and the number of lines that belong to it.
#[must_use]
pub fn collect_table(lines: &[&str]) -> (Table, usize) {
  let mut table = Table::default();
  let mut consumed = 0;

  for line in lines {
    let trimmed = line.trim();
    if !trimmed.starts_with('|') {
      break;
    }
    consumed += 1;
    if !is_separator_row(trimmed) {
      table.rows.push(split_cells(trimmed));
    }
  }

  (table, consumed)
}

/// Parse the table at the start of `lines` and render it.
///
/// # Examples
///
/// ```
/// use orgpage_parser::table::parse_table;
///
/// let block = parse_table(&["| a | b |", "|---+---|", "| 1 | 2 |", "after"]);
/// assert_eq!(block.consumed, 3);
/// assert!(block.html.starts_with("<table>"));
/// assert!(block.html.contains("<th>a</th>"));
/// assert!(block.html.contains("<td>2</td>"));
/// ```
#[must_use]
pub fn parse_table(lines: &[&str]) -> TableBlock {
  let (table, consumed) = collect_table(lines);
  TableBlock {
    html: table.to_html(),
    consumed,
  }
}
