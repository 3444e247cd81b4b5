//! Types for the orgpage-parser public API.
use jiff::{
  civil::{Date, DateTime, Time},
  tz::Offset,
};

/// Calendar timestamp taken from a `#+DATE:` directive.
///
/// The time of day and the UTC offset are both optional because most
/// directives only carry a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentDate {
  /// Calendar date.
  pub date:   Date,
  /// Time of day, when the directive carried one.
  pub time:   Option<Time>,
  /// UTC offset, when known.
  pub offset: Option<Offset>,
}

impl DocumentDate {
  /// Create a date-only timestamp.
  #[must_use]
  pub const fn new(date: Date) -> Self {
    Self {
      date,
      time: None,
      offset: None,
    }
  }

  /// Attach a time of day.
  #[must_use]
  pub const fn with_time(mut self, time: Time) -> Self {
    self.time = Some(time);
    self
  }

  /// Attach a UTC offset.
  #[must_use]
  pub const fn with_offset(mut self, offset: Offset) -> Self {
    self.offset = Some(offset);
    self
  }

  /// Civil date and time, with midnight standing in for a missing time.
  #[must_use]
  pub fn datetime(&self) -> DateTime {
    self.date.to_datetime(self.time.unwrap_or(Time::midnight()))
  }

  /// ISO 8601 form, e.g. `2024-01-15T09:30:00` or `2024-01-15T09:30:00+02:00`.
  #[must_use]
  pub fn to_iso8601(&self) -> String {
    let base = self.datetime().strftime("%Y-%m-%dT%H:%M:%S").to_string();
    match self.offset {
      Some(offset) => format!("{base}{}", format_offset(offset, true)),
      None => base,
    }
  }

  /// Human readable long form, e.g. `January 15, 2024`.
  #[must_use]
  pub fn to_long_date(&self) -> String {
    self.date.strftime("%B %d, %Y").to_string()
  }

  /// RFC 2822 form used by RSS, e.g. `Mon, 15 Jan 2024 00:00:00 +0000`.
  ///
  /// A missing offset is rendered as `+0000`.
  #[must_use]
  pub fn to_rfc2822(&self) -> String {
    let base = self.datetime().strftime("%a, %d %b %Y %H:%M:%S").to_string();
    let offset = self.offset.unwrap_or(Offset::UTC);
    format!("{base} {}", format_offset(offset, false))
  }
}

/// Format an offset as `+HHMM` or, with `colon`, `+HH:MM`.
fn format_offset(offset: Offset, colon: bool) -> String {
  let total = offset.seconds();
  let sign = if total < 0 { '-' } else { '+' };
  let minutes = total.unsigned_abs() / 60;
  let (hours, minutes) = (minutes / 60, minutes % 60);
  if colon {
    format!("{sign}{hours:02}:{minutes:02}")
  } else {
    format!("{sign}{hours:02}{minutes:02}")
  }
}

/// Document-level metadata collected from `#+KEY: value` directives.
///
/// Every field stays at its default when the corresponding directive is
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
  /// `#+TITLE:`
  pub title:       String,
  /// `#+DATE:`, absent when missing or unparseable.
  pub date:        Option<DocumentDate>,
  /// `#+TAGS:`, whitespace separated, in order of appearance.
  pub tags:        Vec<String>,
  /// `#+CATEGORY:` or `#+CATEGORIES:`, whitespace separated.
  pub categories:  Vec<String>,
  /// `#+AUTHOR:`
  pub author:      String,
  /// `#+DESCRIPTION:`
  pub description: String,
  /// `#+URI:`, empty means the output path is derived from the input path.
  pub uri:         String,
  /// `#+KEYWORDS:`, comma separated.
  pub keywords:    Vec<String>,
}

/// A heading seen by the block parser, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
  /// Number of leading `*` markers.
  pub level:  usize,
  /// Heading text before inline markup is applied.
  pub title:  String,
  /// Slug derived from the title. Not guaranteed to be unique.
  pub anchor: String,
}

impl HeadingEntry {
  /// Build an entry, deriving the anchor from the title.
  #[must_use]
  pub fn new(level: usize, title: impl Into<String>) -> Self {
    let title = title.into();
    let anchor = crate::utils::slugify(&title);
    Self {
      level,
      title,
      anchor,
    }
  }
}

/// Result of converting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
  /// Metadata extracted from the directive lines.
  pub metadata: DocumentMetadata,

  /// Rendered body HTML.
  pub content_html: String,

  /// Rendered table of contents, empty when the document has no headings.
  pub toc_html: String,

  /// Headings in document order (for navigation, search, etc).
  pub headings: Vec<HeadingEntry>,
}

#[cfg(test)]
mod tests {
  use jiff::civil::{date, time};

  use super::*;

  #[test]
  fn test_date_only_formats() {
    let d = DocumentDate::new(date(2024, 1, 15));
    assert_eq!(d.to_iso8601(), "2024-01-15T00:00:00");
    assert_eq!(d.to_long_date(), "January 15, 2024");
    assert_eq!(d.to_rfc2822(), "Mon, 15 Jan 2024 00:00:00 +0000");
  }

  #[test]
  fn test_date_with_time_and_offset() {
    let d = DocumentDate::new(date(2023, 12, 3))
      .with_time(time(9, 5, 0, 0))
      .with_offset(Offset::constant(-5));
    assert_eq!(d.to_iso8601(), "2023-12-03T09:05:00-05:00");
    assert_eq!(d.to_rfc2822(), "Sun, 03 Dec 2023 09:05:00 -0500");
  }

  #[test]
  fn test_datetime_ordering() {
    let earlier = DocumentDate::new(date(2024, 1, 15));
    let later = DocumentDate::new(date(2024, 1, 15)).with_time(time(8, 0, 0, 0));
    assert!(earlier.datetime() < later.datetime());
  }

  #[test]
  fn test_heading_entry_anchor() {
    let entry = HeadingEntry::new(2, "Getting Started");
    assert_eq!(entry.level, 2);
    assert_eq!(entry.title, "Getting Started");
    assert_eq!(entry.anchor, "getting-started");
  }

  #[test]
  fn test_metadata_defaults() {
    let meta = DocumentMetadata::default();
    assert!(meta.title.is_empty());
    assert!(meta.date.is_none());
    assert!(meta.tags.is_empty());
    assert!(meta.keywords.is_empty());
  }
}
