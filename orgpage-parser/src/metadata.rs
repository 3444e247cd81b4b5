//! Header directive extraction.
//!
//! Directive lines look like `#+KEY: value`. The key is case-sensitive and
//! must be upper case; leading whitespace before `#+` is tolerated. Only the
//! first occurrence of a recognised key is honoured. Every directive line,
//! recognised or not, is removed from the body before block parsing.
use std::sync::LazyLock;

use jiff::civil::{Date, DateTime};
use log::{trace, warn};
use regex::Regex;

use crate::{
  types::{DocumentDate, DocumentMetadata},
  utils::never_matching_regex,
};

/// Generic directive line: `#+UPPERCASE_WORD:` followed by the value.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\s*#\+([A-Z_]+):(.*)$").unwrap_or_else(|e| {
    log::error!("Failed to compile DIRECTIVE_RE regex: {e}");
    never_matching_regex()
  })
});

/// Timestamp decorations: `<2024-01-15 Mon>` and `[2024-01-15 Mon]`.
static DATE_DECORATION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[<>\[\]]").unwrap_or_else(|e| {
    log::error!("Failed to compile DATE_DECORATION_RE regex: {e}");
    never_matching_regex()
  })
});

/// Accepted date layouts, tried in order. The first one that consumes the
/// whole value wins.
const DATE_FORMATS: &[DateFormat] = &[
  DateFormat::Date("%Y-%m-%d"),
  DateFormat::DateTime("%Y-%m-%d %H:%M"),
  DateFormat::DateWeekday("%Y-%m-%d"),
  DateFormat::DateTimeWeekday("%Y-%m-%d %H:%M"),
  DateFormat::Date("%m/%d/%Y"),
  DateFormat::Date("%d.%m.%Y"),
];

#[derive(Debug, Clone, Copy)]
enum DateFormat {
  Date(&'static str),
  DateTime(&'static str),
  /// Like `Date`, with a weekday name after the first token. The weekday is
  /// not checked against the date.
  DateWeekday(&'static str),
  /// Like `DateTime`, with a weekday name after the first token.
  DateTimeWeekday(&'static str),
}

/// Abbreviated English weekday names, compared case-insensitively.
const WEEKDAYS: &[&str] = &["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Remove the weekday name in second position, if there is one.
fn without_weekday(input: &str) -> Option<String> {
  let mut words = input.split_whitespace();
  let first = words.next()?;
  let weekday = words.next()?;
  if !WEEKDAYS.iter().any(|day| day.eq_ignore_ascii_case(weekday)) {
    return None;
  }
  Some(
    std::iter::once(first)
      .chain(words)
      .collect::<Vec<_>>()
      .join(" "),
  )
}

impl DateFormat {
  fn parse(self, input: &str) -> Option<DocumentDate> {
    match self {
      Self::Date(format) => {
        Date::strptime(format, input).ok().map(DocumentDate::new)
      },
      Self::DateTime(format) => {
        DateTime::strptime(format, input)
          .ok()
          .map(|dt| DocumentDate::new(dt.date()).with_time(dt.time()))
      },
      Self::DateWeekday(format) => {
        Self::Date(format).parse(&without_weekday(input)?)
      },
      Self::DateTimeWeekday(format) => {
        Self::DateTime(format).parse(&without_weekday(input)?)
      },
    }
  }
}

/// Directive keys with a meaning for the metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
  Title,
  Date,
  Tags,
  Categories,
  Author,
  Description,
  Uri,
  Keywords,
}

impl Directive {
  /// Map a directive key to its kind. Unknown keys yield `None`.
  #[must_use]
  pub fn from_key(key: &str) -> Option<Self> {
    match key {
      "TITLE" => Some(Self::Title),
      "DATE" => Some(Self::Date),
      "TAGS" => Some(Self::Tags),
      "CATEGORY" | "CATEGORIES" => Some(Self::Categories),
      "AUTHOR" => Some(Self::Author),
      "DESCRIPTION" => Some(Self::Description),
      "URI" => Some(Self::Uri),
      "KEYWORDS" => Some(Self::Keywords),
      _ => None,
    }
  }
}

/// Split a line into `(key, value)` if it is a directive line.
///
/// The value is trimmed. The key is returned even when it is not one of the
/// recognised [`Directive`]s.
#[must_use]
pub fn parse_directive(line: &str) -> Option<(&str, &str)> {
  let caps = DIRECTIVE_RE.captures(line)?;
  let key = caps.get(1)?.as_str();
  let value = caps.get(2).map_or("", |m| m.as_str().trim());
  Some((key, value))
}

/// Return true if the line is a directive line of any key.
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
  DIRECTIVE_RE.is_match(line)
}

/// Raw directive values, first occurrence only.
#[derive(Default)]
struct RawDirectives<'a> {
  title:       Option<&'a str>,
  date:        Option<&'a str>,
  tags:        Option<&'a str>,
  categories:  Option<&'a str>,
  author:      Option<&'a str>,
  description: Option<&'a str>,
  uri:         Option<&'a str>,
  keywords:    Option<&'a str>,
}

impl<'a> RawDirectives<'a> {
  fn slot(&mut self, directive: Directive) -> &mut Option<&'a str> {
    match directive {
      Directive::Title => &mut self.title,
      Directive::Date => &mut self.date,
      Directive::Tags => &mut self.tags,
      Directive::Categories => &mut self.categories,
      Directive::Author => &mut self.author,
      Directive::Description => &mut self.description,
      Directive::Uri => &mut self.uri,
      Directive::Keywords => &mut self.keywords,
    }
  }

  fn collect(content: &'a str) -> Self {
    let mut raw = Self::default();
    for line in content.lines() {
      let Some((key, value)) = parse_directive(line) else {
        continue;
      };
      // An empty value does not count as an occurrence
      if value.is_empty() {
        continue;
      }
      let Some(directive) = Directive::from_key(key) else {
        trace!("Ignoring unrecognised directive #+{key}");
        continue;
      };
      let slot = raw.slot(directive);
      if slot.is_none() {
        *slot = Some(value);
      } else {
        trace!("Ignoring duplicate directive #+{key}");
      }
    }
    raw
  }
}

/// Extract document metadata from raw document text.
///
/// # Examples
///
/// ```
/// use orgpage_parser::metadata::extract_metadata;
///
/// let meta = extract_metadata("#+TITLE: Hello\n#+TAGS: rust org\n* Body");
/// assert_eq!(meta.title, "Hello");
/// assert_eq!(meta.tags, vec!["rust", "org"]);
/// ```
#[must_use]
pub fn extract_metadata(content: &str) -> DocumentMetadata {
  let raw = RawDirectives::collect(content);

  let date = raw.date.and_then(|value| {
    let parsed = parse_date(value);
    if parsed.is_none() {
      warn!("Could not parse #+DATE value '{value}', leaving date unset");
    }
    parsed
  });

  DocumentMetadata {
    title: raw.title.unwrap_or_default().to_string(),
    date,
    tags: raw.tags.map(split_words).unwrap_or_default(),
    categories: raw.categories.map(split_words).unwrap_or_default(),
    author: raw.author.unwrap_or_default().to_string(),
    description: raw.description.unwrap_or_default().to_string(),
    uri: raw.uri.unwrap_or_default().to_string(),
    keywords: raw.keywords.map(split_commas).unwrap_or_default(),
  }
}

/// Remove every directive line from the text, recognised or not.
///
/// The remaining lines are joined with `\n`. Applying this twice yields the
/// same text as applying it once.
#[must_use]
pub fn strip_directives(content: &str) -> String {
  content
    .split('\n')
    .filter(|line| !is_directive_line(line))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Parse a `#+DATE:` value.
///
/// Angle and square brackets are stripped first, then each of the accepted
/// layouts is tried in order. Returns `None` when nothing matches.
///
/// # Examples
///
/// ```
/// use orgpage_parser::metadata::parse_date;
///
/// let date = parse_date("<2024-01-15 Mon 10:30>").unwrap();
/// assert_eq!(date.to_iso8601(), "2024-01-15T10:30:00");
/// assert!(parse_date("next tuesday").is_none());
/// ```
#[must_use]
pub fn parse_date(value: &str) -> Option<DocumentDate> {
  let cleaned = DATE_DECORATION_RE.replace_all(value, "");
  let cleaned = cleaned.trim();
  DATE_FORMATS
    .iter()
    .find_map(|format| format.parse(cleaned))
}

fn split_words(value: &str) -> Vec<String> {
  value.split_whitespace().map(str::to_string).collect()
}

fn split_commas(value: &str) -> Vec<String> {
  value
    .split(',')
    .map(str::trim)
    .filter(|kw| !kw.is_empty())
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use jiff::civil::{date, time};

  use super::*;

  #[test]
  fn test_title_is_trimmed() {
    let meta = extract_metadata("#+TITLE:    Spaced Out   \n");
    assert_eq!(meta.title, "Spaced Out");
  }

  #[test]
  fn test_leading_whitespace_allowed() {
    let meta = extract_metadata("   #+AUTHOR: Jane Doe");
    assert_eq!(meta.author, "Jane Doe");
  }

  #[test]
  fn test_keys_are_case_sensitive() {
    let meta = extract_metadata("#+title: lower\n");
    assert!(meta.title.is_empty());
  }

  #[test]
  fn test_first_occurrence_wins() {
    let meta = extract_metadata("#+TITLE: First\n#+TITLE: Second\n");
    assert_eq!(meta.title, "First");
  }

  #[test]
  fn test_category_and_categories_share_a_slot() {
    let meta = extract_metadata("#+CATEGORY: tech\n#+CATEGORIES: life misc\n");
    assert_eq!(meta.categories, vec!["tech"]);

    let meta = extract_metadata("#+CATEGORIES: life misc\n");
    assert_eq!(meta.categories, vec!["life", "misc"]);
  }

  #[test]
  fn test_tags_keep_order_and_duplicates() {
    let meta = extract_metadata("#+TAGS: b a b\n");
    assert_eq!(meta.tags, vec!["b", "a", "b"]);
  }

  #[test]
  fn test_keywords_split_on_commas() {
    let meta = extract_metadata("#+KEYWORDS: org mode, static site ,html\n");
    assert_eq!(meta.keywords, vec!["org mode", "static site", "html"]);
  }

  #[test]
  fn test_uri_and_description() {
    let meta = extract_metadata(
      "#+URI: /blog/hello/\n#+DESCRIPTION: A short post about things.\n",
    );
    assert_eq!(meta.uri, "/blog/hello/");
    assert_eq!(meta.description, "A short post about things.");
  }

  #[test]
  fn test_empty_value_is_ignored() {
    let meta = extract_metadata("#+TITLE:\n#+TITLE: Real\n");
    assert_eq!(meta.title, "Real");
  }

  #[test]
  fn test_missing_directives_default() {
    let meta = extract_metadata("* Heading\nText\n");
    assert_eq!(meta, DocumentMetadata::default());
  }

  #[test]
  fn test_parse_date_formats() {
    assert_eq!(
      parse_date("2024-01-15"),
      Some(DocumentDate::new(date(2024, 1, 15)))
    );
    assert_eq!(
      parse_date("2024-01-15 10:30"),
      Some(DocumentDate::new(date(2024, 1, 15)).with_time(time(10, 30, 0, 0)))
    );
    assert_eq!(
      parse_date("<2024-01-15 Mon>"),
      Some(DocumentDate::new(date(2024, 1, 15)))
    );
    assert_eq!(
      parse_date("[2024-01-15 Mon 08:05]"),
      Some(DocumentDate::new(date(2024, 1, 15)).with_time(time(8, 5, 0, 0)))
    );
    assert_eq!(
      parse_date("03/14/2022"),
      Some(DocumentDate::new(date(2022, 3, 14)))
    );
    assert_eq!(
      parse_date("14.03.2022"),
      Some(DocumentDate::new(date(2022, 3, 14)))
    );
  }

  #[test]
  fn test_parse_date_ignores_mismatched_weekday() {
    assert_eq!(
      parse_date("<2024-01-15 Tue>"),
      Some(DocumentDate::new(date(2024, 1, 15)))
    );
    assert_eq!(
      parse_date("[2024-03-02 sun 09:15]"),
      Some(DocumentDate::new(date(2024, 3, 2)).with_time(time(9, 15, 0, 0)))
    );
    assert!(parse_date("<2024-01-15 Xyz>").is_none());
  }

  #[test]
  fn test_parse_date_rejects_garbage() {
    assert!(parse_date("someday").is_none());
    assert!(parse_date("2024-13-45").is_none());
    assert!(parse_date("").is_none());
  }

  #[test]
  fn test_unparseable_date_is_absent() {
    let meta = extract_metadata("#+DATE: the day after tomorrow\n");
    assert!(meta.date.is_none());
  }

  #[test]
  fn test_strip_directives_removes_unknown_keys() {
    let text = "#+TITLE: T\n#+OPTIONS: toc:nil\n#+HTML_HEAD: x\nBody\n";
    assert_eq!(strip_directives(text), "Body\n");
  }

  #[test]
  fn test_strip_directives_keeps_block_markers() {
    let text = "#+BEGIN_SRC rust\nfn main() {}\n#+END_SRC";
    assert_eq!(strip_directives(text), text);
  }

  #[test]
  fn test_strip_directives_is_idempotent() {
    let text = "#+TITLE: T\n  #+DATE: 2024-01-01\nkeep\n#+lower: stays\n";
    let once = strip_directives(text);
    let twice = strip_directives(&once);
    assert_eq!(once, twice);
    assert_eq!(once, "keep\n#+lower: stays\n");
  }

  #[test]
  fn test_parse_directive() {
    assert_eq!(parse_directive("#+TITLE: x "), Some(("TITLE", "x")));
    assert_eq!(parse_directive("#+FOO_BAR:"), Some(("FOO_BAR", "")));
    assert_eq!(parse_directive("#+BEGIN_SRC rust"), None);
    assert_eq!(parse_directive("text #+TITLE: x"), None);
  }
}
