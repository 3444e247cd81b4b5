//! Line classification for the block parser.
use std::sync::LazyLock;

use regex::Regex;

use crate::{table::is_table_start, utils::never_matching_regex};

macro_rules! line_regex {
  ($name:ident, $pattern:expr) => {
    static $name: LazyLock<Regex> = LazyLock::new(|| {
      Regex::new($pattern).unwrap_or_else(|e| {
        log::error!("Failed to compile {} regex: {e}", stringify!($name));
        never_matching_regex()
      })
    });
  };
}

line_regex!(BEGIN_SRC_RE, r"(?i)^#\+begin_src(?:\s+([\w+\-]+))?");
line_regex!(END_SRC_RE, r"(?i)^#\+end_src");
line_regex!(BEGIN_QUOTE_RE, r"(?i)^#\+begin_quote");
line_regex!(END_QUOTE_RE, r"(?i)^#\+end_quote");
line_regex!(HEADING_RE, r"^(\*+)\s+(.+)$");
line_regex!(BULLET_RE, r"^(\s*)[-+*]\s+(.+)$");
line_regex!(NUMBERED_RE, r"^(\s*)\d+\.?\s+(.+)$");
line_regex!(RULE_RE, r"^\s*-{5,}\s*$");

/// Container tag used for one level of list nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
  /// `-`, `+` or `*` bullets.
  Unordered,
  /// `1.` or `1 ` numbering.
  Ordered,
}

impl ListKind {
  /// HTML element name for this kind of list.
  #[must_use]
  pub const fn tag(self) -> &'static str {
    match self {
      Self::Unordered => "ul",
      Self::Ordered => "ol",
    }
  }
}

/// What a single source line is, outside of code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
  /// `#+BEGIN_SRC [language]`, any case.
  BeginCode { language: &'a str },
  /// `#+END_SRC`, any case.
  EndCode,
  /// `#+BEGIN_QUOTE`, any case.
  BeginQuote,
  /// `#+END_QUOTE`, any case.
  EndQuote,
  /// `*`-prefixed heading.
  Heading { level: usize, title: &'a str },
  /// Bulleted or numbered list item.
  ListItem {
    kind:   ListKind,
    indent: usize,
    text:   &'a str,
  },
  /// Five or more dashes alone on the line.
  Rule,
  /// First row of a pipe table.
  TableStart,
  /// Empty or whitespace-only line.
  Blank,
  /// Anything else.
  Text(&'a str),
}

impl<'a> Line<'a> {
  /// Classify a line, trying each kind in priority order.
  #[must_use]
  pub fn classify(line: &'a str) -> Self {
    if let Some(marker) = Self::classify_marker(line) {
      return marker;
    }

    if let Some(caps) = HEADING_RE.captures(line) {
      let level = caps.get(1).map_or(0, |m| m.as_str().len());
      let title = caps.get(2).map_or("", |m| m.as_str().trim());
      return Self::Heading { level, title };
    }

    for (re, kind) in [
      (&*BULLET_RE, ListKind::Unordered),
      (&*NUMBERED_RE, ListKind::Ordered),
    ] {
      if let Some(caps) = re.captures(line) {
        return Self::ListItem {
          kind,
          indent: caps.get(1).map_or(0, |m| m.as_str().chars().count()),
          text: caps.get(2).map_or("", |m| m.as_str()),
        };
      }
    }

    if RULE_RE.is_match(line) {
      Self::Rule
    } else if is_table_start(line) {
      Self::TableStart
    } else if line.trim().is_empty() {
      Self::Blank
    } else {
      Self::Text(line)
    }
  }

  /// Recognise block begin and end markers only.
  fn classify_marker(line: &'a str) -> Option<Self> {
    let trimmed = line.trim();
    if !trimmed.starts_with("#+") {
      return None;
    }

    if let Some(caps) = BEGIN_SRC_RE.captures(trimmed) {
      let language = caps.get(1).map_or("", |m| m.as_str());
      Some(Self::BeginCode { language })
    } else if END_SRC_RE.is_match(trimmed) {
      Some(Self::EndCode)
    } else if BEGIN_QUOTE_RE.is_match(trimmed) {
      Some(Self::BeginQuote)
    } else if END_QUOTE_RE.is_match(trimmed) {
      Some(Self::EndQuote)
    } else {
      None
    }
  }

  /// Nesting level of a list item: `indent / 2 + 1`.
  #[must_use]
  pub const fn list_level(indent: usize) -> usize {
    indent / 2 + 1
  }
}

/// Return true if the line closes a code block.
#[must_use]
pub fn is_end_code(line: &str) -> bool {
  END_SRC_RE.is_match(line.trim())
}
