//! Line-oriented block parser.
//!
//! The parser walks the body one line at a time. Code and quote markers
//! switch its [`BlockState`]; everything else is classified by
//! [`Line::classify`] and rendered immediately. Nested lists are tracked on a
//! stack of [`ListFrame`]s whose depth always equals the open nesting level.
pub mod line;

use log::debug;

pub use self::line::{Line, ListKind};
use crate::{
  inline::process_inline_markup,
  table::parse_table,
  types::HeadingEntry,
  utils::escape_html,
};

/// Deepest heading element emitted; deeper headings reuse it.
const MAX_HEADING_TAG: usize = 6;

/// Parser state between lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlockState {
  #[default]
  Normal,
  /// Inside one or more quote blocks.
  InQuoteBlock { depth: usize },
  /// Inside a code block. Lines are escaped verbatim until the end marker,
  /// after which the enclosing quote blocks (if any) are resumed.
  InCodeBlock {
    language:        String,
    enclosing_quote: usize,
  },
}

impl BlockState {
  const fn quote_depth(&self) -> usize {
    match self {
      Self::Normal => 0,
      Self::InQuoteBlock { depth } => *depth,
      Self::InCodeBlock {
        enclosing_quote, ..
      } => *enclosing_quote,
    }
  }

  const fn from_quote_depth(depth: usize) -> Self {
    if depth == 0 {
      Self::Normal
    } else {
      Self::InQuoteBlock { depth }
    }
  }
}

/// One open list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
  pub kind: ListKind,
}

/// Rendered body and the headings seen while rendering it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockOutput {
  /// Body HTML, one output line per source construct, joined with `\n`.
  pub html:     String,
  /// Headings in document order.
  pub headings: Vec<HeadingEntry>,
}

/// Block parser for a single document body.
///
/// A parser is consumed by [`BlockParser::parse`]; every document gets a
/// fresh one.
#[derive(Debug, Default)]
pub struct BlockParser {
  state:    BlockState,
  lists:    Vec<ListFrame>,
  html:     Vec<String>,
  headings: Vec<HeadingEntry>,
}

impl BlockParser {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Current state.
  #[must_use]
  pub const fn state(&self) -> &BlockState {
    &self.state
  }

  /// Number of open list containers.
  #[must_use]
  pub fn list_depth(&self) -> usize {
    self.lists.len()
  }

  /// Parse a whole body.
  ///
  /// Lines are split on `\n`; a trailing `\r` is dropped from each.
  #[must_use]
  pub fn parse(mut self, content: &str) -> BlockOutput {
    let lines: Vec<&str> = content
      .split('\n')
      .map(|line| line.strip_suffix('\r').unwrap_or(line))
      .collect();

    let mut cursor = 0;
    while cursor < lines.len() {
      cursor += self.step(&lines[cursor..]);
    }

    self.finish()
  }

  /// Handle the line at the front of `rest` and return how many lines were
  /// consumed. Always at least one.
  pub fn step(&mut self, rest: &[&str]) -> usize {
    let Some(&line) = rest.first() else {
      return 0;
    };

    if matches!(self.state, BlockState::InCodeBlock { .. }) {
      if line::is_end_code(line) {
        self.html.push("</code></pre>".to_string());
        self.state = BlockState::from_quote_depth(self.state.quote_depth());
      } else {
        self.html.push(escape_html(line));
      }
      return 1;
    }

    match Line::classify(line) {
      Line::BeginCode { language } => {
        self
          .html
          .push(format!(r#"<pre class="src src-{language}"><code>"#));
        self.state = BlockState::InCodeBlock {
          language:        language.to_string(),
          enclosing_quote: self.state.quote_depth(),
        };
      },
      Line::EndCode => {
        // Stray end marker outside a code block
        self.html.push("</code></pre>".to_string());
      },
      Line::BeginQuote => {
        self.html.push("<blockquote>".to_string());
        self.state = BlockState::InQuoteBlock {
          depth: self.state.quote_depth() + 1,
        };
      },
      Line::EndQuote => {
        self.html.push("</blockquote>".to_string());
        self.state = BlockState::from_quote_depth(
          self.state.quote_depth().saturating_sub(1),
        );
      },
      Line::Heading { level, title } => self.push_heading(level, title),
      Line::ListItem { kind, indent, text } => {
        self.sync_lists(Line::list_level(indent), kind);
        self
          .html
          .push(format!("<li>{}</li>", process_inline_markup(text)));
      },
      other => {
        self.close_lists();
        return self.push_terminal(other, rest);
      },
    }

    1
  }

  /// Rule, table, blank and paragraph lines. These close any open list first.
  fn push_terminal(&mut self, line: Line<'_>, rest: &[&str]) -> usize {
    match line {
      Line::Rule => self.html.push("<hr />".to_string()),
      Line::TableStart => {
        let table = parse_table(rest);
        self.html.push(table.html);
        return table.consumed.max(1);
      },
      Line::Text(text) => {
        self
          .html
          .push(format!("<p>{}</p>", process_inline_markup(text)));
      },
      _ => self.html.push(String::new()),
    }
    1
  }

  fn push_heading(&mut self, level: usize, title: &str) {
    let entry = HeadingEntry::new(level, title);
    let tag = level.min(MAX_HEADING_TAG);
    self.html.push(format!(
      r#"<h{tag} id="{}">{}</h{tag}>"#,
      entry.anchor,
      process_inline_markup(title)
    ));
    self.headings.push(entry);
  }

  /// Open or close list containers until exactly `level` are open.
  ///
  /// The container kind is fixed when it is opened; an item of the other
  /// kind at an already open level lands in the existing container.
  fn sync_lists(&mut self, level: usize, kind: ListKind) {
    while self.lists.len() < level {
      self.html.push(format!("<{}>", kind.tag()));
      self.lists.push(ListFrame { kind });
    }
    while self.lists.len() > level {
      self.pop_list();
    }
  }

  fn pop_list(&mut self) {
    if let Some(frame) = self.lists.pop() {
      self.html.push(format!("</{}>", frame.kind.tag()));
    }
  }

  fn close_lists(&mut self) {
    while !self.lists.is_empty() {
      self.pop_list();
    }
  }

  /// Close remaining lists and produce the output.
  ///
  /// Unterminated code or quote blocks are left open.
  #[must_use]
  pub fn finish(mut self) -> BlockOutput {
    self.close_lists();

    match &self.state {
      BlockState::Normal => {},
      BlockState::InCodeBlock { language, .. } => {
        debug!("Code block ({language}) not terminated before end of document");
      },
      BlockState::InQuoteBlock { depth } => {
        debug!("{depth} quote block(s) not terminated before end of document");
      },
    }

    BlockOutput {
      html:     self.html.join("\n"),
      headings: self.headings,
    }
  }
}

/// Parse a document body with a fresh [`BlockParser`].
///
/// # Examples
///
/// ```
/// use orgpage_parser::block::parse_blocks;
///
/// let out = parse_blocks("* Intro\nSome *bold* text.");
/// assert_eq!(
///   out.html,
///   "<h1 id=\"intro\">Intro</h1>\n<p>Some <strong>bold</strong> text.</p>"
/// );
/// assert_eq!(out.headings[0].anchor, "intro");
/// ```
#[must_use]
pub fn parse_blocks(content: &str) -> BlockOutput {
  BlockParser::new().parse(content)
}
