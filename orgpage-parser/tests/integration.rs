#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use orgpage_parser::{OrgOptions, OrgProcessor};

fn assert_html_contains(html: &str, expected: &[&str]) {
  for &needle in expected {
    assert!(
      html.contains(needle),
      "Expected HTML to contain '{needle}', but it did not.\nFull \
       HTML:\n{html}"
    );
  }
}

/// Every block type in one document.
#[test]
fn test_full_document() {
  let processor = OrgProcessor::new(OrgOptions::default());

  let document = r#"#+TITLE: A Tour
#+AUTHOR: Jane Doe
#+DATE: <2024-03-02 Sat 14:45>
#+TAGS: rust org
#+CATEGORY: notes
#+DESCRIPTION: Everything at once.
#+KEYWORDS: tour, demo
#+OPTIONS: toc:nil

* Basics
Some /italic/, *bold*, _underlined_, +struck+ and =verbatim= text.

** Lists
- first
  - nested
- second

1. one
2. two

** Code
#+BEGIN_SRC rust
fn main() { println!("<hi>"); }
#+END_SRC

** Quote
#+BEGIN_QUOTE
Stay hungry.
#+END_QUOTE

-----

| Name | Value |
|------+-------|
| a    | 1     |
| b    | 2     |

* Links
See [[https://orgmode.org][Org]] and [[index.html]].
"#;

  let result = processor.render(document);
  let meta = &result.metadata;

  assert_eq!(meta.title, "A Tour");
  assert_eq!(meta.author, "Jane Doe");
  assert_eq!(meta.tags, vec!["rust", "org"]);
  assert_eq!(meta.categories, vec!["notes"]);
  assert_eq!(meta.description, "Everything at once.");
  assert_eq!(meta.keywords, vec!["tour", "demo"]);
  assert_eq!(
    meta.date.map(|d| d.to_iso8601()),
    Some("2024-03-02T14:45:00".to_string())
  );

  let html = &result.content_html;
  assert!(!html.contains("#+"), "directives leaked:\n{html}");
  assert_html_contains(html, &[
    r#"<h1 id="basics">Basics</h1>"#,
    "<em>italic</em>",
    "<strong>bold</strong>",
    "<u>underlined</u>",
    "<del>struck</del>",
    "<code>verbatim</code>",
    r#"<h2 id="lists">Lists</h2>"#,
    "<ul>\n<li>first</li>\n<ul>\n<li>nested</li>\n</ul>\n<li>second</li>\n</ul>",
    "<ol>\n<li>one</li>\n<li>two</li>\n</ol>",
    r#"<pre class="src src-rust"><code>"#,
    "&lt;hi&gt;",
    "</code></pre>",
    "<blockquote>\n<p>Stay hungry.</p>\n</blockquote>",
    "<hr />",
    "<th>Name</th>",
    "<td>b</td>",
    r#"<a href="https://orgmode.org">Org</a>"#,
    r#"<a href="index.html">index.html</a>"#,
  ]);

  assert_eq!(result.headings.len(), 5);
  assert_html_contains(&result.toc_html, &[
    r#"<div id="table-of-contents">"#,
    "<h2>Table of Contents</h2>",
    r##"<li><a href="#basics">Basics</a></li>"##,
    r##"<li><a href="#links">Links</a></li>"##,
  ]);
}

#[test]
fn test_document_without_headings_has_no_toc() {
  let result = OrgProcessor::default().render("#+TITLE: Flat\nJust a line.");
  assert_eq!(result.toc_html, "");
  assert_eq!(result.content_html, "<p>Just a line.</p>");
}

#[test]
fn test_bad_date_is_not_fatal() {
  let result =
    OrgProcessor::default().render("#+DATE: sometime soon\n* Still works");
  assert!(result.metadata.date.is_none());
  assert!(result.content_html.contains("Still works"));
}

#[test]
fn test_unterminated_code_block_runs_to_end() {
  let result =
    OrgProcessor::default().render("#+BEGIN_SRC python\nx = 1\n* not heading");
  assert!(result.headings.is_empty());
  assert!(result.content_html.ends_with("* not heading"));
  assert!(!result.content_html.contains("</code></pre>"));
}

#[test]
fn test_processor_is_reusable() {
  let processor = OrgProcessor::default();
  let first = processor.render("- a\n  - b");
  let second = processor.render("- a\n  - b");
  assert_eq!(first, second);
}

#[test]
fn test_parallel_documents_are_independent() {
  let processor = OrgProcessor::default();
  let handles: Vec<_> = (0..4)
    .map(|i| {
      let processor = processor.clone();
      std::thread::spawn(move || processor.render(&format!("* Doc {i}")))
    })
    .collect();

  for (i, handle) in handles.into_iter().enumerate() {
    let result = handle.join().unwrap();
    assert_eq!(result.headings[0].title, format!("Doc {i}"));
  }
}
