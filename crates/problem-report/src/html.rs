//! Markdown to HTML conversion.
//!
//! This is a fixed sequence of regex rewrites tuned for the reports this crate renders, not a
//! Markdown parser. It understands `#`..`####` headers, `**bold**`, single-level `- ` lists and
//! fenced code blocks; everything else passes through as (escaped) text.

use regex::Regex;
use std::sync::LazyLock;

struct Rewrite {
    regex: Regex,
    replacement: &'static str,
}

impl Rewrite {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            regex: Regex::new(pattern).expect("rewrite pattern is valid"),
            replacement,
        }
    }
}

// Order matters: list items must exist before runs of them are wrapped, and code fences are
// rewritten last so headers inside snippets are still transformed.
static REWRITES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    vec![
        Rewrite::new(r"(?m)^# (.*?)$", "<h1>${1}</h1>"),
        Rewrite::new(r"(?m)^## (.*?)$", "<h2>${1}</h2>"),
        Rewrite::new(r"(?m)^### (.*?)$", "<h3>${1}</h3>"),
        Rewrite::new(r"(?m)^#### (.*?)$", "<h4>${1}</h4>"),
        Rewrite::new(r"\*\*(.*?)\*\*", "<strong>${1}</strong>"),
        Rewrite::new(r"(?m)^- (.*?)$", "<li>${1}</li>"),
        Rewrite::new(r"(<li>.*?</li>\n?)+", "<ul>${0}</ul>"),
        Rewrite::new(
            r"(?s)```(\w*)\n(.*?)\n```",
            r#"<pre><code class="language-${1}">${2}</code></pre>"#,
        ),
    ]
});

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Problems Report</title>
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, 'Open Sans', 'Helvetica Neue', sans-serif;
      line-height: 1.6;
      max-width: 900px;
      margin: 0 auto;
      padding: 20px;
      color: #333;
    }
    h1 { color: #333; }
    h2 { color: #444; border-bottom: 1px solid #eaecef; padding-bottom: 0.3em; }
    h3 { color: #555; }
    h4 { color: #666; }
    pre {
      background-color: #f6f8fa;
      border-radius: 3px;
      padding: 16px;
      overflow: auto;
    }
    code {
      font-family: 'SFMono-Regular', Consolas, 'Liberation Mono', Menlo, Courier, monospace;
      font-size: 85%;
    }
    .error { color: #d73a49; }
    .warning { color: #e36209; }
    .info { color: #0366d6; }
    .hint { color: #6f42c1; }
  </style>
</head>
<body>
"#;

const DOCUMENT_TAIL: &str = "\n</body>\n</html>";

/// Escape the three characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Convert report Markdown into an HTML fragment (no document shell).
pub fn markdown_to_html_fragment(markdown: &str) -> String {
    let mut html = escape_html(markdown);
    for rewrite in REWRITES.iter() {
        html = rewrite
            .regex
            .replace_all(&html, rewrite.replacement)
            .into_owned();
    }
    html
}

/// Convert report Markdown into a complete, styled HTML document.
pub fn markdown_to_html(markdown: &str) -> String {
    let body = markdown_to_html_fragment(markdown);
    let mut document = String::with_capacity(DOCUMENT_HEAD.len() + body.len() + DOCUMENT_TAIL.len());
    document.push_str(DOCUMENT_HEAD);
    document.push_str(&body);
    document.push_str(DOCUMENT_TAIL);
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_bold_and_list() {
        let html = markdown_to_html("# Title\n**bold**\n- item");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<ul><li>item</li></ul>"));
        assert_eq!(html.matches("<li>").count(), 1);
        assert_eq!(html.matches("<ul>").count(), 1);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_header_levels_do_not_bleed() {
        let html = markdown_to_html_fragment("## Two\n#### Four\n##### Five");
        assert_eq!(html, "<h2>Two</h2>\n<h4>Four</h4>\n##### Five");
    }

    #[test]
    fn test_consecutive_items_share_one_list() {
        let html = markdown_to_html_fragment("- a\n- b\n\n- c");
        assert_eq!(html, "<ul><li>a</li>\n<li>b</li>\n</ul>\n<ul><li>c</li></ul>");
    }

    #[test]
    fn test_code_block_is_escaped_and_tagged() {
        let html = markdown_to_html_fragment("```rs\n>1: if a < b && c {\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-rs\">&gt;1: if a &lt; b &amp;&amp; c {</code></pre>"
        );
    }

    #[test]
    fn test_unknown_constructs_pass_through() {
        assert_eq!(markdown_to_html_fragment("plain _text_ `code`"), "plain _text_ `code`");
    }
}
