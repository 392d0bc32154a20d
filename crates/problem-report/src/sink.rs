//! Report delivery: clipboard and files.

use crate::error::ReportError;
use crate::host::{Clipboard, SaveFilter};
use crate::html::markdown_to_html;
use std::fs;
use std::path::{Path, PathBuf};

/// Output format of a saved report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown (`.md`).
    Markdown,
    /// Styled HTML document (`.html`).
    Html,
    /// Markdown text in a `.txt` file.
    Text,
}

impl ReportFormat {
    /// Formats in prompt order.
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Markdown, ReportFormat::Html, ReportFormat::Text];

    /// Prompt label.
    pub fn label(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "Markdown",
            ReportFormat::Html => "HTML",
            ReportFormat::Text => "Text",
        }
    }

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
            ReportFormat::Text => "txt",
        }
    }

    /// Save-dialog filter for this format.
    pub fn save_filter(self) -> SaveFilter {
        match self {
            ReportFormat::Markdown => SaveFilter {
                name: "Markdown",
                extensions: &["md"],
            },
            ReportFormat::Html => SaveFilter {
                name: "HTML",
                extensions: &["html"],
            },
            ReportFormat::Text => SaveFilter {
                name: "Text",
                extensions: &["txt"],
            },
        }
    }

    /// Turn rendered Markdown into this format's file content.
    pub fn content_from_markdown(self, markdown: &str) -> String {
        match self {
            ReportFormat::Html => markdown_to_html(markdown),
            ReportFormat::Markdown | ReportFormat::Text => markdown.to_string(),
        }
    }
}

/// Append the format's extension unless `path` already ends with it (case-insensitive).
pub fn ensure_extension(path: &Path, format: ReportFormat) -> PathBuf {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(format.extension()));
    if has_extension {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Write `content` verbatim to `path` (after [`ensure_extension`]). Returns the final path.
pub fn write_report_file(
    path: &Path,
    format: ReportFormat,
    content: &str,
) -> Result<PathBuf, ReportError> {
    let path = ensure_extension(path, format);
    fs::write(&path, content)?;
    log::debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}

/// Put `content` on the clipboard.
pub fn copy_to_clipboard<C: Clipboard + ?Sized>(
    clipboard: &mut C,
    content: &str,
) -> Result<(), ReportError> {
    clipboard.write_text(content)?;
    log::debug!("copied {} bytes to clipboard", content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_appended_when_missing() {
        assert_eq!(
            ensure_extension(Path::new("/tmp/report"), ReportFormat::Markdown),
            PathBuf::from("/tmp/report.md")
        );
        assert_eq!(
            ensure_extension(Path::new("/tmp/report.md"), ReportFormat::Html),
            PathBuf::from("/tmp/report.md.html")
        );
    }

    #[test]
    fn test_existing_extension_kept() {
        assert_eq!(
            ensure_extension(Path::new("out/Report.HTML"), ReportFormat::Html),
            PathBuf::from("out/Report.HTML")
        );
        assert_eq!(
            ensure_extension(Path::new("notes.txt"), ReportFormat::Text),
            PathBuf::from("notes.txt")
        );
    }

    #[test]
    fn test_write_report_file_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let written =
            write_report_file(&dir.path().join("problems"), ReportFormat::Text, "# Report\n").unwrap();
        assert_eq!(written, dir.path().join("problems.txt"));
        assert_eq!(fs::read_to_string(written).unwrap(), "# Report\n");
    }

    #[test]
    fn test_html_content_is_a_document() {
        let html = ReportFormat::Html.content_from_markdown("# T");
        assert!(html.contains("<h1>T</h1>"));
        assert_eq!(ReportFormat::Text.content_from_markdown("# T"), "# T");
    }
}
