//! LSP/URI helpers.
//!
//! Diagnostics arrive keyed by `file://` URIs; reports show workspace-relative paths. These
//! helpers convert between the two without any URL crate.

use std::fmt::Write as _;
use std::fs;
use std::path::{Component, Path, PathBuf};

const FILE_SCHEME: &str = "file://";

fn is_uri_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/')
}

/// `file://` URI for a local path. Existing paths are canonicalized first.
pub fn path_to_file_uri(path: &Path) -> String {
    let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let mut text = absolute.to_string_lossy().into_owned();
    if cfg!(windows) {
        text = text.replace('\\', "/");
        if !text.starts_with('/') {
            text.insert(0, '/');
        }
    }
    format!("{FILE_SCHEME}{}", percent_encode_path(&text))
}

/// Percent-encode every byte except unreserved characters and `/`.
pub fn percent_encode_path(path: &str) -> String {
    path.bytes().fold(String::with_capacity(path.len()), |mut out, byte| {
        if is_uri_safe(byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
        out
    })
}

/// Decode `%XX` escapes. Malformed escapes are kept as written.
pub fn percent_decode_path(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut rest = bytes;
    while let Some((&first, tail)) = rest.split_first() {
        let escaped = (first == b'%')
            .then(|| tail.get(..2))
            .flatten()
            .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(byte) => {
                decoded.push(byte);
                rest = &tail[2..];
            }
            None => {
                decoded.push(first);
                rest = tail;
            }
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Local path of a `file://` URI; `None` for any other scheme (`untitled:`, `git:`).
pub fn file_uri_to_path(uri: &str) -> Option<PathBuf> {
    let encoded = uri.strip_prefix(FILE_SCHEME)?;
    let encoded = encoded
        .strip_prefix("localhost")
        .filter(|rest| rest.starts_with('/'))
        .unwrap_or(encoded);
    let mut path = percent_decode_path(encoded);
    if cfg!(windows) {
        // `/C:/x` -> `C:\x`
        if path.starts_with('/') && path.get(2..3) == Some(":") {
            path.remove(0);
        }
        path = path.replace('/', "\\");
    }
    Some(PathBuf::from(path))
}

/// `path` relative to `root`, `/`-separated. Paths outside `root` are returned whole.
pub fn relative_display_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => path.to_string_lossy().into_owned(),
        Ok(relative) => relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encoding() {
        assert_eq!(percent_encode_path("/tmp/my file#1.ts"), "/tmp/my%20file%231.ts");
        assert_eq!(percent_decode_path("/tmp/a%20b"), "/tmp/a b");
        assert_eq!(percent_decode_path("/tmp/100%"), "/tmp/100%");
        assert_eq!(percent_decode_path("/tmp/%zz"), "/tmp/%zz");
    }

    #[test]
    fn test_file_uri_to_path_decodes() {
        assert_eq!(
            file_uri_to_path("file:///work/my%20app/src/a.ts"),
            Some(PathBuf::from("/work/my app/src/a.ts"))
        );
        assert_eq!(
            file_uri_to_path("file://localhost/etc/hosts"),
            Some(PathBuf::from("/etc/hosts"))
        );
        assert_eq!(file_uri_to_path("untitled:Untitled-1"), None);
    }

    #[test]
    fn test_relative_display_path() {
        let root = Path::new("/work/app");
        assert_eq!(
            relative_display_path(Path::new("/work/app/src/lib/a.ts"), root),
            "src/lib/a.ts"
        );
        assert_eq!(
            relative_display_path(Path::new("/elsewhere/b.ts"), root),
            "/elsewhere/b.ts"
        );
    }
}
