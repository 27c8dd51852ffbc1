//! Shared utility functions.

use std::path::{Path, PathBuf};

/// Resolve `path` against the current directory when it is relative.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_relative() {
        Ok(std::env::current_dir()?.join(path))
    } else {
        Ok(path.to_path_buf())
    }
}

/// Host to show in URLs for a bind address.
///
/// "0.0.0.0" -> "localhost"
pub fn display_host(bind: &str) -> &str {
    if bind == "0.0.0.0" { "localhost" } else { bind }
}

/// Default output path for a rendered document: the input with an `html`
/// extension.
///
/// "notes/todo.md" -> "notes/todo.html"
pub fn html_output_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path() {
        assert_eq!(
            absolute_path(Path::new("/tmp/a.md")).unwrap(),
            PathBuf::from("/tmp/a.md")
        );
        let relative = absolute_path(Path::new("a.md")).unwrap();
        assert!(relative.is_absolute());
        assert!(relative.ends_with("a.md"));
    }

    #[test]
    fn test_display_host() {
        assert_eq!(display_host("0.0.0.0"), "localhost");
        assert_eq!(display_host("127.0.0.1"), "127.0.0.1");
    }

    #[test]
    fn test_html_output_path() {
        assert_eq!(
            html_output_path(Path::new("notes/todo.md")),
            PathBuf::from("notes/todo.html")
        );
        assert_eq!(html_output_path(Path::new("README")), PathBuf::from("README.html"));
    }
}
