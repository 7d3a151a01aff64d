//! Source list loading
//!
//! The source list is a plain-text file with one playlist URL per line.
//! Blank lines and `#`-prefixed comment lines are ignored.

use std::path::Path;

use tracing::debug;

use crate::errors::{SourceError, SourceResult};

/// Load the ordered list of playlist source URLs
pub async fn load_source_list(path: &Path) -> SourceResult<Vec<String>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SourceError::SourceList {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let urls: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    debug!("Loaded {} source URLs from {}", urls.len(), path.display());
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_comments_and_blanks_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# main sources").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "http://example.com/a.m3u").unwrap();
        writeln!(file, "  http://example.com/b.m3u  ").unwrap();
        writeln!(file, "# disabled: http://example.com/c.m3u").unwrap();

        let urls = load_source_list(file.path()).await.unwrap();
        assert_eq!(urls, vec!["http://example.com/a.m3u", "http://example.com/b.m3u"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let result = load_source_list(Path::new("/nonexistent/sources.txt")).await;
        assert!(matches!(result, Err(SourceError::SourceList { .. })));
    }
}
