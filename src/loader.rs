//! Word list and hash list loading.

use std::{collections::HashSet, path::Path};

use eyre::{Result, WrapErr};
use futures::StreamExt;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
};
use tokio_stream::wrappers::LinesStream;

/// Reads the trimmed, non-empty lines of a file.
pub async fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let f = File::open(path)
        .await
        .wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let mut lines = LinesStream::new(BufReader::new(f).lines());

    let mut out = Vec::new();
    while let Some(line) = lines.next().await {
        let line = line.wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_string());
        }
    }
    Ok(out)
}

/// Reads a word list, keeping the first occurrence of every word.
pub async fn read_wordlist(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let words = read_lines(path)
        .await?
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect();
    Ok(words)
}

/// Reads target hashes, one per line.
pub async fn read_hashes(path: impl AsRef<Path>) -> Result<Vec<String>> {
    read_lines(path).await
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("combicrack-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn trims_and_skips_blank_lines() {
        let path = scratch_file("lines", "  alpha \n\n\tbeta\r\n   \ngamma");
        let lines = read_lines(&path).await.unwrap();
        assert_eq!(lines, ["alpha", "beta", "gamma"]);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn wordlist_drops_duplicates_in_order() {
        let path = scratch_file("words", "b\na\nb\nc\na\n");
        let words = read_wordlist(&path).await.unwrap();
        assert_eq!(words, ["b", "a", "c"]);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_reports_the_path() {
        let err = read_hashes("/definitely/not/here.txt").await.unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
