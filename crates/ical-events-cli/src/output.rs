//! Writing the generated page to disk.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Failure to write the output file.
#[derive(Debug, Error)]
#[error("cannot write output file {}: {source}", path.display())]
pub struct OutputError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Writes `html` to `path`, creating missing parent directories.
pub async fn write_output(html: &str, path: &Path) -> Result<(), OutputError> {
    let wrap = |source| OutputError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(wrap)?;
    }
    tokio::fs::write(path, html).await.map_err(wrap)?;

    debug!(path = %path.display(), bytes = html.len(), "Wrote output file");
    Ok(())
}

/// Directory holding the output file, used as the deploy root.
pub fn output_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("events").join("index.html");

        write_output("<!DOCTYPE html>", &path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<!DOCTYPE html>");
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "old").unwrap();

        write_output("new", &path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("index.html");

        let err = write_output("x", &path).await.unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().starts_with("cannot write output file"));
    }

    #[test]
    fn output_dir_of_paths() {
        assert_eq!(output_dir(Path::new("./events/index.html")), PathBuf::from("./events"));
        assert_eq!(output_dir(Path::new("index.html")), PathBuf::from("."));
    }
}
