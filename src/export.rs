//! Writing rendered results to a plain text file.
//!
//! Blocks are separated by a blank line and any existing file is replaced.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Default results file name, e.g. `results_20261016_142501.txt`.
pub fn default_output_name() -> String {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("results_{}.txt", ts)
}

pub fn save_results_txt<P: AsRef<Path>>(blocks: &[String], path: P) -> Result<(), ExportError> {
    let path = path.as_ref();
    let mut f = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    f.write_all(blocks.join(BLOCK_SEPARATOR).as_bytes())
        .and_then(|_| f.flush())
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_blocks_separated_by_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.txt");
        std::fs::write(&path, "stale content that must disappear").unwrap();
        let blocks = vec!["first".to_string(), "second\nline".to_string()];
        save_results_txt(&blocks, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\n\nsecond\nline");
    }

    #[test]
    fn missing_parent_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("results.txt");
        let err = save_results_txt(&["x".to_string()], &path).unwrap_err();
        assert!(matches!(err, ExportError::Create { .. }));
    }

    #[test]
    fn default_name_is_timestamped() {
        let name = default_output_name();
        assert!(name.starts_with("results_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(name.len(), "results_YYYYMMDD_HHMMSS.txt".len());
    }
}
