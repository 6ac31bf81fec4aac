use super::journalctl::split_lines;
use crate::image_stats::domain::Period;
use crate::ports::outbound::LogSource;
use crate::shared::error::PullwatchError;
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

/// Maximum log file size (100 MB)
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// FileLogSource adapter reading a previously exported journal
///
/// The file is taken as already scoped to the wanted window (e.g. produced
/// with `journalctl --since ... > pulls.log`); the period is only used in
/// messages.
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_error(&self, details: impl Into<String>) -> anyhow::Error {
        PullwatchError::FileReadError {
            path: self.path.clone(),
            details: details.into(),
        }
        .into()
    }

    /// Reads the file after rejecting symlinks, non-regular files and
    /// oversized files.
    fn safe_read(&self) -> Result<String> {
        let metadata =
            fs::symlink_metadata(&self.path).map_err(|e| self.read_error(e.to_string()))?;

        if metadata.is_symlink() {
            return Err(self.read_error(
                "Log file is a symbolic link. Symbolic links are not allowed.",
            ));
        }

        if !metadata.is_file() {
            return Err(self.read_error("Not a regular file"));
        }

        if metadata.len() > MAX_FILE_SIZE {
            return Err(self.read_error(format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                metadata.len(),
                MAX_FILE_SIZE
            )));
        }

        let bytes = fs::read(&self.path).map_err(|e| self.read_error(e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[async_trait]
impl LogSource for FileLogSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_log_lines(&self, since: &Period) -> Result<Vec<String>> {
        tracing::debug!(path = %self.path.display(), %since, "reading exported log file");
        let content = self.safe_read()?;
        Ok(split_lines(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_non_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("crio.log");
        fs::write(&path, "Pulled image: a:1\n\nPulled image: b:2\n").unwrap();

        let lines = FileLogSource::new(path)
            .fetch_log_lines(&Period::default())
            .await
            .unwrap();
        assert_eq!(lines, vec!["Pulled image: a:1", "Pulled image: b:2"]);
    }

    #[tokio::test]
    async fn test_empty_file_gives_no_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.log");
        fs::write(&path, "").unwrap();

        let lines = FileLogSource::new(path)
            .fetch_log_lines(&Period::default())
            .await
            .unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_tolerated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.log");
        fs::write(&path, b"Pulled image: a:1\n\xff\xfe\n").unwrap();

        let lines = FileLogSource::new(path)
            .fetch_log_lines(&Period::default())
            .await
            .unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileLogSource::new(PathBuf::from("/nonexistent/crio.log"));
        let error = source.fetch_log_lines(&Period::default()).await.unwrap_err();
        assert!(format!("{}", error).contains("Failed to read file"));
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileLogSource::new(temp_dir.path().to_path_buf());
        let error = source.fetch_log_lines(&Period::default()).await.unwrap_err();
        assert!(format!("{}", error).contains("Not a regular file"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.log");
        fs::write(&target, "Pulled image: a:1\n").unwrap();
        let link = temp_dir.path().join("link.log");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let error = FileLogSource::new(link)
            .fetch_log_lines(&Period::default())
            .await
            .unwrap_err();
        assert!(format!("{}", error).contains("symbolic link"));
    }
}
