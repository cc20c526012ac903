//! Resume attachment handling
//!
//! A resume is picked once (name and size are captured at selection time, like a
//! browser `File`) and read only when the form is submitted. The file content is
//! turned into a data URL and only its base64 body is kept for the payload.

use base64::Engine as _;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Resume errors
#[derive(Error, Debug)]
pub enum ResumeError {
    #[error("Resume file size must be less than {}", format_limit(.limit))]
    TooLarge { size: u64, limit: u64 },

    #[error("Failed to submit application: could not read resume: {0}")]
    Read(#[from] io::Error),
}

/// A file chosen in the resume input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl ResumeFile {
    /// Select a file, reading its metadata but not its content.
    pub fn select(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(ResumeFile {
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    /// Reject files above `limit` bytes without touching their content.
    pub fn ensure_within(&self, limit: u64) -> Result<(), ResumeError> {
        if self.size > limit {
            return Err(ResumeError::TooLarge {
                size: self.size,
                limit,
            });
        }
        Ok(())
    }

    /// Read the file as a `data:<mime>;base64,<body>` URL.
    pub async fn read_as_data_url(&self) -> Result<String, ResumeError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let mime = mime_guess::from_path(&self.path).first_or_octet_stream();
        let body = base64::engine::general_purpose::STANDARD.encode(&bytes);
        tracing::debug!(
            file = %self.name,
            bytes = bytes.len(),
            encoded = body.len(),
            "Encoded resume"
        );
        Ok(format!("data:{};base64,{}", mime.essence_str(), body))
    }

    /// Read the file and return only the base64 body of its data URL.
    pub async fn to_base64(&self) -> Result<String, ResumeError> {
        let data_url = self.read_as_data_url().await?;
        Ok(strip_data_url_prefix(&data_url).to_string())
    }
}

/// Drop the `data:...,` metadata prefix, keeping the encoded body.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, body)| body)
        .unwrap_or_default()
}

fn format_limit(limit: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    let limit = *limit;
    if limit >= MIB && limit % MIB == 0 {
        format!("{}MB", limit / MIB)
    } else {
        format!("{} bytes", limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(
            strip_data_url_prefix("data:application/pdf;base64,JVBERi0="),
            "JVBERi0="
        );
        assert_eq!(strip_data_url_prefix("data:text/plain;base64,"), "");
        assert_eq!(strip_data_url_prefix("no-comma"), "");
    }

    #[test]
    fn test_select_captures_name_and_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let file = ResumeFile::select(&path).unwrap();
        assert_eq!(file.name, "cv.pdf");
        assert_eq!(file.size, 8);
    }

    #[test]
    fn test_select_rejects_missing_file_and_directory() {
        let dir = TempDir::new().unwrap();
        assert!(ResumeFile::select(dir.path().join("missing.pdf")).is_err());
        assert!(ResumeFile::select(dir.path()).is_err());
    }

    #[test]
    fn test_size_ceiling() {
        let limit = 5 * 1024 * 1024;
        let file = ResumeFile {
            name: "big.pdf".to_string(),
            path: PathBuf::from("big.pdf"),
            size: 6 * 1024 * 1024,
        };
        let err = file.ensure_within(limit).unwrap_err();
        assert!(matches!(err, ResumeError::TooLarge { .. }));
        assert_eq!(err.to_string(), "Resume file size must be less than 5MB");

        let exact = ResumeFile {
            size: limit,
            ..file
        };
        assert!(exact.ensure_within(limit).is_ok());
    }

    #[tokio::test]
    async fn test_data_url_and_base64_body() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.pdf");
        let mut handle = std::fs::File::create(&path).unwrap();
        handle.write_all(b"hello resume").unwrap();
        drop(handle);

        let file = ResumeFile::select(&path).unwrap();
        let data_url = file.read_as_data_url().await.unwrap();
        assert_eq!(data_url, "data:application/pdf;base64,aGVsbG8gcmVzdW1l");
        assert_eq!(file.to_base64().await.unwrap(), "aGVsbG8gcmVzdW1l");
    }

    #[tokio::test]
    async fn test_read_error_when_file_disappears() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.docx");
        std::fs::write(&path, b"x").unwrap();
        let file = ResumeFile::select(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = file.to_base64().await.unwrap_err();
        assert!(matches!(err, ResumeError::Read(_)));
        assert!(err.to_string().starts_with("Failed to submit application:"));
    }
}
