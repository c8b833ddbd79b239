//! File handles for upload
//!
//! A [`FileHandle`] owns the bytes of a spreadsheet and its display name, so
//! its size is known before the transfer begins.

use crate::error::{CliError, Result, UploadStage};
use std::path::Path;

/// Extensions the server accepts
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["xls", "xlsx"];

/// A file selected for upload
#[derive(Debug, Clone)]
pub struct FileHandle {
    name: String,
    bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CliError::config(format!("'{}' is not a file path", path.display())))?;
        Ok(Self::new(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// MIME type the server expects for the extension
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Some("xls") => "application/vnd.ms-excel",
            _ => "application/octet-stream",
        }
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    /// Check extension and size before anything is sent
    pub fn validate(&self, max_bytes: u64) -> Result<()> {
        let accepted = self
            .extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));
        if !accepted {
            return Err(CliError::upload(
                UploadStage::Init,
                None,
                format!("'{}' is not a spreadsheet; only .xls and .xlsx files are accepted", self.name),
            ));
        }

        if self.size() > max_bytes {
            return Err(CliError::upload(
                UploadStage::Init,
                None,
                format!(
                    "'{}' is {} but the limit is {}",
                    self.name,
                    crate::progress::format_bytes(self.size()),
                    crate::progress::format_bytes(max_bytes)
                ),
            ));
        }

        Ok(())
    }
}
