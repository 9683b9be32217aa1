// PlaylistExtractor trait and common types

use std::path::PathBuf;

use async_trait::async_trait;

use crate::downloader::errors::DownloadError;
use crate::downloader::models::{ExtractionMode, PlaylistInfo, Query};
use crate::downloader::tools::{self, ToolType};

/// Configuration shared by the built-in tiers
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Interpreter for the API and module tiers
    pub python: String,
    /// Standalone yt-dlp binary; `None` when it is not installed
    pub executable: Option<PathBuf>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            python: tools::find_python(),
            executable: tools::locate(ToolType::YtDlp),
        }
    }
}

impl ExtractorConfig {
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    pub fn with_executable(mut self, path: Option<PathBuf>) -> Self {
        self.executable = path;
        self
    }
}

/// Result of one (tier, mode) attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Tracks(Vec<Query>),
    Empty,
    Failed(String),
}

impl AttemptOutcome {
    pub fn from_result(result: Result<PlaylistInfo, DownloadError>) -> Self {
        match result {
            Ok(info) => {
                let queries = info.queries();
                if queries.is_empty() {
                    Self::Empty
                } else {
                    Self::Tracks(queries)
                }
            }
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// One tier of the resolver ladder
#[async_trait]
pub trait PlaylistExtractor: Send + Sync {
    /// Name used in logs and failure reasons
    fn name(&self) -> &'static str;

    /// `Some(reason)` when the tier cannot run at all; nothing is spawned then
    fn unavailable_reason(&self) -> Option<String> {
        None
    }

    /// Run yt-dlp once in the given mode
    async fn extract(&self, url: &str, mode: ExtractionMode) -> Result<PlaylistInfo, DownloadError>;
}
