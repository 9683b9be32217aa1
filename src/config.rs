// Runtime configuration assembled from CLI flags and environment

use std::path::PathBuf;

use crate::downloader::tools::{self, ToolType};
use crate::downloader::{Downloader, ExtractorConfig, PlaylistResolver, SpotdlLauncher};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interpreter for the yt_dlp API/module tiers and `-m spotdl`
    pub python: String,
    pub spotdl: SpotdlLauncher,
    /// Standalone yt-dlp, if installed
    pub ytdlp: Option<PathBuf>,
}

impl AppConfig {
    /// `python` overrides interpreter detection; `spotdl_bin` switches from
    /// `python -m spotdl` to a standalone executable.
    pub fn new(python: Option<String>, spotdl_bin: Option<PathBuf>) -> Self {
        let python = python
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(tools::find_python);
        let spotdl = match spotdl_bin {
            Some(path) => SpotdlLauncher::Executable(path),
            None => SpotdlLauncher::Module {
                python: python.clone(),
            },
        };

        Self {
            python,
            spotdl,
            ytdlp: tools::locate(ToolType::YtDlp),
        }
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            python: self.python.clone(),
            executable: self.ytdlp.clone(),
        }
    }

    pub fn resolver(&self) -> PlaylistResolver {
        PlaylistResolver::new(&self.extractor_config())
    }

    pub fn downloader(&self) -> Downloader {
        Downloader::new(self.spotdl.clone())
    }
}
