// CLI extractor - uses a standalone `yt-dlp` executable
//
// Also hosts the `-J` invocation shared with the module tier, which only
// differs in the program and its leading arguments.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use async_trait::async_trait;

use super::traits::PlaylistExtractor;
use crate::downloader::errors::DownloadError;
use crate::downloader::models::{ExtractionMode, PlaylistInfo};
use crate::downloader::utils::{failure_detail, run_output};

/// `[--flat-playlist] -J <url>`
pub fn dump_args(url: &str, mode: ExtractionMode) -> Vec<String> {
    let mut args = Vec::with_capacity(3);
    if mode == ExtractionMode::Flat {
        args.push("--flat-playlist".to_string());
    }
    args.push("-J".to_string());
    args.push(url.to_string());
    args
}

/// Run yt-dlp with `-J` and parse its stdout
pub async fn run_dump(
    program: &OsStr,
    leading: &[&str],
    url: &str,
    mode: ExtractionMode,
) -> Result<PlaylistInfo, DownloadError> {
    let mut args: Vec<OsString> = leading.iter().map(OsString::from).collect();
    args.extend(dump_args(url, mode).into_iter().map(OsString::from));

    log::debug!(
        "running {} {}",
        program.to_string_lossy(),
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let output = run_output(program, &args)
        .await
        .map_err(DownloadError::ExecutionError)?;

    if !output.status.success() {
        return Err(DownloadError::ExecutionError(failure_detail(&output)));
    }

    PlaylistInfo::from_json(&output.stdout)
}

/// Tier 3: a `yt-dlp` / `yt-dlp.exe` found on PATH
pub struct CliExtractor {
    ytdlp_path: Option<PathBuf>,
}

impl CliExtractor {
    pub fn new(ytdlp_path: Option<PathBuf>) -> Self {
        Self { ytdlp_path }
    }
}

#[async_trait]
impl PlaylistExtractor for CliExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp executable"
    }

    fn unavailable_reason(&self) -> Option<String> {
        match self.ytdlp_path {
            Some(_) => None,
            None => Some("yt-dlp executable not found on PATH".to_string()),
        }
    }

    async fn extract(&self, url: &str, mode: ExtractionMode) -> Result<PlaylistInfo, DownloadError> {
        let path = self
            .ytdlp_path
            .as_ref()
            .ok_or_else(|| DownloadError::ExecutionError("yt-dlp executable not found".to_string()))?;
        run_dump(path.as_os_str(), &[], url, mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_mode_adds_flat_playlist() {
        assert_eq!(
            dump_args("https://soundcloud.com/u/sets/s", ExtractionMode::Flat),
            vec!["--flat-playlist", "-J", "https://soundcloud.com/u/sets/s"]
        );
        assert_eq!(
            dump_args("https://soundcloud.com/u/sets/s", ExtractionMode::Full),
            vec!["-J", "https://soundcloud.com/u/sets/s"]
        );
    }

    #[test]
    fn missing_executable_is_unavailable() {
        let cli = CliExtractor::new(None);
        assert_eq!(
            cli.unavailable_reason().as_deref(),
            Some("yt-dlp executable not found on PATH")
        );
        assert!(CliExtractor::new(Some(PathBuf::from("/bin/yt-dlp")))
            .unavailable_reason()
            .is_none());
    }
}
