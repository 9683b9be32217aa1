// Python extractors - tiers 1 and 2
//
// Tier 1 drives the yt_dlp library API (`YoutubeDL.extract_info`) through an
// inline driver script, so the library options are used instead of the CLI.
// Tier 2 runs `python -m yt_dlp -J`, which only needs the module to be
// importable as a program.

use std::ffi::OsStr;

use async_trait::async_trait;

use super::cli::run_dump;
use super::traits::PlaylistExtractor;
use crate::downloader::errors::DownloadError;
use crate::downloader::models::{ExtractionMode, PlaylistInfo};
use crate::downloader::utils::run_output;

/// argv: `<url> <flat|full>`; prints `{"entries": [{title, uploader}, ...]}`
const API_DRIVER: &str = r#"
import json, sys
from yt_dlp import YoutubeDL

url, mode = sys.argv[1], sys.argv[2]
opts = {
    "skip_download": True,
    "quiet": True,
    "extract_flat": "in_playlist" if mode == "flat" else False,
}
with YoutubeDL(opts) as ydl:
    info = ydl.extract_info(url, download=False)

entries = []
for entry in (info or {}).get("entries") or []:
    if entry:
        entries.append({"title": entry.get("title"), "uploader": entry.get("uploader")})
json.dump({"entries": entries}, sys.stdout)
"#;

/// Tier 1: the yt_dlp Python API
pub struct PythonApiExtractor {
    python_cmd: String,
}

impl PythonApiExtractor {
    pub fn new(python_cmd: impl Into<String>) -> Self {
        Self {
            python_cmd: python_cmd.into(),
        }
    }

    fn build_args(url: &str, mode: ExtractionMode) -> Vec<String> {
        vec![
            "-c".to_string(),
            API_DRIVER.to_string(),
            url.to_string(),
            mode.to_string(),
        ]
    }

    /// The raised exception is on the last line of a Python traceback
    fn exception_line(stderr: &[u8]) -> Option<String> {
        String::from_utf8_lossy(stderr)
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
impl PlaylistExtractor for PythonApiExtractor {
    fn name(&self) -> &'static str {
        "Python API"
    }

    async fn extract(&self, url: &str, mode: ExtractionMode) -> Result<PlaylistInfo, DownloadError> {
        log::debug!("running yt_dlp API via {} ({} mode)", self.python_cmd, mode);

        let output = run_output(OsStr::new(&self.python_cmd), Self::build_args(url, mode))
            .await
            .map_err(DownloadError::ExecutionError)?;

        if !output.status.success() {
            let detail = Self::exception_line(&output.stderr)
                .unwrap_or_else(|| format!("interpreter exited with {}", output.status));
            return Err(DownloadError::ExecutionError(detail));
        }

        PlaylistInfo::from_json(&output.stdout)
    }
}

/// Tier 2: `python -m yt_dlp`
pub struct PythonModuleExtractor {
    python_cmd: String,
}

impl PythonModuleExtractor {
    pub fn new(python_cmd: impl Into<String>) -> Self {
        Self {
            python_cmd: python_cmd.into(),
        }
    }
}

#[async_trait]
impl PlaylistExtractor for PythonModuleExtractor {
    fn name(&self) -> &'static str {
        "python -m yt_dlp"
    }

    async fn extract(&self, url: &str, mode: ExtractionMode) -> Result<PlaylistInfo, DownloadError> {
        run_dump(OsStr::new(&self.python_cmd), &["-m", "yt_dlp"], url, mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_driver_receives_url_and_mode() {
        let args = PythonApiExtractor::build_args("https://soundcloud.com/u/sets/s", ExtractionMode::Flat);
        assert_eq!(args[0], "-c");
        assert!(args[1].contains("\"extract_flat\": \"in_playlist\" if mode == \"flat\" else False"));
        assert!(args[1].contains("\"skip_download\": True"));
        assert_eq!(args[2..], ["https://soundcloud.com/u/sets/s", "flat"]);
    }

    #[test]
    fn exception_line_is_last_non_blank_stderr_line() {
        let stderr = b"Traceback (most recent call last):\n  File \"<string>\", line 3\nModuleNotFoundError: No module named 'yt_dlp'\n\n";
        assert_eq!(
            PythonApiExtractor::exception_line(stderr).as_deref(),
            Some("ModuleNotFoundError: No module named 'yt_dlp'")
        );
        assert_eq!(PythonApiExtractor::exception_line(b"  \n"), None);
    }

    #[tokio::test]
    async fn missing_interpreter_is_an_attempt_error() {
        let api = PythonApiExtractor::new("definitely-not-a-python-xyz");
        let err = api
            .extract("https://soundcloud.com/u/sets/s", ExtractionMode::Flat)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::ExecutionError(_)));

        let module = PythonModuleExtractor::new("definitely-not-a-python-xyz");
        assert!(module
            .extract("https://soundcloud.com/u/sets/s", ExtractionMode::Full)
            .await
            .is_err());
    }
}
