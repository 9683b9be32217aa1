// Error types for the resolver and the download runner

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// Input does not look like an absolute http(s) URL
    #[error(
        "The URL does not appear to be a full SoundCloud link ({0:?}). \
         Please paste the entire playlist URL, including https://soundcloud.com/…"
    )]
    InvalidUrl(String),

    /// URL does not belong to the selected service
    #[error("Enter a valid {service} playlist URL (got {url:?}).")]
    UnsupportedUrl { service: String, url: String },

    /// Every extraction tier failed; carries one reason per tier
    #[error("yt-dlp could not extract the SoundCloud set. {}", .0.join(". "))]
    ExtractionFailure(Vec<String>),

    /// Extraction ran cleanly but no entry had a usable title
    #[error("No tracks found in this SoundCloud set. {}", .0.join(". "))]
    EmptyPlaylist(Vec<String>),

    /// spotdl exited non-zero for one track
    #[error("Could not download {query:?} (exit code {})", fmt_code(.exit_code))]
    DownloadFailure { query: String, exit_code: Option<i32> },

    /// spotdl (or its interpreter) could not be launched at all
    #[error("spotdl missing: failed to start {program}: {source}. Run `pip install spotdl`.")]
    ToolMissing {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Output folder could not be created
    #[error("Cannot write to output folder {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse yt-dlp JSON output
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Command execution failed
    #[error("Execution error: {0}")]
    ExecutionError(String),
}

fn fmt_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "killed by signal".to_string(),
    }
}

impl DownloadError {
    /// Errors after which no further track can be processed
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ToolMissing { .. } | Self::OutputDir { .. })
    }

    /// Reasons collected while walking the extraction tiers
    pub fn reasons(&self) -> &[String] {
        match self {
            Self::ExtractionFailure(reasons) | Self::EmptyPlaylist(reasons) => reasons,
            _ => &[],
        }
    }
}
