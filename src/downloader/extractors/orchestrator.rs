// Playlist resolver - ordered tier ladder with flat/full retry
//
// Strategy (stop at the first tier that yields at least one track):
// 1. yt_dlp Python API
// 2. `python -m yt_dlp`
// 3. standalone `yt-dlp(.exe)`
//
// Each tier tries flat extraction first and full extraction only when flat
// produced nothing. SoundCloud sometimes returns an empty flat listing for
// sets that do have tracks.

use super::cli::CliExtractor;
use super::python::{PythonApiExtractor, PythonModuleExtractor};
use super::traits::{AttemptOutcome, ExtractorConfig, PlaylistExtractor};
use crate::downloader::errors::DownloadError;
use crate::downloader::models::{ExtractionMode, Query};
use crate::downloader::utils::normalize_playlist_url;

/// How a whole tier ended
#[derive(Debug, Clone, PartialEq, Eq)]
enum TierOutcome {
    Tracks(Vec<Query>),
    /// Both modes ran; `failed` is true if any of them errored
    Exhausted { reason: String, failed: bool },
    Unavailable(String),
}

pub struct PlaylistResolver {
    tiers: Vec<Box<dyn PlaylistExtractor>>,
}

impl PlaylistResolver {
    /// The standard three-tier ladder
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_tiers(vec![
            Box::new(PythonApiExtractor::new(config.python.clone())),
            Box::new(PythonModuleExtractor::new(config.python.clone())),
            Box::new(CliExtractor::new(config.executable.clone())),
        ])
    }

    pub fn with_tiers(tiers: Vec<Box<dyn PlaylistExtractor>>) -> Self {
        Self { tiers }
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Searchable queries for every track of a SoundCloud set, in set order
    pub async fn resolve(&self, raw_url: &str) -> Result<Vec<Query>, DownloadError> {
        let url = normalize_playlist_url(raw_url)?;

        let mut reasons = Vec::new();
        let mut any_ran = false;
        let mut any_failed = false;

        for tier in &self.tiers {
            match Self::run_tier(tier.as_ref(), &url).await {
                TierOutcome::Tracks(queries) => {
                    log::info!("{} found {} tracks in {}", tier.name(), queries.len(), url);
                    return Ok(queries);
                }
                TierOutcome::Exhausted { reason, failed } => {
                    log::warn!("{}", reason);
                    any_ran = true;
                    any_failed |= failed;
                    reasons.push(reason);
                }
                TierOutcome::Unavailable(reason) => {
                    log::warn!("skipping {}: {}", tier.name(), reason);
                    reasons.push(reason);
                }
            }
        }

        if any_ran && !any_failed {
            Err(DownloadError::EmptyPlaylist(reasons))
        } else {
            Err(DownloadError::ExtractionFailure(reasons))
        }
    }

    async fn run_tier(tier: &dyn PlaylistExtractor, url: &str) -> TierOutcome {
        if let Some(reason) = tier.unavailable_reason() {
            return TierOutcome::Unavailable(reason);
        }

        let mut notes = Vec::new();
        let mut failed = false;

        for mode in ExtractionMode::LADDER {
            log::debug!("trying {} ({} mode)", tier.name(), mode);
            match AttemptOutcome::from_result(tier.extract(url, mode).await) {
                AttemptOutcome::Tracks(queries) => return TierOutcome::Tracks(queries),
                AttemptOutcome::Empty => {
                    log::debug!("{} ({} mode) returned no entries", tier.name(), mode);
                    notes.push(format!("{}: no entries", mode));
                }
                AttemptOutcome::Failed(detail) => {
                    log::debug!("{} ({} mode) failed: {}", tier.name(), mode, detail);
                    failed = true;
                    notes.push(format!("{}: {}", mode, detail));
                }
            }
        }

        let reason = if failed {
            format!("{} error: {}", tier.name(), notes.join("; "))
        } else {
            format!("{} returned no entries even after full extraction", tier.name())
        };
        TierOutcome::Exhausted { reason, failed }
    }
}

impl Default for PlaylistResolver {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}
