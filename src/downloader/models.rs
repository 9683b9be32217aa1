// Common data models for the resolver and downloader

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::errors::DownloadError;

/// Streaming service a playlist URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Spotify,
    SoundCloud,
}

impl Service {
    /// Substring a playlist URL of this service must contain
    pub fn url_marker(&self) -> &'static str {
        match self {
            Self::Spotify => "open.spotify.com/playlist/",
            Self::SoundCloud => "soundcloud.com/",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spotify => write!(f, "Spotify"),
            Self::SoundCloud => write!(f, "SoundCloud"),
        }
    }
}

/// yt-dlp extraction depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// `--flat-playlist` / `extract_flat="in_playlist"`: skips per-track lookups
    Flat,
    /// Resolves every entry; slower but recovers empty flat results
    Full,
}

impl ExtractionMode {
    /// Order in which a tier tries the modes
    pub const LADDER: [ExtractionMode; 2] = [Self::Flat, Self::Full];
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// One playlist entry as reported by yt-dlp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
}

/// The part of a yt-dlp info dict the resolver cares about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistInfo {
    #[serde(default)]
    pub entries: Option<Vec<Option<TrackRecord>>>,
}

impl PlaylistInfo {
    /// Parse `-J` output
    pub fn from_json(stdout: &[u8]) -> Result<Self, DownloadError> {
        serde_json::from_slice(stdout)
            .map_err(|e| DownloadError::ParseError(format!("Invalid JSON: {}", e)))
    }

    pub fn records(&self) -> impl Iterator<Item = &TrackRecord> {
        self.entries.iter().flatten().flatten()
    }

    /// Searchable queries in playlist order; entries without a title are skipped
    pub fn queries(&self) -> Vec<Query> {
        self.records().filter_map(Query::from_record).collect()
    }
}

/// Search string for one track: `"Uploader - Title"` or just `"Title"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    pub fn from_record(record: &TrackRecord) -> Option<Self> {
        let title = record.title.as_deref().unwrap_or("").trim();
        if title.is_empty() {
            return None;
        }
        let uploader = record.uploader.as_deref().unwrap_or("").trim();
        if uploader.is_empty() {
            Some(Self(title.to_string()))
        } else {
            Some(Self(format!("{} - {}", uploader, title)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Per-run download settings
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub output_dir: PathBuf,
    pub bitrate: String,
    pub user_auth: bool,
}

pub const DEFAULT_BITRATE: &str = "320k";

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            bitrate: DEFAULT_BITRATE.to_string(),
            user_auth: false,
        }
    }
}

/// `<Downloads>/spotdl_output`, or `./spotdl_output` when the platform has no downloads dir
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spotdl_output")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(queries: Vec<Query>) -> Vec<String> {
        queries.into_iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn formats_uploader_and_title() {
        let json = br#"{"entries":[{"title":"Foo","uploader":"Bar"},{"title":"Baz"}]}"#;
        let info = PlaylistInfo::from_json(json).unwrap();
        assert_eq!(strings(info.queries()), vec!["Bar - Foo", "Baz"]);
    }

    #[test]
    fn skips_blank_titles_and_keeps_order() {
        let json = br#"{"entries":[
            {"title":"  ","uploader":"Nobody"},
            {"title":"One","uploader":"  "},
            null,
            {"uploader":"No Title"},
            {"title":" Two ","uploader":" Someone "}
        ]}"#;
        let info = PlaylistInfo::from_json(json).unwrap();
        assert_eq!(strings(info.queries()), vec!["One", "Someone - Two"]);
    }

    #[test]
    fn missing_or_null_entries_mean_no_tracks() {
        let missing = PlaylistInfo::from_json(br#"{"title":"set"}"#).unwrap();
        assert!(missing.queries().is_empty());

        let null = PlaylistInfo::from_json(br#"{"entries":null}"#).unwrap();
        assert!(null.queries().is_empty());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = PlaylistInfo::from_json(b"ERROR: not json").unwrap_err();
        assert!(matches!(err, DownloadError::ParseError(_)));
    }

    #[test]
    fn service_markers() {
        assert!("https://open.spotify.com/playlist/abc".contains(Service::Spotify.url_marker()));
        assert!("https://soundcloud.com/u/sets/x".contains(Service::SoundCloud.url_marker()));
    }
}
