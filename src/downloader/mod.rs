// Downloader module - playlist resolution and spotdl orchestration

pub mod command;
pub mod errors;
pub mod extractors;
pub mod models;
pub mod orchestrator;
pub mod tools;
pub mod traits;
pub mod utils;

pub use command::{build_spotdl_args, DownloadCommand, SpotdlLauncher};
pub use errors::DownloadError;
pub use extractors::{ExtractorConfig, PlaylistResolver};
pub use models::{DownloadOptions, ExtractionMode, PlaylistInfo, Query, Service, TrackRecord};
pub use orchestrator::{BatchReport, Downloader};
pub use traits::{JobEvent, ProgressEmitter};
