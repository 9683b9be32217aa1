// Playlist extractors - SoundCloud set → track queries
//
// Three tiers, tried in order until one yields tracks:
// - Python API: yt_dlp library call (needs the module installed)
// - Python module: `python -m yt_dlp -J`
// - CLI: standalone `yt-dlp` binary on PATH

mod cli;
mod orchestrator;
mod python;
mod traits;

pub use cli::CliExtractor;
pub use orchestrator::PlaylistResolver;
pub use python::{PythonApiExtractor, PythonModuleExtractor};
pub use traits::{AttemptOutcome, ExtractorConfig, PlaylistExtractor};
