// Command-line surface: argument parsing and rendering job events

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::AppConfig;
use crate::downloader::models::{default_output_dir, DEFAULT_BITRATE};
use crate::downloader::tools::ToolManager;
use crate::downloader::{DownloadError, DownloadOptions, JobEvent, Service};
use crate::job::{spawn_job, DownloadJob, JobSummary};

#[derive(Parser, Debug, Clone)]
#[clap(
    version = env!("CARGO_PKG_VERSION"),
    name = env!("CARGO_PKG_NAME"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    /// Python interpreter with yt_dlp / spotdl installed
    #[clap(long, global = true, env = "YTDLP_PYTHON")]
    pub python: Option<String>,

    /// Use a standalone spotdl executable instead of `python -m spotdl`
    #[clap(long, global = true, env = "SPOTDL_BIN")]
    pub spotdl_bin: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins)
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download a Spotify playlist or SoundCloud set
    Download(DownloadArgs),

    /// Print the search queries for every track of a SoundCloud set
    Resolve {
        /// SoundCloud set URL
        url: String,
    },

    /// Show which external tools were found
    Tools,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceArg {
    Spotify,
    Soundcloud,
}

impl From<ServiceArg> for Service {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Spotify => Service::Spotify,
            ServiceArg::Soundcloud => Service::SoundCloud,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadArgs {
    /// Which service the URL belongs to
    #[clap(short, long, value_enum, default_value = "spotify")]
    pub service: ServiceArg,

    /// Playlist / set URL
    pub url: String,

    /// Output folder (defaults to <Downloads>/spotdl_output)
    #[clap(short, long, env = "SPOTCLOUD_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Audio bitrate passed to spotdl
    #[clap(short, long, default_value = DEFAULT_BITRATE)]
    pub bitrate: String,

    /// Use my Spotify account (for private playlists)
    #[clap(long)]
    pub user_auth: bool,
}

impl DownloadArgs {
    pub fn options(&self) -> DownloadOptions {
        DownloadOptions {
            output_dir: self.output.clone().unwrap_or_else(default_output_dir),
            bitrate: self.bitrate.clone(),
            user_auth: self.user_auth,
        }
    }
}

pub async fn execute(cli: Cli) -> ExitCode {
    ExitCode::from(run_command(cli).await)
}

/// Exit codes: 0 ok, 1 job failed, 2 URL rejected
pub async fn run_command(cli: Cli) -> u8 {
    let config = AppConfig::new(cli.python.clone(), cli.spotdl_bin.clone());
    log::debug!("config: {:?}", config);

    match cli.command {
        Command::Download(args) => download(args, &config).await,
        Command::Resolve { url } => resolve(&url, &config).await,
        Command::Tools => tools(&config),
    }
}

async fn download(args: DownloadArgs, config: &AppConfig) -> u8 {
    let job = match DownloadJob::new(args.service.into(), &args.url, args.options()) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("❌ {}", e);
            return 2;
        }
    };

    let (handle, mut events) = spawn_job(job, config.resolver(), config.downloader());

    while let Some(event) = events.recv().await {
        render(&event);
    }

    match handle.await {
        Ok(Ok(summary)) => {
            if let JobSummary::Single { exit_code } = summary {
                log::debug!("spotdl exit code: {:?}", exit_code);
            }
            println!("Playlist download completed!");
            0
        }
        Ok(Err(e)) => {
            report_error(&e);
            exit_code_for(&e)
        }
        Err(join_err) => {
            eprintln!("❌ download worker crashed: {}", join_err);
            1
        }
    }
}

async fn resolve(url: &str, config: &AppConfig) -> u8 {
    match config.resolver().resolve(url).await {
        Ok(queries) => {
            for query in queries {
                println!("{}", query);
            }
            0
        }
        Err(e) => {
            report_error(&e);
            exit_code_for(&e)
        }
    }
}

fn tools(config: &AppConfig) -> u8 {
    let manager = ToolManager::new(config.python.clone());
    for tool in manager.get_all_tools() {
        let status = if tool.is_available { "✔" } else { "✖" };
        let path = tool
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "not found".to_string());
        println!(
            "{} {:<8} {} {}",
            status,
            tool.name,
            path,
            tool.version.unwrap_or_default()
        );
    }
    for module in ["yt_dlp", "spotdl"] {
        let status = if manager.python_has_module(module) { "✔" } else { "✖" };
        println!("{} {} -m {}", status, config.python, module);
    }
    0
}

fn render(event: &JobEvent) {
    match event {
        JobEvent::Log(line) => println!("{}", line),
        JobEvent::TracksFound(n) => log::debug!("resolver returned {} tracks", n),
        JobEvent::TrackStarted { index, total, query } => {
            log::debug!("track {}/{}: {}", index, total, query)
        }
        JobEvent::Finished { missing } => {
            log::debug!("job finished, {} tracks missing", missing.len())
        }
    }
}

fn report_error(e: &DownloadError) {
    let headline = match e {
        DownloadError::ExtractionFailure(_) => "yt-dlp could not extract the SoundCloud set.",
        DownloadError::EmptyPlaylist(_) => "No tracks found in this SoundCloud set.",
        other => {
            eprintln!("❌ {}", other);
            return;
        }
    };
    eprintln!("❌ Error reading playlist: {}", headline);
    for reason in e.reasons() {
        eprintln!("  - {}", reason);
    }
}

fn exit_code_for(e: &DownloadError) -> u8 {
    match e {
        DownloadError::InvalidUrl(_) | DownloadError::UnsupportedUrl { .. } => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_download_flags() {
        let cli = Cli::try_parse_from([
            "spotcloud",
            "download",
            "--service",
            "soundcloud",
            "https://soundcloud.com/u/sets/s",
            "-o",
            "/tmp/out",
            "-b",
            "128k",
        ])
        .unwrap();

        let Command::Download(args) = cli.command else {
            panic!("expected download");
        };
        assert_eq!(args.service, ServiceArg::Soundcloud);
        let options = args.options();
        assert_eq!(options.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(options.bitrate, "128k");
        assert!(!options.user_auth);
    }

    #[test]
    fn bitrate_defaults_to_320k() {
        let cli = Cli::try_parse_from([
            "spotcloud",
            "download",
            "https://open.spotify.com/playlist/x",
            "--user-auth",
        ])
        .unwrap();
        let Command::Download(args) = cli.command else {
            panic!("expected download");
        };
        assert_eq!(args.service, ServiceArg::Spotify);
        assert_eq!(args.bitrate, "320k");
        assert!(args.options().user_auth);
    }

    #[test]
    fn url_errors_exit_with_two() {
        assert_eq!(exit_code_for(&DownloadError::InvalidUrl("x".into())), 2);
        assert_eq!(
            exit_code_for(&DownloadError::UnsupportedUrl {
                service: "Spotify".into(),
                url: "x".into()
            }),
            2
        );
        assert_eq!(exit_code_for(&DownloadError::ExtractionFailure(vec![])), 1);
    }

    #[tokio::test]
    async fn mismatched_service_is_rejected_before_any_work() {
        let cli = Cli::try_parse_from([
            "spotcloud",
            "download",
            "--service",
            "spotify",
            "https://soundcloud.com/u/sets/s",
        ])
        .unwrap();
        assert_eq!(run_command(cli).await, 2);
    }
}
