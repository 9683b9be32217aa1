// Download job - resolve-then-download pipeline on a background task

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::downloader::{
    BatchReport, DownloadError, DownloadOptions, Downloader, JobEvent, PlaylistResolver,
    ProgressEmitter, Service,
};

/// Cheap check that a URL belongs to the selected service
pub fn validate_service_url(service: Service, url: &str) -> Result<(), DownloadError> {
    if url.contains(service.url_marker()) {
        Ok(())
    } else {
        Err(DownloadError::UnsupportedUrl {
            service: service.to_string(),
            url: url.to_string(),
        })
    }
}

/// A validated request to download one playlist
#[derive(Debug, Clone)]
pub struct DownloadJob {
    service: Service,
    url: String,
    options: DownloadOptions,
}

impl DownloadJob {
    pub fn new(service: Service, url: &str, options: DownloadOptions) -> Result<Self, DownloadError> {
        let url = url.trim();
        validate_service_url(service, url)?;
        Ok(Self {
            service,
            url: url.to_string(),
            options,
        })
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }
}

#[derive(Debug)]
pub enum JobSummary {
    /// Spotify playlist handed to spotdl in one go
    Single { exit_code: Option<i32> },
    /// SoundCloud set downloaded track by track
    Batch(BatchReport),
}

impl JobSummary {
    pub fn missing_queries(&self) -> Vec<String> {
        match self {
            Self::Single { .. } => Vec::new(),
            Self::Batch(report) => report.missing_queries(),
        }
    }
}

/// Run the job on its own task; events arrive on the receiver until it ends
pub fn spawn_job(
    job: DownloadJob,
    resolver: PlaylistResolver,
    downloader: Downloader,
) -> (
    JoinHandle<Result<JobSummary, DownloadError>>,
    mpsc::UnboundedReceiver<JobEvent>,
) {
    let (emitter, rx) = ProgressEmitter::channel();
    let handle = tokio::spawn(async move { run_job(&job, &resolver, &downloader, &emitter).await });
    (handle, rx)
}

pub async fn run_job(
    job: &DownloadJob,
    resolver: &PlaylistResolver,
    downloader: &Downloader,
    emitter: &ProgressEmitter,
) -> Result<JobSummary, DownloadError> {
    let out_dir = &job.options.output_dir;
    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|source| DownloadError::OutputDir {
            path: out_dir.clone(),
            source,
        })?;

    log::info!("{} job for {} into {}", job.service, job.url, out_dir.display());

    let summary = match job.service {
        Service::Spotify => {
            let exit_code = downloader.run_single(&job.url, &job.options, emitter).await?;
            JobSummary::Single { exit_code }
        }
        Service::SoundCloud => {
            let queries = resolver.resolve(&job.url).await?;
            emitter.emit(JobEvent::TracksFound(queries.len()));
            emitter.log(format!("ℹ️  Found {} tracks in SoundCloud playlist", queries.len()));

            let report = downloader.run_batch(&queries, &job.options, emitter).await?;
            let missing = report.missing_queries();
            if !missing.is_empty() {
                emitter.log(format!(
                    "\n🚫 Could not download the following tracks:\n{}",
                    missing.join("\n")
                ));
            }
            JobSummary::Batch(report)
        }
    };

    emitter.log("✅ Finished");
    emitter.emit(JobEvent::Finished {
        missing: summary.missing_queries(),
    });
    Ok(summary)
}
