// Download runner - streams spotdl output and tracks per-track failures

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

use super::command::{DownloadCommand, SpotdlLauncher};
use super::errors::DownloadError;
use super::models::{DownloadOptions, Query};
use super::traits::{JobEvent, ProgressEmitter};

/// Outcome of a SoundCloud batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total: usize,
    /// One `DownloadFailure` per track that did not download
    pub failures: Vec<DownloadError>,
}

impl BatchReport {
    pub fn missing_queries(&self) -> Vec<String> {
        self.failures
            .iter()
            .filter_map(|e| match e {
                DownloadError::DownloadFailure { query, .. } => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn downloaded(&self) -> usize {
        self.total - self.failures.len()
    }
}

pub struct Downloader {
    launcher: SpotdlLauncher,
}

impl Downloader {
    pub fn new(launcher: SpotdlLauncher) -> Self {
        Self { launcher }
    }

    pub fn launcher(&self) -> &SpotdlLauncher {
        &self.launcher
    }

    /// Run one command, forwarding stdout and stderr line by line as they arrive.
    ///
    /// Returns the exit code (`None` if killed by a signal). Failing to start the
    /// process at all is `ToolMissing`.
    pub async fn run(
        &self,
        cmd: &DownloadCommand,
        emitter: &ProgressEmitter,
    ) -> Result<Option<i32>, DownloadError> {
        let mut child = TokioCommand::new(cmd.program())
            .args(cmd.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DownloadError::ToolMissing {
                program: cmd.program().to_string_lossy().into_owned(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DownloadError::ExecutionError("Failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| DownloadError::ExecutionError("Failed to capture stderr".to_string()))?;

        let mut out_lines = BufReader::new(stdout).split(b'\n');
        let mut err_lines = BufReader::new(stderr).split(b'\n');
        let mut out_open = true;
        let mut err_open = true;

        while out_open || err_open {
            tokio::select! {
                line = out_lines.next_segment(), if out_open => match line {
                    Ok(Some(bytes)) => forward(emitter, &bytes),
                    _ => out_open = false,
                },
                line = err_lines.next_segment(), if err_open => match line {
                    Ok(Some(bytes)) => forward(emitter, &bytes),
                    _ => err_open = false,
                },
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| DownloadError::ExecutionError(format!("Process error: {}", e)))?;
        log::debug!("{} exited with {}", cmd.program().to_string_lossy(), status);
        Ok(status.code())
    }

    /// Direct playlist URL (Spotify).
    ///
    /// The exit code is logged but does not turn into an error: spotdl reports
    /// partial playlist failures through its own output.
    pub async fn run_single(
        &self,
        url: &str,
        options: &DownloadOptions,
        emitter: &ProgressEmitter,
    ) -> Result<Option<i32>, DownloadError> {
        let cmd = DownloadCommand::new(&self.launcher, url, options);
        emitter.log(format!("🏃 {}", cmd));
        let code = self.run(&cmd, emitter).await?;
        if code != Some(0) {
            log::warn!("spotdl exited with {:?} for {}", code, url);
        }
        Ok(code)
    }

    /// One spotdl run per query, in order.
    ///
    /// A track that fails is recorded and the batch moves on; only a missing
    /// spotdl aborts it.
    pub async fn run_batch(
        &self,
        queries: &[Query],
        options: &DownloadOptions,
        emitter: &ProgressEmitter,
    ) -> Result<BatchReport, DownloadError> {
        let total = queries.len();
        let mut report = BatchReport {
            total,
            failures: Vec::new(),
        };

        for (idx, query) in queries.iter().enumerate() {
            let index = idx + 1;
            emitter.emit(JobEvent::TrackStarted {
                index,
                total,
                query: query.to_string(),
            });
            emitter.log(format!("\n── {}/{}: {} ──", index, total, query));

            // searches are anonymous; the account flag only matters for Spotify playlists
            let cmd = DownloadCommand::with_auth(&self.launcher, query.as_str(), options, false);
            let code = self.run(&cmd, emitter).await?;
            if code != Some(0) {
                log::warn!("download failed for {:?} (exit {:?})", query.as_str(), code);
                report.failures.push(DownloadError::DownloadFailure {
                    query: query.to_string(),
                    exit_code: code,
                });
            }
        }

        Ok(report)
    }
}

fn forward(emitter: &ProgressEmitter, bytes: &[u8]) {
    let line = String::from_utf8_lossy(bytes);
    emitter.log(line.trim_end());
}
