// Progress events sent from the worker to whoever renders them

use tokio::sync::mpsc;

/// Message from a running job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    /// One line for the log view (tool output or status)
    Log(String),
    /// Resolver finished with this many tracks
    TracksFound(usize),
    /// Batch download moved to the next track (1-based)
    TrackStarted { index: usize, total: usize, query: String },
    /// Job is over; `missing` lists tracks that failed to download
    Finished { missing: Vec<String> },
}

/// Progress emitter helper
#[derive(Debug, Clone)]
pub struct ProgressEmitter {
    tx: mpsc::UnboundedSender<JobEvent>,
}

impl ProgressEmitter {
    pub fn new(tx: mpsc::UnboundedSender<JobEvent>) -> Self {
        Self { tx }
    }

    /// Emitter plus the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<JobEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn emit(&self, event: JobEvent) {
        // receiver gone means nobody is watching; the job still runs to completion
        let _ = self.tx.send(event);
    }

    pub fn log(&self, line: impl Into<String>) {
        self.emit(JobEvent::Log(line.into()));
    }
}
