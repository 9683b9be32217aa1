// Helper functions shared by the extractors and the download runner

use std::ffi::OsStr;
use std::process::{Output, Stdio};

use tokio::process::Command as TokioCommand;

use super::errors::DownloadError;

/// Strip query-string and fragment suffixes that confuse yt-dlp.
/// Cuts at whichever of `?` or `#` comes first.
pub fn sanitize_url(url: &str) -> &str {
    match url.find(|c: char| c == '?' || c == '#') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Trim + sanitize, then require an absolute http(s) URL.
///
/// Only a cheap sanity check: it does not prove the URL points at SoundCloud.
pub fn normalize_playlist_url(raw: &str) -> Result<String, DownloadError> {
    let url = sanitize_url(raw.trim());
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(DownloadError::InvalidUrl(raw.trim().to_string()))
    }
}

/// Run a command to completion and capture stdout/stderr.
///
/// No timeout: a hung yt-dlp hangs the caller.
pub async fn run_output<I, S>(program: &OsStr, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| format!("Failed to start {}: {}", program.to_string_lossy(), e))
}

/// Best human-readable detail from a failed process: stderr, else stdout
pub fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    match output.status.code() {
        Some(code) => format!("exited with code {} and no output", code),
        None => "terminated by signal with no output".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_query_and_fragment() {
        let u = "https://soundcloud.com/user/playlist?utm_source=clip#frag";
        assert_eq!(sanitize_url(u), "https://soundcloud.com/user/playlist");
    }

    #[test]
    fn sanitize_cuts_at_first_marker() {
        assert_eq!(sanitize_url("https://a.b/c#x?y"), "https://a.b/c");
        assert_eq!(sanitize_url("https://a.b/c?x#y"), "https://a.b/c");
        assert_eq!(sanitize_url("https://a.b/c"), "https://a.b/c");
        assert_eq!(sanitize_url("?only"), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for u in [
            "https://soundcloud.com/user/sets/x?in=1#t=3",
            "http://x/#",
            "plain",
            "",
        ] {
            let once = sanitize_url(u);
            assert_eq!(sanitize_url(once), once);
        }
    }

    #[test]
    fn normalize_trims_and_requires_scheme() {
        assert_eq!(
            normalize_playlist_url("  https://soundcloud.com/u/sets/s?si=abc \n").unwrap(),
            "https://soundcloud.com/u/sets/s"
        );
        assert!(normalize_playlist_url("HTTP://soundcloud.com/u").is_ok());

        for bad in [
            "m_source=clipboard&utm_medium=text",
            "soundcloud.com/u/sets/s",
            "ftp://soundcloud.com/u",
            "   ",
        ] {
            assert!(
                matches!(normalize_playlist_url(bad), Err(DownloadError::InvalidUrl(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failure_detail_prefers_stderr_then_stdout() {
        let out = run_output(OsStr::new("sh"), ["-c", "echo out; echo err >&2; exit 3"])
            .await
            .unwrap();
        assert_eq!(out.status.code(), Some(3));
        assert_eq!(failure_detail(&out), "err");

        let out = run_output(OsStr::new("sh"), ["-c", "echo only-out; exit 1"])
            .await
            .unwrap();
        assert_eq!(failure_detail(&out), "only-out");
    }

    #[tokio::test]
    async fn run_output_reports_spawn_failure() {
        let err = run_output(OsStr::new("definitely-not-a-real-binary-xyz"), ["-J"])
            .await
            .unwrap_err();
        assert!(err.contains("Failed to start"));
    }
}
