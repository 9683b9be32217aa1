// External tool discovery (python, yt-dlp, spotdl)

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ToolType {
    Python,
    YtDlp,
    SpotDl,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::Python => "python",
            ToolType::YtDlp => "yt-dlp",
            ToolType::SpotDl => "spotdl",
        }
    }

    /// Executable names tried in order
    fn binary_names(&self) -> &'static [&'static str] {
        match self {
            ToolType::Python => &["python3", "python"],
            ToolType::YtDlp => &["yt-dlp", "yt-dlp.exe"],
            ToolType::SpotDl => &["spotdl", "spotdl.exe"],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub tool_type: ToolType,
    pub version: Option<String>,
    pub path: Option<PathBuf>,
    pub is_available: bool,
}

/// Locate a tool on PATH under any of its names
pub fn locate(tool_type: ToolType) -> Option<PathBuf> {
    tool_type
        .binary_names()
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// Python interpreter used for the API and module tiers.
///
/// `YTDLP_PYTHON` wins (e.g. a venv interpreter), then PATH, then plain `python3`.
pub fn find_python() -> String {
    if let Ok(custom) = std::env::var("YTDLP_PYTHON") {
        if !custom.trim().is_empty() {
            return custom;
        }
    }

    locate(ToolType::Python)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "python3".to_string())
}

pub struct ToolManager {
    python: String,
}

impl ToolManager {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    pub fn get_tool_info(&self, tool_type: ToolType) -> ToolInfo {
        let path = match tool_type {
            ToolType::Python => which::which(&self.python).ok(),
            _ => locate(tool_type),
        };
        let version = path.as_deref().and_then(get_version);

        ToolInfo {
            name: tool_type.as_str().to_string(),
            tool_type,
            version,
            is_available: path.is_some(),
            path,
        }
    }

    pub fn get_all_tools(&self) -> Vec<ToolInfo> {
        vec![
            self.get_tool_info(ToolType::Python),
            self.get_tool_info(ToolType::YtDlp),
            self.get_tool_info(ToolType::SpotDl),
        ]
    }

    /// Whether `python -c "import <module>"` succeeds
    pub fn python_has_module(&self, module: &str) -> bool {
        let code = format!("import {}", module);
        match Command::new(&self.python).args(["-c", &code]).output() {
            Ok(out) => out.status.success(),
            Err(_) => false,
        }
    }
}

fn get_version(path: &Path) -> Option<String> {
    match Command::new(path).arg("--version").output() {
        Ok(output) if output.status.success() => {
            // python 2 printed its version on stderr
            let raw = if output.stdout.is_empty() {
                output.stderr
            } else {
                output.stdout
            };
            let out = String::from_utf8_lossy(&raw).trim().to_string();
            out.lines().next().map(str::to_string)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ytdlp_is_looked_up_with_and_without_exe_suffix() {
        assert_eq!(ToolType::YtDlp.binary_names(), &["yt-dlp", "yt-dlp.exe"]);
    }

    #[test]
    fn missing_interpreter_is_reported_unavailable() {
        let manager = ToolManager::new("definitely-not-a-python-xyz");
        let info = manager.get_tool_info(ToolType::Python);
        assert!(!info.is_available);
        assert!(info.version.is_none());
        assert!(!manager.python_has_module("yt_dlp"));
    }

    #[test]
    fn all_tools_are_listed() {
        let names: Vec<String> = ToolManager::new("python3")
            .get_all_tools()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["python", "yt-dlp", "spotdl"]);
    }
}
