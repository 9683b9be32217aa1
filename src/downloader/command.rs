// spotdl command construction

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use super::models::DownloadOptions;

pub const AUDIO_FORMAT: &str = "m4a";
pub const USER_AUTH_FLAG: &str = "--user-auth";

/// How spotdl gets started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotdlLauncher {
    /// `<python> -m spotdl`
    Module { python: String },
    /// A standalone `spotdl` executable
    Executable(PathBuf),
}

impl SpotdlLauncher {
    fn program(&self) -> OsString {
        match self {
            Self::Module { python } => OsString::from(python),
            Self::Executable(path) => path.clone().into_os_string(),
        }
    }

    fn leading_args(&self) -> Vec<OsString> {
        match self {
            Self::Module { .. } => vec!["-m".into(), "spotdl".into()],
            Self::Executable(_) => Vec::new(),
        }
    }
}

/// Arguments for one `spotdl download` run.
///
/// Pure: query and bitrate are passed through verbatim, the auth flag always comes last.
pub fn build_spotdl_args(query: &str, out_dir: &Path, bitrate: &str, user_auth: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "download".into(),
        query.into(),
        "--output".into(),
        out_dir.into(),
        "--format".into(),
        AUDIO_FORMAT.into(),
        "--bitrate".into(),
        bitrate.into(),
    ];
    if user_auth {
        args.push(USER_AUTH_FLAG.into());
    }
    args
}

/// One external spotdl invocation; immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl DownloadCommand {
    pub fn new(launcher: &SpotdlLauncher, query: &str, options: &DownloadOptions) -> Self {
        Self::with_auth(launcher, query, options, options.user_auth)
    }

    /// Same as [`DownloadCommand::new`] but with an explicit auth flag
    pub fn with_auth(
        launcher: &SpotdlLauncher,
        query: &str,
        options: &DownloadOptions,
        user_auth: bool,
    ) -> Self {
        let mut args = launcher.leading_args();
        args.extend(build_spotdl_args(
            query,
            &options.output_dir,
            &options.bitrate,
            user_auth,
        ));
        Self {
            program: launcher.program(),
            args,
        }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for DownloadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn auth_flag_and_bitrate_present() {
        let args = strs(&build_spotdl_args("query", Path::new("/tmp"), "128k", true));
        assert!(args.contains(&"128k".to_string()));
        assert_eq!(args.last().map(String::as_str), Some(USER_AUTH_FLAG));
    }

    #[test]
    fn no_auth_flag_when_disabled() {
        let args = strs(&build_spotdl_args("X", Path::new("/tmp"), "128k", false));
        assert_eq!(
            args,
            vec!["download", "X", "--output", "/tmp", "--format", "m4a", "--bitrate", "128k"]
        );
    }

    #[test]
    fn garbage_is_passed_through() {
        let args = strs(&build_spotdl_args("", Path::new(""), "lots", false));
        assert_eq!(args[1], "");
        assert_eq!(args[7], "lots");
    }

    #[test]
    fn module_launcher_prefixes_python() {
        let launcher = SpotdlLauncher::Module {
            python: "python3".to_string(),
        };
        let options = DownloadOptions {
            output_dir: PathBuf::from("/music"),
            bitrate: "320k".to_string(),
            user_auth: true,
        };
        let cmd = DownloadCommand::new(&launcher, "Bar - Foo", &options);
        assert_eq!(cmd.program(), "python3");
        assert_eq!(strs(cmd.args())[..4], ["-m", "spotdl", "download", "Bar - Foo"]);
        assert_eq!(
            cmd.to_string(),
            "python3 -m spotdl download Bar - Foo --output /music --format m4a --bitrate 320k --user-auth"
        );

        let anonymous = DownloadCommand::with_auth(&launcher, "Bar - Foo", &options, false);
        assert!(!strs(anonymous.args()).contains(&USER_AUTH_FLAG.to_string()));
    }

    #[test]
    fn executable_launcher_has_no_prefix() {
        let launcher = SpotdlLauncher::Executable(PathBuf::from("/usr/bin/spotdl"));
        let cmd = DownloadCommand::new(&launcher, "q", &DownloadOptions::default());
        assert_eq!(cmd.program(), "/usr/bin/spotdl");
        assert_eq!(cmd.args()[0], "download");
    }
}
