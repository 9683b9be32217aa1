pub mod cli;
pub mod config;
pub mod downloader;
pub mod job;

use std::process::ExitCode;

use clap::Parser;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

pub fn run() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error while starting the async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(cli::execute(cli))
}
