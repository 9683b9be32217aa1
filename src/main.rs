fn main() -> std::process::ExitCode {
    spotcloud_lib::run()
}
