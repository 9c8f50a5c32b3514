use std::process::ExitCode;

fn main() -> ExitCode {
    uplink_cli::run()
}
