//! Binary entrypoint for pong-build.

fn main() {
    if let Err(err) = pong_build_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(pong_build_cli::exit_code(&err));
    }
}
