//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[expect(clippy::print_stderr, reason = "report fatal errors to the terminal")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = courier_cli::run() {
        eprintln!("courier: {err}");
        std::process::exit(1);
    }
}
