//! Entry point for the `crowdcast` command-line interface.
#![forbid(unsafe_code)]

use crowdcast_cli::CliError;

#[expect(clippy::print_stderr, reason = "fatal errors are reported on stderr")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match crowdcast_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("crowdcast: {err}");
            std::process::exit(1);
        }
    }
}
