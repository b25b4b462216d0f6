//! `msimc` — the msim DSL compiler's command-line entry point.

use clap::Parser;
use msim_compiler::{run, Cli};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) => std::process::exit(outcome.exit_code),
        Err(e) => {
            eprintln!("msimc: {e}");
            std::process::exit(1);
        }
    }
}
