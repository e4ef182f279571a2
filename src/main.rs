#![forbid(unsafe_code)]

//! autoscroll CLI entry point.

use clap::Parser;

mod cli_app;

fn main() {
    let args = match cli_app::Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1.
            let code = i32::from(e.use_stderr());
            if let Err(print_err) = e.print() {
                // The usage text could not be written; say so on stderr once.
                eprintln!("autoscroll: failed to print usage: {print_err}");
                std::process::exit(1);
            }
            std::process::exit(code);
        }
    };
    if let Err(e) = cli_app::run(&args) {
        eprintln!("autoscroll: {e}");
        std::process::exit(1);
    }
}
