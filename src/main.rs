use std::{fs, process};

use clap::{ArgAction, Parser};
use clite::{run, util::num::exit_status};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// clite runs programs written in a small, statically typed C-like language.
/// The exit status is the value returned by `int main()`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat CONTENTS as source code instead of a path to a source file.
    #[arg(short, long)]
    code: bool,

    /// Log interpreter activity to stderr. Repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    contents: String,
}

const fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = SimpleLogger::new().with_level(log_level(args.verbose)).init() {
        eprintln!("Failed to initialise logging: {e}");
    }

    let source = if args.code {
        args.contents
    } else {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the source file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    };

    match run(&source) {
        Ok(code) => process::exit(exit_status(code)),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
