//! `qpack-unpack`: decode qpack (stdin) to JSON (stdout).
//!
//! Usage:
//!   qpack-unpack [--hex] [--max-depth N|none] [--legacy] [--all] [--verbose]

use qpack_cli::{logger, unpack, UnpackOptions};
use std::io::{self, Read, Write};
use std::process;

fn main() {
    let opts = match UnpackOptions::from_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{e}");
            eprintln!(
                "usage: qpack-unpack [--hex] [--max-depth N|none] [--legacy] [--all] [--verbose]"
            );
            process::exit(1);
        }
    };
    logger::init(opts.verbose);

    let mut buf = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut buf) {
        eprintln!("{e}");
        process::exit(1);
    }

    let json = match unpack(&buf, &opts) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{json}").and_then(|_| stdout.flush()) {
        eprintln!("{e}");
        process::exit(1);
    }
}
