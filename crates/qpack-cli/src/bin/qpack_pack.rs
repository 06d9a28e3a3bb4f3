//! `qpack-pack`: encode JSON (stdin) to qpack (stdout).
//!
//! Usage:
//!   qpack-pack [--hex] [--verbose]

use qpack_cli::{logger, pack, PackOptions};
use std::io::{self, Read, Write};
use std::process;

fn main() {
    let opts = match PackOptions::from_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: qpack-pack [--hex] [--verbose]");
            process::exit(1);
        }
    };
    logger::init(opts.verbose);

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        process::exit(1);
    }

    let bytes = match pack(buf.trim(), &opts) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(&bytes).and_then(|_| stdout.flush()) {
        eprintln!("{e}");
        process::exit(1);
    }
}
