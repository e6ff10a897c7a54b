// tinyfst-print: Re-emit an AT&T transducer in normalized form.
//
// Reads ATTFILE (or stdin when no file or `-` is given), builds the packed
// automaton and writes it back as AT&T lines: states in index order, each
// final line before the state's arcs, weights with six decimals.
//
// Usage:
//   tinyfst-print [ATTFILE]

use std::io::{self, Write};

const USAGE: &str = "Usage: tinyfst-print [ATTFILE]";

fn main() {
    tinyfst_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if tinyfst_cli::wants_help(&args) {
        println!("tinyfst-print: Re-emit an AT&T transducer in normalized form.");
        println!();
        println!("{USAGE}");
        println!();
        println!("Reads standard input when ATTFILE is omitted or is '-'.");
        return;
    }

    let (flags, paths) = tinyfst_cli::split_args(&args);
    if let Err(e) = tinyfst_cli::check_flags(&flags, &[]) {
        tinyfst_cli::usage_error(&e, USAGE);
    }
    let path = match paths.as_slice() {
        [] => "-",
        [p] => p.as_str(),
        _ => tinyfst_cli::usage_error("expected at most one ATTFILE", USAGE),
    };

    let fst = tinyfst_cli::load_fst(path).unwrap_or_else(|e| tinyfst_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let written = tinyfst::dump::write_att_only(&fst, &mut out).and_then(|()| out.flush());
    if let Err(e) = written {
        tinyfst_cli::fatal(&format!("failed to write output: {e}"));
    }
}
