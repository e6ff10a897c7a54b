// tinyfst-read: Load an AT&T transducer and report its size.
//
// Prints the number of states, arcs and symbols followed by the memory
// footprint of the packed automaton:
//   Read FSA: 3 states, 2 arcs, 4 symbols
//   1234 bytes
//
// Usage:
//   tinyfst-read [OPTIONS] ATTFILE
//
// Options:
//   --print       Also dump the automaton
//   --json        Print the summary as JSON
//   -h, --help    Print help

use std::io::{self, Write};

const USAGE: &str = "Usage: tinyfst-read [--print] [--json] ATTFILE";

fn main() {
    tinyfst_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if tinyfst_cli::wants_help(&args) {
        println!("tinyfst-read: Load an AT&T transducer and report its size.");
        println!();
        println!("{USAGE}");
        println!();
        println!("Options:");
        println!("  --print       Also dump the symbols, final weights and arcs");
        println!("  --json        Print the summary as a JSON object");
        println!("  -h, --help    Print this help");
        return;
    }

    let (flags, paths) = tinyfst_cli::split_args(&args);
    if let Err(e) = tinyfst_cli::check_flags(&flags, &["--print", "--json"]) {
        tinyfst_cli::usage_error(&e, USAGE);
    }
    let [path] = paths.as_slice() else {
        tinyfst_cli::usage_error("expected exactly one ATTFILE", USAGE);
    };
    let print = flags.iter().any(|f| f == "--print");
    let json = flags.iter().any(|f| f == "--json");

    let fst = tinyfst_cli::load_fst(path).unwrap_or_else(|e| tinyfst_cli::fatal(&e));
    let summary = tinyfst_cli::Summary::of(&fst);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let report = if json {
        summary
            .to_json()
            .map(|s| s + "\n")
            .unwrap_or_else(|e| tinyfst_cli::fatal(&e))
    } else {
        summary.to_text()
    };
    let written = out.write_all(report.as_bytes()).and_then(|()| {
        if print {
            tinyfst::dump::write_att(&fst, &mut out)?;
        }
        out.flush()
    });
    if let Err(e) = written {
        tinyfst_cli::fatal(&format!("failed to write output: {e}"));
    }
}
