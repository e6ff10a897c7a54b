// tinyfst-cli: shared utilities for CLI tools.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process;

use serde::Serialize;
use tinyfst::{PackedFst, TinyFstError};

/// Path argument meaning "read standard input".
const STDIN_PATH: &str = "-";

/// Exit code for command-line usage errors.
pub const EXIT_USAGE: i32 = 2;

/// Exit code for I/O and parse failures.
pub const EXIT_FAILURE: i32 = 1;

/// Set up `env_logger`. Verbosity is controlled by `RUST_LOG`.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

/// Open an AT&T source. `-` reads standard input.
///
/// The returned reader owns the file handle; it is closed when dropped.
pub fn open_source(path: &str) -> Result<Box<dyn BufRead>, String> {
    if path == STDIN_PATH {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(Path::new(path)).map_err(|e| format!("failed to open {path}: {e}"))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Open and parse an AT&T file into a packed automaton.
pub fn load_fst(path: &str) -> Result<PackedFst, String> {
    let reader = open_source(path)?;
    log::info!("reading {path}");
    tinyfst::parse_att(reader).map_err(|e: TinyFstError| format!("parsing {path} failed: {e}"))
}

/// Size summary of a loaded automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub states: usize,
    pub arcs: usize,
    pub symbols: usize,
    pub bytes: usize,
}

impl Summary {
    pub fn of(fst: &PackedFst) -> Self {
        Self {
            states: fst.state_count(),
            arcs: fst.arc_count(),
            symbols: fst.symbol_count(),
            bytes: fst.byte_footprint(),
        }
    }

    /// Plain text report, two lines.
    pub fn to_text(&self) -> String {
        format!(
            "Read FSA: {} states, {} arcs, {} symbols\n{} bytes\n",
            self.states, self.arcs, self.symbols, self.bytes
        )
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("failed to encode summary: {e}"))
    }
}

/// Split args into flags (starting with `-`, except a lone `-`) and
/// positional arguments.
pub fn split_args(args: &[String]) -> (Vec<String>, Vec<String>) {
    args.iter()
        .cloned()
        .partition(|a| a.starts_with('-') && a != STDIN_PATH)
}

/// Reject any flag not in `known`.
pub fn check_flags(flags: &[String], known: &[&str]) -> Result<(), String> {
    match flags.iter().find(|f| !known.contains(&f.as_str())) {
        Some(f) => Err(format!("unknown option {f}")),
        None => Ok(()),
    }
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(EXIT_FAILURE);
}

/// Print a usage error and exit with code 2.
pub fn usage_error(msg: &str, usage: &str) -> ! {
    eprintln!("error: {msg}");
    eprintln!("{usage}");
    process::exit(EXIT_USAGE);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn split_flags_and_paths() {
        let (flags, paths) = split_args(&strings(&["--print", "a.att", "-", "--json"]));
        assert_eq!(flags, strings(&["--print", "--json"]));
        assert_eq!(paths, strings(&["a.att", "-"]));
    }

    #[test]
    fn unknown_flag_rejected() {
        let flags = strings(&["--print", "--bogus"]);
        assert!(check_flags(&flags, &["--print"]).is_err());
        assert!(check_flags(&flags[..1], &["--print"]).is_ok());
    }

    #[test]
    fn help_detection() {
        assert!(wants_help(&strings(&["x", "-h"])));
        assert!(!wants_help(&strings(&["x"])));
    }

    #[test]
    fn summary_text_and_json() {
        let fst = tinyfst::parse_att_str("0\t1\ta\tb\t0.5\n1\n").unwrap();
        let summary = Summary::of(&fst);
        assert_eq!(summary.states, 2);
        assert_eq!(summary.arcs, 1);
        assert_eq!(summary.symbols, 3);
        assert!(
            summary
                .to_text()
                .starts_with("Read FSA: 2 states, 1 arcs, 3 symbols\n")
        );
        let json = summary.to_json().unwrap();
        assert!(json.starts_with("{\"states\":2,\"arcs\":1,\"symbols\":3,\"bytes\":"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_fst("/nonexistent/definitely/missing.att").unwrap_err();
        assert!(err.contains("missing.att"));
    }
}
