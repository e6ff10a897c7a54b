// AT&T text format reader.
//
// Each line holds up to five tab-separated fields:
//   state                              final, weight 0
//   state weight                       final with weight
//   state target input output          arc, weight 0
//   state target input output weight   arc with weight

use std::io::{self, BufRead};

use crate::automaton::PackedFst;
use crate::config::ParseConfig;
use crate::{MAX_FIELDS, ParseError, TinyFstError};

/// The non-empty tab-separated fields of one line, at most [`MAX_FIELDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fields<'a> {
    slots: [&'a str; MAX_FIELDS],
    count: usize,
}

impl<'a> Fields<'a> {
    /// Split `line` on tabs. Runs of tabs count as one separator. The sixth
    /// field is never stored: its presence alone fails the line.
    fn split(line: &'a str) -> Result<Self, ParseError> {
        let mut slots = [""; MAX_FIELDS];
        let mut count = 0;
        for field in line.split('\t').filter(|f| !f.is_empty()) {
            if count == MAX_FIELDS {
                return Err(ParseError::TooManyColumns {
                    field: field.to_string(),
                });
            }
            slots[count] = field;
            count += 1;
        }
        if count == 0 {
            return Err(ParseError::EmptyLine);
        }
        Ok(Self { slots, count })
    }

    #[inline]
    fn len(&self) -> usize {
        self.count
    }
}

impl std::ops::Index<usize> for Fields<'_> {
    type Output = str;

    fn index(&self, i: usize) -> &str {
        self.slots[..self.count][i]
    }
}

/// Parse a state number. Surrounding ASCII whitespace is ignored.
fn parse_state_number(field: &str) -> Result<u32, ParseError> {
    let s = field.trim_matches(|c: char| c.is_ascii_whitespace());
    let start = usize::from(s.starts_with('+'));
    let end = s[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| start + i);
    if end == start {
        return Err(ParseError::NotANumber {
            field: field.to_string(),
        });
    }
    if end < s.len() {
        return Err(ParseError::TrailingGarbage {
            field: field.to_string(),
        });
    }
    s[start..end]
        .parse::<u32>()
        .map_err(|_| ParseError::NumberOutOfRange {
            field: field.to_string(),
        })
}

/// Parse a weight. Surrounding ASCII whitespace is ignored; `inf` is
/// accepted, `nan` is not.
fn parse_weight(field: &str) -> Result<f32, ParseError> {
    let s = field.trim_matches(|c: char| c.is_ascii_whitespace());
    match s.parse::<f32>() {
        Ok(w) if w.is_nan() => Err(ParseError::NanWeight {
            field: field.to_string(),
        }),
        Ok(w) => Ok(w),
        Err(_) if starts_like_float(s) => Err(ParseError::TrailingGarbage {
            field: field.to_string(),
        }),
        Err(_) => Err(ParseError::NotAFloat {
            field: field.to_string(),
        }),
    }
}

/// Whether `s` begins with something `f32` parsing would accept: an
/// optional sign, then a digit, `.` and a digit, or an `inf`/`nan` spelling.
fn starts_like_float(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s).as_bytes();
    match unsigned {
        [d, ..] if d.is_ascii_digit() => true,
        [b'.', d, ..] => d.is_ascii_digit(),
        [a, b, c, ..] => {
            let word = [a, b, c].map(|x| x.to_ascii_lowercase());
            &word == b"inf" || &word == b"nan"
        }
        _ => false,
    }
}

/// Incremental AT&T reader.
///
/// Feed lines in order with [`feed_line`](Self::feed_line) and call
/// [`finish`](Self::finish) at end of input. The first failing line aborts
/// the whole parse: the automaton built so far is dropped on the spot and
/// every later call reports [`TinyFstError::Aborted`].
///
/// Lines must be grouped by source state in ascending order; a line whose
/// source state is lower than the previous one fails with
/// [`ParseError::UnorderedState`].
#[derive(Debug)]
pub struct AttParser {
    fst: Option<PackedFst>,
    config: ParseConfig,
    line_number: usize,
    current_state: u32,
}

impl Default for AttParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AttParser {
    pub fn new() -> Self {
        Self::with_config(ParseConfig::default())
    }

    pub fn with_config(config: ParseConfig) -> Self {
        let fst = PackedFst::with_reserve(
            config.state_reserve,
            config.arc_reserve,
            config.symbol_reserve,
        );
        Self {
            fst: Some(fst),
            config,
            line_number: 0,
            current_state: 0,
        }
    }

    /// Number of lines fed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The automaton under construction, `None` after an error.
    pub fn automaton(&self) -> Option<&PackedFst> {
        self.fst.as_ref()
    }

    /// Apply one line. A trailing `\n` or `\r\n` is ignored.
    pub fn feed_line(&mut self, line: &str) -> Result<(), TinyFstError> {
        self.feed(|| Ok(line))
    }

    /// Apply one raw line. Bytes that are not UTF-8 fail the line with
    /// [`ParseError::InvalidUtf8`].
    pub fn feed_bytes(&mut self, line: &[u8]) -> Result<(), TinyFstError> {
        self.feed(|| {
            std::str::from_utf8(line).map_err(|_| ParseError::InvalidUtf8 {
                line: String::from_utf8_lossy(line).trim_end_matches(['\r', '\n']).to_string(),
            })
        })
    }

    fn feed<'l>(
        &mut self,
        decode: impl FnOnce() -> Result<&'l str, ParseError>,
    ) -> Result<(), TinyFstError> {
        let Some(fst) = self.fst.as_mut() else {
            return Err(TinyFstError::Aborted {
                line: self.line_number,
            });
        };
        self.line_number += 1;

        let applied = decode().and_then(|line| {
            let line = line.strip_suffix('\n').unwrap_or(line);
            let line = line.strip_suffix('\r').unwrap_or(line);
            apply_line(fst, &mut self.current_state, line)
        });
        if let Err(kind) = applied {
            log::debug!("aborting AT&T parse at line {}: {kind}", self.line_number);
            self.fst = None;
            return Err(TinyFstError::Parse {
                line: self.line_number,
                kind,
            });
        }
        Ok(())
    }

    /// Finish parsing and hand over the automaton.
    pub fn finish(self) -> Result<PackedFst, TinyFstError> {
        let mut fst = self.fst.ok_or(TinyFstError::Aborted {
            line: self.line_number,
        })?;
        if self.config.shrink {
            fst.shrink_to_fit();
        }
        log::debug!(
            "read AT&T transducer: {} lines, {} states, {} arcs, {} symbols",
            self.line_number,
            fst.state_count(),
            fst.arc_count(),
            fst.symbol_count()
        );
        Ok(fst)
    }
}

/// Interpret one line against the automaton. `current` is the source state
/// of the previous line.
fn apply_line(fst: &mut PackedFst, current: &mut u32, line: &str) -> Result<(), ParseError> {
    let fields = Fields::split(line)?;

    let state = parse_state_number(&fields[0])?;
    if state < *current {
        return Err(ParseError::UnorderedState {
            state,
            current: *current,
        });
    }
    if state > *current {
        fst.ensure_state(state)?;
        *current = state;
    }

    match fields.len() {
        1 => fst.set_final_weight(state, 0.0)?,
        2 => {
            let weight = parse_weight(&fields[1])?;
            fst.set_final_weight(state, weight)?;
        }
        3 => {
            return Err(ParseError::ThreeColumns {
                line: line.to_string(),
            });
        }
        _ => {
            let target = parse_state_number(&fields[1])?;
            let weight = if fields.len() == 5 {
                parse_weight(&fields[4])?
            } else {
                0.0
            };
            fst.ensure_state(target)?;
            let input = fst.symbols_mut().intern(&fields[2])?;
            let output = fst.symbols_mut().intern(&fields[3])?;
            fst.append_arc(state, target, input, output, weight)?;
        }
    }
    Ok(())
}

/// Build an automaton from any source of lines.
pub fn parse_att_lines<I, S>(lines: I, config: &ParseConfig) -> Result<PackedFst, TinyFstError>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    log::debug!("reading AT&T transducer with {config:?}");
    let mut parser = AttParser::with_config(*config);
    for line in lines {
        parser.feed_line(line?.as_ref())?;
    }
    parser.finish()
}

/// Read an AT&T transducer with the default configuration.
pub fn parse_att<R: BufRead>(reader: R) -> Result<PackedFst, TinyFstError> {
    parse_att_with(reader, &ParseConfig::default())
}

/// Read an AT&T transducer with an explicit configuration.
///
/// Lines are read as bytes, so content that is not UTF-8 is reported as a
/// parse error on its line rather than as a read failure.
pub fn parse_att_with<R: BufRead>(
    mut reader: R,
    config: &ParseConfig,
) -> Result<PackedFst, TinyFstError> {
    log::debug!("reading AT&T transducer with {config:?}");
    let mut parser = AttParser::with_config(*config);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        parser.feed_bytes(&buf)?;
    }
    parser.finish()
}

/// Read an AT&T transducer held in memory.
pub fn parse_att_str(text: &str) -> Result<PackedFst, TinyFstError> {
    parse_att_lines(text.lines().map(Ok::<_, io::Error>), &ParseConfig::default())
}
