// Human-readable rendering of a packed automaton.

use std::fmt;
use std::io::{self, Write};

use crate::automaton::PackedFst;

/// Write the symbol table followed by the transducer in AT&T layout.
///
/// Symbols come first as `index = label` lines. Then, for each state in
/// index order, its final line (if the state is final) and its arcs.
/// Weights are printed with six decimals.
pub fn write_att<W: Write>(fst: &PackedFst, mut out: W) -> io::Result<()> {
    write!(out, "{}", SymbolListing(fst))?;
    write!(out, "{}", AttListing(fst))
}

/// Write only the AT&T lines, without the symbol listing.
///
/// The output is valid input for [`parse_att`](crate::parse_att).
pub fn write_att_only<W: Write>(fst: &PackedFst, mut out: W) -> io::Result<()> {
    write!(out, "{}", AttListing(fst))
}

struct SymbolListing<'a>(&'a PackedFst);

impl fmt::Display for SymbolListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.0.symbols().iter().enumerate() {
            writeln!(f, "{i} = {label}")?;
        }
        Ok(())
    }
}

struct AttListing<'a>(&'a PackedFst);

impl fmt::Display for AttListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fst = self.0;
        let symbols = fst.symbols();
        for (i, state) in fst.states().iter().enumerate() {
            if state.is_final() {
                writeln!(f, "{i}\t{:.6}", state.weight)?;
            }
            for arc in &fst.arcs()[state.arc_range()] {
                writeln!(
                    f,
                    "{i}\t{}\t{}\t{}\t{:.6}",
                    arc.target_state,
                    &symbols[arc.input_symbol],
                    &symbols[arc.output_symbol],
                    arc.weight
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PackedFst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SymbolListing(self), AttListing(self))
    }
}
