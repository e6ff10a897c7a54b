// Packed state and arc records.
// Both are plain old data so the arrays can be viewed as raw bytes.

use bytemuck::{Pod, Zeroable};

use crate::NOT_FINAL;

/// One state of the packed automaton (12 bytes).
///
/// - `first_arc_index` (u32): index of the first arc of this state
/// - `weight` (f32): final weight, `+inf` when the state does not accept
/// - `arc_count` (u16): number of arcs following `first_arc_index`
/// - `_reserved` (u16): padding, always zero
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct State {
    pub first_arc_index: u32,
    pub weight: f32,
    pub arc_count: u16,
    pub _reserved: u16,
}

impl State {
    /// A state with no arcs that does not accept.
    pub const EMPTY: State = State {
        first_arc_index: 0,
        weight: NOT_FINAL,
        arc_count: 0,
        _reserved: 0,
    };

    /// A NaN weight compares false here, so it reads as non-final; the
    /// AT&T reader refuses NaN weights for that reason.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.weight < NOT_FINAL
    }

    /// Range of this state's arcs in the arcs array.
    #[inline]
    pub fn arc_range(&self) -> std::ops::Range<usize> {
        let first = self.first_arc_index as usize;
        first..first + self.arc_count as usize
    }
}

impl Default for State {
    fn default() -> Self {
        State::EMPTY
    }
}

/// One arc of the packed automaton (16 bytes).
///
/// Layout:
/// - `input_symbol` (u32): input label index in the symbol table
/// - `output_symbol` (u32): output label index in the symbol table
/// - `target_state` (u32): destination state index
/// - `weight` (f32): transition weight
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Arc {
    pub input_symbol: u32,
    pub output_symbol: u32,
    pub target_state: u32,
    pub weight: f32,
}

// Static assertions for struct sizes
const _: () = assert!(size_of::<State>() == 12);
const _: () = assert!(size_of::<Arc>() == 16);
