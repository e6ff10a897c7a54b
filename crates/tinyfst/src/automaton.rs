// Packed automaton: flat state and arc arrays plus the symbol table.

use crate::config::DEFAULT_RESERVE;
use crate::symbols::SymbolTable;
use crate::transition::{Arc, State};
use crate::StorageError;

/// Make room for `additional` more elements, doubling the capacity when the
/// current allocation is too small.
///
/// This is the only place capacity arithmetic happens; callers ask for room
/// before they push.
pub(crate) fn grow<T>(v: &mut Vec<T>, additional: usize) -> Result<(), StorageError> {
    let needed = v
        .len()
        .checked_add(additional)
        .ok_or(StorageError::AllocationFailed { requested: additional })?;
    if needed <= v.capacity() {
        return Ok(());
    }
    let target = needed.max(v.capacity().saturating_mul(2));
    log::trace!(
        "growing {} buffer from {} to {} elements",
        std::any::type_name::<T>(),
        v.capacity(),
        target
    );
    v.try_reserve_exact(target - v.len())
        .map_err(|_| StorageError::AllocationFailed { requested: target })
}

/// Weighted transducer packed into three flat arrays.
///
/// State `s` owns the arcs `arcs[first_arc_index..first_arc_index + arc_count]`.
/// Arcs are only ever appended, and all arcs of one state are appended
/// back to back, so these slices are disjoint and follow insertion order.
/// State 0 is the start state and always exists; symbol 0 is epsilon.
pub struct PackedFst {
    states: Vec<State>,
    arcs: Vec<Arc>,
    symbols: SymbolTable,
    /// State that received the most recent arc.
    last_arc_source: Option<u32>,
}

impl std::fmt::Debug for PackedFst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedFst")
            .field("state_count", &self.states.len())
            .field("arc_count", &self.arcs.len())
            .field("symbol_count", &self.symbols.len())
            .finish()
    }
}

impl Default for PackedFst {
    fn default() -> Self {
        Self::new()
    }
}

impl PackedFst {
    /// Create an automaton with the default reserve for every array.
    pub fn new() -> Self {
        Self::with_reserve(DEFAULT_RESERVE, DEFAULT_RESERVE, DEFAULT_RESERVE)
    }

    /// Create an automaton with room for the given number of states, arcs and
    /// symbols. The start state and the epsilon symbol are always present.
    pub fn with_reserve(state_reserve: usize, arc_reserve: usize, symbol_reserve: usize) -> Self {
        let mut states = Vec::with_capacity(state_reserve.max(1));
        states.push(State::EMPTY);
        Self {
            states,
            arcs: Vec::with_capacity(arc_reserve),
            symbols: SymbolTable::with_capacity(symbol_reserve),
            last_arc_source: None,
        }
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    #[inline]
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    #[inline]
    pub fn state(&self, state: u32) -> Option<&State> {
        self.states.get(state as usize)
    }

    /// Outgoing arcs of `state`, in the order they were appended.
    pub fn arcs_of(&self, state: u32) -> &[Arc] {
        match self.state(state) {
            Some(s) => &self.arcs[s.arc_range()],
            None => &[],
        }
    }

    /// Final weight of `state`, `None` when it does not accept.
    pub fn final_weight(&self, state: u32) -> Option<f32> {
        self.state(state).filter(|s| s.is_final()).map(|s| s.weight)
    }

    pub fn is_final(&self, state: u32) -> bool {
        self.final_weight(state).is_some()
    }

    /// Ask for room for `additional` more states.
    pub fn reserve_states(&mut self, additional: usize) -> Result<(), StorageError> {
        grow(&mut self.states, additional)
    }

    /// Ask for room for `additional` more arcs.
    pub fn reserve_arcs(&mut self, additional: usize) -> Result<(), StorageError> {
        grow(&mut self.arcs, additional)
    }

    /// Make sure every state up to and including `state` exists.
    ///
    /// Each new state, including any skipped over between the previous last
    /// state and `state`, starts with no arcs and an infinite final weight.
    pub fn ensure_state(&mut self, state: u32) -> Result<(), StorageError> {
        let needed = state as usize + 1;
        if needed <= self.states.len() {
            return Ok(());
        }
        self.reserve_states(needed - self.states.len())?;
        self.states.resize(needed, State::EMPTY);
        Ok(())
    }

    /// Append one arc leaving `source`.
    ///
    /// All arcs of a state must be appended consecutively: once another
    /// state has received an arc, `source` can no longer grow its slice.
    pub fn append_arc(
        &mut self,
        source: u32,
        target: u32,
        input_symbol: u32,
        output_symbol: u32,
        weight: f32,
    ) -> Result<(), StorageError> {
        if target as usize >= self.states.len() {
            return Err(StorageError::UnknownState { state: target });
        }
        let arc_index = u32::try_from(self.arcs.len()).map_err(|_| StorageError::ArcIndexOverflow)?;
        let current = self
            .states
            .get(source as usize)
            .ok_or(StorageError::UnknownState { state: source })?;
        if current.arc_count > 0 && self.last_arc_source != Some(source) {
            return Err(StorageError::InterleavedArcs { state: source });
        }
        if current.arc_count == u16::MAX {
            return Err(StorageError::TooManyArcs { state: source });
        }

        self.reserve_arcs(1)?;
        self.arcs.push(Arc {
            input_symbol,
            output_symbol,
            target_state: target,
            weight,
        });

        let s = &mut self.states[source as usize];
        if s.arc_count == 0 {
            s.first_arc_index = arc_index;
        }
        s.arc_count += 1;
        self.last_arc_source = Some(source);
        Ok(())
    }

    /// Set or overwrite the final weight of `state`.
    pub fn set_final_weight(&mut self, state: u32, weight: f32) -> Result<(), StorageError> {
        let s = self
            .states
            .get_mut(state as usize)
            .ok_or(StorageError::UnknownState { state })?;
        s.weight = weight;
        Ok(())
    }

    /// Drop spare capacity from every backing array.
    pub fn shrink_to_fit(&mut self) {
        self.states.shrink_to_fit();
        self.arcs.shrink_to_fit();
        self.symbols.shrink_to_fit();
    }

    /// Bytes owned by the automaton: the aggregate itself, the allocated
    /// state and arc arrays, and the symbol table with its label text.
    pub fn byte_footprint(&self) -> usize {
        size_of::<Self>()
            + self.states.capacity() * size_of::<State>()
            + self.arcs.capacity() * size_of::<Arc>()
            + self.symbols.byte_footprint()
    }

    /// Raw view of the state array.
    pub fn state_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.states)
    }

    /// Raw view of the arc array.
    pub fn arc_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.arcs)
    }
}
