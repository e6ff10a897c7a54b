// Symbol table: label interning with first-seen indices.

use std::hash::BuildHasher;

use hashbrown::{DefaultHashBuilder, HashTable};

use crate::automaton::grow;
use crate::{EPSILON, EPSILON_INDEX, StorageError};

/// Interned input/output labels shared by every arc of an automaton.
///
/// Index 0 always holds the epsilon label [`EPSILON`]. Other labels get the
/// next free index the first time they are interned and keep it for the
/// lifetime of the table. Each label is stored once; the hash index only
/// holds symbol numbers and compares against the stored strings.
pub struct SymbolTable {
    /// Maps symbol index to its label.
    strings: Vec<Box<str>>,
    /// Hash index from label to symbol index.
    lookup: HashTable<u32>,
    hasher: DefaultHashBuilder,
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.strings.iter()).finish()
    }
}

impl SymbolTable {
    /// Create a table with room for `capacity` labels, holding only epsilon.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut table = Self {
            strings: Vec::with_capacity(capacity),
            lookup: HashTable::with_capacity(capacity),
            hasher: DefaultHashBuilder::default(),
        };
        let hash = table.hasher.hash_one(EPSILON);
        table.strings.push(EPSILON.into());
        let (strings, hasher) = (&table.strings, &table.hasher);
        table
            .lookup
            .insert_unique(hash, EPSILON_INDEX, |&i| hasher.hash_one(&*strings[i as usize]));
        table
    }

    /// Return the index of `label`, adding it if it has not been seen.
    pub fn intern(&mut self, label: &str) -> Result<u32, StorageError> {
        let hash = self.hasher.hash_one(label);
        let strings = &self.strings;
        if let Some(&index) = self
            .lookup
            .find(hash, |&i| &*strings[i as usize] == label)
        {
            return Ok(index);
        }

        let index = u32::try_from(self.strings.len()).map_err(|_| StorageError::SymbolOverflow)?;
        grow(&mut self.strings, 1)?;
        self.strings.push(label.into());

        let (strings, hasher) = (&self.strings, &self.hasher);
        self.lookup
            .insert_unique(hash, index, |&i| hasher.hash_one(&*strings[i as usize]));
        Ok(index)
    }

    /// Index of an already interned label.
    pub fn index_of(&self, label: &str) -> Option<u32> {
        let hash = self.hasher.hash_one(label);
        self.lookup
            .find(hash, |&i| &*self.strings[i as usize] == label)
            .copied()
    }

    /// Label at `index`.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&str> {
        self.strings.get(index as usize).map(|s| &**s)
    }

    /// Number of interned labels, epsilon included.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Always `false`: epsilon is present from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Labels in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.strings.iter().map(|s| &**s)
    }

    pub fn capacity(&self) -> usize {
        self.strings.capacity()
    }

    pub fn shrink_to_fit(&mut self) {
        self.strings.shrink_to_fit();
        let (strings, hasher) = (&self.strings, &self.hasher);
        self.lookup
            .shrink_to_fit(|&i| hasher.hash_one(&*strings[i as usize]));
    }

    /// Bytes held by the label list, the label text, and the hash index.
    pub fn byte_footprint(&self) -> usize {
        let list = self.strings.capacity() * size_of::<Box<str>>();
        let text: usize = self.strings.iter().map(|s| s.len()).sum();
        // one control byte per bucket besides the stored index
        let index = self.lookup.capacity() * (size_of::<u32>() + 1);
        list + text + index
    }
}

impl std::ops::Index<u32> for SymbolTable {
    type Output = str;

    fn index(&self, index: u32) -> &str {
        &self.strings[index as usize]
    }
}
