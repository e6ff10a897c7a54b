// Parse configuration: initial reserve sizes and completion options.

/// Initial capacity of each backing array when nothing else is requested.
pub const DEFAULT_RESERVE: usize = 1024;

/// Options for building a [`PackedFst`](crate::PackedFst) from AT&T text.
///
/// The reserve sizes are only starting points; the arrays double as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    pub state_reserve: usize,
    pub arc_reserve: usize,
    pub symbol_reserve: usize,
    /// Shrink every array to its exact size once the input is consumed.
    pub shrink: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            state_reserve: DEFAULT_RESERVE,
            arc_reserve: DEFAULT_RESERVE,
            symbol_reserve: DEFAULT_RESERVE,
            shrink: true,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the same initial reserve for states, arcs and symbols.
    pub fn reserve(mut self, n: usize) -> Self {
        self.state_reserve = n;
        self.arc_reserve = n;
        self.symbol_reserve = n;
        self
    }

    pub fn state_reserve(mut self, n: usize) -> Self {
        self.state_reserve = n;
        self
    }

    pub fn arc_reserve(mut self, n: usize) -> Self {
        self.arc_reserve = n;
        self
    }

    pub fn symbol_reserve(mut self, n: usize) -> Self {
        self.symbol_reserve = n;
        self
    }

    pub fn shrink(mut self, yes: bool) -> Self {
        self.shrink = yes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ParseConfig::default();
        assert_eq!(config.state_reserve, 1024);
        assert_eq!(config.arc_reserve, 1024);
        assert_eq!(config.symbol_reserve, 1024);
        assert!(config.shrink);
    }

    #[test]
    fn builder_setters() {
        let config = ParseConfig::new().reserve(8).arc_reserve(32).shrink(false);
        assert_eq!(config.state_reserve, 8);
        assert_eq!(config.arc_reserve, 32);
        assert_eq!(config.symbol_reserve, 8);
        assert!(!config.shrink);
    }
}
