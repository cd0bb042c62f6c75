//! Knobs that control the parser.

/// The default limit on subgraph nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// How deep subgraphs may nest. Statement lists and edge chains are
    /// parsed in loops, so this is the only thing that grows the stack.
    pub max_depth: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
