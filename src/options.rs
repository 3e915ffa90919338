/// The set of user configurable limits for automaton construction.
///
/// The Boolean operations make it easy to write expressions whose DFA
/// is exponentially larger than the pattern, so the builder enforces a
/// ceiling on the number of interned states rather than allocating
/// without bound.
#[derive(Clone, Debug)]
pub struct Options {
    /// Maximum number of automaton states to allocate before
    /// construction fails with [`Error::StateLimit`](crate::Error).
    pub state_limit: usize,
}

impl Default for Options {
    fn default() -> Options {
        Options { state_limit: 1 << 16 }
    }
}
