use thiserror::Error;

/// Errors surfaced while turning an expression into an automaton.
///
/// Matching itself never fails: once construction succeeds, both
/// matchers are total functions of their inputs, and "no match" is a
/// value rather than an error.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// A `Group` expression reached the Brzozowski derivative. Groups
    /// only carry meaning in the tagged pipeline; strip them, or
    /// compile a [`Tnfa`](crate::Tnfa) instead.
    #[error("group expression in a byte derivative; capture-less compilation requires a group-free expression")]
    UnexpectedGroup,

    /// Automaton construction interned more states than the configured
    /// limit allows.
    #[error("automaton exceeds the configured limit of {limit} states")]
    StateLimit { limit: usize },
}
