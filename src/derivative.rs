//! Brzozowski derivatives.
//!
//! <https://en.wikipedia.org/wiki/Brzozowski_derivative>
//!
//! `∂_b e` denotes the expression whose language is
//! `{w : b·w ∈ L(e)}`. The derivative alone does not give a finite
//! automaton; the builder normalises after every step so that the set
//! of reachable expressions is finite.

use crate::error::Error;
use crate::repr::{Exp, Repr};

impl Exp {
    /// Returns the derivative of this expression with respect to `byte`.
    ///
    /// Group expressions are not byte-derivable: capture-carrying
    /// expressions go through the partial-derivative pipeline instead,
    /// and reaching one here is an [`Error::UnexpectedGroup`].
    pub fn derivative(&self, byte: u8) -> Result<Exp, Error> {
        self.derive(Some(byte))
    }

    /// The derivative with respect to a symbol, where `None` stands for
    /// a byte that no `Byte` or `ByteRange` of the expression contains.
    /// The automaton builder uses it to drive the default transition of
    /// a Σ-based partition block.
    pub(crate) fn derive(&self, symbol: Option<u8>) -> Result<Exp, Error> {
        match *self.repr() {
            // ∂a∅ = ∅, ∂aε = ∅
            Repr::EmptySet | Repr::EmptyString => Ok(Exp::empty_set()),

            // ∂a. = ε
            Repr::AnyByte => Ok(Exp::empty_string()),

            // ∂aa = ε, ∂ab = ∅ for b ≠ a
            Repr::Byte(byte) => {
                if symbol == Some(byte) {
                    Ok(Exp::empty_string())
                } else {
                    Ok(Exp::empty_set())
                }
            }

            // ∂aS = ε if a ∈ S, ∅ if a ∉ S
            Repr::ByteRange(lo, hi) => {
                if symbol.is_some_and(|byte| lo <= byte && byte <= hi) {
                    Ok(Exp::empty_string())
                } else {
                    Ok(Exp::empty_set())
                }
            }

            // ∂a(r∗) = ∂ar · r∗
            Repr::KleeneClosure(ref sub) => {
                Ok(Exp::concatenation(sub.derive(symbol)?, self.clone()))
            }

            // ∂a(r · s) = ∂ar · s + ν(r) · ∂as
            Repr::Concatenation(ref head, ref tail) => {
                let first = Exp::concatenation(head.derive(symbol)?, tail.clone());
                if head.is_nullable() {
                    Ok(Exp::disjunction(vec![first, tail.derive(symbol)?]))
                } else {
                    Ok(first)
                }
            }

            // ∂a(¬r) = ¬(∂ar)
            Repr::Complement(ref sub) => Ok(Exp::complement(sub.derive(symbol)?)),

            // ∂a(r & s) = ∂ar & ∂as
            Repr::Conjunction(ref subs) => {
                let subs = subs
                    .iter()
                    .map(|sub| sub.derive(symbol))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Exp::conjunction(subs))
            }

            // ∂a(r + s) = ∂ar + ∂as
            Repr::Disjunction(ref subs) => {
                let subs = subs
                    .iter()
                    .map(|sub| sub.derive(symbol))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Exp::disjunction(subs))
            }

            Repr::Group { .. } => Err(Error::UnexpectedGroup),
        }
    }

    /// Matches `input` by repeated differentiation, without building an
    /// automaton. Each step normalises the derivative, so the working
    /// expression stays within the finite set of canonical forms.
    pub fn is_match(&self, input: &[u8]) -> Result<bool, Error> {
        let mut exp = self.clone();
        for &byte in input {
            exp = exp.derivative(byte)?.normalised();
        }
        Ok(exp.is_nullable())
    }
}
