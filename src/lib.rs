//! Regular expression matching on byte strings, closed under the three
//! Boolean operations: disjunction, conjunction and complement.
//!
//! Expressions are matched anchored, against whole strings. Matching is
//! driven entirely by regular expression derivatives: the Brzozowski
//! derivative yields a DFA, and the Antimirov partial derivative with
//! binding annotations yields a tagged NFA that reports capture-group
//! offsets. Canonicalisation keeps the set of derivative classes finite,
//! which is what makes the automaton constructions terminate.
//!
//! References
//! ----------
//!
//! "Derivatives of Regular Expressions",
//! Janusz Brzozowski, JACM 11(4), 1964.
//!
//! "Regular-expression derivatives re-examined",
//! Scott Owens, John Reppy, Aaron Turon, JFP 19(2), 2009.
//!
//! "Partial Derivatives of Regular Expressions and Finite Automaton
//! Constructions", Valentin Antimirov, TCS 155(2), 1996.
//!
//! "Partial Derivatives of an Extended Regular Expression",
//! Pascal Caron, Jean-Marc Champarnaud, Ludovic Mignot, LATA 2011.
//!
//! "A Flexible and Efficient ML Lexer Tool Based on Extended Regular
//! Expression Submatching", Martin Sulzmann, Pippijn van Steenhoven,
//! CC 2014.
//!
//! "Efficient submatch addressing for regular expressions",
//! Ville Laurikari, Master's Thesis, 2001.

mod compile;
mod derivative;
mod error;
mod exec;
mod normal;
mod options;
mod partial;
mod partition;
mod repr;

pub use bit_set::BitSet;

pub use crate::compile::{Dfa, Tnfa};
pub use crate::error::Error;
pub use crate::options::Options;
pub use crate::partial::{BindingKind, Bindings, OuterSet};
pub use crate::repr::{Exp, Mode, Repr};
