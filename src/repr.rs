//! The expression algebra: byte-level regular expressions extended with
//! complement and conjunction, plus capture groups.
//!
//! <https://en.wikipedia.org/wiki/Regular_expression#Formal_definition>

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The preference mode of a [`Group`](Repr::Group).
///
/// A `Minimal` group prefers the shortest span, a `Maximal` group the
/// longest; a `Passive` group only records whether it participated.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Mode {
    Minimal,
    Passive,
    Maximal,
}

/// A regular expression over bytes.
///
/// Variant order is significant: the structural order compares the kind
/// first, so reordering variants changes the canonical order of
/// conjunction and disjunction operands.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Repr {
    /// ∅, matches nothing.
    EmptySet,
    /// ε, matches the empty string.
    EmptyString,
    /// Matches any single byte.
    AnyByte,
    /// Matches exactly one byte.
    Byte(u8),
    /// Matches any single byte in the inclusive range.
    ByteRange(u8, u8),
    /// r∗, zero or more matches of the subexpression.
    KleeneClosure(Exp),
    /// r · s. Right-associated when normalised.
    Concatenation(Exp, Exp),
    /// ¬r, any byte string the subexpression does not match.
    Complement(Exp),
    /// r & s & …, matched by all operands. At least two operands when
    /// normalised, sorted and deduplicated.
    Conjunction(Vec<Exp>),
    /// r + s + …, matched by any operand. Same shape constraints as
    /// conjunction.
    Disjunction(Vec<Exp>),
    /// A capture/ordering group around the subexpression.
    Group {
        num: usize,
        sub: Exp,
        mode: Mode,
        capture: bool,
    },
}

/// A shared handle to an immutable expression.
///
/// Cloning is cheap and subexpressions are shared freely across
/// derivative chains. Comparison, equality and hashing are structural;
/// two handles comparing equal are indistinguishable in matching. The
/// `norm` flag records that the node is already in canonical form and
/// never takes part in comparison.
#[derive(Clone)]
pub struct Exp {
    repr: Arc<Repr>,
    norm: bool,
}

impl Exp {
    fn new(repr: Repr) -> Exp {
        Exp { repr: Arc::new(repr), norm: false }
    }

    /// Builds a node that is canonical by construction.
    pub(crate) fn norm(repr: Repr) -> Exp {
        Exp { repr: Arc::new(repr), norm: true }
    }

    pub fn repr(&self) -> &Repr {
        &self.repr
    }

    pub(crate) fn is_norm(&self) -> bool {
        self.norm
    }

    pub fn empty_set() -> Exp {
        Exp::norm(Repr::EmptySet)
    }

    pub fn empty_string() -> Exp {
        Exp::norm(Repr::EmptyString)
    }

    pub fn any_byte() -> Exp {
        Exp::norm(Repr::AnyByte)
    }

    pub fn byte(byte: u8) -> Exp {
        Exp::norm(Repr::Byte(byte))
    }

    pub fn byte_range(lo: u8, hi: u8) -> Exp {
        Exp::norm(Repr::ByteRange(lo, hi))
    }

    pub fn kleene_closure(sub: Exp) -> Exp {
        Exp::new(Repr::KleeneClosure(sub))
    }

    pub fn concatenation(head: Exp, tail: Exp) -> Exp {
        Exp::new(Repr::Concatenation(head, tail))
    }

    pub fn complement(sub: Exp) -> Exp {
        Exp::new(Repr::Complement(sub))
    }

    pub fn conjunction(subs: Vec<Exp>) -> Exp {
        Exp::new(Repr::Conjunction(subs))
    }

    pub fn disjunction(subs: Vec<Exp>) -> Exp {
        Exp::new(Repr::Disjunction(subs))
    }

    pub fn group(num: usize, sub: Exp, mode: Mode, capture: bool) -> Exp {
        Exp::new(Repr::Group { num, sub, mode, capture })
    }

    /// A single UTF-8 encoded code point: the disjunction of the four
    /// byte-length alternatives.
    pub fn any_character() -> Exp {
        let b1 = Exp::byte_range(0x00, 0x7F); // 0xxxxxxx
        let bx = Exp::byte_range(0x80, 0xBF); // 10xxxxxx
        let b2 = Exp::byte_range(0xC0, 0xDF); // 110xxxxx
        let b3 = Exp::byte_range(0xE0, 0xEF); // 1110xxxx
        let b4 = Exp::byte_range(0xF0, 0xF7); // 11110xxx
        Exp::disjunction(vec![
            b1,
            Exp::concatenation(b2, bx.clone()),
            Exp::concatenation(b3, Exp::concatenation(bx.clone(), bx.clone())),
            Exp::concatenation(
                b4,
                Exp::concatenation(bx.clone(), Exp::concatenation(bx.clone(), bx)),
            ),
        ])
    }

    /// The UTF-8 encoding of `character` as a concatenation of bytes.
    pub fn character(character: char) -> Exp {
        let mut buf = [0u8; 4];
        Exp::literal(character.encode_utf8(&mut buf).as_bytes())
    }

    /// The concatenation of the bytes of `literal`, right-associated.
    /// The empty literal is ε.
    pub fn literal(literal: &[u8]) -> Exp {
        match literal.split_first() {
            None => Exp::empty_string(),
            Some((&byte, &[])) => Exp::byte(byte),
            Some((&byte, rest)) => {
                Exp::concatenation(Exp::byte(byte), Exp::literal(rest))
            }
        }
    }

    /// The disjunction of the UTF-8 encodings of `characters`.
    pub fn character_class<I>(characters: I) -> Exp
    where
        I: IntoIterator<Item = char>,
    {
        let subs: Vec<Exp> = characters.into_iter().map(Exp::character).collect();
        if subs.is_empty() {
            Exp::empty_set()
        } else {
            Exp::disjunction(subs)
        }
    }

    pub(crate) fn is_empty_set(&self) -> bool {
        matches!(*self.repr, Repr::EmptySet)
    }

    pub(crate) fn is_empty_string(&self) -> bool {
        matches!(*self.repr, Repr::EmptyString)
    }

    /// ¬∅, the expression matching every byte string.
    pub(crate) fn is_universal(&self) -> bool {
        match *self.repr {
            Repr::Complement(ref sub) => sub.is_empty_set(),
            _ => false,
        }
    }

    /// Whether the expression matches the empty string.
    pub fn is_nullable(&self) -> bool {
        match *self.repr {
            // ν(∅) = ∅
            Repr::EmptySet => false,
            // ν(ε) = ε
            Repr::EmptyString => true,
            // ν(.) = ν(a) = ν(S) = ∅
            Repr::AnyByte | Repr::Byte(_) | Repr::ByteRange(..) => false,
            // ν(r∗) = ε
            Repr::KleeneClosure(_) => true,
            // ν(r · s) = ν(r) & ν(s)
            Repr::Concatenation(ref head, ref tail) => {
                head.is_nullable() && tail.is_nullable()
            }
            // ν(¬r) = ε if ν(r) = ∅, ∅ if ν(r) = ε
            Repr::Complement(ref sub) => !sub.is_nullable(),
            // ν(r & s) = ν(r) & ν(s)
            Repr::Conjunction(ref subs) => subs.iter().all(Exp::is_nullable),
            // ν(r + s) = ν(r) + ν(s)
            Repr::Disjunction(ref subs) => subs.iter().any(Exp::is_nullable),
            Repr::Group { ref sub, .. } => sub.is_nullable(),
        }
    }
}

impl PartialEq for Exp {
    fn eq(&self, other: &Exp) -> bool {
        self.repr == other.repr
    }
}

impl Eq for Exp {}

impl PartialOrd for Exp {
    fn partial_cmp(&self, other: &Exp) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Exp {
    fn cmp(&self, other: &Exp) -> Ordering {
        self.repr.cmp(&other.repr)
    }
}

impl Hash for Exp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state);
    }
}

impl Debug for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.repr, f)
    }
}
