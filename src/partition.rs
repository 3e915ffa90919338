//! Character-class partitioning of the 256-byte alphabet.
//!
//! <https://en.wikipedia.org/wiki/Partition_of_a_set>
//!
//! For an expression `e`, every byte within one block of the computed
//! partition yields the same derivative of `e` up to normalisation, so
//! the automaton builder only has to differentiate once per block
//! instead of 256 times per state.
//!
//! Representation convention, inherited by every consumer: the first
//! block is "Σ-based", storing the bytes *excluded* from the implicit
//! default block; every other block is "∅-based", storing the bytes it
//! contains. The Σ-based block is always emitted, even when empty.

use bit_set::BitSet;

use crate::repr::{Exp, Repr};

/// Intersects two partitions, preserving the Σ-based/∅-based
/// convention of the operands.
fn intersection(x: &[BitSet], y: &[BitSet]) -> Vec<BitSet> {
    let mut z = Vec::new();
    for (i, xi) in x.iter().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            if i == 0 && j == 0 {
                // Set union: both are Σ-based. The result is Σ-based,
                // so it may be empty.
                let mut bs = xi.clone();
                bs.union_with(yj);
                z.push(bs);
            } else if i == 0 {
                // Set difference: xi is Σ-based, yj is ∅-based.
                let mut bs = yj.clone();
                bs.difference_with(xi);
                if !bs.is_empty() {
                    z.push(bs);
                }
            } else if j == 0 {
                // Set difference: xi is ∅-based, yj is Σ-based.
                let mut bs = xi.clone();
                bs.difference_with(yj);
                if !bs.is_empty() {
                    z.push(bs);
                }
            } else {
                // Set intersection: both are ∅-based.
                let mut bs = xi.clone();
                bs.intersect_with(yj);
                if !bs.is_empty() {
                    z.push(bs);
                }
            }
        }
    }
    z
}

fn byte_set(lo: u8, hi: u8) -> BitSet {
    let mut bs = BitSet::with_capacity(256);
    for byte in lo..=hi {
        bs.insert(byte as usize);
    }
    bs
}

impl Exp {
    /// Computes the partition of the alphabet induced by this
    /// expression. See the module documentation for the block
    /// representation.
    pub fn partitions(&self) -> Vec<BitSet> {
        match *self.repr() {
            // C(∅) = C(ε) = C(.) = {Σ}
            Repr::EmptySet | Repr::EmptyString | Repr::AnyByte => {
                vec![BitSet::with_capacity(256)]
            }

            // C(a) = {Σ \ a, a}
            Repr::Byte(byte) => {
                let bs = byte_set(byte, byte);
                vec![bs.clone(), bs]
            }

            // C(S) = {Σ \ S, S}
            Repr::ByteRange(lo, hi) => {
                let bs = byte_set(lo, hi);
                vec![bs.clone(), bs]
            }

            // C(r∗) = C(¬r) = C(r); a group partitions as its body.
            Repr::KleeneClosure(ref sub)
            | Repr::Complement(ref sub)
            | Repr::Group { ref sub, .. } => sub.partitions(),

            // C(r · s) = C(r) ∧ C(s) if ν(r) = ε, C(r) if ν(r) = ∅
            Repr::Concatenation(ref head, ref tail) => {
                if head.is_nullable() {
                    intersection(&head.partitions(), &tail.partitions())
                } else {
                    head.partitions()
                }
            }

            // C(r & s) = C(r + s) = C(r) ∧ C(s)
            Repr::Conjunction(ref subs) | Repr::Disjunction(ref subs) => subs
                .iter()
                .map(Exp::partitions)
                .reduce(|x, y| intersection(&x, &y))
                .unwrap_or_else(|| vec![BitSet::with_capacity(256)]),
        }
    }
}
