//! Canonicalisation of expressions under the Kleene-algebra and Boolean
//! identities.
//!
//! Repeated differentiation of an un-normalised expression produces an
//! unbounded family of equivalent trees; the automaton builder relies on
//! this rewrite mapping every member of an equivalence class to a single
//! representative so that its worklist terminates.

use crate::repr::{Exp, Repr};

fn universal() -> Exp {
    Exp::norm(Repr::Complement(Exp::empty_set()))
}

impl Exp {
    /// Returns the canonical form of this expression.
    ///
    /// Idempotent and total: `e.normalised().normalised() == e.normalised()`
    /// for every `e`.
    pub fn normalised(&self) -> Exp {
        if self.is_norm() {
            return self.clone();
        }
        match *self.repr() {
            Repr::EmptySet
            | Repr::EmptyString
            | Repr::AnyByte
            | Repr::Byte(_)
            | Repr::ByteRange(..) => self.clone(),

            Repr::KleeneClosure(ref sub) => {
                let sub = sub.normalised();
                // (r∗)∗ ≈ r∗
                if matches!(*sub.repr(), Repr::KleeneClosure(_)) {
                    return sub;
                }
                // ∅∗ ≈ ε, ε∗ ≈ ε
                if sub.is_empty_set() || sub.is_empty_string() {
                    return Exp::empty_string();
                }
                // \C∗ ≈ ¬∅
                if matches!(*sub.repr(), Repr::AnyByte) {
                    return universal();
                }
                // .∗ ≈ ¬∅
                // Not strictly correct, but it is not this engine's job
                // to enforce that input is structurally valid UTF-8.
                if sub == Exp::any_character() {
                    return universal();
                }
                Exp::norm(Repr::KleeneClosure(sub))
            }

            Repr::Concatenation(ref head, ref tail) => {
                // (r · s) · t ≈ r · (s · t)
                let mut head = head.normalised();
                let mut tail = tail.clone();
                loop {
                    let (h, t) = match *head.repr() {
                        Repr::Concatenation(ref h, ref t) => (h.clone(), t.clone()),
                        _ => break,
                    };
                    tail = Exp::concatenation(t, tail);
                    head = h;
                }
                let tail = tail.normalised();
                // ∅ · r ≈ r · ∅ ≈ ∅
                if head.is_empty_set() {
                    return head;
                }
                if tail.is_empty_set() {
                    return tail;
                }
                // ε · r ≈ r, r · ε ≈ r
                if head.is_empty_string() {
                    return tail;
                }
                if tail.is_empty_string() {
                    return head;
                }
                Exp::norm(Repr::Concatenation(head, tail))
            }

            Repr::Complement(ref sub) => {
                let sub = sub.normalised();
                // ¬(¬r) ≈ r
                if let Repr::Complement(ref inner) = *sub.repr() {
                    return inner.clone();
                }
                Exp::norm(Repr::Complement(sub))
            }

            Repr::Conjunction(ref subs) => {
                let mut flat: Vec<Exp> = Vec::with_capacity(subs.len());
                for sub in subs {
                    let sub = sub.normalised();
                    // ∅ & r ≈ r & ∅ ≈ ∅
                    if sub.is_empty_set() {
                        return sub;
                    }
                    // (r & s) & t ≈ r & (s & t)
                    if let Repr::Conjunction(ref inner) = *sub.repr() {
                        flat.extend(inner.iter().cloned());
                        continue;
                    }
                    flat.push(sub);
                }
                // r & s ≈ s & r
                flat.sort();
                // r & r ≈ r
                flat.dedup();
                // ¬∅ & r ≈ r & ¬∅ ≈ r
                if flat.len() > 1 {
                    flat.retain(|sub| !sub.is_universal());
                }
                if flat.len() == 1 {
                    return flat.remove(0);
                }
                Exp::norm(Repr::Conjunction(flat))
            }

            Repr::Disjunction(ref subs) => {
                let mut flat: Vec<Exp> = Vec::with_capacity(subs.len());
                for sub in subs {
                    let sub = sub.normalised();
                    // ¬∅ + r ≈ r + ¬∅ ≈ ¬∅
                    if sub.is_universal() {
                        return sub;
                    }
                    // (r + s) + t ≈ r + (s + t)
                    if let Repr::Disjunction(ref inner) = *sub.repr() {
                        flat.extend(inner.iter().cloned());
                        continue;
                    }
                    flat.push(sub);
                }
                // r + s ≈ s + r
                flat.sort();
                // r + r ≈ r
                flat.dedup();
                // ∅ + r ≈ r + ∅ ≈ r
                if flat.len() > 1 {
                    flat.retain(|sub| !sub.is_empty_set());
                }
                if flat.len() == 1 {
                    return flat.remove(0);
                }
                Exp::norm(Repr::Disjunction(flat))
            }

            Repr::Group { num, ref sub, mode, capture } => {
                let sub = sub.normalised();
                // A group around nothing, or around only the empty
                // string, is that atom.
                if sub.is_empty_set() || sub.is_empty_string() {
                    return sub;
                }
                Exp::norm(Repr::Group { num, sub, mode, capture })
            }
        }
    }
}
