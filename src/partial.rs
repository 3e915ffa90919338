//! Antimirov partial derivatives with binding annotations.
//!
//! Where the Brzozowski derivative rewrites an expression into a single
//! successor, the partial derivative returns a *set* of alternatives
//! whose union-language equals the derivative's language. Each
//! alternative carries the binding actions to replay against the
//! capture-group offset vectors when the byte is consumed; the tagged
//! NFA is built directly from these sets.

use itertools::iproduct;

use crate::repr::{Exp, Repr};

/// One action against a numbered capture slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BindingKind {
    /// Forget a span recorded by an abandoned closure iteration.
    Cancel,
    /// Record a zero-width participation at the current position.
    Epsilon,
    /// Extend the span by the byte being consumed.
    Append,
}

/// An ordered sequence of `(group, action)` pairs, applied left to
/// right.
pub type Bindings = Vec<(usize, BindingKind)>;

/// The result of a partial derivative: a disjunction of alternatives,
/// each an inner conjunction of expressions paired with the bindings to
/// apply on consuming the byte.
///
/// Inner sets are represented as un-normalised `Conjunction` nodes so
/// that the De Morgan dual in the complement rule can enumerate their
/// terms; normalisation collapses the singletons away when the
/// automaton builder interns the alternatives.
pub type OuterSet = Vec<(Exp, Bindings)>;

fn outer_unit(exp: Exp) -> OuterSet {
    vec![(Exp::conjunction(vec![exp]), Bindings::new())]
}

fn inner_subs(inner: &Exp) -> Vec<Exp> {
    match *inner.repr() {
        Repr::Conjunction(ref subs) => subs.clone(),
        _ => vec![inner.clone()],
    }
}

/// Continues every alternative of `x` with `tail`, prepending `initial`
/// to its bindings.
fn partial_concatenation(x: OuterSet, tail: &Exp, initial: &Bindings) -> OuterSet {
    x.into_iter()
        .map(|(inner, bindings)| {
            let sub = Exp::concatenation(inner, tail.clone());
            let mut all = initial.clone();
            all.extend(bindings);
            (Exp::conjunction(vec![sub]), all)
        })
        .collect()
}

/// The De Morgan dual of `x`: one alternative conjoining, for every
/// alternative of `x`, the disjunction of its complemented terms.
/// Complement contributes no bindings.
fn partial_complement(x: &OuterSet) -> OuterSet {
    let subs = x
        .iter()
        .map(|(inner, _)| {
            let negated = inner_subs(inner)
                .into_iter()
                .map(Exp::complement)
                .collect();
            Exp::disjunction(negated)
        })
        .collect();
    vec![(Exp::conjunction(subs), Bindings::new())]
}

/// The cross product of two outer sets; inner terms and bindings are
/// concatenated pairwise.
fn partial_conjunction(x: OuterSet, y: OuterSet) -> OuterSet {
    iproduct!(x.iter(), y.iter())
        .map(|((xi, bx), (yi, by))| {
            let mut subs = inner_subs(xi);
            subs.extend(inner_subs(yi));
            let mut bindings = bx.clone();
            bindings.extend(by.iter().cloned());
            (Exp::conjunction(subs), bindings)
        })
        .collect()
}

fn partial_disjunction(mut x: OuterSet, y: OuterSet) -> OuterSet {
    x.extend(y);
    x
}

impl Exp {
    /// Returns the partial derivative of this expression with respect
    /// to `byte`.
    pub fn partial(&self, byte: u8) -> OuterSet {
        self.partial_symbol(Some(byte))
    }

    /// As [`Exp::partial`], over the same symbol convention as the
    /// Brzozowski path: `None` is a byte outside every `Byte` and
    /// `ByteRange` of the expression.
    pub(crate) fn partial_symbol(&self, symbol: Option<u8>) -> OuterSet {
        match *self.repr() {
            Repr::EmptySet | Repr::EmptyString => outer_unit(Exp::empty_set()),

            Repr::AnyByte => outer_unit(Exp::empty_string()),

            Repr::Byte(byte) => {
                if symbol == Some(byte) {
                    outer_unit(Exp::empty_string())
                } else {
                    outer_unit(Exp::empty_set())
                }
            }

            Repr::ByteRange(lo, hi) => {
                if symbol.is_some_and(|byte| lo <= byte && byte <= hi) {
                    outer_unit(Exp::empty_string())
                } else {
                    outer_unit(Exp::empty_set())
                }
            }

            // Entering one more iteration abandons whatever the groups
            // nested in the body recorded during the previous one.
            Repr::KleeneClosure(ref sub) => partial_concatenation(
                sub.partial_symbol(symbol),
                self,
                &cancel_bindings(sub),
            ),

            Repr::Concatenation(ref head, ref tail) => {
                let first = partial_concatenation(
                    head.partial_symbol(symbol),
                    tail,
                    &Bindings::new(),
                );
                if head.is_nullable() {
                    // The head may match empty, handing the byte to the
                    // tail; its groups participate at zero width.
                    let second = partial_concatenation(
                        tail.partial_symbol(symbol),
                        &Exp::empty_string(),
                        &epsilon_bindings(head),
                    );
                    partial_disjunction(first, second)
                } else {
                    first
                }
            }

            Repr::Complement(ref sub) => {
                partial_complement(&sub.partial_symbol(symbol))
            }

            Repr::Conjunction(ref subs) => subs
                .iter()
                .map(|sub| sub.partial_symbol(symbol))
                .reduce(partial_conjunction)
                .unwrap_or_else(|| outer_unit(Exp::empty_set())),

            Repr::Disjunction(ref subs) => subs
                .iter()
                .map(|sub| sub.partial_symbol(symbol))
                .reduce(partial_disjunction)
                .unwrap_or_else(|| outer_unit(Exp::empty_set())),

            // The byte extends group `num`; the continuation stays
            // inside the group so later bytes keep extending it.
            Repr::Group { num, ref sub, mode, capture } => sub
                .partial_symbol(symbol)
                .into_iter()
                .map(|(inner, mut bindings)| {
                    bindings.push((num, BindingKind::Append));
                    let grouped = Exp::group(num, inner, mode, capture);
                    (Exp::conjunction(vec![grouped]), bindings)
                })
                .collect(),
        }
    }
}

/// Emits `(num, Cancel)` for every group of `exp`, children first.
pub(crate) fn cancel_bindings(exp: &Exp) -> Bindings {
    let mut out = Bindings::new();
    collect(exp, BindingKind::Cancel, &mut out);
    out
}

/// Emits `(num, Epsilon)` for every group that participates when `exp`
/// matches the empty string. Of a disjunction's alternatives only the
/// leftmost nullable one participates; this is where the leftmost-match
/// preference of alternation comes from.
pub(crate) fn epsilon_bindings(exp: &Exp) -> Bindings {
    let mut out = Bindings::new();
    collect(exp, BindingKind::Epsilon, &mut out);
    out
}

fn collect(exp: &Exp, kind: BindingKind, out: &mut Bindings) {
    match *exp.repr() {
        Repr::EmptySet
        | Repr::EmptyString
        | Repr::AnyByte
        | Repr::Byte(_)
        | Repr::ByteRange(..) => {}

        Repr::KleeneClosure(ref sub) | Repr::Complement(ref sub) => {
            collect(sub, kind, out)
        }

        Repr::Concatenation(ref head, ref tail) => {
            collect(head, kind, out);
            collect(tail, kind, out);
        }

        Repr::Conjunction(ref subs) => {
            for sub in subs {
                collect(sub, kind, out);
            }
        }

        Repr::Disjunction(ref subs) => match kind {
            BindingKind::Epsilon => {
                if let Some(sub) = subs.iter().find(|sub| sub.is_nullable()) {
                    collect(sub, kind, out);
                }
            }
            _ => {
                for sub in subs {
                    collect(sub, kind, out);
                }
            }
        },

        Repr::Group { num, ref sub, .. } => {
            collect(sub, kind, out);
            out.push((num, kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::Mode;

    fn normalised(outer: OuterSet) -> Vec<(Exp, Bindings)> {
        outer
            .into_iter()
            .map(|(inner, bindings)| (inner.normalised(), bindings))
            .collect()
    }

    #[test]
    fn byte_behaves_like_the_derivative() {
        let exp = Exp::byte(b'a');
        assert_eq!(
            normalised(exp.partial(b'a')),
            vec![(Exp::empty_string(), Bindings::new())],
        );
        assert_eq!(
            normalised(exp.partial(b'b')),
            vec![(Exp::empty_set(), Bindings::new())],
        );
    }

    #[test]
    fn complement_is_the_de_morgan_dual() {
        let exp = Exp::complement(Exp::byte(b'a'));
        assert_eq!(
            normalised(exp.partial(b'a')),
            vec![(
                Exp::complement(Exp::empty_string()).normalised(),
                Bindings::new(),
            )],
        );
        assert_eq!(
            normalised(exp.partial(b'b')),
            vec![(
                Exp::complement(Exp::empty_set()).normalised(),
                Bindings::new(),
            )],
        );
    }

    #[test]
    fn group_appends_on_consumption() {
        let exp = Exp::group(0, Exp::byte(b'a'), Mode::Passive, true);
        let outer = normalised(exp.partial(b'a'));
        assert_eq!(
            outer,
            // The continuation group collapsed to ε, so only the
            // binding remains to show the byte was consumed inside it.
            vec![(Exp::empty_string(), vec![(0, BindingKind::Append)])],
        );
    }

    #[test]
    fn closure_cancels_before_reentering() {
        let body = Exp::group(0, Exp::byte(b'a'), Mode::Passive, true);
        let exp = Exp::kleene_closure(body).normalised();
        let outer = exp.partial(b'a');
        assert_eq!(outer.len(), 1);
        assert_eq!(
            outer[0].1,
            vec![(0, BindingKind::Cancel), (0, BindingKind::Append)],
        );
    }

    #[test]
    fn epsilon_bindings_prefer_the_leftmost_nullable_branch() {
        let left = Exp::group(0, Exp::kleene_closure(Exp::byte(b'a')), Mode::Passive, true);
        let right = Exp::group(1, Exp::kleene_closure(Exp::byte(b'b')), Mode::Passive, true);
        let exp = Exp::disjunction(vec![left, right]).normalised();
        assert_eq!(epsilon_bindings(&exp), vec![(0, BindingKind::Epsilon)]);
    }

    #[test]
    fn cancel_bindings_walk_every_group() {
        let exp = Exp::concatenation(
            Exp::group(0, Exp::byte(b'a'), Mode::Passive, true),
            Exp::group(1, Exp::byte(b'b'), Mode::Passive, true),
        );
        assert_eq!(
            cancel_bindings(&exp),
            vec![(0, BindingKind::Cancel), (1, BindingKind::Cancel)],
        );
    }
}
