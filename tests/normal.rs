//! Canonicalisation laws.

use pretty_assertions::assert_eq;
use quotient::Exp;

fn universal() -> Exp {
    Exp::complement(Exp::empty_set())
}

#[test]
fn atoms_are_canonical() {
    assert_eq!(Exp::empty_set().normalised(), Exp::empty_set());
    assert_eq!(Exp::empty_string().normalised(), Exp::empty_string());
    assert_eq!(Exp::any_byte().normalised(), Exp::any_byte());
    assert_eq!(Exp::byte(b'a').normalised(), Exp::byte(b'a'));
    assert_eq!(
        Exp::byte_range(b'a', b'c').normalised(),
        Exp::byte_range(b'a', b'c'),
    );
}

#[test]
fn kleene_closure() {
    // (r∗)∗ ≈ r∗
    assert_eq!(
        Exp::kleene_closure(Exp::kleene_closure(Exp::byte(b'a'))).normalised(),
        Exp::kleene_closure(Exp::byte(b'a')).normalised(),
    );
    // ∅∗ ≈ ε and ε∗ ≈ ε
    assert_eq!(
        Exp::kleene_closure(Exp::empty_set()).normalised(),
        Exp::empty_string(),
    );
    assert_eq!(
        Exp::kleene_closure(Exp::empty_string()).normalised(),
        Exp::empty_string(),
    );
    // \C∗ ≈ ¬∅ and .∗ ≈ ¬∅
    assert_eq!(
        Exp::kleene_closure(Exp::any_byte()).normalised(),
        universal(),
    );
    assert_eq!(
        Exp::kleene_closure(Exp::any_character()).normalised(),
        universal(),
    );
}

#[test]
fn concatenation() {
    // (r · s) · t ≈ r · (s · t)
    assert_eq!(
        Exp::concatenation(
            Exp::concatenation(Exp::byte(b'a'), Exp::byte(b'b')),
            Exp::byte(b'c'),
        )
        .normalised(),
        Exp::literal(b"abc"),
    );
    // ∅ absorbs from either side.
    assert_eq!(
        Exp::concatenation(Exp::empty_set(), Exp::byte(b'a')).normalised(),
        Exp::empty_set(),
    );
    assert_eq!(
        Exp::concatenation(Exp::byte(b'a'), Exp::empty_set()).normalised(),
        Exp::empty_set(),
    );
    // ε is the identity from either side.
    assert_eq!(
        Exp::concatenation(Exp::empty_string(), Exp::byte(b'a')).normalised(),
        Exp::byte(b'a'),
    );
    assert_eq!(
        Exp::concatenation(Exp::byte(b'a'), Exp::empty_string()).normalised(),
        Exp::byte(b'a'),
    );
}

#[test]
fn complement() {
    // ¬(¬r) ≈ r
    assert_eq!(
        Exp::complement(Exp::complement(Exp::byte(b'a'))).normalised(),
        Exp::byte(b'a'),
    );
}

#[test]
fn conjunction() {
    // (r & s) & t ≈ r & (s & t)
    assert_eq!(
        Exp::conjunction(vec![
            Exp::conjunction(vec![Exp::byte(b'a'), Exp::byte(b'b')]),
            Exp::byte(b'c'),
        ])
        .normalised(),
        Exp::conjunction(vec![Exp::byte(b'a'), Exp::byte(b'b'), Exp::byte(b'c')]),
    );
    // r & s ≈ s & r
    assert_eq!(
        Exp::conjunction(vec![Exp::byte(b'b'), Exp::byte(b'a')]).normalised(),
        Exp::conjunction(vec![Exp::byte(b'a'), Exp::byte(b'b')]),
    );
    // r & r ≈ r
    assert_eq!(
        Exp::conjunction(vec![Exp::byte(b'a'), Exp::byte(b'a')]).normalised(),
        Exp::byte(b'a'),
    );
    // ∅ & r ≈ ∅
    assert_eq!(
        Exp::conjunction(vec![Exp::byte(b'a'), Exp::empty_set()]).normalised(),
        Exp::empty_set(),
    );
    // ¬∅ & r ≈ r
    assert_eq!(
        Exp::conjunction(vec![Exp::byte(b'a'), universal()]).normalised(),
        Exp::byte(b'a'),
    );
}

#[test]
fn disjunction() {
    // (r + s) + t ≈ r + (s + t)
    assert_eq!(
        Exp::disjunction(vec![
            Exp::disjunction(vec![Exp::byte(b'a'), Exp::byte(b'b')]),
            Exp::byte(b'c'),
        ])
        .normalised(),
        Exp::disjunction(vec![Exp::byte(b'a'), Exp::byte(b'b'), Exp::byte(b'c')]),
    );
    // r + s ≈ s + r
    assert_eq!(
        Exp::disjunction(vec![Exp::byte(b'b'), Exp::byte(b'a')]).normalised(),
        Exp::disjunction(vec![Exp::byte(b'a'), Exp::byte(b'b')]),
    );
    // r + r ≈ r
    assert_eq!(
        Exp::disjunction(vec![Exp::byte(b'a'), Exp::byte(b'a')]).normalised(),
        Exp::byte(b'a'),
    );
    // ∅ + r ≈ r
    assert_eq!(
        Exp::disjunction(vec![Exp::byte(b'a'), Exp::empty_set()]).normalised(),
        Exp::byte(b'a'),
    );
    // ¬∅ + r ≈ ¬∅
    assert_eq!(
        Exp::disjunction(vec![Exp::byte(b'a'), universal()]).normalised(),
        universal().normalised(),
    );
}

#[test]
fn normalisation_is_idempotent() {
    let samples = vec![
        Exp::kleene_closure(Exp::kleene_closure(Exp::byte(b'a'))),
        Exp::concatenation(
            Exp::concatenation(Exp::byte(b'a'), Exp::byte(b'b')),
            Exp::kleene_closure(Exp::any_character()),
        ),
        Exp::complement(Exp::complement(Exp::complement(Exp::byte(b'a')))),
        Exp::conjunction(vec![
            Exp::disjunction(vec![Exp::byte(b'b'), Exp::byte(b'a')]),
            Exp::conjunction(vec![Exp::byte(b'c'), Exp::byte(b'c')]),
        ]),
        Exp::disjunction(vec![
            Exp::empty_set(),
            Exp::concatenation(Exp::empty_string(), Exp::byte(b'z')),
        ]),
        Exp::any_character(),
    ];
    for exp in samples {
        let once = exp.normalised();
        assert_eq!(once.normalised(), once);
    }
}
