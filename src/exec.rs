//! Interpreters over the built automata.
//!
//! The DFA walk is a single table lookup per byte. The TNFA walk keeps
//! a list of live paths ordered by preference: each step enumerates
//! successors in emission order, drops duplicate target states (first
//! writer wins, which realises leftmost preference), applies the edge
//! bindings to a copy of the path's offset vector, and sorts each
//! source's survivors by the `precedes` order.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;

use crate::compile::{Dfa, Tnfa};
use crate::partial::{BindingKind, Bindings};
use crate::repr::Mode;

impl Dfa {
    /// Whether the automaton accepts the whole of `input`.
    pub fn is_match(&self, input: &[u8]) -> bool {
        let mut curr = 0;
        for &byte in input {
            curr = self
                .transition
                .get(&(curr, Some(byte)))
                .or_else(|| self.transition.get(&(curr, None)))
                .copied()
                .expect("every dfa state has a default transition");
        }
        self.accepting[curr]
    }
}

impl Tnfa {
    /// Whether the automaton accepts the whole of `input`.
    pub fn is_match(&self, input: &[u8]) -> bool {
        self.captures(input).is_some()
    }

    /// Matches the whole of `input`, reporting the half-open byte
    /// offsets of each reported group as `[start, end]` pairs in the
    /// reporting order the automaton was compiled with. An offset of
    /// `-1` means the group did not participate in the match.
    pub fn captures(&self, input: &[u8]) -> Option<Vec<i32>> {
        let mut paths: Vec<(usize, Vec<i32>)> =
            vec![(0, vec![-1; 2 * self.modes.len()])];
        for (pos, &byte) in input.iter().enumerate() {
            let mut seen: FxHashSet<usize> = FxHashSet::default();
            let mut next_paths = Vec::new();
            for (curr, offsets) in &paths {
                let edges = self
                    .transition
                    .get(&(*curr, Some(byte)))
                    .or_else(|| self.transition.get(&(*curr, None)));
                let Some(edges) = edges else { continue };
                let mut successors = Vec::new();
                for (next, bindings) in edges {
                    if self.error == Some(*next) {
                        continue;
                    }
                    if !seen.insert(*next) {
                        continue;
                    }
                    let mut offsets = offsets.clone();
                    apply_bindings(bindings, pos, &mut offsets);
                    successors.push((*next, offsets));
                }
                successors.sort_by(|x, y| preference(&x.1, &y.1, &self.modes));
                next_paths.extend(successors);
            }
            if next_paths.is_empty() {
                return None;
            }
            paths = next_paths;
        }
        let pos = input.len();
        for (state, mut offsets) in paths {
            if !self.accepting[state] {
                continue;
            }
            if let Some(bindings) = self.finals.get(&state) {
                apply_bindings(bindings, pos, &mut offsets);
            }
            let reported = self
                .captures
                .iter()
                .flat_map(|&group| [offsets[2 * group], offsets[2 * group + 1]])
                .collect();
            return Some(reported);
        }
        None
    }
}

/// Replays `bindings` against `offsets` at input position `pos`.
/// Slot `2k` holds the start of group `k`, slot `2k + 1` its end.
pub(crate) fn apply_bindings(bindings: &Bindings, pos: usize, offsets: &mut [i32]) {
    for &(group, kind) in bindings {
        let (start, end) = (2 * group, 2 * group + 1);
        match kind {
            BindingKind::Cancel => {
                if offsets[start] != -1 {
                    offsets[start] = -1;
                    offsets[end] = -1;
                }
            }
            BindingKind::Epsilon => {
                if offsets[start] == -1 {
                    offsets[start] = pos as i32;
                    offsets[end] = pos as i32;
                }
            }
            BindingKind::Append => {
                if offsets[start] == -1 {
                    offsets[start] = pos as i32;
                    offsets[end] = pos as i32;
                }
                offsets[end] += 1;
            }
        }
    }
}

/// The strict weak order selecting the preferred offset vector.
///
/// Groups are compared in number order. Participation always beats
/// positional comparison: a group that matched precedes one that did
/// not, whatever the mode. A `Passive` group is otherwise blind to
/// positions. Earlier starts precede later starts; on equal starts the
/// mode arbitrates the ends, shorter spans winning under `Minimal` and
/// longer under `Maximal`.
pub(crate) fn precedes(x: &[i32], y: &[i32], modes: &[Mode]) -> bool {
    for (k, &mode) in modes.iter().enumerate() {
        let (xs, xe) = (x[2 * k], x[2 * k + 1]);
        let (ys, ye) = (y[2 * k], y[2 * k + 1]);
        if xs == -1 && ys == -1 {
            continue;
        }
        if xs == -1 {
            return false;
        }
        if ys == -1 {
            return true;
        }
        if mode == Mode::Passive {
            continue;
        }
        if xs < ys {
            return true;
        }
        if xs > ys {
            return false;
        }
        if xe != ye {
            if mode == Mode::Minimal {
                return xe < ye;
            }
            return xe > ye;
        }
    }
    false
}

fn preference(x: &[i32], y: &[i32], modes: &[Mode]) -> Ordering {
    if precedes(x, y, modes) {
        Ordering::Less
    } else if precedes(y, x, modes) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participation_overrides_positions() {
        let modes = [Mode::Maximal];
        assert!(precedes(&[3, 4], &[-1, -1], &modes));
        assert!(!precedes(&[-1, -1], &[3, 4], &modes));
    }

    #[test]
    fn passive_is_blind_to_positions() {
        let modes = [Mode::Passive];
        assert!(!precedes(&[0, 1], &[2, 3], &modes));
        assert!(!precedes(&[2, 3], &[0, 1], &modes));
    }

    #[test]
    fn earlier_start_precedes() {
        for mode in [Mode::Minimal, Mode::Maximal] {
            assert!(precedes(&[0, 1], &[1, 1], &[mode]));
            assert!(!precedes(&[1, 1], &[0, 1], &[mode]));
        }
    }

    #[test]
    fn mode_arbitrates_equal_starts() {
        assert!(precedes(&[0, 1], &[0, 2], &[Mode::Minimal]));
        assert!(precedes(&[0, 2], &[0, 1], &[Mode::Maximal]));
        assert!(!precedes(&[0, 2], &[0, 1], &[Mode::Minimal]));
    }

    #[test]
    fn precedes_is_irreflexive_and_asymmetric() {
        let modes = [Mode::Minimal, Mode::Maximal];
        let vectors: &[&[i32]] = &[
            &[-1, -1, -1, -1],
            &[0, 0, 0, 3],
            &[0, 3, 3, 3],
            &[1, 2, -1, -1],
        ];
        for x in vectors {
            assert!(!precedes(x, x, &modes));
            for y in vectors {
                assert!(!(precedes(x, y, &modes) && precedes(y, x, &modes)));
            }
        }
    }

    #[test]
    fn bindings_replay_in_order() {
        let mut offsets = [-1, -1];
        apply_bindings(&vec![(0, BindingKind::Append)], 2, &mut offsets);
        assert_eq!(offsets, [2, 3]);
        apply_bindings(&vec![(0, BindingKind::Append)], 3, &mut offsets);
        assert_eq!(offsets, [2, 4]);
        apply_bindings(
            &vec![(0, BindingKind::Cancel), (0, BindingKind::Append)],
            5,
            &mut offsets,
        );
        assert_eq!(offsets, [5, 6]);
        apply_bindings(&vec![(0, BindingKind::Epsilon)], 7, &mut offsets);
        assert_eq!(offsets, [5, 6]);
    }
}
