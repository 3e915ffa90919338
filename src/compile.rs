//! Automaton construction.
//!
//! One worklist shape serves both builds: normalise, intern the
//! expression as a dense state id, enumerate its partition blocks, and
//! drive the derivative with one representative per block. Brzozowski
//! derivatives give a DFA; partial derivatives with bindings give a
//! tagged NFA. Termination rests entirely on normalisation keeping the
//! set of reachable expressions finite; an unbounded worklist here
//! means a canonicalisation bug, not a bigger pattern.

use std::collections::VecDeque;

use bit_set::BitSet;
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Error;
use crate::options::Options;
use crate::partial::{epsilon_bindings, Bindings};
use crate::repr::{Exp, Mode};

/// Interns canonical expressions as dense state ids, queueing each new
/// one exactly once.
struct Worklist {
    states: FxHashMap<Exp, usize>,
    queue: VecDeque<Exp>,
    limit: usize,
}

impl Worklist {
    fn new(limit: usize) -> Worklist {
        Worklist {
            states: FxHashMap::default(),
            queue: VecDeque::new(),
            limit,
        }
    }

    fn intern(&mut self, exp: Exp) -> Result<usize, Error> {
        if let Some(&id) = self.states.get(&exp) {
            return Ok(id);
        }
        let id = self.states.len();
        if id >= self.limit {
            return Err(Error::StateLimit { limit: self.limit });
        }
        self.states.insert(exp.clone(), id);
        self.queue.push_back(exp);
        Ok(id)
    }

    /// States come back in id order, so per-state tables can be built
    /// by pushing.
    fn pop(&mut self) -> Option<(usize, Exp)> {
        let exp = self.queue.pop_front()?;
        let id = self.states[&exp];
        Some((id, exp))
    }
}

fn block_symbol(index: usize, block: &BitSet) -> Option<u8> {
    if index == 0 {
        // The Σ-based block: no byte of the expression's classes, which
        // is exactly what the `None` symbol stands for.
        None
    } else {
        // A ∅-based block: the lowest byte it contains.
        block.iter().next().map(|byte| byte as u8)
    }
}

/// A deterministic finite automaton over bytes. State 0 is initial.
///
/// The transition key `None` is the default edge, taken on any byte
/// without an edge of its own; byte edges equal to the default are not
/// stored.
#[derive(Clone, Debug)]
pub struct Dfa {
    pub(crate) accepting: Vec<bool>,
    pub(crate) partitions: Vec<Vec<BitSet>>,
    pub(crate) transition: FxHashMap<(usize, Option<u8>), usize>,
    pub(crate) error: Option<usize>,
    pub(crate) empty: Option<usize>,
}

impl Dfa {
    /// Compiles `exp` with the default [`Options`].
    pub fn compile(exp: &Exp) -> Result<Dfa, Error> {
        Dfa::compile_with(exp, &Options::default())
    }

    pub fn compile_with(exp: &Exp, options: &Options) -> Result<Dfa, Error> {
        let mut worklist = Worklist::new(options.state_limit);
        worklist.intern(exp.normalised())?;
        let mut dfa = Dfa {
            accepting: Vec::new(),
            partitions: Vec::new(),
            transition: FxHashMap::default(),
            error: None,
            empty: None,
        };
        while let Some((curr, exp)) = worklist.pop() {
            trace!("dfa state {curr}: {exp:?}");
            if exp.is_empty_set() {
                dfa.error = Some(curr);
            }
            if exp.is_empty_string() {
                dfa.empty = Some(curr);
            }
            dfa.accepting.push(exp.is_nullable());
            let partitions = exp.partitions();
            let mut default = 0;
            for (index, block) in partitions.iter().enumerate() {
                let symbol = block_symbol(index, block);
                let next = worklist.intern(exp.derive(symbol)?.normalised())?;
                if index == 0 {
                    dfa.transition.insert((curr, None), next);
                    default = next;
                } else if next != default {
                    for byte in block.iter() {
                        dfa.transition.insert((curr, Some(byte as u8)), next);
                    }
                }
            }
            dfa.partitions.push(partitions);
        }
        debug!("compiled dfa: {} states", dfa.states());
        Ok(dfa)
    }

    /// The number of states.
    pub fn states(&self) -> usize {
        self.accepting.len()
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting[state]
    }

    /// Whether `state` is the non-accepting sink.
    pub fn is_error(&self, state: usize) -> bool {
        self.error == Some(state)
    }

    /// Whether `state` is the accepting ε-sink.
    pub fn is_empty(&self, state: usize) -> bool {
        self.empty == Some(state)
    }

    /// The partition blocks of `state`, first block Σ-based.
    pub fn partitions(&self, state: usize) -> &[BitSet] {
        &self.partitions[state]
    }

    /// All stored transitions as `(source, byte or default, target)`,
    /// in no particular order. This is the representation a downstream
    /// code generator consumes.
    pub fn transitions(
        &self,
    ) -> impl Iterator<Item = (usize, Option<u8>, usize)> + '_ {
        self.transition
            .iter()
            .map(|(&(state, byte), &next)| (state, byte, next))
    }
}

/// A tagged nondeterministic finite automaton: a [`Dfa`]-shaped state
/// table whose edges may fan out, each carrying the bindings to replay
/// against the capture offset vector.
#[derive(Clone, Debug)]
pub struct Tnfa {
    pub(crate) accepting: Vec<bool>,
    pub(crate) partitions: Vec<Vec<BitSet>>,
    pub(crate) transition: FxHashMap<(usize, Option<u8>), Vec<(usize, Bindings)>>,
    pub(crate) finals: FxHashMap<usize, Bindings>,
    pub(crate) modes: Vec<Mode>,
    pub(crate) captures: Vec<usize>,
    pub(crate) error: Option<usize>,
    pub(crate) empty: Option<usize>,
}

impl Tnfa {
    /// Compiles `exp` with the default [`Options`].
    ///
    /// `modes` holds the preference mode of each group, indexed by
    /// group number; `captures` lists the groups whose offsets
    /// [`Tnfa::captures`] reports, in reporting order.
    pub fn compile(
        exp: &Exp,
        modes: Vec<Mode>,
        captures: Vec<usize>,
    ) -> Result<Tnfa, Error> {
        Tnfa::compile_with(exp, modes, captures, &Options::default())
    }

    pub fn compile_with(
        exp: &Exp,
        modes: Vec<Mode>,
        captures: Vec<usize>,
        options: &Options,
    ) -> Result<Tnfa, Error> {
        let mut worklist = Worklist::new(options.state_limit);
        worklist.intern(exp.normalised())?;
        let mut tnfa = Tnfa {
            accepting: Vec::new(),
            partitions: Vec::new(),
            transition: FxHashMap::default(),
            finals: FxHashMap::default(),
            modes,
            captures,
            error: None,
            empty: None,
        };
        while let Some((curr, exp)) = worklist.pop() {
            trace!("tnfa state {curr}: {exp:?}");
            if exp.is_empty_set() {
                tnfa.error = Some(curr);
            }
            if exp.is_empty_string() {
                tnfa.empty = Some(curr);
            }
            let nullable = exp.is_nullable();
            tnfa.accepting.push(nullable);
            if nullable {
                // Groups that match empty at the end of input still
                // participate; replay these when accepting here.
                tnfa.finals.insert(curr, epsilon_bindings(&exp));
            }
            let partitions = exp.partitions();
            for (index, block) in partitions.iter().enumerate() {
                let symbol = block_symbol(index, block);
                let outer = exp.partial_symbol(symbol);
                let mut emitted: FxHashSet<(usize, Bindings)> = FxHashSet::default();
                for (alt, bindings) in outer {
                    let next = worklist.intern(alt.normalised())?;
                    if !emitted.insert((next, bindings.clone())) {
                        continue;
                    }
                    if index == 0 {
                        tnfa.transition
                            .entry((curr, None))
                            .or_default()
                            .push((next, bindings));
                    } else {
                        for byte in block.iter() {
                            tnfa.transition
                                .entry((curr, Some(byte as u8)))
                                .or_default()
                                .push((next, bindings.clone()));
                        }
                    }
                }
            }
            tnfa.partitions.push(partitions);
        }
        debug!("compiled tnfa: {} states", tnfa.states());
        Ok(tnfa)
    }

    /// The number of states.
    pub fn states(&self) -> usize {
        self.accepting.len()
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting[state]
    }

    /// Whether `state` is the non-accepting sink.
    pub fn is_error(&self, state: usize) -> bool {
        self.error == Some(state)
    }

    /// Whether `state` is the accepting ε-sink.
    pub fn is_empty(&self, state: usize) -> bool {
        self.empty == Some(state)
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// The group numbers whose offsets are reported, in order.
    pub fn capture_groups(&self) -> &[usize] {
        &self.captures
    }

    /// The bindings applied when a match completes in `state`.
    pub fn final_bindings(&self, state: usize) -> Option<&Bindings> {
        self.finals.get(&state)
    }

    /// All stored transitions as
    /// `(source, byte or default, target, bindings)`.
    pub fn transitions(
        &self,
    ) -> impl Iterator<Item = (usize, Option<u8>, usize, &Bindings)> + '_ {
        self.transition.iter().flat_map(|(&(state, byte), nexts)| {
            nexts
                .iter()
                .map(move |(next, bindings)| (state, byte, *next, bindings))
        })
    }
}
