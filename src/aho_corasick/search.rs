use std::iter::FusedIterator;

use derive_more::Constructor;

use crate::{
    Automaton, NoTrace, PatternId, Symbol, Trace, TraceEvent,
    aho_corasick::{AC_NODE_ROOT, ACNodeId},
};

/// One occurrence of a pattern: `text[start..end]` equals the pattern.
#[derive(Clone, Copy, Debug, Constructor, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pattern: PatternId,
    start: usize,
    end: usize,
}

impl Match {
    #[inline(always)]
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    #[inline(always)]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline(always)]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl<S: Symbol> Automaton<S> {
    /// Consumes one symbol from `state`, falling back along fail links when
    /// there is no direct edge.
    #[inline(always)]
    pub fn step(&self, state: ACNodeId, symbol: S) -> ACNodeId {
        self.transition(state, symbol, 0, &mut NoTrace)
    }

    pub(crate) fn transition(
        &self,
        mut state: ACNodeId,
        symbol: S,
        pos: usize,
        trace: &mut impl Trace<S>,
    ) -> ACNodeId {
        loop {
            if let Some(next) = self.trie.get(state, symbol) {
                trace.event(TraceEvent::Transition {
                    pos,
                    symbol,
                    to: next,
                });
                return next;
            }
            if state == AC_NODE_ROOT {
                trace.event(TraceEvent::StayedAtRoot { pos, symbol });
                return AC_NODE_ROOT;
            }
            let fail = self.links.fail[state];
            trace.event(TraceEvent::FailHop {
                pos,
                from: state,
                to: fail,
            });
            state = fail;
        }
    }

    /// Patterns ending at `state`, longest first.
    pub fn matches_at(&self, state: ACNodeId) -> MatchesAt<'_, S> {
        let next = if self.is_end(state) {
            Some(state)
        } else {
            self.output_link(state)
        };
        MatchesAt {
            automaton: self,
            next,
        }
    }

    /// Lazily reports every occurrence of every pattern in `text`, ordered by
    /// end position and, for a shared end position, longest first.
    pub fn find_iter<I: IntoIterator<Item = S>>(
        &self,
        text: I,
    ) -> FindIter<'_, S, I::IntoIter, NoTrace> {
        self.find_iter_with(text, NoTrace)
    }

    pub fn find_iter_with<I: IntoIterator<Item = S>, T: Trace<S>>(
        &self,
        text: I,
        trace: T,
    ) -> FindIter<'_, S, I::IntoIter, T> {
        FindIter {
            automaton: self,
            text: text.into_iter(),
            pos: 0,
            state: AC_NODE_ROOT,
            pending: MatchesAt {
                automaton: self,
                next: None,
            },
            trace,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MatchesAt<'a, S> {
    automaton: &'a Automaton<S>,
    next: Option<ACNodeId>,
}

impl<S: Symbol> Iterator for MatchesAt<'_, S> {
    type Item = PatternId;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = self.automaton.output_link(node);
        self.automaton.pattern_at(node)
    }
}

impl<S: Symbol> FusedIterator for MatchesAt<'_, S> {}

#[derive(Debug)]
pub struct FindIter<'a, S, I, T> {
    automaton: &'a Automaton<S>,
    text: I,
    pos: usize,
    state: ACNodeId,
    pending: MatchesAt<'a, S>,
    trace: T,
}

impl<S, I, T> FindIter<'_, S, I, T> {
    /// Number of symbols consumed so far.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn state(&self) -> ACNodeId {
        self.state
    }
}

impl<S: Symbol, I: Iterator<Item = S>, T: Trace<S>> Iterator for FindIter<'_, S, I, T> {
    type Item = Match;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pattern) = self.pending.next() {
                let start = self.pos - self.automaton.patterns()[pattern].len();
                self.trace.event(TraceEvent::Match { pattern, start });
                return Some(Match::new(pattern, start, self.pos));
            }
            let symbol = self.text.next()?;
            self.state = self
                .automaton
                .transition(self.state, symbol, self.pos, &mut self.trace);
            self.pos += 1;
            self.pending = self.automaton.matches_at(self.state);
        }
    }
}
