use std::fmt;

use crate::{PatternId, Symbol, aho_corasick::ACNodeId};

/// An observation emitted while building an automaton or searching with it.
///
/// Events never influence results. Their `Display` form is a single
/// human-readable line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TraceEvent<S> {
    NodeAdded {
        node: ACNodeId,
        parent: ACNodeId,
        symbol: S,
    },
    PatternAdded {
        pattern: PatternId,
        node: ACNodeId,
        len: usize,
    },
    FailLink {
        node: ACNodeId,
        fail: ACNodeId,
    },
    OutputLink {
        node: ACNodeId,
        output: Option<ACNodeId>,
    },
    Transition {
        pos: usize,
        symbol: S,
        to: ACNodeId,
    },
    FailHop {
        pos: usize,
        from: ACNodeId,
        to: ACNodeId,
    },
    StayedAtRoot {
        pos: usize,
        symbol: S,
    },
    Match {
        pattern: PatternId,
        start: usize,
    },
    Segment {
        index: usize,
        offset: usize,
        len: usize,
    },
    SegmentHit {
        index: usize,
        start: usize,
        count: u32,
    },
    Rejected {
        start: usize,
        at: usize,
    },
    Accepted {
        start: usize,
    },
}

impl<S: Symbol> fmt::Display for TraceEvent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeAdded {
                node,
                parent,
                symbol,
            } => write!(f, "[trie] added node {node} under {parent} on {symbol:?}"),
            Self::PatternAdded { pattern, node, len } => {
                write!(f, "[trie] pattern #{pattern} (len {len}) ends at node {node}")
            }
            Self::FailLink { node, fail } => write!(f, "[links] node {node}: fail -> {fail}"),
            Self::OutputLink { node, output } => match output {
                Some(output) => write!(f, "[links] node {node}: output -> {output}"),
                None => write!(f, "[links] node {node}: no output link"),
            },
            Self::Transition { pos, symbol, to } => {
                write!(f, "[search] pos {pos} ({symbol:?}): moved to {to}")
            }
            Self::FailHop { pos, from, to } => {
                write!(f, "[search] pos {pos}: fail hop {from} -> {to}")
            }
            Self::StayedAtRoot { pos, symbol } => {
                write!(f, "[search] pos {pos} ({symbol:?}): stayed at root")
            }
            Self::Match { pattern, start } => {
                write!(f, "[search] pattern #{pattern} found at {start}")
            }
            Self::Segment { index, offset, len } => {
                write!(f, "[wildcard] segment {index} at offset {offset} (len {len})")
            }
            Self::SegmentHit {
                index,
                start,
                count,
            } => write!(f, "[wildcard] segment {index} confirms start {start} (count {count})"),
            Self::Rejected { start, at } => {
                write!(f, "[wildcard] start {start} rejected: forbidden symbol at {at}")
            }
            Self::Accepted { start } => write!(f, "[wildcard] complete match at {start}"),
        }
    }
}

/// A sink for [`TraceEvent`]s.
pub trait Trace<S> {
    fn event(&mut self, event: TraceEvent<S>);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl<S> Trace<S> for NoTrace {
    #[inline(always)]
    fn event(&mut self, _: TraceEvent<S>) {}
}

/// Forwards every event to the `log` facade at trace level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;

impl<S: Symbol> Trace<S> for LogTrace {
    fn event(&mut self, event: TraceEvent<S>) {
        log::trace!(target: "aho_wildcard::trace", "{event}");
    }
}

/// Collects the rendered events.
impl<S: Symbol> Trace<S> for Vec<String> {
    fn event(&mut self, event: TraceEvent<S>) {
        self.push(event.to_string());
    }
}

impl<S, T: Trace<S> + ?Sized> Trace<S> for &mut T {
    #[inline(always)]
    fn event(&mut self, event: TraceEvent<S>) {
        (**self).event(event)
    }
}
