mod aho_corasick;
mod entries;
mod pattern;
mod symbol;
mod trace;
mod typed_vec;
mod wildcard;

pub mod app;
pub mod cli;
pub mod error;

#[cfg(test)]
mod test_utils;

pub use crate::{
    aho_corasick::{AC_NODE_ROOT, ACNodeId, Automaton, FindIter, Match, MatchesAt},
    entries::{Entries, find_all_entries, find_all_entries_with},
    pattern::{BuildError, PatternId, PatternSet},
    symbol::{Symbol, chars},
    trace::{LogTrace, NoTrace, Trace, TraceEvent},
    wildcard::{
        Segment, SpecPart, WildcardError, WildcardPattern, WildcardSpec,
        find_pattern_with_wildcard, find_pattern_with_wildcard_with,
    },
};
