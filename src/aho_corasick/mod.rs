mod automaton;
mod index;
mod links;
mod search;
mod trie;

pub use self::{
    automaton::Automaton,
    index::{AC_NODE_ROOT, ACNodeId},
    search::{FindIter, Match, MatchesAt},
};
pub(crate) use self::{links::ACLinks, trie::ACTrie};
