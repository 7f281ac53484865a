use clap::{Parser, builder::BoolishValueParser};

/// Finds every occurrence of a set of patterns in a text using an Aho-Corasick
/// automaton, or every occurrence of one pattern with a wildcard symbol.
///
/// Input is read from stdin as whitespace-separated tokens: the text, the
/// number of patterns and the patterns; or, with --wildcard, the text, the
/// pattern and the wildcard symbol, followed by the forbidden symbol with
/// --forbidden.
#[derive(Parser, Debug, Clone, Default)]
#[command(version)]
pub struct Opt {
    /// Search for a single pattern containing a wildcard symbol.
    #[arg(long)]
    pub wildcard: bool,

    /// Like --wildcard, and also read a symbol the wildcard must not stand for.
    #[arg(long)]
    pub forbidden: bool,

    /// Compare bytes instead of Unicode code points.
    #[arg(long)]
    pub bytes: bool,

    /// Trace every trie insertion, link computation and search step.
    #[arg(long, env = "AHO_WILDCARD_DEBUG", value_parser = BoolishValueParser::new())]
    pub debug: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Entries,
    Wildcard,
    Forbidden,
}

impl Opt {
    pub fn mode(&self) -> Mode {
        if self.forbidden {
            Mode::Forbidden
        } else if self.wildcard {
            Mode::Wildcard
        } else {
            Mode::Entries
        }
    }
}
