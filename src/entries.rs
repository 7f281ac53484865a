use crate::{
    Automaton, BuildError, NoTrace, PatternId, PatternSet, Symbol, Trace,
    typed_vec::TypedVec,
};

/// Start positions of every pattern of a set within one text.
#[derive(Clone, Debug)]
pub struct Entries<S> {
    patterns: PatternSet<S>,
    positions: TypedVec<PatternId, Vec<usize>>,
}

impl<S: Symbol> Entries<S> {
    /// Ascending zero-based start positions of `pattern`; `None` if it is not
    /// part of the set.
    pub fn get<P: AsRef<[S]>>(&self, pattern: P) -> Option<&[usize]> {
        let id = self.patterns.find_pattern_id(pattern)?;
        self.positions(id)
    }

    pub fn positions(&self, id: PatternId) -> Option<&[usize]> {
        self.positions.get(id).map(Vec::as_slice)
    }

    pub fn patterns(&self) -> &PatternSet<S> {
        &self.patterns
    }

    /// Every pattern with its positions, in pattern id order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&[S], &[usize])> + ExactSizeIterator {
        self.patterns
            .iter()
            .zip(self.positions.iter())
            .map(|((_, pattern), positions)| (pattern, positions.as_slice()))
    }

    /// `true` if there are no patterns at all.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn num_of_matches(&self) -> usize {
        self.positions.iter().map(Vec::len).sum()
    }
}

impl<S: Symbol> Automaton<S> {
    /// Scans `text` once and groups the occurrences by pattern.
    pub fn into_entries<I: IntoIterator<Item = S>>(
        self,
        text: I,
        trace: impl Trace<S>,
    ) -> Entries<S> {
        let mut positions = TypedVec::new_with(Vec::new(), self.patterns().num_of_patterns());
        for m in self.find_iter_with(text, trace) {
            positions[m.pattern()].push(m.start());
        }
        Entries {
            patterns: self.into_patterns(),
            positions,
        }
    }
}

/// Finds all occurrences of every pattern in `text`.
///
/// Fails only if one of the patterns is empty. An empty pattern list yields
/// an empty mapping.
pub fn find_all_entries<S, T, P, I>(text: T, patterns: I) -> Result<Entries<S>, BuildError>
where
    S: Symbol,
    T: AsRef<[S]>,
    P: AsRef<[S]>,
    I: IntoIterator<Item = P>,
{
    find_all_entries_with(text, patterns, &mut NoTrace)
}

pub fn find_all_entries_with<S, T, P, I>(
    text: T,
    patterns: I,
    trace: &mut impl Trace<S>,
) -> Result<Entries<S>, BuildError>
where
    S: Symbol,
    T: AsRef<[S]>,
    P: AsRef<[S]>,
    I: IntoIterator<Item = P>,
{
    let automaton = Automaton::build_with(patterns, trace)?;
    Ok(automaton.into_entries(text.as_ref().iter().copied(), trace))
}
