use crate::{
    BuildError, NoTrace, PatternId, PatternSet, Symbol, Trace,
    aho_corasick::{AC_NODE_ROOT, ACLinks, ACNodeId, ACTrie},
};

/// An Aho-Corasick automaton over a fixed set of patterns.
///
/// The automaton is built in one go and never changes afterwards; every
/// search keeps its own cursor, so one automaton can serve any number of
/// searches, including from several threads at once.
#[derive(Clone, Debug)]
pub struct Automaton<S> {
    patterns: PatternSet<S>,
    pub(crate) trie: ACTrie<S>,
    pub(crate) links: ACLinks,
}

impl<S: Symbol> Automaton<S> {
    /// Builds an automaton, failing if any pattern is empty.
    ///
    /// Duplicated patterns are accepted and behave as a single pattern.
    pub fn build<P: AsRef<[S]>, I: IntoIterator<Item = P>>(
        patterns: I,
    ) -> Result<Self, BuildError> {
        Self::build_with(patterns, &mut NoTrace)
    }

    pub fn build_with<P: AsRef<[S]>, I: IntoIterator<Item = P>>(
        patterns: I,
        trace: &mut impl Trace<S>,
    ) -> Result<Self, BuildError> {
        let patterns = PatternSet::new(patterns)?;
        Ok(Self::from_patterns_with(patterns, trace))
    }

    pub fn from_patterns(patterns: PatternSet<S>) -> Self {
        Self::from_patterns_with(patterns, &mut NoTrace)
    }

    pub fn from_patterns_with(patterns: PatternSet<S>, trace: &mut impl Trace<S>) -> Self {
        let mut trie = ACTrie::default();
        for (id, pattern) in patterns.iter() {
            trie.insert(pattern, id, trace);
        }
        let links = ACLinks::new(&trie, trace);
        Self {
            patterns,
            trie,
            links,
        }
    }

    #[inline(always)]
    pub fn patterns(&self) -> &PatternSet<S> {
        &self.patterns
    }

    pub fn into_patterns(self) -> PatternSet<S> {
        self.patterns
    }

    #[inline(always)]
    pub fn num_of_nodes(&self) -> ACNodeId {
        self.trie.len()
    }

    /// Follows trie edges only; `None` if `prefix` is not a prefix of any pattern.
    pub fn find_node<P: AsRef<[S]>>(&self, prefix: P) -> Option<ACNodeId> {
        prefix
            .as_ref()
            .iter()
            .try_fold(AC_NODE_ROOT, |node, &symbol| self.trie.get(node, symbol))
    }

    #[inline(always)]
    pub fn fail_link(&self, id: ACNodeId) -> ACNodeId {
        self.links.fail[id]
    }

    #[inline(always)]
    pub fn output_link(&self, id: ACNodeId) -> Option<ACNodeId> {
        self.links.output[id]
    }

    #[inline(always)]
    pub fn pattern_at(&self, id: ACNodeId) -> Option<PatternId> {
        self.trie[id].pattern
    }

    #[inline(always)]
    pub fn is_end(&self, id: ACNodeId) -> bool {
        self.trie[id].is_end()
    }

    #[inline(always)]
    pub fn depth(&self, id: ACNodeId) -> usize {
        self.trie[id].depth as usize
    }

    pub fn path(&self, id: ACNodeId) -> Vec<S> {
        self.trie.path(id)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::{AC_NODE_ROOT, Automaton, BuildError, Match, PatternId, WildcardPattern};

    #[test]
    fn test_ac_automaton() {
        let automaton = Automaton::build([
            b"a" as &[u8],
            b"abc",
            b"abcde",
            b"b",
            b"bc",
            b"bcd",
            b"cd",
            b"cde",
            b"e",
        ])
        .unwrap();

        for node in automaton.trie.keys() {
            let fail = automaton.fail_link(node);
            let output = automaton.output_link(node);
            let path = automaton.path(node);
            println!("{node:2} {fail:2} {output:?}: {}", std::str::from_utf8(&path).unwrap());
        }

        let id = |s: &str| automaton.find_node(s.as_bytes()).unwrap();

        assert!(automaton.find_node(b"abd").is_none());
        assert_eq!(automaton.find_node(b""), Some(AC_NODE_ROOT));
        assert_eq!(automaton.fail_link(id("abcd")), id("bcd"));
        assert_eq!(automaton.fail_link(id("abcde")), id("cde"));
        assert_eq!(automaton.output_link(id("abcd")), Some(id("bcd")));
        assert_eq!(automaton.output_link(id("abcde")), Some(id("cde")));
        assert_eq!(automaton.output_link(id("cde")), Some(id("e")));
        assert_eq!(automaton.output_link(id("e")), None);
        assert_eq!(automaton.depth(id("abcde")), 5);
        assert!(automaton.is_end(id("abc")));
        assert!(!automaton.is_end(id("ab")));
        assert_eq!(automaton.pattern_at(id("bc")), Some(PatternId::new(4)));
    }

    #[test]
    fn test_build_rejects_empty_pattern() {
        let err = Automaton::build([b"ab" as &[u8], b"", b"c"]).unwrap_err();
        assert_eq!(err, BuildError::EmptyPattern { index: 1 });
    }

    #[test]
    fn test_build_without_patterns() {
        let automaton = Automaton::<char>::build(Vec::<Vec<char>>::new()).unwrap();
        assert_eq!(automaton.num_of_nodes().inner(), 1);
        assert_eq!(automaton.fail_link(AC_NODE_ROOT), AC_NODE_ROOT);
        assert!(automaton.patterns().is_empty());
    }

    #[test]
    fn test_build_trace() {
        let mut lines: Vec<String> = Vec::new();
        Automaton::build_with([b"ab" as &[u8], b"b"], &mut lines).unwrap();
        assert_eq!(
            lines,
            [
                "[trie] added node 1 under 0 on 97",
                "[trie] added node 2 under 1 on 98",
                "[trie] pattern #0 (len 2) ends at node 2",
                "[trie] added node 3 under 0 on 98",
                "[trie] pattern #1 (len 1) ends at node 3",
                "[links] node 1: fail -> 0",
                "[links] node 1: no output link",
                "[links] node 3: fail -> 0",
                "[links] node 3: no output link",
                "[links] node 2: fail -> 3",
                "[links] node 2: output -> 3",
            ],
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_automaton_is_shared_between_threads() {
        assert_send_sync::<Automaton<u8>>();
        assert_send_sync::<Automaton<char>>();
        assert_send_sync::<WildcardPattern<char>>();

        let automaton = Automaton::build(["he", "she", "hers", "his"].map(str::as_bytes)).unwrap();
        let texts = [b"ushers and his shelf".as_slice(), b"she said hers is his"];
        let expected: Vec<Vec<Match>> = texts
            .iter()
            .map(|text| automaton.find_iter(text.iter().copied()).collect())
            .collect();

        let found: Vec<Vec<Match>> = thread::scope(|scope| {
            let handles: Vec<_> = texts
                .iter()
                .map(|text| {
                    let automaton = &automaton;
                    scope.spawn(move || {
                        automaton
                            .find_iter(text.iter().copied())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(found, expected);
        assert!(found.iter().all(|matches| !matches.is_empty()));
    }
}
