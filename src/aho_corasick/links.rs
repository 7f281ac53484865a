use crate::{
    Symbol, Trace, TraceEvent,
    aho_corasick::{AC_NODE_ROOT, ACNodeId, ACTrie},
    typed_vec::TypedVec,
};

/// Fail and output links of every trie node.
#[derive(Clone, Debug)]
pub(crate) struct ACLinks {
    /// Longest proper suffix that is also a trie path; the root points to itself.
    pub fail: TypedVec<ACNodeId, ACNodeId>,
    /// Nearest end node reachable through one or more fail links.
    pub output: TypedVec<ACNodeId, Option<ACNodeId>>,
}

impl ACLinks {
    /// Resolves links level by level, so the links of every shallower node,
    /// the parent's included, are final when a child is processed.
    pub fn new<S: Symbol>(trie: &ACTrie<S>, trace: &mut impl Trace<S>) -> Self {
        let len = trie.len();
        let mut fail = TypedVec::new_with(AC_NODE_ROOT, len);
        let mut output = TypedVec::new_with(None, len);

        for node in trie.bfs() {
            for (child, symbol) in trie.children(node) {
                let target = if node == AC_NODE_ROOT {
                    AC_NODE_ROOT
                } else {
                    let mut cursor = fail[node];
                    loop {
                        if let Some(next) = trie.get(cursor, symbol) {
                            break next;
                        }
                        if cursor == AC_NODE_ROOT {
                            break AC_NODE_ROOT;
                        }
                        cursor = fail[cursor];
                    }
                };
                fail[child] = target;
                output[child] = if trie[target].is_end() {
                    Some(target)
                } else {
                    output[target]
                };

                trace.event(TraceEvent::FailLink {
                    node: child,
                    fail: target,
                });
                trace.event(TraceEvent::OutputLink {
                    node: child,
                    output: output[child],
                });
            }
        }

        Self { fail, output }
    }
}
