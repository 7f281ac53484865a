use std::{collections::BTreeMap, iter::FusedIterator};

use derive_more::Deref;

use crate::{
    PatternId, Symbol, Trace, TraceEvent,
    aho_corasick::{AC_NODE_ROOT, ACNodeId},
    typed_vec::{TypedVec, vec_with_head},
};

#[derive(Clone, Debug)]
pub(crate) struct ACNode<S> {
    /// Label of the edge from the parent; `None` only for the root.
    pub value: Option<S>,
    /// The root is its own parent.
    pub parent: ACNodeId,
    pub depth: u32,
    /// Set iff the path from the root spells this pattern.
    pub pattern: Option<PatternId>,
    pub children: BTreeMap<S, ACNodeId>,
}

impl<S> ACNode<S> {
    fn new(value: Option<S>, parent: ACNodeId, depth: u32) -> Self {
        Self {
            value,
            parent,
            depth,
            pattern: None,
            children: BTreeMap::new(),
        }
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.pattern.is_some()
    }
}

#[derive(Clone, Debug, Deref)]
pub(crate) struct ACTrie<S> {
    nodes: TypedVec<ACNodeId, ACNode<S>>,
}

#[derive(Debug)]
pub(crate) struct BfsIter<'t, S> {
    trie: &'t ACTrie<S>,
    queue: Vec<ACNodeId>,
    current: usize,
}

impl<S> Default for ACTrie<S> {
    fn default() -> Self {
        Self {
            nodes: vec![ACNode::new(None, AC_NODE_ROOT, 0)].into(),
        }
    }
}

impl<S: Symbol> ACTrie<S> {
    #[inline(always)]
    pub fn children(
        &self,
        id: ACNodeId,
    ) -> impl DoubleEndedIterator<Item = (ACNodeId, S)> + ExactSizeIterator + FusedIterator + '_
    {
        self.nodes[id].children.iter().map(|(&s, &v)| (v, s))
    }

    #[inline(always)]
    pub fn children_nodes(
        &self,
        id: ACNodeId,
    ) -> impl DoubleEndedIterator<Item = ACNodeId> + ExactSizeIterator + FusedIterator + '_ {
        self.nodes[id].children.values().copied()
    }

    #[inline(always)]
    pub fn get(&self, node_id: ACNodeId, symbol: S) -> Option<ACNodeId> {
        self.nodes[node_id].children.get(&symbol).copied()
    }

    pub fn get_or_add(
        &mut self,
        node_id: ACNodeId,
        symbol: S,
        trace: &mut impl Trace<S>,
    ) -> ACNodeId {
        if let Some(child) = self.get(node_id, symbol) {
            return child;
        }
        let depth = self.nodes[node_id].depth + 1;
        let child_id = self.nodes.push(ACNode::new(Some(symbol), node_id, depth));
        self.nodes[node_id].children.insert(symbol, child_id);
        trace.event(TraceEvent::NodeAdded {
            node: child_id,
            parent: node_id,
            symbol,
        });
        child_id
    }

    /// Adds the path for `pattern` and marks its last node. Re-inserting a
    /// pattern keeps the id it was first marked with.
    pub fn insert(&mut self, pattern: &[S], id: PatternId, trace: &mut impl Trace<S>) -> ACNodeId {
        debug_assert!(!pattern.is_empty());
        let node = pattern
            .iter()
            .fold(AC_NODE_ROOT, |node, &symbol| self.get_or_add(node, symbol, trace));
        let end = &mut self.nodes[node];
        if end.pattern.is_none() {
            end.pattern = Some(id);
            trace.event(TraceEvent::PatternAdded {
                pattern: id,
                node,
                len: pattern.len(),
            });
        }
        node
    }

    /// Symbols on the path from the root to `id`.
    pub fn path(&self, mut id: ACNodeId) -> Vec<S> {
        let mut path = Vec::with_capacity(self.nodes[id].depth as usize);
        while let Some(value) = self.nodes[id].value {
            path.push(value);
            id = self.nodes[id].parent;
        }
        path.reverse();
        path
    }

    pub fn bfs(&self) -> BfsIter<'_, S> {
        BfsIter {
            trie: self,
            queue: vec_with_head(AC_NODE_ROOT, self.len().as_usize()),
            current: 0,
        }
    }
}

impl<S: Symbol> Iterator for BfsIter<'_, S> {
    type Item = ACNodeId;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let &node_id = self.queue.get(self.current)?;
        self.queue.extend(self.trie.children_nodes(node_id));
        self.current += 1;
        Some(node_id)
    }
}

impl<S: Symbol> FusedIterator for BfsIter<'_, S> {}
