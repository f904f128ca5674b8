//! Generic 12-ary trie arena.
//!
//! Every pointer a pointer-based trie would use (`parent`, a
//! back-pointer into the parent's child slot) is replaced here by a
//! `NodeId` handle into a `slab::Slab`. The forward and reverse tries
//! in [`crate::store::DualTrieStore`] are each one `TrieArena<V>`,
//! parameterized over what a node's value looks like (`ForwardValue`
//! vs `ReverseValue`).

use debug_print::debug_println;

use crate::alphabet::{self, ALPHABET_LEN};
use crate::ids::NodeId;

/// What a trie node's `value` slot means for longest-prefix matching
/// and leaf-cutting. A node "has a value" exactly when it carries
/// something a query should be able to match against — for the
/// forward trie that's a stored target string, for the reverse trie a
/// non-empty source list.
pub trait NodeValue: Default {
    fn has_value(&self) -> bool;
}

pub struct TrieNode<V> {
    parent: Option<NodeId>,
    /// The digit this node hangs off its parent under. `None` for the
    /// root. Clearing the link is `parent.children[slot] = None`
    /// instead of dereferencing a raw back-pointer.
    slot_in_parent: Option<u8>,
    children: [Option<NodeId>; ALPHABET_LEN],
    child_count: u8,
    /// Last child index visited by the iterative teardown in
    /// [`TrieArena::delete_subtree`]. Reset to `-1` whenever the
    /// node's set of children changes shape.
    iter_cursor: i8,
    pub value: V,
}

impl<V: Default> TrieNode<V> {
    fn new(parent: Option<NodeId>, slot_in_parent: Option<u8>) -> Self {
        Self {
            parent,
            slot_in_parent,
            children: [None; ALPHABET_LEN],
            child_count: 0,
            iter_cursor: -1,
            value: V::default(),
        }
    }
}

#[derive(Default)]
pub struct TrieArena<V> {
    nodes: slab::Slab<TrieNode<V>>,
    root: Option<NodeId>,
}

impl<V: NodeValue> TrieArena<V> {
    pub fn new() -> Self {
        Self {
            nodes: slab::Slab::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &TrieNode<V> {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TrieNode<V> {
        &mut self.nodes[id]
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Every live node id in the arena, in arbitrary order. Exposed
    /// for invariant-checking stress tests, which need to walk the
    /// whole arena rather than a single root-to-leaf path.
    #[cfg(test)]
    pub(crate) fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|(id, _)| id)
    }

    #[cfg(test)]
    pub(crate) fn children_of(&self, id: NodeId) -> &[Option<NodeId>; ALPHABET_LEN] {
        &self.nodes[id].children
    }

    #[cfg(test)]
    pub(crate) fn child_count_of(&self, id: NodeId) -> u8 {
        self.nodes[id].child_count
    }

    /// Walks `s` from the (lazily allocated) root, creating any
    /// missing nodes along the way, and returns the node for the last
    /// symbol of `s`.
    pub fn insert_path(&mut self, s: &str) -> NodeId {
        if self.root.is_none() {
            let id = self.nodes.insert(TrieNode::new(None, None));
            self.root = Some(id);
            debug_println!("trie: allocated root {id}");
        }
        let mut current = self.root.expect("just ensured a root exists");
        for c in s.chars() {
            let digit = alphabet::index(c).expect("caller validated s") as usize;
            current = match self.nodes[current].children[digit] {
                Some(child) => child,
                None => {
                    let child = self
                        .nodes
                        .insert(TrieNode::new(Some(current), Some(digit as u8)));
                    let node = &mut self.nodes[current];
                    node.children[digit] = Some(child);
                    node.child_count += 1;
                    node.iter_cursor = -1;
                    debug_println!("trie: allocated node {child} under {current} at digit {digit}");
                    child
                }
            };
        }
        current
    }

    /// Walks `s` downward, returning the deepest node on the path whose
    /// value `has_value()`, plus the length of the prefix it was
    /// matched at.
    pub fn find_longest(&self, s: &str) -> (Option<NodeId>, usize) {
        let Some(root) = self.root else {
            return (None, 0);
        };
        let mut node_id = root;
        let mut last_with_value = None;
        let mut matched_len = 0usize;
        let mut distance = 0usize;
        for c in s.chars() {
            let Some(digit) = alphabet::index(c) else {
                break;
            };
            match self.nodes[node_id].children[digit as usize] {
                Some(child) => {
                    node_id = child;
                    distance += 1;
                }
                None => break,
            }
            if self.nodes[node_id].value.has_value() {
                last_with_value = Some(node_id);
                matched_len += distance;
                distance = 0;
            }
        }
        (last_with_value, matched_len)
    }

    /// Walks `s` downward and returns the node at the end of the full
    /// path, or `None` if `s` isn't fully present.
    pub fn find_exact(&self, s: &str) -> Option<NodeId> {
        let mut node_id = self.root?;
        for c in s.chars() {
            let digit = alphabet::index(c)?;
            node_id = self.nodes[node_id].children[digit as usize]?;
        }
        Some(node_id)
    }

    /// Removes the subtree rooted at the node exactly matching `s`, if
    /// any. `on_free_node` is called once per node freed (including the
    /// subtree root) before it's removed from the arena, letting the
    /// caller unbind any cross-tree link the node's value carries
    /// before the value itself is dropped.
    pub fn remove_subtree(&mut self, s: &str, mut on_free_node: impl FnMut(&mut Self, NodeId)) {
        let Some(node_id) = self.find_exact(s) else {
            return;
        };
        match self.nodes[node_id].parent {
            Some(parent_id) => {
                let slot = self.nodes[node_id]
                    .slot_in_parent
                    .expect("non-root node has a slot");
                let parent = &mut self.nodes[parent_id];
                parent.children[slot as usize] = None;
                parent.child_count -= 1;
                self.leaf_cut(parent_id);
            }
            None => self.root = None,
        }
        self.delete_subtree(node_id, &mut on_free_node);
    }

    /// Iteratively frees every node in the subtree rooted at `node`,
    /// using an explicit cursor instead of recursion (chains up to
    /// thousands of nodes deep would blow the stack otherwise).
    fn delete_subtree(&mut self, node: NodeId, on_free_node: &mut impl FnMut(&mut Self, NodeId)) {
        let mut curr = Some(node);
        while let Some(curr_id) = curr {
            if self.nodes[curr_id].child_count == 0 {
                if curr_id == node {
                    on_free_node(self, curr_id);
                    self.nodes.remove(curr_id);
                    curr = None;
                } else {
                    let to_free = curr_id;
                    let parent_id = self.nodes[to_free].parent.expect("non-root node");
                    let slot = self.nodes[to_free].slot_in_parent.expect("non-root node");
                    curr = Some(parent_id);
                    let parent = &mut self.nodes[parent_id];
                    parent.children[slot as usize] = None;
                    parent.child_count -= 1;
                    on_free_node(self, to_free);
                    self.nodes.remove(to_free);
                }
            } else {
                let idx = self.nodes[curr_id].iter_cursor + 1;
                let next = self.nodes[curr_id]
                    .children
                    .get(idx as usize)
                    .copied()
                    .flatten();
                self.nodes[curr_id].iter_cursor = idx;
                if let Some(child_id) = next {
                    curr = Some(child_id);
                }
            }
        }
    }

    /// Walks from `node` toward the root, freeing every node that is
    /// empty (no children and no value), stopping at the first
    /// non-empty node or at an emptied-out root.
    pub fn leaf_cut(&mut self, mut node_id: NodeId) {
        loop {
            let (empty, parent, slot) = {
                let node = &self.nodes[node_id];
                (
                    node.child_count == 0 && !node.value.has_value(),
                    node.parent,
                    node.slot_in_parent,
                )
            };
            if !empty {
                break;
            }
            self.nodes.remove(node_id);
            debug_println!("trie: leaf-cut node {node_id}");
            match parent {
                Some(parent_id) => {
                    let slot = slot.expect("non-root node has a slot");
                    let p = &mut self.nodes[parent_id];
                    p.children[slot as usize] = None;
                    p.child_count -= 1;
                    p.iter_cursor = -1;
                    node_id = parent_id;
                }
                None => {
                    self.root = None;
                    break;
                }
            }
        }
    }
}
