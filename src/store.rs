//! The cross-linked dual trie: a forward trie keyed by source prefixes
//! and a reverse trie keyed by target prefixes, kept consistent under
//! `add_rule`/`remove_prefix` by a single cross-link per forward rule.

use debug_print::debug_println;

use crate::error::AddRuleError;
use crate::ids::{ListId, NodeId};
use crate::string_list::StringListArena;
use crate::trie::{NodeValue, TrieArena};

/// A forward-trie node's value: the target this source prefix rewrites
/// to, plus a cross-link to the reverse-trie list entry carrying this
/// rule's source string.
#[derive(Default)]
pub struct ForwardValue {
    target: Option<String>,
    bound: Option<ListId>,
}

impl NodeValue for ForwardValue {
    fn has_value(&self) -> bool {
        self.target.is_some()
    }
}

/// A reverse-trie node's value: the head of the list of source
/// prefixes currently forwarding to this target prefix.
#[derive(Default)]
pub struct ReverseValue {
    head: Option<ListId>,
}

impl NodeValue for ReverseValue {
    fn has_value(&self) -> bool {
        self.head.is_some()
    }
}

/// Owns both trie arenas and the list arena shared by every
/// reverse-trie node, and enforces the bidirectional-binding invariant
/// across them on every mutation.
#[derive(Default)]
pub struct DualTrieStore {
    forward: TrieArena<ForwardValue>,
    reverse: TrieArena<ReverseValue>,
    lists: StringListArena,
}

impl DualTrieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or overwrites the rule `s -> t`. Both `s` and `t` must
    /// already be validated digit strings; the only failure this level
    /// can still report is `s == t`.
    pub fn add_rule(&mut self, s: &str, t: &str) -> Result<(), AddRuleError> {
        if s == t {
            return Err(AddRuleError::IdentityRule);
        }

        let fwd = self.forward.insert_path(s);
        let rev = self.reverse.insert_path(t);

        let head = self.reverse.node(rev).value.head;
        let entry = self.lists.push(rev, s, head);
        self.reverse.node_mut(rev).value.head = Some(entry);

        // Unbind the old entry only once the new one is already in
        // place: if `t` is unchanged, `old_entry` and `entry` share an
        // owner, and unbinding first would leaf-cut `rev` out from
        // under us before we could index it again.
        if let Some(old_entry) = self.forward.node(fwd).value.bound {
            self.unbind(old_entry);
        }

        let node = self.forward.node_mut(fwd);
        node.value.target = Some(t.to_owned());
        node.value.bound = Some(entry);
        debug_println!("store: bound {s} -> {t}");

        Ok(())
    }

    /// Removes every rule whose source has `s` as a prefix. Every
    /// forward node freed along the way unbinds its reverse-side list
    /// entry first, so the reverse trie is pruned transitively.
    pub fn remove_prefix(&mut self, s: &str) {
        let lists = &mut self.lists;
        let reverse = &mut self.reverse;
        self.forward.remove_subtree(s, |forward, node_id| {
            if let Some(entry) = forward.node(node_id).value.bound {
                Self::unbind_entry(lists, reverse, entry);
            }
        });
    }

    /// Removes the reverse-side list entry bound to an overwritten or
    /// deleted forward rule, leaf-cutting the reverse trie if that was
    /// the entry's owning node's last source.
    fn unbind(&mut self, entry: ListId) {
        Self::unbind_entry(&mut self.lists, &mut self.reverse, entry);
    }

    fn unbind_entry(
        lists: &mut StringListArena,
        reverse: &mut TrieArena<ReverseValue>,
        entry: ListId,
    ) {
        let owner = lists.owner_of(entry);
        let mut head = reverse.node(owner).value.head;
        lists.remove(entry, &mut head);
        reverse.node_mut(owner).value.head = head;
        if head.is_none() {
            reverse.leaf_cut(owner);
        }
    }

    pub fn find_fwd_longest(&self, s: &str) -> (Option<NodeId>, usize) {
        self.forward.find_longest(s)
    }

    pub fn find_rev_longest(&self, s: &str) -> (Option<NodeId>, usize) {
        self.reverse.find_longest(s)
    }

    /// The target string stored at a forward node known to carry a
    /// value (the caller always gets `node` from `find_fwd_longest`).
    pub fn fwd_target(&self, node: NodeId) -> &str {
        self.forward.node(node).value.target.as_deref().expect(
            "callers only pass node ids returned by find_fwd_longest, whose value.has_value() held",
        )
    }

    pub fn rev_parent(&self, node: NodeId) -> Option<NodeId> {
        self.reverse.parent_of(node)
    }

    /// Source prefixes bound to a reverse node, in arbitrary order —
    /// callers sort by [`crate::alphabet::cmp`] before use.
    pub fn rev_sources(&self, node: NodeId) -> Vec<&str> {
        self.lists.to_vec(self.reverse.node(node).value.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rule_rejects_identity() {
        let mut store = DualTrieStore::new();
        assert_eq!(store.add_rule("123", "123"), Err(AddRuleError::IdentityRule));
    }

    #[test]
    fn add_rule_binds_forward_and_reverse() {
        let mut store = DualTrieStore::new();
        store.add_rule("123", "9").unwrap();

        let (fwd, fwd_len) = store.find_fwd_longest("123");
        let fwd = fwd.unwrap();
        assert_eq!(fwd_len, 3);
        assert_eq!(store.fwd_target(fwd), "9");

        let (rev, rev_len) = store.find_rev_longest("9");
        let rev = rev.unwrap();
        assert_eq!(rev_len, 1);
        assert_eq!(store.rev_sources(rev), vec!["123"]);
    }

    #[test]
    fn overwriting_a_source_prunes_the_old_target() {
        let mut store = DualTrieStore::new();
        store.add_rule("123", "9").unwrap();
        store.add_rule("123", "8").unwrap();

        assert!(store.find_rev_longest("9").0.is_none());
        let (rev, _) = store.find_rev_longest("8");
        assert_eq!(store.rev_sources(rev.unwrap()), vec!["123"]);
    }

    #[test]
    fn readding_the_same_rule_does_not_panic_or_duplicate_the_source() {
        let mut store = DualTrieStore::new();
        store.add_rule("123", "9").unwrap();
        store.add_rule("123", "9").unwrap();

        let (fwd, _) = store.find_fwd_longest("123");
        assert_eq!(store.fwd_target(fwd.unwrap()), "9");

        let (rev, _) = store.find_rev_longest("9");
        assert_eq!(store.rev_sources(rev.unwrap()), vec!["123"]);
    }

    #[test]
    fn remove_prefix_prunes_both_trees() {
        let mut store = DualTrieStore::new();
        store.add_rule("123", "9").unwrap();
        store.add_rule("124", "9").unwrap();

        store.remove_prefix("123");
        assert!(store.find_fwd_longest("123").0.is_none());
        let (rev, _) = store.find_rev_longest("9");
        assert_eq!(store.rev_sources(rev.unwrap()), vec!["124"]);

        store.remove_prefix("124");
        assert!(store.find_rev_longest("9").0.is_none());
    }

    #[test]
    fn remove_prefix_removes_every_descendant_rule() {
        let mut store = DualTrieStore::new();
        store.add_rule("1", "a").unwrap();
        store.add_rule("12", "b").unwrap();

        store.remove_prefix("1");
        assert!(store.find_fwd_longest("1").0.is_none());
        assert!(store.find_fwd_longest("12").0.is_none());
        assert!(store.find_rev_longest("a").0.is_none());
        assert!(store.find_rev_longest("b").0.is_none());
    }

    const DIGITS: [char; 12] = [
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '*', '#',
    ];

    fn random_digit_string(rng: &mut impl rand::Rng, max_len: usize) -> String {
        use rand::Rng as _;
        let len = rng.gen_range(1..=max_len);
        (0..len).map(|_| DIGITS[rng.gen_range(0..DIGITS.len())]).collect()
    }

    /// Invariants 1 and 2 (§8): child-count faithfulness and every
    /// child's parent pointer agreeing with where it actually hangs.
    fn assert_structural_invariants<V: NodeValue>(arena: &TrieArena<V>) {
        for id in arena.node_ids() {
            let children = arena.children_of(id);
            let live = children.iter().filter(|c| c.is_some()).count() as u8;
            assert_eq!(live, arena.child_count_of(id), "child_count out of sync for node {id}");
            for child in children.iter().copied().flatten() {
                assert_eq!(
                    arena.parent_of(child),
                    Some(id),
                    "child {child} does not point back to parent {id}"
                );
            }
            if let Some(parent) = arena.parent_of(id) {
                assert!(
                    arena.children_of(parent).contains(&Some(id)),
                    "node {id} is not among parent {parent}'s children"
                );
            }
        }
    }

    #[test]
    fn randomized_add_remove_preserves_structural_and_binding_invariants() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        use std::collections::HashMap;

        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut store = DualTrieStore::new();
        let mut model: HashMap<String, String> = HashMap::new();

        for _ in 0..500 {
            if model.is_empty() || rng.gen_bool(0.7) {
                let s = random_digit_string(&mut rng, 5);
                let t = random_digit_string(&mut rng, 5);
                if s != t && store.add_rule(&s, &t).is_ok() {
                    model.insert(s, t);
                }
            } else {
                let idx = rng.gen_range(0..model.len());
                let key = model.keys().nth(idx).cloned().unwrap();
                let cut = rng.gen_range(1..=key.len());
                let prefix = key[..cut].to_string();
                store.remove_prefix(&prefix);
                model.retain(|s, _| !s.starts_with(&prefix));
            }

            assert_structural_invariants(&store.forward);
            assert_structural_invariants(&store.reverse);

            // Invariant 4: every remaining rule is still bound exactly
            // as it was added, on both sides of the cross-link.
            for (s, t) in &model {
                let (node, matched) = store.find_fwd_longest(s);
                let node =
                    node.unwrap_or_else(|| panic!("rule {s} -> {t} missing from forward trie"));
                assert_eq!(matched, s.len());
                assert_eq!(store.fwd_target(node), t);

                let (rev, rev_matched) = store.find_rev_longest(t);
                let rev = rev.unwrap_or_else(|| panic!("target {t} missing from reverse trie"));
                assert_eq!(rev_matched, t.len());
                assert!(store.rev_sources(rev).contains(&s.as_str()));
            }
        }
    }
}
