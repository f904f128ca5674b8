//! Phone-number prefix forwarding rules, backed by a cross-linked dual
//! trie.
//!
//! A forwarding rule maps a source digit-string prefix to a target
//! prefix: any number beginning with the source is rewritten by
//! replacing that prefix with the target. [`PhoneForward`] stores an
//! evolving set of such rules and answers three queries over it:
//! [`PhoneForward::get`] (forward rewrite), [`PhoneForward::reverse`]
//! (every number that could forward-rewrite onto a given one), and
//! [`PhoneForward::get_reverse`] (the subset of `reverse` that is
//! actually self-consistent under `get`).
//!
//! Digit strings are built from the 12-symbol alphabet Σ = `0`–`9`,
//! `*`, `#` — see [`alphabet`].

pub mod alphabet;
mod dyn_array;
mod error;
mod ids;
mod numbers;
mod store;
mod string_list;
mod trie;

pub use error::AddRuleError;
pub use numbers::PhoneNumbers;

use dyn_array::DynArray;
use store::DualTrieStore;

/// Concatenates `new_prefix` with the tail of `num` left over after
/// dropping its first `to_replace` characters.
fn replace_prefix(num: &str, new_prefix: &str, to_replace: usize) -> String {
    let mut replaced = String::with_capacity(new_prefix.len() + num.len() - to_replace);
    replaced.push_str(new_prefix);
    replaced.push_str(&num[to_replace..]);
    replaced
}

/// The store of phone-number forwarding rules.
///
/// Not thread-safe: callers sharing a `PhoneForward` across threads are
/// responsible for their own synchronization. Every query is
/// synchronous and total — invalid input never panics, it yields an
/// empty [`PhoneNumbers`] (or, for [`PhoneForward::add`], a typed
/// error).
#[derive(Default)]
pub struct PhoneForward {
    store: DualTrieStore,
}

impl PhoneForward {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the rule `s -> t`, overwriting any existing rule for `s`.
    ///
    /// Fails with [`AddRuleError::InvalidInput`] if either string is
    /// empty or contains a character outside Σ, or
    /// [`AddRuleError::IdentityRule`] if `s == t`.
    pub fn add(&mut self, s: &str, t: &str) -> Result<(), AddRuleError> {
        alphabet::validate(s).ok_or(AddRuleError::InvalidInput)?;
        alphabet::validate(t).ok_or(AddRuleError::InvalidInput)?;
        self.store.add_rule(s, t)
    }

    /// Removes every rule whose source has `s` as a prefix. A no-op if
    /// `s` is invalid or no such rule exists.
    pub fn remove(&mut self, s: &str) {
        if alphabet::validate(s).is_some() {
            self.store.remove_prefix(s);
        }
    }

    /// Rewrites `s` by the longest matching source prefix currently
    /// bound to a rule. Returns `s` itself, unchanged, if no rule
    /// matches or `s` is invalid.
    pub fn get(&self, s: &str) -> PhoneNumbers {
        if alphabet::validate(s).is_none() {
            return PhoneNumbers::empty();
        }
        let (node, matched) = self.store.find_fwd_longest(s);
        match node {
            None => PhoneNumbers::single(s.to_owned()),
            Some(node) => {
                let target = self.store.fwd_target(node);
                PhoneNumbers::single(replace_prefix(s, target, matched))
            }
        }
    }

    /// Every digit string that `get` could have rewritten onto `s`:
    /// `s` itself, plus `q` for every rule `q -> p` where `p` is a
    /// prefix of `s`, with `q` substituted for that matched `p`.
    /// Sorted by [`alphabet::cmp`] with duplicates removed.
    pub fn reverse(&self, s: &str) -> PhoneNumbers {
        if alphabet::validate(s).is_none() {
            return PhoneNumbers::empty();
        }
        let (longest, mut depth) = self.store.find_rev_longest(s);
        let Some(mut node) = longest else {
            return PhoneNumbers::single(s.to_owned());
        };

        let mut bag = DynArray::new();
        loop {
            let mut sources = self.store.rev_sources(node);
            sources.sort_by(|a, b| alphabet::cmp(a, b));
            for source in sources {
                bag.push_move(replace_prefix(s, source, depth));
            }
            match self.store.rev_parent(node) {
                Some(parent) => {
                    node = parent;
                    depth -= 1;
                }
                None => break,
            }
        }
        bag.push_copy(s);
        bag.sort_dedup_by(alphabet::cmp);
        PhoneNumbers::from_dyn_array(bag)
    }

    /// The subset of [`PhoneForward::reverse`] that round-trips: every
    /// `x` in the result satisfies `get(x) == s` literally.
    pub fn get_reverse(&self, s: &str) -> PhoneNumbers {
        if alphabet::validate(s).is_none() {
            return PhoneNumbers::empty();
        }
        let candidates = self.reverse(s);
        let mut out = DynArray::new();
        for x in candidates.iter() {
            if self.get(x).get(0) == Some(s) {
                out.push_copy(x);
            }
        }
        PhoneNumbers::from_dyn_array(out)
    }
}
