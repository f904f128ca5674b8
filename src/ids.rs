//! Arena handles.
//!
//! Every parent/back-slot/bound/owner reference in the dual-trie is a
//! plain `usize` into a `slab::Slab`, so there is nothing here that can
//! get cyclic or dangling the way a web of weak pointers would.

/// Index into a [`crate::trie::TrieArena`]'s node slab.
pub type NodeId = usize;

/// Index into a [`crate::string_list::StringListArena`]'s entry slab.
pub type ListId = usize;
