//! Arena-backed doubly linked list of source prefixes.
//!
//! Every reverse-trie node that carries a rule owns one of these lists
//! (its head lives in the node's [`crate::store::ReverseValue`], not
//! here — the arena only owns the entries). `ListEntry::owner` is the
//! back-pointer to that owning node, folded straight into the entry
//! since there's no separate list allocation to hang it off of.

use derive_new::new;

use crate::ids::{ListId, NodeId};

#[derive(new)]
struct ListEntry {
    owner: NodeId,
    text: String,
    next: Option<ListId>,
    #[new(value = "None")]
    prev: Option<ListId>,
}

#[derive(Default)]
pub struct StringListArena {
    entries: slab::Slab<ListEntry>,
}

impl StringListArena {
    pub fn new() -> Self {
        Self {
            entries: slab::Slab::new(),
        }
    }

    /// Prepends `text` to the list whose current head is `head`,
    /// returning the id of the new head. Order among entries is never
    /// observed on its own — every read sorts the result — so
    /// prepending avoids walking to the tail.
    pub fn push(&mut self, owner: NodeId, text: &str, head: Option<ListId>) -> ListId {
        let id = self.entries.insert(ListEntry::new(owner, text.to_owned(), head));
        if let Some(h) = head {
            self.entries[h].prev = Some(id);
        }
        id
    }

    /// Detaches and frees `id`, relinking its neighbors and updating
    /// `*head` if `id` was the head. Does not look at whether the
    /// owning trie node becomes empty afterward — leaf-cutting that
    /// node is the caller's job.
    pub fn remove(&mut self, id: ListId, head: &mut Option<ListId>) {
        let entry = self.entries.remove(id);
        if *head == Some(id) {
            *head = entry.next;
        }
        if let Some(p) = entry.prev {
            self.entries[p].next = entry.next;
        }
        if let Some(n) = entry.next {
            self.entries[n].prev = entry.prev;
        }
    }

    /// Frees every entry reachable from `head`, without bothering to
    /// relink (the whole list is being discarded).
    pub fn delete_all(&mut self, head: Option<ListId>) {
        let mut cur = head;
        while let Some(id) = cur {
            let entry = self.entries.remove(id);
            cur = entry.next;
        }
    }

    pub fn owner_of(&self, id: ListId) -> NodeId {
        self.entries[id].owner
    }

    pub fn is_empty_list(head: Option<ListId>) -> bool {
        head.is_none()
    }

    /// Copies every string in the list into a plain `Vec`, in
    /// whatever order they're linked (callers sort independently).
    pub fn to_vec(&self, head: Option<ListId>) -> Vec<&str> {
        let mut out = Vec::new();
        let mut cur = head;
        while let Some(id) = cur {
            let entry = &self.entries[id];
            out.push(entry.text.as_str());
            cur = entry.next;
        }
        out
    }
}
