//! Components D and F: the flat, index-addressed compose trie and its builder.
//!
//! The trie is a single `Vec<Node>` with a child ("successor") pointer and a sibling ("next")
//! pointer per node, plus a NUL-terminated UTF-8 byte blob for interned leaf strings. Index
//! `0` is reserved for the root and doubles as the "absent" sentinel everywhere else, so an
//! append can never invalidate an existing index — only `Vec` reallocation could, and since we
//! always address nodes by index rather than reference, that's never observable.

use super::error::ParseWarning;
use super::keysym::Keysym;

/// One trie cell. `next` chains siblings sharing a parent, `successor` points at the first
/// child, and `utf8`/`ks` carry a leaf's string and keysym payload (both zero/`NoSymbol` for
/// an internal, non-leaf node).
#[derive(Clone, Copy, Debug)]
pub struct Node {
    pub keysym: Keysym,
    pub next: u32,
    pub successor: u32,
    pub utf8: u32,
    pub ks: Keysym,
}

impl Node {
    fn blank(keysym: Keysym) -> Self {
        Node {
            keysym,
            next: 0,
            successor: 0,
            utf8: 0,
            ks: Keysym::NoSymbol,
        }
    }
}

/// The finished, read-only trie plus its interned string blob.
///
/// Immutable once built: [`Trie::add_production`] is only ever called by the parser driver
/// while a table is being constructed, never after it is handed to a [`super::Table`].
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<Node>,
    utf8_blob: Vec<u8>,
}

impl Trie {
    pub(crate) fn new() -> Self {
        Trie {
            nodes: vec![Node::blank(Keysym::NoSymbol)],
            utf8_blob: vec![0],
        }
    }

    #[must_use]
    pub fn node(&self, idx: u32) -> &Node {
        &self.nodes[idx as usize]
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Reads a NUL-terminated string out of the blob at `offset`. Offset `0` is always the
    /// one-byte sentinel and yields `""`.
    #[must_use]
    pub fn utf8_str(&self, offset: u32) -> &str {
        let bytes = &self.utf8_blob[offset as usize..];
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        std::str::from_utf8(&bytes[..end]).unwrap_or("")
    }

    fn push_node(&mut self, n: Node) -> u32 {
        let idx = self.nodes.len() as u32;
        self.nodes.push(n);
        idx
    }

    fn intern(&mut self, s: &str) -> u32 {
        if s.is_empty() {
            return 0;
        }
        let offset = self.utf8_blob.len() as u32;
        self.utf8_blob.extend_from_slice(s.as_bytes());
        self.utf8_blob.push(0);
        offset
    }

    /// Finds `k` among the sibling chain rooted at `nodes[parent].successor`, appending a
    /// fresh node linked via `next` if no match exists. Returns the matching/created index.
    fn find_or_append_child(&mut self, parent: u32, k: Keysym) -> u32 {
        let head = self.nodes[parent as usize].successor;
        if head == 0 {
            let idx = self.push_node(Node::blank(k));
            self.nodes[parent as usize].successor = idx;
            return idx;
        }
        let mut idx = head;
        loop {
            if self.nodes[idx as usize].keysym == k {
                return idx;
            }
            let next = self.nodes[idx as usize].next;
            if next == 0 {
                let new_idx = self.push_node(Node::blank(k));
                self.nodes[idx as usize].next = new_idx;
                return new_idx;
            }
            idx = next;
        }
    }

    /// Inserts one production. `lhs` must be non-empty (the parser never calls this with an
    /// empty left-hand side). Returns the warning raised by a conflicting prefix/superset
    /// sequence, if any — never fatal.
    pub(crate) fn add_production(
        &mut self,
        lhs: &[Keysym],
        string: Option<&str>,
        keysym: Option<Keysym>,
    ) -> Option<ParseWarning> {
        debug_assert!(!lhs.is_empty());
        let mut current = 0u32;
        let mut override_warning = None;
        for (i, &k) in lhs.iter().enumerate() {
            current = self.find_or_append_child(current, k);
            if i < lhs.len() - 1 {
                let node = &mut self.nodes[current as usize];
                if node.successor == 0 && (node.utf8 != 0 || node.ks != Keysym::NoSymbol) {
                    node.utf8 = 0;
                    node.ks = Keysym::NoSymbol;
                    override_warning.get_or_insert(ParseWarning::PrefixOverridden);
                }
            }
        }
        self.finish_production(current, string, keysym).or(override_warning)
    }

    fn finish_production(
        &mut self,
        current: u32,
        string: Option<&str>,
        keysym: Option<Keysym>,
    ) -> Option<ParseWarning> {
        let node = &self.nodes[current as usize];
        if node.successor != 0 {
            return Some(ParseWarning::SkippedPrefixOfLonger);
        }
        if node.utf8 != 0 || node.ks != Keysym::NoSymbol {
            return Some(ParseWarning::SkippedDuplicate);
        }
        let utf8 = string.map_or(0, |s| self.intern(s));
        let node = &mut self.nodes[current as usize];
        node.utf8 = utf8;
        node.ks = keysym.unwrap_or(Keysym::NoSymbol);
        None
    }
}
