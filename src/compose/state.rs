//! The per-consumer runtime walker over a built compose table.
//!
//! `State` holds nothing but two node indices and a strong reference to its table — no
//! allocation happens on the `feed` path.

use std::rc::Rc;

use super::keysym::{self, Keysym};
use super::trie::Trie;

/// The table a state machine walks. Construction lives in [`super::loader`]; this type is the
/// read-only, shared, reference-counted handle every [`State`] built over it clones.
#[derive(Debug)]
pub struct Table {
    pub(crate) trie: Trie,
}

impl Table {
    pub(crate) fn from_trie(trie: Trie) -> Rc<Table> {
        Rc::new(Table { trie })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }
}

/// Four-valued compose status, reported by [`State::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Nothing,
    Composing,
    Composed,
    Cancelled,
}

/// Whether [`State::feed`] changed state or silently ignored the keysym (a modifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedResult {
    Ignored,
    Accepted,
}

pub type StateFlags = u32;
pub const STATE_NO_FLAGS: StateFlags = 0;

/// The runtime walker. Not `Sync`: callers must externally serialise `feed`/`reset`/`get_*`
/// on a given instance; separate instances over the same [`Table`] are independent.
pub struct State {
    table: Rc<Table>,
    prev_context: u32,
    context: u32,
}

impl State {
    #[must_use]
    pub fn new(table: &Rc<Table>, _flags: StateFlags) -> Self {
        State {
            table: Rc::clone(table),
            prev_context: 0,
            context: 0,
        }
    }

    #[must_use]
    pub fn compose_table(&self) -> Rc<Table> {
        Rc::clone(&self.table)
    }

    /// Feeds one keysym. Modifier keysyms are silently swallowed without a state change, the
    /// way real libxkbcommon's `xkb_compose_state_feed` does — a keystroke like Shift doesn't
    /// interrupt or advance a sequence in progress.
    pub fn feed(&mut self, keysym: Keysym) -> FeedResult {
        if keysym::is_modifier(keysym) {
            return FeedResult::Ignored;
        }
        // A sequence that just reached a terminal status (composed or cancelled) doesn't
        // require an explicit reset() before starting the next one: the next feed begins
        // again from the root, same as real libxkbcommon.
        if matches!(self.status(), Status::Composed | Status::Cancelled) {
            self.prev_context = 0;
            self.context = 0;
        }
        let node = self.table.trie.node(self.context);
        let mut next = node.successor;
        let mut matched = 0u32;
        while next != 0 {
            let candidate = self.table.trie.node(next);
            if candidate.keysym == keysym {
                matched = next;
                break;
            }
            next = candidate.next;
        }
        self.prev_context = self.context;
        self.context = matched;
        FeedResult::Accepted
    }

    pub fn reset(&mut self) {
        self.prev_context = 0;
        self.context = 0;
    }

    #[must_use]
    pub fn status(&self) -> Status {
        if self.context == 0 {
            // `prev_context != 0` is the actual "were we mid-sequence" test: the root (index
            // 0) always has a nonzero `successor` once any production is loaded, so checking
            // that field alone would misreport a first, never-composing keystroke as
            // cancelled rather than as nothing.
            if self.prev_context != 0 && self.table.trie.node(self.prev_context).successor != 0 {
                Status::Cancelled
            } else {
                Status::Nothing
            }
        } else if self.table.trie.node(self.context).successor != 0 {
            Status::Composing
        } else {
            Status::Composed
        }
    }

    /// C-style, truncation-safe UTF-8 accessor, mirroring `xkb_compose_state_get_utf8`: writes
    /// up to `buf.len()` bytes (always leaving room for a trailing NUL if `buf` is non-empty)
    /// and returns the length the full string would need, so callers can detect truncation
    /// exactly like `snprintf`. A keysym-only leaf (no interned string) derives its text on
    /// demand from [`keysym::to_utf8`].
    pub fn get_utf8(&self, buf: &mut [u8]) -> usize {
        let node = self.table.trie.node(self.context);
        let owned;
        let s: &str = if node.utf8 == 0 && node.ks != Keysym::NoSymbol {
            owned = keysym::to_utf8(node.ks).unwrap_or_default();
            &owned
        } else {
            self.table.trie.utf8_str(node.utf8)
        };
        let bytes = s.as_bytes();
        if !buf.is_empty() {
            let n = bytes.len().min(buf.len() - 1);
            buf[..n].copy_from_slice(&bytes[..n]);
            buf[n] = 0;
        }
        bytes.len()
    }

    /// Idiomatic wrapper over [`State::get_utf8`] for callers who just want an owned `String`.
    #[must_use]
    pub fn utf8(&self) -> Option<String> {
        let mut buf = [0u8; 256];
        let len = self.get_utf8(&mut buf);
        if len == 0 {
            None
        } else {
            Some(String::from_utf8_lossy(&buf[..len.min(buf.len() - 1)]).into_owned())
        }
    }

    #[must_use]
    pub fn get_one_sym(&self) -> Keysym {
        self.table.trie.node(self.context).ks
    }

    #[must_use]
    pub fn keysym(&self) -> Option<Keysym> {
        match self.get_one_sym() {
            Keysym::NoSymbol => None,
            ks => Some(ks),
        }
    }
}
