//! Pure-Rust X11 Compose file compiler and runtime state machine.
//!
//! This crate parses Compose files (the `~/.XCompose`/`/usr/share/X11/locale/.../Compose`
//! convention used to turn sequences of keysyms into composed Unicode text, e.g.
//! `dead_tilde` followed by `space` yielding `~`) into an in-memory trie, and provides a
//! zero-allocation state machine to drive that trie one keysym at a time.
//!
//! See [`compose`] for the public surface.

pub mod compose;
