//! A pure-Rust Compose file compiler and runtime state machine.
//!
//! Mirrors the shape of this crate's original `xkb` module: a flat top-level file defining the
//! public surface, backed by a `compose/` directory of focused submodules. Build a [`Table`]
//! from a Compose file ([`Table::new_from_file`], [`Table::new_from_buffer`],
//! [`Table::new_from_locale`]), then drive one or more [`State`]s over it with [`State::feed`].

pub mod context;
pub mod error;
pub mod keysym;
mod lexer;
mod loader;
mod paths;
mod parser;
mod scanner;
pub mod source;
pub mod state;
mod trie;

pub use context::{Context, ContextFlags, LogLevel, CONTEXT_NO_FLAGS};
pub use error::{Error, ParseWarning};
pub use keysym::Keysym;
pub use source::{FsSource, Source};
pub use state::{FeedResult, State, StateFlags, Status, Table, STATE_NO_FLAGS};

/// Compose file grammar variant, named the way `xkb_compose_format` is in libxkbcommon; text
/// v1 (the classic `.XCompose` grammar) is the only one this crate parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Format {
    TextV1,
}

pub type CompileFlags = u32;
pub const COMPILE_NO_FLAGS: CompileFlags = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_round_trip_composes_a_sequence() {
        let ctx = Context::new(CONTEXT_NO_FLAGS);
        let table = Table::new_from_buffer(
            &ctx,
            b"<dead_tilde> <space> : \"~\" asciitilde\n",
            "C",
            Format::TextV1,
            COMPILE_NO_FLAGS,
        )
        .unwrap();
        let mut state = State::new(&table, STATE_NO_FLAGS);
        state.feed(keysym::from_name("dead_tilde").unwrap());
        state.feed(keysym::from_name("space").unwrap());
        assert_eq!(state.status(), Status::Composed);
        assert_eq!(state.utf8().as_deref(), Some("~"));
    }

    #[test]
    fn unsupported_compile_flags_are_rejected() {
        let ctx = Context::new(CONTEXT_NO_FLAGS);
        let err = Table::new_from_buffer(&ctx, b"<a> : \"a\"\n", "C", Format::TextV1, 1).unwrap_err();
        assert!(matches!(err, Error::UnknownCompileFlags(1)));
    }
}
