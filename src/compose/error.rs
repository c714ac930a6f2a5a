//! Construction-time (tier-1) and parse-time (tier-2) error types.
//!
//! `Error` is returned from the table lifecycle entry points
//! ([`crate::compose::Table::new_from_file`] and friends); a partially built table is never
//! handed back to the caller. `ParseWarning` is never fatal on its own — the parser logs it
//! and skips the offending line.

use std::io;
use std::path::PathBuf;

/// Fatal, construction-time failures. Returned from the loader entry points; the caller
/// never sees a partially built table.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unsupported compose file format {0:?} (only TextV1 is supported)")]
    UnsupportedFormat(crate::compose::Format),

    #[error("unknown compile flags: {0:#x}")]
    UnknownCompileFlags(u32),

    #[error("unknown state flags: {0:#x}")]
    UnknownStateFlags(u32),

    #[error("could not resolve locale {0:?}")]
    UnresolvableLocale(String),

    #[error("no Compose file could be found for locale {0:?}")]
    NoComposeFile(String),

    #[error("include depth exceeded (max 5) while including {0:?}")]
    IncludeDepthExceeded(PathBuf),

    #[error("too many parse errors ({0}) in {1:?}, aborting")]
    TooManyErrors(u32, PathBuf),

    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0:?} is not valid UTF-8")]
    InvalidUtf8(PathBuf),
}

/// Non-fatal, line-local parse diagnostics, as opposed to the fatal construction-time
/// [`Error`]. Always logged through the `log` facade and never propagated as a hard error;
/// collected here purely so tests can assert on them without scraping log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    UnknownKeysym(String),
    LhsTooLong,
    EmptyLhs,
    DuplicateString,
    DuplicateRhsKeysym,
    EmptyString,
    StringTooLong,
    MissingRhs,
    UnterminatedString,
    UnknownEscape(char),
    InvalidUtf8,
    BufferOverflow,
    PrefixOverridden,
    SkippedPrefixOfLonger,
    SkippedDuplicate,
    UnexpectedToken,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnknownKeysym(name) => write!(f, "unknown keysym name {name:?}"),
            ParseWarning::LhsTooLong => write!(f, "left-hand side has more than 10 keysyms"),
            ParseWarning::EmptyLhs => write!(f, "left-hand side is empty"),
            ParseWarning::DuplicateString => write!(f, "duplicate STRING on right-hand side"),
            ParseWarning::DuplicateRhsKeysym => {
                write!(f, "duplicate keysym on right-hand side")
            }
            ParseWarning::EmptyString => write!(f, "empty STRING is not allowed"),
            ParseWarning::StringTooLong => write!(f, "STRING longer than 255 bytes"),
            ParseWarning::MissingRhs => {
                write!(f, "right-hand side has neither a string nor a keysym")
            }
            ParseWarning::UnterminatedString => write!(f, "unterminated string literal"),
            ParseWarning::UnknownEscape(c) => write!(f, "unknown escape '\\{c}'"),
            ParseWarning::InvalidUtf8 => write!(f, "string literal is not valid UTF-8"),
            ParseWarning::BufferOverflow => write!(f, "scanner buffer overflow"),
            ParseWarning::PrefixOverridden => write!(
                f,
                "a sequence already exists which is a prefix of this sequence; overriding"
            ),
            ParseWarning::SkippedPrefixOfLonger => write!(
                f,
                "the compose sequence is a prefix of another; skipping line"
            ),
            ParseWarning::SkippedDuplicate => {
                write!(f, "the compose sequence already exists; skipping line")
            }
            ParseWarning::UnexpectedToken => write!(f, "unexpected token"),
        }
    }
}
