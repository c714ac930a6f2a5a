//! A lightweight library context: log level and verbosity knobs passed to table-construction
//! entry points, routed through the `log` crate rather than a raw callback. There is no
//! include-path search list here — path expansion is entirely `%H`/`%L`/`%S`, handled by
//! [`super::paths`].

/// Mirrors `xkb_log_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LogLevel {
    Critical = 10,
    Error = 20,
    Warning = 30,
    Info = 40,
    Debug = 50,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Error
    }
}

pub type ContextFlags = u32;
pub const CONTEXT_NO_FLAGS: ContextFlags = 0;

/// Top-level library context. Every table-construction entry point takes one, though it
/// carries no FFI resource of its own — just the log level/verbosity knobs above.
#[derive(Debug, Default)]
pub struct Context {
    log_level: LogLevel,
    log_verbosity: i32,
}

impl Context {
    #[must_use]
    pub fn new(_flags: ContextFlags) -> Context {
        Context::default()
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    #[must_use]
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_log_verbosity(&mut self, verbosity: i32) {
        self.log_verbosity = verbosity;
    }

    #[must_use]
    pub fn log_verbosity(&self) -> i32 {
        self.log_verbosity
    }
}
