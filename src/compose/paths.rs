//! Locale canonicalisation and Compose file discovery (`resolve_locale`, and path providers
//! for `%H`/`%L`/`%S`). Real libxkbcommon reads a `compose.dir` alias table per locale
//! directory; this keeps the simpler (but real) fallback it uses when no such table entry
//! matches: `<xlocaledir>/<locale>/Compose`.

use std::env;
use std::path::PathBuf;

const DEFAULT_XLOCALEDIR: &str = "/usr/share/X11/locale";

/// Canonicalises a locale string the way `setlocale`/`resolve_locale` would: strips an
/// encoding suffix (`en_US.UTF-8` -> `en_US`), maps the empty string and `POSIX` to `C`.
#[must_use]
pub fn resolve_locale(locale: &str) -> String {
    let locale = if locale.is_empty() {
        env::var("LC_ALL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| env::var("LC_CTYPE").ok().filter(|v| !v.is_empty()))
            .or_else(|| env::var("LANG").ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| "C".to_string())
    } else {
        locale.to_string()
    };
    let base = locale.split(['.', '@']).next().unwrap_or(&locale);
    match base {
        "" | "POSIX" => "C".to_string(),
        other => other.to_string(),
    }
}

/// `%S` expansion: the root of the system locale tree, `$XLOCALEDIR` if set.
#[must_use]
pub fn xlocaledir_path() -> PathBuf {
    env::var_os("XLOCALEDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_XLOCALEDIR))
}

/// `%L` expansion: the per-locale system Compose file for an already-canonicalised locale.
#[must_use]
pub fn locale_compose_file_path(locale: &str) -> PathBuf {
    xlocaledir_path().join(locale).join("Compose")
}

/// `%H` expansion: the user's home directory. `None` if `HOME` is unset or empty.
#[must_use]
pub fn home_path() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from).filter(|p| !p.as_os_str().is_empty())
}

/// The user's `~/.XCompose` override, if `HOME` is set.
#[must_use]
pub fn user_compose_file_path() -> Option<PathBuf> {
    home_path().map(|h| h.join(".XCompose"))
}

/// The `XCOMPOSEFILE` environment override, if set.
#[must_use]
pub fn env_compose_file_path() -> Option<PathBuf> {
    env::var_os("XCOMPOSEFILE")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
}
