//! The three table-construction entry points.

use std::path::Path;
use std::rc::Rc;

use super::context::Context;
use super::error::Error;
use super::parser;
use super::source::{FsSource, Source};
use super::state::Table;
use super::trie::Trie;
use super::{paths, CompileFlags, Format, COMPILE_NO_FLAGS};

impl Table {
    /// Builds a table from a Compose file on disk.
    pub fn new_from_file(
        context: &Context,
        file: impl AsRef<Path>,
        locale: &str,
        format: Format,
        flags: CompileFlags,
    ) -> Result<Rc<Table>, Error> {
        let _ = context;
        check_format(format)?;
        check_flags(flags)?;
        let path = file.as_ref();
        let source = FsSource;
        let buf = source
            .read(path)
            .map_err(|e| Error::Io { path: path.to_path_buf(), source: e })?;
        build(&buf, locale, path, &source)
    }

    /// Builds a table from an in-memory Compose buffer. Any `include` directive it contains is
    /// still resolved against the real filesystem.
    pub fn new_from_buffer(
        context: &Context,
        buffer: &[u8],
        locale: &str,
        format: Format,
        flags: CompileFlags,
    ) -> Result<Rc<Table>, Error> {
        let _ = context;
        check_format(format)?;
        check_flags(flags)?;
        let source = FsSource;
        build(buffer, locale, Path::new("<buffer>"), &source)
    }

    /// Builds a table the way a desktop session normally would: resolves `locale`, then tries
    /// `$XCOMPOSEFILE`, `$HOME/.XCompose`, and the system per-locale Compose file, in that
    /// order, using the first one that actually opens. A candidate whose path doesn't even
    /// resolve (e.g. `$HOME` unset) is skipped outright; one that resolves but fails to open
    /// (missing, permission-denied, ...) falls through to the next candidate rather than
    /// failing the whole lookup.
    pub fn new_from_locale(context: &Context, locale: &str, flags: CompileFlags) -> Result<Rc<Table>, Error> {
        check_flags(flags)?;
        let resolved = paths::resolve_locale(locale);
        let candidates = [
            paths::env_compose_file_path(),
            paths::user_compose_file_path(),
            Some(paths::locale_compose_file_path(&resolved)),
        ];
        for path in candidates.into_iter().flatten() {
            match Self::new_from_file(context, &path, &resolved, Format::TextV1, COMPILE_NO_FLAGS) {
                Ok(table) => return Ok(table),
                Err(Error::Io { .. }) => continue,
                Err(other) => return Err(other),
            }
        }
        Err(Error::NoComposeFile(resolved))
    }
}

fn check_format(format: Format) -> Result<(), Error> {
    match format {
        Format::TextV1 => Ok(()),
    }
}

fn check_flags(flags: CompileFlags) -> Result<(), Error> {
    if flags == COMPILE_NO_FLAGS {
        Ok(())
    } else {
        Err(Error::UnknownCompileFlags(flags))
    }
}

fn build(buf: &[u8], locale: &str, path: &Path, source: &dyn Source) -> Result<Rc<Table>, Error> {
    let resolved = paths::resolve_locale(locale);
    let mut trie = Trie::new();
    parser::parse(buf, &resolved, path, &mut trie, source)?;
    Ok(Table::from_trie(trie))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{Context, CONTEXT_NO_FLAGS};

    #[test]
    fn new_from_buffer_builds_a_working_table() {
        let ctx = Context::new(CONTEXT_NO_FLAGS);
        let table = Table::new_from_buffer(
            &ctx,
            b"<a> <b> : \"ab\"\n",
            "C",
            Format::TextV1,
            COMPILE_NO_FLAGS,
        )
        .unwrap();
        assert!(table.node_count() > 1);
    }

    #[test]
    fn new_from_file_reads_from_disk() {
        let dir = std::env::temp_dir().join(format!("xkb-compose-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("Compose");
        std::fs::write(&file, b"<a> : \"a\"\n").unwrap();
        let ctx = Context::new(CONTEXT_NO_FLAGS);
        let table = Table::new_from_file(&ctx, &file, "C", Format::TextV1, COMPILE_NO_FLAGS).unwrap();
        assert!(table.node_count() > 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn new_from_locale_errors_when_nothing_found() {
        std::env::remove_var("XCOMPOSEFILE");
        std::env::set_var("HOME", "/nonexistent-xkb-compose-test-home");
        let ctx = Context::new(CONTEXT_NO_FLAGS);
        let err = Table::new_from_locale(&ctx, "xx_XX", COMPILE_NO_FLAGS).unwrap_err();
        assert!(matches!(err, Error::NoComposeFile(_)));
    }

    #[test]
    fn new_from_locale_falls_through_a_candidate_that_fails_to_open() {
        // XCOMPOSEFILE names a path that does not exist: new_from_file fails to open it, and
        // the search must fall through to $HOME/.XCompose rather than propagating that error.
        let dir = std::env::temp_dir().join(format!("xkb-compose-test-fallthrough-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::env::set_var("XCOMPOSEFILE", dir.join("missing-compose-file"));
        std::env::set_var("HOME", &dir);
        std::fs::write(dir.join(".XCompose"), b"<a> : \"a\"\n").unwrap();

        let ctx = Context::new(CONTEXT_NO_FLAGS);
        let table = Table::new_from_locale(&ctx, "C", COMPILE_NO_FLAGS).unwrap();
        assert!(table.node_count() > 1);

        std::env::remove_var("XCOMPOSEFILE");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
