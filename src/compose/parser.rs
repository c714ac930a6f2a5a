//! The state-machine driver over the token stream, turning productions into trie insertions
//! and resolving `include` directives.
//!
//! Drives five named states (`initial`, `include`, `include_eol`, `lhs`, `rhs`); any token a
//! state doesn't expect falls through to a shared recovery path that skips to the next line
//! and aborts the whole parse after ten such errors.

use std::path::{Path, PathBuf};

use super::error::{Error, ParseWarning};
use super::keysym::Keysym;
use super::lexer::{Lexer, Token};
use super::source::Source;
use super::trie::Trie;

const MAX_LHS_LEN: usize = 10;
const MAX_STRING_LEN: usize = 255;
const MAX_INCLUDE_DEPTH: u32 = 5;
const MAX_ERRORS: u32 = 10;

#[derive(Debug, Default)]
struct Production {
    lhs: Vec<Keysym>,
    string: Option<String>,
    keysym: Option<Keysym>,
}

impl Production {
    fn clear(&mut self) {
        self.lhs.clear();
        self.string = None;
        self.keysym = None;
    }
}

enum ParserState {
    Initial,
    Include,
    IncludeEol(String),
    Lhs,
    Rhs,
    Done,
}

/// Drives one Compose source buffer to completion, inserting productions into `trie` and
/// recursing into `include` directives through a [`Source`].
pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    locale: String,
    path: PathBuf,
    depth: u32,
    production: Production,
    error_count: u32,
    warnings: Vec<ParseWarning>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(buf: &'a [u8], locale: &str, path: PathBuf) -> Self {
        Parser {
            lexer: Lexer::new(buf, locale),
            locale: locale.to_string(),
            path,
            depth: 0,
            production: Production::default(),
            error_count: 0,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }

    fn warn(&mut self, w: ParseWarning) {
        log::warn!("{} at {}:{}", w, self.path.display(), self.lexer.line());
        self.warnings.push(w);
    }

    /// Runs the whole file at the given include depth (`0` for the top-level file), inserting
    /// productions into `trie` and following `include` directives via `source`.
    pub(crate) fn run(&mut self, trie: &mut Trie, source: &dyn Source, depth: u32) -> Result<(), Error> {
        self.depth = depth;
        let mut state = ParserState::Initial;
        loop {
            state = match state {
                ParserState::Initial => self.step_initial()?,
                ParserState::Include => self.step_include()?,
                ParserState::IncludeEol(path) => self.step_include_eol(path, trie, source)?,
                ParserState::Lhs => self.step_lhs()?,
                ParserState::Rhs => self.step_rhs(trie)?,
                ParserState::Done => return Ok(()),
            };
        }
    }

    fn abort_or_recover(&mut self) -> Result<ParserState, Error> {
        self.warn(ParseWarning::UnexpectedToken);
        self.error_count += 1;
        if self.error_count > MAX_ERRORS {
            return Err(Error::TooManyErrors(self.error_count, self.path.clone()));
        }
        self.skip_to_eol();
        Ok(ParserState::Initial)
    }

    fn skip_to_eol(&mut self) {
        loop {
            match self.lexer.next_token() {
                Token::EndOfLine | Token::EndOfFile => break,
                _ => continue,
            }
        }
    }

    fn step_initial(&mut self) -> Result<ParserState, Error> {
        self.production.clear();
        match self.lexer.next_token() {
            Token::EndOfLine => Ok(ParserState::Initial),
            Token::EndOfFile => Ok(ParserState::Done),
            Token::Include => Ok(ParserState::Include),
            Token::LhsKeysym(ks) => {
                self.production.lhs.push(ks);
                Ok(ParserState::Lhs)
            }
            Token::Colon => {
                // a line with nothing before the `:` — the empty-left-hand-side case
                self.warn(ParseWarning::EmptyLhs);
                self.skip_to_eol();
                Ok(ParserState::Initial)
            }
            _ => self.abort_or_recover(),
        }
    }

    fn step_include(&mut self) -> Result<ParserState, Error> {
        match self.lexer.next_include_string_token() {
            Token::IncludeString(path) => Ok(ParserState::IncludeEol(path)),
            _ => self.abort_or_recover(),
        }
    }

    fn step_include_eol(
        &mut self,
        path: String,
        trie: &mut Trie,
        source: &dyn Source,
    ) -> Result<ParserState, Error> {
        match self.lexer.next_token() {
            Token::EndOfLine | Token::EndOfFile => {
                self.do_include(&path, trie, source)?;
                Ok(ParserState::Initial)
            }
            _ => self.abort_or_recover(),
        }
    }

    fn step_lhs(&mut self) -> Result<ParserState, Error> {
        match self.lexer.next_token() {
            Token::LhsKeysym(ks) => {
                if self.production.lhs.len() >= MAX_LHS_LEN {
                    self.warn(ParseWarning::LhsTooLong);
                    self.skip_to_eol();
                    return Ok(ParserState::Initial);
                }
                self.production.lhs.push(ks);
                Ok(ParserState::Lhs)
            }
            Token::Colon => {
                // `step_initial` only enters `Lhs` after pushing one keysym, so `lhs` is
                // never empty here.
                debug_assert!(!self.production.lhs.is_empty());
                Ok(ParserState::Rhs)
            }
            _ => self.abort_or_recover(),
        }
    }

    fn step_rhs(&mut self, trie: &mut Trie) -> Result<ParserState, Error> {
        match self.lexer.next_token() {
            Token::String(s) => {
                if self.production.string.is_some() {
                    self.warn(ParseWarning::DuplicateString);
                } else if s.is_empty() {
                    self.warn(ParseWarning::EmptyString);
                } else if s.len() > MAX_STRING_LEN {
                    self.warn(ParseWarning::StringTooLong);
                } else {
                    self.production.string = Some(s);
                }
                Ok(ParserState::Rhs)
            }
            Token::RhsKeysym(ks) => {
                if self.production.keysym.is_some() {
                    self.warn(ParseWarning::DuplicateRhsKeysym);
                } else {
                    self.production.keysym = Some(ks);
                }
                // A keysym on the right-hand side must be the last thing on the line.
                match self.lexer.next_token() {
                    Token::EndOfLine | Token::EndOfFile => {
                        self.finish_production(trie);
                        Ok(ParserState::Initial)
                    }
                    _ => self.abort_or_recover(),
                }
            }
            Token::EndOfLine | Token::EndOfFile => {
                if self.production.string.is_none() && self.production.keysym.is_none() {
                    self.warn(ParseWarning::MissingRhs);
                } else {
                    self.finish_production(trie);
                }
                Ok(ParserState::Initial)
            }
            _ => self.abort_or_recover(),
        }
    }

    fn finish_production(&mut self, trie: &mut Trie) {
        debug_assert!(!self.production.lhs.is_empty());
        if let Some(w) = trie.add_production(
            &self.production.lhs,
            self.production.string.as_deref(),
            self.production.keysym,
        ) {
            self.warn(w);
        }
        self.production.clear();
    }

    fn do_include(&mut self, raw_path: &str, trie: &mut Trie, source: &dyn Source) -> Result<(), Error> {
        if self.depth >= MAX_INCLUDE_DEPTH {
            return Err(Error::IncludeDepthExceeded(PathBuf::from(raw_path)));
        }
        let path = PathBuf::from(raw_path);
        let bytes = match source.read(&path) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("could not include {:?}: {e}", path);
                return Ok(());
            }
        };
        let mut child = Parser::new(&bytes, &self.locale, path);
        match child.run(trie, source, self.depth + 1) {
            Ok(()) => {
                self.warnings.extend(child.warnings);
                Ok(())
            }
            Err(e @ Error::IncludeDepthExceeded(_)) => Err(e),
            Err(_) => Ok(()),
        }
    }
}

/// Entry point used by [`super::loader`]: parses `buf` at include depth `0`.
pub(crate) fn parse(
    buf: &[u8],
    locale: &str,
    path: &Path,
    trie: &mut Trie,
    source: &dyn Source,
) -> Result<Vec<ParseWarning>, Error> {
    let mut parser = Parser::new(buf, locale, path.to_path_buf());
    parser.run(trie, source, 0)?;
    Ok(parser.into_warnings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::keysym::from_name;
    use crate::compose::source::{FsSource, MapSource};
    use std::collections::HashMap;

    fn ks(name: &str) -> Keysym {
        from_name(name).unwrap()
    }

    fn parse_ok(src: &[u8]) -> (Trie, Vec<ParseWarning>) {
        let mut trie = Trie::new();
        let warnings = parse(src, "C", Path::new("test.compose"), &mut trie, &FsSource).unwrap();
        (trie, warnings)
    }

    #[test]
    fn parses_a_simple_production() {
        let (trie, warnings) = parse_ok(b"<dead_tilde> <space> : \"~\" asciitilde\n");
        assert!(warnings.is_empty());
        let n1 = trie.node(trie.node(0).successor);
        assert_eq!(n1.keysym, ks("dead_tilde"));
        let n2 = trie.node(n1.successor);
        assert_eq!(n2.keysym, ks("space"));
        assert_eq!(trie.utf8_str(n2.utf8), "~");
        assert_eq!(n2.ks, ks("asciitilde"));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let (trie, warnings) = parse_ok(b"# comment\n\n<a> : \"a\"\n");
        assert!(warnings.is_empty());
        assert_ne!(trie.node(0).successor, 0);
    }

    #[test]
    fn string_only_rhs_with_no_keysym() {
        let (trie, warnings) = parse_ok(b"<a> <b> : \"ab\"\n");
        assert!(warnings.is_empty());
        let n1 = trie.node(trie.node(0).successor);
        let n2 = trie.node(n1.successor);
        assert_eq!(trie.utf8_str(n2.utf8), "ab");
        assert_eq!(n2.ks, Keysym::NoSymbol);
    }

    #[test]
    fn keysym_only_rhs_with_no_string() {
        let (trie, warnings) = parse_ok(b"<a> <b> : acute\n");
        assert!(warnings.is_empty());
        let n1 = trie.node(trie.node(0).successor);
        let n2_idx = n1.successor;
        let n2 = trie.node(n2_idx);
        assert_eq!(n2.utf8, 0);
    }

    #[test]
    fn empty_lhs_before_colon_is_skipped_not_fatal() {
        let (_trie, warnings) = parse_ok(b" : \"x\"\n<a> : \"a\"\n");
        assert_eq!(warnings, vec![ParseWarning::EmptyLhs]);
    }

    #[test]
    fn missing_rhs_is_warned_and_line_dropped() {
        let (trie, warnings) = parse_ok(b"<a>:\n<b> : \"b\"\n");
        assert_eq!(warnings, vec![ParseWarning::MissingRhs]);
        // only <b> made it into the trie
        let n1 = trie.node(trie.node(0).successor);
        assert_eq!(n1.keysym, ks("b"));
    }

    #[test]
    fn ten_consecutive_errors_abort_the_parse() {
        // a bare string literal is not a valid way to start a line — each one is one
        // "unexpected token" error in the `Initial` state
        let bad = "\"oops\"\n".repeat(11);
        let mut trie = Trie::new();
        let err = parse(bad.as_bytes(), "C", Path::new("t"), &mut trie, &FsSource).unwrap_err();
        assert!(matches!(err, Error::TooManyErrors(_, _)));
    }

    #[test]
    fn include_pulls_in_productions_from_another_file() {
        let mut map = HashMap::new();
        map.insert(
            PathBuf::from("/inc/a.compose"),
            b"<x> : \"X\"\n".to_vec(),
        );
        let source = MapSource(map);
        let mut trie = Trie::new();
        let warnings = parse(
            b"include \"/inc/a.compose\"\n<y> : \"Y\"\n",
            "C",
            Path::new("top"),
            &mut trie,
            &source,
        )
        .unwrap();
        assert!(warnings.is_empty());
        // two top-level sibling entries: x (from the include) and y
        let first = trie.node(0).successor;
        assert_eq!(trie.node(first).keysym, ks("x"));
        let second = trie.node(first).next;
        assert_eq!(trie.node(second).keysym, ks("y"));
    }

    #[test]
    fn missing_include_file_warns_but_is_not_fatal() {
        let source = MapSource(HashMap::new());
        let mut trie = Trie::new();
        let warnings = parse(
            b"include \"/nope\"\n<a> : \"a\"\n",
            "C",
            Path::new("top"),
            &mut trie,
            &source,
        )
        .unwrap();
        assert!(warnings.is_empty());
        assert_ne!(trie.node(0).successor, 0);
    }

    #[test]
    fn include_depth_exceeded_aborts_the_whole_parse() {
        let mut map = HashMap::new();
        for i in 0..6 {
            let body = format!("include \"/chain/{}\"\n", i + 1);
            map.insert(PathBuf::from(format!("/chain/{i}")), body.into_bytes());
        }
        map.insert(PathBuf::from("/chain/6"), b"<a> : \"a\"\n".to_vec());
        let source = MapSource(map);
        let mut trie = Trie::new();
        let err = parse(
            b"include \"/chain/0\"\n",
            "C",
            Path::new("top"),
            &mut trie,
            &source,
        )
        .unwrap_err();
        assert!(matches!(err, Error::IncludeDepthExceeded(_)));
    }
}
