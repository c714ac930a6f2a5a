//! Tokenises a Compose source buffer, and expands `%`-escapes inside `include` path strings.

use super::error::ParseWarning;
use super::keysym::{self, Keysym};
use super::paths;
use super::scanner::Scanner;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    EndOfLine,
    EndOfFile,
    Include,
    IncludeString(String),
    LhsKeysym(Keysym),
    Colon,
    String(String),
    RhsKeysym(Keysym),
    Error,
}

pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    locale: String,
    pub warnings: Vec<ParseWarning>,
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_cont(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8], locale: &str) -> Self {
        Lexer {
            scanner: Scanner::new(buf),
            locale: locale.to_string(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.scanner.token_line()
    }

    fn warn(&mut self, w: ParseWarning) {
        log::warn!("{} at line {}", w, self.scanner.token_line());
        self.warnings.push(w);
    }

    /// Skips horizontal whitespace and `#`-comments, stopping just before a newline or EOF.
    fn skip_trivia(&mut self) {
        loop {
            match self.scanner.peek() {
                Some(b' ' | b'\t' | b'\r') => {
                    self.scanner.next();
                }
                Some(b'#') => {
                    while !self.scanner.eol() {
                        self.scanner.next();
                    }
                }
                _ => break,
            }
        }
    }

    /// Lexes one token in the normal (production) grammar.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.scanner.mark_token_start();

        let Some(b) = self.scanner.peek() else {
            return Token::EndOfFile;
        };

        match b {
            b'\n' => {
                self.scanner.next();
                Token::EndOfLine
            }
            b'<' => self.lex_lhs_keysym(),
            b':' => {
                self.scanner.next();
                Token::Colon
            }
            b'"' => self.lex_string(false),
            _ if is_name_start(b) => self.lex_bareword(),
            _ => self.recover_unexpected_char(),
        }
    }

    /// Lexes the one token expected right after `INCLUDE`: a quoted path with `%` expansion.
    pub fn next_include_string_token(&mut self) -> Token {
        self.skip_trivia();
        self.scanner.mark_token_start();
        match self.scanner.peek() {
            Some(b'"') => match self.lex_string(true) {
                Token::String(s) => Token::IncludeString(s),
                other => other,
            },
            Some(b'\n') => {
                self.scanner.next();
                Token::EndOfLine
            }
            None => Token::EndOfFile,
            _ => self.recover_unexpected_char(),
        }
    }

    fn recover_unexpected_char(&mut self) -> Token {
        while !self.scanner.eol() {
            self.scanner.next();
        }
        Token::Error
    }

    fn lex_lhs_keysym(&mut self) -> Token {
        self.scanner.next(); // consume '<'
        self.scanner.buf_clear();
        loop {
            match self.scanner.peek() {
                Some(b'>') => {
                    self.scanner.next();
                    break;
                }
                Some(_) if self.scanner.eol() => {
                    self.warn(ParseWarning::UnterminatedString);
                    return self.recover_unexpected_char();
                }
                Some(b) => {
                    if !self.scanner.buf_append(b) {
                        self.warn(ParseWarning::BufferOverflow);
                        return self.recover_unexpected_char();
                    }
                    self.scanner.next();
                }
                None => {
                    self.warn(ParseWarning::UnterminatedString);
                    return Token::Error;
                }
            }
        }
        let name = String::from_utf8_lossy(self.scanner.buf_as_bytes()).into_owned();
        match keysym::from_name(&name) {
            Some(ks) => Token::LhsKeysym(ks),
            None => {
                self.warn(ParseWarning::UnknownKeysym(name));
                Token::Error
            }
        }
    }

    fn lex_bareword(&mut self) -> Token {
        self.scanner.buf_clear();
        while let Some(b) = self.scanner.peek() {
            if !is_name_cont(b) {
                break;
            }
            self.scanner.buf_append(b);
            self.scanner.next();
        }
        let name = String::from_utf8_lossy(self.scanner.buf_as_bytes()).into_owned();
        if name == "include" {
            return Token::Include;
        }
        match keysym::from_name(&name) {
            Some(ks) => Token::RhsKeysym(ks),
            None => {
                self.warn(ParseWarning::UnknownKeysym(name));
                Token::Error
            }
        }
    }

    /// Shared quoted-string scanner. When `expand_percent` is set, also understands
    /// `%%`/`%H`/`%L`/`%S` (the `include`-string grammar); an unknown `%c` is a hard error.
    fn lex_string(&mut self, expand_percent: bool) -> Token {
        self.scanner.next(); // consume opening quote
        self.scanner.buf_clear();
        loop {
            match self.scanner.peek() {
                None => {
                    self.warn(ParseWarning::UnterminatedString);
                    return Token::Error;
                }
                Some(b'\n') => {
                    self.warn(ParseWarning::UnterminatedString);
                    return Token::Error;
                }
                Some(b'"') => {
                    self.scanner.next();
                    break;
                }
                Some(b'\\') => {
                    self.scanner.next();
                    if !self.lex_escape() {
                        return Token::Error;
                    }
                }
                Some(b'%') if expand_percent => {
                    self.scanner.next();
                    if !self.lex_percent_expansion() {
                        return Token::Error;
                    }
                }
                Some(b) => {
                    if !self.scanner.buf_append(b) {
                        self.warn(ParseWarning::BufferOverflow);
                        return self.recover_unexpected_char();
                    }
                    self.scanner.next();
                }
            }
        }
        match std::str::from_utf8(self.scanner.buf_as_bytes()) {
            Ok(s) => Token::String(s.to_string()),
            Err(_) => {
                self.warn(ParseWarning::InvalidUtf8);
                Token::Error
            }
        }
    }

    /// Handles one `\...` escape already past the backslash. Returns `false` on a fatal error
    /// (buffer overflow or unterminated literal); an unknown escape just warns and drops.
    fn lex_escape(&mut self) -> bool {
        match self.scanner.peek() {
            Some(b'\\') => {
                self.scanner.next();
                self.scanner.buf_append(b'\\')
            }
            Some(b'"') => {
                self.scanner.next();
                self.scanner.buf_append(b'"')
            }
            Some(b'x' | b'X') => {
                self.scanner.next();
                match self.scanner.hex() {
                    Some(byte) => self.scanner.buf_append(byte),
                    None => {
                        self.warn(ParseWarning::UnknownEscape('x'));
                        true
                    }
                }
            }
            Some(b'0'..=b'7') => match self.scanner.oct() {
                Some(byte) => self.scanner.buf_append(byte),
                None => true,
            },
            Some(c) => {
                self.warn(ParseWarning::UnknownEscape(c as char));
                self.scanner.next();
                true
            }
            None => {
                self.warn(ParseWarning::UnterminatedString);
                false
            }
        }
    }

    /// Handles one `%...` expansion already past the `%`. Returns `false` on fatal error.
    fn lex_percent_expansion(&mut self) -> bool {
        match self.scanner.peek() {
            Some(b'%') => {
                self.scanner.next();
                self.scanner.buf_append(b'%')
            }
            Some(b'H') => {
                self.scanner.next();
                match paths::home_path() {
                    Some(home) => self.scanner.buf_appends(&home.to_string_lossy()),
                    None => {
                        self.warn(ParseWarning::UnknownEscape('H'));
                        false
                    }
                }
            }
            Some(b'L') => {
                self.scanner.next();
                let path = paths::locale_compose_file_path(&self.locale);
                self.scanner.buf_appends(&path.to_string_lossy())
            }
            Some(b'S') => {
                self.scanner.next();
                let path = paths::xlocaledir_path();
                self.scanner.buf_appends(&path.to_string_lossy())
            }
            Some(c) => {
                self.warn(ParseWarning::UnknownEscape(c as char));
                self.scanner.next();
                false
            }
            None => {
                self.warn(ParseWarning::UnterminatedString);
                false
            }
        }
    }
}
