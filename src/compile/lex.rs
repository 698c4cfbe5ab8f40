use std::borrow::Cow;

use crate::compile::scan::Scanner;
use crate::types::ast::{Kind, Name, Partial, Token};
use crate::types::delimiter::Delimiter;
use crate::types::span::Span;
use crate::{Error, ErrorKind, Result};

/// A lexer that chunks the template source into a flat stream of text and
/// tag tokens.
///
/// Newlines always terminate a text token so that every token knows whether
/// it begins a source line. The parser relies on this to find standalone
/// tags.
pub struct Lexer<'source> {
    /// The original template source.
    pub source: &'source str,

    /// A cursor over the template source.
    scanner: Scanner<'source>,

    /// The live delimiter pair, updated by set delimiter tags.
    delimiter: Delimiter,

    /// The start of the pending text token.
    start: usize,

    /// The start of the current source line.
    bol: usize,

    tokens: Vec<Token>,
}

/// The type of tag, determined by the character after the left delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Variable,
    Unescaped,
    Triple,
    SectionOpen,
    InvertedOpen,
    SectionClose,
    Partial,
    Comment,
    Delimiter,
}

impl<'source> Lexer<'source> {
    /// Construct a new lexer that starts with the given delimiter pair.
    pub fn new(source: &'source str, delimiter: Delimiter) -> Self {
        Self {
            source,
            scanner: Scanner::new(source),
            delimiter,
            start: 0,
            bol: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenizes the entire source.
    ///
    /// Returns the tokens and the delimiter pair in effect at the end of the
    /// source.
    pub fn tokenize(mut self) -> Result<(Vec<Token>, Delimiter)> {
        while !self.scanner.is_eof() {
            let i = self.scanner.pos();
            if i == 0 || self.scanner.peek(-1) == Some(b'\n') {
                self.bol = i;
            }

            if self.scanner.peek(0) == Some(b'\n') {
                self.push_text(i + 1);
                self.scanner.seek(1);
            } else if self.scanner.starts_with(&self.delimiter.left) {
                self.push_text(i);
                self.lex_tag()?;
            } else {
                self.scanner.seek(1);
            }
        }
        self.push_text(self.source.len());
        Ok((self.tokens, self.delimiter))
    }

    fn push_text(&mut self, end: usize) {
        if self.start < end {
            self.tokens.push(Token {
                kind: Kind::Text,
                span: Span::from(self.start..end),
                bol: self.start == self.bol,
            });
        }
        self.start = end;
    }

    fn lex_tag(&mut self) -> Result<()> {
        // The scanner is positioned at the left delimiter. The following
        // diagram helps describe the variable naming.
        //
        // xxxx{{#xxxxxx}}xxxx
        //     ^  ^     ^ ^
        //     i  j     k n

        let i = self.scanner.pos();
        self.scanner.seek(self.delimiter.left.len());

        let marker = self.scanner.peek(0);
        let tag = Tag::from_marker(marker);
        if tag != Tag::Variable {
            self.scanner.seek(1);
        }
        let j = self.scanner.pos();

        let right = self.delimiter.right.as_str();
        let end: Cow<'_, str> = match tag {
            Tag::Triple => Cow::Owned(format!("}}{right}")),
            Tag::Delimiter => Cow::Owned(format!("={right}")),
            _ => Cow::Borrowed(right),
        };
        let body = match self.scanner.read_until_just_before(&end) {
            Some(body) => body,
            None => return Err(self.err_unclosed_tag(i, &end)),
        };
        let k = self.scanner.pos();
        self.scanner.seek(end.len());
        let n = self.scanner.pos();

        let span = Span::from(i..n);
        let name = Name {
            span: trim(self.source, j, k),
        };
        let kind = match tag {
            Tag::Variable => Kind::Variable(name),
            Tag::Unescaped | Tag::Triple => Kind::Unescaped(name),
            Tag::SectionOpen => Kind::SectionOpen(name),
            Tag::InvertedOpen => Kind::InvertedOpen(name),
            Tag::SectionClose => Kind::SectionClose(name),
            Tag::Partial => Kind::Partial(Partial {
                name,
                indent: String::new(),
            }),
            Tag::Comment => Kind::Comment,
            Tag::Delimiter => {
                let delimiter = Delimiter::parse(body)
                    .ok_or_else(|| self.err_invalid_delimiter(span))?;
                self.delimiter = delimiter.clone();
                Kind::Delimiter(delimiter)
            }
        };

        self.tokens.push(Token {
            kind,
            span,
            bol: i == self.bol,
        });
        self.start = n;
        Ok(())
    }

    fn err_unclosed_tag(&self, i: usize, end: &str) -> Error {
        let span = Span::from(i..i + self.delimiter.left.len());
        let msg = format!("unclosed tag, expected `{end}`");
        Error::syntax(ErrorKind::UnclosedTag, msg, self.source, span)
    }

    fn err_invalid_delimiter(&self, span: Span) -> Error {
        Error::syntax(
            ErrorKind::InvalidDelimiter,
            "invalid set delimiter tag, expected two markers separated by whitespace",
            self.source,
            span,
        )
    }
}

impl Tag {
    fn from_marker(c: Option<u8>) -> Self {
        match c {
            Some(b'#') => Self::SectionOpen,
            Some(b'^') => Self::InvertedOpen,
            Some(b'/') => Self::SectionClose,
            Some(b'&') => Self::Unescaped,
            Some(b'{') => Self::Triple,
            Some(b'>') => Self::Partial,
            Some(b'!') => Self::Comment,
            Some(b'=') => Self::Delimiter,
            _ => Self::Variable,
        }
    }
}

/// Returns the span of `source[m..n]` without surrounding whitespace.
fn trim(source: &str, m: usize, n: usize) -> Span {
    let s = &source[m..n];
    let start = m + (s.len() - s.trim_start().len());
    Span::from(start..start + s.trim().len())
}
