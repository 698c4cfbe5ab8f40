//! The flat token stream produced by the lexer and the tree that the parser
//! folds it into.

use crate::types::delimiter::Delimiter;
use crate::types::span::Span;

/// A single token in the flat stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: Kind,
    /// The full span of the token including any tag markers.
    pub span: Span,
    /// Whether the token starts at the beginning of a source line.
    pub bol: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Raw template text, `span` covers it exactly.
    Text,
    /// `{{name}}`
    Variable(Name),
    /// `{{{name}}}` or `{{&name}}`
    Unescaped(Name),
    /// `{{#name}}`
    SectionOpen(Name),
    /// `{{^name}}`
    InvertedOpen(Name),
    /// `{{/name}}`, consumed while nesting.
    SectionClose(Name),
    /// `{{>name}}`
    Partial(Partial),
    /// `{{!comment}}`
    Comment,
    /// `{{=<% %>=}}`
    Delimiter(Delimiter),
}

/// A tag body, trimmed of surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partial {
    pub name: Name,
    /// Leading whitespace of a standalone partial tag line.
    pub indent: String,
}

#[derive(Debug)]
pub struct Template {
    pub scope: Scope,
    /// The delimiter pair in effect at the end of the source.
    pub delimiter: Delimiter,
}

#[derive(Debug, Default)]
pub struct Scope {
    pub nodes: Vec<Node>,
}

#[derive(Debug)]
pub enum Node {
    Text(Span),
    Variable(Name),
    Unescaped(Name),
    Section(Section),
    Partial(Partial),
}

#[derive(Debug)]
pub struct Section {
    pub inverted: bool,
    pub name: Name,
    pub body: Scope,
    /// The raw text between the open and the close tag.
    pub raw: Span,
}

impl Kind {
    /// Whether a line containing only this tag and whitespace is standalone.
    pub fn is_standalone(&self) -> bool {
        matches!(
            self,
            Self::SectionOpen(_)
                | Self::InvertedOpen(_)
                | Self::SectionClose(_)
                | Self::Partial(_)
                | Self::Comment
                | Self::Delimiter(_)
        )
    }
}

impl Scope {
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }
}
