use crate::compile::lex::Lexer;
use crate::types::ast::{self, Kind, Name, Node, Token};
use crate::types::delimiter::Delimiter;
use crate::types::span::Span;
use crate::{Error, ErrorKind, Result};

/// A parser that constructs a tree from the lexer's token stream.
///
/// Parsing happens in three passes over the source:
/// - The lexer produces a flat token stream.
/// - Whitespace around standalone tags is squashed out of the stream.
/// - Sections are nested into a tree using an explicit stack.
pub struct Parser<'source> {
    source: &'source str,
    delimiter: Delimiter,
}

/// An open section waiting for its close tag, paired with the nodes
/// collected for its body so far.
struct Open {
    inverted: bool,
    name: Name,
    /// The span of the open tag.
    span: Span,
    body: ast::Scope,
}

impl<'source> Parser<'source> {
    /// Construct a new parser that starts with the given delimiter pair.
    pub fn new(source: &'source str, delimiter: Delimiter) -> Self {
        Self { source, delimiter }
    }

    /// Parses a template.
    pub fn parse_template(self) -> Result<ast::Template> {
        let (mut tokens, delimiter) = Lexer::new(self.source, self.delimiter.clone()).tokenize()?;
        self.squash(&mut tokens);
        let scope = self.nest(tokens)?;
        Ok(ast::Template { scope, delimiter })
    }

    /// Removes the whitespace surrounding standalone tags.
    ///
    /// The token stream is partitioned into lines at tokens that begin a
    /// source line. A line is standalone if it contains at least one
    /// standalone tag, no other tags, and only whitespace text. All text on a
    /// standalone line is removed. Partials on the line take the whitespace
    /// before them as their indentation.
    fn squash(&self, tokens: &mut Vec<Token>) {
        let mut remove = vec![false; tokens.len()];
        let mut start = 0;

        for i in 0..tokens.len() {
            if i + 1 < tokens.len() && !tokens[i + 1].bol {
                continue;
            }
            let line = start..i + 1;
            start = i + 1;

            if !self.is_standalone(&tokens[line.clone()]) {
                continue;
            }

            let mut indent = String::new();
            for (tk, remove) in tokens[line.clone()].iter_mut().zip(&mut remove[line]) {
                match &mut tk.kind {
                    Kind::Text => {
                        indent.push_str(&self.source[tk.span]);
                        *remove = true;
                    }
                    Kind::Partial(partial) => partial.indent.push_str(&indent),
                    _ => {}
                }
            }
        }

        let mut remove = remove.into_iter();
        tokens.retain(|_| !remove.next().unwrap_or(false));
    }

    fn is_standalone(&self, line: &[Token]) -> bool {
        line.iter().any(|tk| tk.kind.is_standalone())
            && line.iter().all(|tk| match tk.kind {
                Kind::Text => self.source[tk.span].chars().all(char::is_whitespace),
                ref kind => kind.is_standalone(),
            })
    }

    /// Folds section open and close tokens into a tree.
    fn nest(&self, tokens: Vec<Token>) -> Result<ast::Scope> {
        let mut root = ast::Scope::new();
        let mut open: Vec<Open> = Vec::new();

        for tk in tokens {
            let node = match tk.kind {
                Kind::Text => Node::Text(tk.span),
                Kind::Variable(name) => Node::Variable(name),
                Kind::Unescaped(name) => Node::Unescaped(name),
                Kind::Partial(partial) => Node::Partial(partial),

                // Comments and set delimiter tags produce no output, they
                // were only needed to find standalone lines.
                Kind::Comment | Kind::Delimiter(_) => continue,

                Kind::SectionOpen(name) | Kind::InvertedOpen(name) => {
                    open.push(Open {
                        inverted: matches!(tk.kind, Kind::InvertedOpen(_)),
                        name,
                        span: tk.span,
                        body: ast::Scope::new(),
                    });
                    continue;
                }

                // The end of a section. The close tag must match the
                // innermost open section, the body is everything between
                // the two tags.
                Kind::SectionClose(name) => {
                    let section = open
                        .pop()
                        .ok_or_else(|| self.err_unmatched_close(tk.span))?;
                    if self.source[section.name.span] != self.source[name.span] {
                        return Err(self.err_mismatched_close(&section, tk.span));
                    }
                    Node::Section(ast::Section {
                        inverted: section.inverted,
                        name: section.name,
                        body: section.body,
                        raw: Span::from(section.span.n..tk.span.m),
                    })
                }
            };

            match open.last_mut() {
                Some(section) => section.body.nodes.push(node),
                None => root.nodes.push(node),
            }
        }

        if let Some(section) = open.last() {
            let msg = format!("unclosed section `{}`", &self.source[section.name.span]);
            return Err(Error::syntax(
                ErrorKind::UnclosedSection,
                msg,
                self.source,
                section.span,
            ));
        }

        Ok(root)
    }

    fn err_unmatched_close(&self, span: Span) -> Error {
        Error::syntax(
            ErrorKind::UnmatchedSectionClose,
            "unexpected section close, no section is open",
            self.source,
            span,
        )
    }

    fn err_mismatched_close(&self, section: &Open, span: Span) -> Error {
        let msg = format!(
            "unexpected section close, expected `{}` to be closed first",
            &self.source[section.name.span]
        );
        Error::syntax(ErrorKind::MismatchedSectionClose, msg, self.source, span)
    }
}
