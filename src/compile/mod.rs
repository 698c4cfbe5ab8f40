//! Compile the template into a program that can be executed by the renderer.
//!
//! This process has three stages:
//! - The lexer chunks the template source into tokens.
//! - The parser squashes standalone lines and constructs an AST from the
//!   token stream.
//! - The compiler takes the AST and constructs the program.

mod lex;
mod parse;
mod scan;

use std::borrow::Cow;

use crate::types::ast;
use crate::types::delimiter::Delimiter;
use crate::types::program::{Block, Include, Instr, Template, Var};
use crate::types::span::Span;
use crate::Result;

/// Compile a template into a program.
///
/// Parsing starts with the given delimiter pair, the returned template
/// records the pair in effect at the end of the source.
pub fn template<'source>(
    source: Cow<'source, str>,
    delimiter: &Delimiter,
) -> Result<Template<'source>> {
    let ast = parse::Parser::new(&source, delimiter.clone()).parse_template()?;
    let instrs = Compiler::new(&source).compile_scope(ast.scope);
    Ok(Template {
        source,
        delimiter: ast.delimiter,
        instrs,
    })
}

/// A compiler that constructs a program from an AST.
struct Compiler<'source> {
    source: &'source str,
}

impl<'source> Compiler<'source> {
    fn new(source: &'source str) -> Self {
        Self { source }
    }

    fn compile_scope(&self, scope: ast::Scope) -> Vec<Instr> {
        let mut instrs = Vec::with_capacity(scope.nodes.len());
        for node in scope.nodes {
            let instr = match node {
                ast::Node::Text(span) => {
                    // Adjacent text is split at newlines by the lexer, join
                    // it back together where nothing was removed in between.
                    if let Some(Instr::EmitRaw(prev)) = instrs.last_mut() {
                        if prev.n == span.m {
                            *prev = prev.combine(span);
                            continue;
                        }
                    }
                    Instr::EmitRaw(span)
                }

                ast::Node::Variable(name) => Instr::Emit(self.compile_var(name)),

                ast::Node::Unescaped(name) => Instr::EmitUnescaped(self.compile_var(name)),

                ast::Node::Section(ast::Section {
                    inverted,
                    name,
                    body,
                    raw,
                }) => {
                    let block = Block {
                        var: self.compile_var(name),
                        body: self.compile_scope(body),
                        raw,
                    };
                    if inverted {
                        Instr::Inverted(block)
                    } else {
                        Instr::Section(block)
                    }
                }

                ast::Node::Partial(ast::Partial { name, indent }) => Instr::Include(Include {
                    name: self.source[name.span].to_owned(),
                    indent,
                }),
            };
            instrs.push(instr);
        }
        instrs
    }

    /// Splits a dotted name into the span of each segment.
    fn compile_var(&self, name: ast::Name) -> Var {
        let raw = &self.source[name.span];
        if raw == "." {
            return Var {
                path: Vec::new(),
                span: name.span,
            };
        }

        let mut m = name.span.m;
        let path = raw
            .split('.')
            .map(|segment| {
                let span = Span::from(m..m + segment.len());
                m = span.n + 1;
                span
            })
            .collect();
        Var {
            path,
            span: name.span,
        }
    }
}
