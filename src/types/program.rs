//! Defines a compiled [`Template`] which is a tree of [`Instr`] that can be
//! executed by the renderer.

use std::borrow::Cow;

use crate::types::delimiter::Delimiter;
use crate::types::span::Span;

pub struct Template<'source> {
    pub source: Cow<'source, str>,
    /// The delimiter pair in effect at the end of the source, used when
    /// compiling lambda output.
    pub delimiter: Delimiter,
    pub instrs: Vec<Instr>,
}

#[derive(Debug)]
pub enum Instr {
    /// Emit raw template
    EmitRaw(Span),

    /// Lookup a variable and emit it HTML escaped
    Emit(Var),

    /// Lookup a variable and emit it as is
    EmitUnescaped(Var),

    /// Render the body for each element or once for a truthy value
    Section(Block),

    /// Render the body if the value is falsey
    Inverted(Block),

    /// Render a partial using the current context
    Include(Include),
}

#[derive(Debug)]
pub struct Block {
    pub var: Var,
    pub body: Vec<Instr>,
    /// The raw body text, passed to section lambdas.
    pub raw: Span,
}

#[derive(Debug)]
pub struct Var {
    /// Each segment of a dotted name, empty for the implicit iterator `.`.
    pub path: Vec<Span>,
    pub span: Span,
}

#[derive(Debug)]
pub struct Include {
    pub name: String,
    pub indent: String,
}

impl Var {
    pub fn is_implicit(&self) -> bool {
        self.path.is_empty()
    }
}

impl std::fmt::Debug for Template<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<compiled>")
    }
}
