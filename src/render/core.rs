use std::borrow::Cow;
use std::fmt::Write;

use crate::compile;
use crate::fmt::{escape_html, scalar, Formatter};
use crate::render::context::Context;
use crate::types::program::{Include, Instr, Template, Var};
use crate::{Engine, Error, Result, Value};

/// Interprets a compiled template against a context.
///
/// The instruction tree is walked recursively. Sections recurse into their
/// body with a child context, partials and lambdas recurse into a separately
/// compiled template. The depth counts the nested partials and lambdas and
/// is bounded by the engine's maximum include depth.
pub struct RendererImpl<'render> {
    pub(crate) engine: &'render Engine,
    pub(crate) max_include_depth: usize,
}

impl RendererImpl<'_> {
    pub(crate) fn render(
        &self,
        f: &mut Formatter<'_>,
        template: &Template<'_>,
        ctx: &Context<'_>,
    ) -> Result<()> {
        self.render_instrs(f, template, &template.instrs, ctx, 0)
    }

    fn render_instrs(
        &self,
        f: &mut Formatter<'_>,
        t: &Template<'_>,
        instrs: &[Instr],
        ctx: &Context<'_>,
        depth: usize,
    ) -> Result<()> {
        for instr in instrs {
            match instr {
                Instr::EmitRaw(span) => {
                    // We don't need to enrich this error because it can only
                    // fail because of an IO error.
                    f.write_str(&t.source[*span])?;
                }

                Instr::Emit(var) => {
                    self.render_var(f, t, var, ctx, depth, true)?;
                }

                Instr::EmitUnescaped(var) => {
                    self.render_var(f, t, var, ctx, depth, false)?;
                }

                Instr::Section(block) => match ctx.resolve(&t.source, &block.var) {
                    Some(Value::Lambda(lambda)) => {
                        let text = lambda.call(&t.source[block.raw]);
                        self.render_lambda(f, t, &text, ctx, depth)?;
                    }
                    Some(Value::List(list)) => {
                        for item in list {
                            self.render_instrs(f, t, &block.body, &ctx.push(item), depth)?;
                        }
                    }
                    Some(value) if !value.is_falsey() => {
                        self.render_instrs(f, t, &block.body, &ctx.push(value), depth)?;
                    }
                    _ => {}
                },

                Instr::Inverted(block) => {
                    let falsey = ctx
                        .resolve(&t.source, &block.var)
                        .map_or(true, Value::is_falsey);
                    if falsey {
                        self.render_instrs(f, t, &block.body, ctx, depth)?;
                    }
                }

                Instr::Include(include) => {
                    self.render_include(f, include, ctx, depth)?;
                }
            }
        }
        Ok(())
    }

    fn render_var(
        &self,
        f: &mut Formatter<'_>,
        t: &Template<'_>,
        var: &Var,
        ctx: &Context<'_>,
        depth: usize,
        escape: bool,
    ) -> Result<()> {
        let value = match ctx.resolve(&t.source, var) {
            Some(Value::Lambda(lambda)) => {
                let text = lambda.call("");
                let mut s = String::new();
                self.render_lambda(&mut Formatter::with_string(&mut s), t, &text, ctx, depth)?;
                if escape {
                    escape_html(f, &s)?;
                } else {
                    f.write_str(&s)?;
                }
                return Ok(());
            }
            Some(value) if !value.is_falsey() => value,
            _ => return Ok(()),
        };

        let ok = match value {
            Value::String(s) if escape => {
                escape_html(f, s)?;
                true
            }
            value => scalar(f, value)?,
        };
        if !ok {
            let msg = format!(
                "expected renderable value, but expression evaluated to {}",
                value.human()
            );
            return Err(Error::format(msg, &t.source, var.span));
        }
        Ok(())
    }

    /// Compiles the text returned by a lambda and renders it against the
    /// current context.
    ///
    /// The text is parsed with the delimiter pair in effect at the end of the
    /// enclosing template.
    fn render_lambda(
        &self,
        f: &mut Formatter<'_>,
        t: &Template<'_>,
        text: &str,
        ctx: &Context<'_>,
        depth: usize,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let depth = self.enter(depth)?;
        log::trace!("expanding lambda output ({} bytes)", text.len());
        let template = compile::template(Cow::Borrowed(text), &t.delimiter)?;
        self.render_instrs(f, &template, &template.instrs, ctx, depth)
    }

    fn render_include(
        &self,
        f: &mut Formatter<'_>,
        include: &Include,
        ctx: &Context<'_>,
        depth: usize,
    ) -> Result<()> {
        let template = match self
            .engine
            .get_partial(&include.name, &include.indent)
            .map_err(|err| err.with_partial_name(&include.name))?
        {
            Some(template) => template,
            None => return Ok(()),
        };
        let depth = self.enter(depth)?;
        self.render_instrs(f, &template, &template.instrs, ctx, depth)
            .map_err(|err| err.in_partial(&include.name, &template.source))
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        if depth >= self.max_include_depth {
            return Err(Error::max_include_depth(self.max_include_depth));
        }
        Ok(depth + 1)
    }
}
