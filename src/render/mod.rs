mod context;
mod core;
mod value;

use std::io;

use crate::fmt::{Formatter, Writer};
use crate::render::context::Context;
use crate::render::core::RendererImpl;
use crate::types::program::Template;
use crate::{Engine, Error, Result, Value};

/// Render the template to a string.
pub(crate) fn to_string(engine: &Engine, template: &Template<'_>, view: &Value) -> Result<String> {
    let mut s = String::with_capacity(template.source.len());
    let mut f = Formatter::with_string(&mut s);
    renderer(engine).render(&mut f, template, &Context::new(view))?;
    Ok(s)
}

/// Render the template to the given writer.
pub(crate) fn to_writer<W>(
    engine: &Engine,
    template: &Template<'_>,
    view: &Value,
    writer: W,
) -> Result<()>
where
    W: io::Write,
{
    let mut w = Writer::new(writer);
    let mut f = Formatter::with_writer(&mut w);
    renderer(engine)
        .render(&mut f, template, &Context::new(view))
        .map_err(|err| w.take_err().map(Error::from).unwrap_or(err))
}

fn renderer(engine: &Engine) -> RendererImpl<'_> {
    RendererImpl {
        engine,
        max_include_depth: engine.max_include_depth,
    }
}
