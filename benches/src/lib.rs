pub mod context;
#[cfg(test)]
mod tests;

use std::collections::HashMap;

/// Abstraction for a template engine.
pub trait Engine<'a> {
    fn name() -> &'static str;
    fn new() -> Self;
    fn add_template(&mut self, name: &'static str, source: &'a str);
    fn render<S>(&self, name: &'static str, ctx: &S) -> String
    where
        S: serde::Serialize;
}

////////////////////////////////////////////////////////////////////////////////
/// handlebars
////////////////////////////////////////////////////////////////////////////////

pub type Handlebars<'engine> = handlebars::Handlebars<'engine>;

impl<'engine> Engine<'engine> for Handlebars<'engine> {
    #[inline]
    fn name() -> &'static str {
        "handlebars"
    }

    #[inline]
    fn new() -> Self {
        handlebars::Handlebars::new()
    }

    #[inline]
    fn add_template(&mut self, name: &'static str, source: &'engine str) {
        self.register_template_string(name, source).unwrap();
    }

    #[inline]
    fn render<S>(&self, name: &'static str, ctx: &S) -> String
    where
        S: serde::Serialize,
    {
        self.render(name, ctx).unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////
/// stache
////////////////////////////////////////////////////////////////////////////////

/// The engine caches compiled templates by source text, so named templates
/// are just a lookup of the source.
pub struct Stache<'engine> {
    engine: stache::Engine,
    sources: HashMap<&'static str, &'engine str>,
}

impl<'engine> Engine<'engine> for Stache<'engine> {
    #[inline]
    fn name() -> &'static str {
        "stache"
    }

    #[inline]
    fn new() -> Self {
        Self {
            engine: stache::Engine::new(),
            sources: HashMap::new(),
        }
    }

    #[inline]
    fn add_template(&mut self, name: &'static str, source: &'engine str) {
        self.engine.compile(source).unwrap();
        self.sources.insert(name, source);
    }

    #[inline]
    fn render<S>(&self, name: &'static str, ctx: &S) -> String
    where
        S: serde::Serialize,
    {
        self.engine.render(self.sources[name], ctx).unwrap()
    }
}
