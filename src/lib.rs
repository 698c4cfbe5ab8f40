//! A logic-less Mustache template engine.
//!
//! # Features
//!
//! ### Syntax
//!
//! - Variables: `{{ user.name }}`, unescaped `{{{ html }}}` or `{{& html }}`
//! - Sections: `{{#users}} ... {{/users}}`
//! - Inverted sections: `{{^users}} no users {{/users}}`
//! - Partials: `{{> header }}`
//! - Comments: `{{! ignored }}`
//! - Set delimiter: `{{=<% %>=}}`
//! - Lambdas, callable values that produce template text
//!
//! ### Engine
//!
//! - Compiled templates and partials are cached in the engine
//! - Render to a [`String`] or any [`std::io::Write`] implementor
//! - Render using any [`serde`] serializable values
//! - Convenient macro for building views: `stache::value!{ name: "John", age: 42 }`
//! - Descriptive errors pointing at the offending tag
//!
//! # Getting started
//!
//! Your entry point is the [`Engine`] struct. The engine stores the default
//! delimiter pair, the partials, and caches compiled templates. Generally,
//! you only need to construct one engine during the lifetime of a program.
//!
//! ```
//! let engine = stache::Engine::new();
//! let result = engine.render("Hello {{ user.name }}!", stache::value! { user: { name: "John Smith" } })?;
//! assert_eq!(result, "Hello John Smith!");
//! # Ok::<(), stache::Error>(())
//! ```
//!
//! Rendering the same template text again reuses the compiled template.
//!
//! # Examples
//!
//! ### Render using structured data
//!
//! ```
//! #[derive(serde::Serialize)]
//! struct Context { users: Vec<User> }
//!
//! #[derive(serde::Serialize)]
//! struct User { name: String }
//!
//! let ctx = Context { users: vec![User { name: "John".into() }, User { name: "Jane".into() }] };
//!
//! let result = stache::Engine::new().render("{{#users}}<{{name}}>{{/users}}", &ctx)?;
//!
//! assert_eq!(result, "<John><Jane>");
//! # Ok::<(), stache::Error>(())
//! ```
//!
//! ### Render with partials
//!
//! ```
//! let engine = stache::Engine::new();
//! engine.add_partial("user", "<li>{{name}}</li>\n");
//!
//! let result = engine.render(
//!     "<ul>\n  {{#users}}\n  {{> user}}\n  {{/users}}\n</ul>\n",
//!     stache::value! { users: [{ name: "John" }, { name: "Jane" }] },
//! )?;
//!
//! assert_eq!(result, "<ul>\n  <li>John</li>\n  <li>Jane</li>\n</ul>\n");
//! # Ok::<(), stache::Error>(())
//! ```
//!
//! ### Render using a lambda
//!
//! Lambdas cannot be serialized so the view is built as a [`Value`] and
//! rendered with [`.render_from()`][Engine::render_from].
//!
//! ```
//! use stache::{value, Engine, Value};
//!
//! let view = value! {
//!     name: "Willy",
//!     wrapped: Value::section_lambda(|text| format!("<b>{text}</b>")),
//! };
//!
//! let result = Engine::new().render_from("{{#wrapped}}{{name}} is awesome.{{/wrapped}}", &view)?;
//!
//! assert_eq!(result, "<b>Willy is awesome.</b>");
//! # Ok::<(), stache::Error>(())
//! ```
//!
//! ### Render a template using custom delimiters
//!
//! ```
//! let engine = stache::Engine::with_delimiter(stache::Delimiter::new("<%", "%>"));
//! let result = engine.render("Hello <% user.name %>", stache::value! { user: { name: "John Smith" } })?;
//! assert_eq!(result, "Hello John Smith");
//! # Ok::<(), stache::Error>(())
//! ```
//!
//! ### Render a template to an `impl io::Write`
//!
//! ```
//! use std::io;
//!
//! let stdout = io::BufWriter::new(io::stdout());
//!
//! stache::Engine::new()
//!     .compile("Hello {{ user.name }}")?
//!     .render_to_writer(stdout, stache::value! { user: { name: "John Smith" } })?;
//! #
//! # Ok::<(), stache::Error>(())
//! ```

mod compile;
mod error;
mod fmt;
mod macros;
mod render;
mod types;
mod value;

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::Arc;

use parking_lot::RwLock;

pub use crate::error::{Error, ErrorKind};
pub use crate::fmt::escape_html;
pub use crate::types::delimiter::Delimiter;
#[cfg(feature = "serde")]
pub use crate::value::to_value;
pub use crate::value::{InterpolationFn, Lambda, List, Map, SectionFn, Value};

use crate::types::program;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The default maximum number of nested partials and lambda expansions.
const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

type Compiled = Arc<program::Template<'static>>;

/// The compilation and rendering engine.
///
/// The engine caches compiled templates keyed by their source text and
/// compiled partials keyed by name and indentation. All methods take
/// `&self`, so an engine can be shared between threads.
pub struct Engine {
    delimiter: Delimiter,
    max_include_depth: usize,
    partials: RwLock<BTreeMap<String, String>>,
    templates: RwLock<HashMap<String, Compiled>>,
    /// Compiled partials by name and then by indentation.
    compiled_partials: RwLock<HashMap<String, HashMap<String, Compiled>>>,
}

/// A compiled template.
///
/// Created using [`Engine::compile`]. The template is not stored in the
/// engine but partials are resolved through it.
pub struct Template<'engine, 'source> {
    engine: &'engine Engine,
    template: program::Template<'source>,
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Construct a new engine.
    #[inline]
    pub fn new() -> Self {
        Self::with_delimiter(Delimiter::default())
    }

    /// Construct a new engine with a custom default delimiter pair.
    ///
    /// Every template and partial starts parsing with this pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::{Delimiter, Engine};
    ///
    /// let engine = Engine::with_delimiter(Delimiter::new("<%", "%>"));
    /// ```
    #[inline]
    pub fn with_delimiter(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            partials: RwLock::new(BTreeMap::new()),
            templates: RwLock::new(HashMap::new()),
            compiled_partials: RwLock::new(HashMap::new()),
        }
    }

    /// Set the maximum number of nested partials and lambda expansions.
    ///
    /// Rendering fails with [`ErrorKind::MaxIncludeDepth`] once exceeded,
    /// this stops a partial that includes itself from recursing forever.
    ///
    /// Defaults to 64.
    #[inline]
    pub fn set_max_include_depth(&mut self, depth: usize) {
        self.max_include_depth = depth;
    }

    /// Add a partial to the engine.
    ///
    /// A partial with the same name is replaced.
    pub fn add_partial(&self, name: impl Into<String>, source: impl Into<String>) {
        let name = name.into();
        log::debug!("adding partial `{name}`");
        let mut partials = self.partials.write();
        self.compiled_partials.write().remove(&name);
        partials.insert(name, source.into());
    }

    /// Replace all partials in the engine.
    pub fn set_partials<I, K, V>(&self, partials: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let new: BTreeMap<String, String> = partials
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        log::debug!("replacing partials ({} entries)", new.len());
        let mut partials = self.partials.write();
        self.compiled_partials.write().clear();
        *partials = new;
    }

    /// Render a template to a string using the provided value.
    ///
    /// The compiled template is cached, rendering the same source again
    /// skips compilation.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn render<S>(&self, template: &str, view: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        let view = to_value(view)?;
        self.render_from(template, &view)
    }

    /// Render a template to a string using the provided [`Value`].
    #[inline]
    pub fn render_from(&self, template: &str, view: &Value) -> Result<String> {
        self.render_with_partials(template, view, None)
    }

    /// Render a template to a string, first replacing the partials if some
    /// are given.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// let engine = stache::Engine::new();
    /// let partials = BTreeMap::from([("p".to_owned(), "{{x}}".to_owned())]);
    /// let result = engine.render_with_partials("[{{>p}}]", &stache::value! { x: 1 }, Some(partials))?;
    /// assert_eq!(result, "[1]");
    /// # Ok::<(), stache::Error>(())
    /// ```
    pub fn render_with_partials(
        &self,
        template: &str,
        view: &Value,
        partials: Option<BTreeMap<String, String>>,
    ) -> Result<String> {
        if let Some(partials) = partials {
            self.set_partials(partials);
        }
        if template.is_empty() {
            return Ok(String::new());
        }
        let template = self.get_template(template)?;
        render::to_string(self, &template, view)
    }

    /// Compile a template.
    ///
    /// The template will not be cached in the engine.
    #[inline]
    pub fn compile<'source>(&self, source: &'source str) -> Result<Template<'_, 'source>> {
        let template = compile::template(Cow::Borrowed(source), &self.delimiter)?;
        Ok(Template {
            engine: self,
            template,
        })
    }

    /// Returns the compiled template for the given source, compiling and
    /// caching it if necessary.
    fn get_template(&self, source: &str) -> Result<Compiled> {
        if let Some(template) = self.templates.read().get(source) {
            return Ok(Arc::clone(template));
        }

        log::debug!("compiling template ({} bytes)", source.len());
        let template = compile::template(Cow::Owned(source.to_owned()), &self.delimiter)?;

        // Another thread may have compiled the same source in the meantime,
        // keep whichever was inserted first.
        let mut templates = self.templates.write();
        let template = templates
            .entry(source.to_owned())
            .or_insert_with(|| Arc::new(template));
        Ok(Arc::clone(template))
    }

    /// Returns the compiled partial for the given name and indentation,
    /// compiling and caching it if necessary.
    ///
    /// Returns `None` if there is no partial with the given name.
    pub(crate) fn get_partial(&self, name: &str, indent: &str) -> Result<Option<Compiled>> {
        if let Some(template) = self
            .compiled_partials
            .read()
            .get(name)
            .and_then(|by_indent| by_indent.get(indent))
        {
            return Ok(Some(Arc::clone(template)));
        }

        // The partial sources stay read locked until the compiled partial is
        // inserted so that a concurrent replacement can't be overwritten by
        // a stale entry.
        let partials = self.partials.read();
        let source = match partials.get(name) {
            Some(source) => source,
            None => {
                log::debug!("partial `{name}` not found");
                return Ok(None);
            }
        };

        log::debug!(
            "compiling partial `{name}` ({} bytes, indent {:?})",
            source.len(),
            indent
        );
        let text = if indent.is_empty() {
            source.clone()
        } else {
            indent_lines(source, indent)
        };
        let template = compile::template(Cow::Owned(text), &self.delimiter)?;

        let mut compiled = self.compiled_partials.write();
        let template = compiled
            .entry(name.to_owned())
            .or_default()
            .entry(indent.to_owned())
            .or_insert_with(|| Arc::new(template));
        Ok(Some(Arc::clone(template)))
    }
}

/// Prefixes every line of the text with the indentation.
fn indent_lines(text: &str, indent: &str) -> String {
    let mut s = String::with_capacity(text.len() + indent.len() * 4);
    for line in text.split_inclusive('\n') {
        s.push_str(indent);
        s.push_str(line);
    }
    s
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("delimiter", &self.delimiter)
            .field("max_include_depth", &self.max_include_depth)
            .field("partials", &self.partials.read().keys())
            .field("templates", &self.templates.read().len())
            .finish()
    }
}

impl<'engine, 'source> Template<'engine, 'source> {
    /// Render the template to a string using the provided value.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render<S>(&self, view: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        render::to_string(self.engine, &self.template, &to_value(view)?)
    }

    /// Render the template to a string using the provided [`Value`].
    #[inline]
    pub fn render_from(&self, view: &Value) -> Result<String> {
        render::to_string(self.engine, &self.template, view)
    }

    /// Render the template to a writer using the provided value.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[inline]
    pub fn render_to_writer<W, S>(&self, writer: W, view: S) -> Result<()>
    where
        W: io::Write,
        S: serde::Serialize,
    {
        render::to_writer(self.engine, &self.template, &to_value(view)?, writer)
    }

    /// Render the template to a writer using the provided [`Value`].
    #[inline]
    pub fn render_to_writer_from<W>(&self, writer: W, view: &Value) -> Result<()>
    where
        W: io::Write,
    {
        render::to_writer(self.engine, &self.template, view, writer)
    }

    /// Returns the original template source.
    #[inline]
    pub fn source(&self) -> &str {
        &self.template.source
    }
}

impl std::fmt::Debug for Template<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("engine", &self.engine)
            .field("template", &self.template)
            .finish()
    }
}
