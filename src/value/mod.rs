//! Defines the [`Value`] enum, representing any valid renderable data.

mod from;
#[cfg(feature = "serde")]
mod ser;

pub use std::collections::BTreeMap as Map;
use std::fmt;
use std::mem;
use std::sync::Arc;
pub use std::vec::Vec as List;

#[cfg(feature = "serde")]
pub use crate::value::ser::to_value;

/// Data to be rendered represented as a recursive enum.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(List<Value>),
    Map(Map<String, Value>),
    Lambda(Lambda),
}

/// A callable value that produces template text when rendered.
///
/// The text returned by a lambda is compiled and rendered against the
/// current context, so it may contain tags itself.
#[derive(Clone)]
pub enum Lambda {
    /// Called with no arguments, e.g. for `{{name}}`.
    Interpolation(Arc<InterpolationFn>),
    /// Called with the raw text of the section body, e.g. for
    /// `{{#name}}body{{/name}}`.
    Section(Arc<SectionFn>),
}

/// A lambda function called in variable position.
pub type InterpolationFn = dyn Fn() -> String + Send + Sync + 'static;

/// A lambda function called with the raw section body.
pub type SectionFn = dyn Fn(&str) -> String + Send + Sync + 'static;

impl Value {
    /// Construct a lambda value that takes no arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::{value, Engine, Value};
    ///
    /// let view = value! { name: "World", greet: Value::lambda(|| "Hello {{name}}!".into()) };
    /// let result = Engine::new().render_from("{{greet}}", &view)?;
    /// assert_eq!(result, "Hello World!");
    /// # Ok::<(), stache::Error>(())
    /// ```
    pub fn lambda<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Lambda(Lambda::Interpolation(Arc::new(f)))
    }

    /// Construct a lambda value that is passed the raw section body.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::{value, Engine, Value};
    ///
    /// let view = value! { bold: Value::section_lambda(|text| format!("<b>{text}</b>")) };
    /// let result = Engine::new().render_from("{{#bold}}Hi{{/bold}}", &view)?;
    /// assert_eq!(result, "<b>Hi</b>");
    /// # Ok::<(), stache::Error>(())
    /// ```
    pub fn section_lambda<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Lambda(Lambda::Section(Arc::new(f)))
    }
}

impl Lambda {
    /// Calls the lambda, passing `text` only to section lambdas.
    pub(crate) fn call(&self, text: &str) -> String {
        match self {
            Self::Interpolation(f) => f(),
            Self::Section(f) => f(text),
        }
    }

    fn as_ptr(&self) -> *const () {
        match self {
            Self::Interpolation(f) => Arc::as_ptr(f) as *const (),
            Self::Section(f) => Arc::as_ptr(f) as *const (),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Self::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
            Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Self::Lambda(lambda) => f.debug_tuple("Lambda").field(lambda).finish(),
        }
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interpolation(_) => f.write_str("Interpolation(..)"),
            Self::Section(_) => f.write_str("Section(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(s), Self::Bool(o)) => s == o,
            (Self::Integer(s), Self::Integer(o)) => s == o,
            (Self::Float(s), Self::Float(o)) => s == o,
            (Self::String(s), Self::String(o)) => s == o,
            (Self::List(s), Self::List(o)) => s == o,
            (Self::Map(s), Self::Map(o)) => s == o,
            (Self::Lambda(s), Self::Lambda(o)) => s.as_ptr() == o.as_ptr(),
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}
