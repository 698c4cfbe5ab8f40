use crate::render::value::lookup;
use crate::types::program::Var;
use crate::Value;

/// A chain of views used to resolve names.
///
/// Each section that renders its body against a value pushes a new link
/// whose parent is the enclosing context. Links borrow their values and live
/// on the call stack of the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    value: &'a Value,
    parent: Option<&'a Context<'a>>,
}

impl<'a> Context<'a> {
    /// Construct a root context with no parent.
    pub fn new(value: &'a Value) -> Self {
        Self {
            value,
            parent: None,
        }
    }

    /// Returns a child context of this one with the given view.
    pub fn push<'b>(&'b self, value: &'b Value) -> Context<'b> {
        Context {
            value,
            parent: Some(self),
        }
    }

    /// Resolves a variable.
    ///
    /// The implicit iterator `.` is the current view. The first segment of a
    /// dotted name is searched for up the chain, the remaining segments are
    /// resolved strictly against the previous result.
    pub fn resolve(&self, source: &str, var: &Var) -> Option<&'a Value> {
        if var.is_implicit() {
            return Some(self.value);
        }
        let (first, rest) = var.path.split_first()?;
        let value = self.find(&source[*first])?;
        rest.iter()
            .try_fold(value, |value, step| lookup(value, &source[*step]))
    }

    fn find(&self, key: &str) -> Option<&'a Value> {
        let mut ctx = Some(self);
        while let Some(c) = ctx {
            if let Some(value) = lookup(c.value, key) {
                return Some(value);
            }
            ctx = c.parent;
        }
        None
    }
}
