/// A pair of tag markers, `{{` and `}}` by default.
///
/// Templates can redefine the pair part way through using a set delimiter
/// tag, e.g. `{{=<% %>=}}`. An engine can also be constructed with a
/// different default pair using [`Engine::with_delimiter`][crate::Engine::with_delimiter].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiter {
    pub(crate) left: String,
    pub(crate) right: String,
}

impl Default for Delimiter {
    /// Returns the default delimiter pair.
    ///
    /// This is equivalent to the following.
    /// ```
    /// use stache::Delimiter;
    ///
    /// assert_eq!(Delimiter::new("{{", "}}"), Delimiter::default());
    /// ```
    #[inline]
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

impl Delimiter {
    /// Construct a new delimiter pair.
    ///
    /// # Panics
    ///
    /// If either of the strings are empty or contain whitespace or `=`.
    #[inline]
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        let left = left.into();
        let right = right.into();
        assert!(is_valid(&left) && is_valid(&right), "invalid delimiter");
        Self { left, right }
    }

    /// Parses the body of a set delimiter tag, e.g. `<% %>`.
    pub(crate) fn parse(body: &str) -> Option<Self> {
        let mut parts = body.split_whitespace();
        let left = parts.next()?;
        let right = parts.next()?;
        if parts.next().is_some() || !is_valid(left) || !is_valid(right) {
            return None;
        }
        Some(Self {
            left: left.to_owned(),
            right: right.to_owned(),
        })
    }

    /// The opening tag marker.
    #[inline]
    pub fn left(&self) -> &str {
        &self.left
    }

    /// The closing tag marker.
    #[inline]
    pub fn right(&self) -> &str {
        &self.right
    }
}

fn is_valid(marker: &str) -> bool {
    !marker.is_empty() && !marker.contains(|c: char| c == '=' || c.is_whitespace())
}
