use std::cmp::max;
use std::fmt;
use std::io;

use crate::types::span::Span;

/// An error that can occur during template compilation or rendering.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
    /// The name of the partial the error occurred in, if any.
    name: Option<String>,
    pretty: Option<(String, Span)>,
}

/// The category of an [`Error`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The closing delimiter of a tag was never found.
    UnclosedTag,
    /// A section close tag appeared without an open section.
    UnmatchedSectionClose,
    /// A section close tag did not match the innermost open section.
    MismatchedSectionClose,
    /// The template ended with sections still open.
    UnclosedSection,
    /// A set delimiter tag did not contain exactly two markers.
    InvalidDelimiter,
    /// Partials or lambdas were nested deeper than the engine allows.
    MaxIncludeDepth,
    /// A value could not be formatted.
    Format,
    /// The writer returned an error.
    Io,
    /// The view could not be converted to a value.
    Serialize,
}

impl Error {
    /// Construct a new error anchored to a region of the template source.
    pub(crate) fn syntax(
        kind: ErrorKind,
        msg: impl Into<String>,
        source: &str,
        span: impl Into<Span>,
    ) -> Self {
        Self {
            kind,
            msg: msg.into(),
            name: None,
            pretty: Some((source.to_owned(), span.into())),
        }
    }

    pub(crate) fn format(msg: impl Into<String>, source: &str, span: Span) -> Self {
        Self::syntax(ErrorKind::Format, msg, source, span)
    }

    pub(crate) fn max_include_depth(max: usize) -> Self {
        Self {
            kind: ErrorKind::MaxIncludeDepth,
            msg: format!("reached maximum include depth ({max})"),
            name: None,
            pretty: None,
        }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn serialize(msg: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Serialize,
            msg: msg.to_string(),
            name: None,
            pretty: None,
        }
    }

    /// Attach the name of the partial this error occurred in.
    ///
    /// Only the innermost partial is recorded.
    pub(crate) fn with_partial_name(mut self, name: &str) -> Self {
        if self.name.is_none() && self.pretty.is_some() {
            self.name = Some(name.to_owned());
        }
        self
    }

    /// Attach the name of the partial if the error points into the given
    /// partial source.
    ///
    /// Errors from lambda output expanded inside the partial point into the
    /// lambda's text and are left untagged.
    pub(crate) fn in_partial(self, name: &str, source: &str) -> Self {
        let own = matches!(&self.pretty, Some((s, _)) if s == source);
        if own {
            self.with_partial_name(name)
        } else {
            self
        }
    }

    /// Returns the category of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the name of the partial this error occurred in, if any.
    #[inline]
    pub fn partial_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self {
            kind: ErrorKind::Io,
            msg: err.to_string(),
            name: None,
            pretty: None,
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self {
            kind: ErrorKind::Io,
            msg: String::from("format error"),
            name: None,
            pretty: None,
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pretty {
            Some((source, span)) => fmt_pretty(&self.msg, self.name.as_deref(), source, *span, f),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pretty {
            Some((source, span)) => {
                if f.alternate() {
                    fmt_pretty(&self.msg, self.name.as_deref(), source, *span, f)
                } else {
                    write!(f, "{} between bytes {} and {}", self.msg, span.m, span.n)?;
                    if let Some(name) = &self.name {
                        write!(f, " (in partial `{name}`)")?;
                    }
                    Ok(())
                }
            }
            None => write!(f, "{}", self.msg),
        }
    }
}

fn fmt_pretty(
    msg: &str,
    name: Option<&str>,
    source: &str,
    span: Span,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let lines: Vec<_> = source.split_terminator('\n').collect();
    let (line, col) = to_line_col(&lines, span.m);
    let width = max(1, display_width(&source[span.m..span.n.min(source.len())]));
    let code = lines
        .get(line)
        .or_else(|| lines.last())
        .copied()
        .unwrap_or_default();

    let num = (line + 1).to_string();
    let pad = display_width(&num);
    let pipe = "|";
    let underline = "^".repeat(width);

    if let Some(name) = name {
        write!(f, "\n  --> partial `{name}`")?;
    }
    write!(
        f,
        "\n \
        {0:pad$} {pipe}\n \
        {num:>} {pipe} {code}\n \
        {0:pad$} {pipe} {underline:>width$} {msg}\n",
        "",
        pad = pad,
        pipe = pipe,
        num = num,
        code = code,
        underline = underline,
        width = col + width,
        msg = msg
    )
}

fn to_line_col(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut n = 0;
    for (i, line) in lines.iter().enumerate() {
        let len = line.len() + 1;
        if n + len > offset {
            return (i, display_width(&line[..offset - n]));
        }
        n += len;
    }
    (
        lines.len().saturating_sub(1),
        lines.last().map(|l| display_width(l)).unwrap_or(0),
    )
}

#[cfg(feature = "unicode")]
fn display_width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(not(feature = "unicode"))]
fn display_width(s: &str) -> usize {
    s.chars().count()
}
