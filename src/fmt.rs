//! Output plumbing for the renderer.
//!
//! This module defines a [`Formatter`] type that is similar to
//! [`std::fmt::Formatter`]. The renderer writes to it and it forwards to the
//! underlying buffer, be it a [`String`] or an arbitrary [`std::io::Write`]
//! buffer.

use std::fmt;
use std::fmt::Write;
use std::io;

use crate::Value;

/// A [`std::fmt::Write`] façade.
pub struct Formatter<'a> {
    buf: &'a mut (dyn fmt::Write + 'a),
}

pub(crate) struct Writer<W> {
    writer: W,
    err: Option<io::Error>,
}

impl<'a> Formatter<'a> {
    pub(crate) fn with_string(buf: &'a mut String) -> Self {
        Self { buf }
    }

    pub(crate) fn with_writer<W>(buf: &'a mut Writer<W>) -> Self
    where
        W: io::Write,
    {
        Self { buf }
    }
}

impl fmt::Write for Formatter<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        fmt::Write::write_str(self.buf, s)
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        fmt::Write::write_char(self.buf, c)
    }

    #[inline]
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        fmt::Write::write_fmt(self.buf, args)
    }
}

impl<W> Writer<W>
where
    W: io::Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer, err: None }
    }

    pub fn take_err(&mut self) -> Option<io::Error> {
        self.err.take()
    }
}

impl<W> fmt::Write for Writer<W>
where
    W: io::Write,
{
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.writer.write_all(s.as_bytes()).map_err(|e| {
            self.err = Some(e);
            fmt::Error
        })
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        self.writer
            .write_all(c.encode_utf8(&mut [0; 4]).as_bytes())
            .map_err(|e| {
                self.err = Some(e);
                fmt::Error
            })
    }
}

/// Writes a scalar value.
///
/// Values are formatted as follows:
/// - [`Value::None`]: empty string
/// - [`Value::Bool`]: `true` or `false`
/// - [`Value::Integer`]: the integer formatted using [`Display`][std::fmt::Display]
/// - [`Value::Float`]: the float formatted using [`Display`][std::fmt::Display]
/// - [`Value::String`]: the string, unescaped
///
/// Returns `Ok(false)` without writing anything for lists, maps and lambdas.
pub(crate) fn scalar<W>(f: &mut W, value: &Value) -> Result<bool, fmt::Error>
where
    W: fmt::Write + ?Sized,
{
    match value {
        Value::None => {}
        Value::Bool(b) => write!(f, "{b}")?,
        Value::Integer(n) => write!(f, "{n}")?,
        Value::Float(n) => write!(f, "{n}")?,
        Value::String(s) => f.write_str(s)?,
        Value::List(_) | Value::Map(_) | Value::Lambda(_) => return Ok(false),
    }
    Ok(true)
}

/// Writes the string with the five HTML reserved characters escaped.
///
/// # Examples
///
/// ```
/// let mut s = String::new();
/// stache::escape_html(&mut s, r#"<a href="x">Tom & Jerry's</a>"#).unwrap();
/// assert_eq!(s, "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
/// ```
pub fn escape_html<W>(f: &mut W, s: &str) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    let mut last = 0;
    for (i, c) in s.char_indices() {
        let esc = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\'' => "&#39;",
            _ => continue,
        };
        f.write_str(&s[last..i])?;
        f.write_str(esc)?;
        last = i + 1;
    }
    f.write_str(&s[last..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_passthrough() {
        let mut s = String::new();
        escape_html(&mut s, "lorem ipsum").unwrap();
        assert_eq!(s, "lorem ipsum");
    }

    #[test]
    fn escape_html_reserved() {
        let mut s = String::new();
        escape_html(&mut s, "<a&b>\"'").unwrap();
        assert_eq!(s, "&lt;a&amp;b&gt;&quot;&#39;");
    }

    #[test]
    fn scalar_values() {
        let mut s = String::new();
        assert!(scalar(&mut s, &Value::Integer(0)).unwrap());
        assert!(scalar(&mut s, &Value::Float(1.5)).unwrap());
        assert!(scalar(&mut s, &Value::Bool(true)).unwrap());
        assert!(!scalar(&mut s, &Value::List(vec![Value::None])).unwrap());
        assert_eq!(s, "01.5true");
    }
}
