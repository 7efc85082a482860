// Mon Jan 19 2026 - Alex

use super::escape::{Escaper, DEFAULT_MAXLEN};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

const INDENT: &str = "  ";

/// Width at which long text lines are wrapped.
pub const WRAP_WIDTH: usize = 200;

/// How attributes are written, chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// `<Tag name="value">`
    #[default]
    Attributes,
    /// `<Tag><Name>value</Name>`
    Elements,
}

/// Streaming XML emitter.
///
/// Tracks indentation and whether the start tag most recently opened still
/// accepts attributes. Nothing is buffered beyond the sink itself.
pub struct XmlWriter<W: Write> {
    out: W,
    mode: OutputMode,
    indentation: usize,
    unclosed: bool,
    escaper: Escaper,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self {
            out,
            mode,
            indentation: 0,
            unclosed: false,
            escaper: Escaper::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_indent(&mut self) -> io::Result<()> {
        for _ in 0..self.indentation {
            self.out.write_all(INDENT.as_bytes())?;
        }
        Ok(())
    }

    /// Ends the attribute section of the open start tag, if any.
    pub fn body(&mut self) -> io::Result<()> {
        if self.unclosed {
            self.out.write_all(b">\n")?;
            self.unclosed = false;
        }
        Ok(())
    }

    pub fn open_tag(&mut self, name: &str) -> io::Result<()> {
        self.body()?;
        self.write_indent()?;
        write!(self.out, "<{}", name)?;
        self.unclosed = true;
        self.indentation += 1;
        Ok(())
    }

    pub fn close_tag(&mut self, name: &str) -> io::Result<()> {
        self.indentation = self.indentation.saturating_sub(1);
        if self.unclosed {
            self.out.write_all(b" />\n")?;
        } else {
            self.write_indent()?;
            writeln!(self.out, "</{}>", name)?;
        }
        self.unclosed = false;
        Ok(())
    }

    pub fn attribute(&mut self, name: &str, value: &str) -> io::Result<()> {
        match self.mode {
            OutputMode::Attributes => {
                let escaped = self.escaper.escape(value, DEFAULT_MAXLEN);
                write!(self.out, " {}=\"{}\"", name, escaped)
            }
            OutputMode::Elements => {
                let tag = element_name(name);
                self.body()?;
                self.write_indent()?;
                let escaped = self.escaper.escape(value, DEFAULT_MAXLEN);
                writeln!(self.out, "<{}>{}</{}>", tag, escaped, tag)
            }
        }
    }

    /// A boolean attribute that is only ever written when set.
    pub fn flag(&mut self, name: &str) -> io::Result<()> {
        match self.mode {
            OutputMode::Attributes => self.attribute(name, "1"),
            OutputMode::Elements => self.attribute("flag", name),
        }
    }

    /// A multi-valued attribute such as array dimensions. Empty values are
    /// written as `:`.
    pub fn list_attribute(&mut self, name: &str, values: &[String]) -> io::Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let items: Vec<&str> = values
            .iter()
            .map(|v| if v.is_empty() { ":" } else { v.as_str() })
            .collect();

        match self.mode {
            OutputMode::Attributes => {
                let joined = if items.len() > 1 {
                    format!("{{{}}}", items.join(","))
                } else {
                    items[0].to_string()
                };
                self.attribute(name, &joined)
            }
            OutputMode::Elements => {
                for item in items {
                    self.attribute(name, item)?;
                }
                Ok(())
            }
        }
    }

    pub fn blank_line(&mut self) -> io::Result<()> {
        self.body()?;
        self.out.write_all(b"\n")
    }

    /// One escaped line of body text at the current indentation.
    pub fn text_line(&mut self, text: &str) -> io::Result<()> {
        self.body()?;
        self.write_indent()?;
        let escaped = self.escaper.escape(text, DEFAULT_MAXLEN);
        writeln!(self.out, "{}", escaped)
    }

    /// Body text split on newlines, with long lines wrapped at
    /// [`WRAP_WIDTH`] characters and trailing blanks trimmed. Empty lines
    /// are kept as bare newlines.
    pub fn multi_line_text(&mut self, text: &str) -> io::Result<()> {
        self.body()?;
        for line in text.lines() {
            if line.is_empty() {
                self.out.write_all(b"\n")?;
                continue;
            }
            for chunk in wrap(line, WRAP_WIDTH) {
                let chunk = chunk.trim_end_matches([' ', '\t', '\r']);
                if chunk.is_empty() {
                    self.out.write_all(b"\n")?;
                } else {
                    self.text_line(chunk)?;
                }
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Splits a line into pieces of at most `width` characters.
pub fn wrap(line: &str, width: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (i, _) in line.char_indices() {
        if count == width {
            pieces.push(&line[start..i]);
            start = i;
            count = 0;
        }
        count += 1;
    }
    if start < line.len() {
        pieces.push(&line[start..]);
    }
    pieces
}

fn element_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(mode: OutputMode, f: F) -> String
    where
        F: FnOnce(&mut XmlWriter<Vec<u8>>) -> io::Result<()>,
    {
        let mut w = XmlWriter::new(Vec::new(), mode);
        f(&mut w).unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    fn sample(w: &mut XmlWriter<Vec<u8>>) -> io::Result<()> {
        w.open_tag("File")?;
        w.attribute("name", "a.h")?;
        w.open_tag("Class")?;
        w.attribute("name", "A")?;
        w.flag("abstract")?;
        w.open_tag("SuperClass")?;
        w.attribute("name", "B")?;
        w.close_tag("SuperClass")?;
        w.close_tag("Class")?;
        w.close_tag("File")
    }

    #[test]
    fn test_attribute_mode() {
        let out = render(OutputMode::Attributes, sample);
        assert_eq!(
            out,
            "<File name=\"a.h\">\n  <Class name=\"A\" abstract=\"1\">\n    <SuperClass name=\"B\" />\n  </Class>\n</File>\n"
        );
    }

    #[test]
    fn test_element_mode() {
        let out = render(OutputMode::Elements, sample);
        assert_eq!(
            out,
            "<File>\n  <Name>a.h</Name>\n  <Class>\n    <Name>A</Name>\n    <Flag>abstract</Flag>\n    <SuperClass>\n      <Name>B</Name>\n    </SuperClass>\n  </Class>\n</File>\n"
        );
    }

    #[test]
    fn test_list_attribute() {
        let dims = vec!["3".to_string(), String::new()];
        let out = render(OutputMode::Attributes, |w| {
            w.open_tag("Arg")?;
            w.list_attribute("size", &dims)?;
            w.list_attribute("size", &dims[..1])?;
            w.close_tag("Arg")
        });
        assert_eq!(out, "<Arg size=\"{3,:}\" size=\"3\" />\n");

        let out = render(OutputMode::Elements, |w| {
            w.open_tag("Arg")?;
            w.list_attribute("size", &dims)?;
            w.close_tag("Arg")
        });
        assert_eq!(out, "<Arg>\n  <Size>3</Size>\n  <Size>:</Size>\n</Arg>\n");
    }

    #[test]
    fn test_escaped_attribute_value() {
        let out = render(OutputMode::Attributes, |w| {
            w.open_tag("Arg")?;
            w.attribute("value", "a<b")?;
            w.close_tag("Arg")
        });
        assert_eq!(out, "<Arg value=\"a&lt;b\" />\n");
    }

    #[test]
    fn test_multi_line_text() {
        let out = render(OutputMode::Attributes, |w| {
            w.open_tag("Comment")?;
            w.multi_line_text("First line.  \r\n\nSecond <line>\t\n")?;
            w.close_tag("Comment")
        });
        assert_eq!(out, "<Comment>\n  First line.\n\n  Second &lt;line&gt;\n</Comment>\n");
    }

    #[test]
    fn test_long_line_wraps() {
        let line = "a".repeat(201);
        let out = render(OutputMode::Attributes, |w| w.multi_line_text(&line));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.len() <= WRAP_WIDTH));
        assert_eq!(lines.concat(), line);
    }

    #[test]
    fn test_wrap_counts_characters() {
        assert_eq!(wrap("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap("abcd", 4), vec!["abcd"]);
        assert_eq!(wrap("ééé", 2), vec!["éé", "é"]);
        assert!(wrap("", 4).is_empty());
    }
}
