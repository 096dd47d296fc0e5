//! Source buffer, spans, and line lookup.
//!
//! All positions are byte offsets into the UTF-8 buffer held by
//! [`SourceText`]. Line and column numbers are derived on demand by
//! binary search over the precomputed line starts.

use std::fmt;
use std::ops::Range;

/// Half-open `[start, start + length)` range into the source buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    #[must_use]
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Build a span from its start and (exclusive) end offsets.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    #[must_use]
    pub const fn from_bounds(start: usize, end: usize) -> Self {
        assert!(end >= start, "span end before start");
        Self {
            start,
            length: end - start,
        }
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub const fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end()
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// One line of the source, excluding or including its line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine {
    pub start: usize,
    pub length: usize,
    pub length_including_line_break: usize,
}

impl TextLine {
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    #[must_use]
    pub const fn span(&self) -> TextSpan {
        TextSpan::new(self.start, self.length)
    }

    #[must_use]
    pub const fn span_including_line_break(&self) -> TextSpan {
        TextSpan::new(self.start, self.length_including_line_break)
    }
}

/// Zero-based line and byte column of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePosition {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for LinePosition {
    /// Renders one-based, the way editors count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Immutable source buffer with precomputed line boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    lines: Vec<TextLine>,
}

impl SourceText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = split_lines(&text);
        Self { text, lines }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The character starting at byte `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range or not on a character boundary.
    #[must_use]
    pub fn char_at(&self, position: usize) -> char {
        self.text[position..]
            .chars()
            .next()
            .unwrap_or_else(|| panic!("position {position} out of range"))
    }

    /// The text covered by `span`.
    ///
    /// # Panics
    ///
    /// Panics if the span lies outside the buffer.
    #[must_use]
    pub fn slice(&self, span: TextSpan) -> &str {
        &self.text[span.range()]
    }

    #[must_use]
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, index: usize) -> TextLine {
        self.lines[index]
    }

    /// Text of the line at `index`, without its line break.
    #[must_use]
    pub fn line_text(&self, index: usize) -> &str {
        self.slice(self.lines[index].span())
    }

    /// Index of the line containing `position`: the greatest line whose
    /// start is `<= position`.
    #[must_use]
    pub fn line_index(&self, position: usize) -> usize {
        // `lines` is never empty and `lines[0].start == 0`.
        self.lines
            .partition_point(|line| line.start <= position)
            .saturating_sub(1)
    }

    #[must_use]
    pub fn line_position(&self, position: usize) -> LinePosition {
        let line = self.line_index(position);
        LinePosition {
            line,
            column: position - self.lines[line].start,
        }
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn split_lines(text: &str) -> Vec<TextLine> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut position = 0;
    let mut line_start = 0;

    while position < bytes.len() {
        let width = line_break_width(bytes, position);
        if width == 0 {
            position += 1;
        } else {
            lines.push(TextLine {
                start: line_start,
                length: position - line_start,
                length_including_line_break: position - line_start + width,
            });
            position += width;
            line_start = position;
        }
    }

    lines.push(TextLine {
        start: line_start,
        length: position - line_start,
        length_including_line_break: position - line_start,
    });

    lines
}

/// Width of the line break starting at `position`, or 0 if there is none.
pub(crate) fn line_break_width(bytes: &[u8], position: usize) -> usize {
    match (bytes[position], bytes.get(position + 1)) {
        (b'\r', Some(b'\n')) => 2,
        (b'\r' | b'\n', _) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_one_line() {
        let text = SourceText::new("");
        assert_eq!(text.lines().len(), 1);
        assert_eq!(text.line(0).length, 0);
        assert_eq!(text.line_index(0), 0);
    }

    #[test]
    fn line_breaks_of_every_width() {
        let text = SourceText::new("a\r\nbc\rd\n");
        let lines = text.lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            TextLine {
                start: 0,
                length: 1,
                length_including_line_break: 3,
            }
        );
        assert_eq!(
            lines[1],
            TextLine {
                start: 3,
                length: 2,
                length_including_line_break: 3,
            }
        );
        assert_eq!(
            lines[2],
            TextLine {
                start: 6,
                length: 1,
                length_including_line_break: 2,
            }
        );
        assert_eq!(
            lines[3],
            TextLine {
                start: 8,
                length: 0,
                length_including_line_break: 0,
            }
        );
    }

    #[test]
    fn lines_are_contiguous() {
        let text = SourceText::new("one\ntwo\r\n\nthree");
        let mut expected_start = 0;
        for line in text.lines() {
            assert_eq!(line.start, expected_start);
            expected_start = line.span_including_line_break().end();
        }
        assert_eq!(expected_start, text.len());
    }

    #[test]
    fn line_index_binary_search() {
        let text = SourceText::new("ab\ncd\nef");
        assert_eq!(text.line_index(0), 0);
        assert_eq!(text.line_index(2), 0);
        assert_eq!(text.line_index(3), 1);
        assert_eq!(text.line_index(5), 1);
        assert_eq!(text.line_index(6), 2);
        assert_eq!(text.line_index(8), 2);
    }

    #[test]
    fn line_position_and_display() {
        let text = SourceText::new("int x;\n  y = 1;");
        let pos = text.line_position(9);
        assert_eq!(pos, LinePosition { line: 1, column: 2 });
        assert_eq!(pos.to_string(), "2:3");
    }

    #[test]
    fn slice_and_char_at() {
        let text = SourceText::new("héllo");
        assert_eq!(text.slice(TextSpan::from_bounds(0, 3)), "hé");
        assert_eq!(text.char_at(1), 'é');
        assert_eq!(text.line_text(0), "héllo");
    }

    #[test]
    fn span_helpers() {
        let span = TextSpan::from_bounds(4, 9);
        assert_eq!(span.length, 5);
        assert_eq!(span.end(), 9);
        assert!(span.contains(4));
        assert!(!span.contains(9));
        assert_eq!(span.to_string(), "4..9");
        assert!(TextSpan::new(3, 0).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn char_at_past_end_panics() {
        let text = SourceText::new("ab");
        let _ = text.char_at(2);
    }
}
