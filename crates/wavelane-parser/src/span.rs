//! Byte ranges into the loaded source text.

use std::ops::Range;

/// A byte range of the source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Span of the character at a 1-based line and byte column of `source`.
    ///
    /// Positions past the end of a line or of the input are clamped, so the
    /// result always lies within `source`.
    ///
    /// ```
    /// # use wavelane_parser::Span;
    /// let source = "{\n  \"signal\": x\n}";
    /// let span = Span::at_line_column(source, 2, 13);
    /// assert_eq!(&source[span.start()..span.end()], "x");
    /// ```
    pub fn at_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum::<usize>();
        let line_len = source[line_start..]
            .find('\n')
            .unwrap_or(source.len() - line_start);

        let mut start = line_start + column.saturating_sub(1).min(line_len);
        while !source.is_char_boundary(start) {
            start -= 1;
        }
        let end = source[start..]
            .chars()
            .next()
            .map_or(start, |c| start + c.len_utf8());
        Self::new(start..end)
    }
}
