//! Line/column regions over multi-line text.
//!
//! A [`Location`] addresses text by 1-based line and 0-based column, where the
//! column counts characters from the start of its line. Lines are delimited by
//! a single [`LineSeparator`]; splitting and rejoining by it is lossless, so a
//! splice leaves every line outside the region byte-identical.

use crate::config::LineSeparator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// A point in the text: 1-based line, 0-based character column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A `{start, end}` region. `end` must not precede `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width region at `position`.
    pub const fn point(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("line {line} is out of range (text has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("column {column} is out of range on line {line} ({line_len} characters)")]
    ColumnOutOfRange {
        line: usize,
        column: usize,
        line_len: usize,
    },

    #[error("region end {end} precedes its start {start}")]
    Inverted { start: Position, end: Position },

    #[error("byte offset {offset} is not a character boundary of the text")]
    NotCharBoundary { offset: usize },
}

/// Byte layout of the lines of a text under one separator.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset where each line starts.
    starts: Vec<usize>,
    /// Byte offset where each line's content ends (its separator excluded).
    ends: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str, separator: LineSeparator) -> Self {
        let sep = separator.as_str();
        let mut starts = vec![0];
        let mut ends = Vec::new();
        for (idx, _) in text.match_indices(sep) {
            ends.push(idx);
            starts.push(idx + sep.len());
        }
        ends.push(text.len());
        Self { text, starts, ends }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Content of a 1-based line, without its separator.
    pub fn line(&self, line: usize) -> Option<&'a str> {
        let idx = line.checked_sub(1)?;
        let (start, end) = (*self.starts.get(idx)?, *self.ends.get(idx)?);
        Some(&self.text[start..end])
    }

    /// Byte offset of `position` in the text.
    pub fn offset(&self, position: Position) -> Result<usize, RegionError> {
        let content = self
            .line(position.line)
            .ok_or(RegionError::LineOutOfRange {
                line: position.line,
                line_count: self.line_count(),
            })?;

        let column = column_to_byte(content, position.column).ok_or_else(|| {
            RegionError::ColumnOutOfRange {
                line: position.line,
                column: position.column,
                line_len: content.chars().count(),
            }
        })?;

        Ok(self.starts[position.line - 1] + column)
    }

    /// Byte range covered by `location`.
    pub fn range(&self, location: &Location) -> Result<Range<usize>, RegionError> {
        if location.end < location.start {
            return Err(RegionError::Inverted {
                start: location.start,
                end: location.end,
            });
        }
        Ok(self.offset(location.start)?..self.offset(location.end)?)
    }

    /// Position of a byte offset. Offsets inside a separator resolve to the
    /// end of the line the separator terminates.
    pub fn position(&self, offset: usize) -> Result<Position, RegionError> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return Err(RegionError::NotCharBoundary { offset });
        }
        let idx = self.starts.partition_point(|&start| start <= offset) - 1;
        let end = offset.min(self.ends[idx]);
        Ok(Position {
            line: idx + 1,
            column: self.text[self.starts[idx]..end].chars().count(),
        })
    }

    /// Location spanning a byte range.
    pub fn location(&self, range: Range<usize>) -> Result<Location, RegionError> {
        Ok(Location {
            start: self.position(range.start)?,
            end: self.position(range.end)?,
        })
    }
}

fn column_to_byte(line: &str, column: usize) -> Option<usize> {
    line.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(line.len()))
        .nth(column)
}

/// Text covered by `location`, using the default separator.
pub fn extract_text<'a>(text: &'a str, location: &Location) -> Result<&'a str, RegionError> {
    extract_text_with(text, location, LineSeparator::default())
}

/// Text covered by `location`.
///
/// Interior separators are included exactly once per line boundary; the
/// separator after the end line is never part of the result.
pub fn extract_text_with<'a>(
    text: &'a str,
    location: &Location,
    separator: LineSeparator,
) -> Result<&'a str, RegionError> {
    let range = LineIndex::new(text, separator).range(location)?;
    Ok(&text[range])
}

/// Replace the text covered by `location`, using the default separator.
pub fn replace_text(text: &str, location: &Location, new_text: &str) -> Result<String, RegionError> {
    replace_text_with(text, location, new_text, LineSeparator::default())
}

/// Replace the text covered by `location` with `new_text`.
///
/// Everything outside the region is carried over unchanged. A zero-width
/// location is a pure insertion.
pub fn replace_text_with(
    text: &str,
    location: &Location,
    new_text: &str,
    separator: LineSeparator,
) -> Result<String, RegionError> {
    let range = LineIndex::new(text, separator).range(location)?;

    let mut spliced = String::with_capacity(text.len() - range.len() + new_text.len());
    spliced.push_str(&text[..range.start]);
    spliced.push_str(new_text);
    spliced.push_str(&text[range.end..]);
    Ok(spliced)
}
