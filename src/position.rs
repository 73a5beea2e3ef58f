//! Byte/line/column bookkeeping over Unicode input.

use std::fmt;

/// An immutable cursor position within a [`Stream`](crate::stream::Stream).
///
/// Lines are 1-based, columns are 1-based and counted in code points (not
/// bytes or grapheme clusters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    byte_offset: usize,
    line: u32,
    column: u32,
}

impl Position {
    /// The position at the very start of a stream: byte offset 0, line 1,
    /// column 1.
    pub const fn start() -> Self {
        Position {
            byte_offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Byte offset into the original text.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number, counted in code points.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Advance past `codepoint`, returning the resulting position.
    ///
    /// A line feed resets the column to 1 and increments the line; any
    /// other code point advances the column by one. The byte offset always
    /// advances by the UTF-8 length of `codepoint`.
    pub fn advance(&self, codepoint: char) -> Self {
        let byte_offset = self.byte_offset + codepoint.len_utf8();
        if codepoint == '\n' {
            Position {
                byte_offset,
                line: self.line + 1,
                column: 1,
            }
        } else {
            Position {
                byte_offset,
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_one_one_zero() {
        let p = Position::start();
        assert_eq!((p.byte_offset(), p.line(), p.column()), (0, 1, 1));
    }

    #[test]
    fn advancing_by_ascii_increments_column() {
        let p = Position::start().advance('a');
        assert_eq!((p.line(), p.column(), p.byte_offset()), (1, 2, 1));
    }

    #[test]
    fn advancing_by_newline_resets_column_and_bumps_line() {
        let p = Position::start().advance('a').advance('\n');
        assert_eq!((p.line(), p.column()), (2, 1));
    }

    #[test]
    fn byte_offset_tracks_utf8_length() {
        // 'é' is two bytes in UTF-8 but a single code point / column step.
        let p = Position::start().advance('é');
        assert_eq!(p.byte_offset(), 2);
        assert_eq!(p.column(), 2);
    }

    #[test]
    fn ordering_follows_byte_offset() {
        let p1 = Position::start();
        let p2 = p1.advance('x');
        assert!(p1 < p2);
    }
}
