/// Location of the next unread character in a text stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in chars)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: u64,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: u64) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Moves past `ch`, which occupied `width` bytes of the source.
    #[inline]
    pub fn advance(&mut self, ch: char, width: usize) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += width as u64;
    }

    /// Moves past every char of `text`, assuming it was read verbatim.
    pub fn advance_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.advance(ch, ch.len_utf8());
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_new() {
        let pos = Position::new();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_position_default() {
        assert_eq!(Position::default(), Position::new());
    }

    #[test]
    fn test_position_advance_newline() {
        let mut pos = Position::new();
        pos.advance('a', 1);
        pos.advance('\n', 1);
        assert_eq!(pos, Position::at(2, 1, 2));
    }

    #[test]
    fn test_position_advance_str_multibyte() {
        let mut pos = Position::new();
        pos.advance_str("你好\nx");
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 2);
        assert_eq!(pos.offset, 8);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::at(3, 7, 40).to_string(), "3:7");
    }
}
