use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Text input buffer with cursor management and editing operations
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    /// The actual text content
    content: String,
    /// Cursor position as byte index in the content string
    cursor_position: usize,
}

impl InputBuffer {
    /// Create a new empty input buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current text content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the current cursor position (byte index)
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Length in graphemes (not bytes)
    pub fn len(&self) -> usize {
        self.content.graphemes(true).count()
    }

    /// Clear all content and reset cursor
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    /// Replace the content and move the cursor to the end
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor_position = self.content.len();
    }

    /// Insert a character at the current cursor position
    pub fn insert_char(&mut self, ch: char) {
        self.content.insert(self.cursor_position, ch);
        self.cursor_position += ch.len_utf8();
    }

    /// Insert a string at the current cursor position
    pub fn insert_str(&mut self, s: &str) {
        self.content.insert_str(self.cursor_position, s);
        self.cursor_position += s.len();
    }

    /// Delete the grapheme at the cursor position (Delete key behavior)
    pub fn delete_char(&mut self) -> bool {
        if self.cursor_position >= self.content.len() {
            return false;
        }

        match self.content[self.cursor_position..].graphemes(true).next() {
            Some(grapheme) => {
                let end = self.cursor_position + grapheme.len();
                self.content.drain(self.cursor_position..end);
                true
            }
            None => false,
        }
    }

    /// Delete the grapheme before the cursor position (Backspace key behavior)
    pub fn backspace(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }

        match self.content[..self.cursor_position].grapheme_indices(true).next_back() {
            Some((start, _)) => {
                self.content.drain(start..self.cursor_position);
                self.cursor_position = start;
                true
            }
            None => false,
        }
    }

    /// Move cursor left by one grapheme
    pub fn move_left(&mut self) -> bool {
        match self.content[..self.cursor_position].grapheme_indices(true).next_back() {
            Some((start, _)) => {
                self.cursor_position = start;
                true
            }
            None => false,
        }
    }

    /// Move cursor right by one grapheme
    pub fn move_right(&mut self) -> bool {
        match self.content[self.cursor_position..].graphemes(true).next() {
            Some(grapheme) => {
                self.cursor_position += grapheme.len();
                true
            }
            None => false,
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_position = self.content.len();
    }

    /// Move cursor to the beginning of the previous word
    pub fn move_word_left(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }

        let before = &self.content[..self.cursor_position];
        let trimmed = before.trim_end();
        self.cursor_position = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(idx, c)| idx + c.len_utf8())
            .unwrap_or(0);
        true
    }

    /// Move cursor to the beginning of the next word
    pub fn move_word_right(&mut self) -> bool {
        if self.cursor_position >= self.content.len() {
            return false;
        }

        let after = &self.content[self.cursor_position..];
        let word_end = after
            .char_indices()
            .find(|(_, c)| c.is_whitespace())
            .map(|(idx, _)| idx)
            .unwrap_or(after.len());
        let next_word = after[word_end..]
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map(|(idx, _)| word_end + idx)
            .unwrap_or(after.len());

        self.cursor_position += next_word;
        true
    }

    /// Split the content into display rows no wider than `max_width` columns.
    ///
    /// Wrapping is per grapheme; explicit newlines start a new row.
    pub fn display_lines(&self, max_width: u16) -> Vec<String> {
        self.layout(max_width).0
    }

    /// Cursor location as (column, row) within [`Self::display_lines`]
    pub fn cursor_coords(&self, max_width: u16) -> (u16, u16) {
        self.layout(max_width).1
    }

    fn layout(&self, max_width: u16) -> (Vec<String>, (u16, u16)) {
        let max_width = usize::from(max_width.max(1));
        let mut lines = vec![String::new()];
        let mut width = 0usize;
        let mut cursor = None;

        for (idx, grapheme) in self.content.grapheme_indices(true) {
            if idx == self.cursor_position {
                cursor = Some((width, lines.len() - 1));
            }

            if grapheme == "\n" || grapheme == "\r\n" {
                lines.push(String::new());
                width = 0;
                continue;
            }

            let grapheme_width = grapheme.width();
            if width + grapheme_width > max_width && width > 0 {
                lines.push(String::new());
                width = 0;
                if idx == self.cursor_position {
                    cursor = Some((0, lines.len() - 1));
                }
            }

            if let Some(line) = lines.last_mut() {
                line.push_str(grapheme);
            }
            width += grapheme_width;
        }

        let (column, row) = cursor.unwrap_or((width, lines.len() - 1));
        (lines, (column as u16, row as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = InputBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.cursor_position(), 0);
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut buffer = InputBuffer::new();
        buffer.insert_str("Hello");

        assert!(buffer.backspace());
        assert_eq!(buffer.content(), "Hell");
        assert_eq!(buffer.cursor_position(), 4);

        buffer.move_to_start();
        assert!(!buffer.backspace());
        assert!(buffer.delete_char());
        assert_eq!(buffer.content(), "ell");
    }

    #[test]
    fn test_cursor_movement() {
        let mut buffer = InputBuffer::new();
        buffer.insert_str("Hello");

        assert!(buffer.move_left());
        assert_eq!(buffer.cursor_position(), 4);

        buffer.move_to_start();
        assert!(!buffer.move_left());

        buffer.move_to_end();
        assert_eq!(buffer.cursor_position(), 5);
        assert!(!buffer.move_right());
    }

    #[test]
    fn test_unicode_handling() {
        let mut buffer = InputBuffer::new();
        buffer.insert_str("🦀rust");

        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.cursor_position(), 8);

        buffer.move_left();
        buffer.insert_char('!');
        assert_eq!(buffer.content(), "🦀rus!t");

        buffer.move_to_start();
        assert!(buffer.delete_char());
        assert_eq!(buffer.content(), "rus!t");
    }

    #[test]
    fn test_word_movement() {
        let mut buffer = InputBuffer::new();
        buffer.insert_str("hello world test");

        buffer.move_word_left();
        assert_eq!(buffer.cursor_position(), 12);

        buffer.move_word_left();
        assert_eq!(buffer.cursor_position(), 6);

        buffer.move_word_right();
        assert_eq!(buffer.cursor_position(), 12);
    }

    #[test]
    fn test_display_lines_wrap_and_newlines() {
        let mut buffer = InputBuffer::new();
        buffer.insert_str("abcdefgh\nxy");

        assert_eq!(buffer.display_lines(5), vec!["abcde", "fgh", "xy"]);
        assert_eq!(buffer.cursor_coords(5), (2, 2));

        buffer.move_to_start();
        assert_eq!(buffer.cursor_coords(5), (0, 0));
    }

    #[test]
    fn test_cursor_at_wrap_boundary_moves_to_next_row() {
        let mut buffer = InputBuffer::new();
        buffer.set_content("abcdef");
        buffer.move_left();
        // 'f' wraps onto row 1 at width 5
        assert_eq!(buffer.cursor_coords(5), (0, 1));
    }

    #[test]
    fn test_empty_layout() {
        let buffer = InputBuffer::new();
        assert_eq!(buffer.display_lines(10), vec![String::new()]);
        assert_eq!(buffer.cursor_coords(10), (0, 0));
    }
}
