use crate::util::unicode;

/// An editable text buffer with a byte-offset cursor that always sits on a
/// grapheme boundary. Newlines are allowed; single-line inputs never insert them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    /// Start editing `text` with the cursor at the end
    pub fn with_text(text: &str) -> Self {
        TextInput {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    /// Start of the current line
    pub fn home(&mut self) {
        self.cursor = self.line_start();
    }

    /// End of the current line
    pub fn end(&mut self) {
        self.cursor = self.line_end();
    }

    /// Move to the previous line, keeping the display column where possible
    pub fn up(&mut self) {
        let start = self.line_start();
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let col = unicode::byte_offset_to_display_col(&self.text[start..], self.cursor - start);
        let prev_start = self.text[..start - 1].rfind('\n').map_or(0, |i| i + 1);
        let prev_line = &self.text[prev_start..start - 1];
        self.cursor = prev_start + unicode::display_col_to_byte_offset(prev_line, col);
    }

    /// Move to the next line, keeping the display column where possible
    pub fn down(&mut self) {
        let end = self.line_end();
        if end == self.text.len() {
            self.cursor = end;
            return;
        }
        let start = self.line_start();
        let col = unicode::byte_offset_to_display_col(&self.text[start..], self.cursor - start);
        let next_start = end + 1;
        let next_end = self.text[next_start..]
            .find('\n')
            .map_or(self.text.len(), |i| next_start + i);
        let next_line = &self.text[next_start..next_end];
        self.cursor = next_start + unicode::display_col_to_byte_offset(next_line, col);
    }

    /// (line, display column) of the cursor
    pub fn cursor_pos(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let start = self.line_start();
        let col = unicode::display_width(&self.text[start..self.cursor]);
        (line, col)
    }

    fn line_start(&self) -> usize {
        self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| self.cursor + i)
    }
}
