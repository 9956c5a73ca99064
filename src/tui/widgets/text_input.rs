use crossterm::event::KeyCode;

/// Cursor and horizontal-scroll state for a single-line text input.
/// The value itself lives in the form's value map; this tracks editing
/// position only.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    cursor_pos: usize,    // Character index (0 = before first char)
    scroll_offset: usize, // For horizontal scrolling when text > width
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Place the cursor after the last character of the given text, used
    /// when focus lands on a field with an existing value.
    pub fn set_cursor_to_end(&mut self, text: &str) {
        self.cursor_pos = text.chars().count();
    }

    /// Handle a key press against the current value.
    /// Returns Some(new_value) if the text changed, None if only the
    /// cursor moved or the key was not an editing key.
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        current_value: &str,
        max_length: Option<usize>,
    ) -> Option<String> {
        let char_count = current_value.chars().count();
        self.cursor_pos = self.cursor_pos.min(char_count);

        match key {
            KeyCode::Char(c) => {
                if let Some(max) = max_length {
                    if char_count >= max {
                        return None;
                    }
                }

                let mut chars: Vec<char> = current_value.chars().collect();
                chars.insert(self.cursor_pos, c);
                self.cursor_pos += 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    let mut chars: Vec<char> = current_value.chars().collect();
                    chars.remove(self.cursor_pos - 1);
                    self.cursor_pos -= 1;
                    Some(chars.into_iter().collect())
                } else {
                    None
                }
            }
            KeyCode::Delete => {
                if self.cursor_pos < char_count {
                    let mut chars: Vec<char> = current_value.chars().collect();
                    chars.remove(self.cursor_pos);
                    Some(chars.into_iter().collect())
                } else {
                    None
                }
            }
            KeyCode::Left => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                }
                None
            }
            KeyCode::Right => {
                if self.cursor_pos < char_count {
                    self.cursor_pos += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                None
            }
            KeyCode::End => {
                self.cursor_pos = char_count;
                None
            }
            _ => None,
        }
    }

    /// Keep the cursor inside the visible window; called during rendering.
    pub fn update_scroll(&mut self, visible_width: usize, text: &str) {
        let char_count = text.chars().count();

        if self.cursor_pos < self.scroll_offset {
            self.scroll_offset = self.cursor_pos;
        } else if visible_width > 0 && self.cursor_pos >= self.scroll_offset + visible_width {
            self.scroll_offset = self.cursor_pos.saturating_sub(visible_width - 1);
        }

        let max_offset = char_count.saturating_sub(visible_width);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_inserts_at_cursor() {
        let mut state = TextInputState::new();
        let value = state.handle_key(KeyCode::Char('A'), "", None).unwrap();
        let value = state.handle_key(KeyCode::Char('d'), &value, None).unwrap();
        let value = state.handle_key(KeyCode::Char('a'), &value, None).unwrap();
        assert_eq!(value, "Ada");

        state.handle_key(KeyCode::Home, &value, None);
        let value = state.handle_key(KeyCode::Char('*'), &value, None).unwrap();
        assert_eq!(value, "*Ada");
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut state = TextInputState::new();
        assert_eq!(state.handle_key(KeyCode::Backspace, "Ada", None), None);
    }

    #[test]
    fn max_length_stops_insertion() {
        let mut state = TextInputState::new();
        state.set_cursor_to_end("1234567890");
        assert_eq!(
            state.handle_key(KeyCode::Char('1'), "1234567890", Some(10)),
            None
        );
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut state = TextInputState::new();
        let text = "abcdefghijklmnop";
        state.set_cursor_to_end(text);
        state.update_scroll(8, text);
        // Cursor sits past the window; offset clamps to text_len - width
        assert_eq!(state.scroll_offset(), 8);

        state.handle_key(KeyCode::Home, text, None);
        state.update_scroll(8, text);
        assert_eq!(state.scroll_offset(), 0);
    }
}
