use crossterm::event::KeyCode;

/// Selection and scrolling state for the browser lists, with a vim-style
/// scrolloff margin and wrap-around navigation.
#[derive(Debug, Clone)]
pub struct ListState {
    selected: Option<usize>,
    scroll_offset: usize,
    scroll_off: usize, // Rows from edge before scrolling
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    /// New state with no selection.
    pub fn new() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            scroll_off: 3,
        }
    }

    /// New state with the first item selected.
    pub fn with_selection() -> Self {
        Self {
            selected: Some(0),
            ..Self::new()
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    /// Handle a navigation key; returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyCode, item_count: usize, visible_height: usize) -> bool {
        if item_count == 0 {
            return false;
        }

        match key {
            KeyCode::Up => {
                self.move_up(item_count, visible_height);
                true
            }
            KeyCode::Down => {
                self.move_down(item_count, visible_height);
                true
            }
            KeyCode::PageUp => {
                self.selected = Some(self.selected.unwrap_or(0).saturating_sub(visible_height));
                self.update_scroll(visible_height, item_count);
                true
            }
            KeyCode::PageDown => {
                let current = self.selected.unwrap_or(0);
                self.selected = Some((current + visible_height).min(item_count - 1));
                self.update_scroll(visible_height, item_count);
                true
            }
            KeyCode::Home => {
                self.selected = Some(0);
                self.update_scroll(visible_height, item_count);
                true
            }
            KeyCode::End => {
                self.selected = Some(item_count - 1);
                self.update_scroll(visible_height, item_count);
                true
            }
            _ => false,
        }
    }

    fn move_up(&mut self, item_count: usize, visible_height: usize) {
        self.selected = match self.selected {
            Some(0) => Some(item_count - 1), // wrap to bottom
            Some(sel) => Some(sel - 1),
            None => Some(0),
        };
        self.update_scroll(visible_height, item_count);
    }

    fn move_down(&mut self, item_count: usize, visible_height: usize) {
        self.selected = match self.selected {
            Some(sel) if sel + 1 < item_count => Some(sel + 1),
            Some(_) => Some(0), // wrap to top
            None => Some(0),
        };
        self.update_scroll(visible_height, item_count);
    }

    /// Keep the selection visible with the scrolloff margin; called during
    /// rendering as well, once the real viewport height is known.
    pub fn update_scroll(&mut self, visible_height: usize, item_count: usize) {
        if let Some(sel) = self.selected {
            let min_scroll = sel.saturating_sub(visible_height.saturating_sub(self.scroll_off + 1));
            let max_scroll = sel.saturating_sub(self.scroll_off);

            if self.scroll_offset < min_scroll {
                self.scroll_offset = min_scroll;
            } else if self.scroll_offset > max_scroll {
                self.scroll_offset = max_scroll;
            }

            let max_offset = item_count.saturating_sub(visible_height);
            self.scroll_offset = self.scroll_offset.min(max_offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_at_both_ends() {
        let mut state = ListState::with_selection();
        state.handle_key(KeyCode::Up, 5, 10);
        assert_eq!(state.selected(), Some(4));
        state.handle_key(KeyCode::Down, 5, 10);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn scroll_keeps_margin_above_selection() {
        let mut state = ListState::with_selection();
        for _ in 0..9 {
            state.handle_key(KeyCode::Down, 20, 10);
        }
        assert_eq!(state.selected(), Some(9));
        // Selection at row 9 with height 10 and scrolloff 3 pushes offset
        assert_eq!(state.scroll_offset(), 3);
    }

    #[test]
    fn empty_list_consumes_nothing() {
        let mut state = ListState::new();
        assert!(!state.handle_key(KeyCode::Down, 0, 10));
        assert_eq!(state.selected(), None);
    }
}
