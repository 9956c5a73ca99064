/// Dropdown state for select-style fields: closed shows the chosen option,
/// open shows the option list with a movable highlight.
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    selected_index: Option<usize>,
    is_open: bool,
    highlight_index: usize,
    option_count: usize,
}

impl SelectState {
    /// Closed dropdown with nothing chosen yet.
    pub fn new(option_count: usize) -> Self {
        Self {
            selected_index: None,
            is_open: false,
            highlight_index: 0,
            option_count,
        }
    }

    /// Closed dropdown with an option pre-selected (an existing answer).
    pub fn with_selected(option_count: usize, index: usize) -> Self {
        Self {
            selected_index: Some(index),
            is_open: false,
            highlight_index: index,
            option_count,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn highlighted(&self) -> usize {
        self.highlight_index
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.highlight_index = self.selected_index.unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Commit the highlighted option and close; returns the chosen index.
    pub fn select_highlighted(&mut self) -> Option<usize> {
        if self.option_count == 0 {
            self.close();
            return None;
        }
        self.selected_index = Some(self.highlight_index);
        self.close();
        self.selected_index
    }

    /// Move the highlight down, wrapping at the end.
    pub fn navigate_next(&mut self) {
        if self.option_count > 0 {
            self.highlight_index = (self.highlight_index + 1) % self.option_count;
        }
    }

    /// Move the highlight up, wrapping at the start.
    pub fn navigate_prev(&mut self) {
        if self.option_count > 0 {
            self.highlight_index = if self.highlight_index == 0 {
                self.option_count - 1
            } else {
                self.highlight_index - 1
            };
        }
    }
}
