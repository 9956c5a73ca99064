/// Cursor over a flat option group, used by the radio/checkbox/multi-select
/// question kinds. Which options are actually chosen lives in the form's
/// value map; this only tracks where the cursor sits.
#[derive(Debug, Clone, Default)]
pub struct ChoiceState {
    cursor: usize,
    option_count: usize,
}

impl ChoiceState {
    pub fn new(option_count: usize) -> Self {
        Self {
            cursor: 0,
            option_count,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn option_count(&self) -> usize {
        self.option_count
    }

    /// Move the cursor forward, wrapping past the last option.
    pub fn next(&mut self) {
        if self.option_count > 0 {
            self.cursor = (self.cursor + 1) % self.option_count;
        }
    }

    /// Move the cursor back, wrapping past the first option.
    pub fn prev(&mut self) {
        if self.option_count > 0 {
            self.cursor = if self.cursor == 0 {
                self.option_count - 1
            } else {
                self.cursor - 1
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_both_directions() {
        let mut state = ChoiceState::new(3);
        state.prev();
        assert_eq!(state.cursor(), 2);
        state.next();
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn empty_group_keeps_cursor_at_zero() {
        let mut state = ChoiceState::new(0);
        state.next();
        state.prev();
        assert_eq!(state.cursor(), 0);
    }
}
