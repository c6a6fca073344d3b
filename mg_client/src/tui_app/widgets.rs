use ratatui::widgets::{ListItem, ListState, ScrollbarState};
use std::collections::VecDeque;

/// A bounded list drawn bottom-to-top, newest entry at the bottom.
///
/// Index 0 is the newest entry. "First" refers to the oldest entry still
/// kept, shown at the top.
pub struct ScrollableList {
    max_items: usize,
    pub list_items: VecDeque<ListItem<'static>>,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
}

impl ScrollableList {
    pub fn new(max_items: usize) -> Self {
        Self {
            max_items,
            list_items: VecDeque::new(),
            list_state: ListState::default(),
            scroll_state: ScrollbarState::default(),
        }
    }

    /// Add an entry, dropping the oldest one when full.
    pub fn push(&mut self, item: ListItem<'static>) {
        self.list_items.push_front(item);
        if self.list_items.len() > self.max_items {
            self.list_items.pop_back();
        }
        self.scroll_state = self.scroll_state.content_length(self.list_items.len());
        // Keep the selection on the same entry when one is selected
        if let Some(idx) = self.list_state.selected() {
            self.select(idx + 1);
        }
    }

    pub fn jump_to_first(&mut self) {
        self.select(self.list_items.len().saturating_sub(1));
    }

    pub fn jump_to_last(&mut self) {
        self.select(0);
    }

    pub fn move_up(&mut self) {
        let idx = self.list_state.selected().map_or(0, |idx| idx + 1);
        self.select(idx);
    }

    pub fn move_down(&mut self) {
        let idx = self
            .list_state
            .selected()
            .map_or(0, |idx| idx.saturating_sub(1));
        self.select(idx);
    }

    fn select(&mut self, idx: usize) {
        if self.list_items.is_empty() {
            self.list_state.select(None);
            return;
        }
        let idx = idx.min(self.list_items.len() - 1);
        self.list_state.select(Some(idx));
        let position = self.list_items.len() - 1 - idx;
        self.scroll_state = self.scroll_state.position(position);
    }
}
