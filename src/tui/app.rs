use ratatui::widgets::ListState;

use crate::feed::{FeedQuery, SortOption};

pub const PAGE_SIZE: usize = 10;

/// View state of the dashboard screen. Content lives in
/// [`Dashboard`](crate::app::Dashboard); this only tracks what the user is
/// looking at.
pub struct TuiApp {
    pub query: FeedQuery,
    pub sort: SortOption,
    pub search_mode: bool,
    pub item_index: usize,
    pub item_list_state: ListState,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut item_list_state = ListState::default();
        item_list_state.select(Some(0));

        Self {
            query: FeedQuery::default(),
            sort: SortOption::default(),
            search_mode: false,
            item_index: 0,
            item_list_state,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn move_up(&mut self) {
        self.select(self.item_index.saturating_sub(1));
    }

    pub fn move_down(&mut self, visible: usize) {
        if self.item_index + 1 < visible {
            self.select(self.item_index + 1);
        }
    }

    pub fn next_page(&mut self, visible: usize) {
        let max_index = visible.saturating_sub(1);
        self.select((self.item_index + PAGE_SIZE).min(max_index));
    }

    pub fn prev_page(&mut self) {
        self.select(self.item_index.saturating_sub(PAGE_SIZE));
    }

    /// Keep the selection inside a list that may have shrunk.
    pub fn clamp(&mut self, visible: usize) {
        if self.item_index >= visible {
            self.select(visible.saturating_sub(1));
        }
    }

    /// Changing what is shown starts the selection from the top.
    pub fn reset_selection(&mut self) {
        self.select(0);
    }

    pub fn start_search(&mut self) {
        self.search_mode = true;
    }

    pub fn end_search(&mut self) {
        self.search_mode = false;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.query.search.push(c);
        self.reset_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.query.search.pop();
        self.reset_selection();
    }

    pub fn clear_search(&mut self) {
        self.query.search.clear();
        self.reset_selection();
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn select(&mut self, index: usize) {
        self.item_index = index;
        self.item_list_state.select(Some(index));
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
