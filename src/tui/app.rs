use ratatui::widgets::ListState;
use tokio::task::JoinHandle;

use crate::controller::{PaginationController, ScrollTrigger, ViewState};
use crate::domain::Article;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// What the main area shows for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    /// Nothing to show yet.
    Loading,
    /// Nothing to show and the load failed; offers refresh as retry.
    Error(&'a str),
    /// Headline and/or list. `banner` carries an error only when it would
    /// sit on top of a populated list.
    Content { banner: Option<&'a str> },
}

pub fn screen(state: &ViewState) -> Screen<'_> {
    if state.is_loading() && state.is_empty() {
        return Screen::Loading;
    }
    match state.error_message.as_deref() {
        Some(message) if state.is_empty() => Screen::Error(message),
        Some(message) if !state.articles.is_empty() => Screen::Content {
            banner: Some(message),
        },
        _ => Screen::Content { banner: None },
    }
}

pub struct TuiApp {
    pub state: ViewState,
    pub selected: usize,
    pub list_state: ListState,
    /// Rows the article list had at the last render.
    pub viewport_rows: usize,
    pub input_mode: InputMode,
    pub search_input: String,
    /// Query of the active search, for the title bar.
    pub active_query: Option<String>,
    pub scroll_trigger: ScrollTrigger,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            state: ViewState::default(),
            selected: 0,
            list_state,
            viewport_rows: 0,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            active_query: None,
            scroll_trigger: ScrollTrigger::new(),
            status_message: None,
            should_quit: false,
        }
    }

    /// Take a new snapshot from the controller.
    pub fn apply_state(&mut self, state: ViewState) {
        // A fresh load sequence starts from the top.
        if state.is_loading() {
            self.selected = 0;
            *self.list_state.offset_mut() = 0;
            self.scroll_trigger.reset();
        }
        self.state = state;
        self.clamp_selection();
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.state.articles.get(self.selected)
    }

    /// Index of the last list row on screen, if any.
    pub fn last_visible(&self) -> Option<usize> {
        let total = self.state.articles.len();
        (self.list_state.offset() + self.viewport_rows)
            .min(total)
            .checked_sub(1)
    }

    /// Report the drawn position to the controller, measured against the
    /// snapshot that was drawn.
    pub fn check_scroll(&mut self, controller: &PaginationController) -> Option<JoinHandle<()>> {
        let last_visible = self.last_visible();
        controller.on_scroll(&mut self.scroll_trigger, &self.state, last_visible)
    }

    pub fn move_up(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.select(self.selected + 1);
    }

    pub fn next_page(&mut self) {
        self.select(self.selected + PAGE_SIZE);
    }

    pub fn prev_page(&mut self) {
        self.select(self.selected.saturating_sub(PAGE_SIZE));
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave search mode, returning the typed query.
    pub fn submit_search(&mut self) -> String {
        self.input_mode = InputMode::Normal;
        let query = self.search_input.trim().to_string();
        self.active_query = if query.is_empty() {
            None
        } else {
            Some(query.clone())
        };
        query
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let max_index = self.state.articles.len().saturating_sub(1);
        self.selected = self.selected.min(max_index);
        self.list_state.select(Some(self.selected));
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
