use crate::model::{Category, Item};
use crate::state::{LoadOutcome, StateManager};
use crate::storage::KeyValueStore;
use crate::ui::confirm_overlay::{ConfirmDialog, ConfirmResult};
use tracing::info;

/// Input mode for the text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Main application state: the state manager plus everything only the view needs.
pub struct App<S: KeyValueStore> {
    pub state: StateManager<S>,
    pub should_quit: bool,
    pub show_help: bool,

    // Text field
    pub input: String,
    pub input_mode: InputMode,

    // Index into the visible items
    pub selected: usize,

    // Open delete confirmation, if any
    pub confirm: Option<ConfirmDialog>,

    pub status_msg: String,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(state: StateManager<S>) -> Self {
        Self {
            state,
            should_quit: false,
            show_help: false,

            input: String::new(),
            input_mode: InputMode::Normal,

            selected: 0,
            confirm: None,

            status_msg: "Loading...".to_string(),
        }
    }

    /// Initial data load.
    pub async fn init(&mut self) {
        self.status_msg = match self.state.load().await {
            LoadOutcome::Loaded(n) => format!("{} to dos loaded", n),
            LoadOutcome::Empty => "Nothing saved yet".to_string(),
            // Details are in the log; the list simply starts empty.
            LoadOutcome::Failed => String::new(),
        };
        self.clamp_selection();
    }

    pub fn visible_items(&self) -> Vec<&Item> {
        self.state.visible_items().collect()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.state.visible_items().nth(self.selected)
    }

    pub fn select_mode(&mut self, mode: Category) {
        self.state.set_mode(mode);
        self.selected = 0;
        self.clamp_selection();
    }

    pub fn toggle_mode(&mut self) {
        self.select_mode(self.state.mode().toggle());
    }

    /// Add the typed text in the active mode. The buffer is only cleared
    /// when an item was actually created.
    pub fn submit_text(&mut self) {
        if let Some(id) = self.state.add(&self.input) {
            self.input.clear();
            if let Some(pos) = self.state.visible_items().position(|item| item.id == id) {
                self.selected = pos;
            }
            self.status_msg = format!("Added to {}", self.state.mode().label());
        }
    }

    /// Open the confirmation dialog for the highlighted item.
    pub fn request_delete(&mut self) {
        if self.confirm.is_some() {
            return;
        }
        let Some(item) = self.selected_item() else {
            return;
        };
        let text = item.text.clone();
        if let Some(token) = self.state.request_delete(&item.id) {
            self.confirm = Some(ConfirmDialog::new(token, text));
        }
    }

    /// Apply the user's answer to the open dialog.
    pub fn resolve_confirm(&mut self, result: ConfirmResult) {
        let Some(dialog) = self.confirm.take() else {
            return;
        };
        let token = dialog.into_token();
        match result {
            ConfirmResult::Confirm => {
                info!(id = %token.id(), "deleting item");
                self.state.confirm_delete(token);
                self.status_msg = "Deleted".to_string();
            }
            ConfirmResult::Cancel => {
                self.state.cancel_delete(token);
                self.status_msg.clear();
            }
        }
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        let len = self.state.visible_items().count();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.state.visible_items().count();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Flush pending writes before exit.
    pub async fn shutdown(self) {
        self.state.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DEFAULT_STORAGE_KEY;
    use crate::storage::memory::MemoryStore;
    use std::sync::Arc;

    fn app(store: &MemoryStore) -> App<MemoryStore> {
        App::new(StateManager::new(Arc::new(store.clone()), DEFAULT_STORAGE_KEY))
    }

    fn texts(app: &App<MemoryStore>) -> Vec<String> {
        app.visible_items().iter().map(|item| item.text.clone()).collect()
    }

    #[tokio::test]
    async fn test_submit_clears_buffer_only_on_success() {
        let store = MemoryStore::new();
        let mut app = app(&store);

        app.input = "  ".to_string();
        app.submit_text();
        assert_eq!(app.input, "  ");
        assert!(app.state.is_empty());

        app.input = "Buy milk".to_string();
        app.submit_text();
        assert!(app.input.is_empty());
        assert_eq!(texts(&app), vec!["Buy milk"]);
    }

    #[tokio::test]
    async fn test_delete_flow_confirm() {
        let store = MemoryStore::new();
        let mut app = app(&store);
        app.input = "X".to_string();
        app.submit_text();

        app.request_delete();
        assert!(app.confirm.is_some());
        // A second request while the dialog is open is ignored.
        app.request_delete();

        app.resolve_confirm(ConfirmResult::Confirm);
        assert!(app.confirm.is_none());
        assert!(texts(&app).is_empty());
        app.shutdown().await;

        let mut fresh = StateManager::new(Arc::new(store.clone()), DEFAULT_STORAGE_KEY);
        assert_eq!(fresh.load().await, LoadOutcome::Loaded(0));
    }

    #[tokio::test]
    async fn test_delete_flow_cancel() {
        let store = MemoryStore::new();
        let mut app = app(&store);
        app.input = "X".to_string();
        app.submit_text();

        app.request_delete();
        app.resolve_confirm(ConfirmResult::Cancel);
        assert!(app.confirm.is_none());
        assert_eq!(texts(&app), vec!["X"]);
    }

    #[tokio::test]
    async fn test_request_delete_on_empty_list() {
        let store = MemoryStore::new();
        let mut app = app(&store);
        app.request_delete();
        assert!(app.confirm.is_none());
    }

    #[tokio::test]
    async fn test_selection_clamped_on_mode_switch() {
        let store = MemoryStore::new();
        let mut app = app(&store);
        for text in ["a", "b", "c"] {
            app.input = text.to_string();
            app.submit_text();
        }
        assert_eq!(app.selected, 2);
        app.select_prev();
        assert_eq!(app.selected_item().map(|i| i.text.as_str()), Some("b"));

        app.toggle_mode();
        assert_eq!(app.state.mode(), Category::Travel);
        assert_eq!(app.selected, 0);
        assert!(app.selected_item().is_none());

        app.select_mode(Category::Cheering);
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);
    }

    #[tokio::test]
    async fn test_submit_highlights_new_item_before_foreign_ids() {
        let store = MemoryStore::with_entry(
            DEFAULT_STORAGE_KEY,
            r#"{"legacy":{"text":"imported","work":true}}"#,
        );
        let mut app = app(&store);
        app.init().await;

        app.input = "fresh".to_string();
        app.submit_text();
        assert_eq!(texts(&app), vec!["fresh", "imported"]);
        assert_eq!(app.selected_item().map(|i| i.text.as_str()), Some("fresh"));
    }

    #[tokio::test]
    async fn test_init_reports_load() {
        let store = MemoryStore::with_entry(
            DEFAULT_STORAGE_KEY,
            r#"{"1":{"text":"a","work":true},"2":{"text":"b","work":false}}"#,
        );
        let mut app = app(&store);
        app.init().await;
        assert_eq!(app.status_msg, "2 to dos loaded");
        assert_eq!(texts(&app), vec!["a"]);
    }
}
