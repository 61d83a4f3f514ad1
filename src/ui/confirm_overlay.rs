use crate::state::DeleteToken;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const TITLE: &str = "Delete to do?";
const MESSAGE: &str = "Are you sure you want to delete";

/// Answer given in the confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirm,
    Cancel,
}

/// Modal asking whether to delete one item. Owns the pending delete token.
pub struct ConfirmDialog {
    token: DeleteToken,
    item_text: String,
    focus: ConfirmResult,
}

impl ConfirmDialog {
    /// Create a dialog with focus on "Cancel"
    pub fn new(token: DeleteToken, item_text: String) -> Self {
        Self {
            token,
            item_text,
            focus: ConfirmResult::Cancel,
        }
    }

    pub fn focus(&self) -> ConfirmResult {
        self.focus
    }

    pub fn into_token(self) -> DeleteToken {
        self.token
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Option<ConfirmResult> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    ConfirmResult::Cancel => ConfirmResult::Confirm,
                    ConfirmResult::Confirm => ConfirmResult::Cancel,
                };
                None
            }
            KeyCode::Enter => Some(self.focus),
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(ConfirmResult::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(ConfirmResult::Cancel),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = centered_rect(50, 30, frame.area());

        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", TITLE))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let message = Paragraph::new(MESSAGE).alignment(Alignment::Center);
        frame.render_widget(message, chunks[0]);

        let item = Paragraph::new(format!("\"{}\"", self.item_text))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(item, chunks[1]);

        let buttons = Line::from(vec![
            button("Cancel", self.focus() == ConfirmResult::Cancel),
            Span::raw("    "),
            button("I'm Sure", self.focus() == ConfirmResult::Confirm),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(Paragraph::new(buttons), chunks[2]);
    }
}

fn button(label: &str, focused: bool) -> Span<'_> {
    let style = if focused {
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" {} ", label), style)
}

/// Calculate a centered rectangle for the overlay
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::state::{DEFAULT_STORAGE_KEY, StateManager};
    use crate::storage::memory::MemoryStore;
    use crossterm::event::KeyEvent;
    use std::sync::Arc;

    fn dialog() -> ConfirmDialog {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let _guard = rt.enter();
        let mut state = StateManager::new(Arc::new(MemoryStore::new()), DEFAULT_STORAGE_KEY);
        state.set_mode(Category::Travel);
        let id = state.add("Visit Tokyo").unwrap();
        let token = state.request_delete(&id).unwrap();
        ConfirmDialog::new(token, "Visit Tokyo".to_string())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
    }

    #[test]
    fn test_focus_starts_on_cancel() {
        let mut d = dialog();
        assert_eq!(d.focus(), ConfirmResult::Cancel);
        assert_eq!(d.handle_key(key(KeyCode::Enter)), Some(ConfirmResult::Cancel));
    }

    #[test]
    fn test_arrow_moves_focus_to_confirm() {
        let mut d = dialog();
        assert!(d.handle_key(key(KeyCode::Right)).is_none());
        assert_eq!(d.focus(), ConfirmResult::Confirm);
        assert_eq!(d.handle_key(key(KeyCode::Enter)), Some(ConfirmResult::Confirm));
        assert!(d.handle_key(key(KeyCode::Tab)).is_none());
        assert_eq!(d.focus(), ConfirmResult::Cancel);
    }

    #[test]
    fn test_shortcuts() {
        let mut d = dialog();
        assert_eq!(d.handle_key(key(KeyCode::Char('y'))), Some(ConfirmResult::Confirm));
        assert_eq!(d.handle_key(key(KeyCode::Char('n'))), Some(ConfirmResult::Cancel));
        assert_eq!(d.handle_key(key(KeyCode::Esc)), Some(ConfirmResult::Cancel));
        assert!(d.handle_key(key(KeyCode::Char('q'))).is_none());
    }

    #[test]
    fn test_render_highlights_focused_button() {
        use ratatui::{Terminal, backend::TestBackend};

        let mut d = dialog();
        d.handle_key(key(KeyCode::Right));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| d.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let focused = buffer
            .content()
            .iter()
            .filter(|cell| cell.bg == Color::Yellow)
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(focused.contains("I'm Sure"));
        assert!(!focused.contains("Cancel"));
    }

    #[test]
    fn test_into_token_keeps_item() {
        let d = dialog();
        assert!(d.into_token().id().millis().is_some());
    }
}
