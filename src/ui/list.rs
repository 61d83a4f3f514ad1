use crate::app::{App, InputMode};
use crate::model::Category;
use crate::storage::KeyValueStore;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub fn render<S: KeyValueStore>(app: &App<S>, frame: &mut Frame) {
    let area = frame.area();
    let mode = app.state.mode();

    // Layout: header(3) + input(3) + list(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Mode switch ──
    let mut tabs = Vec::new();
    for category in Category::ALL {
        let style = if category == mode {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tabs.push(Span::styled(format!(" {} ", category.label()), style));
        tabs.push(Span::raw("   "));
    }
    let header = Paragraph::new(Line::from(tabs))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Input ──
    let editing = app.input_mode == InputMode::Editing;
    let input_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input_line = if app.input.is_empty() {
        Line::from(Span::styled(
            mode.placeholder(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(app.input.as_str(), Style::default().fg(Color::White)))
    };
    let input = Paragraph::new(input_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(input_style)
            .title(if editing { " Enter to add, Esc to stop " } else { " i to type " }),
    );
    frame.render_widget(input, chunks[1]);

    if editing {
        let cursor_x = chunks[1].x + 1 + app.input.width() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    // ── Items ──
    let visible = app.visible_items();
    let text_width = (area.width as usize).saturating_sub(10);
    let items: Vec<ListItem> = visible
        .iter()
        .map(|item| {
            let line = Line::from(vec![
                Span::styled(
                    truncate_str(&item.text, text_width),
                    Style::default().fg(Color::White),
                ),
                Span::styled("  ✕", Style::default().fg(Color::DarkGray)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", mode.label()))
                .title_bottom(
                    Line::from(format!(" {} of {} ", visible.len(), app.state.len()))
                        .alignment(Alignment::Right),
                ),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if !visible.is_empty() {
        list_state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list_widget, chunks[2], &mut list_state);

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(empty_hint(app)).style(Style::default().fg(Color::DarkGray)),
            list_inner_row(chunks[2]),
        );
    }

    // ── Status bar ──
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" Tab", key_style),
        Span::raw(" Mode  "),
        Span::styled("i", key_style),
        Span::raw(" Type  "),
        Span::styled("↑↓", key_style),
        Span::raw(" Move  "),
        Span::styled("d", key_style),
        Span::raw(" Delete  "),
        Span::styled("?", key_style),
        Span::raw(" Help  "),
        Span::styled("q", key_style),
        Span::raw(" Quit  "),
        Span::styled(app.status_msg.as_str(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

/// Text shown inside the list block when the active category has no items.
fn empty_hint<S: KeyValueStore>(app: &App<S>) -> String {
    let mode = app.state.mode();
    if app.state.is_empty() {
        return " Nothing saved yet. Press i to add one.".to_string();
    }
    let other = mode.toggle();
    let elsewhere = app
        .state
        .items()
        .values()
        .filter(|item| item.category == other)
        .count();
    format!(" Nothing in {} yet ({} in {})", mode.label(), elsewhere, other.label())
}

/// First inner row of the bordered list block.
fn list_inner_row(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2).min(1),
    }
}

/// Truncate a string to `max_width` characters, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(max_width.saturating_sub(1)).collect();
        result.push('…');
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DEFAULT_STORAGE_KEY, StateManager};
    use crate::storage::memory::MemoryStore;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn screen(app: &App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefgh", 5), "abcd…");
    }

    #[tokio::test]
    async fn test_render_shows_only_active_category() {
        let mut app = App::new(StateManager::new(
            Arc::new(MemoryStore::new()),
            DEFAULT_STORAGE_KEY,
        ));
        app.state.add("Buy milk");
        app.state.set_mode(Category::Travel);
        app.state.add("Visit Tokyo");

        let travel = screen(&app);
        assert!(travel.contains("Visit Tokyo"));
        assert!(!travel.contains("Buy milk"));
        assert!(travel.contains("Where do you want to go"));

        app.state.set_mode(Category::Cheering);
        let cheering = screen(&app);
        assert!(cheering.contains("Buy milk"));
        assert!(cheering.contains("Add a To Do"));
    }

    #[tokio::test]
    async fn test_render_empty_hints() {
        let mut app = App::new(StateManager::new(
            Arc::new(MemoryStore::new()),
            DEFAULT_STORAGE_KEY,
        ));
        assert!(screen(&app).contains("Nothing saved yet"));

        app.state.add("Buy milk");
        app.state.set_mode(Category::Travel);
        assert!(screen(&app).contains("Nothing in Travel yet (1 in Cheering)"));
    }
}
