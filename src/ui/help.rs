use super::confirm_overlay::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<10}", keys), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("Ctrl+C", "Quit from anywhere"),
        Line::from(""),
        section("List"),
        binding("c / t", "Show Cheering / Travel"),
        binding("Tab", "Switch between Cheering and Travel"),
        binding("↑/k ↓/j", "Move highlight"),
        binding("i / a / /", "Type a new to do"),
        binding("d / Del", "Delete highlighted to do"),
        Line::from(""),
        section("Typing"),
        binding("Enter", "Add to the current list"),
        binding("Esc", "Stop typing (text is kept)"),
        Line::from(""),
        section("Delete Dialog"),
        binding("←/→ Tab", "Move between Cancel and I'm Sure"),
        binding("Enter", "Choose focused button"),
        binding("y / n", "Delete / keep"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
