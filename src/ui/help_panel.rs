use crate::ui::{centered_rect, theme};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const KEY_COLUMN: usize = 14;

/// Bindings grouped by the input mode they apply in.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search",
        &[
            ("Enter", "Look up the typed handle"),
            ("Esc", "Leave the search box"),
        ],
    ),
    (
        "Repositories",
        &[
            ("j/k \u{2191}/\u{2193}", "Move"),
            ("PgUp/PgDn", "Page"),
            ("g/G", "First / last"),
            ("Enter", "Open README"),
            ("s i", "Edit search"),
            ("/", "Filter by name or description"),
            ("f", "Cycle README filter"),
            ("q", "Quit"),
        ],
    ),
    (
        "README",
        &[
            ("j/k Space", "Scroll"),
            ("g/G", "Top / bottom"),
            ("Esc q", "Close"),
        ],
    ),
];

pub struct HelpPanel;

impl HelpPanel {
    fn lines() -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD);
        let key = Style::default()
            .fg(theme::FILTER_COLOR)
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        for (i, (title, bindings)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(*title, heading)));
            lines.extend(bindings.iter().map(|(k, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {k:<KEY_COLUMN$}"), key),
                    Span::raw(*desc),
                ])
            }));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Ctrl-c quits from anywhere. Any key closes this help.",
            Style::default().fg(theme::DIM_TEXT),
        )));
        lines
    }
}

impl Widget for HelpPanel {
    fn render(self, area: Rect, buf: &mut Buf) {
        let popup = centered_rect(60, 80, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        Paragraph::new(Self::lines()).block(block).render(popup, buf);
    }
}
