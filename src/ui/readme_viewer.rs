use crate::ui::{centered_rect, theme};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

pub struct ReadmeViewer<'a> {
    pub repo_name: &'a str,
    pub content: Option<&'a str>,
    pub loading: bool,
    pub scroll: u16,
}

fn popup_area(area: Rect) -> Rect {
    centered_rect(80, 85, area)
}

/// Region the README text is drawn into for a frame of size `area`.
pub fn text_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(popup_area(area))
}

/// Rows `text` occupies once wrapped to `width` columns.
pub fn rendered_height(text: &str, width: u16) -> usize {
    if width == 0 {
        return text.lines().count();
    }
    Paragraph::new(readme_lines(text))
        .wrap(Wrap { trim: false })
        .line_count(width)
}

impl<'a> Widget for ReadmeViewer<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let popup = popup_area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" {} - README ", self.repo_name))
            .title_bottom(
                Line::from(Span::styled(
                    " j/k scroll \u{b7} g/G top/bottom \u{b7} Esc close ",
                    Style::default().fg(theme::DIM_TEXT),
                ))
                .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        let dim = Style::default().fg(theme::DIM_TEXT);
        let paragraph = match self.content {
            _ if self.loading => Paragraph::new(Line::from(Span::styled("Loading README...", dim))),
            Some(text) if !text.trim().is_empty() => Paragraph::new(readme_lines(text))
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            _ => Paragraph::new(Line::from(Span::styled(
                "No README found for this repository.",
                dim,
            ))),
        };

        paragraph.block(block).render(popup, buf);
    }
}

/// Highlight headings, list bullets and fenced code; everything else is shown verbatim.
pub fn readme_lines(text: &str) -> Vec<Line<'_>> {
    let heading = Style::default()
        .fg(theme::ACCENT)
        .add_modifier(Modifier::BOLD);
    let code = Style::default().fg(theme::CODE_FG);

    let mut in_fence = false;
    let mut lines = Vec::new();
    for raw in text.lines() {
        let trimmed = raw.trim_start();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            lines.push(Line::from(Span::styled(raw, Style::default().fg(theme::DIM_TEXT))));
            continue;
        }
        if in_fence {
            lines.push(Line::from(Span::styled(raw, code)));
        } else if trimmed.starts_with('#') {
            let title = trimmed.trim_start_matches('#').trim_start();
            lines.push(Line::from(Span::styled(title, heading)));
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            let indent = &raw[..raw.len() - trimmed.len()];
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled("\u{2022} ", Style::default().fg(theme::ACCENT)),
                Span::raw(item),
            ]));
        } else {
            lines.push(Line::from(raw));
        }
    }
    lines
}
