use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

const SUBTITLE: &str = "Search for a GitHub user to view their projects and README files";

pub struct SearchBar<'a> {
    pub query: &'a str,
    pub editing: bool,
    pub loading: bool,
    pub error: Option<&'a str>,
}

impl<'a> Widget for SearchBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let border = if self.editing {
            theme::ACTIVE_BORDER
        } else {
            theme::BORDER_COLOR
        };
        let block = Block::default()
            .title(Span::styled(
                " lookout ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme::HEADER_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut spans = vec![Span::styled(
            "> ",
            Style::default()
                .fg(theme::FILTER_COLOR)
                .add_modifier(Modifier::BOLD),
        )];
        if self.query.is_empty() && !self.editing {
            spans.push(Span::styled(
                "Enter GitHub username... (s to edit)",
                Style::default().fg(theme::DIM_TEXT),
            ));
        } else {
            spans.push(Span::raw(self.query.to_string()));
        }
        if self.editing {
            spans.push(Span::styled(
                "\u{258c}",
                Style::default().fg(theme::FILTER_COLOR),
            ));
        }
        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);

        // Right zone: search state
        let right = if self.loading {
            "Searching\u{2026} "
        } else if self.editing {
            "Enter search  Esc cancel "
        } else {
            ""
        };
        let right_w = UnicodeWidthStr::width(right);
        let area_w = inner.width as usize;
        if !right.is_empty() && area_w > right_w {
            let right_x = inner.x + (area_w - right_w) as u16;
            buf.set_line(
                right_x,
                inner.y,
                &Line::from(Span::styled(right, Style::default().fg(theme::DIM_TEXT))),
                right_w as u16,
            );
        }

        if inner.height < 2 {
            return;
        }
        let second = match self.error {
            Some(err) => Line::from(Span::styled(
                err.to_string(),
                Style::default()
                    .fg(theme::ERROR_FG)
                    .add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(SUBTITLE, Style::default().fg(theme::DIM_TEXT))),
        };
        buf.set_line(inner.x, inner.y + 1, &second, inner.width);
    }
}
