use crate::filter::{ReadmeFilter, RepoFilter};
use crate::ui::input::InputMode;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

pub struct StatusBar<'a> {
    pub handle: Option<&'a str>,
    pub repo_count: usize,
    pub visible_count: usize,
    pub filter: &'a RepoFilter,
    pub mode: InputMode,
    pub cache_entries: usize,
}

fn separator() -> Span<'static> {
    Span::styled(
        "\u{2502}",
        Style::default()
            .fg(theme::BORDER_COLOR)
            .bg(theme::STATUS_BG),
    )
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::STATUS_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        if self.mode == InputMode::Filter {
            let line = Line::from(vec![
                Span::styled(
                    " /",
                    Style::default()
                        .fg(theme::FILTER_COLOR)
                        .bg(theme::STATUS_BG)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(self.filter.term.clone(), bg),
                Span::styled(
                    "\u{258c}",
                    Style::default()
                        .fg(theme::FILTER_COLOR)
                        .bg(theme::STATUS_BG),
                ),
            ]);
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let mut spans = vec![Span::styled(
            format!(" {} ", self.handle.unwrap_or("no user")),
            Style::default()
                .fg(theme::ACCENT)
                .bg(theme::STATUS_BG)
                .add_modifier(Modifier::BOLD),
        )];

        spans.push(separator());
        if self.filter.is_active() {
            spans.push(Span::styled(
                format!(" {}/{} repos ", self.visible_count, self.repo_count),
                bg,
            ));
        } else {
            spans.push(Span::styled(format!(" {} repos ", self.repo_count), bg));
        }

        if !self.filter.term.is_empty() {
            spans.push(separator());
            spans.push(Span::styled(
                format!(" /{} ", self.filter.term),
                Style::default()
                    .fg(theme::FILTER_COLOR)
                    .bg(theme::STATUS_BG),
            ));
        }
        if self.filter.readme != ReadmeFilter::All {
            spans.push(separator());
            spans.push(Span::styled(
                format!(" {} ", self.filter.readme.label()),
                Style::default()
                    .fg(theme::FILTER_COLOR)
                    .bg(theme::STATUS_BG),
            ));
        }

        spans.push(separator());
        spans.push(Span::styled(
            format!(" cached: {} ", self.cache_entries),
            Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG),
        ));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);

        let hint = match self.mode {
            InputMode::Search => "Enter search  Esc back ",
            InputMode::Reader => "j/k scroll  Esc close ",
            _ => "s search  / filter  f readme  ? help ",
        };
        let hint_w = UnicodeWidthStr::width(hint);
        let used: usize = line
            .spans
            .iter()
            .map(|s| UnicodeWidthStr::width(s.content.as_ref()))
            .sum();
        let area_w = area.width as usize;
        if area_w > used + hint_w {
            buf.set_line(
                area.x + (area_w - hint_w) as u16,
                area.y,
                &Line::from(Span::styled(
                    hint,
                    Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG),
                )),
                hint_w as u16,
            );
        }
    }
}
