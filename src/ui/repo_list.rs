use crate::filter::{format_updated, ReadmeFilter, RepoFilter};
use crate::github::types::RepositorySummary;
use crate::ui::{theme, truncate_with_ellipsis};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Rows drawn per repository.
pub const ENTRY_HEIGHT: usize = 2;

pub struct RepoList<'a> {
    pub repos: &'a [&'a RepositorySummary],
    pub total: usize,
    pub selected: usize,
    pub scroll: usize,
    pub filter: &'a RepoFilter,
    pub has_user: bool,
    pub focused: bool,
}

impl<'a> Widget for RepoList<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let border_style = if self.focused {
            Style::default().fg(theme::ACTIVE_BORDER)
        } else {
            Style::default().fg(theme::BORDER_COLOR)
        };

        let mut block = Block::default()
            .title(format!(" Repositories ({}) ", self.total))
            .borders(Borders::ALL)
            .border_style(border_style);
        if self.filter.readme != ReadmeFilter::All {
            block = block.title_top(
                Line::from(Span::styled(
                    format!(" {} ", self.filter.readme.label()),
                    Style::default().fg(theme::FILTER_COLOR),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if let Some(message) = self.empty_message() {
            buf.set_line(
                inner.x + 1,
                inner.y,
                &Line::from(Span::styled(message, Style::default().fg(theme::DIM_TEXT))),
                inner.width.saturating_sub(1),
            );
            return;
        }

        let visible = inner.height as usize / ENTRY_HEIGHT;
        let width = inner.width.saturating_sub(1) as usize;

        for (i, repo) in self.repos.iter().skip(self.scroll).take(visible).enumerate() {
            let y = inner.y + (i * ENTRY_HEIGHT) as u16;
            let is_selected = self.scroll + i == self.selected;

            buf.set_line(inner.x + 1, y, &header_line(repo), width as u16);
            let description = if repo.description.is_empty() {
                String::new()
            } else {
                truncate_with_ellipsis(&repo.description, width.saturating_sub(2))
            };
            buf.set_line(
                inner.x + 1,
                y + 1,
                &Line::from(Span::styled(
                    format!("  {description}"),
                    Style::default().fg(theme::DIM_TEXT),
                )),
                width as u16,
            );

            if is_selected {
                for row in y..(y + ENTRY_HEIGHT as u16).min(inner.bottom()) {
                    for x in inner.x..inner.right() {
                        buf[(x, row)].set_style(Style::default().bg(theme::SELECTED_BG));
                    }
                }
            }
        }
    }
}

impl<'a> RepoList<'a> {
    fn empty_message(&self) -> Option<&'static str> {
        if !self.has_user {
            Some("Search for a user to list repositories.")
        } else if self.total == 0 {
            Some("This user has no public repositories.")
        } else if self.repos.is_empty() {
            Some("No repositories found matching your criteria.")
        } else {
            None
        }
    }
}

fn header_line(repo: &RepositorySummary) -> Line<'_> {
    let mut spans = vec![Span::styled(
        repo.name.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if repo.has_readme {
        spans.push(Span::styled(
            " README",
            Style::default().fg(theme::README_BADGE),
        ));
    }
    spans.push(Span::styled(
        format!("  {}", repo.language),
        Style::default().fg(theme::language_color(&repo.language)),
    ));
    spans.push(Span::styled(
        format!("  \u{2605} {}", repo.stargazers_count),
        Style::default().fg(theme::STAR_COLOR),
    ));
    spans.push(Span::raw(format!("  \u{2442} {}", repo.forks_count)));
    spans.push(Span::styled(
        format!("  Updated {}", format_updated(&repo.updated_at)),
        Style::default().fg(theme::DIM_TEXT),
    ));
    Line::from(spans)
}
