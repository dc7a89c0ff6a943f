use crate::github::types::AccountProfile;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ProfilePanel<'a> {
    pub user: Option<&'a AccountProfile>,
}

impl<'a> ProfilePanel<'a> {
    fn lines(&self) -> Vec<Line<'a>> {
        let Some(user) = self.user else {
            return vec![Line::from(Span::styled(
                "No user loaded",
                Style::default().fg(theme::DIM_TEXT),
            ))];
        };

        let label_style = Style::default().fg(theme::ACCENT);
        let mut lines = vec![Line::from(Span::styled(
            user.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        if user.name != user.login {
            lines.push(Line::from(Span::styled(
                format!("@{}", user.login),
                Style::default().fg(theme::DIM_TEXT),
            )));
        }

        if !user.bio.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(user.bio.as_str()));
        }

        lines.push(Line::default());
        for (label, value) in [
            ("Repositories", user.public_repos),
            ("Followers", user.followers),
            ("Following", user.following),
        ] {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<13}"), label_style),
                Span::raw(value.to_string()),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            user.html_url.as_str(),
            Style::default().fg(theme::DIM_TEXT),
        )));
        lines
    }
}

impl<'a> Widget for ProfilePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let block = Block::default()
            .title(" Profile ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_COLOR));

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
