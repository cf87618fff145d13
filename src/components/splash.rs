// ABOUTME: Splash and gateway screens: the wordmark, and the single call to action

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::palette::{DARK_BG, GOLD, MUTED_GRAY, SELECTION_GREEN, SOFT_WHITE};
use super::wizard::render_footer;
use crate::screens::SplashScreen;

const WORDMARK: [&str; 5] = [
    "██╗     ██╗   ██╗██╗   ██╗ ██████╗ ███╗   ██╗ █████╗ ",
    "██║     ██║   ██║╚██╗ ██╔╝██╔═══██╗████╗  ██║██╔══██╗",
    "██║     ██║   ██║ ╚████╔╝ ██║   ██║██╔██╗ ██║███████║",
    "███████╗╚██████╔╝  ╚██╔╝  ╚██████╔╝██║ ╚████║██╔══██║",
    "╚══════╝ ╚═════╝    ╚═╝    ╚═════╝ ╚═╝  ╚═══╝╚═╝  ╚═╝",
];

const TAGLINE: &str = "Meet people worth knowing";

fn wordmark_lines() -> Vec<Line<'static>> {
    WORDMARK
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(GOLD))))
        .collect()
}

fn centered_column(area: Rect, height: u16) -> Rect {
    let top = area.height.saturating_sub(height) / 2;
    Rect {
        y: area.y + top,
        height: height.min(area.height),
        ..area
    }
}

pub struct SplashComponent;

impl SplashComponent {
    pub fn render(frame: &mut Frame, area: Rect, splash: &SplashScreen) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let mut lines = wordmark_lines();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(TAGLINE, Style::default().fg(MUTED_GRAY))));
        lines.push(Line::from(""));
        if splash.is_checking() {
            lines.push(Line::from(Span::styled(
                "Checking your session...",
                Style::default().fg(SOFT_WHITE),
            )));
        }

        let height = lines.len() as u16;
        let logo = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(logo, centered_column(area, height));
    }
}

pub struct GatewayComponent;

impl GatewayComponent {
    pub fn render(frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(area);

        let mut lines = wordmark_lines();
        lines.extend([
            Line::from(""),
            Line::from(Span::styled(TAGLINE, Style::default().fg(SOFT_WHITE))),
            Line::from(""),
            Line::from(""),
            Line::from(vec![
                Span::styled("  ", Style::default()),
                Span::styled(
                    " Continue with phone number ",
                    Style::default()
                        .fg(DARK_BG)
                        .bg(SELECTION_GREEN)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  ", Style::default()),
            ]),
        ]);

        let height = lines.len() as u16;
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered_column(layout[0], height),
        );
        render_footer(frame, layout[1], &[("Enter", "continue"), ("Esc", "quit")]);
    }
}
