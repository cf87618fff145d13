// ABOUTME: Waitlist status screen with the submission progress meter

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::palette::{
    CORNFLOWER_BLUE, DARK_BG, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE,
    SUBDUED_BORDER,
};
use super::wizard::render_footer;
use crate::screens::waitlist::{WaitlistScreen, METER_WIDTH};

pub struct WaitlistComponent;

impl WaitlistComponent {
    pub fn render(frame: &mut Frame, area: Rect, waitlist: &WaitlistScreen) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(9), Constraint::Length(3)])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(" Waitlist ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
        let inner = block.inner(layout[0]);
        frame.render_widget(block, layout[0]);

        let filled = waitlist.filled_cells();
        let meter = Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(SELECTION_GREEN)),
            Span::styled("░".repeat(METER_WIDTH - filled), Style::default().fg(SUBDUED_BORDER)),
            Span::styled(
                format!(" {:>3.0}%", waitlist.progress() * 100.0),
                Style::default().fg(MUTED_GRAY),
            ),
        ]);

        let status = if waitlist.is_loaded() {
            Line::from(vec![
                Span::styled("✓ ", Style::default().fg(SELECTION_GREEN)),
                Span::styled(
                    "You're on the list. We'll let you know when it's your turn.",
                    Style::default().fg(SOFT_WHITE),
                ),
            ])
        } else {
            Line::from(Span::styled(
                "Submitting your application...",
                Style::default().fg(SOFT_WHITE),
            ))
        };

        let lines = vec![Line::from(""), status, Line::from(""), meter];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);

        let hints: &[(&str, &str)] = if waitlist.is_loaded() {
            &[("Enter", "continue"), ("Esc", "back")]
        } else {
            &[("Esc", "back")]
        };
        render_footer(frame, layout[1], hints);
    }
}
