// ABOUTME: Confirmation dialog component for two-button prompts with keyboard navigation

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::palette::{CORNFLOWER_BLUE, DARK_BG, GOLD, MUTED_GRAY, SOFT_WHITE};
use crate::screens::ConfirmationDialog;

pub struct ConfirmationDialogComponent;

impl ConfirmationDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, dialog: &ConfirmationDialog) {
        // Taller when a value is under review
        let dialog_width = 60.min(area.width.saturating_sub(4));
        let dialog_height = if dialog.detail.is_some() { 11 } else { 8 };
        let dialog_height = dialog_height.min(area.height);

        let dialog_area = Rect {
            x: area.x + (area.width - dialog_width) / 2,
            y: area.y + (area.height - dialog_height) / 2,
            width: dialog_width,
            height: dialog_height,
        };

        // Clear only the dialog area so the screen underneath stays visible
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", dialog.title))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(DARK_BG));

        let inner_area = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let constraints = if dialog.detail.is_some() {
            vec![
                Constraint::Min(1),    // Message
                Constraint::Length(3), // Value under review
                Constraint::Length(2), // Buttons
            ]
        } else {
            vec![
                Constraint::Min(1),    // Message
                Constraint::Length(2), // Buttons
            ]
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner_area);

        let message = Paragraph::new(dialog.message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(SOFT_WHITE));
        frame.render_widget(message, chunks[0]);

        let button_chunk = if let Some(detail) = &dialog.detail {
            let value = Paragraph::new(detail.as_str())
                .style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(value, chunks[1]);
            2
        } else {
            1
        };

        let button_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[button_chunk]);

        let button = |label: &'static str, selected: bool| {
            let style = if selected {
                Style::default().fg(DARK_BG).bg(SOFT_WHITE)
            } else {
                Style::default().fg(MUTED_GRAY)
            };
            Paragraph::new(label).style(style).alignment(Alignment::Center)
        };

        frame.render_widget(button(dialog.yes_label, dialog.selected_option), button_chunks[0]);
        frame.render_widget(button(dialog.no_label, !dialog.selected_option), button_chunks[1]);
    }
}

impl Default for ConfirmationDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}
