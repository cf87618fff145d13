// ABOUTME: Renders a digit code as a row of single-character boxes

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::palette::{DARK_BG, GOLD, MUTED_GRAY, SOFT_WHITE, SUBDUED_BORDER};
use crate::wizard::DigitSlots;

const SLOT_WIDTH: u16 = 5;
const SLOT_GAP: u16 = 1;

pub struct SlotsComponent;

impl SlotsComponent {
    /// Draw the slots centered in `area`. `focused` is false when another
    /// input on the step holds focus.
    pub fn render(frame: &mut Frame, area: Rect, slots: &DigitSlots, focused: bool) {
        let count = slots.len() as u16;
        if count == 0 {
            return;
        }
        let total_width = count * SLOT_WIDTH + (count - 1) * SLOT_GAP;
        let start_x = area.x + area.width.saturating_sub(total_width) / 2;

        for index in 0..slots.len() {
            let x = start_x + index as u16 * (SLOT_WIDTH + SLOT_GAP);
            if x + SLOT_WIDTH > area.x + area.width {
                break;
            }
            let cell = Rect {
                x,
                y: area.y,
                width: SLOT_WIDTH,
                height: 3.min(area.height),
            };

            let is_current = focused && index == slots.focus();
            let border = if is_current {
                GOLD
            } else if slots.slot(index).is_some() {
                SOFT_WHITE
            } else {
                SUBDUED_BORDER
            };

            let symbol = slots.slot(index).map_or_else(|| " ".to_string(), String::from);
            let digit = Paragraph::new(symbol)
                .style(Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(border))
                        .style(Style::default().bg(DARK_BG)),
                );
            frame.render_widget(digit, cell);
        }

        if area.height > 3 {
            let hint = Paragraph::new(Span::styled(
                format!("{}/{} digits", slots.code().len(), slots.len()),
                Style::default().fg(MUTED_GRAY),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(
                hint,
                Rect {
                    y: area.y + 3,
                    height: 1,
                    ..area
                },
            );
        }
    }
}
