// ABOUTME: Home shell: tab bar, placeholder feeds, the stored profile and account settings

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Tabs},
    Frame,
};

use super::confirmation_dialog::ConfirmationDialogComponent;
use super::palette::{
    CORNFLOWER_BLUE, DARK_BG, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE,
    SUBDUED_BORDER,
};
use super::wizard::{render_footer, render_status_line};
use crate::flows::ProfileRecord;
use crate::screens::{HomeScreen, HomeTab, ProfileView, SettingsItem};

pub struct HomeComponent {
    dialog: ConfirmationDialogComponent,
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            dialog: ConfirmationDialogComponent::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, home: &HomeScreen) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(6),    // Tab content
                Constraint::Length(1), // Error line
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let titles: Vec<Line> = HomeTab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                Line::from(vec![
                    Span::styled(format!("{} ", i + 1), Style::default().fg(GOLD)),
                    Span::styled(tab.title(), Style::default().fg(SOFT_WHITE)),
                ])
            })
            .collect();
        let tabs = Tabs::new(titles)
            .select(home.tab().index())
            .highlight_style(Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD))
            .divider(Span::styled("│", Style::default().fg(SUBDUED_BORDER)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(CORNFLOWER_BLUE))
                    .style(Style::default().bg(PANEL_BG)),
            );
        frame.render_widget(tabs, layout[0]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" {} ", home.tab().title()))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
        let inner = block.inner(layout[1]);
        frame.render_widget(block, layout[1]);

        match home.tab() {
            HomeTab::Feed => placeholder(frame, inner, "Nothing in your feed yet"),
            HomeTab::Explore => placeholder(frame, inner, "Explore opens once you're off the waitlist"),
            HomeTab::Messages => placeholder(frame, inner, "No messages"),
            HomeTab::Profile => render_profile(frame, inner, home),
            HomeTab::Settings => render_settings(frame, inner, home),
        }

        render_status_line(frame, layout[2], None, home.error_message.as_deref());

        let hints: &[(&str, &str)] = match home.tab() {
            HomeTab::Settings => &[("1-5", "tabs"), ("↑↓", "select"), ("Enter", "choose"), ("q", "quit")],
            HomeTab::Profile => &[("1-5", "tabs"), ("Enter", "retry"), ("q", "quit")],
            _ => &[("1-5", "tabs"), ("←→", "switch"), ("q", "quit")],
        };
        render_footer(frame, layout[3], hints);

        if let Some(dialog) = home.delete_dialog() {
            self.dialog.render(frame, area, dialog);
        }
    }
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder(frame: &mut Frame, area: Rect, text: &'static str) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(text, Style::default().fg(MUTED_GRAY))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_profile(frame: &mut Frame, area: Rect, home: &HomeScreen) {
    match home.profile() {
        None | Some(ProfileView::Loading) => placeholder(frame, area, "Loading profile..."),
        Some(ProfileView::Failed(error)) => {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Could not load your profile: {}", error),
                    Style::default().fg(ERROR_RED),
                )),
                Line::from(Span::styled("Press Enter to try again", Style::default().fg(MUTED_GRAY))),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
        }
        Some(ProfileView::Loaded(record)) => {
            frame.render_widget(Paragraph::new(profile_lines(record, home)), area);
        }
    }
}

fn profile_lines<'a>(record: &'a ProfileRecord, home: &HomeScreen) -> Vec<Line<'a>> {
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", label), Style::default().fg(MUTED_GRAY)),
            Span::styled(value, Style::default().fg(SOFT_WHITE)),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", record.headline(home.today())),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        row("Gender", record.gender.clone()),
        row("Lives in", record.current_location.clone()),
        row("From", record.home_location.clone()),
        row("Email", record.email.clone()),
        row("Instagram", format!("@{}", record.instagram_username)),
        row("LinkedIn", format!("linkedin.com/in/{}", record.linked_in_username)),
    ];
    if let Some(bio) = &record.bio {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", bio), Style::default().fg(SOFT_WHITE))));
    }
    lines
}

fn render_settings(frame: &mut Frame, area: Rect, home: &HomeScreen) {
    let items: Vec<ListItem> = SettingsItem::ALL
        .iter()
        .map(|item| {
            let selected = *item == home.selected_setting();
            let marker = if selected { "▶ " } else { "  " };
            let color = match item {
                SettingsItem::DeleteAccount => ERROR_RED,
                SettingsItem::Logout => SOFT_WHITE,
            };
            let mut style = Style::default().fg(color);
            if selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(GOLD)),
                Span::styled(item.label(), style),
            ]))
        })
        .collect();

    let mut rows = vec![ListItem::new("")];
    rows.extend(items);
    if home.is_busy() {
        rows.push(ListItem::new(""));
        rows.push(ListItem::new(Span::styled("  Working...", Style::default().fg(MUTED_GRAY))));
    }
    frame.render_widget(List::new(rows), area);
}
