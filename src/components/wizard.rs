// ABOUTME: Renders any stepped form: progress header, the current step's inputs, and footer hints
// Screens supply the title, optional intro lines and notices; the form supplies everything else

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::confirmation_dialog::ConfirmationDialogComponent;
use super::palette::{
    CORNFLOWER_BLUE, DARK_BG, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE,
    SUBDUED_BORDER,
};
use super::slots::SlotsComponent;
use crate::screens::FormBinding;
use crate::wizard::{BoundInput, DateInput, DatePart, FieldInput, Wizard};

/// Everything a screen hands over to draw its form
pub struct WizardView<'a> {
    pub title: &'a str,
    pub form: &'a FormBinding,
    pub intro: Vec<Line<'a>>,
    pub notice: Option<Line<'a>>,
    pub error: Option<&'a str>,
    pub hints: Vec<(&'static str, &'static str)>,
}

impl<'a> WizardView<'a> {
    pub fn new(title: &'a str, form: &'a FormBinding) -> Self {
        Self {
            title,
            form,
            intro: Vec::new(),
            notice: None,
            error: None,
            hints: vec![("Enter", "continue"), ("Esc", "back"), ("Tab", "next field")],
        }
    }

    pub fn intro(mut self, lines: Vec<Line<'a>>) -> Self {
        self.intro = lines;
        self
    }

    pub fn notice(mut self, notice: Option<Line<'a>>) -> Self {
        self.notice = notice;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn hints(mut self, hints: Vec<(&'static str, &'static str)>) -> Self {
        self.hints = hints;
        self
    }
}

pub struct WizardComponent {
    dialog: ConfirmationDialogComponent,
}

impl WizardComponent {
    pub fn new() -> Self {
        Self {
            dialog: ConfirmationDialogComponent::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, view: &WizardView) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header with progress
                Constraint::Min(8),    // Step content
                Constraint::Length(1), // Notice / error
                Constraint::Length(3), // Footer
            ])
            .split(area);

        self.render_header(frame, layout[0], view);
        self.render_step(frame, layout[1], view);
        render_status_line(frame, layout[2], view.notice.clone(), view.error);
        render_footer(frame, layout[3], &view.hints);

        if let Some(review) = view.form.review() {
            self.dialog.render(frame, area, review);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, view: &WizardView) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let title = Paragraph::new(Span::styled(
            view.title,
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        let progress = Paragraph::new(progress_line(view.form.wizard())).alignment(Alignment::Center);
        frame.render_widget(progress, rows[1]);
    }

    fn render_step(&self, frame: &mut Frame, area: Rect, view: &WizardView) {
        let wizard = view.form.wizard();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" {} ", wizard.current().title))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let inputs = view.form.visible_inputs();
        let mut constraints = vec![Constraint::Length(view.intro.len() as u16 + 1)];
        constraints.extend(inputs.iter().map(|b| Constraint::Length(input_height(b))));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(inner);

        let intro = Paragraph::new(view.intro.clone())
            .style(Style::default().fg(SOFT_WHITE))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(intro, rows[0]);

        for (index, bound) in inputs.iter().enumerate() {
            let focused = index == view.form.focus() && view.form.review().is_none();
            render_input(frame, rows[index + 1], bound, focused);
        }
    }
}

impl Default for WizardComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Dots for done, current and upcoming steps
pub fn progress_line(wizard: &Wizard) -> Line<'static> {
    let current = wizard.step();
    let mut spans = Vec::new();
    for index in 1..=wizard.total() {
        let (icon, style) = if wizard.is_complete() || index < current {
            ("●", Style::default().fg(SELECTION_GREEN))
        } else if index == current {
            ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        } else {
            ("○", Style::default().fg(MUTED_GRAY))
        };
        spans.push(Span::styled(icon, style));
        if index < wizard.total() {
            spans.push(Span::styled(" ─ ", Style::default().fg(SUBDUED_BORDER)));
        }
    }
    spans.push(Span::styled(
        format!("   Step {} of {}", current, wizard.total()),
        Style::default().fg(MUTED_GRAY),
    ));
    Line::from(spans)
}

fn input_height(bound: &BoundInput) -> u16 {
    match bound.input {
        FieldInput::Code(_) => 5,
        _ => 4,
    }
}

fn render_input(frame: &mut Frame, area: Rect, bound: &BoundInput, focused: bool) {
    let label_style = if focused {
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED_GRAY)
    };
    let label = Paragraph::new(Span::styled(bound.label, label_style));
    frame.render_widget(label, Rect { height: 1, ..area });

    let body = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };

    if let FieldInput::Code(slots) = &bound.input {
        SlotsComponent::render(frame, body, slots, focused);
        return;
    }

    let content = match &bound.input {
        FieldInput::Choice(choice) => {
            let mut spans = Vec::new();
            for (index, option) in choice.options().iter().enumerate() {
                let style = if choice.selected_index() == Some(index) {
                    Style::default().fg(DARK_BG).bg(SELECTION_GREEN)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };
                spans.push(Span::styled(format!(" {} ", option), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        }
        FieldInput::Date(date) => date_line(date, focused),
        other => {
            let mut spans = vec![Span::styled(other.display(), Style::default().fg(SOFT_WHITE))];
            if focused {
                spans.push(Span::styled("│", Style::default().fg(GOLD)));
            }
            Line::from(spans)
        }
    };

    let border = if focused { GOLD } else { SUBDUED_BORDER };
    let field = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(DARK_BG)),
    );
    frame.render_widget(field, Rect {
        height: body.height.min(3),
        ..body
    });
}

fn date_line(date: &DateInput, focused: bool) -> Line<'static> {
    let part_style = |part: DatePart| {
        if focused && date.part() == part {
            Style::default().fg(DARK_BG).bg(GOLD)
        } else if date.is_touched() {
            Style::default().fg(SOFT_WHITE)
        } else {
            Style::default().fg(MUTED_GRAY)
        }
    };
    let separator = || Span::styled(" / ", Style::default().fg(MUTED_GRAY));
    Line::from(vec![
        Span::styled(format!("{:02}", date.day()), part_style(DatePart::Day)),
        separator(),
        Span::styled(format!("{:02}", date.month()), part_style(DatePart::Month)),
        separator(),
        Span::styled(format!("{:04}", date.year()), part_style(DatePart::Year)),
    ])
}

/// One-line notice, replaced by the error when there is one
pub fn render_status_line(frame: &mut Frame, area: Rect, notice: Option<Line>, error: Option<&str>) {
    let line = match (error, notice) {
        (Some(error), _) => Line::from(vec![
            Span::styled("✗ ", Style::default().fg(ERROR_RED)),
            Span::styled(error.to_string(), Style::default().fg(ERROR_RED)),
        ]),
        (None, Some(notice)) => notice,
        (None, None) => return,
    };
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().bg(DARK_BG)),
        area,
    );
}

pub fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&'static str, &'static str)]) {
    let mut spans = Vec::new();
    for (index, (key, action)) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(SUBDUED_BORDER)));
        }
        spans.push(Span::styled(*key, Style::default().fg(GOLD).add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(format!(" {}", action), Style::default().fg(MUTED_GRAY)));
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SUBDUED_BORDER))
                .style(Style::default().bg(PANEL_BG)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
