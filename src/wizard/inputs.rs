// ABOUTME: Field-input adapters that turn keystrokes into wizard field values
// Text, digits-only, immutable-prefix, choice, date picker and digit slots

use chrono::{Datelike, NaiveDate};

use super::field::{FieldName, FieldValue};
use super::slots::DigitSlots;

/// Plain single-line text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn input(&mut self, c: char) {
        if !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Digits only, truncated to `max_len` (phone numbers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitsInput {
    value: String,
    max_len: usize,
}

impl DigitsInput {
    pub fn new(max_len: usize) -> Self {
        Self {
            value: String::new(),
            max_len,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Non-digits are dropped; input past `max_len` is ignored
    pub fn input(&mut self, c: char) {
        if c.is_ascii_digit() && self.value.len() < self.max_len {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }
}

/// Text behind a prefix the user cannot delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedInput {
    prefix: &'static str,
    value: String,
}

impl PrefixedInput {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            value: prefix.to_string(),
        }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn input(&mut self, c: char) {
        if !c.is_control() && !c.is_whitespace() {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.value.len() > self.prefix.len() {
            self.value.pop();
        }
    }
}

/// One option out of a fixed list, cycled with up/down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceInput {
    options: &'static [&'static str],
    selected: Option<usize>,
}

impl ChoiceInput {
    pub fn new(options: &'static [&'static str]) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    /// Start with the first option already chosen
    pub fn preselected(options: &'static [&'static str]) -> Self {
        Self {
            options,
            selected: (!options.is_empty()).then_some(0),
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&'static str> {
        self.selected.map(|i| self.options[i])
    }

    pub fn cycle(&mut self, delta: i32) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len() as i32;
        let next = match self.selected {
            None if delta >= 0 => 0,
            None => len - 1,
            Some(i) => (i as i32 + delta).rem_euclid(len),
        };
        self.selected = Some(next as usize);
    }

    /// Jump straight to option `index`
    pub fn select(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = Some(index);
        }
    }
}

/// Part of a date picker under focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Day,
    Month,
    Year,
}

/// Day/month/year wheel picker. The day is clamped to the month's length
/// whenever month or year moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInput {
    day: u32,
    month: u32,
    year: i32,
    min_year: i32,
    max_year: i32,
    part: DatePart,
    touched: bool,
}

impl DateInput {
    /// Picker opened on `today`, offering years from 120 back to next year
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            day: today.day(),
            month: today.month(),
            year: today.year(),
            min_year: today.year() - 120,
            max_year: today.year() + 1,
            part: DatePart::Day,
            touched: false,
        }
    }

    pub fn part(&self) -> DatePart {
        self.part
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn next_part(&mut self, delta: i32) {
        let parts = [DatePart::Day, DatePart::Month, DatePart::Year];
        let idx = parts.iter().position(|p| *p == self.part).unwrap_or(0) as i32;
        self.part = parts[(idx + delta).rem_euclid(3) as usize];
    }

    /// Roll the focused part. Day and month wrap around; the year stops at
    /// the ends of its range.
    pub fn cycle(&mut self, delta: i32) {
        match self.part {
            DatePart::Day => {
                let max = days_in_month(self.year, self.month) as i32;
                self.day = ((self.day as i32 - 1 + delta).rem_euclid(max) + 1) as u32;
            }
            DatePart::Month => {
                self.month = ((self.month as i32 - 1 + delta).rem_euclid(12) + 1) as u32;
            }
            DatePart::Year => {
                self.year = (self.year + delta).clamp(self.min_year, self.max_year);
            }
        }
        self.day = self.day.min(days_in_month(self.year, self.month));
        self.touched = true;
    }

    /// Picked date, once the user has moved the picker at least once
    pub fn date(&self) -> Option<NaiveDate> {
        if !self.touched {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// `DD/MM/YYYY`, or the placeholder before any pick
    pub fn display(&self) -> String {
        if self.touched {
            format!("{:02}/{:02}/{:04}", self.day, self.month, self.year)
        } else {
            "DD/MM/YYYY".to_string()
        }
    }
}

/// Number of days in `month` of `year`, leap years included
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(31, |d| d.day())
}

/// Any adapter bound to a wizard field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(TextInput),
    Digits(DigitsInput),
    Prefixed(PrefixedInput),
    Choice(ChoiceInput),
    Date(DateInput),
    Code(DigitSlots),
}

impl FieldInput {
    pub fn input_char(&mut self, c: char) {
        match self {
            Self::Text(t) => t.input(c),
            Self::Digits(d) => d.input(c),
            Self::Prefixed(p) => p.input(c),
            Self::Code(slots) => {
                slots.input(c);
            }
            Self::Choice(_) | Self::Date(_) => {}
        }
    }

    pub fn backspace(&mut self) {
        match self {
            Self::Text(t) => t.backspace(),
            Self::Digits(d) => d.backspace(),
            Self::Prefixed(p) => p.backspace(),
            Self::Code(slots) => slots.backspace(),
            Self::Choice(_) | Self::Date(_) => {}
        }
    }

    /// Up/down
    pub fn cycle(&mut self, delta: i32) {
        match self {
            Self::Choice(c) => c.cycle(delta),
            Self::Date(d) => d.cycle(delta),
            _ => {}
        }
    }

    /// Left/right within the adapter. Returns false when it has no inner
    /// positions so the caller can use the key for something else.
    pub fn shift(&mut self, delta: i32) -> bool {
        match self {
            Self::Date(d) => {
                d.next_part(delta);
                true
            }
            Self::Code(slots) => {
                let target = slots.focus() as i32 + delta;
                if target >= 0 {
                    slots.set_focus(target as usize);
                }
                true
            }
            _ => false,
        }
    }

    /// Value to store in the wizard, if the adapter holds one yet
    pub fn value(&self) -> Option<FieldValue> {
        match self {
            Self::Text(t) => Some(FieldValue::Text(t.value().to_string())),
            Self::Digits(d) => Some(FieldValue::Text(d.value().to_string())),
            Self::Prefixed(p) => Some(FieldValue::Text(p.value().to_string())),
            Self::Choice(c) => c.selected().map(|s| FieldValue::Choice(s.to_string())),
            Self::Date(d) => d.date().map(FieldValue::Date),
            Self::Code(slots) => Some(slots.to_field()),
        }
    }

    /// Text shown for the adapter's current content
    pub fn display(&self) -> String {
        match self {
            Self::Text(t) => t.value().to_string(),
            Self::Digits(d) => d.value().to_string(),
            Self::Prefixed(p) => p.value().to_string(),
            Self::Choice(c) => c.selected().unwrap_or("").to_string(),
            Self::Date(d) => d.display(),
            Self::Code(slots) => (0..slots.len())
                .map(|i| slots.slot(i).unwrap_or('_'))
                .collect(),
        }
    }
}

/// An adapter placed on a step and wired to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundInput {
    pub field: FieldName,
    pub label: &'static str,
    pub input: FieldInput,
    /// Only shown (and only focusable) while `field` holds this choice
    pub visible_when: Option<(FieldName, &'static str)>,
}

impl BoundInput {
    pub fn new(field: FieldName, label: &'static str, input: FieldInput) -> Self {
        Self {
            field,
            label,
            input,
            visible_when: None,
        }
    }

    pub fn shown_when(mut self, field: FieldName, choice: &'static str) -> Self {
        self.visible_when = Some((field, choice));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_input_drops_non_digits_and_truncates() {
        let mut phone = DigitsInput::new(10);
        for c in "98-76 54a3210999".chars() {
            phone.input(c);
        }
        assert_eq!(phone.value(), "9876543210");
    }

    #[test]
    fn test_prefix_cannot_be_deleted() {
        let mut handle = PrefixedInput::new("@");
        handle.input('a');
        handle.backspace();
        handle.backspace();
        handle.backspace();
        assert_eq!(handle.value(), "@");
        handle.input(' ');
        assert_eq!(handle.value(), "@");
    }

    #[test]
    fn test_choice_cycles_and_wraps() {
        let mut gender = ChoiceInput::new(&["Woman", "Man", "Non-binary", "Other"]);
        assert_eq!(gender.selected(), None);
        gender.cycle(-1);
        assert_eq!(gender.selected(), Some("Other"));
        gender.cycle(1);
        assert_eq!(gender.selected(), Some("Woman"));
    }

    #[test]
    fn test_preselected_choice_starts_on_first_option() {
        let title = ChoiceInput::preselected(&["Mr", "Mrs", "Miss", "Ms"]);
        assert_eq!(title.selected(), Some("Mr"));
    }

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2026, 12), 31);
        assert_eq!(days_in_month(2026, 4), 30);
    }

    #[test]
    fn test_date_picker_clamps_day_on_month_change() {
        let mut picker = DateInput::starting(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert!(picker.date().is_none());
        picker.next_part(1);
        assert_eq!(picker.part(), DatePart::Month);
        picker.cycle(1);
        assert_eq!(picker.date(), NaiveDate::from_ymd_opt(2026, 2, 28));
    }

    #[test]
    fn test_date_picker_year_stops_at_range_end() {
        let mut picker = DateInput::starting(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        picker.next_part(-1);
        assert_eq!(picker.part(), DatePart::Year);
        picker.cycle(5);
        assert_eq!(picker.year(), 2027);
        picker.cycle(-500);
        assert_eq!(picker.year(), 1906);
    }

    #[test]
    fn test_date_picker_day_wraps_within_month() {
        let mut picker = DateInput::starting(NaiveDate::from_ymd_opt(2026, 4, 30).unwrap());
        picker.cycle(1);
        assert_eq!(picker.day(), 1);
        picker.cycle(-1);
        assert_eq!(picker.day(), 30);
        assert_eq!(picker.display(), "30/04/2026");
    }

    #[test]
    fn test_field_input_reports_values() {
        let untouched = FieldInput::Date(DateInput::starting(
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        ));
        assert_eq!(untouched.value(), None);

        let mut code = FieldInput::Code(DigitSlots::new(6));
        code.input_char('1');
        code.input_char('x');
        assert_eq!(code.display(), "1_____");
        assert!(code.shift(-1));
        assert!(!FieldInput::Text(TextInput::new()).shift(1));
    }
}
