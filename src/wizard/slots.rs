// ABOUTME: Fixed-length digit slot sequence used for OTP and referral code entry
// Pure focus/content choreography; completeness checks live in the validators

use super::field::FieldValue;

/// Ordered single-digit slots with a focus cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitSlots {
    slots: Vec<Option<char>>,
    focus: usize,
}

impl DigitSlots {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            focus: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the focused slot (0-based)
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < self.slots.len() {
            self.focus = index;
        }
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Type into the focused slot. Non-digits are rejected and leave the slot
    /// unchanged. A digit fills the slot and moves focus right, staying put on
    /// the last slot. Returns whether the input was accepted.
    pub fn input(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || self.slots.is_empty() {
            return false;
        }
        self.slots[self.focus] = Some(c);
        if self.focus + 1 < self.slots.len() {
            self.focus += 1;
        }
        true
    }

    /// Backspace on the focused slot. A filled slot is cleared and focus steps
    /// left; an empty slot only moves focus left without touching the
    /// neighbour's digit.
    pub fn backspace(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        if self.slots[self.focus].take().is_some() {
            self.focus = self.focus.saturating_sub(1);
        } else if self.focus > 0 {
            self.focus -= 1;
        }
    }

    /// Type a whole string as consecutive keystrokes (paste)
    pub fn input_str(&mut self, s: &str) {
        for c in s.chars() {
            self.input(c);
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.focus = 0;
    }

    /// Every slot filled with a decimal digit
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_some_and(|c| c.is_ascii_digit()))
    }

    /// Assembled code, skipping empty slots
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    pub fn to_field(&self) -> FieldValue {
        FieldValue::Code(self.slots.clone())
    }
}
