// ABOUTME: Resend gate for the code-entry step
// Counts seconds down from a fixed start; resend unlocks at zero

/// Seconds-remaining countdown. Ticks only while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendCountdown {
    initial: u32,
    remaining: u32,
    running: bool,
}

impl ResendCountdown {
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            remaining: initial,
            running: false,
        }
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Back to the initial value and ticking. Partial progress is discarded.
    pub fn restart(&mut self) {
        self.remaining = self.initial;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// One elapsed second. Stops by itself once it reaches zero.
    pub fn tick(&mut self) -> u32 {
        if self.running && self.remaining > 0 {
            self.remaining -= 1;
        }
        if self.remaining == 0 {
            self.running = false;
        }
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }

    /// `MM:SS`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_zero_after_initial_ticks() {
        let mut countdown = ResendCountdown::new(120);
        countdown.restart();
        for _ in 0..119 {
            countdown.tick();
        }
        assert!(!countdown.can_resend());
        assert_eq!(countdown.display(), "00:01");
        countdown.tick();
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.can_resend());
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_restart_discards_elapsed_time() {
        let mut countdown = ResendCountdown::new(120);
        countdown.restart();
        for _ in 0..45 {
            countdown.tick();
        }
        countdown.stop();
        countdown.restart();
        assert_eq!(countdown.remaining(), 120);
        assert_eq!(countdown.display(), "02:00");
    }

    #[test]
    fn test_stopped_countdown_ignores_ticks() {
        let mut countdown = ResendCountdown::new(10);
        assert_eq!(countdown.tick(), 10);
        countdown.restart();
        countdown.tick();
        countdown.stop();
        assert_eq!(countdown.tick(), 9);
    }
}
