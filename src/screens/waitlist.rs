// ABOUTME: Waitlist status screen with a simulated submission progress meter

use std::time::Duration;

use tracing::info;

use crate::app::events::AppEvent;
use crate::config::TimingConfig;
use crate::scheduler::{ScheduledTask, TimerFired};
use crate::services::Route;

use super::{Screen, ScreenContext};

/// Cells in the progress meter
pub const METER_WIDTH: usize = 40;

#[derive(Debug)]
pub struct WaitlistScreen {
    period: Duration,
    total_ticks: u32,
    ticks: u32,
    ticker: Option<ScheduledTask>,
}

impl WaitlistScreen {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            period: timing.submission_tick(),
            total_ticks: timing.submission_ticks(),
            ticks: 0,
            ticker: None,
        }
    }

    pub fn progress(&self) -> f64 {
        f64::from(self.ticks) / f64::from(self.total_ticks)
    }

    pub fn is_loaded(&self) -> bool {
        self.ticks >= self.total_ticks
    }

    pub fn ticker(&self) -> Option<&ScheduledTask> {
        self.ticker.as_ref()
    }

    /// Number of filled meter cells
    pub fn filled_cells(&self) -> usize {
        ((self.progress() * METER_WIDTH as f64).round() as usize).min(METER_WIDTH)
    }
}

impl Screen for WaitlistScreen {
    fn on_mount(&mut self, ctx: &mut ScreenContext) {
        self.ticker = Some(ctx.scheduler.every(self.period));
    }

    fn on_event(&mut self, event: AppEvent, ctx: &mut ScreenContext) {
        match event {
            AppEvent::Submit if self.is_loaded() => ctx.nav.go_to(Route::Home),
            AppEvent::Back => ctx.nav.go_back(),
            _ => {}
        }
    }

    fn on_timer(&mut self, fired: TimerFired, _ctx: &mut ScreenContext) {
        if !self.ticker.as_ref().is_some_and(|t| t.owns(fired)) {
            return;
        }
        self.ticks += 1;
        if self.is_loaded() {
            info!("waitlist submission finished");
            self.ticker = None;
        }
    }

    fn teardown(&mut self) {
        self.ticker = None;
    }
}
