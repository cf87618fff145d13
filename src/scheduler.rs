// ABOUTME: Cancellable scheduled callbacks for the single-threaded UI loop
// Background tasks only post TimerFired messages; the event loop applies them

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Identity of one scheduled registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Delivered to the event loop each time a registration elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub id: TimerId,
}

/// Creates timer registrations that report back through one channel.
///
/// A manual scheduler spawns nothing; its owner delivers `TimerFired`
/// events itself, which keeps screens testable without a runtime.
#[derive(Debug, Clone)]
pub struct Scheduler {
    tx: Option<mpsc::UnboundedSender<TimerFired>>,
    next_id: Arc<AtomicU64>,
}

impl Scheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx: Some(tx),
            next_id: Arc::new(AtomicU64::new(1)),
        };
        (scheduler, rx)
    }

    pub fn manual() -> Self {
        Self {
            tx: None,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    fn allocate(&self) -> TimerId {
        TimerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Fire once after `delay`
    pub fn after(&self, delay: Duration) -> ScheduledTask {
        let id = self.allocate();
        let handle = self.tx.clone().map(|tx| {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(TimerFired { id });
            })
        });
        debug!(?id, delay_ms = %delay.as_millis(), "one-shot timer scheduled");
        ScheduledTask::new(id, handle)
    }

    /// Fire every `period`, first after one full period
    pub fn every(&self, period: Duration) -> ScheduledTask {
        let id = self.allocate();
        let handle = self.tx.clone().map(|tx| {
            tokio::spawn(async move {
                let start = tokio::time::Instant::now() + period;
                let mut interval = tokio::time::interval_at(start, period);
                loop {
                    interval.tick().await;
                    if tx.send(TimerFired { id }).is_err() {
                        break;
                    }
                }
            })
        });
        debug!(?id, period_ms = %period.as_millis(), "interval timer scheduled");
        ScheduledTask::new(id, handle)
    }
}

/// Single-owner handle to a registration. Dropping it cancels the timer.
#[derive(Debug)]
pub struct ScheduledTask {
    id: TimerId,
    handle: Option<JoinHandle<()>>,
    active: bool,
}

impl ScheduledTask {
    fn new(id: TimerId, handle: Option<JoinHandle<()>>) -> Self {
        Self {
            id,
            handle,
            active: true,
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether `fired` belongs to this live registration. Events queued
    /// before a cancel are rejected here.
    pub fn owns(&self, fired: TimerFired) -> bool {
        self.active && fired.id == self.id
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        if self.active {
            debug!(id = ?self.id, "timer cancelled");
        }
        self.active = false;
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_issues_distinct_ids() {
        let scheduler = Scheduler::manual();
        let a = scheduler.after(Duration::from_secs(2));
        let b = scheduler.every(Duration::from_secs(1));
        assert_ne!(a.id(), b.id());
        assert!(a.owns(TimerFired { id: a.id() }));
        assert!(!a.owns(TimerFired { id: b.id() }));
    }

    #[test]
    fn test_cancelled_task_rejects_queued_events() {
        let scheduler = Scheduler::manual();
        let mut task = scheduler.every(Duration::from_secs(1));
        let fired = TimerFired { id: task.id() };
        task.cancel();
        assert!(!task.is_active());
        assert!(!task.owns(fired));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_fires_each_period() {
        let (scheduler, mut rx) = Scheduler::new();
        let task = scheduler.every(Duration::from_secs(1));

        for _ in 0..3 {
            let fired = rx.recv().await.unwrap();
            assert!(task.owns(fired));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_fires_once() {
        let (scheduler, mut rx) = Scheduler::new();
        let task = scheduler.after(Duration::from_millis(2000));
        let fired = rx.recv().await.unwrap();
        assert_eq!(fired.id, task.id());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_interval() {
        let (scheduler, mut rx) = Scheduler::new();
        let task = scheduler.every(Duration::from_secs(1));
        let first = rx.recv().await.unwrap();
        assert!(task.owns(first));
        drop(task);

        // Let the aborted task wind down, then nothing further should arrive
        tokio::time::sleep(Duration::from_secs(5)).await;
        while let Ok(fired) = rx.try_recv() {
            assert_eq!(fired.id, first.id);
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
