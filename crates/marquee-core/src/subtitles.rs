//! WebVTT cue scheduling
//!
//! The player's subtitle decoder delivers cues ahead of their display window;
//! the scheduler holds them in arrival order and shows each one for exactly
//! its duration, tolerating arbitrary dead time between cues. Two single-shot
//! timers drive the chain: a *display* timer bridging the gap until the next
//! cue becomes due, and a *clear* timer bounding the on-screen window of the
//! current cue. At most one of each is ever armed.
//!
//! The rendered line is published through a `watch` channel; `None` means the
//! subtitle surface is clear.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::debug;

/// A timed subtitle cue with its layout hints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VttCue {
    /// Display start in milliseconds of media time
    pub start_ms: f64,
    /// Display window length in milliseconds
    pub duration_ms: f64,
    /// Cue payload text
    pub text: String,
    /// Line placement hint
    #[serde(default)]
    pub line: i32,
    /// Alignment hint
    #[serde(default)]
    pub align: String,
    /// Horizontal position hint (percent)
    #[serde(default)]
    pub position: f64,
    /// Size hint (percent)
    #[serde(default)]
    pub size: f64,
}

impl VttCue {
    /// Cue with default layout hints
    pub fn new(start_ms: f64, duration_ms: f64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            duration_ms,
            text: text.into(),
            line: 0,
            align: String::new(),
            position: 0.0,
            size: 0.0,
        }
    }
}

struct Inner {
    queue: VecDeque<VttCue>,
    /// Bridges the gap until the front cue becomes due
    display_timer: Option<JoinHandle<()>>,
    /// Bounds the display window of the cue currently on screen
    clear_timer: Option<JoinHandle<()>>,
}

/// Sequential cue display driven by two chained single-shot timers.
///
/// Clones share the same queue and timers.
#[derive(Clone)]
pub struct CueScheduler {
    inner: Arc<Mutex<Inner>>,
    text_tx: watch::Sender<Option<String>>,
}

impl Default for CueScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl CueScheduler {
    pub fn new() -> Self {
        let (text_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                queue: VecDeque::new(),
                display_timer: None,
                clear_timer: None,
            })),
            text_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Observe the rendered subtitle line; `None` when clear
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.text_tx.subscribe()
    }

    /// Currently rendered line, if any
    pub fn rendered(&self) -> Option<String> {
        self.text_tx.borrow().clone()
    }

    /// Append a decoded cue to the tail of the queue
    pub fn push(&self, cue: VttCue) {
        debug!(start_ms = cue.start_ms, duration_ms = cue.duration_ms, "cue queued");
        self.lock().queue.push_back(cue);
    }

    /// Number of queued cues
    pub fn queued(&self) -> usize {
        self.lock().queue.len()
    }

    /// True when neither timer is armed
    pub fn is_idle(&self) -> bool {
        let inner = self.lock();
        inner.display_timer.is_none() && inner.clear_timer.is_none()
    }

    /// Cancel both timers and clear the rendered line. Queued cues are
    /// dropped iff `clear_queue`; used on seek, speed change and asset change
    /// where buffered cues no longer match the playback position.
    pub fn reset(&self, clear_queue: bool) {
        debug!(clear_queue, "subtitle reset");
        let mut inner = self.lock();
        if let Some(timer) = inner.display_timer.take() {
            timer.abort();
        }
        if let Some(timer) = inner.clear_timer.take() {
            timer.abort();
        }
        if clear_queue {
            inner.queue.clear();
        }
        let _ = self.text_tx.send(None);
    }

    /// Bring the front cue on screen relative to `position_ms`.
    ///
    /// A cue already due (`start_ms <= position_ms`) is popped and rendered
    /// immediately, with the clear timer armed for its duration; when that
    /// fires, the next queued cue is entered at the position advanced by the
    /// consumed duration. A future cue stays queued and the display timer is
    /// armed for the gap.
    pub fn display(&self, position_ms: f64) {
        let mut inner = self.lock();
        let Some(front) = inner.queue.front() else {
            return;
        };
        let offset = front.start_ms - position_ms;
        if offset <= 0.0 {
            let Some(cue) = inner.queue.pop_front() else {
                return;
            };
            debug!(offset, text = %cue.text, "cue on screen");
            let _ = self.text_tx.send(Some(cue.text.clone()));
            let scheduler = self.clone();
            let hold_ms = cue.duration_ms.max(0.0);
            inner.clear_timer = Some(tokio::spawn(async move {
                sleep(Duration::from_secs_f64(hold_ms / 1000.0)).await;
                scheduler.clear_fired(position_ms + hold_ms);
            }));
        } else {
            let scheduler = self.clone();
            inner.display_timer = Some(tokio::spawn(async move {
                sleep(Duration::from_secs_f64(offset / 1000.0)).await;
                scheduler.display(position_ms + offset);
            }));
        }
    }

    /// Clear timer elapsed: take the cue off screen and chain into the next
    /// queued cue, or go idle when none remains.
    fn clear_fired(&self, position_ms: f64) {
        let advance = {
            let mut inner = self.lock();
            let _ = self.text_tx.send(None);
            if inner.queue.is_empty() {
                inner.display_timer = None;
                inner.clear_timer = None;
                false
            } else {
                true
            }
        };
        if advance {
            self.display(position_ms);
        }
    }

    /// Periodic position report from the player.
    ///
    /// When the scheduler sits idle with cues queued at normal speed, the
    /// queue is resynchronized against the reported position: cues whose
    /// window already passed (typically buffered across a trick-play run)
    /// are dropped, and display resumes with the first still-future cue.
    pub fn on_progress(&self, position_ms: f64, playback_speed: f64) {
        let resume = {
            let mut inner = self.lock();
            if inner.display_timer.is_some()
                || inner.clear_timer.is_some()
                || inner.queue.is_empty()
                || playback_speed != 1.0
            {
                false
            } else {
                inner.queue.retain(|cue| cue.start_ms > position_ms);
                debug!(
                    position_ms,
                    remaining = inner.queue.len(),
                    "cue buffer resynchronized"
                );
                !inner.queue.is_empty()
            }
        };
        if resume {
            self.display(position_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    /// Let spawned timer tasks run without advancing the paused clock
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn due_cue_displays_immediately() {
        let scheduler = CueScheduler::new();
        let rx = scheduler.subscribe();
        scheduler.push(VttCue::new(1_000.0, 2_000.0, "hello"));

        scheduler.display(1_500.0);
        settle().await;

        assert_eq!(rx.borrow().as_deref(), Some("hello"));
        assert_eq!(scheduler.queued(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn future_cue_waits_for_exact_gap() {
        let scheduler = CueScheduler::new();
        let rx = scheduler.subscribe();
        scheduler.push(VttCue::new(5_000.0, 1_000.0, "later"));

        scheduler.display(0.0);
        settle().await;
        assert!(rx.borrow().is_none());
        assert_eq!(scheduler.queued(), 1);

        advance(Duration::from_millis(4_999)).await;
        settle().await;
        assert!(rx.borrow().is_none(), "one ms early");
        assert_eq!(scheduler.queued(), 1);

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(rx.borrow().as_deref(), Some("later"));
        assert_eq!(scheduler.queued(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cue_clears_after_duration() {
        let scheduler = CueScheduler::new();
        let rx = scheduler.subscribe();
        scheduler.push(VttCue::new(0.0, 2_000.0, "short"));

        scheduler.display(0.0);
        settle().await;
        assert_eq!(rx.borrow().as_deref(), Some("short"));

        advance(Duration::from_millis(2_000)).await;
        settle().await;
        assert!(rx.borrow().is_none());
        assert!(scheduler.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn chain_advances_across_dead_time() {
        let scheduler = CueScheduler::new();
        let rx = scheduler.subscribe();
        scheduler.push(VttCue::new(0.0, 1_000.0, "first"));
        scheduler.push(VttCue::new(3_000.0, 1_000.0, "second"));

        scheduler.display(0.0);
        settle().await;
        assert_eq!(rx.borrow().as_deref(), Some("first"));

        // first clears at t=1s, second is not due until t=3s
        advance(Duration::from_millis(1_000)).await;
        settle().await;
        assert!(rx.borrow().is_none());
        assert_eq!(scheduler.queued(), 1);

        advance(Duration::from_millis(2_000)).await;
        settle().await;
        assert_eq!(rx.borrow().as_deref(), Some("second"));

        advance(Duration::from_millis(1_000)).await;
        settle().await;
        assert!(rx.borrow().is_none());
        assert!(scheduler.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_keeps_or_drops_queue() {
        let scheduler = CueScheduler::new();
        let rx = scheduler.subscribe();
        scheduler.push(VttCue::new(0.0, 5_000.0, "visible"));
        scheduler.push(VttCue::new(10_000.0, 1_000.0, "queued"));

        scheduler.display(0.0);
        settle().await;
        assert_eq!(rx.borrow().as_deref(), Some("visible"));

        scheduler.reset(false);
        settle().await;
        assert!(rx.borrow().is_none());
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.queued(), 1, "queue survives reset(false)");

        scheduler.reset(true);
        assert_eq!(scheduler.queued(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_pending_display_timer() {
        let scheduler = CueScheduler::new();
        let rx = scheduler.subscribe();
        scheduler.push(VttCue::new(5_000.0, 1_000.0, "never"));

        scheduler.display(0.0);
        settle().await;
        scheduler.reset(false);
        settle().await;

        advance(Duration::from_millis(10_000)).await;
        settle().await;
        assert!(rx.borrow().is_none(), "aborted timer must not render");
    }

    #[tokio::test(start_paused = true)]
    async fn progress_filter_drops_stale_cues() {
        let scheduler = CueScheduler::new();
        let rx = scheduler.subscribe();
        scheduler.push(VttCue::new(1_000.0, 500.0, "stale one"));
        scheduler.push(VttCue::new(2_000.0, 500.0, "stale two"));
        scheduler.push(VttCue::new(60_000.0, 500.0, "future"));

        scheduler.on_progress(30_000.0, 1.0);
        settle().await;

        assert_eq!(scheduler.queued(), 1, "stale cues dropped");
        assert!(rx.borrow().is_none());
        assert!(!scheduler.is_idle(), "display armed for the surviving cue");

        advance(Duration::from_millis(30_000)).await;
        settle().await;
        assert_eq!(rx.borrow().as_deref(), Some("future"));
    }

    #[tokio::test(start_paused = true)]
    async fn progress_filter_inert_off_normal_speed() {
        let scheduler = CueScheduler::new();
        scheduler.push(VttCue::new(1_000.0, 500.0, "stale"));

        scheduler.on_progress(30_000.0, 4.0);
        settle().await;
        assert_eq!(scheduler.queued(), 1, "no filtering during trick-play");
        assert!(scheduler.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn progress_filter_inert_while_timer_armed() {
        let scheduler = CueScheduler::new();
        scheduler.push(VttCue::new(5_000.0, 500.0, "pending"));
        scheduler.display(0.0);
        settle().await;

        scheduler.on_progress(10_000.0, 1.0);
        settle().await;
        assert_eq!(scheduler.queued(), 1, "armed timer suppresses the filter");
    }
}
