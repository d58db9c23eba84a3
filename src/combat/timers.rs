//! Deferred one-shot callbacks driven by an injected clock.
//!
//! Nothing here reads wall time. Callers pass `now` in seconds (the game
//! passes `Time::elapsed_secs_f64()`), so tests can step time by hand.

/// Handle returned by [`TimerQueue::schedule`], usable to cancel the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, PartialEq)]
struct Scheduled<T> {
    handle: TimerHandle,
    due: f64,
    payload: T,
}

/// One-shot timers carrying a payload that is handed back when they fire.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

/// Pending cooldown clears, keyed by ability slot.
pub type CooldownTimers = TimerQueue<usize>;

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// Schedule `payload` to fire `delay` seconds after `now`.
    pub fn schedule(&mut self, now: f64, delay: f32, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            handle,
            due: now + f64::from(delay.max(0.0)),
            payload,
        });
        handle
    }

    /// Drop a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        self.pending.len() != before
    }

    /// Remove and return every payload due at or before `now`, earliest first.
    pub fn fire_due(&mut self, now: f64) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|timer| timer.due <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.handle.0.cmp(&b.handle.0)));
        due.into_iter().map(|timer| timer.payload).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
