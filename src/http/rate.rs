//! Sliding-window admission control for outgoing requests.

use async_lock::Mutex;
use futures_timer::Delay;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Cushion added to computed waits so a re-check lands after the oldest
/// entry has actually left the window.
const SAFETY_MARGIN: Duration = Duration::from_millis(10);

/// Per-client sliding-window rate gate.
///
/// [`admit`](RateGate::admit) suspends until one more request fits under the
/// ceiling within the trailing window; [`record`](RateGate::record) appends
/// a send timestamp. The executor records one timestamp per completed call
/// (on success), not per attempt, so retried attempts do not double-charge
/// the rate budget. Admission is still checked before every attempt.
pub struct RateGate {
    ceiling: usize,
    window: Duration,
    margin: Duration,
    sent: Mutex<VecDeque<Instant>>,
}

impl RateGate {
    /// Gate admitting at most `requests_per_second` per trailing second.
    pub fn new(requests_per_second: usize) -> Self {
        Self::with_window(requests_per_second, Duration::from_secs(1), SAFETY_MARGIN)
    }

    fn with_window(ceiling: usize, window: Duration, margin: Duration) -> Self {
        Self {
            ceiling: ceiling.max(1),
            window,
            margin,
            sent: Mutex::new(VecDeque::new()),
        }
    }

    /// Suspend until it is safe to send one more request.
    ///
    /// Never errors; always eventually admits.
    pub async fn admit(&self) {
        loop {
            let wait = {
                let mut sent = self.sent.lock().await;
                let now = Instant::now();
                Self::prune(&mut sent, now, self.window);
                match sent.front().copied() {
                    Some(oldest) if sent.len() >= self.ceiling => {
                        self.window.saturating_sub(now.duration_since(oldest)) + self.margin
                    }
                    _ => return,
                }
            };
            tracing::debug!(wait_ms = wait.as_millis() as u64, "rate window full, waiting");
            Delay::new(wait).await;
        }
    }

    /// Record one consumed request slot.
    pub async fn record(&self) {
        let mut sent = self.sent.lock().await;
        let now = Instant::now();
        Self::prune(&mut sent, now, self.window);
        sent.push_back(now);
    }

    /// Number of entries still inside the trailing window.
    pub async fn in_window(&self) -> usize {
        let mut sent = self.sent.lock().await;
        Self::prune(&mut sent, Instant::now(), self.window);
        sent.len()
    }

    fn prune(sent: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while sent
            .front()
            .is_some_and(|t| now.duration_since(*t) >= window)
        {
            sent.pop_front();
        }
    }
}
