use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use math_core::Clock;
use math_core::time::seconds_between;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How often the elapsed-time display refreshes.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Stopwatch for the puzzle currently on screen.
///
/// While running, a background ticker publishes elapsed seconds every
/// [`TICK_INTERVAL`] to subscribers. Only one ticker exists per timer:
/// `start` replaces it, and `stop` or dropping the timer cancels it.
pub struct AttemptTimer {
    clock: Clock,
    started_at: Option<DateTime<Utc>>,
    stopped_at: Option<DateTime<Utc>>,
    ticker: Option<JoinHandle<()>>,
    display: Arc<watch::Sender<f64>>,
}

impl AttemptTimer {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        let (display, _) = watch::channel(0.0);
        Self {
            clock,
            started_at: None,
            stopped_at: None,
            ticker: None,
            display: Arc::new(display),
        }
    }

    /// Restart timing from now, cancelling any running ticker.
    pub fn start(&mut self) {
        self.cancel_ticker();
        let started_at = self.clock.now();
        self.started_at = Some(started_at);
        self.stopped_at = None;
        self.display.send_replace(0.0);

        let Ok(runtime) = Handle::try_current() else {
            log::debug!("no async runtime; timer display will not tick");
            return;
        };
        let clock = self.clock;
        let display = Arc::clone(&self.display);
        self.ticker = Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            loop {
                interval.tick().await;
                display.send_replace(clock.seconds_since(started_at));
            }
        }));
    }

    /// Freeze the elapsed time and halt display updates.
    pub fn stop(&mut self) {
        self.cancel_ticker();
        if self.started_at.is_some() && self.stopped_at.is_none() {
            let stopped_at = self.clock.now();
            self.stopped_at = Some(stopped_at);
            self.display.send_replace(self.elapsed());
        }
    }

    /// Seconds since `start`, frozen once stopped; 0 if never started.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        match self.stopped_at {
            Some(stopped_at) => seconds_between(started_at, stopped_at),
            None => self.clock.seconds_since(started_at),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Receiver for the periodically refreshed elapsed seconds.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.display.subscribe()
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for AttemptTimer {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

impl std::fmt::Debug for AttemptTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttemptTimer")
            .field("started_at", &self.started_at)
            .field("stopped_at", &self.stopped_at)
            .field("ticking", &self.ticker.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use math_core::time::fixed_clock;

    #[test]
    fn never_started_reads_zero() {
        let timer = AttemptTimer::new(fixed_clock());
        assert!(timer.elapsed().abs() < f64::EPSILON);
        assert!(!timer.is_running());
    }

    #[test]
    fn stop_freezes_elapsed() {
        let mut timer = AttemptTimer::new(fixed_clock());
        timer.start();
        timer.clock.advance(ChronoDuration::milliseconds(3_200));
        timer.stop();
        timer.clock.advance(ChronoDuration::seconds(10));
        assert!((timer.elapsed() - 3.2).abs() < 1e-9);
        assert!(!timer.is_running());
        assert!((*timer.subscribe().borrow() - 3.2).abs() < 1e-9);
    }

    #[test]
    fn restart_resets_the_clock() {
        let mut timer = AttemptTimer::new(fixed_clock());
        timer.start();
        timer.clock.advance(ChronoDuration::seconds(5));
        timer.start();
        timer.clock.advance(ChronoDuration::seconds(1));
        assert!((timer.elapsed() - 1.0).abs() < 1e-9);
        assert!(timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_publishes_until_stopped() {
        let mut timer = AttemptTimer::new(Clock::system());
        let mut rx = timer.subscribe();
        timer.start();
        assert!(timer.ticker.is_some());

        tokio::time::advance(TICK_INTERVAL).await;
        rx.changed().await.unwrap();

        timer.start();
        assert!(timer.ticker.is_some());

        timer.stop();
        assert!(timer.ticker.is_none());
        let _ = rx.borrow_and_update();
        tokio::time::advance(TICK_INTERVAL * 5).await;
        tokio::task::yield_now().await;
        assert!(!rx.has_changed().unwrap());
    }
}
