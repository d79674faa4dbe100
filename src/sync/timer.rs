use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Owns the poll timer of one activation.
///
/// Each tick sends the activation's generation to the engine. The timer
/// stops on [`PollHandle::stop`] or when the handle is dropped.
#[derive(Debug)]
pub struct PollHandle {
    generation: u64,
    token: CancellationToken,
}

impl PollHandle {
    /// Must be called from within a tokio runtime.
    pub fn start(generation: u64, period: Duration, ticks: UnboundedSender<u64>) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        if ticks.send(generation).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { generation, token }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stop(self) {
        self.token.cancel();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_carry_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = PollHandle::start(7, Duration::from_millis(1000), tx);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(rx.try_recv().ok(), Some(7));
        assert_eq!(rx.try_recv().ok(), Some(7));
        assert!(rx.try_recv().is_err());
        assert_eq!(handle.generation(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let _handle = PollHandle::start(1, Duration::from_millis(1000), tx);
            tokio::time::sleep(Duration::from_millis(1500)).await;
        }
        assert_eq!(rx.try_recv().ok(), Some(1));

        tokio::time::sleep(Duration::from_millis(5000)).await;
        // Sender dropped with the task, nothing more arrives
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_explicit_release() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = PollHandle::start(3, Duration::from_millis(1000), tx);
        handle.stop();

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(rx.try_recv().is_err());
    }
}
