//! Fixed-interval ticker for story auto-advance.

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

/// A running auto-play ticker.
///
/// Sends `()` on its receiver once per period, starting one period after
/// [`AutoPlay::start`]. The background task stops when this handle is
/// paused or dropped, after which the receiver yields `None`.
#[derive(Debug)]
pub struct AutoPlay {
    task: JoinHandle<()>,
    period: Duration,
}

impl AutoPlay {
    /// Spawn the ticker on the current tokio runtime.
    pub fn start(period: Duration) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        debug!("auto-play started every {:?}", period);
        (Self { task, period }, rx)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop advancing.
    pub fn pause(self) {
        debug!("auto-play paused");
    }
}

impl Drop for AutoPlay {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::StorySlider;
    use heo_core::story::StoryRecord;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let started = Instant::now();
        let (_autoplay, mut ticks) = AutoPlay::start(Duration::from_secs(5));
        for _ in 0..3 {
            assert_eq!(ticks.recv().await, Some(()));
        }
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(15), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(16), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_advance_story_slider() {
        let mut slider = StorySlider::new(StoryRecord::get_story_vector().unwrap());
        let (_autoplay, mut ticks) = AutoPlay::start(Duration::from_secs(8));
        for _ in 0..slider.len() + 1 {
            ticks.recv().await.unwrap();
            slider.next();
        }
        assert_eq!(slider.index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticks() {
        let (autoplay, mut ticks) = AutoPlay::start(Duration::from_secs(5));
        assert_eq!(ticks.recv().await, Some(()));
        autoplay.pause();
        assert_eq!(ticks.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let (autoplay, mut ticks) = AutoPlay::start(Duration::from_secs(5));
        drop(autoplay);
        assert_eq!(ticks.recv().await, None);
    }
}
