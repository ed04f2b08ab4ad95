//! Progress indicator and the simulated processing animation

use std::sync::{Arc, Mutex};

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, trace};

use crate::config::ProgressSettings;
use crate::ports::ProcessingService;

/// Message shown while an upload is in flight
pub const UPLOADING_MESSAGE: &str = "Uploading video...";
/// Message shown while a process request is in flight
pub const PROCESSING_MESSAGE: &str = "Processing video...";

/// Observer for indicator changes, e.g. a terminal progress line
pub trait ProgressCallback: Send + Sync {
    /// Called whenever the indicator is shown or updated
    fn on_update(&self, percent: f64, message: &str);

    /// Called when the indicator is hidden
    fn on_hidden(&self) {}
}

/// Snapshot of the progress indicator
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    pub visible: bool,
    pub percent: f64,
    pub message: String,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            visible: false,
            percent: 0.0,
            message: String::new(),
        }
    }
}

/// Shared progress indicator with thread-safe updates
#[derive(Clone, Default)]
pub struct ProgressTracker {
    inner: Arc<Mutex<ProgressState>>,
    callbacks: Arc<Mutex<Vec<Arc<dyn ProgressCallback>>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a progress callback
    pub fn add_callback(&self, callback: Arc<dyn ProgressCallback>) {
        if let Ok(mut callbacks) = self.callbacks.lock() {
            callbacks.push(callback);
        }
    }

    /// Show the indicator at `percent` with `message`
    pub fn show(&self, message: &str, percent: f64) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.visible = true;
            inner.percent = percent;
            inner.message = message.to_string();
        }
        self.notify(|cb| cb.on_update(percent, message));
    }

    /// Update a visible indicator; hidden indicators stay hidden
    pub fn update(&self, percent: f64, message: &str) -> bool {
        let applied = match self.inner.lock() {
            Ok(mut inner) if inner.visible => {
                inner.percent = percent;
                inner.message = message.to_string();
                true
            }
            _ => false,
        };

        if applied {
            self.notify(|cb| cb.on_update(percent, message));
        }
        applied
    }

    pub fn hide(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.visible = false;
        }
        self.notify(|cb| cb.on_hidden());
    }

    /// Hide and zero the indicator
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            *inner = ProgressState::default();
        }
    }

    pub fn snapshot(&self) -> ProgressState {
        self.inner
            .lock()
            .map(|inner| inner.clone())
            .unwrap_or_default()
    }

    fn notify<F>(&self, f: F)
    where
        F: Fn(&dyn ProgressCallback),
    {
        let callbacks = match self.callbacks.lock() {
            Ok(callbacks) => callbacks.clone(),
            Err(_) => return,
        };
        for callback in callbacks.iter() {
            f(callback.as_ref());
        }
    }
}

/// Fabricated percentage that creeps towards a cap
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedProgress {
    percent: f64,
    cap: f64,
    max_step: f64,
}

impl SimulatedProgress {
    pub fn new(start: f64, cap: f64, max_step: f64) -> Self {
        Self {
            percent: start,
            cap,
            max_step,
        }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Add a random step in `[0, max_step)`, never passing the cap
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> f64 {
        let step = if self.max_step > 0.0 {
            rng.random_range(0.0..self.max_step)
        } else {
            0.0
        };
        self.percent = (self.percent + step).min(self.cap);
        self.percent
    }

    /// Adopt a reported percentage, capped and never moving backwards
    pub fn observe(&mut self, reported: f64) -> f64 {
        if reported.is_finite() {
            self.percent = reported.min(self.cap).max(self.percent);
        }
        self.percent
    }
}

/// Running progress animation; stops at its ceiling or when stopped
pub struct ProgressAnimator {
    handle: JoinHandle<()>,
}

impl ProgressAnimator {
    /// Start ticking from `start` percent
    ///
    /// Each tick asks `service` for real progress and falls back to a
    /// fabricated step when none is reported.
    pub fn spawn(
        tracker: ProgressTracker,
        service: Arc<dyn ProcessingService>,
        file_id: String,
        settings: ProgressSettings,
        start: f64,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let tick = settings.tick();
            let ceiling = settings.ceiling();
            let mut ticker = interval_at(started + tick, tick);
            let mut progress = SimulatedProgress::new(start, settings.cap, settings.max_step);

            loop {
                ticker.tick().await;
                if started.elapsed() >= ceiling {
                    debug!("Progress animation reached its ceiling");
                    break;
                }

                let percent = match service.poll_progress(&file_id).await {
                    Ok(Some(reported)) => progress.observe(reported),
                    _ => fabricate(&mut progress),
                };
                trace!(percent, "Progress tick");
                tracker.update(percent, PROCESSING_MESSAGE);
            }
        });

        Self { handle }
    }

    /// Stop the animation and wait for the task to wind down
    ///
    /// No tick reaches the tracker once this returns. Yields whether the
    /// animation had already reached its ceiling.
    pub async fn stop(self) -> bool {
        let reached_ceiling = self.handle.is_finished();
        self.handle.abort();
        let _ = self.handle.await;
        reached_ceiling
    }
}

fn fabricate(progress: &mut SimulatedProgress) -> f64 {
    progress.advance(&mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Recorder {
        updates: Mutex<Vec<f64>>,
    }

    impl ProgressCallback for Recorder {
        fn on_update(&self, percent: f64, _message: &str) {
            self.updates.lock().unwrap().push(percent);
        }
    }

    #[test]
    fn test_simulated_progress_is_monotonic_and_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut progress = SimulatedProgress::new(20.0, 90.0, 20.0);
        let mut last = progress.percent();
        for _ in 0..50 {
            let next = progress.advance(&mut rng);
            assert!(next >= last);
            assert!(next <= 90.0);
            last = next;
        }
        assert_eq!(last, 90.0);
    }

    #[test]
    fn test_observe_never_moves_backwards() {
        let mut progress = SimulatedProgress::new(20.0, 90.0, 20.0);
        assert_eq!(progress.observe(55.0), 55.0);
        assert_eq!(progress.observe(40.0), 55.0);
        assert_eq!(progress.observe(99.0), 90.0);
        assert_eq!(progress.observe(f64::NAN), 90.0);
    }

    #[test]
    fn test_tracker_update_ignored_when_hidden() {
        let tracker = ProgressTracker::new();
        assert!(!tracker.update(50.0, PROCESSING_MESSAGE));

        tracker.show(UPLOADING_MESSAGE, 10.0);
        assert_eq!(
            tracker.snapshot(),
            ProgressState {
                visible: true,
                percent: 10.0,
                message: UPLOADING_MESSAGE.to_string()
            }
        );

        tracker.hide();
        assert!(!tracker.update(50.0, PROCESSING_MESSAGE));
        assert_eq!(tracker.snapshot().percent, 10.0);
    }

    #[test]
    fn test_tracker_notifies_callbacks() {
        let tracker = ProgressTracker::new();
        let recorder = Arc::new(Recorder::default());
        tracker.add_callback(recorder.clone());
        tracker.show(PROCESSING_MESSAGE, 20.0);
        tracker.update(35.0, PROCESSING_MESSAGE);
        assert_eq!(*recorder.updates.lock().unwrap(), vec![20.0, 35.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animator_stops_at_ceiling() {
        let tracker = ProgressTracker::new();
        let recorder = Arc::new(Recorder::default());
        tracker.add_callback(recorder.clone());
        tracker.show(PROCESSING_MESSAGE, 20.0);

        let service = Arc::new(crate::adapters::InMemoryService::new());
        let animator = ProgressAnimator::spawn(
            tracker.clone(),
            service,
            "f1".to_string(),
            ProgressSettings::default(),
            20.0,
        );

        tokio::time::sleep(std::time::Duration::from_secs(12)).await;
        assert!(animator.stop().await);

        let updates = recorder.updates.lock().unwrap().clone();
        let ticks = updates.len() - 1;
        assert!((9..=10).contains(&ticks), "ticks = {}", ticks);
        assert!(updates.iter().all(|p| (20.0..=90.0).contains(p)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_animator_leaves_tracker_alone() {
        let tracker = ProgressTracker::new();
        tracker.show(PROCESSING_MESSAGE, 20.0);

        let service = Arc::new(crate::adapters::InMemoryService::new());
        let animator = ProgressAnimator::spawn(
            tracker.clone(),
            service,
            "f1".to_string(),
            ProgressSettings::default(),
            20.0,
        );
        assert!(!animator.stop().await);

        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        assert_eq!(tracker.snapshot().percent, 20.0);
    }

    #[derive(Default)]
    struct EventLog {
        events: Mutex<Vec<&'static str>>,
    }

    impl ProgressCallback for EventLog {
        fn on_update(&self, _percent: f64, _message: &str) {
            self.events.lock().unwrap().push("update");
        }

        fn on_hidden(&self) {
            self.events.lock().unwrap().push("hidden");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_no_update_after_stop_and_hide() {
        let settings = ProgressSettings {
            tick_ms: 1,
            ceiling_ms: 60_000,
            ..ProgressSettings::default()
        };

        for _ in 0..20 {
            let tracker = ProgressTracker::new();
            let log = Arc::new(EventLog::default());
            tracker.add_callback(log.clone());
            tracker.show(PROCESSING_MESSAGE, 20.0);

            let animator = ProgressAnimator::spawn(
                tracker.clone(),
                Arc::new(crate::adapters::InMemoryService::new()),
                "f1".to_string(),
                settings.clone(),
                20.0,
            );
            tokio::time::sleep(std::time::Duration::from_millis(3)).await;
            animator.stop().await;
            tracker.hide();

            tokio::time::sleep(std::time::Duration::from_millis(3)).await;
            let events = log.events.lock().unwrap().clone();
            assert_eq!(events.last(), Some(&"hidden"), "{:?}", events);
            assert_eq!(events.iter().filter(|e| **e == "hidden").count(), 1);
        }
    }
}
