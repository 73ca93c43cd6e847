//! Position acquisition and tracking.
//!
//! A [`PositionSource`] answers one-shot position queries. [`watch_position`]
//! polls a source on a tokio task and publishes fixes through a
//! `tokio::sync::watch` channel; the returned [`WatchHandle`] owns the task
//! and stops it on [`WatchHandle::stop`] or drop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::LocationError;
use crate::models::GeoPosition;

/// Something that can report the device position.
pub trait PositionSource: Send + Sync + 'static {
    /// Returns the current position fix.
    fn current_position(&self) -> Result<GeoPosition, LocationError>;
}

impl<F> PositionSource for F
where
    F: Fn() -> Result<GeoPosition, LocationError> + Send + Sync + 'static,
{
    fn current_position(&self) -> Result<GeoPosition, LocationError> {
        self()
    }
}

/// A source that always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub GeoPosition);

impl PositionSource for FixedPosition {
    fn current_position(&self) -> Result<GeoPosition, LocationError> {
        Ok(self.0)
    }
}

/// A source that always fails with the same error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unavailable(pub LocationError);

impl PositionSource for Unavailable {
    fn current_position(&self) -> Result<GeoPosition, LocationError> {
        Err(self.0)
    }
}

/// Takes a single position fix, logging the outcome.
pub fn request_position(source: &dyn PositionSource) -> Result<GeoPosition, LocationError> {
    match source.current_position() {
        Ok(position) => {
            info!(
                coordinates = %position.coordinates(),
                accuracy_m = position.accuracy_meters(),
                "Location acquired"
            );
            Ok(position)
        }
        Err(error) => {
            warn!(error = %error, "Could not determine location");
            Err(error)
        }
    }
}

/// Starts polling `source` every `every`, beginning immediately.
///
/// `initial` seeds the channel so readers see the last known fix before the
/// first poll completes. Failed polls are logged and skipped; the last good
/// fix stays published.
///
/// Must be called from within a tokio runtime.
pub fn watch_position(
    source: Arc<dyn PositionSource>,
    every: Duration,
    initial: Option<GeoPosition>,
) -> WatchHandle {
    let (sender, receiver) = watch::channel(initial);
    let every = every.max(Duration::from_millis(1));

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match source.current_position() {
                Ok(position) => {
                    if sender.send(Some(position)).is_err() {
                        break;
                    }
                }
                Err(error) => warn!(error = %error, "Location tracking error"),
            }
        }
    });

    debug!(interval_ms = every.as_millis(), "Location tracking started");

    WatchHandle {
        task: Some(task),
        receiver,
    }
}

/// Handle to a running position watch.
#[derive(Debug)]
pub struct WatchHandle {
    task: Option<JoinHandle<()>>,
    receiver: watch::Receiver<Option<GeoPosition>>,
}

impl WatchHandle {
    /// The most recent fix, kept after the watch stops.
    pub fn latest(&self) -> Option<GeoPosition> {
        *self.receiver.borrow()
    }

    /// A receiver that is notified of every new fix.
    pub fn subscribe(&self) -> watch::Receiver<Option<GeoPosition>> {
        self.receiver.clone()
    }

    /// Whether the polling task is still running.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops polling. Calling it again does nothing.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Location tracking stopped");
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn bangkok() -> GeoPosition {
        GeoPosition::new(13.7563, 100.5018, 10.0)
    }

    #[test]
    fn test_request_position_from_fixed_source() {
        assert_eq!(request_position(&FixedPosition(bangkok())), Ok(bangkok()));
    }

    #[test]
    fn test_request_position_reports_error() {
        let source = Unavailable(LocationError::PermissionDenied);
        assert_eq!(
            request_position(&source),
            Err(LocationError::PermissionDenied)
        );
    }

    #[test]
    fn test_closure_is_a_source() {
        let source = || -> Result<GeoPosition, LocationError> { Ok(bangkok()) };
        assert_eq!(source.current_position(), Ok(bangkok()));
    }

    #[tokio::test]
    async fn test_watch_publishes_positions() {
        let handle = watch_position(
            Arc::new(FixedPosition(bangkok())),
            Duration::from_millis(10),
            None,
        );
        let mut updates = handle.subscribe();

        tokio::time::timeout(Duration::from_secs(2), updates.changed())
            .await
            .expect("no position published")
            .unwrap();

        assert_eq!(handle.latest(), Some(bangkok()));
        assert!(handle.is_active());
    }

    #[tokio::test]
    async fn test_watch_keeps_last_fix_when_source_fails() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let source = move || -> Result<GeoPosition, LocationError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(LocationError::Timeout)
        };

        let handle = watch_position(Arc::new(source), Duration::from_millis(5), Some(bangkok()));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(polls.load(Ordering::SeqCst) > 0);
        assert_eq!(handle.latest(), Some(bangkok()));
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let mut handle = watch_position(
            Arc::new(FixedPosition(bangkok())),
            Duration::from_millis(10),
            Some(bangkok()),
        );

        handle.stop();
        handle.stop();

        assert!(!handle.is_active());
        assert_eq!(handle.latest(), Some(bangkok()));
    }

    #[tokio::test]
    async fn test_stopped_watch_publishes_nothing_more() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let source = move || -> Result<GeoPosition, LocationError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(bangkok())
        };

        let mut handle = watch_position(Arc::new(source), Duration::from_millis(5), None);
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.stop();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let after_stop = polls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(polls.load(Ordering::SeqCst), after_stop);
    }
}
