// Chart session - One task owns the controller and publishes view state
use crate::application::view_controller::{ViewState, ViewWindowController};
use chrono::{DateTime, FixedOffset};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

const GESTURE_CHANNEL_CAPACITY: usize = 64;

/// Baseline the first pinch step is compared against
const INITIAL_MAGNIFICATION: f64 = 1.0;

/// Pinch steps are compared with the previous step, including one from an
/// earlier gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchEvent {
    pub magnification: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub translation_x: f64,
}

/// A tap already resolved by the renderer into data space.
#[derive(Debug, Clone, PartialEq)]
pub enum TapEvent {
    Time(DateTime<FixedOffset>),
    Label(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("chart session has shut down")]
    Closed,
}

/// Input side for the renderer: one sender per gesture stream plus a view
/// of the latest published state.
#[derive(Clone)]
pub struct ChartHandle {
    pinch_tx: mpsc::Sender<PinchEvent>,
    drag_tx: mpsc::Sender<DragEvent>,
    tap_tx: mpsc::Sender<TapEvent>,
    state_rx: watch::Receiver<ViewState>,
}

impl ChartHandle {
    pub async fn pinch(&self, magnification: f64) -> Result<(), SessionError> {
        self.pinch_tx
            .send(PinchEvent { magnification })
            .await
            .map_err(|_| SessionError::Closed)
    }

    pub async fn drag(&self, translation_x: f64) -> Result<(), SessionError> {
        self.drag_tx
            .send(DragEvent { translation_x })
            .await
            .map_err(|_| SessionError::Closed)
    }

    pub async fn tap(&self, tap: TapEvent) -> Result<(), SessionError> {
        self.tap_tx.send(tap).await.map_err(|_| SessionError::Closed)
    }

    pub fn current(&self) -> ViewState {
        self.state_rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<ViewState> {
        self.state_rx.clone()
    }

    /// Stream of published states, starting with the current one
    pub fn subscribe(&self) -> WatchStream<ViewState> {
        WatchStream::new(self.watch())
    }
}

/// Start the session task. It runs until every handle clone is dropped and
/// then hands the controller back.
pub fn spawn_session(controller: ViewWindowController) -> (ChartHandle, JoinHandle<ViewWindowController>) {
    let (pinch_tx, pinch_rx) = mpsc::channel(GESTURE_CHANNEL_CAPACITY);
    let (drag_tx, drag_rx) = mpsc::channel(GESTURE_CHANNEL_CAPACITY);
    let (tap_tx, tap_rx) = mpsc::channel(GESTURE_CHANNEL_CAPACITY);
    let (state_tx, state_rx) = watch::channel(controller.snapshot());

    let task = tokio::spawn(run_session(controller, pinch_rx, drag_rx, tap_rx, state_tx));

    let handle = ChartHandle {
        pinch_tx,
        drag_tx,
        tap_tx,
        state_rx,
    };
    (handle, task)
}

async fn run_session(
    mut controller: ViewWindowController,
    mut pinch_rx: mpsc::Receiver<PinchEvent>,
    mut drag_rx: mpsc::Receiver<DragEvent>,
    mut tap_rx: mpsc::Receiver<TapEvent>,
    state_tx: watch::Sender<ViewState>,
) -> ViewWindowController {
    let mut previous_magnification = INITIAL_MAGNIFICATION;

    loop {
        let changed = tokio::select! {
            Some(event) = pinch_rx.recv() => {
                let changed = controller.zoom(event.magnification, previous_magnification);
                previous_magnification = event.magnification;
                changed
            }
            Some(event) = drag_rx.recv() => controller.drag(event.translation_x),
            Some(tap) = tap_rx.recv() => match tap {
                TapEvent::Time(time) => controller.select_time(time),
                TapEvent::Label(label) => controller.select_label(&label),
            },
            else => break,
        };

        if changed {
            let next = controller.snapshot();
            state_tx.send_if_modified(|state| {
                if *state == next {
                    false
                } else {
                    *state = next;
                    true
                }
            });
        }
    }

    tracing::debug!("Chart session finished with window {:?}", controller.window());
    controller
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::telemetry::{TimeSeries, TimeSeriesPoint};
    use crate::domain::view_window::{ViewWindow, WindowProfile};
    use chrono::{Duration, TimeZone};
    use futures::StreamExt;
    use std::sync::Arc;

    fn controller(count: usize) -> ViewWindowController {
        let base = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 25, 23, 0, 0)
            .unwrap();
        let points = (0..count)
            .map(|i| {
                TimeSeriesPoint::new(
                    base + Duration::minutes(i as i64),
                    Some(30.0 + i as f64),
                    None,
                    Some(Category::Light),
                )
            })
            .collect();
        let series = Arc::new(TimeSeries::new(points).unwrap());
        ViewWindowController::new(series, WindowProfile::default())
    }

    #[tokio::test]
    async fn test_drags_apply_in_order_after_zoom() {
        let (handle, task) = spawn_session(controller(100));
        let mut state_rx = handle.watch();

        handle.pinch(10.0).await.unwrap();
        state_rx.changed().await.unwrap();
        assert_eq!(state_rx.borrow().window, ViewWindow::new(10, 79));

        for _ in 0..3 {
            handle.drag(-100.0).await.unwrap();
        }
        drop(handle);

        let controller = task.await.unwrap();
        assert_eq!(controller.window(), ViewWindow::new(16, 79));
    }

    #[tokio::test]
    async fn test_pinch_compares_with_last_step_of_previous_gesture() {
        let (handle, task) = spawn_session(controller(100));

        handle.pinch(10.0).await.unwrap();
        // new gesture starting low still compares against 10.0 and zooms out
        handle.pinch(1.2).await.unwrap();
        drop(handle);

        let controller = task.await.unwrap();
        assert_eq!(controller.window(), ViewWindow::new(6, 83));
    }

    #[tokio::test]
    async fn test_pinch_steps_track_previous_magnification() {
        let (handle, task) = spawn_session(controller(100));

        handle.pinch(3.0).await.unwrap();
        // lower than the last step, so this one zooms out and hits the left edge
        handle.pinch(2.0).await.unwrap();
        handle.pinch(2.5).await.unwrap();
        drop(handle);

        let controller = task.await.unwrap();
        assert_eq!(controller.window(), ViewWindow::new(5, 89));
    }

    #[tokio::test]
    async fn test_tap_publishes_summary() {
        let (handle, task) = spawn_session(controller(60));
        let mut state_rx = handle.watch();
        assert_eq!(handle.current().summary, "No time is selected");

        handle.tap(TapEvent::Label("23:10".to_string())).await.unwrap();
        state_rx.changed().await.unwrap();
        assert_eq!(
            handle.current().summary,
            "Selected time: 23:10\nLoudness: Light"
        );
        assert_eq!(handle.current().selection.map(|s| s.level), Some(40));

        drop(state_rx);
        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_subscribe_starts_with_current_state() {
        let (handle, task) = spawn_session(controller(40));
        let mut states = handle.subscribe();

        let first = states.next().await.unwrap();
        assert_eq!(first.window, ViewWindow::new(0, 39));
        assert_eq!(first.axis_labels.len(), 40);

        drop(handle);
        task.await.unwrap();
        assert!(states.next().await.is_none());
    }

    #[tokio::test]
    async fn test_send_after_shutdown_fails() {
        let (handle, task) = spawn_session(controller(40));
        task.abort();
        let _ = task.await;

        assert_eq!(handle.drag(10.0).await, Err(SessionError::Closed));
        assert_eq!(handle.pinch(1.5).await, Err(SessionError::Closed));
    }
}
