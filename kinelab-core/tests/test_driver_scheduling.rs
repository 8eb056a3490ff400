//! Frame request bookkeeping of the simulation driver

use kinelab_core::scheduler::{FrameScheduler, ManualScheduler, SimulationDriver, TickHandle};
use kinelab_core::tests::test_helpers::{engine_with, manual_driver};

#[test]
fn test_start_requests_one_frame() {
    let mut driver = manual_driver(0.0, 2.0);
    assert!(driver.scheduler().queued().is_empty());

    driver.start();
    driver.start();
    assert_eq!(driver.scheduler().queued().len(), 1);
    assert_eq!(driver.pending(), driver.scheduler().queued().first().copied());
}

#[test]
fn test_frames_advance_and_rerequest() {
    let mut driver = manual_driver(0.0, 2.0);
    driver.start();

    let values = driver.fire_due(0.0).expect("baseline frame");
    assert_eq!(values.time, 0.0);
    assert_eq!(driver.scheduler().queued().len(), 1);

    let values = driver.fire_due(3.0).expect("second frame");
    assert_eq!(values.time, 3.0);
    assert_eq!(values.position, 9.0);
    assert_eq!(values.velocity, 6.0);
    assert_eq!(driver.scheduler().queued().len(), 1);
}

#[test]
fn test_pause_withdraws_pending_frame() {
    let mut driver = manual_driver(0.0, 2.0);
    driver.start();
    driver.fire_due(0.0);
    driver.fire_due(1.0);

    driver.pause();
    assert_eq!(driver.pending(), None);
    assert!(driver.scheduler().queued().is_empty());
    assert_eq!(driver.fire_due(2.0), None);
    assert_eq!(driver.snapshot().time, 1.0);
}

#[test]
fn test_stale_frame_after_set_parameters_is_ignored() {
    let mut driver = manual_driver(0.0, 2.0);
    driver.start();
    driver.fire_due(0.0);
    driver.fire_due(5.0);
    let in_flight = driver.pending().expect("frame in flight");

    driver.set_parameters(3.0, 0.0);
    assert!(driver.scheduler().queued().is_empty());

    assert_eq!(driver.on_frame(in_flight, 6.0), None);
    let snap = driver.snapshot();
    assert_eq!(snap.time, 0.0);
    assert!(!snap.is_running);
    assert_eq!(snap.velocity, 3.0);
}

#[test]
fn test_reset_withdraws_pending_frame() {
    let mut driver = manual_driver(1.0, 0.0);
    driver.start();
    driver.fire_due(0.0);
    let in_flight = driver.pending().expect("frame in flight");

    driver.reset();
    assert_eq!(driver.on_frame(in_flight, 1.0), None);
    assert_eq!(driver.snapshot().time, 0.0);
}

#[test]
fn test_unknown_handle_is_ignored() {
    let mut driver = manual_driver(1.0, 0.0);
    driver.start();
    assert_eq!(driver.on_frame(TickHandle(999), 1.0), None);
    assert!(driver.pending().is_some());
}

#[test]
fn test_frames_after_dispose_are_no_ops() {
    let mut driver = manual_driver(1.0, 0.0);
    driver.start();
    driver.fire_due(0.0);
    let leaked = driver.pending().expect("frame in flight");

    driver.dispose();
    assert!(driver.is_disposed());
    assert!(driver.scheduler().queued().is_empty());
    assert_eq!(driver.on_frame(leaked, 1.0), None);

    driver.start();
    assert_eq!(driver.pending(), None);
    assert!(!driver.snapshot().is_running);

    // disposing twice is harmless
    driver.dispose();
}

#[test]
fn test_boundary_halt_stops_requesting_frames() {
    let mut driver = manual_driver(50.0, 0.0);
    driver.start();
    for now in [0.0, 1.0, 2.0] {
        driver.fire_due(now);
    }
    let values = driver.fire_due(3.0).expect("halting frame");
    assert!(!values.is_running);
    assert_eq!(values.position, 100.0);
    assert!(driver.scheduler().queued().is_empty());
    assert_eq!(driver.fire_due(4.0), None);
}

#[test]
fn test_toggle_alternates_start_and_pause() {
    let mut driver = manual_driver(1.0, 0.0);
    driver.toggle();
    assert!(driver.engine().is_running());
    driver.toggle();
    assert!(!driver.engine().is_running());
    assert!(driver.scheduler().queued().is_empty());
}

/// Records every cancellation it receives
#[derive(Debug, Default)]
struct RecordingScheduler {
    inner: ManualScheduler,
    cancelled: Vec<TickHandle>,
}

impl FrameScheduler for RecordingScheduler {
    fn request_tick(&mut self) -> TickHandle {
        self.inner.request_tick()
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.cancelled.push(handle);
        self.inner.cancel_tick(handle);
    }
}

#[test]
fn test_set_parameters_cancels_synchronously() {
    let mut driver = SimulationDriver::new(engine_with(0.0, 1.0), RecordingScheduler::default());
    driver.start();
    let in_flight = driver.pending().expect("frame in flight");

    driver.set_parameters(2.0, 2.0);
    assert_eq!(driver.scheduler().cancelled, vec![in_flight]);
    assert_eq!(driver.pending(), None);
}
