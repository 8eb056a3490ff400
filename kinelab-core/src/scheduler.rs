//! Frame scheduling
//!
//! The engine never talks to a host frame loop directly. A host implements
//! [`FrameScheduler`] (animation frames, an egui repaint request, a test
//! queue) and feeds the granted frames back through
//! [`SimulationDriver::on_frame`].

use crate::engine::KinematicsEngine;
use crate::kinematics::DerivedValues;

/// Identifies one outstanding frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Host-side per-frame callback registry
pub trait FrameScheduler {
    /// Ask for one more frame
    fn request_tick(&mut self) -> TickHandle;
    /// Withdraw a request; cancelling an already fired handle is allowed
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Couples an engine to a scheduler and keeps at most one frame in flight.
///
/// Every transition that changes what the next frame should compute
/// (pause, reset, new parameters, teardown) cancels the pending request before
/// returning, and frames that arrive with any other handle are dropped.
#[derive(Debug)]
pub struct SimulationDriver<S: FrameScheduler> {
    engine: KinematicsEngine,
    scheduler: S,
    pending: Option<TickHandle>,
    disposed: bool,
}

impl<S: FrameScheduler> SimulationDriver<S> {
    pub fn new(engine: KinematicsEngine, scheduler: S) -> Self {
        Self {
            engine,
            scheduler,
            pending: None,
            disposed: false,
        }
    }

    pub fn engine(&self) -> &KinematicsEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn start(&mut self) {
        if self.disposed {
            return;
        }
        self.engine.start();
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_tick());
        }
    }

    pub fn pause(&mut self) {
        self.cancel_pending();
        self.engine.pause();
    }

    /// Start when idle, pause when running
    pub fn toggle(&mut self) {
        if self.engine.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.cancel_pending();
        self.engine.reset();
    }

    pub fn set_parameters(&mut self, initial_velocity: f64, acceleration: f64) {
        self.cancel_pending();
        self.engine.set_parameters(initial_velocity, acceleration);
    }

    /// Deliver a granted frame.
    ///
    /// Returns `None` for a handle that is no longer pending or once the
    /// driver has been disposed.
    pub fn on_frame(&mut self, handle: TickHandle, now: f64) -> Option<DerivedValues> {
        if self.disposed || self.pending != Some(handle) {
            log::trace!("ignoring stale frame {:?}", handle);
            return None;
        }
        self.pending = None;

        let values = self.engine.tick(now);
        if self.engine.is_running() {
            self.pending = Some(self.scheduler.request_tick());
        }
        Some(values)
    }

    pub fn snapshot(&self) -> DerivedValues {
        self.engine.snapshot()
    }

    /// Tear down: withdraw the pending frame and ignore everything after
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel_pending();
        self.engine.pause();
        self.disposed = true;
        log::debug!("driver disposed");
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_tick(handle);
        }
    }
}

impl<S: FrameScheduler> Drop for SimulationDriver<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Scheduler whose frames are fired by hand with synthetic timestamps
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queued: Vec<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles requested and not cancelled, oldest first
    pub fn queued(&self) -> &[TickHandle] {
        &self.queued
    }

    /// Hand over every queued request, emptying the queue
    pub fn take_due(&mut self) -> Vec<TickHandle> {
        std::mem::take(&mut self.queued)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.queued.push(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.queued.retain(|h| *h != handle);
    }
}

impl SimulationDriver<ManualScheduler> {
    /// Fire every queued frame at timestamp `now`, returning the last values
    pub fn fire_due(&mut self, now: f64) -> Option<DerivedValues> {
        let mut last = None;
        for handle in self.scheduler.take_due() {
            if let Some(values) = self.on_frame(handle, now) {
                last = Some(values);
            }
        }
        last
    }
}
