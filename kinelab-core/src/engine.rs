//! Closed-form kinematics engine
//!
//! A run is Idle or Running. Each frame hands the engine a wall-clock
//! timestamp; the engine turns the delta into elapsed simulation time and
//! stops on its own when the body would leave the track.

use crate::config::EngineConfig;
use crate::kinematics::{DerivedValues, SimulationParameters};

/// Mutable run state, owned by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub elapsed_time: f64,
    pub is_running: bool,
    /// Timestamp of the previous tick, only used to compute frame deltas
    pub last_tick_timestamp: Option<f64>,
}

impl SimulationState {
    fn idle() -> Self {
        Self {
            elapsed_time: 0.0,
            is_running: false,
            last_tick_timestamp: None,
        }
    }
}

/// Why the last run stopped on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The next position would have left the track
    Boundary,
    /// The next time, position or velocity was not a finite number
    NonFinite,
}

/// Single-body constant-acceleration engine
///
/// Owns the elapsed time of a run and advances it once per frame. Position and
/// velocity are never stored; every read recomputes them from the parameters
/// and the elapsed time.
#[derive(Debug, Clone)]
pub struct KinematicsEngine {
    params: SimulationParameters,
    config: EngineConfig,
    state: SimulationState,
    halt_reason: Option<HaltReason>,
}

impl KinematicsEngine {
    pub fn new(params: SimulationParameters, config: EngineConfig) -> Self {
        Self {
            params,
            config,
            state: SimulationState::idle(),
            halt_reason: None,
        }
    }

    pub fn parameters(&self) -> SimulationParameters {
        self.params
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Set when a tick stopped the run, cleared by any user transition
    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halt_reason
    }

    /// Distance from the origin past which a run halts
    pub fn limit(&self) -> f64 {
        self.config.limit()
    }

    /// Enter `Running`. The next tick only records a baseline.
    pub fn start(&mut self) {
        if self.state.is_running {
            return;
        }
        self.state.is_running = true;
        self.state.last_tick_timestamp = None;
        self.halt_reason = None;
        log::debug!("start at t={}", self.state.elapsed_time);
    }

    /// Leave `Running`, keeping the elapsed time
    pub fn pause(&mut self) {
        if !self.state.is_running {
            return;
        }
        self.state.is_running = false;
        log::debug!("pause at t={}", self.state.elapsed_time);
    }

    pub fn reset(&mut self) {
        self.state = SimulationState::idle();
        self.halt_reason = None;
        log::debug!("reset");
    }

    /// Replace the parameters; always resets the run
    pub fn set_parameters(&mut self, initial_velocity: f64, acceleration: f64) {
        self.params = SimulationParameters::new(initial_velocity, acceleration);
        if !self.params.is_finite() {
            log::warn!(
                "non-finite parameters v0={} a={}, the first tick will halt",
                initial_velocity,
                acceleration
            );
        }
        self.reset();
    }

    /// Advance the run to wall-clock `now`.
    ///
    /// Does nothing while idle. The first tick after `start` only records the
    /// baseline. A candidate time whose position would leave the track (or is
    /// not finite) is discarded and the run stops at the last accepted time.
    /// Non-finite parameters stop the run on its first tick.
    pub fn tick(&mut self, now: f64) -> DerivedValues {
        if !self.state.is_running {
            return self.snapshot();
        }

        if !self.params.is_finite() {
            log::warn!(
                "non-finite parameters v0={} a={}, halting",
                self.params.initial_velocity,
                self.params.acceleration
            );
            self.halt(HaltReason::NonFinite);
        } else if let Some(previous) = self.state.last_tick_timestamp {
            let delta = self.config.timestamp_unit.to_seconds(now - previous).max(0.0);
            let candidate = self.state.elapsed_time + delta;
            let position = self.params.position_at(candidate);
            let velocity = self.params.velocity_at(candidate);

            if !(candidate.is_finite() && position.is_finite() && velocity.is_finite()) {
                log::warn!("non-finite state at t={}, halting", candidate);
                self.halt(HaltReason::NonFinite);
            } else if position.abs() > self.limit() {
                log::info!(
                    "position {:.3} past limit {} at t={:.3}, halting at t={:.3}",
                    position,
                    self.limit(),
                    candidate,
                    self.state.elapsed_time
                );
                self.halt(HaltReason::Boundary);
            } else {
                self.state.elapsed_time = candidate;
            }
        }

        // NaN timestamps must not poison the next delta
        if now.is_finite() {
            self.state.last_tick_timestamp = Some(now);
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> DerivedValues {
        DerivedValues::at(&self.params, self.state.elapsed_time, self.state.is_running)
    }

    fn halt(&mut self, reason: HaltReason) {
        self.state.is_running = false;
        self.halt_reason = Some(reason);
    }
}

impl Default for KinematicsEngine {
    fn default() -> Self {
        Self::new(SimulationParameters::default(), EngineConfig::default())
    }
}
