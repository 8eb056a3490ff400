//! Closed-form constant-acceleration kinematics
//!
//! Everything here is evaluated directly from `(v0, a, t)`. Nothing is
//! integrated step by step, so a value computed after a thousand frames is
//! bit-identical to the value computed in one go.

use serde::{Deserialize, Serialize};

/// User-configured inputs of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Signed initial velocity (m/s)
    pub initial_velocity: f64,
    /// Signed acceleration (m/s²)
    pub acceleration: f64,
}

impl SimulationParameters {
    pub fn new(initial_velocity: f64, acceleration: f64) -> Self {
        Self {
            initial_velocity,
            acceleration,
        }
    }

    /// Displacement from the origin after `t` seconds
    pub fn position_at(&self, t: f64) -> f64 {
        displacement_at(self.initial_velocity, self.acceleration, t)
    }

    /// Instantaneous velocity after `t` seconds
    pub fn velocity_at(&self, t: f64) -> f64 {
        velocity_at(self.initial_velocity, self.acceleration, t)
    }

    pub fn is_finite(&self) -> bool {
        self.initial_velocity.is_finite() && self.acceleration.is_finite()
    }
}

impl Default for SimulationParameters {
    // Same starting point as the lab page: from rest, 2 m/s².
    fn default() -> Self {
        Self::new(0.0, 2.0)
    }
}

/// Values derived from the parameters and the elapsed time of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedValues {
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
    pub is_running: bool,
}

impl DerivedValues {
    pub fn at(params: &SimulationParameters, time: f64, is_running: bool) -> Self {
        Self {
            time,
            position: params.position_at(time),
            velocity: params.velocity_at(time),
            is_running,
        }
    }
}

/// `v = v0 + a·t`
pub fn velocity_at(v0: f64, a: f64, t: f64) -> f64 {
    v0 + a * t
}

/// `Δs = v0·t + ½·a·t²`
pub fn displacement_at(v0: f64, a: f64, t: f64) -> f64 {
    v0 * t + 0.5 * a * t * t
}

/// `a = (v − v0) / t`, undefined for `t == 0`
pub fn acceleration_from_velocities(v0: f64, v: f64, t: f64) -> Option<f64> {
    if t == 0.0 {
        return None;
    }
    Some((v - v0) / t)
}

/// `v² = v0² + 2·a·Δs`
pub fn velocity_squared(v0: f64, a: f64, ds: f64) -> f64 {
    v0 * v0 + 2.0 * a * ds
}

/// Timeless relation solved for `a`, undefined for `Δs == 0`
pub fn acceleration_for_distance(v0: f64, v: f64, ds: f64) -> Option<f64> {
    if ds == 0.0 {
        return None;
    }
    Some((v * v - v0 * v0) / (2.0 * ds))
}

/// The four relations taught alongside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    AccelerationDefinition,
    Velocity,
    Displacement,
    Timeless,
}

impl Formula {
    pub const ALL: [Formula; 4] = [
        Formula::AccelerationDefinition,
        Formula::Velocity,
        Formula::Displacement,
        Formula::Timeless,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Formula::AccelerationDefinition => "Definition of acceleration",
            Formula::Velocity => "Predicting velocity",
            Formula::Displacement => "Distance travelled",
            Formula::Timeless => "When time is unknown",
        }
    }

    /// Inline math markup, see [`crate::mathtext`]
    pub fn markup(&self) -> &'static str {
        match self {
            Formula::AccelerationDefinition => "$a = (v - v_0) / t$",
            Formula::Velocity => "$v = v_0 + at$",
            Formula::Displacement => "$\\Delta s = v_0t + 1/2 at^2$",
            Formula::Timeless => "$v^2 = v_0^2 + 2a\\Delta s$",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Formula::AccelerationDefinition => {
                "Acceleration is the change in velocity divided by the time it took."
            }
            Formula::Velocity => "How fast is the car going after t seconds?",
            Formula::Displacement => {
                "Distance at the original speed plus the extra distance gained by accelerating: the area under the v-t graph."
            }
            Formula::Timeless => {
                "Combines the velocity and displacement relations to eliminate t, for problems that give no time."
            }
        }
    }
}
