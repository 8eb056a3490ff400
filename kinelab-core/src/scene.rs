//! Mapping from engine values to scene coordinates
//!
//! The renderer draws a body on a horizontal track whose origin sits at 50%
//! of the track width. Everything here is a pure function of its inputs, so
//! identical engine values always produce the same picture.

use crate::error::ConfigError;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tunables of the visual mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    /// How far past the track end (in track units) the body may still be drawn
    pub overscan: f64,
    /// Track units to percent of track width
    pub offset_scale: f64,
    /// Below this speed the wheels stand still
    pub moving_threshold: f64,
    /// Fastest wheel rotation (seconds per turn)
    pub min_rotation_period: f64,
    /// Wheel period is `rotation_constant / speed`
    pub rotation_constant: f64,
    /// Velocity arrow pixels per m/s
    pub vector_scale: f64,
    pub max_vector_length: f64,
    /// Below this speed the velocity arrow is hidden
    pub vector_visibility_threshold: f64,
    /// Speed gauge percent per m/s
    pub speed_bar_scale: f64,
    pub max_speed_bar_percent: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            overscan: 10.0,
            offset_scale: 0.5,
            moving_threshold: 0.1,
            min_rotation_period: 0.1,
            rotation_constant: 2.0,
            vector_scale: 5.0,
            max_vector_length: 100.0,
            vector_visibility_threshold: 0.5,
            speed_bar_scale: 1.5,
            max_speed_bar_percent: 50.0,
        }
    }
}

impl SceneStyle {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("scene.overscan", self.overscan),
            ("scene.moving_threshold", self.moving_threshold),
            ("scene.min_rotation_period", self.min_rotation_period),
            ("scene.max_vector_length", self.max_vector_length),
            ("scene.vector_visibility_threshold", self.vector_visibility_threshold),
            ("scene.max_speed_bar_percent", self.max_speed_bar_percent),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be zero or positive, got {}", value),
                ));
            }
        }

        let positive = [
            ("scene.offset_scale", self.offset_scale),
            ("scene.rotation_constant", self.rotation_constant),
            ("scene.vector_scale", self.vector_scale),
            ("scene.speed_bar_scale", self.speed_bar_scale),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be positive, got {}", value),
                ));
            }
        }
        Ok(())
    }
}

/// Wheel spin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn sign(self) -> f32 {
        match self {
            RotationDirection::Clockwise => 1.0,
            RotationDirection::CounterClockwise => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub direction: RotationDirection,
    /// Seconds per full turn; `None` means the wheel is at rest
    pub period: Option<f64>,
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    pub clamped_position: f64,
    /// Body position as percent of track width, origin at 50
    pub screen_offset_percent: f64,
    pub speed: f64,
    pub is_moving: bool,
    pub rotation: Rotation,
    /// Velocity arrow length in pixels, saturating
    pub vector_length: f64,
    pub show_vector: bool,
    /// Width of the speed gauge, percent of its track
    pub speed_bar_percent: f64,
}

impl SceneParams {
    /// Body centre on a track drawn from `track_start` to `track_end`
    pub fn body_anchor(&self, track_start: Vec2, track_end: Vec2) -> Vec2 {
        track_start.lerp(track_end, (self.screen_offset_percent / 100.0) as f32)
    }

    /// Velocity arrow as a screen vector, pointing along the motion
    pub fn arrow_vector(&self) -> Vec2 {
        if !self.show_vector {
            return Vec2::ZERO;
        }
        Vec2::X * (self.vector_length as f32) * self.rotation.direction.sign()
    }
}

/// Map a position and velocity to scene parameters
pub fn map_to_scene(
    position: f64,
    velocity: f64,
    track_half_range: f64,
    style: &SceneStyle,
) -> SceneParams {
    // clamp panics on an inverted or NaN range
    let bound = (track_half_range + style.overscan).max(0.0);
    let clamped_position = if position.is_finite() {
        position.clamp(-bound, bound)
    } else {
        0.0
    };
    let screen_offset_percent = 50.0 + clamped_position * style.offset_scale;

    let velocity = if velocity.is_finite() { velocity } else { 0.0 };
    let speed = velocity.abs();
    let is_moving = speed > style.moving_threshold;

    let direction = if velocity >= 0.0 {
        RotationDirection::Clockwise
    } else {
        RotationDirection::CounterClockwise
    };
    let period =
        is_moving.then(|| (style.rotation_constant / speed).max(style.min_rotation_period));

    SceneParams {
        clamped_position,
        screen_offset_percent,
        speed,
        is_moving,
        rotation: Rotation { direction, period },
        vector_length: (speed * style.vector_scale).min(style.max_vector_length),
        show_vector: speed > style.vector_visibility_threshold,
        speed_bar_percent: (speed * style.speed_bar_scale).min(style.max_speed_bar_percent),
    }
}

/// A labelled ruler mark under the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackMark {
    pub value: f64,
    pub offset_percent: f64,
}

/// Most marks drawn on either side of the origin
pub const MAX_MARKS_PER_SIDE: usize = 500;

/// Ruler marks every `step` units from `-track_half_range` to `track_half_range`
///
/// On a track too long for `step`, the step is widened to a whole multiple of
/// itself so at most [`MAX_MARKS_PER_SIDE`] marks fall on each side.
pub fn track_marks(track_half_range: f64, step: f64, style: &SceneStyle) -> Vec<TrackMark> {
    if step.is_nan() || step <= 0.0 || !track_half_range.is_finite() {
        return Vec::new();
    }
    let mut step = step;
    let per_side = (track_half_range / step).floor();
    if !per_side.is_finite() {
        return Vec::new();
    }
    let max = MAX_MARKS_PER_SIDE as f64;
    if per_side > max {
        step *= (per_side / max).ceil();
    }
    let count = ((track_half_range / step).floor() as i64).min(MAX_MARKS_PER_SIDE as i64);
    (-count..=count)
        .map(|i| {
            let value = i as f64 * step;
            TrackMark {
                value,
                offset_percent: 50.0 + value * style.offset_scale,
            }
        })
        .collect()
}
