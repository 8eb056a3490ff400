//! Mapping engine values onto the drawn track

use glam::Vec2;
use kinelab_core::scene::{
    map_to_scene, track_marks, RotationDirection, SceneStyle, MAX_MARKS_PER_SIDE,
};
use kinelab_core::LabConfig;
use kinelab_core::tests::test_helpers::approx_eq;

fn scene(position: f64, velocity: f64) -> kinelab_core::SceneParams {
    map_to_scene(position, velocity, 100.0, &SceneStyle::default())
}

#[test]
fn test_origin_at_rest() {
    let s = scene(0.0, 0.0);
    assert_eq!(s.screen_offset_percent, 50.0);
    assert_eq!(s.speed, 0.0);
    assert!(!s.is_moving);
    assert_eq!(s.rotation.period, None);
    assert_eq!(s.rotation.direction, RotationDirection::Clockwise);
    assert_eq!(s.vector_length, 0.0);
    assert!(!s.show_vector);
    assert_eq!(s.speed_bar_percent, 0.0);
}

#[test]
fn test_position_is_half_scale_around_center() {
    assert_eq!(scene(40.0, 0.0).screen_offset_percent, 70.0);
    assert_eq!(scene(-100.0, 0.0).screen_offset_percent, 0.0);
}

#[test]
fn test_position_clamped_just_past_track() {
    let far_left = scene(-200.0, 0.0);
    assert_eq!(far_left.clamped_position, -110.0);
    assert_eq!(far_left.screen_offset_percent, -5.0);

    let far_right = scene(500.0, 0.0);
    assert_eq!(far_right.clamped_position, 110.0);
    assert_eq!(far_right.screen_offset_percent, 105.0);
}

#[test]
fn test_non_finite_values_map_to_rest_at_origin() {
    let s = scene(f64::NAN, f64::INFINITY);
    assert_eq!(s.screen_offset_percent, 50.0);
    assert!(!s.is_moving);
    assert_eq!(s.vector_length, 0.0);
}

#[test]
fn test_forward_motion() {
    let s = scene(0.0, 10.0);
    assert_eq!(s.speed, 10.0);
    assert!(s.is_moving);
    assert_eq!(s.rotation.direction, RotationDirection::Clockwise);
    assert_eq!(s.rotation.period, Some(0.2));
    assert_eq!(s.vector_length, 50.0);
    assert!(s.show_vector);
    assert_eq!(s.speed_bar_percent, 15.0);
}

#[test]
fn test_fast_reverse_motion_saturates() {
    let s = scene(0.0, -30.0);
    assert_eq!(s.rotation.direction, RotationDirection::CounterClockwise);
    assert_eq!(s.rotation.period, Some(0.1), "period floors at the minimum");
    assert_eq!(s.vector_length, 100.0);
    assert_eq!(s.speed_bar_percent, 45.0);

    let faster = scene(0.0, -80.0);
    assert_eq!(faster.speed_bar_percent, 50.0);
}

#[test]
fn test_thresholds() {
    let crawling = scene(0.0, 0.05);
    assert!(!crawling.is_moving);
    assert_eq!(crawling.rotation.period, None);

    let slow = scene(0.0, 0.3);
    assert!(slow.is_moving);
    let period = slow.rotation.period.expect("moving wheel has a period");
    assert!(approx_eq(period, 2.0 / 0.3, 1e-12));
    assert!(!slow.show_vector, "arrow hidden below 0.5 m/s");
}

#[test]
fn test_mapping_is_deterministic() {
    assert_eq!(scene(37.25, -4.5), scene(37.25, -4.5));
}

#[test]
fn test_body_anchor_and_arrow() {
    let s = scene(40.0, -30.0);
    let anchor = s.body_anchor(Vec2::new(0.0, 10.0), Vec2::new(200.0, 10.0));
    assert!(anchor.abs_diff_eq(Vec2::new(140.0, 10.0), 1e-3));
    assert_eq!(s.arrow_vector(), Vec2::new(-100.0, 0.0));

    assert_eq!(scene(0.0, 0.3).arrow_vector(), Vec2::ZERO);
}

#[test]
fn test_track_marks_every_twenty() {
    let marks = track_marks(100.0, 20.0, &SceneStyle::default());
    assert_eq!(marks.len(), 11);
    assert_eq!(marks[0].value, -100.0);
    assert_eq!(marks[0].offset_percent, 0.0);
    assert_eq!(marks[5].value, 0.0);
    assert_eq!(marks[5].offset_percent, 50.0);
    assert_eq!(marks[10].offset_percent, 100.0);

    assert!(track_marks(100.0, 0.0, &SceneStyle::default()).is_empty());
}

#[test]
fn test_track_marks_on_huge_track_stay_bounded() {
    let config = LabConfig::from_toml_str("[engine]\ntrack_half_range = 1e12\n").unwrap();
    config.validate().unwrap();

    let range = config.engine.track_half_range;
    let marks = track_marks(range, 20.0, &config.scene);
    assert!(!marks.is_empty());
    assert!(marks.len() <= 2 * MAX_MARKS_PER_SIDE + 1);
    assert!(marks.iter().any(|m| m.value == 0.0));
    assert!(marks.iter().all(|m| m.value.abs() <= range));
    assert_eq!(marks.first().map(|m| m.value), marks.last().map(|m| -m.value));
}

#[test]
fn test_track_marks_widen_step_by_whole_multiples() {
    let marks = track_marks(10_000.0, 1.0, &SceneStyle::default());
    assert_eq!(marks.len(), 2 * MAX_MARKS_PER_SIDE + 1);
    let step = marks[1].value - marks[0].value;
    assert_eq!(step, 20.0);
}
