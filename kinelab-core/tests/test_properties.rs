//! Property tests for the closed-form engine and the scene mapping

use kinelab_core::answer::{check_answer, AnswerOutcome};
use kinelab_core::scene::{map_to_scene, SceneStyle};
use kinelab_core::tests::test_helpers::engine_with;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_values_match_direct_formula(
        v0 in -30.0f64..=30.0,
        a in -10.0f64..=10.0,
        frames in proptest::collection::vec(0.0f64..0.05, 1..200),
    ) {
        let mut engine = engine_with(v0, a);
        engine.start();
        let mut now = 0.0;
        engine.tick(now);
        for dt in frames {
            now += dt;
            engine.tick(now);
        }

        let snap = engine.snapshot();
        let t = snap.time;
        prop_assert!(t >= 0.0);
        prop_assert_eq!(snap.position, v0 * t + 0.5 * a * t * t);
        prop_assert_eq!(snap.velocity, v0 + a * t);
        prop_assert!(snap.position.abs() <= engine.limit());
    }

    #[test]
    fn prop_elapsed_time_never_decreases(
        v0 in -30.0f64..=30.0,
        a in -10.0f64..=10.0,
        stamps in proptest::collection::vec(-1.0f64..5.0, 1..100),
    ) {
        let mut engine = engine_with(v0, a);
        engine.start();
        let mut last = 0.0;
        for now in stamps {
            let values = engine.tick(now);
            prop_assert!(values.time >= last);
            last = values.time;
        }
    }

    #[test]
    fn prop_scene_offset_stays_near_track(
        position in -1.0e6f64..1.0e6,
        velocity in -1.0e3f64..1.0e3,
    ) {
        let style = SceneStyle::default();
        let scene = map_to_scene(position, velocity, 100.0, &style);
        prop_assert!(scene.screen_offset_percent >= -5.0);
        prop_assert!(scene.screen_offset_percent <= 105.0);
        prop_assert!(scene.vector_length <= style.max_vector_length);
        if let Some(period) = scene.rotation.period {
            prop_assert!(period >= style.min_rotation_period);
        }
        prop_assert_eq!(scene, map_to_scene(position, velocity, 100.0, &style));
    }

    #[test]
    fn prop_exact_reference_is_always_correct(reference in -1.0e4f64..1.0e4) {
        let typed = format!("{}", reference);
        prop_assert_eq!(check_answer(&typed, reference, 0.1), AnswerOutcome::Correct);
    }
}
