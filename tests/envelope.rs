use approx::assert_abs_diff_eq;
use artifact_warp::config::default_layers;
use artifact_warp::envelope::{cycle_progress, ease_in_out_sine, intensity};
use artifact_warp::LayerConfig;

const EPS: f64 = 1e-9;

#[test]
fn intensity_stays_in_unit_range() {
    for i in 0..100_000 {
        let p = i as f64 / 100_000.0;
        let v = intensity(p);
        assert!((0.0..=1.0).contains(&v), "progress={p} intensity={v}");
    }
}

#[test]
fn intensity_landmarks() {
    assert_abs_diff_eq!(intensity(0.0), 0.0, epsilon = EPS);
    assert_eq!(intensity(0.5), 0.9);
    assert!(intensity(1.0 - 1e-6) < 1e-6);
    assert!(intensity(0.99) < intensity(0.9));
}

#[test]
fn emergence_joins_fluctuation_smoothly() {
    let left = ease_in_out_sine((0.15 - 1e-9) / 0.15);
    assert_abs_diff_eq!(left, intensity(0.15), epsilon = 1e-2);
}

#[test]
fn hold_boundaries_step_by_at_most_a_tenth() {
    // The ripple ends above 1 (clamped) while the hold sits at 0.9, and the
    // dissolve starts from a full 1.0; both edges step by exactly 0.1.
    for edge in [0.5, 0.65] {
        let step = (intensity(edge - 1e-9) - intensity(edge)).abs();
        assert_abs_diff_eq!(step, 0.1, epsilon = 1e-6);
    }
}

#[test]
fn scale_and_opacity_hit_range_ends() {
    for layer in default_layers() {
        let low = layer.output_at(0.0);
        let high = layer.output_at(1.0);
        assert_eq!(low.scale, layer.min_scale);
        assert_eq!(high.scale, layer.max_scale);
        assert_eq!(low.opacity, layer.min_opacity);
        assert_abs_diff_eq!(high.opacity, layer.max_opacity, epsilon = EPS);
    }
}

#[test]
fn envelope_repeats_every_cycle() {
    for layer in default_layers() {
        for t in [0.0, 137.0, 999.5, 4321.0, 17_000.0] {
            let a = layer.intensity_at(t);
            let b = layer.intensity_at(t + layer.cycle_time);
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
    }
}

#[test]
fn phase_offset_shifts_the_cycle() {
    // Layer 3 starts half a cycle in, inside the hold.
    let layer3 = &default_layers()[2];
    assert_abs_diff_eq!(
        cycle_progress(0.0, layer3.cycle_time, layer3.phase_offset),
        0.5,
        epsilon = EPS
    );
    assert_eq!(layer3.intensity_at(0.0), 0.9);
}

#[test]
fn first_layer_one_second_in() {
    let layer = LayerConfig::new("ai-layer-1", "ai-warp-1", 0.0, 80.0, 12000.0, 0.0, 0.0, 0.5);
    let progress = cycle_progress(1000.0, layer.cycle_time, layer.phase_offset);
    assert_abs_diff_eq!(progress, 1.0 / 12.0, epsilon = EPS);

    let expected = ease_in_out_sine(progress / 0.15);
    assert_abs_diff_eq!(expected, 0.5868, epsilon = 1e-3);

    let out = layer.sample(1000.0);
    assert_abs_diff_eq!(out.scale, 80.0 * expected, epsilon = EPS);
    assert_abs_diff_eq!(out.opacity, 0.5 * expected, epsilon = EPS);
}
