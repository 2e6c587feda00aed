//! Integration tests for point generation.
//!
//! These exercise the public API the demos use: generators, scene
//! regeneration and the per-frame wave, all with fixed seeds.

use pointfield::animation::{apply_wave, wave_y};
use pointfield::prelude::*;

// ============================================================================
// Buffer lengths
// ============================================================================

#[test]
fn test_buffers_are_three_floats_per_point() {
    for count in [0u32, 1, 2, 7, 100, 4096] {
        let mut rng = PointRng::from_seed(count as u64);

        let galaxy = GalaxyParams {
            count,
            ..Default::default()
        }
        .generate(&mut rng)
        .unwrap();
        assert_eq!(galaxy.positions().len(), 3 * count as usize);
        assert_eq!(galaxy.colors().len(), 3 * count as usize);

        let scatter = ScatterParams { count, scale: 2.0 }.generate(&mut rng).unwrap();
        assert_eq!(scatter.positions().len(), 3 * count as usize);
        assert_eq!(scatter.colors().len(), 3 * count as usize);
    }
}

#[test]
fn test_empty_generator_through_trait() {
    let generator: Generator = ScatterParams { count: 0, scale: 1.0 }.into();
    let points = generator.generate(&mut PointRng::from_seed(3)).unwrap();
    assert!(points.is_empty());
    assert_eq!(generator.count(), 0);
}

// ============================================================================
// Galaxy shape
// ============================================================================

#[test]
fn test_galaxy_radius_in_range() {
    let params = GalaxyParams {
        count: 5000,
        radius: 5.0,
        ..Default::default()
    };
    let mut rng = PointRng::from_seed(11);
    for i in 0..params.count {
        let s = params.sample(i, &mut rng);
        assert!((0.0..5.0).contains(&s.radius), "radius {} out of range", s.radius);
    }
}

#[test]
fn test_galaxy_gradient_endpoints() {
    let params = GalaxyParams {
        radius: 4.0,
        inner_color: Color::from_hex("#ff0000").unwrap(),
        outer_color: Color::from_hex("#0000ff").unwrap(),
        ..Default::default()
    };
    assert_eq!(params.color_at(0.0), params.inner_color);
    assert_eq!(params.color_at(4.0), params.outer_color);

    let mid = params.color_at(2.0);
    assert!((mid.r - 0.5).abs() < 1e-6);
    assert_eq!(mid.g, 0.0);
    assert!((mid.b - 0.5).abs() < 1e-6);
}

#[test]
fn test_single_branch_has_zero_angle() {
    let params = GalaxyParams {
        count: 200,
        branches: 1,
        ..Default::default()
    };
    let mut rng = PointRng::from_seed(5);
    for i in 0..params.count {
        assert_eq!(params.sample(i, &mut rng).branch_angle, 0.0);
    }
}

#[test]
fn test_zero_branches_rejected() {
    let params = GalaxyParams {
        branches: 0,
        ..Default::default()
    };
    assert_eq!(
        params.generate(&mut PointRng::from_seed(1)).unwrap_err(),
        ParamError::ZeroBranches
    );
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_same_seed_same_points() {
    let params = GalaxyParams::default();
    let a = params.generate(&mut PointRng::from_seed(42)).unwrap();
    let b = params.generate(&mut PointRng::from_seed(42)).unwrap();
    let c = params.generate(&mut PointRng::from_seed(43)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_scene_regeneration_reproducible() {
    let mut scene = Scene::new(
        GalaxyParams {
            count: 1000,
            ..Default::default()
        }
        .into(),
        Animation::Spin { speed: 0.1 },
        PointRng::from_seed(8),
    )
    .unwrap();
    let first = scene.points().clone();

    scene.regenerate().unwrap();
    assert_eq!(scene.points(), &first);
    assert_eq!(scene.generation(), 1);
}

// ============================================================================
// Wave animation
// ============================================================================

#[test]
fn test_wave_sets_y_keeps_x_z_and_colors() {
    let mut points = ScatterParams::default()
        .generate(&mut PointRng::from_seed(2))
        .unwrap();
    let original = points.clone();

    for frame in 0..10 {
        let t = frame as f32 * 0.016;
        apply_wave(&mut points, t);

        for i in 0..points.len() {
            let before = original.position(i);
            let after = points.position(i);
            assert_eq!(after.x, before.x);
            assert_eq!(after.z, before.z);
            assert_eq!(after.y, wave_y(t, before.x));
            assert_eq!(after.y, (t + before.x).sin());
        }
        assert_eq!(points.colors(), original.colors());
    }
}
