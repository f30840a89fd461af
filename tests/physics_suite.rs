use glam::Vec2;
use reactive_vacuum::derived::{DerivedState, entropic_a0};
use reactive_vacuum::params::SimulationParams;
use reactive_vacuum::visual::grid::{
    GridUniforms, breathing, depth_newton, depth_verlinde, final_depth, grid_line_mask,
    shade_fragment, smooth_r, well_elevation,
};
use reactive_vacuum::visual::lensing::{
    LensUniforms, accretion_glow, active_correction, base_deflection, distort_uv, einstein_ring,
    entropic_correction, ring_radius, shade_pixel, star_field,
};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn lens(mass: f32, stiffness: f32, redshift: f32, lens_strength: f32) -> LensUniforms {
    LensUniforms {
        mass,
        a0: entropic_a0(redshift),
        stiffness,
        lens_strength,
    }
}

#[test]
fn a0_is_linear_in_redshift() {
    assert_eq!(entropic_a0(0.0), 0.5);
    assert_eq!(entropic_a0(5.0), 3.0);
    assert_eq!(DerivedState::from_redshift(2.0).a0, 1.5);

    let mut prev = entropic_a0(0.0);
    for i in 1..=50 {
        let z = i as f32 * 0.1;
        let a0 = entropic_a0(z);
        assert!(a0 > prev, "a0 must increase at z={z}");
        assert!(approx(a0 - prev, 0.05, 1e-5), "constant slope at z={z}");
        prev = a0;
    }
}

#[test]
fn smooth_radius_floors_at_point_two() {
    assert_eq!(smooth_r(0.0), 0.2);
    assert_eq!(smooth_r(0.1), 0.2);
    assert_eq!(smooth_r(0.2), 0.2);
    assert_eq!(smooth_r(0.5), 0.5);
    assert_eq!(smooth_r(7.0), 7.0);
    assert!(approx(depth_newton(0.0), 5.0, 1e-5));
}

#[test]
fn blend_endpoints_are_exact() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0001);
    for _ in 0..500 {
        let r = rng.f32() * 15.0;
        let a0 = 0.5 + rng.f32() * 2.5;
        assert_eq!(final_depth(r, a0, 0.0), depth_newton(r));
        assert_eq!(final_depth(r, a0, 1.0), depth_verlinde(r, a0));
    }
}

#[test]
fn entropic_depth_never_shallower_than_newton() {
    for i in 0..200 {
        let r = i as f32 * 0.05;
        assert!(depth_verlinde(r, 0.5) >= depth_newton(r));
        let mid = final_depth(r, 0.5, 0.5);
        assert!(mid >= depth_newton(r) && mid <= depth_verlinde(r, 0.5));
    }
}

#[test]
fn breathing_stays_within_two_percent_of_a0() {
    for i in 0..400 {
        let t = i as f32 * 0.1;
        for a0 in [0.5f32, 1.5, 3.0] {
            let b = breathing(t, a0);
            assert!((b - 1.0).abs() <= 0.02 * a0 + 1e-6);
        }
    }
    assert_eq!(breathing(0.0, 3.0), 1.0);
}

#[test]
fn correction_is_never_below_one() {
    let mut rng = fastrand::Rng::with_seed(0x5EED_0002);
    for _ in 0..2_000 {
        let r = rng.f32() * 20.0;
        let mass = 0.1 + rng.f32() * 4.9;
        let a0 = 0.5 + rng.f32() * 2.5;
        let c = entropic_correction(r, mass, a0);
        assert!(c >= 1.0, "correction {c} < 1 at r={r} mass={mass} a0={a0}");
        assert!(c.is_finite());
    }
}

#[test]
fn correction_is_one_without_mass() {
    assert_eq!(entropic_correction(1.0, 0.0, 0.5), 1.0);
    assert_eq!(entropic_correction(0.0, 0.0, 3.0), 1.0);
}

#[test]
fn correction_grows_with_radius() {
    // The entropic boost dominates where Newtonian acceleration is weak.
    let near = entropic_correction(0.5, 1.0, 0.5);
    let far = entropic_correction(8.0, 1.0, 0.5);
    assert!(far > near);
}

#[test]
fn zero_stiffness_means_no_correction() {
    let u = lens(3.0, 0.0, 5.0, 1.0);
    for i in 0..50 {
        assert_eq!(active_correction(i as f32 * 0.02, &u), 1.0);
    }
}

#[test]
fn vanishing_mass_removes_deflection_and_glow() {
    let tiny = 1e-6;
    assert!(base_deflection(0.3, tiny) < 1e-6);
    assert!(accretion_glow(0.3, tiny) < 1e-6);

    // With the full entropic boost the shift falls off like sqrt(mass).
    let uv = Vec2::new(0.7, 0.4);
    let mut prev = f32::INFINITY;
    for mass in [1e-2f32, 1e-4, 1e-6, 1e-8] {
        let shift = distort_uv(uv, &lens(mass, 1.0, 5.0, 2.0)).distance(uv);
        assert!(shift < prev, "shift {shift} did not shrink at mass={mass}");
        prev = shift;
    }
    assert!(prev < 1e-3);
}

#[test]
fn distortion_pulls_towards_centre() {
    let u = lens(1.0, 0.0, 0.0, 1.0);
    let uv = Vec2::new(0.8, 0.5);
    let moved = distort_uv(uv, &u);
    assert!(moved.x < uv.x);
    assert!(approx(moved.y, 0.5, 1e-6));
    // 0.02 / 0.3 for a unit mass at r = 0.3.
    assert!(approx(uv.x - moved.x, 0.02 / 0.3, 1e-5));
}

#[test]
fn lens_strength_zero_leaves_uv_alone() {
    let u = lens(5.0, 1.0, 5.0, 0.0);
    let uv = Vec2::new(0.2, 0.9);
    assert_eq!(distort_uv(uv, &u), uv);
}

#[test]
fn centre_pixel_is_finite() {
    let u = lens(5.0, 1.0, 5.0, 2.0);
    let centre = Vec2::splat(0.5);
    assert_eq!(distort_uv(centre, &u), centre);
    let rgb = shade_pixel(centre, &u);
    assert!(rgb.iter().all(|c| c.is_finite()));
    assert!(accretion_glow(0.0, 5.0).is_finite());
}

#[test]
fn ring_is_off_up_to_threshold() {
    for s in [0.0f32, 0.25, 0.5] {
        let u = lens(2.0, s, 5.0, 1.0);
        for i in 0..=100 {
            assert_eq!(einstein_ring(i as f32 * 0.01, &u), 0.0);
        }
    }
}

#[test]
fn ring_switches_on_above_threshold() {
    let u = lens(2.0, 0.51, 5.0, 1.0);
    let rr = ring_radius(u.mass, u.a0);
    assert!(einstein_ring(rr, &u) > 0.0);
    assert!(approx(einstein_ring(rr, &u), 0.51 * 0.2, 1e-6));
}

#[test]
fn stars_are_sparse_and_bright() {
    let mut lit = 0;
    let total = 200 * 200;
    for y in 0..200 {
        for x in 0..200 {
            let s = star_field(Vec2::new(x as f32 / 200.0, y as f32 / 200.0));
            if s > 0.0 {
                assert!(s >= 0.98);
                lit += 1;
            }
        }
    }
    assert!(lit < total / 10, "{lit} of {total} samples lit");
}

#[test]
fn grid_lines_are_thin_bands() {
    assert_eq!(grid_line_mask(Vec2::new(0.01, 0.01)), 0.0);
    // fract(40 * 0.024) = 0.96.
    assert_eq!(grid_line_mask(Vec2::new(0.024, 0.01)), 1.0);
    assert_eq!(grid_line_mask(Vec2::new(0.01, 0.024)), 1.0);
}

#[test]
fn grid_fades_outside_the_disc() {
    let on_line = Vec2::new(0.5 + 0.024, 0.5);
    let (_, inner) = shade_fragment(0.0, on_line, 0.0);
    assert!(inner > 0.99);

    let far = Vec2::new(0.999, 0.999);
    let (_, outer) = shade_fragment(0.0, far, 0.0);
    assert_eq!(outer, 0.0);
}

#[test]
fn grid_colour_heads_to_gold_with_depth_and_green_with_stiffness() {
    let uv = Vec2::new(0.524, 0.5);
    let (flat, _) = shade_fragment(0.0, uv, 0.0);
    assert_eq!(flat, [0.0, 0.4, 0.8]);

    let (deep, _) = shade_fragment(-5.0, uv, 0.0);
    assert!(approx(deep[0], 1.0, 1e-6));
    assert!(approx(deep[1], 0.6, 1e-6));
    assert!(approx(deep[2], 0.1, 1e-6));

    let (glow, _) = shade_fragment(0.0, uv, 1.0);
    assert!(approx(glow[1], 0.7, 1e-6));
    assert!(approx(glow[2], 0.95, 1e-6));
}

#[test]
fn scenario_newtonian_unit_mass() {
    let p = SimulationParams {
        mass: 1.0,
        stiffness: 0.0,
        redshift: 0.0,
        lensing_strength: 1.0,
    };
    let a0 = p.derived().a0;
    assert_eq!(a0, 0.5);
    assert_eq!(final_depth(1.0, a0, p.stiffness), 1.0);

    let g = GridUniforms {
        time: 0.0,
        mass: p.mass,
        stiffness: p.stiffness,
        a0,
    };
    assert_eq!(well_elevation(1.0, 0.0, &g), -0.5);
    assert_eq!(well_elevation(0.0, -1.0, &g), -0.5);

    let u = lens(p.mass, p.stiffness, p.redshift, p.lensing_strength);
    for i in 0..=200 {
        assert_eq!(einstein_ring(i as f32 * 0.005, &u), 0.0);
    }
}

#[test]
fn scenario_fully_entropic_heavy_mass() {
    let p = SimulationParams {
        mass: 2.0,
        stiffness: 1.0,
        redshift: 5.0,
        lensing_strength: 1.0,
    };
    let a0 = p.derived().a0;
    assert_eq!(a0, 3.0);

    let rr = ring_radius(p.mass, a0);
    assert!(approx(rr, 6f32.sqrt() * 0.2, 1e-6));
    assert!(approx(rr, 0.4899, 1e-4));

    let u = lens(p.mass, p.stiffness, p.redshift, p.lensing_strength);
    let (mut best_r, mut best) = (0.0f32, 0.0f32);
    for i in 0..=1000 {
        let r = i as f32 * 0.001;
        let v = einstein_ring(r, &u);
        if v > best {
            best = v;
            best_r = r;
        }
    }
    assert!(best > 0.0);
    assert!(approx(best_r, 0.49, 0.002), "peak at {best_r}");
}

#[test]
fn heavier_mass_digs_a_deeper_well() {
    let light = GridUniforms {
        time: 0.0,
        mass: 0.5,
        stiffness: 0.3,
        a0: 1.0,
    };
    let heavy = GridUniforms { mass: 4.0, ..light };
    assert!(well_elevation(2.0, 1.0, &heavy) < well_elevation(2.0, 1.0, &light));
}
