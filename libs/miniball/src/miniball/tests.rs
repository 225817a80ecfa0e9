//! Tests for the enclosing ball iteration.

use super::*;
use crate::point_set::FlatPointSet;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use glam::DVec3;

const TOL: f64 = 1e-12;

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

// =============================================================================
// TRIVIAL INPUTS
// =============================================================================

#[test]
fn empty_input_gives_empty_ball() {
    let pts: Vec<[f64; 3]> = Vec::new();
    let ball = Miniball::new(&pts);
    assert!(ball.is_empty());
    assert_eq!(ball.size(), 0);
    assert_eq!(ball.radius(), 0.0);
    assert_eq!(ball.squared_radius(), 0.0);
    assert_eq!(ball.center(), &[0.0, 0.0, 0.0]);
    assert_eq!(ball.iterations(), 0);
    assert_eq!(ball.support_size(), 0);
    assert_eq!(ball.support().count(), 0);
    assert!(ball.is_valid());
}

#[test]
fn single_point_has_zero_radius() {
    let pts = vec![[1.5, -2.0, 7.0]];
    let ball = Miniball::new(&pts);
    assert!(!ball.is_empty());
    assert_eq!(ball.radius(), 0.0);
    assert_eq!(ball.center(), &[1.5, -2.0, 7.0]);
    assert_eq!(ball.support().collect::<Vec<_>>(), vec![0]);
    assert_eq!(ball.iterations(), 1);
}

#[test]
fn two_points_give_midpoint() {
    let pts = vec![[1.0, 2.0, 3.0], [5.0, -2.0, 1.0]];
    let ball = Miniball::new(&pts);
    assert_abs_diff_eq!(ball.center()[0], 3.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.center()[1], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.center()[2], 2.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.radius(), 3.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.squared_radius(), 9.0, epsilon = TOL);
    assert_eq!(ball.support_size(), 2);
}

#[test]
fn identical_points_collapse() {
    let pts = vec![[2.0, 2.0]; 5];
    let ball = Miniball::new(&pts);
    assert_eq!(ball.radius(), 0.0);
    assert_eq!(ball.center(), &[2.0, 2.0]);
    assert_eq!(ball.support_size(), 1);
}

#[test]
fn duplicated_pair_behaves_like_pair() {
    let pts = vec![[0.0, 0.0], [2.0, 0.0], [0.0, 0.0], [2.0, 0.0], [2.0, 0.0]];
    let ball = Miniball::new(&pts);
    assert_abs_diff_eq!(ball.center()[0], 1.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.center()[1], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.radius(), 1.0, epsilon = TOL);
    assert!(ball.is_valid());
}

// =============================================================================
// SMALL SCENARIOS
// =============================================================================

#[test]
fn right_triangle_uses_hypotenuse_as_diameter() {
    let pts = vec![[0.0, 0.0], [4.0, 0.0], [0.0, 3.0]];
    let ball = Miniball::new(&pts);
    assert_abs_diff_eq!(ball.center()[0], 2.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.center()[1], 1.5, epsilon = TOL);
    assert_abs_diff_eq!(ball.radius(), 2.5, epsilon = TOL);

    // The right angle vertex lies on the circle as well (Thales).
    assert_abs_diff_eq!(distance(&pts[0], ball.center()), 2.5, epsilon = 1e-9);
    assert!(ball.is_valid());
}

#[test]
fn obtuse_triangle_has_two_support_points() {
    let pts = vec![[0.0, 0.0], [4.0, 0.0], [1.0, 1.0]];
    let ball = Miniball::new(&pts);
    assert_abs_diff_eq!(ball.center()[0], 2.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.center()[1], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.radius(), 2.0, epsilon = TOL);

    let mut support: Vec<usize> = ball.support().collect();
    support.sort();
    assert_eq!(support, vec![0, 1]);
    assert_eq!(ball.iterations(), 2);
}

#[test]
fn acute_triangle_uses_circumcircle() {
    // Equilateral triangle with circumradius 1 around the origin.
    let h = 3.0_f64.sqrt() / 2.0;
    let pts = vec![[1.0, 0.0], [-0.5, h], [-0.5, -h]];
    let ball = Miniball::new(&pts);
    assert_abs_diff_eq!(ball.center()[0], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.center()[1], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.radius(), 1.0, epsilon = TOL);
    assert_eq!(ball.support_size(), 3);
    assert!(ball.verify().min_convex_coefficient > 0.3);
}

#[test]
fn one_dimensional_interval() {
    let pts = vec![[3.0], [-1.0], [7.5], [2.0], [0.0]];
    let ball = Miniball::new(&pts);
    assert_abs_diff_eq!(ball.center()[0], 3.25, epsilon = TOL);
    assert_abs_diff_eq!(ball.radius(), 4.25, epsilon = TOL);
}

#[test]
fn collinear_points_in_space() {
    let pts = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(5.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
    ];
    let ball = Miniball::new(&pts);
    assert_abs_diff_eq!(ball.center()[0], 2.5, epsilon = TOL);
    assert_abs_diff_eq!(ball.center()[1], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.center()[2], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(ball.radius(), 2.5, epsilon = TOL);
}

#[test]
fn cocircular_square_corners() {
    let pts = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let ball = Miniball::new(&pts);
    assert_abs_diff_eq!(ball.center()[0], 0.5, epsilon = TOL);
    assert_abs_diff_eq!(ball.center()[1], 0.5, epsilon = TOL);
    assert_relative_eq!(ball.radius(), 0.5_f64.sqrt(), epsilon = TOL);
    assert!(ball.is_valid());
}

#[test]
fn unit_cube_corners() {
    let mut pts = Vec::new();
    for x in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for z in [0.0, 1.0] {
                pts.push(DVec3::new(x, y, z));
            }
        }
    }
    let ball = Miniball::new(&pts);
    for c in ball.center() {
        assert_abs_diff_eq!(*c, 0.5, epsilon = TOL);
    }
    assert_relative_eq!(ball.radius(), 3.0_f64.sqrt() / 2.0, epsilon = TOL);
    assert!(ball.is_valid());
}

#[test]
fn tesseract_corners() {
    let mut pts = Vec::new();
    for mask in 0..16u32 {
        let corner: [f64; 4] = std::array::from_fn(|k| f64::from((mask >> k) & 1));
        pts.push(corner);
    }
    let ball = Miniball::new(&pts);
    for c in ball.center() {
        assert_abs_diff_eq!(*c, 0.5, epsilon = TOL);
    }
    assert_abs_diff_eq!(ball.radius(), 1.0, epsilon = TOL);
    assert!(ball.support_size() <= 5);
    assert!(ball.is_valid());
}

#[test]
fn simplex_interior_point_is_ignored() {
    let pts = vec![
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.3, 0.3, 0.3],
    ];
    let ball = Miniball::new(&pts);
    assert!(ball.support().all(|i| i != 3));
    let third = 1.0 / 3.0;
    for c in ball.center() {
        assert_abs_diff_eq!(*c, third, epsilon = TOL);
    }
}

// =============================================================================
// ADAPTERS AND CONFIGURATION
// =============================================================================

#[test]
fn flat_buffer_matches_arrays() {
    let coords = [0.0, 0.0, 4.0, 0.0, 1.0, 1.0];
    let flat = FlatPointSet::new(&coords, 2).unwrap();
    let from_flat = Miniball::new(&flat);
    let arrays = vec![[0.0, 0.0], [4.0, 0.0], [1.0, 1.0]];
    let from_arrays = Miniball::new(&arrays);
    assert_eq!(from_flat.center(), from_arrays.center());
    assert_eq!(from_flat.radius(), from_arrays.radius());
    assert_eq!(from_flat.dimensions(), 2);
}

#[test]
fn slices_are_accepted() {
    let pts = [[1.0, 1.0], [3.0, 1.0]];
    let ball = Miniball::new(&pts[..]);
    assert_abs_diff_eq!(ball.radius(), 1.0, epsilon = TOL);
}

#[test]
fn custom_epsilon_is_used() {
    let cfg = MiniballConfig::new(1e-10, 1e-6).unwrap();
    let pts = vec![[0.0, 0.0], [4.0, 0.0], [1.0, 1.0]];
    let ball = Miniball::with_config(&pts, cfg);
    assert_eq!(ball.config(), &cfg);
    assert_abs_diff_eq!(ball.radius(), 2.0, epsilon = TOL);
}

// =============================================================================
// QUERIES
// =============================================================================

#[test]
fn contains_checks_radius_with_tolerance() {
    let pts = vec![[0.0, 0.0], [2.0, 0.0]];
    let ball = Miniball::new(&pts);
    assert!(ball.contains(&[1.0, 0.5], 0.0).unwrap());
    assert!(ball.contains(&[1.0, 1.0], 1e-9).unwrap());
    assert!(!ball.contains(&[1.0, 1.1], 1e-9).unwrap());
    assert!(ball.contains(&[1.0, 1.1], 0.2).unwrap());
}

#[test]
fn contains_rejects_wrong_dimension() {
    let pts = vec![[0.0, 0.0]];
    let ball = Miniball::new(&pts);
    assert_eq!(
        ball.contains(&[0.0, 0.0, 0.0], 0.0).unwrap_err(),
        MiniballError::DimensionMismatch {
            expected: 2,
            found: 3
        }
    );
}

#[test]
fn empty_ball_contains_nothing() {
    let pts: Vec<[f64; 2]> = Vec::new();
    let ball = Miniball::new(&pts);
    assert!(!ball.contains(&[0.0, 0.0], 1.0).unwrap());
}

#[test]
fn display_mentions_radius_and_support() {
    let pts = vec![[0.0], [2.0]];
    let ball = Miniball::new(&pts);
    let text = ball.to_string();
    assert!(text.contains("radius=1"));
    assert!(text.contains("support=2"));

    let empty: Vec<[f64; 2]> = Vec::new();
    assert_eq!(Miniball::new(&empty).to_string(), "Miniball(empty, dim=2)");
}

// =============================================================================
// INTERNALS
// =============================================================================

#[test]
fn stop_fraction_picks_first_blocking_point() {
    let pts = vec![[0.0, 0.0], [4.0, 0.0], [1.0, 1.0]];
    let mut ball = Miniball::new(&pts);

    // Rewind to the state right after initialization.
    let support = ball.init_ball().unwrap();
    assert_eq!(support.any_member(), 1);
    assert_eq!(ball.squared_radius(), 16.0);
    let mut state = WalkState::new(support, 2);

    ball.update_dist_to_aff(&mut state);
    assert_abs_diff_eq!(state.dist_to_aff, 4.0, epsilon = TOL);
    let (scale, stopper) = ball.find_stop_fraction(&state);
    assert_eq!(stopper, Some(0));
    assert_abs_diff_eq!(scale, 0.5, epsilon = TOL);

    ball.walk(scale, &state);
    assert_eq!(ball.center(), &[2.0, 0.0]);
    assert_abs_diff_eq!(ball.radius(), 2.0, epsilon = TOL);

    state.support.add(&pts, 0);
    ball.update_dist_to_aff(&mut state);
    assert!(!ball.successful_drop(&mut state));
    assert_eq!(state.support.size(), 2);
}

#[test]
fn drop_removes_negative_coefficient() {
    let pts = vec![[0.0, 0.0], [1.0, 0.0], [4.0, 0.0]];
    let mut ball = Miniball::new(&pts);
    let mut support = Subspan::new(&pts, 0);
    support.add(&pts, 1);
    ball.center = vec![3.0, 0.0];
    let mut state = WalkState::new(support, 2);

    // 3 = 3 * p1 - 2 * p0, so p0 has the negative coefficient.
    assert!(ball.successful_drop(&mut state));
    assert_eq!(state.support.members(), &[1]);
}

#[test]
fn finished_ball_keeps_no_walk_state() {
    let pts = vec![[0.0, 0.0], [4.0, 0.0], [1.0, 1.0]];
    let ball = Miniball::new(&pts);
    let text = format!("{ball:?}");
    assert!(text.contains("support"));
    for scratch in ["center_to_aff", "lambdas", "dist_to_aff"] {
        assert!(!text.contains(scratch), "{scratch} leaked into {text}");
    }
}
