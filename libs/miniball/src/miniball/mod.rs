//! # Miniball
//!
//! Minimum enclosing ball of a point set, computed by walking the center
//! toward the affine hull of a support set that is grown and shrunk one
//! point at a time.
//!
//! ## Algorithm Overview
//!
//! 1. Start with the first point as center and the farthest point from it
//!    as the only support point
//! 2. Walk the center toward the affine hull of the support; stop early if
//!    some other point would leave the ball and add that point
//! 3. Once the center reaches the affine hull, drop the support point with
//!    the most negative affine coefficient
//! 4. Stop when the center is a strict convex combination of the support
//!
//! Every iteration keeps all points inside the ball and the support on its
//! boundary.

use std::fmt;

use tracing::{debug, trace};

use crate::config::MiniballConfig;
use crate::error::{MiniballError, MiniballResult};
use crate::point_set::PointSet;
use crate::quality::Quality;
use crate::subspan::Subspan;

/// Smallest enclosing ball of a borrowed point set.
///
/// The computation runs to completion inside the constructor; afterwards the
/// ball is immutable.
///
/// # Example
///
/// ```rust
/// use miniball::Miniball;
///
/// let pts = vec![[0.0, 0.0], [4.0, 0.0], [0.0, 3.0]];
/// let ball = Miniball::new(&pts);
/// assert!((ball.radius() - 2.5).abs() < 1e-12);
/// assert!((ball.center()[0] - 2.0).abs() < 1e-12);
/// assert!((ball.center()[1] - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Miniball<'a, P: PointSet + ?Sized> {
    points: &'a P,
    config: MiniballConfig,
    dim: usize,
    size: usize,
    center: Vec<f64>,
    squared_radius: f64,
    radius: f64,
    iterations: usize,
    support: Option<Subspan>,
}

/// Working state of a single computation; dropped once the ball converges.
#[derive(Debug)]
struct WalkState {
    support: Subspan,
    center_to_aff: Vec<f64>,
    lambdas: Vec<f64>,
    dist_to_aff: f64,
    dist_to_aff_square: f64,
}

impl WalkState {
    fn new(support: Subspan, dim: usize) -> Self {
        Self {
            support,
            center_to_aff: vec![0.0; dim],
            lambdas: vec![0.0; dim + 1],
            dist_to_aff: 0.0,
            dist_to_aff_square: 0.0,
        }
    }
}

impl<'a, P: PointSet + ?Sized> Miniball<'a, P> {
    /// Computes the enclosing ball with default tolerances.
    pub fn new(points: &'a P) -> Self {
        Self::with_config(points, MiniballConfig::default())
    }

    /// Computes the enclosing ball with explicit tolerances.
    ///
    /// # Example
    ///
    /// ```rust
    /// use miniball::{Miniball, MiniballConfig};
    ///
    /// let cfg = MiniballConfig::new(1e-12, 1e-6).unwrap();
    /// let pts = vec![[1.0], [3.0]];
    /// let ball = Miniball::with_config(&pts, cfg);
    /// assert_eq!(ball.center(), &[2.0]);
    /// ```
    pub fn with_config(points: &'a P, config: MiniballConfig) -> Self {
        let dim = points.dimensions();
        let mut ball = Self {
            points,
            config,
            dim,
            size: points.size(),
            center: vec![0.0; dim],
            squared_radius: 0.0,
            radius: 0.0,
            iterations: 0,
            support: None,
        };
        ball.compute();
        ball
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Whether the input point set was empty.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Center of the ball; all zeros for an empty input.
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Radius of the ball.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Squared radius of the ball.
    pub fn squared_radius(&self) -> f64 {
        self.squared_radius
    }

    /// Number of input points.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Dimension of the input points.
    pub fn dimensions(&self) -> usize {
        self.dim
    }

    /// Number of main loop iterations the computation took.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Tolerances used for this computation.
    pub fn config(&self) -> &MiniballConfig {
        &self.config
    }

    /// Number of points in the final support set.
    pub fn support_size(&self) -> usize {
        self.support.as_ref().map_or(0, Subspan::size)
    }

    /// Global indices of the points on the boundary that determine the ball.
    ///
    /// # Example
    ///
    /// ```rust
    /// use miniball::Miniball;
    ///
    /// let pts = vec![[0.0, 0.0], [4.0, 0.0], [1.0, 1.0]];
    /// let ball = Miniball::new(&pts);
    /// let mut support: Vec<usize> = ball.support().collect();
    /// support.sort();
    /// assert_eq!(support, vec![0, 1]);
    /// ```
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        self.support
            .iter()
            .flat_map(|span| span.members().iter().copied())
    }

    /// Whether `point` lies within `radius + tolerance` of the center.
    ///
    /// An empty ball contains nothing.
    pub fn contains(&self, point: &[f64], tolerance: f64) -> MiniballResult<bool> {
        if point.len() != self.dim {
            return Err(MiniballError::DimensionMismatch {
                expected: self.dim,
                found: point.len(),
            });
        }
        if self.is_empty() {
            return Ok(false);
        }
        let dist_sq: f64 = point
            .iter()
            .zip(&self.center)
            .map(|(p, c)| (p - c) * (p - c))
            .sum();
        Ok(dist_sq.sqrt() <= self.radius + tolerance)
    }

    /// Recomputes the correctness invariants from scratch.
    pub fn verify(&self) -> Quality {
        match &self.support {
            Some(support) => Quality::measure(
                self.points,
                support,
                &self.center,
                self.radius,
                self.iterations,
            ),
            None => Quality::default(),
        }
    }

    /// Whether [`Self::verify`] passes with the configured tolerance.
    pub fn is_valid(&self) -> bool {
        self.verify().is_valid(self.config.quality_tolerance)
    }

    // =========================================================================
    // ALGORITHM
    // =========================================================================

    fn compute(&mut self) {
        let Some(support) = self.init_ball() else {
            return;
        };
        let mut state = WalkState::new(support, self.dim);
        self.iterate(&mut state);

        debug!(
            points = self.size,
            dim = self.dim,
            iterations = self.iterations,
            support = state.support.size(),
            radius = self.radius,
            "enclosing ball converged"
        );
        self.support = Some(state.support);
    }

    /// Centers the ball at the first point and puts the farthest point from
    /// it into the support.
    fn init_ball(&mut self) -> Option<Subspan> {
        if self.is_empty() {
            return None;
        }

        for (j, c) in self.center.iter_mut().enumerate() {
            *c = self.points.coord(0, j);
        }

        let mut farthest = 0;
        self.squared_radius = 0.0;
        for i in 1..self.size {
            let dist = self.squared_distance_to_center(i);
            if dist >= self.squared_radius {
                self.squared_radius = dist;
                farthest = i;
            }
        }
        self.radius = self.squared_radius.sqrt();

        Some(Subspan::new(self.points, farthest))
    }

    fn iterate(&mut self, state: &mut WalkState) {
        let eps = self.config.epsilon;
        loop {
            self.iterations += 1;
            self.update_dist_to_aff(state);

            // A full simplex leaves no direction to walk in, so a drop is
            // required even if the center is still away from the hull.
            while state.dist_to_aff <= eps * self.radius || state.support.size() == self.dim + 1 {
                if !self.successful_drop(state) {
                    return;
                }
                self.update_dist_to_aff(state);
            }

            let (scale, stopper) = self.find_stop_fraction(state);
            match stopper {
                Some(stopper) => {
                    debug_assert!(state.support.size() <= self.dim);
                    self.walk(scale, state);
                    trace!(stopper, scale, radius = self.radius, "adding stopper to support");
                    state.support.add(self.points, stopper);
                }
                None => {
                    self.walk(1.0, state);
                    if !self.successful_drop(state) {
                        return;
                    }
                }
            }
        }
    }

    fn update_dist_to_aff(&self, state: &mut WalkState) {
        state.dist_to_aff_square = state.support.shortest_vector_to_span(
            self.points,
            &self.center,
            &mut state.center_to_aff,
        );
        state.dist_to_aff = state.dist_to_aff_square.sqrt();
    }

    /// Moves the center by `scale * center_to_aff` and refreshes the radius.
    fn walk(&mut self, scale: f64, state: &WalkState) {
        for (c, step) in self.center.iter_mut().zip(&state.center_to_aff) {
            *c += scale * step;
        }
        self.squared_radius = self.squared_distance_to_center(state.support.any_member());
        self.radius = self.squared_radius.sqrt();
    }

    /// Drops the support point with the smallest non-positive affine
    /// coefficient. Returns `false` when all coefficients are positive, in
    /// which case the ball is optimal.
    fn successful_drop(&self, state: &mut WalkState) -> bool {
        let support = &mut state.support;
        support.find_affine_coefficients(self.points, &self.center, &mut state.lambdas);

        let mut smallest = 0;
        let mut minimum = 1.0;
        for (i, &lambda) in state.lambdas[..support.size()].iter().enumerate() {
            if lambda < minimum {
                minimum = lambda;
                smallest = i;
            }
        }

        if minimum <= 0.0 {
            trace!(
                point = support.global_index(smallest),
                lambda = minimum,
                "dropping point from support"
            );
            support.remove(self.points, smallest);
            true
        } else {
            false
        }
    }

    /// Fraction of `center_to_aff` the center can move before a non-support
    /// point reaches the boundary, and that point.
    fn find_stop_fraction(&self, state: &WalkState) -> (f64, Option<usize>) {
        let bound_eps = self.config.epsilon * self.radius * state.dist_to_aff;
        let mut scale = 1.0;
        let mut stopper = None;

        for j in 0..self.size {
            if state.support.is_member(j) {
                continue;
            }

            let mut dir_point_prod = 0.0;
            let mut point_sq = 0.0;
            for (i, (c, step)) in self.center.iter().zip(&state.center_to_aff).enumerate() {
                let d = self.points.coord(j, i) - c;
                dir_point_prod += step * d;
                point_sq += d * d;
            }

            // Points behind the walking direction stay enclosed.
            let gap = state.dist_to_aff_square - dir_point_prod;
            if gap < bound_eps {
                continue;
            }

            // A point already on the boundary blocks the walk entirely.
            let bound = (0.5 * (self.squared_radius - point_sq) / gap).max(0.0);
            if bound < scale {
                scale = bound;
                stopper = Some(j);
            }
        }

        (scale, stopper)
    }

    fn squared_distance_to_center(&self, index: usize) -> f64 {
        self.center
            .iter()
            .enumerate()
            .map(|(j, c)| {
                let d = self.points.coord(index, j) - c;
                d * d
            })
            .sum()
    }
}

impl<P: PointSet + ?Sized> fmt::Display for Miniball<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Miniball(empty, dim={})", self.dim);
        }
        write!(
            f,
            "Miniball(center={:?}, radius={}, support={})",
            self.center,
            self.radius,
            self.support_size()
        )
    }
}

#[cfg(test)]
mod tests;
