//! # Quality Report
//!
//! Independent audit of a converged enclosing ball. Every figure is derived
//! from scratch out of the input points, the final center and the final
//! support, so the report can serve as a test oracle for the solver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::point_set::PointSet;
use crate::subspan::{dot, Subspan};

/// Diagnostic figures describing how well a ball satisfies its invariants.
///
/// All figures are ideally zero except `min_convex_coefficient`, which is
/// positive for a center strictly inside the convex hull of its support.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quality {
    /// Largest deviation from the one-hot pattern when the support points are
    /// decomposed in terms of the support.
    pub qr_inconsistency: f64,
    /// Smallest affine coefficient of the center with respect to the support.
    pub min_convex_coefficient: f64,
    /// Largest `(distance - radius) / radius` over all input points; the
    /// plain length `distance - radius` for a ball of radius zero.
    pub max_overlength: f64,
    /// Largest `(radius - distance) / radius` over the support points; the
    /// plain length for a ball of radius zero.
    pub max_underlength: f64,
    /// Main loop iterations of the computation.
    pub iterations: usize,
    /// Number of support points.
    pub support_size: usize,
}

impl Quality {
    pub(crate) fn measure<P: PointSet + ?Sized>(
        points: &P,
        support: &Subspan,
        center: &[f64],
        radius: f64,
        iterations: usize,
    ) -> Self {
        let support_size = support.size();

        let mut lambdas = vec![0.0; support_size];
        support.find_affine_coefficients(points, center, &mut lambdas);
        let min_convex_coefficient = lambdas.iter().copied().fold(1.0, f64::min);

        let mut center_to_point = vec![0.0; center.len()];
        let mut distance = |index: usize| {
            for (i, (d, c)) in center_to_point.iter_mut().zip(center).enumerate() {
                *d = points.coord(index, i) - c;
            }
            dot(&center_to_point, &center_to_point).sqrt()
        };

        let mut max_overlength = 0.0_f64;
        for k in 0..points.size() {
            max_overlength = max_overlength.max(distance(k) - radius);
        }

        let mut max_underlength = 0.0_f64;
        for &member in support.members() {
            max_underlength = max_underlength.max(radius - distance(member));
        }

        // A degenerate ball of radius zero reports absolute lengths.
        let scale = if radius > 0.0 { radius } else { 1.0 };

        Self {
            qr_inconsistency: support.representation_error(points),
            min_convex_coefficient,
            max_overlength: max_overlength / scale,
            max_underlength: max_underlength / scale,
            iterations,
            support_size,
        }
    }

    /// Whether containment, boundary, convexity and factorization checks all
    /// pass within `tolerance`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use miniball::Miniball;
    ///
    /// let pts = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
    /// let ball = Miniball::new(&pts);
    /// assert!(ball.verify().is_valid(1e-9));
    /// ```
    pub fn is_valid(&self, tolerance: f64) -> bool {
        self.qr_inconsistency <= tolerance
            && self.min_convex_coefficient >= -tolerance
            && self.max_overlength <= tolerance
            && self.max_underlength <= tolerance
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "qr inconsistency:       {:e}", self.qr_inconsistency)?;
        writeln!(f, "min convex coefficient: {:e}", self.min_convex_coefficient)?;
        writeln!(f, "max overlength:         {:e}", self.max_overlength)?;
        writeln!(f, "max underlength:        {:e}", self.max_underlength)?;
        writeln!(f, "iterations:             {}", self.iterations)?;
        write!(f, "support size:           {}", self.support_size)
    }
}
