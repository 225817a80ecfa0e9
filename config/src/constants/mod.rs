//! Centralized tolerance values shared by the minimum enclosing ball solver.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use thiserror::Error;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Relative tolerance of the enclosing ball iteration.
///
/// A walk distance to the affine hull of the support that is at most
/// `MINIBALL_EPSILON * radius` counts as zero, and the stop-fraction scan
/// skips points whose projected gap is below the same scaled bound.
///
/// # Examples
/// ```
/// use config::constants::MINIBALL_EPSILON;
/// assert!(MINIBALL_EPSILON < 1.0e-12);
/// ```
pub const MINIBALL_EPSILON: f64 = 1.0e-14;

/// Default tolerance applied by quality reports when judging a result.
///
/// Compared against the relative over/underlength of the ball and against
/// the most negative convex coefficient of the center.
///
/// # Examples
/// ```
/// use config::constants::{MINIBALL_EPSILON, QUALITY_TOLERANCE};
/// assert!(QUALITY_TOLERANCE > MINIBALL_EPSILON);
/// ```
pub const QUALITY_TOLERANCE: f64 = 1.0e-9;

// =============================================================================
// SOLVER CONFIGURATION
// =============================================================================

/// Immutable snapshot of solver settings that can be shared between crates.
///
/// # Examples
/// ```
/// use config::constants::SolverConfig;
/// let config = SolverConfig::default();
/// assert!(config.epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Relative tolerance of the iteration, scaled by the current radius.
    pub epsilon: f64,
    /// Tolerance used when a quality report is checked for validity.
    pub quality_tolerance: f64,
}

impl SolverConfig {
    /// Builds a configuration enforcing strict validation of both tolerances.
    ///
    /// # Examples
    /// ```
    /// use config::constants::SolverConfig;
    /// let cfg = SolverConfig::new(1.0e-12, 1.0e-6).expect("valid config");
    /// assert_eq!(cfg.quality_tolerance, 1.0e-6);
    /// ```
    pub fn new(epsilon: f64, quality_tolerance: f64) -> Result<Self, ConfigError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }
        if !quality_tolerance.is_finite() || quality_tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(quality_tolerance));
        }
        Ok(Self {
            epsilon,
            quality_tolerance,
        })
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: MINIBALL_EPSILON,
            quality_tolerance: QUALITY_TOLERANCE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Raised when the solver epsilon is zero, negative or not finite.
    #[error("epsilon must be positive and finite: {0}")]
    InvalidEpsilon(f64),
    /// Raised when the quality tolerance is zero, negative or not finite.
    #[error("quality tolerance must be positive and finite: {0}")]
    InvalidTolerance(f64),
}
