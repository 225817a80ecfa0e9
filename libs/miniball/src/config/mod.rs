//! Solver configuration building on the shared `config` crate.
//!
//! The module keeps the kernel decoupled from literal tolerances.

use config::constants::{SolverConfig, MINIBALL_EPSILON, QUALITY_TOLERANCE};

use crate::error::MiniballResult;

/// Tolerances driving one enclosing ball computation.
///
/// # Examples
/// ```
/// use miniball::MiniballConfig;
/// let cfg = MiniballConfig::default();
/// assert!(cfg.epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiniballConfig {
    /// Relative tolerance of the walk, scaled by the current radius.
    pub epsilon: f64,
    /// Tolerance used by [`crate::Quality::is_valid`] via [`crate::Miniball::is_valid`].
    pub quality_tolerance: f64,
}

impl MiniballConfig {
    /// Creates a new configuration from explicit values.
    ///
    /// # Examples
    /// ```
    /// use miniball::MiniballConfig;
    /// let cfg = MiniballConfig::new(1.0e-12, 1.0e-6).unwrap();
    /// assert_eq!(cfg.epsilon, 1.0e-12);
    /// assert!(MiniballConfig::new(-1.0, 1.0e-6).is_err());
    /// ```
    pub fn new(epsilon: f64, quality_tolerance: f64) -> MiniballResult<Self> {
        let cfg = SolverConfig::new(epsilon, quality_tolerance)?;
        Ok(cfg.into())
    }
}

impl From<SolverConfig> for MiniballConfig {
    fn from(cfg: SolverConfig) -> Self {
        Self {
            epsilon: cfg.epsilon,
            quality_tolerance: cfg.quality_tolerance,
        }
    }
}

impl Default for MiniballConfig {
    fn default() -> Self {
        Self {
            epsilon: MINIBALL_EPSILON,
            quality_tolerance: QUALITY_TOLERANCE,
        }
    }
}
