//! # Config Crate
//!
//! Centralized numeric tolerances for the minimum enclosing ball solver.
//! All magic numbers used by the kernel are defined here so the algorithm
//! and its diagnostics agree on a single source of truth.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{SolverConfig, MINIBALL_EPSILON};
//!
//! let cfg = SolverConfig::default();
//! assert_eq!(cfg.epsilon, MINIBALL_EPSILON);
//!
//! // Walk distances below `epsilon * radius` are treated as zero.
//! let radius = 2.5;
//! let dist_to_aff: f64 = 1e-15;
//! assert!(dist_to_aff <= cfg.epsilon * radius);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All tolerances defined once, used everywhere
//! - **Relative Scale**: Solver thresholds scale with the current radius
//! - **Validated**: Custom configurations are checked on construction

pub mod constants;
