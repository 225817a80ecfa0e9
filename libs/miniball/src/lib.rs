//! # Miniball
//!
//! Smallest enclosing ball of a finite point set in fixed low dimension.
//!
//! ## Architecture
//!
//! ```text
//! PointSet (read-only coordinates)
//!       ↓
//! Subspan (support set + incremental QR of its affine hull)
//!       ↓
//! Miniball (walk the center, add stoppers, drop redundant support)
//!       ↓
//! Quality (independent audit of the converged ball)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use miniball::Miniball;
//!
//! let pts = vec![[0.0, 0.0], [4.0, 0.0], [0.0, 3.0]];
//! let ball = Miniball::new(&pts);
//!
//! assert!((ball.radius() - 2.5).abs() < 1e-12);
//! assert!(ball.verify().is_valid(1e-9));
//! ```
//!
//! The computation is single-threaded and runs to completion in the
//! constructor. Empty input is not an error; it yields an empty ball.

pub mod config;
pub mod error;
pub mod miniball;
pub mod point_set;
pub mod quality;
pub mod subspan;

pub use self::config::MiniballConfig;
pub use error::{MiniballError, MiniballResult};
pub use miniball::Miniball;
pub use point_set::{validate_point_set, FlatPointSet, PointSet};
pub use quality::Quality;
pub use subspan::Subspan;
