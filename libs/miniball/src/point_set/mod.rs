//! # Point Sets
//!
//! Read-only views over `n` points with `d` coordinates each. The solver only
//! needs indexed coordinate access, so any storage layout can be adapted by
//! implementing [`PointSet`].
//!
//! ## Adapters
//!
//! - `[[f64; D]]` and `Vec<[f64; D]>` for fixed-dimension arrays
//! - `[DVec2]`, `[DVec3]`, `[DVec4]` for `glam` vectors
//! - [`FlatPointSet`] for an interleaved `f64` buffer with explicit dimension

use glam::{DVec2, DVec3, DVec4};

use crate::error::{MiniballError, MiniballResult};

/// Indexed, immutable access to a finite set of points.
///
/// Out-of-range indices are a programming error; implementations panic on
/// them just like slice indexing does.
///
/// # Examples
/// ```
/// use miniball::PointSet;
/// let pts = vec![[0.0, 1.0], [2.0, 3.0]];
/// assert_eq!(pts.size(), 2);
/// assert_eq!(pts.dimensions(), 2);
/// assert_eq!(pts.coord(1, 0), 2.0);
/// ```
pub trait PointSet {
    /// Number of points `n`.
    fn size(&self) -> usize;

    /// Number of coordinates per point `d`.
    fn dimensions(&self) -> usize;

    /// Coordinate `j` of point `i`.
    fn coord(&self, i: usize, j: usize) -> f64;

    /// Copies all coordinates of point `i`.
    fn point(&self, i: usize) -> Vec<f64> {
        (0..self.dimensions()).map(|j| self.coord(i, j)).collect()
    }
}

impl<P: PointSet + ?Sized> PointSet for &P {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn coord(&self, i: usize, j: usize) -> f64 {
        (**self).coord(i, j)
    }
}

impl<T> PointSet for Vec<T>
where
    [T]: PointSet,
{
    fn size(&self) -> usize {
        self.as_slice().size()
    }

    fn dimensions(&self) -> usize {
        self.as_slice().dimensions()
    }

    fn coord(&self, i: usize, j: usize) -> f64 {
        self.as_slice().coord(i, j)
    }
}

impl<const D: usize> PointSet for [[f64; D]] {
    fn size(&self) -> usize {
        self.len()
    }

    fn dimensions(&self) -> usize {
        D
    }

    fn coord(&self, i: usize, j: usize) -> f64 {
        self[i][j]
    }
}

macro_rules! impl_glam_point_set {
    ($vec:ty, $dim:expr) => {
        impl PointSet for [$vec] {
            fn size(&self) -> usize {
                self.len()
            }

            fn dimensions(&self) -> usize {
                $dim
            }

            fn coord(&self, i: usize, j: usize) -> f64 {
                self[i][j]
            }
        }
    };
}

impl_glam_point_set!(DVec2, 2);
impl_glam_point_set!(DVec3, 3);
impl_glam_point_set!(DVec4, 4);

// =============================================================================
// FLAT BUFFER
// =============================================================================

/// Point set over an interleaved coordinate buffer
/// `[x0, y0, .., x1, y1, ..]` with an explicit dimension.
///
/// # Examples
/// ```
/// use miniball::{FlatPointSet, PointSet};
/// let coords = [0.0, 0.0, 0.0, 4.0, 0.0, 0.0];
/// let pts = FlatPointSet::new(&coords, 3).unwrap();
/// assert_eq!(pts.size(), 2);
/// assert_eq!(pts.coord(1, 0), 4.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FlatPointSet<'a> {
    coords: &'a [f64],
    dim: usize,
    count: usize,
}

impl<'a> FlatPointSet<'a> {
    /// Wraps a buffer holding a whole number of `dim`-dimensional points.
    pub fn new(coords: &'a [f64], dim: usize) -> MiniballResult<Self> {
        if dim == 0 {
            return Err(MiniballError::ZeroDimension);
        }
        if coords.len() % dim != 0 {
            return Err(MiniballError::RaggedBuffer {
                len: coords.len(),
                dim,
            });
        }
        Ok(Self {
            coords,
            dim,
            count: coords.len() / dim,
        })
    }

    /// Wraps the first `count` points of a buffer; trailing data is ignored.
    ///
    /// # Examples
    /// ```
    /// use miniball::{FlatPointSet, PointSet};
    /// let coords = [1.0, 2.0, 3.0, 4.0, 5.0];
    /// let pts = FlatPointSet::with_count(&coords, 2, 2).unwrap();
    /// assert_eq!(pts.size(), 2);
    /// assert!(FlatPointSet::with_count(&coords, 2, 3).is_err());
    /// ```
    pub fn with_count(coords: &'a [f64], dim: usize, count: usize) -> MiniballResult<Self> {
        if dim == 0 {
            return Err(MiniballError::ZeroDimension);
        }
        let available = coords.len() / dim;
        if count > available {
            return Err(MiniballError::NotEnoughPoints {
                available,
                requested: count,
            });
        }
        Ok(Self {
            coords: &coords[..count * dim],
            dim,
            count,
        })
    }
}

impl PointSet for FlatPointSet<'_> {
    fn size(&self) -> usize {
        self.count
    }

    fn dimensions(&self) -> usize {
        self.dim
    }

    fn coord(&self, i: usize, j: usize) -> f64 {
        assert!(j < self.dim, "axis {j} out of range for dimension {}", self.dim);
        self.coords[i * self.dim + j]
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Rejects point sets containing NaN or infinite coordinates.
///
/// The solver itself does not check its input; callers feeding untrusted
/// geometry should run this first.
///
/// # Examples
/// ```
/// use miniball::validate_point_set;
/// assert!(validate_point_set(&vec![[0.0, 1.0]]).is_ok());
/// assert!(validate_point_set(&vec![[0.0, f64::NAN]]).is_err());
/// ```
pub fn validate_point_set<P: PointSet + ?Sized>(points: &P) -> MiniballResult<()> {
    for point in 0..points.size() {
        for axis in 0..points.dimensions() {
            if !points.coord(point, axis).is_finite() {
                return Err(MiniballError::NonFiniteCoordinate { point, axis });
            }
        }
    }
    Ok(())
}
