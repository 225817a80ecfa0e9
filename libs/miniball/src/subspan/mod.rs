//! # Subspan
//!
//! Affine hull of the current support set together with a QR factorization
//! of the direction vectors from a distinguished origin member to all other
//! members.
//!
//! ## Representation
//!
//! With support members `m_0 .. m_r` where `m_r` is the origin, the matrix
//! `A = [m_0 - m_r, .., m_{r-1} - m_r]` (one column per non-origin member) is
//! kept as `A = Q R` with `Q` orthonormal and `R` upper triangular. The first
//! `r` columns of `Q` span the directions of the affine hull.
//!
//! Both matrices are stored column-wise as `d x d` buffers allocated once, so
//! adding or dropping a member is an `O(d^2)` Givens update and never
//! reallocates.

use bitvec::prelude::*;

use crate::point_set::PointSet;

/// Affine subspan of a growing and shrinking support set.
///
/// Members are addressed two ways: by their global index into the point set
/// and by their local position `0..=r` in the support, where position `r`
/// is the origin.
///
/// # Examples
/// ```
/// use miniball::Subspan;
/// let pts = vec![[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]];
/// let mut span = Subspan::new(&pts, 0);
/// span.add(&pts, 1);
/// span.add(&pts, 2);
/// assert_eq!(span.size(), 3);
///
/// let mut lambdas = [0.0; 3];
/// span.find_affine_coefficients(&pts, &[0.5, 0.5], &mut lambdas);
/// let sum: f64 = lambdas.iter().sum();
/// assert!((sum - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Subspan {
    dim: usize,
    membership: BitVec<u64, Lsb0>,
    members: Vec<usize>,
    q: Vec<Vec<f64>>,
    r: Vec<Vec<f64>>,
    u: Vec<f64>,
    w: Vec<f64>,
    rank: usize,
}

impl Subspan {
    /// Creates a zero-dimensional subspan holding the single point `index`.
    pub fn new<P: PointSet + ?Sized>(points: &P, index: usize) -> Self {
        let dim = points.dimensions();
        assert!(index < points.size(), "point {index} out of range");

        let mut membership = bitvec![u64, Lsb0; 0; points.size()];
        membership.set(index, true);

        let mut members = vec![0; dim + 1];
        members[0] = index;

        let q = (0..dim)
            .map(|j| (0..dim).map(|i| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();

        Self {
            dim,
            membership,
            members,
            q,
            r: vec![vec![0.0; dim]; dim],
            u: vec![0.0; dim],
            w: vec![0.0; dim],
            rank: 0,
        }
    }

    /// Number of support members, `r + 1`.
    pub fn size(&self) -> usize {
        self.rank + 1
    }

    /// Dimension `r` of the affine hull.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether the point with global index `index` is a support member.
    pub fn is_member(&self, index: usize) -> bool {
        self.membership[index]
    }

    /// Global index of the member at local position `local`.
    pub fn global_index(&self, local: usize) -> usize {
        assert!(local <= self.rank, "local index {local} out of range");
        self.members[local]
    }

    /// Global index of some member; always the origin.
    pub fn any_member(&self) -> usize {
        self.origin()
    }

    /// Global indices of all members, origin last.
    pub fn members(&self) -> &[usize] {
        &self.members[..=self.rank]
    }

    fn origin(&self) -> usize {
        self.members[self.rank]
    }

    // =========================================================================
    // UPDATES
    // =========================================================================

    /// Adds point `index` to the support at local position `r`; the origin
    /// keeps its point and moves up to position `r + 1`.
    ///
    /// # Panics
    ///
    /// If the point already is a member or the support already spans all
    /// `d` dimensions.
    pub fn add<P: PointSet + ?Sized>(&mut self, points: &P, index: usize) {
        assert!(!self.is_member(index), "point {index} is already a member");
        assert!(
            self.rank < self.dim,
            "support already has {} members",
            self.dim + 1
        );

        let origin = self.origin();
        for (i, u) in self.u.iter_mut().enumerate() {
            *u = points.coord(index, i) - points.coord(origin, i);
        }
        self.append_column();

        self.membership.set(index, true);
        self.members[self.rank + 1] = self.members[self.rank];
        self.members[self.rank] = index;
        self.rank += 1;
    }

    /// Removes the member at local position `local`.
    ///
    /// Dropping the origin promotes member `r - 1` to origin and rewrites all
    /// directions relative to it; dropping any other member deletes its
    /// column of `R` and restores the triangular shape.
    ///
    /// # Panics
    ///
    /// If `local > r` or the subspan holds a single member.
    pub fn remove<P: PointSet + ?Sized>(&mut self, points: &P, local: usize) {
        assert!(local <= self.rank, "local index {local} out of range");
        assert!(self.rank > 0, "cannot remove the last support member");

        self.membership.set(self.members[local], false);

        if local == self.rank {
            let origin = self.origin();
            let next = self.members[self.rank - 1];
            for (i, u) in self.u.iter_mut().enumerate() {
                *u = points.coord(origin, i) - points.coord(next, i);
            }
            self.rank -= 1;
            self.special_rank_1_update();
        } else {
            self.r[local..self.rank].rotate_left(1);
            self.members.copy_within(local + 1..=self.rank, local);
            self.rank -= 1;
            self.hessenberg_clear(local);
        }
    }

    /// Appends `Q^T u` as column `r` of `R` and rotates it back to
    /// triangular shape.
    fn append_column(&mut self) {
        let col = self.rank;
        for i in 0..self.dim {
            self.r[col][i] = dot(&self.q[i], &self.u);
        }

        for j in (col + 1..self.dim).rev() {
            let (c, s) = givens(self.r[col][j - 1], self.r[col][j]);
            self.r[col][j - 1] = c * self.r[col][j - 1] + s * self.r[col][j];
            self.r[col][j] = 0.0;
            rotate_columns(&mut self.q, j - 1, c, s);
        }
    }

    /// Clears the subdiagonal of columns `start..r`, which are assumed to be
    /// in upper Hessenberg form.
    fn hessenberg_clear(&mut self, start: usize) {
        for pos in start..self.rank {
            let (c, s) = givens(self.r[pos][pos], self.r[pos][pos + 1]);
            self.r[pos][pos] = c * self.r[pos][pos] + s * self.r[pos][pos + 1];
            self.r[pos][pos + 1] = 0.0;
            for col in &mut self.r[pos + 1..self.rank] {
                rotate_entries(col, pos, c, s);
            }
            rotate_columns(&mut self.q, pos, c, s);
        }
    }

    /// Updates `Q R` to `Q R + u 1^T` after the origin moved by `-u`.
    fn special_rank_1_update(&mut self) {
        for i in 0..self.dim {
            self.w[i] = dot(&self.q[i], &self.u);
        }

        // Rotate w onto the first unit vector, recording the rotations in
        // R (which becomes upper Hessenberg) and Q.
        for k in (1..self.dim).rev() {
            let (c, s) = givens(self.w[k - 1], self.w[k]);
            self.w[k - 1] = c * self.w[k - 1] + s * self.w[k];

            // Column k - 1 has an implicit zero at row k.
            self.r[k - 1][k] = -s * self.r[k - 1][k - 1];
            self.r[k - 1][k - 1] *= c;
            for col in self.r.iter_mut().take(self.rank).skip(k) {
                rotate_entries(col, k - 1, c, s);
            }
            rotate_columns(&mut self.q, k - 1, c, s);
        }

        if self.dim > 0 {
            let w0 = self.w[0];
            for col in &mut self.r[..self.rank] {
                col[0] += w0;
            }
        }

        self.hessenberg_clear(0);
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Writes the shortest vector from `p` to the affine hull into `out` and
    /// returns its squared length.
    pub fn shortest_vector_to_span<P: PointSet + ?Sized>(
        &self,
        points: &P,
        p: &[f64],
        out: &mut [f64],
    ) -> f64 {
        let origin = self.origin();
        for (i, w) in out.iter_mut().enumerate().take(self.dim) {
            *w = points.coord(origin, i) - p[i];
        }

        for col in &self.q[..self.rank] {
            let scale = dot(&*out, col);
            for (w, qi) in out.iter_mut().zip(col) {
                *w -= scale * qi;
            }
        }

        dot(&*out, &*out)
    }

    /// Computes the affine coefficients of `p` with respect to the members,
    /// indexed by local position (`lambdas[r]` belongs to the origin).
    ///
    /// `p` is assumed to lie in the affine hull; otherwise the coefficients
    /// describe its orthogonal projection onto it.
    pub fn find_affine_coefficients<P: PointSet + ?Sized>(
        &self,
        points: &P,
        p: &[f64],
        lambdas: &mut [f64],
    ) {
        let origin = self.origin();

        // Back substitution through R on Q^T (p - origin); the origin takes
        // the remainder so that all coefficients sum to one.
        let mut origin_lambda = 1.0;
        for j in (0..self.rank).rev() {
            let mut w = self.q[j]
                .iter()
                .enumerate()
                .map(|(i, q)| q * (p[i] - points.coord(origin, i)))
                .sum::<f64>();
            for k in j + 1..self.rank {
                w -= lambdas[k] * self.r[k][j];
            }
            lambdas[j] = w / self.r[j][j];
            origin_lambda -= lambdas[j];
        }
        lambdas[self.rank] = origin_lambda;
    }

    /// Largest deviation from the one-hot pattern when each member is
    /// decomposed in terms of all members. Close to zero for a healthy
    /// factorization.
    pub fn representation_error<P: PointSet + ?Sized>(&self, points: &P) -> f64 {
        let size = self.size();
        let mut lambdas = vec![0.0; size];
        let mut max = 0.0_f64;

        for j in 0..size {
            let point = points.point(self.members[j]);
            self.find_affine_coefficients(points, &point, &mut lambdas);
            for (i, lambda) in lambdas.iter().enumerate() {
                let ideal = if i == j { 1.0 } else { 0.0 };
                max = max.max((lambda - ideal).abs());
            }
        }

        max
    }
}

// =============================================================================
// HELPERS
// =============================================================================

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Givens coefficients `(c, s)` with `c * a + s * b = hypot(a, b)` and
/// `c * b - s * a = 0`.
fn givens(a: f64, b: f64) -> (f64, f64) {
    if b == 0.0 {
        (1.0, 0.0)
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = 1.0 / (1.0 + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = 1.0 / (1.0 + t * t).sqrt();
        (c, c * t)
    }
}

/// Rotates entries `lo` and `lo + 1` of one column.
fn rotate_entries(col: &mut [f64], lo: usize, c: f64, s: f64) {
    let (a, b) = (col[lo], col[lo + 1]);
    col[lo] = c * a + s * b;
    col[lo + 1] = c * b - s * a;
}

/// Rotates columns `lo` and `lo + 1` of a column-stored matrix.
fn rotate_columns(cols: &mut [Vec<f64>], lo: usize, c: f64, s: f64) {
    let (left, right) = cols.split_at_mut(lo + 1);
    for (a, b) in left[lo].iter_mut().zip(right[0].iter_mut()) {
        let (x, y) = (*a, *b);
        *a = c * x + s * y;
        *b = c * y - s * x;
    }
}
