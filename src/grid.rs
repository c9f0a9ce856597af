//! Sampling of a charge system over a rectangular mesh.
//!
//! Every cell is evaluated on its own, so the cells of a [`Grid`] may be
//! visited in any order.

use tracing::debug;

use crate::errors::{ChargeFieldError, Result};
use crate::fields::Charge;
use crate::math::{linspace, R2, Scalar};

/// Percentiles used for contour levels, from the 1st to the 99th.
pub const CONTOUR_PERCENTILES: [Scalar; 13] = [
    0.01, 0.05, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.95, 0.99,
];

/// Axis-aligned view rectangle in meters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Lower-left corner.
    pub min: R2,
    /// Upper-right corner.
    pub max: R2,
}

impl View {
    /// Creates a view; the corners must be finite and strictly ordered.
    pub fn new(min: R2, max: R2) -> Result<Self> {
        let finite = [min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite());
        if !finite || min.x >= max.x || min.y >= max.y {
            return Err(ChargeFieldError::invalid(format!(
                "view ({}, {}) - ({}, {}) must be finite with min < max",
                min.x, min.y, max.x, max.y
            )));
        }
        Ok(Self { min, max })
    }

    /// Width and height as a vector.
    #[must_use]
    pub fn extent(&self) -> R2 {
        self.max - self.min
    }

    /// True when `point` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, point: &R2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Regular mesh of `columns × rows` points spanning a view, borders included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    view: View,
    columns: usize,
    rows: usize,
}

impl Grid {
    /// Creates a grid with at least two points along each axis.
    pub fn new(view: View, columns: usize, rows: usize) -> Result<Self> {
        if columns < 2 || rows < 2 {
            return Err(ChargeFieldError::invalid(format!(
                "grid needs at least 2x2 points, got {columns}x{rows}"
            )));
        }
        Ok(Self {
            view,
            columns,
            rows,
        })
    }

    /// Square grid with `size` points per axis.
    pub fn square(view: View, size: usize) -> Result<Self> {
        Self::new(view, size, size)
    }

    /// The sampled rectangle.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Points along x.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Points along y.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns * self.rows
    }

    /// Always false; a grid has at least four points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// X coordinates of the columns.
    #[must_use]
    pub fn xs(&self) -> Vec<Scalar> {
        linspace(self.view.min.x, self.view.max.x, self.columns)
    }

    /// Y coordinates of the rows.
    #[must_use]
    pub fn ys(&self) -> Vec<Scalar> {
        linspace(self.view.min.y, self.view.max.y, self.rows)
    }

    /// Position of column `i`, row `j`.
    #[must_use]
    pub fn point(&self, i: usize, j: usize) -> R2 {
        let extent = self.view.extent();
        let tx = i as Scalar / (self.columns - 1) as Scalar;
        let ty = j as Scalar / (self.rows - 1) as Scalar;
        R2::new(self.view.min.x + extent.x * tx, self.view.min.y + extent.y * ty)
    }

    /// All points in row-major order (row `j` outer, column `i` inner).
    pub fn points(&self) -> impl Iterator<Item = R2> + '_ {
        (0..self.rows).flat_map(move |j| (0..self.columns).map(move |i| self.point(i, j)))
    }

    /// Applies `f` to every point and collects the results in row-major order.
    #[must_use]
    pub fn map<F, T>(&self, f: F) -> Vec<T>
    where
        F: FnMut(R2) -> T,
    {
        self.points().map(f).collect()
    }
}

/// Potential and field sampled over a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    grid: Grid,
    potentials: Vec<Scalar>,
    fields: Vec<R2>,
}

impl FieldMap {
    /// Samples potential and field of `source` at every grid point.
    pub fn sample<C>(source: &C, grid: Grid) -> Self
    where
        C: Charge + ?Sized,
    {
        debug!(columns = grid.columns(), rows = grid.rows(), "sampling field map");
        let potentials = grid.map(|p| source.potential(p));
        let fields = grid.map(|p| source.field(p));
        Self {
            grid,
            potentials,
            fields,
        }
    }

    /// The sampled grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Potentials in row-major order.
    #[must_use]
    pub fn potentials(&self) -> &[Scalar] {
        &self.potentials
    }

    /// Field vectors in row-major order.
    #[must_use]
    pub fn fields(&self) -> &[R2] {
        &self.fields
    }

    /// Potential at column `i`, row `j`.
    #[must_use]
    pub fn potential_at(&self, i: usize, j: usize) -> Scalar {
        self.potentials[j * self.grid.columns() + i]
    }

    /// Field at column `i`, row `j`.
    #[must_use]
    pub fn field_at(&self, i: usize, j: usize) -> R2 {
        self.fields[j * self.grid.columns() + i]
    }

    /// Potentials sorted ascending.
    #[must_use]
    pub fn sorted_potentials(&self) -> Vec<Scalar> {
        let mut sorted = self.potentials.clone();
        sorted.sort_by(Scalar::total_cmp);
        sorted
    }

    /// Potential at quantile `q` in `[0, 1]`, picked at index `round(q (len - 1))`.
    #[must_use]
    pub fn percentile(&self, q: Scalar) -> Scalar {
        percentile_of_sorted(&self.sorted_potentials(), q)
    }

    /// Contour levels at [`CONTOUR_PERCENTILES`].
    #[must_use]
    pub fn contour_levels(&self) -> Vec<Scalar> {
        let sorted = self.sorted_potentials();
        CONTOUR_PERCENTILES
            .iter()
            .map(|&q| percentile_of_sorted(&sorted, q))
            .collect()
    }
}

/// Nearest-rank percentile of an ascending slice; `NaN` for an empty slice.
#[must_use]
pub fn percentile_of_sorted(sorted: &[Scalar], q: Scalar) -> Scalar {
    if sorted.is_empty() {
        return Scalar::NAN;
    }
    let last = sorted.len() - 1;
    let index = (q.clamp(0.0, 1.0) * last as Scalar).round() as usize;
    sorted[index.min(last)]
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::PointCharge;

    fn unit_view() -> View {
        View::new(R2::new(0.0, 0.0), R2::new(10.0, 10.0)).unwrap()
    }

    #[test]
    fn view_rejects_inverted_or_flat_rectangles() {
        assert!(View::new(R2::new(1.0, 0.0), R2::new(0.0, 1.0)).is_err());
        assert!(View::new(R2::new(0.0, 1.0), R2::new(1.0, 1.0)).is_err());
        assert!(View::new(R2::new(0.0, 0.0), R2::new(Scalar::INFINITY, 1.0)).is_err());
    }

    #[test]
    fn grid_spans_borders() {
        let grid = Grid::new(unit_view(), 3, 5).unwrap();
        assert_eq!(grid.point(0, 0), R2::new(0.0, 0.0));
        assert_eq!(grid.point(2, 4), R2::new(10.0, 10.0));
        assert_eq!(grid.point(1, 2), R2::new(5.0, 5.0));
        assert_eq!(grid.xs(), vec![0.0, 5.0, 10.0]);
        assert_eq!(grid.points().count(), 15);
    }

    #[test]
    fn grid_rejects_degenerate_sizes() {
        assert!(Grid::new(unit_view(), 1, 10).is_err());
        assert!(Grid::square(unit_view(), 0).is_err());
    }

    #[test]
    fn field_map_is_row_major() {
        let q = PointCharge::new(1.0e-9, R2::new(2.0, 8.0));
        let grid = Grid::new(unit_view(), 4, 3).unwrap();
        let map = FieldMap::sample(&q, grid);
        assert_eq!(map.potentials().len(), 12);
        let p = grid.point(3, 1);
        assert_eq!(map.potential_at(3, 1), q.potential(p));
        assert_eq!(map.field_at(3, 1), q.field(p));
        assert_eq!(map.potentials()[4 + 3], q.potential(p));
    }

    #[test]
    fn percentile_uses_nearest_rank() {
        let sorted: Vec<Scalar> = (0..11).map(|v| v as Scalar).collect();
        assert_eq!(percentile_of_sorted(&sorted, 0.0), 0.0);
        assert_eq!(percentile_of_sorted(&sorted, 0.5), 5.0);
        assert_eq!(percentile_of_sorted(&sorted, 0.96), 10.0);
        assert_eq!(percentile_of_sorted(&sorted, 1.0), 10.0);
        assert!(percentile_of_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn contour_levels_are_ascending() {
        let q = PointCharge::new(-1.0e-9, R2::new(5.0, 5.0));
        let map = FieldMap::sample(&q, Grid::square(unit_view(), 20).unwrap());
        let levels = map.contour_levels();
        assert_eq!(levels.len(), CONTOUR_PERCENTILES.len());
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        assert_relative_eq!(levels[6], map.percentile(0.5));
    }
}
