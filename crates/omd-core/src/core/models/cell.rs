use nalgebra::{Matrix3, Point3, Vector3};

/// The periodic simulation cell, stored as the 3x3 `Hmat` edge-vector matrix.
///
/// Only the diagonal participates in wrapping (the cell is treated as
/// orthogonal); off-diagonal entries are carried so two cells can be compared
/// element-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicBox {
    hmat: Matrix3<f64>,
    inv_diagonal: Vector3<f64>,
}

impl PeriodicBox {
    /// Builds a cell from its `Hmat` matrix.
    ///
    /// The diagonal entries must be non-zero; their reciprocals are derived
    /// here and used by [`wrap`](Self::wrap).
    pub fn new(hmat: Matrix3<f64>) -> Self {
        let diagonal = hmat.diagonal();
        Self {
            hmat,
            inv_diagonal: Vector3::new(1.0 / diagonal.x, 1.0 / diagonal.y, 1.0 / diagonal.z),
        }
    }

    pub fn from_diagonal(diagonal: Vector3<f64>) -> Self {
        Self::new(Matrix3::from_diagonal(&diagonal))
    }

    pub fn hmat(&self) -> &Matrix3<f64> {
        &self.hmat
    }

    pub fn diagonal(&self) -> Vector3<f64> {
        self.hmat.diagonal()
    }

    /// Wraps a position into the primary cell under the minimum-image
    /// convention.
    ///
    /// Each axis is reduced independently by the cell's diagonal; scaled
    /// coordinates landing exactly halfway between images round away from
    /// zero, matching the upstream OpenMD tooling.
    pub fn wrap(&self, position: &Point3<f64>) -> Point3<f64> {
        let mut wrapped = *position;
        for axis in 0..3 {
            let scaled = wrapped[axis] * self.inv_diagonal[axis];
            wrapped[axis] = (scaled - scaled.round()) * self.hmat[(axis, axis)];
        }
        wrapped
    }

    /// Largest absolute element-wise difference between two cells.
    pub fn max_deviation(&self, other: &Self) -> f64 {
        (self.hmat - other.hmat).abs().max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(length: f64) -> PeriodicBox {
        PeriodicBox::from_diagonal(Vector3::new(length, length, length))
    }

    #[test]
    fn wrap_translates_outside_positions_into_the_cell() {
        let cell = cubic(10.0);
        let wrapped = cell.wrap(&Point3::new(12.0, -17.0, 3.0));
        assert!((wrapped.x - 2.0).abs() < 1e-12);
        assert!((wrapped.y - 3.0).abs() < 1e-12);
        assert!((wrapped.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn wrap_is_idempotent() {
        let cell = PeriodicBox::from_diagonal(Vector3::new(10.0, 20.0, 30.0));
        let once = cell.wrap(&Point3::new(43.7, -51.2, 16.01));
        let twice = cell.wrap(&once);
        assert!((once - twice).norm() < 1e-12);
    }

    #[test]
    fn wrap_keeps_every_axis_within_half_a_cell_length() {
        let cell = PeriodicBox::from_diagonal(Vector3::new(10.0, 20.0, 30.0));
        let samples = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(104.99, -104.99, 104.99),
            Point3::new(-7.3, 33.33, -1e4),
        ];
        for sample in &samples {
            let wrapped = cell.wrap(sample);
            for axis in 0..3 {
                let half = cell.diagonal()[axis] / 2.0;
                assert!(
                    wrapped[axis] >= -half - 1e-9 && wrapped[axis] <= half + 1e-9,
                    "axis {} of {:?} left the cell: {:?}",
                    axis,
                    sample,
                    wrapped
                );
            }
        }
    }

    #[test]
    fn halfway_positions_round_away_from_zero() {
        let cell = cubic(10.0);
        assert!((cell.wrap(&Point3::new(5.0, 0.0, 0.0)).x + 5.0).abs() < 1e-12);
        assert!((cell.wrap(&Point3::new(-5.0, 0.0, 0.0)).x - 5.0).abs() < 1e-12);
    }

    #[test]
    fn max_deviation_is_symmetric() {
        let a = cubic(10.0);
        let b = PeriodicBox::from_diagonal(Vector3::new(10.0, 10.0, 11.0));
        assert_eq!(a.max_deviation(&b), b.max_deviation(&a));
        assert!((a.max_deviation(&b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn max_deviation_of_identical_cells_is_zero() {
        let a = cubic(24.34);
        assert_eq!(a.max_deviation(&a.clone()), 0.0);
    }
}
