use crate::core::models::cell::PeriodicBox;
use crate::engine::error::ValidationError;
use tracing::{info, instrument};

/// Largest element-wise deviation (in Angstroms) two boxes may show and
/// still count as the same geometry.
pub const BOX_TOLERANCE: f64 = 1.0e-3;

/// Checks that the two cells agree element-wise within [`BOX_TOLERANCE`].
#[instrument(skip_all, name = "box_geometry_task")]
pub fn run(solute: &PeriodicBox, solvent: &PeriodicBox) -> Result<(), ValidationError> {
    let max_deviation = solute.max_deviation(solvent);
    if max_deviation > BOX_TOLERANCE {
        return Err(ValidationError::BoxGeometryMismatch {
            solute: solute.clone(),
            solvent: solvent.clone(),
            max_deviation,
        });
    }
    info!(max_deviation, "Box geometries match.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn cubic(length: f64) -> PeriodicBox {
        PeriodicBox::from_diagonal(Vector3::new(length, length, length))
    }

    #[test]
    fn identical_boxes_pass() {
        assert!(run(&cubic(10.0), &cubic(10.0)).is_ok());
    }

    #[test]
    fn deviations_within_tolerance_pass() {
        let a = cubic(10.0);
        let b = PeriodicBox::from_diagonal(Vector3::new(10.0, 10.0005, 10.0));
        assert!(run(&a, &b).is_ok());
    }

    #[test]
    fn a_one_angstrom_difference_fails() {
        let a = cubic(10.0);
        let b = PeriodicBox::from_diagonal(Vector3::new(10.0, 10.0, 11.0));
        match run(&a, &b) {
            Err(ValidationError::BoxGeometryMismatch { max_deviation, .. }) => {
                assert!((max_deviation - 1.0).abs() < 1e-12);
            }
            other => panic!("expected a box mismatch, got {other:?}"),
        }
    }

    #[test]
    fn the_check_is_symmetric() {
        let a = cubic(10.0);
        let b = PeriodicBox::from_diagonal(Vector3::new(10.0, 10.0, 11.0));
        assert_eq!(run(&a, &b).is_err(), run(&b, &a).is_err());
    }
}
