use nalgebra::{Point3, Quaternion, Vector3};
use std::fmt;
use std::str::FromStr;

/// Record-layout tag of one integrable object, as written in the second
/// column of a `<StuntDoubles>` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StuntDoubleKind {
    /// Position and velocity only.
    Pv,
    /// Position, velocity, orientation quaternion, and angular velocity.
    Pvqj,
}

impl StuntDoubleKind {
    /// Number of numeric fields a record of this kind carries after the
    /// index and the kind tag.
    pub fn data_field_count(&self) -> usize {
        match self {
            StuntDoubleKind::Pv => 6,
            StuntDoubleKind::Pvqj => 13,
        }
    }

    pub fn has_rotation(&self) -> bool {
        matches!(self, StuntDoubleKind::Pvqj)
    }
}

impl fmt::Display for StuntDoubleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            StuntDoubleKind::Pv => "pv",
            StuntDoubleKind::Pvqj => "pvqj",
        })
    }
}

impl FromStr for StuntDoubleKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pv" => Ok(StuntDoubleKind::Pv),
            "pvqj" => Ok(StuntDoubleKind::Pvqj),
            _ => Err(()),
        }
    }
}

/// One integrable object from a snapshot's `<StuntDoubles>` section.
///
/// Immutable after parsing; the writer assigns fresh contiguous indices
/// without touching the record itself.
#[derive(Debug, Clone, PartialEq)]
pub struct StuntDouble {
    /// Index as given in the source file; not necessarily contiguous or
    /// zero-based.
    pub index: usize,
    pub kind: StuntDoubleKind,
    /// Position wrapped into the primary cell at parse time.
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    /// Zero for `pv` records.
    pub orientation: Quaternion<f64>,
    /// Zero for `pv` records.
    pub angular_velocity: Vector3<f64>,
}

impl StuntDouble {
    /// Creates a translational (`pv`) record with zeroed rotational fields.
    pub fn translational(index: usize, position: Point3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            index,
            kind: StuntDoubleKind::Pv,
            position,
            velocity,
            orientation: Quaternion::new(0.0, 0.0, 0.0, 0.0),
            angular_velocity: Vector3::zeros(),
        }
    }
}
