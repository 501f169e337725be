use crate::core::models::particle::StuntDouble;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Minimum separation (in Angstroms) allowed between a solute and a solvent
/// stunt double.
pub const OVERLAP_TOLERANCE: f64 = 1.0;

/// A solute/solvent pair closer than the overlap tolerance.
///
/// Indices are ordinal positions within the scanned sets, not the indices
/// carried by the source files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub solute_index: usize,
    pub solvent_index: usize,
    pub distance: f64,
}

/// Scans every solute/solvent pair and reports an overlapping pair, if any.
///
/// The scan stops at the first hit. With the `parallel` feature enabled the
/// pairs are scanned concurrently and whichever overlapping pair is found
/// first is returned.
#[instrument(skip_all, name = "overlap_check_task")]
pub fn run(solute: &[StuntDouble], solvent: &[StuntDouble], tolerance: f64) -> Option<Overlap> {
    info!(
        tolerance,
        pairs = solute.len() * solvent.len(),
        "Checking for solute/solvent overlap."
    );

    let hit = find_overlap(solute, solvent, tolerance);
    match &hit {
        Some(overlap) => info!(?overlap, "Overlap detected."),
        None => info!("No overlapping pairs."),
    }
    hit
}

#[cfg(not(feature = "parallel"))]
fn find_overlap(
    solute: &[StuntDouble],
    solvent: &[StuntDouble],
    tolerance: f64,
) -> Option<Overlap> {
    solute
        .iter()
        .enumerate()
        .find_map(|(i, sd)| first_within(i, sd, solvent, tolerance))
}

#[cfg(feature = "parallel")]
fn find_overlap(
    solute: &[StuntDouble],
    solvent: &[StuntDouble],
    tolerance: f64,
) -> Option<Overlap> {
    solute
        .par_iter()
        .enumerate()
        .find_map_any(|(i, sd)| first_within(i, sd, solvent, tolerance))
}

fn first_within(
    solute_index: usize,
    sd: &StuntDouble,
    solvent: &[StuntDouble],
    tolerance: f64,
) -> Option<Overlap> {
    solvent.iter().enumerate().find_map(|(solvent_index, other)| {
        let distance = (sd.position - other.position).norm();
        (distance < tolerance).then_some(Overlap {
            solute_index,
            solvent_index,
            distance,
        })
    })
}
