use crate::core::models::cell::PeriodicBox;
use crate::core::utils::format::general;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(
        "The solute and solvent boxes have different geometries:\n{}",
        geometry_report(.solute, .solvent)
    )]
    BoxGeometryMismatch {
        solute: PeriodicBox,
        solvent: PeriodicBox,
        max_deviation: f64,
    },

    #[error(
        "Solute stunt double {solute_index} and solvent stunt double {solvent_index} overlap ({distance:.3} apart)"
    )]
    ParticleOverlap {
        solute_index: usize,
        solvent_index: usize,
        distance: f64,
    },
}

/// Side-by-side rendering of two box matrices, one row per axis.
fn geometry_report(solute: &PeriodicBox, solvent: &PeriodicBox) -> String {
    let mut out = String::new();
    out.push_str("                     Solute           |                   Solvent\n");
    out.push_str(" -------------------------------------|------------------------------------\n");
    for row in 0..3 {
        let a = solute.hmat().row(row);
        let b = solvent.hmat().row(row);
        out.push_str(&format!(
            "|  {:>10} {:>10} {:>10}   |  {:>10} {:>10} {:>10}  |\n",
            general(a[0], 4),
            general(a[1], 4),
            general(a[2], 4),
            general(b[0], 4),
            general(b[1], 4),
            general(b[2], 4),
        ));
    }
    out.push_str(" -------------------------------------|------------------------------------");
    out
}
