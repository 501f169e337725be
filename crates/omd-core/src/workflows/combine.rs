use crate::core::io::omd::{OmdError, OmdFile};
use crate::core::io::traits::SnapshotFile;
use crate::core::models::structure::Structure;
use crate::engine::error::ValidationError;
use crate::engine::tasks::{box_geometry, overlap};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, instrument};

/// Which of the two input structures an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureRole {
    Solute,
    Solvent,
}

impl fmt::Display for StructureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StructureRole::Solute => "solute",
            StructureRole::Solvent => "solvent",
        })
    }
}

#[derive(Debug, Error)]
pub enum CombineError {
    #[error("Failed to read the {role} structure from '{path}': {source}", path = path.display())]
    Read {
        role: StructureRole,
        path: PathBuf,
        #[source]
        source: OmdError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to write the combined structure to '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: OmdError,
    },
}

/// Particle counts of a completed combine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineReport {
    pub solute_count: usize,
    pub solvent_count: usize,
}

impl CombineReport {
    pub fn total(&self) -> usize {
        self.solute_count + self.solvent_count
    }
}

/// Checks that the two structures share a box geometry and that no solute
/// stunt double overlaps a solvent one.
pub fn validate(solute: &Structure, solvent: &Structure) -> Result<(), ValidationError> {
    box_geometry::run(&solute.cell, &solvent.cell)?;
    if let Some(hit) = overlap::run(
        &solute.stunt_doubles,
        &solvent.stunt_doubles,
        overlap::OVERLAP_TOLERANCE,
    ) {
        return Err(ValidationError::ParticleOverlap {
            solute_index: hit.solute_index,
            solvent_index: hit.solvent_index,
            distance: hit.distance,
        });
    }
    Ok(())
}

/// Reads both input files, validates them against each other, and writes the
/// combined snapshot to `output_path`.
///
/// The output file appears only after a fully successful run; every failure
/// leaves the target path untouched.
#[instrument(skip_all, name = "combine_workflow")]
pub fn combine_files(
    solute_path: &Path,
    solvent_path: &Path,
    output_path: &Path,
) -> Result<CombineReport, CombineError> {
    let solute = read_structure(solute_path, StructureRole::Solute)?;
    let solvent = read_structure(solvent_path, StructureRole::Solvent)?;

    validate(&solute, &solvent)?;
    write_output(&solute, &solvent, output_path)?;

    let report = CombineReport {
        solute_count: solute.stunt_doubles.len(),
        solvent_count: solvent.stunt_doubles.len(),
    };
    info!(
        solute = report.solute_count,
        solvent = report.solvent_count,
        total = report.total(),
        path = %output_path.display(),
        "Wrote combined structure."
    );
    Ok(report)
}

fn read_structure(path: &Path, role: StructureRole) -> Result<Structure, CombineError> {
    info!(%role, path = %path.display(), "Reading structure.");
    let structure = OmdFile::read_from_path(path).map_err(|source| CombineError::Read {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    info!(%role, stunt_doubles = structure.stunt_doubles.len(), "Parsed structure.");
    Ok(structure)
}

/// Serializes through a temporary file in the output's directory so an I/O
/// failure mid-write cannot leave a truncated file behind.
fn write_output(
    solute: &Structure,
    solvent: &Structure,
    output_path: &Path,
) -> Result<(), CombineError> {
    let write_error = |source: OmdError| CombineError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| write_error(OmdError::Io(e)))?;
    OmdFile::write_combined(solute, solvent, &mut staged).map_err(write_error)?;
    staged.flush().map_err(|e| write_error(OmdError::Io(e)))?;
    staged
        .persist(output_path)
        .map_err(|e| write_error(OmdError::Io(e.error)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::cell::PeriodicBox;
    use crate::core::models::particle::StuntDouble;
    use nalgebra::{Point3, Vector3};
    use tempfile::tempdir;

    fn particle(index: usize, x: f64, y: f64, z: f64) -> StuntDouble {
        StuntDouble::translational(index, Point3::new(x, y, z), Vector3::zeros())
    }

    fn structure(diagonal: Vector3<f64>, stunt_doubles: Vec<StuntDouble>) -> Structure {
        let hmat_line = format!(
            "        Hmat: {{{{ {}, 0, 0 }}, {{ 0, {}, 0 }}, {{ 0, 0, {} }}}}",
            diagonal.x, diagonal.y, diagonal.z
        );
        Structure {
            component_lines: vec![
                "component{".to_string(),
                "  type = \"Ar\";".to_string(),
                "}".to_string(),
                String::new(),
            ],
            ensemble_lines: Vec::new(),
            frame_data: vec![
                "    <FrameData>".to_string(),
                "        Time: 0".to_string(),
                hmat_line,
                "    </FrameData>".to_string(),
            ],
            cell: PeriodicBox::from_diagonal(diagonal),
            stunt_doubles,
        }
    }

    fn write_input(dir: &Path, name: &str, structure: &Structure) -> PathBuf {
        let path = dir.join(name);
        OmdFile::write_to_path(structure, &path).unwrap();
        path
    }

    #[test]
    fn merging_disjoint_structures_produces_a_renumbered_output() {
        let dir = tempdir().unwrap();
        let cube = Vector3::new(10.0, 10.0, 10.0);
        let solute = structure(cube, vec![particle(0, 0.0, 0.0, 0.0), particle(1, 5.0, 5.0, 5.0)]);
        let solvent = structure(cube, vec![particle(0, 9.0, 9.0, 9.0)]);

        let solute_path = write_input(dir.path(), "solute.omd", &solute);
        let solvent_path = write_input(dir.path(), "solvent.omd", &solvent);
        let output_path = dir.path().join("combined.omd");

        let report = combine_files(&solute_path, &solvent_path, &output_path).unwrap();
        assert_eq!(report.solute_count, 2);
        assert_eq!(report.solvent_count, 1);
        assert_eq!(report.total(), 3);

        let merged = OmdFile::read_from_path(&output_path).unwrap();
        assert_eq!(merged.stunt_doubles.len(), 3);
        let indices: Vec<usize> = merged.stunt_doubles.iter().map(|sd| sd.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn overlapping_structures_abort_without_creating_the_output() {
        let dir = tempdir().unwrap();
        let cube = Vector3::new(10.0, 10.0, 10.0);
        let solute = structure(cube, vec![particle(0, 0.0, 0.0, 0.0), particle(1, 5.0, 5.0, 5.0)]);
        let solvent = structure(cube, vec![particle(0, 0.5, 0.5, 0.5)]);

        let solute_path = write_input(dir.path(), "solute.omd", &solute);
        let solvent_path = write_input(dir.path(), "solvent.omd", &solvent);
        let output_path = dir.path().join("combined.omd");

        let result = combine_files(&solute_path, &solvent_path, &output_path);
        assert!(matches!(
            result,
            Err(CombineError::Validation(ValidationError::ParticleOverlap { .. }))
        ));
        assert!(!output_path.exists());
    }

    #[test]
    fn mismatched_boxes_abort_without_creating_the_output() {
        let dir = tempdir().unwrap();
        let solute = structure(Vector3::new(10.0, 10.0, 10.0), vec![particle(0, 0.0, 0.0, 0.0)]);
        let solvent = structure(Vector3::new(10.0, 10.0, 11.0), vec![particle(0, 4.0, 4.0, 4.0)]);

        let solute_path = write_input(dir.path(), "solute.omd", &solute);
        let solvent_path = write_input(dir.path(), "solvent.omd", &solvent);
        let output_path = dir.path().join("combined.omd");

        let result = combine_files(&solute_path, &solvent_path, &output_path);
        match result {
            Err(CombineError::Validation(ValidationError::BoxGeometryMismatch {
                max_deviation,
                ..
            })) => assert!((max_deviation - 1.0).abs() < 1e-12),
            other => panic!("expected a box mismatch, got {:?}", other.err()),
        }
        assert!(!output_path.exists());
    }

    #[test]
    fn an_unreadable_input_names_its_role() {
        let dir = tempdir().unwrap();
        let cube = Vector3::new(10.0, 10.0, 10.0);
        let solvent = structure(cube, vec![particle(0, 9.0, 9.0, 9.0)]);
        let solvent_path = write_input(dir.path(), "solvent.omd", &solvent);
        let missing = dir.path().join("missing.omd");
        let output_path = dir.path().join("combined.omd");

        let result = combine_files(&missing, &solvent_path, &output_path);
        match result {
            Err(CombineError::Read { role, .. }) => assert_eq!(role, StructureRole::Solute),
            other => panic!("expected a read error, got {:?}", other.err()),
        }
        assert!(!output_path.exists());
    }

    #[test]
    fn validate_accepts_identical_boxes_and_disjoint_sets() {
        let cube = Vector3::new(10.0, 10.0, 10.0);
        let solute = structure(cube, vec![particle(0, 0.0, 0.0, 0.0)]);
        let solvent = structure(cube, vec![particle(0, 4.0, 4.0, 4.0)]);
        assert!(validate(&solute, &solvent).is_ok());
    }
}
