use crate::core::io::traits::SnapshotFile;
use crate::core::models::cell::PeriodicBox;
use crate::core::models::particle::{StuntDouble, StuntDoubleKind};
use crate::core::models::structure::Structure;
use crate::core::utils::format::{general, scientific};
use nalgebra::{Matrix3, Point3, Quaternion, Vector3};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OmdError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: OmdParseErrorKind },
    #[error("Unexpected end of file: {0} was never found")]
    UnexpectedEof(&'static str),
    #[error("Missing required record: {0}")]
    MissingRecord(&'static str),
}

#[derive(Debug, Error)]
pub enum OmdParseErrorKind {
    #[error("Invalid integer in {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float in {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Unrecognized stunt double type '{value}'")]
    UnknownKind { value: String },
    #[error("A '{kind}' record carries {expected} fields after the index and type, found {found}")]
    FieldCountMismatch {
        kind: StuntDoubleKind,
        expected: usize,
        found: usize,
    },
    #[error("Stunt double record carries fewer than two fields")]
    TruncatedRecord,
    #[error("Hmat line carries fewer than nine matrix entries")]
    TruncatedHmat,
    #[error("Box matrix has a zero diagonal element")]
    SingularBox,
}

/// Section scanner state. End-of-stream in any state but `Done` means a
/// required marker never appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingVersion,
    SeekingMetaData,
    InMetaData,
    InMoleculeBlock,
    InComponentBlock,
    InEnsembleBlock,
    SeekingSnapshot,
    SeekingFrameData,
    InFrameData,
    SeekingStuntDoubles,
    InStuntDoubles,
    Done,
}

impl ScanState {
    /// The marker whose absence explains an end-of-stream in this state.
    fn pending_marker(self) -> &'static str {
        match self {
            ScanState::SeekingVersion => "the <OpenMD version=> header",
            ScanState::SeekingMetaData => "<MetaData>",
            ScanState::InMetaData
            | ScanState::InMoleculeBlock
            | ScanState::InComponentBlock
            | ScanState::InEnsembleBlock => "</MetaData>",
            ScanState::SeekingSnapshot => "<Snapshot>",
            ScanState::SeekingFrameData => "<FrameData>",
            ScanState::InFrameData => "</FrameData>",
            ScanState::SeekingStuntDoubles => "<StuntDoubles>",
            ScanState::InStuntDoubles => "</StuntDoubles>",
            ScanState::Done => "",
        }
    }
}

pub struct OmdFile;

impl OmdFile {
    /// Writes the combined document: the solute's metadata and frame data
    /// followed by the solute's and then the solvent's particle records,
    /// renumbered with one continuous zero-based index.
    ///
    /// The solvent's declaration blocks are not emitted; the solute's box and
    /// frame metadata are authoritative for the merged snapshot.
    pub fn write_combined(
        solute: &Structure,
        solvent: &Structure,
        writer: &mut impl Write,
    ) -> Result<(), OmdError> {
        write_document(
            solute,
            &[solute.stunt_doubles.as_slice(), solvent.stunt_doubles.as_slice()],
            writer,
        )
    }
}

impl SnapshotFile for OmdFile {
    type Error = OmdError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut state = ScanState::SeekingVersion;
        let mut component_lines = Vec::new();
        let mut ensemble_lines = Vec::new();
        let mut frame_data = Vec::new();
        let mut cell: Option<PeriodicBox> = None;
        let mut stunt_doubles = Vec::new();

        for (line_idx, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_idx + 1;

            state = match state {
                ScanState::SeekingVersion => {
                    if line.contains("<OpenMD version=") || line.contains("<OOPSE version=") {
                        ScanState::SeekingMetaData
                    } else {
                        ScanState::SeekingVersion
                    }
                }
                ScanState::SeekingMetaData => {
                    if line.contains("<MetaData>") {
                        ScanState::InMetaData
                    } else {
                        ScanState::SeekingMetaData
                    }
                }
                ScanState::InMetaData => {
                    if line.contains("molecule") {
                        component_lines.push(line);
                        ScanState::InMoleculeBlock
                    } else if line.contains("component") {
                        component_lines.push(line);
                        ScanState::InComponentBlock
                    } else if line.contains("ensemble") {
                        ensemble_lines.push(line);
                        ScanState::InEnsembleBlock
                    } else if line.contains("</MetaData>") {
                        ScanState::SeekingSnapshot
                    } else {
                        ScanState::InMetaData
                    }
                }
                ScanState::InMoleculeBlock => {
                    if line.contains("component") {
                        component_lines.push(String::new());
                        component_lines.push(line);
                        ScanState::InComponentBlock
                    } else {
                        component_lines.push(line);
                        ScanState::InMoleculeBlock
                    }
                }
                ScanState::InComponentBlock => {
                    if line.contains('}') {
                        component_lines.push("}".to_string());
                        component_lines.push(String::new());
                        ScanState::InMetaData
                    } else {
                        component_lines.push(line);
                        ScanState::InComponentBlock
                    }
                }
                ScanState::InEnsembleBlock => {
                    if line.contains("</MetaData>") {
                        ScanState::SeekingSnapshot
                    } else {
                        ensemble_lines.push(line);
                        ScanState::InEnsembleBlock
                    }
                }
                ScanState::SeekingSnapshot => {
                    if line.contains("<Snapshot>") {
                        ScanState::SeekingFrameData
                    } else {
                        ScanState::SeekingSnapshot
                    }
                }
                ScanState::SeekingFrameData => {
                    if line.contains("<FrameData>") {
                        frame_data.push(line);
                        ScanState::InFrameData
                    } else {
                        ScanState::SeekingFrameData
                    }
                }
                ScanState::InFrameData => {
                    let closes = line.contains("</FrameData>");
                    if line.contains("Hmat:") {
                        cell = Some(parse_hmat(&line, line_num)?);
                    }
                    frame_data.push(line);
                    if closes {
                        ScanState::SeekingStuntDoubles
                    } else {
                        ScanState::InFrameData
                    }
                }
                ScanState::SeekingStuntDoubles => {
                    if line.contains("<StuntDoubles>") {
                        ScanState::InStuntDoubles
                    } else {
                        ScanState::SeekingStuntDoubles
                    }
                }
                ScanState::InStuntDoubles => {
                    if line.contains("</StuntDoubles>") {
                        ScanState::Done
                    } else if line.trim().is_empty() {
                        ScanState::InStuntDoubles
                    } else {
                        let cell = cell
                            .as_ref()
                            .ok_or(OmdError::MissingRecord("Hmat frame entry"))?;
                        stunt_doubles.push(parse_stunt_double(&line, line_num, cell)?);
                        ScanState::InStuntDoubles
                    }
                }
                ScanState::Done => ScanState::Done,
            };

            if state == ScanState::Done {
                break;
            }
        }

        if state != ScanState::Done {
            return Err(OmdError::UnexpectedEof(state.pending_marker()));
        }
        let cell = cell.ok_or(OmdError::MissingRecord("Hmat frame entry"))?;

        Ok(Structure {
            component_lines,
            ensemble_lines,
            frame_data,
            cell,
            stunt_doubles,
        })
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        write_document(structure, &[structure.stunt_doubles.as_slice()], writer)
    }
}

fn parse_hmat(line: &str, line_num: usize) -> Result<PeriodicBox, OmdError> {
    // `Hmat: {{ Hxx, Hxy, Hxz }, { Hyx, Hyy, Hyz }, { Hzx, Hzy, Hzz }}`
    const ENTRY_POSITIONS: [usize; 9] = [2, 3, 4, 7, 8, 9, 12, 13, 14];

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() <= ENTRY_POSITIONS[8] {
        return Err(OmdError::Parse {
            line: line_num,
            kind: OmdParseErrorKind::TruncatedHmat,
        });
    }

    let mut entries = [0.0f64; 9];
    for (entry, &pos) in entries.iter_mut().zip(ENTRY_POSITIONS.iter()) {
        let raw = tokens[pos].trim_end_matches(',');
        *entry = raw.parse().map_err(|_| OmdError::Parse {
            line: line_num,
            kind: OmdParseErrorKind::InvalidFloat {
                field: "Hmat",
                value: raw.to_string(),
            },
        })?;
    }

    let hmat = Matrix3::from_row_slice(&entries);
    if hmat.diagonal().iter().any(|d| *d == 0.0) {
        return Err(OmdError::Parse {
            line: line_num,
            kind: OmdParseErrorKind::SingularBox,
        });
    }
    Ok(PeriodicBox::new(hmat))
}

fn parse_stunt_double(
    line: &str,
    line_num: usize,
    cell: &PeriodicBox,
) -> Result<StuntDouble, OmdError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(OmdError::Parse {
            line: line_num,
            kind: OmdParseErrorKind::TruncatedRecord,
        });
    }

    let index: usize = tokens[0].parse().map_err(|_| OmdError::Parse {
        line: line_num,
        kind: OmdParseErrorKind::InvalidInt {
            field: "index",
            value: tokens[0].to_string(),
        },
    })?;
    let kind: StuntDoubleKind = tokens[1].parse().map_err(|_| OmdError::Parse {
        line: line_num,
        kind: OmdParseErrorKind::UnknownKind {
            value: tokens[1].to_string(),
        },
    })?;

    let data = &tokens[2..];
    if data.len() < kind.data_field_count() {
        return Err(OmdError::Parse {
            line: line_num,
            kind: OmdParseErrorKind::FieldCountMismatch {
                kind,
                expected: kind.data_field_count(),
                found: data.len(),
            },
        });
    }

    let field = |pos: usize, name: &'static str| -> Result<f64, OmdError> {
        data[pos].parse().map_err(|_| OmdError::Parse {
            line: line_num,
            kind: OmdParseErrorKind::InvalidFloat {
                field: name,
                value: data[pos].to_string(),
            },
        })
    };

    let position = cell.wrap(&Point3::new(field(0, "x")?, field(1, "y")?, field(2, "z")?));
    let velocity = Vector3::new(field(3, "vx")?, field(4, "vy")?, field(5, "vz")?);
    let (orientation, angular_velocity) = if kind.has_rotation() {
        (
            Quaternion::new(field(6, "qw")?, field(7, "qx")?, field(8, "qy")?, field(9, "qz")?),
            Vector3::new(field(10, "jx")?, field(11, "jy")?, field(12, "jz")?),
        )
    } else {
        (Quaternion::new(0.0, 0.0, 0.0, 0.0), Vector3::zeros())
    };

    Ok(StuntDouble {
        index,
        kind,
        position,
        velocity,
        orientation,
        angular_velocity,
    })
}

fn write_document(
    header: &Structure,
    particle_sets: &[&[StuntDouble]],
    writer: &mut impl Write,
) -> Result<(), OmdError> {
    writeln!(writer, "<OpenMD version=1>")?;
    writeln!(writer, "   <MetaData>")?;
    for line in &header.component_lines {
        writeln!(writer, "{line}")?;
    }
    for line in &header.ensemble_lines {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer)?;
    writeln!(writer, "    </MetaData>")?;
    writeln!(writer, "  <Snapshot>")?;
    for line in &header.frame_data {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "    <StuntDoubles>")?;

    let mut next_index = 0usize;
    for set in particle_sets {
        for sd in set.iter() {
            write_stunt_double(writer, next_index, sd)?;
            next_index += 1;
        }
    }

    writeln!(writer, "    </StuntDoubles>")?;
    writeln!(writer, "  </Snapshot>")?;
    writeln!(writer, "</OpenMD>")?;
    Ok(())
}

fn write_stunt_double(
    writer: &mut impl Write,
    index: usize,
    sd: &StuntDouble,
) -> Result<(), OmdError> {
    let p = &sd.position;
    let v = &sd.velocity;
    match sd.kind {
        StuntDoubleKind::Pv => writeln!(
            writer,
            "{:>10} {:>7} {:>18} {:>18} {:>18} {:>14} {:>13} {:>13}",
            index,
            sd.kind,
            general(p.x, 10),
            general(p.y, 10),
            general(p.z, 10),
            scientific(v.x),
            scientific(v.y),
            scientific(v.z),
        )?,
        StuntDoubleKind::Pvqj => {
            let q = &sd.orientation;
            let j = &sd.angular_velocity;
            writeln!(
                writer,
                "{:>10} {:>7} {:>18} {:>18} {:>18} {:>13} {:>13} {:>13} {:>13} {:>13} {:>13} {:>13} {:>13} {:>13} {:>13}",
                index,
                sd.kind,
                general(p.x, 10),
                general(p.y, 10),
                general(p.z, 10),
                scientific(v.x),
                scientific(v.y),
                scientific(v.z),
                scientific(q.w),
                scientific(q.i),
                scientific(q.j),
                scientific(q.k),
                scientific(j.x),
                scientific(j.y),
                scientific(j.z),
            )?
        }
    }
    Ok(())
}
