use super::cell::PeriodicBox;
use super::particle::StuntDouble;

/// One fully parsed `.omd` structure file.
///
/// The declaration and frame-data blocks are kept as opaque, order-preserving
/// line sequences and written back verbatim; only the cell and the particle
/// records are interpreted. Two instances (solute and solvent) exist side by
/// side during a combine run and are never merged in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Lines of the molecule and component declaration blocks.
    pub component_lines: Vec<String>,
    /// Lines of the ensemble block, empty when the file has none.
    pub ensemble_lines: Vec<String>,
    /// The `<FrameData>` subsection, markers included.
    pub frame_data: Vec<String>,
    pub cell: PeriodicBox,
    pub stunt_doubles: Vec<StuntDouble>,
}
