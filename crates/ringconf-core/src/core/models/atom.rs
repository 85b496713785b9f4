use nalgebra::Point3;

/// A single atom record extracted from a structure file.
///
/// This is a flat value type: the ring engine copies the records it matches
/// into its own slots, so an `AtomRecord` carries no ownership ties back to
/// the file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Atom serial number from the source record.
    pub serial: i32,
    /// Atom name with surrounding whitespace stripped (e.g. "C1", "O5").
    pub name: String,
    /// Residue (ligand) name (e.g. "GLC", "BNZ").
    pub residue_name: String,
    /// Chain identifier, if any.
    pub chain_id: Option<char>,
    /// Residue sequence number.
    pub residue_number: i32,
    /// Element symbol with whitespace stripped (e.g. "C", "O").
    pub element: String,
    /// The 3D coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Line number in the source file, kept for diagnostics.
    pub line_number: usize,
}

impl AtomRecord {
    pub fn new(name: &str, residue_name: &str, element: &str, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: name.trim().to_string(),
            residue_name: residue_name.trim().to_string(),
            chain_id: None,
            residue_number: 0,
            element: element.trim().to_string(),
            position,
            line_number: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_whitespace_from_names() {
        let atom = AtomRecord::new(" C1 ", "GLC ", " O", Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.name, "C1");
        assert_eq!(atom.residue_name, "GLC");
        assert_eq!(atom.element, "O");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }
}
