use crate::core::models::atom::AtomRecord;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Why a single `ATOM`/`HETATM` record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PdbLineProblem {
    #[error("line is too short for an ATOM/HETATM record")]
    LineTooShort,
    #[error("columns {columns} do not fall on character boundaries")]
    ColumnBoundary { columns: String },
    #[error("invalid integer in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("invalid coordinate in columns {columns} (value: '{value}')")]
    InvalidCoordinate { columns: String, value: String },
}

/// A diagnostic for one skipped record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub problem: PdbLineProblem,
}

/// Per-file read diagnostics. Malformed atom records never abort the file;
/// they are collected here so callers can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdbReadReport {
    pub skipped: Vec<SkippedLine>,
}

/// Extracts one fixed-column field, trimmed. Columns past the end of the
/// line are treated as blank; a range that cuts through a multi-byte
/// character is a per-line problem, never a panic.
fn column(line: &str, start: usize, end: usize) -> Result<&str, PdbLineProblem> {
    let clamped_end = end.min(line.len());
    if start >= clamped_end {
        return Ok("");
    }
    line.get(start..clamped_end)
        .map(str::trim)
        .ok_or_else(|| PdbLineProblem::ColumnBoundary {
            columns: format!("{}-{}", start + 1, end),
        })
}

/// Reader for the fixed-column PDB coordinate format.
///
/// Only `ATOM` and `HETATM` records are consumed; every other record type
/// is ignored.
pub struct PdbFile;

impl PdbFile {
    pub fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(Vec<AtomRecord>, PdbReadReport), PdbError> {
        let mut atoms = Vec::new();
        let mut report = PdbReadReport::default();

        for (line_idx, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_number = line_idx + 1;

            let Some(record_type) = line.get(0..6) else {
                continue;
            };
            if record_type != "ATOM  " && record_type != "HETATM" {
                continue;
            }

            match parse_atom_line(&line, line_number) {
                Ok(atom) => atoms.push(atom),
                Err(problem) => report.skipped.push(SkippedLine {
                    line: line_number,
                    problem,
                }),
            }
        }

        Ok((atoms, report))
    }

    pub fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Vec<AtomRecord>, PdbReadReport), PdbError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

fn parse_atom_line(line: &str, line_number: usize) -> Result<AtomRecord, PdbLineProblem> {
    // Coordinates end at column 54; anything shorter cannot be a complete
    // record.
    if line.len() < 54 {
        return Err(PdbLineProblem::LineTooShort);
    }

    let serial_str = column(line, 6, 11)?;
    let serial = serial_str
        .parse::<i32>()
        .map_err(|_| PdbLineProblem::InvalidInt {
            columns: "7-11".into(),
            value: serial_str.to_string(),
        })?;

    let name = column(line, 12, 16)?;
    let residue_name = column(line, 17, 20)?;
    let chain_id = column(line, 21, 22)?.chars().next();

    let residue_number_str = column(line, 22, 26)?;
    let residue_number =
        residue_number_str
            .parse::<i32>()
            .map_err(|_| PdbLineProblem::InvalidInt {
                columns: "23-26".into(),
                value: residue_number_str.to_string(),
            })?;

    let mut coords = [0.0f64; 3];
    for (i, (start, end)) in [(30, 38), (38, 46), (46, 54)].into_iter().enumerate() {
        let value = column(line, start, end)?;
        coords[i] = value
            .parse::<f64>()
            .map_err(|_| PdbLineProblem::InvalidCoordinate {
                columns: format!("{}-{}", start + 1, end),
                value: value.to_string(),
            })?;
    }

    let element = column(line, 76, 78)?;

    Ok(AtomRecord {
        serial,
        name: name.to_string(),
        residue_name: residue_name.to_string(),
        chain_id,
        residue_number,
        element: element.to_string(),
        position: Point3::new(coords[0], coords[1], coords[2]),
        line_number,
    })
}
