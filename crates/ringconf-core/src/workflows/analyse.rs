use crate::core::io::pdb::{PdbError, PdbFile, PdbReadReport};
use crate::core::models::ring::{RingInstance, RingKind};
use crate::core::names::AtomNameTable;
use crate::engine::error::RingError;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Pdb(#[from] PdbError),
    #[error(transparent)]
    Ring(#[from] RingError),
}

/// The result of analysing one structure file: the classified ring plus
/// any per-line diagnostics collected while reading the file.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub ring: RingInstance,
    pub diagnostics: PdbReadReport,
}

/// Reads one structure file and classifies the single ring it contains.
///
/// The structure identifier reported with the result is the file stem of
/// `path`. Malformed atom records in the file are skipped and returned in
/// the outcome's diagnostics rather than failing the run.
///
/// # Errors
///
/// Returns [`WorkflowError::Pdb`] if the file cannot be read and
/// [`WorkflowError::Ring`] if the ring cannot be filled from the records
/// found or cannot be analysed.
pub fn analyse_structure(
    path: &Path,
    kind: RingKind,
    table: &AtomNameTable,
) -> Result<AnalysisOutcome, WorkflowError> {
    let (atoms, diagnostics) = PdbFile::read_from_path(path)?;

    let structure = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut ring = RingInstance::new(kind, &structure);
    ring.initialize(&atoms, table)?;
    ring.analyse()?;

    Ok(AnalysisOutcome { ring, diagnostics })
}
