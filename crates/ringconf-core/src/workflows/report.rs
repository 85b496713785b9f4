use crate::core::models::conformation::Conformation;
use crate::core::models::ring::{RingInstance, RingKind};
use serde::Serialize;
use std::fmt;
use std::io;

/// One result line in the list output: structure identifier and the
/// resolved conformation name.
pub fn result_line(ring: &RingInstance) -> String {
    format!("{}: {}", ring.structure(), ring.describe_conformation())
}

/// Aggregated conformation counts for one ring kind.
///
/// Counts are kept per registry entry, so the summary lists every
/// conformation the kind can resolve to, including those never observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    kind: RingKind,
    counts: Vec<u64>,
}

impl Summary {
    pub fn new(kind: RingKind) -> Self {
        Self {
            kind,
            counts: vec![0; kind.registry().len()],
        }
    }

    /// Records one classified ring. Conformations outside the kind's
    /// registry are counted as unanalysed.
    pub fn record(&mut self, conformation: Conformation) {
        let code = self.kind.code_of(conformation).unwrap_or(0) as usize;
        self.counts[code] += 1;
    }

    pub fn count_of(&self, conformation: Conformation) -> u64 {
        self.kind
            .code_of(conformation)
            .map(|code| self.counts[code as usize])
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        for (conformation, count) in self.kind.registry().iter().zip(&self.counts) {
            let percent = if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64 * 100.0
            };
            writeln!(f, "{}: {} ({:.2}%)", conformation.label(), count, percent)?;
        }
        write!(f, "TOTAL: {total}")
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    structure: &'a str,
    ligand: &'a str,
    code: u8,
    conformation: String,
}

/// Writes one CSV row per classified ring, with a header row of
/// `structure,ligand,code,conformation`.
pub fn write_csv<W: io::Write>(rings: &[RingInstance], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for ring in rings {
        csv_writer.serialize(CsvRow {
            structure: ring.structure(),
            ligand: ring.ligand().unwrap_or(""),
            code: ring.conformation_code(),
            conformation: ring.describe_conformation(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
