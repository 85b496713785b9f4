use crate::core::models::ring::RingKind;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Accepted atom-name aliases for one ligand, one ordered alias set per
/// ring slot.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LigandNames {
    pub slots: Vec<Vec<String>>,
}

/// The canonical atom-name table: ligand name to the per-slot alias sets
/// used to match raw atom labels onto ring positions.
///
/// The table is read-only during analysis; the engine consumes it through
/// [`AtomNameTable::is_slot_alias`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomNameTable {
    registry: HashMap<String, LigandNames>,
}

// Compiled-in defaults so the common ring ligands work without a table
// file. Slot order follows the canonical ring numbering; the last slot of
// the oxygen-bearing six-rings is the ring oxygen.
static PYRANOSE_LIGANDS: Map<&'static str, &'static [&'static [&'static str]]> = phf_map! {
    "GLC" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"], &["O5", "O"]],
    "BGC" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"], &["O5", "O"]],
    "GAL" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"], &["O5", "O"]],
    "MAN" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"], &["O5", "O"]],
    "BMA" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"], &["O5", "O"]],
    "XYP" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"], &["O5", "O"]],
    "FUC" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"], &["O5", "O"]],
};

static BENZENE_LIGANDS: Map<&'static str, &'static [&'static [&'static str]]> = phf_map! {
    "BNZ" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"], &["C6"]],
    "PHE" => &[&["CG"], &["CD1"], &["CE1"], &["CZ"], &["CE2"], &["CD2"]],
    "TYR" => &[&["CG"], &["CD1"], &["CE1"], &["CZ"], &["CE2"], &["CD2"]],
};

static CYCLOHEXANE_LIGANDS: Map<&'static str, &'static [&'static [&'static str]]> = phf_map! {
    "CHX" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"], &["C6"]],
};

static CYCLOPENTANE_LIGANDS: Map<&'static str, &'static [&'static [&'static str]]> = phf_map! {
    "CPT" => &[&["C1"], &["C2"], &["C3"], &["C4"], &["C5"]],
};

impl AtomNameTable {
    /// Loads a table from a TOML file of the form:
    ///
    /// ```toml
    /// [GLC]
    /// slots = [["C1"], ["C2"], ["C3"], ["C4"], ["C5"], ["O5", "O"]]
    /// ```
    pub fn load(path: &Path) -> Result<Self, NameTableError> {
        let content = std::fs::read_to_string(path).map_err(|e| NameTableError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let registry: HashMap<String, LigandNames> =
            toml::from_str(&content).map_err(|e| NameTableError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        Ok(Self { registry })
    }

    /// The compiled-in default table for `kind`.
    pub fn builtin(kind: RingKind) -> Self {
        let map = match kind {
            RingKind::Cyclopentane => &CYCLOPENTANE_LIGANDS,
            RingKind::Cyclohexane => &CYCLOHEXANE_LIGANDS,
            RingKind::Oxane | RingKind::Pyrane => &PYRANOSE_LIGANDS,
            RingKind::Benzene => &BENZENE_LIGANDS,
        };
        let registry = map
            .entries()
            .map(|(ligand, slots)| {
                let slots = slots
                    .iter()
                    .map(|aliases| aliases.iter().map(|name| name.to_string()).collect())
                    .collect();
                (ligand.to_string(), LigandNames { slots })
            })
            .collect();
        Self { registry }
    }

    pub fn contains_ligand(&self, ligand: &str) -> bool {
        self.registry.contains_key(ligand)
    }

    pub fn get(&self, ligand: &str) -> Option<&LigandNames> {
        self.registry.get(ligand)
    }

    /// Tests whether `name` is an accepted alias for ring position `slot`
    /// of `ligand`.
    pub fn is_slot_alias(&self, ligand: &str, slot: usize, name: &str) -> bool {
        self.registry
            .get(ligand)
            .and_then(|entry| entry.slots.get(slot))
            .is_some_and(|aliases| aliases.iter().any(|alias| alias == name))
    }

    /// Checks that every ligand entry carries exactly one alias set per
    /// ring slot of `kind`.
    pub fn validate(&self, kind: RingKind) -> Result<(), NameTableError> {
        let expected = kind.size();
        for (ligand, entry) in &self.registry {
            if entry.slots.len() != expected {
                return Err(NameTableError::SlotCount {
                    ligand: ligand.clone(),
                    expected,
                    found: entry.slots.len(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum NameTableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Ligand '{ligand}' lists {found} ring positions, expected {expected}")]
    SlotCount {
        ligand: String,
        expected: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_tables_validate_for_their_kind() {
        for kind in [
            RingKind::Cyclopentane,
            RingKind::Cyclohexane,
            RingKind::Oxane,
            RingKind::Pyrane,
            RingKind::Benzene,
        ] {
            let table = AtomNameTable::builtin(kind);
            assert!(table.validate(kind).is_ok(), "kind: {kind}");
        }
    }

    #[test]
    fn builtin_pyranose_table_resolves_aliases() {
        let table = AtomNameTable::builtin(RingKind::Oxane);
        assert!(table.contains_ligand("GLC"));
        assert!(table.is_slot_alias("GLC", 0, "C1"));
        assert!(table.is_slot_alias("GLC", 5, "O5"));
        assert!(table.is_slot_alias("GLC", 5, "O"));
        assert!(!table.is_slot_alias("GLC", 0, "C2"));
        assert!(!table.is_slot_alias("UNK", 0, "C1"));
    }

    #[test]
    fn load_parses_toml_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[GLC]
slots = [["C1", "C1A"], ["C2"], ["C3"], ["C4"], ["C5"], ["O5", "O"]]

[BNZ]
slots = [["C1"], ["C2"], ["C3"], ["C4"], ["C5"], ["C6"]]
"#
        )
        .unwrap();

        let table = AtomNameTable::load(file.path()).unwrap();
        assert!(table.is_slot_alias("GLC", 0, "C1A"));
        assert!(table.is_slot_alias("BNZ", 5, "C6"));
        assert!(table.validate(RingKind::Oxane).is_ok());
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[GLC]\nslots = not-a-list").unwrap();

        let result = AtomNameTable::load(file.path());
        assert!(matches!(result, Err(NameTableError::Toml { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = AtomNameTable::load(Path::new("/nonexistent/names.toml"));
        assert!(matches!(result, Err(NameTableError::Io { .. })));
    }

    #[test]
    fn validate_rejects_wrong_slot_count() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[GLC]\nslots = [[\"C1\"], [\"C2\"], [\"C3\"]]").unwrap();

        let table = AtomNameTable::load(file.path()).unwrap();
        let result = table.validate(RingKind::Oxane);
        assert!(matches!(
            result,
            Err(NameTableError::SlotCount {
                expected: 6,
                found: 3,
                ..
            })
        ));
    }
}
