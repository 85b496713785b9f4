//! The classification engine: atom-slot matching and the per-ring-kind
//! conformation cascades.
//!
//! Each cascade tests its candidate conformations in a fixed priority
//! order and the first matching branch wins; the branches are not mutually
//! exclusive by construction, so the order itself encodes precedence and
//! must not be rearranged.

pub mod benzene;
pub mod cyclohexane;
pub mod cyclopentane;
pub mod error;
pub mod oxane;
pub mod pyrane;

use crate::core::models::atom::AtomRecord;
use crate::core::models::ring::{RingInstance, RingKind};
use crate::core::names::AtomNameTable;
use error::RingError;
use nalgebra::Point3;

impl RingInstance {
    /// Attempts to fill all ring slots from a batch of atom records
    /// belonging to one structure.
    ///
    /// The ligand is taken from the first atom record's residue name and
    /// must exist in `table`. Every atom's stripped name is then tested
    /// against the per-slot alias sets; the first matching slot is filled.
    /// For oxane rings the ring oxygen is additionally identified by the
    /// element symbol of the matched records.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::UnrecognizedLigand`] for an unknown residue,
    /// [`RingError::DuplicateSlotMatch`] if a slot matches twice,
    /// [`RingError::IncompleteRing`] if any slot stays empty, and
    /// [`RingError::MissingRingOxygen`] / [`RingError::DuplicateRingOxygen`]
    /// for oxane rings whose oxygen cannot be pinned down.
    pub fn initialize(
        &mut self,
        atoms: &[AtomRecord],
        table: &AtomNameTable,
    ) -> Result<(), RingError> {
        let size = self.kind.size();

        let ligand = match self.ligand.clone() {
            Some(ligand) => ligand,
            None => {
                let Some(first) = atoms.first() else {
                    return Err(RingError::IncompleteRing {
                        found: 0,
                        expected: size,
                    });
                };
                let ligand = first.residue_name.trim().to_string();
                if !table.contains_ligand(&ligand) {
                    return Err(RingError::UnrecognizedLigand(ligand));
                }
                self.ligand = Some(ligand.clone());
                ligand
            }
        };

        for atom in atoms {
            let name = atom.name.trim();
            for slot in 0..size {
                if !table.is_slot_alias(&ligand, slot, name) {
                    continue;
                }
                if self.slots[slot].is_some() {
                    return Err(RingError::DuplicateSlotMatch {
                        name: name.to_string(),
                        slot,
                    });
                }
                if self.kind == RingKind::Oxane && atom.element.trim() == "O" {
                    if self.oxygen_slot.is_some() {
                        return Err(RingError::DuplicateRingOxygen);
                    }
                    self.oxygen_slot = Some(slot);
                }
                self.slots[slot] = Some(atom.clone());
                break;
            }
        }

        let found = self.slots.iter().filter(|slot| slot.is_some()).count();
        if found != size {
            return Err(RingError::IncompleteRing {
                found,
                expected: size,
            });
        }
        if self.kind == RingKind::Oxane && self.oxygen_slot.is_none() {
            return Err(RingError::MissingRingOxygen);
        }

        self.filled = true;
        Ok(())
    }

    /// Runs the ring kind's classification cascade exactly once.
    ///
    /// On success the conformation is available through
    /// [`RingInstance::conformation`] and
    /// [`RingInstance::describe_conformation`] and is immutable thereafter.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::NotFilled`] if the slots were never filled and
    /// [`RingError::AlreadyAnalysed`] on a repeated call; neither changes
    /// any state.
    pub fn analyse(&mut self) -> Result<(), RingError> {
        if !self.filled {
            return Err(RingError::NotFilled);
        }
        if self.analysed {
            return Err(RingError::AlreadyAnalysed);
        }
        let points = self.positions().ok_or(RingError::NotFilled)?;

        match self.kind {
            RingKind::Cyclopentane => cyclopentane::analyse(self, &points),
            RingKind::Cyclohexane => cyclohexane::analyse(self, &points),
            RingKind::Oxane => oxane::analyse(self, &points),
            RingKind::Pyrane => pyrane::analyse(self, &points),
            RingKind::Benzene => benzene::analyse(self, &points),
        }

        self.analysed = true;
        Ok(())
    }
}

/// Ring atom at `offset` positions after the plane-search rotation `begin`.
pub(crate) fn ring_atom(points: &[Point3<f64>], begin: usize, offset: usize) -> &Point3<f64> {
    &points[(begin + offset) % points.len()]
}
