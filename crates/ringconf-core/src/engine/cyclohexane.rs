use super::ring_atom;
use crate::core::geometry::angle::dihedral;
use crate::core::geometry::plane::Plane;
use crate::core::models::conformation::Conformation;
use crate::core::models::ring::RingInstance;
use nalgebra::Point3;

const TOLERANCE_IN: f64 = 0.1;
const TOLERANCE_FLAT_IN: f64 = 0.1;
const TOLERANCE_OUT: f64 = 0.6;
const TOLERANCE_TW_OUT: f64 = 0.4;
const ANGLE_TW_BOAT: f64 = 17.1;
const ANGLE_TOLERANCE: f64 = 1.0;

/// Cascade order: Flat, Half-chair, Boat, Twist-boat (right), Twist-boat
/// (left), Chair. First match wins.
pub(crate) fn analyse(ring: &mut RingInstance, points: &[Point3<f64>]) {
    ring.find_plane(points, TOLERANCE_IN);

    ring.conformation = if is_flat(ring, points) {
        Conformation::Flat
    } else if is_half_chair(ring, points) {
        Conformation::HalfChair
    } else if is_boat(ring, points) {
        Conformation::Boat
    } else if is_tw_boat_right(ring, points) || is_tw_boat_left(ring, points) {
        Conformation::TwistedBoat
    } else if is_chair(ring, points) {
        Conformation::Chair
    } else {
        Conformation::Undefined
    };
}

/// Flat conformation has all atoms in one plane.
fn is_flat(ring: &RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.has_plane {
        return false;
    }
    let begin = ring.begin;
    let left_plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 4),
    );
    let right_plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 3),
    );
    left_plane.is_on_plane(ring_atom(points, begin, 2), TOLERANCE_FLAT_IN)
        && left_plane.is_on_plane(ring_atom(points, begin, 5), TOLERANCE_FLAT_IN)
        && right_plane.is_on_plane(ring_atom(points, begin, 2), TOLERANCE_FLAT_IN)
        && right_plane.is_on_plane(ring_atom(points, begin, 5), TOLERANCE_FLAT_IN)
}

/// Half-chair has all but one atom in one plane.
fn is_half_chair(ring: &RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.has_plane {
        return false;
    }
    let begin = ring.begin;
    let plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 3),
    );
    let right_dist = plane.signed_distance(ring_atom(points, begin, 2));
    let left_dist = plane.signed_distance(ring_atom(points, begin, 5));

    (plane.is_on_plane(ring_atom(points, begin, 2), TOLERANCE_FLAT_IN)
        != plane.is_on_plane(ring_atom(points, begin, 5), TOLERANCE_FLAT_IN))
        && plane.is_on_plane(ring_atom(points, begin, 4), TOLERANCE_FLAT_IN)
        && ((right_dist.abs() > TOLERANCE_OUT) != (left_dist.abs() > TOLERANCE_OUT))
}

/// The two out-of-plane atoms of a chair lie on opposite sides of the
/// reference plane.
fn is_chair(ring: &RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.has_plane {
        return false;
    }
    let (right_dist, left_dist) = reference_distances(ring, points);
    right_dist.abs() > TOLERANCE_OUT
        && left_dist.abs() > TOLERANCE_OUT
        && right_dist * left_dist < 0.0
}

/// The two out-of-plane atoms of a boat lie on the same side of the
/// reference plane.
fn is_boat(ring: &RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.has_plane {
        return false;
    }
    let (right_dist, left_dist) = reference_distances(ring, points);
    right_dist.abs() > TOLERANCE_OUT
        && left_dist.abs() > TOLERANCE_OUT
        && right_dist * left_dist > 0.0
}

fn reference_distances(ring: &RingInstance, points: &[Point3<f64>]) -> (f64, f64) {
    let begin = ring.begin;
    let plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 3),
    );
    (
        plane.signed_distance(ring_atom(points, begin, 2)),
        plane.signed_distance(ring_atom(points, begin, 5)),
    )
}

/// Twisted boat has no plane within the ring; the two variants share the
/// geometry test and differ only in which out-of-plane distance dominates.
fn tw_boat_distances(ring: &RingInstance, points: &[Point3<f64>]) -> (f64, f64) {
    let begin = ring.begin;
    let right_plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 3),
    );
    let left_plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 4),
    );
    (
        right_plane.signed_distance(ring_atom(points, begin, 2)),
        left_plane.signed_distance(ring_atom(points, begin, 5)),
    )
}

fn is_tw_boat(ring: &RingInstance, points: &[Point3<f64>]) -> bool {
    if ring.has_plane {
        return false;
    }
    let begin = ring.begin;
    let (right_dist, left_dist) = tw_boat_distances(ring, points);
    let tw_angle = dihedral(
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 3),
        ring_atom(points, begin, 4),
        ring_atom(points, begin, 0),
    );

    tw_angle.abs() > ANGLE_TW_BOAT - ANGLE_TOLERANCE
        && tw_angle.abs() < ANGLE_TW_BOAT + ANGLE_TOLERANCE
        && right_dist.abs() > TOLERANCE_TW_OUT
        && left_dist.abs() > TOLERANCE_TW_OUT
        && right_dist * left_dist > 0.0
}

fn is_tw_boat_right(ring: &RingInstance, points: &[Point3<f64>]) -> bool {
    if !is_tw_boat(ring, points) {
        return false;
    }
    let (right_dist, left_dist) = tw_boat_distances(ring, points);
    right_dist.abs() >= left_dist.abs()
}

fn is_tw_boat_left(ring: &RingInstance, points: &[Point3<f64>]) -> bool {
    if !is_tw_boat(ring, points) {
        return false;
    }
    let (right_dist, left_dist) = tw_boat_distances(ring, points);
    left_dist.abs() > right_dist.abs()
}

#[cfg(test)]
mod tests {
    use crate::core::models::atom::AtomRecord;
    use crate::core::models::conformation::Conformation;
    use crate::core::models::ring::{RingInstance, RingKind};
    use crate::core::names::AtomNameTable;
    use crate::engine::error::RingError;
    use nalgebra::Point3;
    use std::f64::consts::PI;

    fn hexagon_atoms(z: [f64; 6]) -> Vec<AtomRecord> {
        (0..6)
            .map(|k| {
                let theta = PI / 3.0 * k as f64;
                AtomRecord::new(
                    &format!("C{}", k + 1),
                    "CHX",
                    "C",
                    Point3::new(1.5 * theta.cos(), 1.5 * theta.sin(), z[k]),
                )
            })
            .collect()
    }

    fn analysed_ring(z: [f64; 6]) -> RingInstance {
        let table = AtomNameTable::builtin(RingKind::Cyclohexane);
        let mut ring = RingInstance::new(RingKind::Cyclohexane, "hexagon.pdb");
        ring.initialize(&hexagon_atoms(z), &table).unwrap();
        ring.analyse().unwrap();
        ring
    }

    #[test]
    fn regular_flat_hexagon_is_flat() {
        let ring = analysed_ring([0.0; 6]);
        assert_eq!(ring.conformation(), Conformation::Flat);
        assert_eq!(ring.describe_conformation(), "FLAT");
    }

    #[test]
    fn alternating_pucker_is_a_chair() {
        // Idealized chair: alternating +/- 0.25 A displacement; every
        // para pair of atoms is exactly coplanar with the reference
        // four-atom subset.
        let ring = analysed_ring([0.25, -0.25, 0.25, -0.25, 0.25, -0.25]);
        assert_eq!(ring.conformation(), Conformation::Chair);
    }

    #[test]
    fn two_atoms_on_the_same_side_is_a_boat() {
        // Atoms 3 and 6 lifted well beyond the 0.6 A band, the remaining
        // four exactly coplanar.
        let ring = analysed_ring([0.0, 0.0, 0.8, 0.0, 0.0, 0.8]);
        assert_eq!(ring.conformation(), Conformation::Boat);
    }

    #[test]
    fn one_displaced_atom_is_a_half_chair() {
        let ring = analysed_ring([0.0, 0.0, 0.0, 0.0, 0.0, 0.8]);
        assert_eq!(ring.conformation(), Conformation::HalfChair);
    }

    #[test]
    fn rotated_boat_pucker_is_a_twisted_boat() {
        // A boat-mode pucker rotated off the pure boat phase: no four-atom
        // plane within 0.1 A, both measured atoms beyond 0.4 A on the same
        // side, ring dihedral ~17.0 degrees, inside the 17.1 +/- 1 band.
        let ring = analysed_ring([0.454, -0.428, -0.027, 0.454, -0.428, -0.027]);
        assert_eq!(ring.conformation(), Conformation::TwistedBoat);
        assert_eq!(ring.describe_conformation(), "TWISTED BOAT");
        assert_eq!(ring.conformation_code(), 4);
    }

    #[test]
    fn shallow_pucker_is_undefined() {
        // Beyond the flatness band but far from any idealized shape.
        let ring = analysed_ring([0.0, 0.0, 0.2, 0.0, 0.0, 0.2]);
        assert_eq!(ring.conformation(), Conformation::Undefined);
    }

    #[test]
    fn conformation_codes_follow_the_registry() {
        let chair = analysed_ring([0.25, -0.25, 0.25, -0.25, 0.25, -0.25]);
        assert_eq!(chair.conformation_code(), 3);
        let boat = analysed_ring([0.0, 0.0, 0.8, 0.0, 0.0, 0.8]);
        assert_eq!(boat.conformation_code(), 6);
    }

    #[test]
    fn second_analysis_fails_without_clearing_the_result() {
        let mut ring = analysed_ring([0.25, -0.25, 0.25, -0.25, 0.25, -0.25]);
        assert_eq!(ring.analyse(), Err(RingError::AlreadyAnalysed));
        assert_eq!(ring.conformation(), Conformation::Chair);
    }

    #[test]
    fn unknown_ligand_is_rejected() {
        let table = AtomNameTable::builtin(RingKind::Cyclohexane);
        let mut atoms = hexagon_atoms([0.0; 6]);
        for atom in &mut atoms {
            atom.residue_name = "ZZZ".to_string();
        }

        let mut ring = RingInstance::new(RingKind::Cyclohexane, "unknown.pdb");
        assert_eq!(
            ring.initialize(&atoms, &table),
            Err(RingError::UnrecognizedLigand("ZZZ".to_string()))
        );
    }

    #[test]
    fn duplicate_atom_name_is_rejected() {
        let table = AtomNameTable::builtin(RingKind::Cyclohexane);
        let mut atoms = hexagon_atoms([0.0; 6]);
        atoms[5].name = "C1".to_string();

        let mut ring = RingInstance::new(RingKind::Cyclohexane, "duplicate.pdb");
        assert_eq!(
            ring.initialize(&atoms, &table),
            Err(RingError::DuplicateSlotMatch {
                name: "C1".to_string(),
                slot: 0
            })
        );
    }

    #[test]
    fn four_of_six_atoms_is_incomplete() {
        let table = AtomNameTable::builtin(RingKind::Cyclohexane);
        let mut atoms = hexagon_atoms([0.0; 6]);
        atoms.truncate(4);

        let mut ring = RingInstance::new(RingKind::Cyclohexane, "partial.pdb");
        assert_eq!(
            ring.initialize(&atoms, &table),
            Err(RingError::IncompleteRing {
                found: 4,
                expected: 6
            })
        );
        assert_eq!(ring.analyse(), Err(RingError::NotFilled));
    }
}
