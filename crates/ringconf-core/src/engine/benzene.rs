use super::ring_atom;
use crate::core::geometry::plane::Plane;
use crate::core::models::conformation::Conformation;
use crate::core::models::ring::RingInstance;
use nalgebra::Point3;

const TOLERANCE_FLAT_IN: f64 = 0.1;

/// Benzene rings are expected planar: the cascade is Flat only, and any
/// deviation beyond the flatness tolerance is left unclassified.
pub(crate) fn analyse(ring: &mut RingInstance, points: &[Point3<f64>]) {
    ring.find_plane(points, TOLERANCE_FLAT_IN);

    ring.conformation = if is_flat(ring, points) {
        Conformation::Flat
    } else {
        Conformation::Undefined
    };
}

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

#[cfg(test)]
mod tests {
    use crate::core::models::atom::AtomRecord;
    use crate::core::models::conformation::Conformation;
    use crate::core::models::ring::{RingInstance, RingKind};
    use crate::core::names::AtomNameTable;
    use nalgebra::Point3;
    use std::f64::consts::PI;

    fn benzene_atoms(z: [f64; 6]) -> Vec<AtomRecord> {
        (0..6)
            .map(|k| {
                let theta = PI / 3.0 * k as f64;
                AtomRecord::new(
                    &format!("C{}", k + 1),
                    "BNZ",
                    "C",
                    Point3::new(1.4 * theta.cos(), 1.4 * theta.sin(), z[k]),
                )
            })
            .collect()
    }

    fn analysed_ring(z: [f64; 6]) -> RingInstance {
        let table = AtomNameTable::builtin(RingKind::Benzene);
        let mut ring = RingInstance::new(RingKind::Benzene, "benzene.pdb");
        ring.initialize(&benzene_atoms(z), &table).unwrap();
        ring.analyse().unwrap();
        ring
    }

    #[test]
    fn planar_hexagon_is_flat() {
        let ring = analysed_ring([0.0; 6]);
        assert_eq!(ring.conformation(), Conformation::Flat);
        assert_eq!(ring.conformation_code(), 2);
    }

    #[test]
    fn puckered_ring_is_undefined() {
        // A chair-like pucker is not a valid benzene geometry.
        let ring = analysed_ring([0.25, -0.25, 0.25, -0.25, 0.25, -0.25]);
        assert_eq!(ring.conformation(), Conformation::Undefined);
        assert_eq!(ring.describe_conformation(), "UNDEFINIED");
    }
}
