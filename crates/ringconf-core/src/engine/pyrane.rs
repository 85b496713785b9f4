use super::ring_atom;
use crate::core::geometry::plane::Plane;
use crate::core::models::conformation::Conformation;
use crate::core::models::ring::{OutOfPlaneAtom, RingInstance};
use nalgebra::Point3;

const TOLERANCE_IN: f64 = 0.1;
const TOLERANCE_OUT: f64 = 0.3;

/// Cascade order: Flat, Chair, Half-chair, Boat, Envelope, Skew. First
/// match wins; every branch re-runs the plane search with its own offsets.
///
/// Pyrane rings carry their oxygen in the last slot of the name table, so
/// out-of-plane atoms are labeled directly by slot position ("1".."5" and
/// "O") without the oxygen-relative renumbering oxane applies.
pub(crate) fn analyse(ring: &mut RingInstance, points: &[Point3<f64>]) {
    ring.conformation = if is_flat(ring, points) {
        Conformation::Flat
    } else if is_chair(ring, points) {
        Conformation::Chair
    } else if is_half_chair(ring, points) {
        Conformation::HalfChair
    } else if is_boat(ring, points) {
        Conformation::Boat
    } else if is_envelope(ring, points) {
        Conformation::Envelope
    } else if is_skew(ring, points) {
        Conformation::Skew
    } else {
        Conformation::Undefined
    };
}

fn closer_distance(right: &Plane, left: &Plane, point: &Point3<f64>) -> f64 {
    let right_dist = right.signed_distance(point);
    let left_dist = left.signed_distance(point);
    if right_dist.abs() < left_dist.abs() {
        right_dist
    } else {
        left_dist
    }
}

/// Slot-positional label: the last slot is the ring oxygen.
fn slot_name(ring: &RingInstance, delta_begin: usize) -> String {
    let slot = (ring.begin + delta_begin) % 6;
    if slot == 5 {
        "O".to_string()
    } else {
        (slot + 1).to_string()
    }
}

fn annotate(ring: &mut RingInstance, right_delta: usize, left_delta: usize, dists: (f64, f64)) {
    ring.out_of_plane = [
        Some(OutOfPlaneAtom {
            name: slot_name(ring, right_delta),
            above: dists.0 > 0.0,
        }),
        Some(OutOfPlaneAtom {
            name: slot_name(ring, left_delta),
            above: dists.1 > 0.0,
        }),
    ];
}

fn is_flat(ring: &mut RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.find_plane(points, TOLERANCE_IN) {
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
    left_plane.is_on_plane(ring_atom(points, begin, 2), TOLERANCE_IN)
        && left_plane.is_on_plane(ring_atom(points, begin, 5), TOLERANCE_IN)
        && right_plane.is_on_plane(ring_atom(points, begin, 2), TOLERANCE_IN)
        && right_plane.is_on_plane(ring_atom(points, begin, 5), TOLERANCE_IN)
}

fn is_chair(ring: &mut RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.find_plane(points, TOLERANCE_IN) {
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
    let right_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 2));
    let left_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 5));

    let is_chair = right_dist.abs() > TOLERANCE_OUT
        && left_dist.abs() > TOLERANCE_OUT
        && right_dist * left_dist < 0.0;
    if is_chair {
        annotate(ring, 2, 5, (right_dist, left_dist));
    }
    is_chair
}

fn is_half_chair(ring: &mut RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.find_plane_with(points, TOLERANCE_IN, (1, 2, 3)) {
        return false;
    }
    let begin = ring.begin;
    let left_plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 3),
    );
    let right_plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 2),
    );
    let right_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 4));
    let left_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 5));

    let is_half_chair = right_dist.abs() > TOLERANCE_OUT
        && left_dist.abs() > TOLERANCE_OUT
        && right_dist * left_dist < 0.0;
    if is_half_chair {
        annotate(ring, 4, 5, (right_dist, left_dist));
    }
    is_half_chair
}

fn is_boat(ring: &mut RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.find_plane(points, TOLERANCE_IN) {
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
    let right_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 2));
    let left_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 5));

    let is_boat = right_dist.abs() > TOLERANCE_OUT
        && left_dist.abs() > TOLERANCE_OUT
        && right_dist * left_dist > 0.0;
    if is_boat {
        annotate(ring, 2, 5, (right_dist, left_dist));
        // Keep the prow-atom name order deterministic.
        let out_of_order = matches!(
            &ring.out_of_plane,
            [Some(first), Some(second)] if second.name < first.name
        );
        if out_of_order {
            ring.out_of_plane.swap(0, 1);
        }
    }
    is_boat
}

fn is_envelope(ring: &mut RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.find_plane(points, TOLERANCE_IN) {
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
    let right_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 2));
    let left_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 5));

    let right_on_left = left_plane.is_on_plane(ring_atom(points, begin, 2), TOLERANCE_IN);
    let right_on_right = right_plane.is_on_plane(ring_atom(points, begin, 2), TOLERANCE_IN);
    let left_on_left = left_plane.is_on_plane(ring_atom(points, begin, 5), TOLERANCE_IN);
    let left_on_right = right_plane.is_on_plane(ring_atom(points, begin, 5), TOLERANCE_IN);

    // Exactly one of the two candidate atoms is off the plane, and both
    // auxiliary planes agree about each of them.
    let is_envelope = ((right_on_left && right_on_right) != (left_on_left && left_on_right))
        && (right_on_left == right_on_right)
        && (left_on_left == left_on_right);
    if is_envelope {
        ring.out_of_plane = [
            (!right_on_left).then_some(OutOfPlaneAtom {
                name: slot_name(ring, 2),
                above: right_dist > 0.0,
            }),
            (!left_on_left).then_some(OutOfPlaneAtom {
                name: slot_name(ring, 5),
                above: left_dist > 0.0,
            }),
        ];
    }
    is_envelope
}

fn is_skew(ring: &mut RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.find_plane_with(points, TOLERANCE_IN, (1, 2, 4)) {
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
        ring_atom(points, begin, 2),
    );
    let right_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 3));
    let left_dist = closer_distance(&right_plane, &left_plane, ring_atom(points, begin, 5));

    let is_skew = right_dist.abs() > TOLERANCE_OUT
        && left_dist.abs() > TOLERANCE_OUT
        && right_dist * left_dist < 0.0;
    if is_skew {
        annotate(ring, 3, 5, (right_dist, left_dist));
    }
    is_skew
}
