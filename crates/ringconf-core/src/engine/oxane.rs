use super::ring_atom;
use crate::core::geometry::plane::Plane;
use crate::core::models::conformation::Conformation;
use crate::core::models::ring::{OutOfPlaneAtom, RingInstance};
use nalgebra::Point3;

const TOLERANCE_IN: f64 = 0.1;
const TOLERANCE_OUT: f64 = 0.3;

/// Cascade order: Flat, Chair, Half-chair, Boat, Envelope, Skew. First
/// match wins. Each branch re-runs the plane search with its own offsets,
/// so `begin` is branch-local.
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

/// Per out-of-plane atom, the closer of the two auxiliary planes supplies
/// the signed distance used both for the threshold test and the
/// above/below label.
fn closer_distance(right: &Plane, left: &Plane, point: &Point3<f64>) -> f64 {
    let right_dist = right.signed_distance(point);
    let left_dist = left.signed_distance(point);
    if right_dist.abs() < left_dist.abs() {
        right_dist
    } else {
        left_dist
    }
}

/// Position label in the numbering relative to the ring oxygen: the oxygen
/// is always 6, the carbons 1 to 5.
fn index_by_oxygen(ring: &RingInstance, delta_begin: usize) -> usize {
    let oxygen = ring.oxygen_slot.unwrap_or(5);
    let delta_oxygen = 6 - oxygen;
    (ring.begin + delta_begin + delta_oxygen + 5) % 6 + 1
}

/// Resolves the two out-of-plane position labels to the numerically
/// smaller of the two equivalent ring numberings.
///
/// The ring can be numbered with the oxygen as position 6 in both the
/// clockwise and the anticlockwise direction; flipping the ring over keeps
/// 3 and 6 fixed and swaps 1/5 and 2/4. Of the two possible name pairs the
/// one with the lower average is used, preferring the clockwise pair on a
/// tie. This does not check whether the named conformation is listed in
/// the literature; it merely describes the observed geometry.
fn normalized_pair(ring: &RingInstance, right_delta: usize, left_delta: usize) -> (String, String) {
    let clockwise = [
        index_by_oxygen(ring, right_delta),
        index_by_oxygen(ring, left_delta),
    ];
    let anticlockwise = [6 - clockwise[1] % 6, 6 - clockwise[0] % 6];

    let chosen = if clockwise[0] + clockwise[1] <= anticlockwise[0] + anticlockwise[1] {
        clockwise
    } else {
        anticlockwise
    };
    (chosen[0].to_string(), chosen[1].to_string())
}

fn annotate(ring: &mut RingInstance, right_delta: usize, left_delta: usize, dists: (f64, f64)) {
    let (right_name, left_name) = normalized_pair(ring, right_delta, left_delta);
    ring.out_of_plane = [
        Some(OutOfPlaneAtom {
            name: right_name,
            above: dists.0 > 0.0,
        }),
        Some(OutOfPlaneAtom {
            name: left_name,
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
        // The two prow atoms of a boat are interchangeable; keep the name
        // order deterministic.
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
        let (right_name, left_name) = normalized_pair(ring, 2, 5);
        ring.out_of_plane = [
            (!right_on_left).then_some(OutOfPlaneAtom {
                name: right_name,
                above: right_dist > 0.0,
            }),
            (!left_on_left).then_some(OutOfPlaneAtom {
                name: left_name,
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
