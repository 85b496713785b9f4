use super::ring_atom;
use crate::core::geometry::angle::dihedral;
use crate::core::geometry::plane::Plane;
use crate::core::models::conformation::Conformation;
use crate::core::models::ring::RingInstance;
use nalgebra::Point3;

const TOLERANCE_IN: f64 = 0.10;
const TOLERANCE_OUT: f64 = 0.60;
const TOLERANCE_TW_OUT: f64 = 0.54;
const ANGLE_TW_BOAT: f64 = 10.5;
const ANGLE_TOLERANCE: f64 = 1.0;

/// Cascade order: Flat, Envelope, Twist. First match wins.
pub(crate) fn analyse(ring: &mut RingInstance, points: &[Point3<f64>]) {
    ring.find_plane(points, TOLERANCE_IN);

    ring.conformation = if is_flat(ring, points) {
        Conformation::Flat
    } else if is_envelope(ring, points) {
        Conformation::Envelope
    } else if is_twist(ring, points) {
        Conformation::Twist
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
    let plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 2),
    );
    plane.is_on_plane(ring_atom(points, begin, 3), TOLERANCE_IN)
        && plane.is_on_plane(ring_atom(points, begin, 4), TOLERANCE_IN)
}

/// Envelope conformation has all but one atom in one plane.
fn is_envelope(ring: &RingInstance, points: &[Point3<f64>]) -> bool {
    if !ring.has_plane {
        return false;
    }
    let begin = ring.begin;
    let plane = Plane::from_points(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 2),
    );
    plane.signed_distance(ring_atom(points, begin, 4)).abs() > TOLERANCE_OUT
}

/// Twist conformation has no plane within the ring.
fn is_twist(ring: &RingInstance, points: &[Point3<f64>]) -> bool {
    if ring.has_plane {
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
        ring_atom(points, begin, 2),
        ring_atom(points, begin, 3),
    );
    let left_dist = left_plane.signed_distance(ring_atom(points, begin, 4));
    let right_dist = right_plane.signed_distance(ring_atom(points, begin, 4));
    let tw_angle = dihedral(
        ring_atom(points, begin, 0),
        ring_atom(points, begin, 1),
        ring_atom(points, begin, 2),
        ring_atom(points, begin, 3),
    );

    (tw_angle.abs() - ANGLE_TW_BOAT).abs() < ANGLE_TOLERANCE
        && right_dist.abs() > TOLERANCE_TW_OUT
        && left_dist.abs() > TOLERANCE_TW_OUT
        && right_dist * left_dist > 0.0
}
