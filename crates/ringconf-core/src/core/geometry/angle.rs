use nalgebra::{Point3, Vector3};

/// Angle between two vectors in degrees.
///
/// The acos argument is clamped to [-1, 1]; rounding error on near-parallel
/// vectors can otherwise push the normalized dot product slightly outside
/// the acos domain and produce NaN.
pub fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    let cosine = u.normalize().dot(&v.normalize()).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Interior angle at vertex `b` of the triangle `a`-`b`-`c`, in degrees.
pub fn angle_at(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    angle_between(&(a - b), &(c - b))
}

/// Signed dihedral angle of the atom quadruple `a`-`b`-`c`-`d`, in degrees,
/// in the range (-180, 180].
///
/// The two half-plane normals are `(a-b) x (c-b)` and `(b-c) x (d-c)`; the
/// sign is taken against the normalized `b -> c` axis via atan2, so the
/// result distinguishes the two possible out-of-plane twist directions.
pub fn dihedral(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    let n1 = (a - b).cross(&(c - b));
    let n2 = (b - c).cross(&(d - c));
    let axis = (c - b).normalize();
    n1.cross(&n2).dot(&axis).atan2(n1.dot(&n2)).to_degrees()
}
