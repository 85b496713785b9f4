use nalgebra::{Point3, Vector3};

/// A plane in implicit form `a*x + b*y + c*z + d = 0`.
///
/// The coefficient vector `(a, b, c)` is the (unnormalized) plane normal.
/// Constructing a plane from three collinear points yields a zero normal,
/// which is a precondition violation; callers must supply non-degenerate
/// geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Plane {
    pub fn new(normal: Vector3<f64>, d: f64) -> Self {
        Self {
            a: normal.x,
            b: normal.y,
            c: normal.z,
            d,
        }
    }

    /// Builds the plane through three points.
    ///
    /// The normal is `(A - B) x (C - B)`, so the sign of
    /// [`Plane::signed_distance`] follows the right-hand rule on the
    /// construction order. Classifiers compare the *product* of two signed
    /// distances to test same-side vs. opposite-side, so they keep this
    /// order consistent.
    pub fn from_points(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Self {
        let u = a - b;
        let v = c - b;
        let normal = u.cross(&v);
        let d = -normal.dot(&a.coords);
        Self::new(normal, d)
    }

    /// Signed Euclidean distance of `point` from the plane.
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        let normal_len = (self.a * self.a + self.b * self.b + self.c * self.c).sqrt();
        (self.a * point.x + self.b * point.y + self.c * point.z + self.d) / normal_len
    }

    /// Tests whether `point` lies within `tolerance` of the plane.
    pub fn is_on_plane(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        self.signed_distance(point).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn defining_points_have_zero_distance() {
        let a = Point3::new(1.2, -0.4, 3.3);
        let b = Point3::new(-2.0, 1.5, 0.7);
        let c = Point3::new(0.3, 4.1, -1.9);
        let plane = Plane::from_points(&a, &b, &c);

        assert!(plane.signed_distance(&a).abs() < EPSILON);
        assert!(plane.signed_distance(&b).abs() < EPSILON);
        assert!(plane.signed_distance(&c).abs() < EPSILON);
    }

    #[test]
    fn signed_distance_matches_axis_aligned_plane() {
        // The XY plane through three points at z = 0.
        let plane = Plane::from_points(
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );

        let above = Point3::new(0.5, 0.5, 2.5);
        let below = Point3::new(-1.0, 3.0, -0.75);
        assert!((plane.signed_distance(&above).abs() - 2.5).abs() < EPSILON);
        assert!((plane.signed_distance(&below).abs() - 0.75).abs() < EPSILON);
        // Opposite sides of the plane carry opposite signs.
        assert!(plane.signed_distance(&above) * plane.signed_distance(&below) < 0.0);
    }

    #[test]
    fn is_on_plane_respects_tolerance() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 2.0), 0.0);
        let point = Point3::new(4.0, -1.0, 0.09);

        assert!(plane.is_on_plane(&point, 0.1));
        assert!(!plane.is_on_plane(&point, 0.05));
    }

    #[test]
    fn normal_scaling_does_not_change_distance() {
        let plane_unit = Plane::new(Vector3::new(0.0, 1.0, 0.0), -2.0);
        let plane_scaled = Plane::new(Vector3::new(0.0, 10.0, 0.0), -20.0);
        let point = Point3::new(0.0, 5.0, 0.0);

        assert!(
            (plane_unit.signed_distance(&point) - plane_scaled.signed_distance(&point)).abs()
                < EPSILON
        );
    }
}
