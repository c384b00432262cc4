//! Rigid registration parameters applied to a point cloud.

use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Vector3};

/// A rotation and translation, as produced by an external registration
/// step (ICP, feature matching, landmarks).
///
/// The map is `p' = R·p + t`. The rotation is not checked for
/// orthonormality: a skewed matrix yields a skewed result.
///
/// # Example
///
/// ```
/// use mesh_pointcloud::Registration;
/// use nalgebra::{Matrix3, Point3, Vector3};
///
/// let registration = Registration::new(Matrix3::identity(), Vector3::new(1.0, 2.0, 3.0));
/// let moved = registration.transform_point(&Point3::origin());
/// assert_eq!(moved, Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Registration {
    /// Linear part `R`.
    pub rotation: Matrix3<f64>,
    /// Translation `t`.
    pub translation: Vector3<f64>,
}

impl Default for Registration {
    fn default() -> Self {
        Self::identity()
    }
}

impl Registration {
    /// Creates a registration from a rotation and a translation.
    #[must_use]
    pub const fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity map.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    /// Rotation only.
    #[must_use]
    pub fn from_rotation(rotation: Matrix3<f64>) -> Self {
        Self::new(rotation, Vector3::zeros())
    }

    /// Translation only.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self::new(Matrix3::identity(), translation)
    }

    /// The 4x4 homogeneous matrix `[R t; 0 0 0 1]`.
    #[must_use]
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        let mut mat = self.linear_homogeneous();
        mat[(0, 3)] = self.translation.x;
        mat[(1, 3)] = self.translation.y;
        mat[(2, 3)] = self.translation.z;
        mat
    }

    /// The 4x4 homogeneous matrix of the linear part alone, `[R 0; 0 0 0 1]`.
    #[must_use]
    pub fn linear_homogeneous(&self) -> Matrix4<f64> {
        let mut mat = Matrix4::identity();
        for i in 0..3 {
            for j in 0..3 {
                mat[(i, j)] = self.rotation[(i, j)];
            }
        }
        mat
    }

    /// Maps a point through the homogeneous matrix.
    ///
    /// The bottom row is `0 0 0 1`, so w stays 1 and the xyz part is read
    /// back directly.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from((self.to_homogeneous() * point.to_homogeneous()).xyz())
    }

    /// Maps a direction through the linear part only.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * vector
    }

    /// Composes this registration with another (self * other).
    ///
    /// The result applies `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    /// Returns true if this registration is approximately the identity.
    #[must_use]
    pub fn is_identity(&self, epsilon: f64) -> bool {
        (self.rotation - Matrix3::identity()).amax() < epsilon
            && self.translation.norm() < epsilon
    }
}

impl From<Isometry3<f64>> for Registration {
    fn from(iso: Isometry3<f64>) -> Self {
        Self::new(
            iso.rotation.to_rotation_matrix().into_inner(),
            iso.translation.vector,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, Translation3, UnitQuaternion};
    use std::f64::consts::PI;

    fn rot_z(angle: f64) -> Matrix3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), angle).into_inner()
    }

    #[test]
    fn test_identity_transform() {
        let registration = Registration::identity();
        let point = Point3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(registration.transform_point(&point), point);
        assert!(registration.is_identity(1e-12));
    }

    #[test]
    fn test_rotation_90_degrees_z() {
        let registration = Registration::from_rotation(rot_z(PI / 2.0));
        let result = registration.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(result, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let registration = Registration::new(rot_z(PI / 2.0), Vector3::new(100.0, 100.0, 100.0));
        let result = registration.transform_vector(&Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(result, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_homogeneous_layout() {
        let registration = Registration::new(rot_z(0.3), Vector3::new(1.0, 2.0, 3.0));
        let mat = registration.to_homogeneous();

        assert_relative_eq!(mat[(0, 3)], 1.0);
        assert_relative_eq!(mat[(1, 3)], 2.0);
        assert_relative_eq!(mat[(2, 3)], 3.0);
        assert_eq!(mat.row(3).iter().copied().collect::<Vec<_>>(), [0.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(
            mat.fixed_view::<3, 3>(0, 0).into_owned(),
            registration.rotation
        );

        let linear = registration.linear_homogeneous();
        assert_relative_eq!(linear.fixed_view::<3, 1>(0, 3).norm(), 0.0);
    }

    #[test]
    fn test_non_rigid_matrix_is_applied_verbatim() {
        let shear = Matrix3::new(1.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let registration = Registration::from_rotation(shear);
        let result = registration.transform_point(&Point3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(result, Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_compose_matches_sequential_application() {
        let first = Registration::new(rot_z(0.4), Vector3::new(1.0, -2.0, 0.5));
        let second = Registration::new(rot_z(-1.1), Vector3::new(0.0, 3.0, 4.0));
        let composed = second.compose(&first);

        let point = Point3::new(0.7, -1.3, 2.2);
        let sequential = second.transform_point(&first.transform_point(&point));
        assert_relative_eq!(composed.transform_point(&point), sequential, epsilon = 1e-12);
    }

    #[test]
    fn test_from_isometry() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI / 3.0);
        let iso = Isometry3::from_parts(Translation3::new(1.0, 2.0, 3.0), rotation);
        let registration = Registration::from(iso);

        let point = Point3::new(-1.0, 0.5, 2.0);
        assert_relative_eq!(
            registration.transform_point(&point),
            iso.transform_point(&point),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Registration::default(), Registration::identity());
    }
}
