//! The point cloud container.
//!
//! Positions, normals and colors are stored as parallel, index-aligned
//! sequences. Points are only ever appended; transforms rewrite them in
//! place.

use nalgebra::{Matrix3, Point3, Vector3};
use tracing::{debug, warn};

use crate::color::Color;
use crate::error::{CloudError, CloudResult};
use crate::params::CloudParams;
use crate::registration::Registration;

/// An append-only point cloud with per-point colors and optional normals.
///
/// Besides the points themselves the cloud tracks a robust centroid
/// (per-axis median) and the largest point norm seen since the last
/// [`normalise`](Self::normalise).
///
/// # Example
///
/// ```
/// use mesh_pointcloud::PointCloud;
/// use nalgebra::Point3;
///
/// let mut cloud = PointCloud::new();
/// cloud
///     .add_points(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0)])
///     .unwrap();
///
/// assert_eq!(cloud.len(), 2);
/// assert_eq!(cloud.centroid(), Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone)]
pub struct PointCloud {
    positions: Vec<Point3<f64>>,
    normals: Vec<Vector3<f64>>,
    colors: Vec<Color>,
    centroid: Point3<f64>,
    max_norm: f64,
    params: CloudParams,
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl PointCloud {
    /// Creates an empty point cloud with default parameters.
    ///
    /// The centroid starts at the origin and the max norm at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(CloudParams::default())
    }

    /// Creates an empty point cloud with the given parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_pointcloud::{CloudParams, Color, PointCloud};
    ///
    /// let params = CloudParams::default().with_default_color(Color::WHITE);
    /// let mut cloud = PointCloud::with_params(params);
    /// cloud.add_points(&[[1.0, 0.0, 0.0]]).unwrap();
    /// assert_eq!(cloud.colors()[0], Color::WHITE);
    /// ```
    #[must_use]
    pub fn with_params(params: CloudParams) -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            centroid: Point3::origin(),
            max_norm: 0.0,
            params,
        }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the cloud has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Point positions in insertion order.
    #[must_use]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Per-point normals; either empty or one per point.
    #[must_use]
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    /// Per-point colors, one per point.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Returns true if the cloud stores normals.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// The current centroid estimate.
    ///
    /// Left stale by [`normalise`](Self::normalise); call
    /// [`update_centroid`](Self::update_centroid) to refresh it.
    #[must_use]
    pub const fn centroid(&self) -> Point3<f64> {
        self.centroid
    }

    /// Largest point norm observed since the last normalisation.
    #[must_use]
    pub const fn max_norm(&self) -> f64 {
        self.max_norm
    }

    /// Parameters this cloud was built with.
    #[must_use]
    pub const fn params(&self) -> &CloudParams {
        &self.params
    }

    /// Appends points colored with the default color.
    ///
    /// Accepts any point representation convertible to `Point3<f64>`:
    /// points, `[f64; 3]` triples or `Vector3<f64>` column vectors.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InconsistentNormals`] if the cloud stores
    /// normals, since the new points would have none. Use
    /// [`add_oriented_points`](Self::add_oriented_points) for such clouds.
    pub fn add_points<P>(&mut self, points: &[P]) -> CloudResult<()>
    where
        P: Copy + Into<Point3<f64>>,
    {
        self.ingest(points, None, None)
    }

    /// Appends points with one explicit color each.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::ColorCountMismatch`] if `colors` and `points`
    /// differ in length, or [`CloudError::InconsistentNormals`] if the cloud
    /// stores normals. Nothing is appended on error.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_pointcloud::{CloudError, Color, PointCloud};
    ///
    /// let mut cloud = PointCloud::new();
    /// let result = cloud.add_points_with_colors(&[[0.0, 0.0, 0.0]], &[]);
    /// assert!(matches!(result, Err(CloudError::ColorCountMismatch { .. })));
    /// assert!(cloud.is_empty());
    ///
    /// cloud
    ///     .add_points_with_colors(&[[0.0, 0.0, 0.0]], &[Color::new(255, 0, 0)])
    ///     .unwrap();
    /// assert_eq!(cloud.colors()[0].r, 255);
    /// ```
    pub fn add_points_with_colors<P>(&mut self, points: &[P], colors: &[Color]) -> CloudResult<()>
    where
        P: Copy + Into<Point3<f64>>,
    {
        self.ingest(points, Some(colors), None)
    }

    /// Appends points carrying normals, with optional explicit colors.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::NormalCountMismatch`] or
    /// [`CloudError::ColorCountMismatch`] on length mismatch, or
    /// [`CloudError::InconsistentNormals`] if the cloud already holds points
    /// without normals. Nothing is appended on error.
    pub fn add_oriented_points<P>(
        &mut self,
        points: &[P],
        normals: &[Vector3<f64>],
        colors: Option<&[Color]>,
    ) -> CloudResult<()>
    where
        P: Copy + Into<Point3<f64>>,
    {
        self.ingest(points, colors, Some(normals))
    }

    fn ingest<P>(
        &mut self,
        points: &[P],
        colors: Option<&[Color]>,
        normals: Option<&[Vector3<f64>]>,
    ) -> CloudResult<()>
    where
        P: Copy + Into<Point3<f64>>,
    {
        if let Some(colors) = colors {
            if colors.len() != points.len() {
                return Err(CloudError::ColorCountMismatch {
                    points: points.len(),
                    colors: colors.len(),
                });
            }
        }
        if let Some(normals) = normals {
            if normals.len() != points.len() {
                return Err(CloudError::NormalCountMismatch {
                    points: points.len(),
                    normals: normals.len(),
                });
            }
        }
        if !self.is_empty() && !points.is_empty() && self.has_normals() != normals.is_some() {
            return Err(CloudError::InconsistentNormals {
                cloud_has_normals: self.has_normals(),
            });
        }

        self.positions.reserve(points.len());
        self.colors.reserve(points.len());
        for &point in points {
            let point: Point3<f64> = point.into();
            self.max_norm = self.max_norm.max(point.coords.norm());
            self.positions.push(point);
        }
        match colors {
            Some(colors) => self.colors.extend_from_slice(colors),
            None => {
                let color = self.params.default_color;
                self.colors.resize(self.positions.len(), color);
            }
        }
        if let Some(normals) = normals {
            self.normals.extend_from_slice(normals);
        }

        debug!(
            added = points.len(),
            total = self.len(),
            max_norm = self.max_norm,
            "Ingested points"
        );

        self.update_centroid();
        Ok(())
    }

    /// Recomputes the centroid as the per-axis median of all points.
    ///
    /// Each axis is sorted independently and the element at index
    /// `round(n / 2)` (clamped to the last element) is taken, so the result
    /// need not coincide with any stored point. An empty cloud keeps its
    /// previous centroid.
    pub fn update_centroid(&mut self) {
        if let Some(centroid) = axis_median(&self.positions) {
            self.centroid = centroid;
            debug!(
                x = centroid.x,
                y = centroid.y,
                z = centroid.z,
                "Updated centroid"
            );
        }
    }

    /// Maps every point `p` to `(p - centroid) / max_norm` and resets the
    /// max norm to 1.
    ///
    /// Uses the current centroid and max norm as they are; the centroid is
    /// not refreshed afterwards.
    #[allow(clippy::float_cmp)]
    pub fn normalise(&mut self) {
        if self.max_norm == 0.0 {
            warn!(points = self.len(), "Normalising with zero max norm");
        }

        let inv_norm = 1.0 / self.max_norm;
        let offset = self.centroid.coords;
        for point in &mut self.positions {
            point.coords = (point.coords - offset) * inv_norm;
        }
        self.max_norm = 1.0;
    }

    /// Moves the cloud so its centroid sits at (or near) the origin.
    ///
    /// The centroid is recomputed before and after the shift.
    pub fn center(&mut self) {
        self.update_centroid();

        let offset = self.centroid.coords;
        for point in &mut self.positions {
            point.coords -= offset;
        }
        self.update_centroid();
    }

    /// Scales all points, the centroid and the max norm by `factor`.
    ///
    /// Zero and negative factors are applied as given.
    pub fn scale(&mut self, factor: f64) {
        for point in &mut self.positions {
            point.coords *= factor;
        }
        self.centroid.coords *= factor;
        self.max_norm *= factor;
    }

    /// Applies `p' = R·p + t` to every point and the centroid, and `R` alone
    /// to every normal.
    ///
    /// `rotation` is not validated; a non-orthonormal matrix produces a
    /// non-rigid result.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_pointcloud::PointCloud;
    /// use nalgebra::{Matrix3, Point3, Vector3};
    ///
    /// let mut cloud = PointCloud::new();
    /// cloud.add_points(&[Point3::new(1.0, 0.0, 0.0)]).unwrap();
    /// cloud.apply_registration(&Matrix3::identity(), &Vector3::new(0.0, 5.0, 0.0));
    ///
    /// assert_eq!(cloud.positions()[0], Point3::new(1.0, 5.0, 0.0));
    /// assert_eq!(cloud.centroid(), Point3::new(1.0, 5.0, 0.0));
    /// ```
    pub fn apply_registration(&mut self, rotation: &Matrix3<f64>, translation: &Vector3<f64>) {
        self.apply_transform(&Registration::new(*rotation, *translation));
    }

    /// Applies a [`Registration`]; see [`apply_registration`](Self::apply_registration).
    pub fn apply_transform(&mut self, registration: &Registration) {
        let mat = registration.to_homogeneous();
        for point in &mut self.positions {
            *point = Point3::from((mat * point.to_homogeneous()).xyz());
        }
        self.centroid = registration.transform_point(&self.centroid);

        for normal in &mut self.normals {
            *normal = registration.transform_vector(normal);
        }

        debug!(
            points = self.positions.len(),
            normals = self.normals.len(),
            "Applied registration"
        );
    }
}

/// Per-axis median at index `round(n / 2)`, or `None` for no points.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn axis_median(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }

    let n = points.len();
    let idx = ((n as f64 / 2.0).round() as usize).min(n - 1);
    let median = |axis: usize| {
        let mut values: Vec<f64> = points.iter().map(|p| p[axis]).collect();
        values.sort_by(f64::total_cmp);
        values[idx]
    };

    Some(Point3::new(median(0), median(1), median(2)))
}
