//! In-memory point cloud accumulation, normalisation and rigid registration.
//!
//! This crate provides a [`PointCloud`] container that collects 3D points
//! with per-point colors (and optional normals), tracks a robust centroid,
//! and applies normalisation, centering, scaling and rigid registration to
//! the stored geometry:
//!
//! - **Ingestion** - Append points as `Point3`, `[f64; 3]` or `Vector3`
//! - **Centroid** - Per-axis median, insensitive to outliers
//! - **Transforms** - Normalise into the unit ball, center, scale
//! - **Registration** - Apply `p' = R·p + t` from an external aligner
//! - **Export** - ASCII PLY with per-vertex color
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no engine dependencies. Registration
//! parameters are computed elsewhere (ICP, landmark alignment); this crate
//! only applies them.
//!
//! # Quick Start
//!
//! ```
//! use mesh_pointcloud::{Color, PointCloud};
//! use nalgebra::{Matrix3, Point3, Vector3};
//!
//! let mut cloud = PointCloud::new();
//! cloud
//!     .add_points_with_colors(
//!         &[Point3::new(2.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)],
//!         &[Color::new(255, 0, 0), Color::new(0, 255, 0)],
//!     )
//!     .unwrap();
//!
//! // Shift so the median sits at the origin, then fit into the unit ball
//! cloud.center();
//! cloud.normalise();
//! assert_eq!(cloud.max_norm(), 1.0);
//!
//! // Move into another frame
//! cloud.apply_registration(&Matrix3::identity(), &Vector3::new(0.0, 0.0, 1.0));
//! assert_eq!(cloud.len(), 2);
//! ```
//!
//! # Concurrency
//!
//! A cloud is plain owned data with no internal synchronization. Share it
//! across threads behind a `Mutex` if several threads must mutate it.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod cloud;
mod color;
mod error;
mod params;
mod ply;
mod registration;

pub use cloud::PointCloud;
pub use color::Color;
pub use error::{CloudError, CloudResult};
pub use params::CloudParams;
pub use ply::write_ply_to;
pub use registration::Registration;
