//! ASCII PLY export.
//!
//! Writes positions and colors as a vertex-only PLY. The face element is
//! always declared with zero entries and alpha is always 255.
//!
//! ```text
//! ply
//! format ascii 1.0
//! comment VCGLIB generated
//! element vertex <n>
//! property float x
//! property float y
//! property float z
//! property uchar red
//! property uchar green
//! property uchar blue
//! property uchar alpha
//! element face 0
//! property list uchar int vertex_indices
//! end_header
//! <x> <y> <z> <r> <g> <b> 255
//! ```

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::cloud::PointCloud;
use crate::error::{CloudError, CloudResult};

const ALPHA: u8 = 255;

impl PointCloud {
    /// Writes the cloud to `path` as ASCII PLY.
    ///
    /// The file is written next to `path` under a temporary name and moved
    /// into place once fully flushed, so a failed export leaves any existing
    /// file at `path` intact. An empty cloud produces a header declaring
    /// zero vertices.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Export`] naming `path` if the file cannot be
    /// created, written or moved into place.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mesh_pointcloud::PointCloud;
    ///
    /// let mut cloud = PointCloud::new();
    /// cloud.add_points(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]).unwrap();
    /// cloud.write_ply("cloud.ply").unwrap();
    /// ```
    pub fn write_ply<P: AsRef<Path>>(&self, path: P) -> CloudResult<()> {
        let path = path.as_ref();
        write_replacing(path, |writer| write_ply_body(self, writer))?;

        info!(path = %path.display(), vertices = self.len(), "Exported point cloud");
        Ok(())
    }
}

/// Runs `write` against a temporary file beside `path`, then renames it
/// over `path`. On any failure the temporary file is removed.
fn write_replacing<F>(path: &Path, write: F) -> CloudResult<()>
where
    F: FnOnce(&mut BufWriter<NamedTempFile>) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file = NamedTempFile::new_in(dir).map_err(|e| CloudError::export(path, e))?;
    let mut writer = BufWriter::new(file);

    write(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|e| CloudError::export(path, e))?;

    let file = writer
        .into_inner()
        .map_err(|e| CloudError::export(path, e.into_error()))?;
    file.persist(path)
        .map_err(|e| CloudError::export(path, e.error))?;
    Ok(())
}

/// Writes the cloud as ASCII PLY to any writer.
///
/// # Errors
///
/// Returns [`CloudError::Io`] if the writer fails.
///
/// # Example
///
/// ```
/// use mesh_pointcloud::{write_ply_to, PointCloud};
///
/// let mut cloud = PointCloud::new();
/// cloud.add_points(&[[1.0, 2.0, 3.0]]).unwrap();
///
/// let mut out = Vec::new();
/// write_ply_to(&cloud, &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.ends_with("1 2 3 128 128 128 255\n"));
/// ```
pub fn write_ply_to<W: Write>(cloud: &PointCloud, writer: &mut W) -> CloudResult<()> {
    write_ply_body(cloud, writer)?;
    Ok(())
}

fn write_ply_body<W: Write>(cloud: &PointCloud, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment VCGLIB generated")?;
    writeln!(writer, "element vertex {}", cloud.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "property uchar alpha")?;
    writeln!(writer, "element face 0")?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for (p, c) in cloud.positions().iter().zip(cloud.colors()) {
        writeln!(
            writer,
            "{} {} {} {} {} {} {ALPHA}",
            p.x, p.y, p.z, c.r, c.g, c.b
        )?;
    }

    Ok(())
}
