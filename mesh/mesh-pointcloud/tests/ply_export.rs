//! PLY export tests against the filesystem.
//!
//! Written files are re-read with `ply-rs` to check they parse as PLY.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use mesh_pointcloud::{CloudError, Color, PointCloud};
use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Encoding, Header, Payload, Property};

fn data_rows(text: &str) -> Vec<&str> {
    text.lines()
        .skip_while(|line| *line != "end_header")
        .skip(1)
        .collect()
}

fn parse(path: &Path) -> (Header, Payload<DefaultElement>) {
    let mut reader = BufReader::new(File::open(path).unwrap());
    let parser = Parser::<DefaultElement>::new();
    let header = parser.read_header(&mut reader).unwrap();
    let payload = parser.read_payload(&mut reader, &header).unwrap();
    (header, payload)
}

#[test]
fn two_point_gray_cloud() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two.ply");

    let mut cloud = PointCloud::new();
    cloud
        .add_points(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0)])
        .unwrap();
    cloud.write_ply(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("ply\nformat ascii 1.0\ncomment VCGLIB generated\n"));
    assert!(text.lines().any(|l| l == "element vertex 2"));
    assert!(text.lines().any(|l| l == "element face 0"));

    let rows = data_rows(&text);
    assert_eq!(rows, ["0 0 0 128 128 128 255", "1 2 3 128 128 128 255"]);
    assert!(rows.iter().all(|row| row.ends_with("128 128 128 255")));
}

#[test]
fn empty_cloud_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.ply");

    PointCloud::new().write_ply(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.lines().any(|l| l == "element vertex 0"));
    assert!(text.ends_with("end_header\n"));
    assert!(data_rows(&text).is_empty());
}

#[test]
fn output_parses_as_ply() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colored.ply");

    let colors = [
        Color::new(255, 0, 0),
        Color::new(0, 255, 0),
        Color::new(0, 0, 255),
    ];
    let mut cloud = PointCloud::new();
    cloud
        .add_points_with_colors(
            &[[0.5, 0.25, -1.0], [2.0, 4.0, 8.0], [-3.0, 0.0, 1.5]],
            &colors,
        )
        .unwrap();
    cloud.write_ply(&path).unwrap();

    let (header, payload) = parse(&path);
    assert!(matches!(header.encoding, Encoding::Ascii));
    assert!(header.elements.contains_key("face"));

    let vertices = payload.get("vertex").unwrap();
    assert_eq!(vertices.len(), 3);
    assert_eq!(payload.get("face").map_or(0, Vec::len), 0);

    for ((vertex, color), position) in vertices.iter().zip(&colors).zip(cloud.positions()) {
        assert!(matches!(vertex.get("red"), Some(Property::UChar(v)) if *v == color.r));
        assert!(matches!(vertex.get("green"), Some(Property::UChar(v)) if *v == color.g));
        assert!(matches!(vertex.get("blue"), Some(Property::UChar(v)) if *v == color.b));
        assert!(matches!(vertex.get("alpha"), Some(Property::UChar(v)) if *v == 255));

        match vertex.get("x") {
            Some(Property::Float(x)) => assert!((f64::from(*x) - position.x).abs() < 1e-6),
            other => panic!("unexpected x property: {other:?}"),
        }
    }
}

#[test]
fn export_after_transforms_reflects_current_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scaled.ply");

    let mut cloud = PointCloud::new();
    cloud.add_points(&[[1.0, 1.0, 1.0], [3.0, 3.0, 3.0]]).unwrap();
    cloud.center();
    cloud.scale(2.0);
    cloud.write_ply(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        data_rows(&text),
        ["-4 -4 -4 128 128 128 255", "0 0 0 128 128 128 255"]
    );
}

#[test]
fn unwritable_path_names_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.ply");

    let mut cloud = PointCloud::new();
    cloud.add_points(&[[0.0, 0.0, 0.0]]).unwrap();
    let result = cloud.write_ply(&path);

    match result {
        Err(CloudError::Export { path: target, .. }) => assert_eq!(target, path),
        other => panic!("expected export error, got {other:?}"),
    }
    assert!(!path.exists());
}
