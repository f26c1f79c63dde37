//! Polygon geometry used when building and importing surfaces
//!
//! This module provides:
//! - Face normal calculation for arbitrary polygons (Newell's method)
//! - Edge-length weighted face median
//! - Area-weighted vertex normals
//!
//! Faces in SURF data are n-gons, not triangles, so every routine here takes
//! a polygon as an ordered list of points.

use nalgebra::{Point3, Vector3};

/// Unnormalized polygon normal by Newell's method
///
/// For a planar polygon the magnitude is twice its area. The direction follows
/// the right-hand rule over the given point order.
fn newell(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut n = Vector3::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        n.x += (current.y - next.y) * (current.z + next.z);
        n.y += (current.z - next.z) * (current.x + next.x);
        n.z += (current.x - next.x) * (current.y + next.y);
    }
    n
}

/// Calculate the unit normal of a polygon
///
/// Returns a zero vector for polygons with fewer than three points or with
/// zero area.
///
/// # Example
/// ```
/// use nalgebra::Point3;
/// use surfdnm::mesh_ops::polygon_normal;
///
/// let square = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let n = polygon_normal(&square);
/// assert!((n.z - 1.0).abs() < 1e-12);
/// ```
pub fn polygon_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    if points.len() < 3 {
        return Vector3::zeros();
    }
    let n = newell(points);
    let magnitude = n.norm();
    if magnitude > 0.0 {
        n / magnitude
    } else {
        Vector3::zeros()
    }
}

/// Edge-length weighted median of a polygon
///
/// Each corner is weighted by the summed length of its two incident polygon
/// edges, so long thin faces get a median near their geometric middle rather
/// than near a cluster of close vertices. Falls back to the plain average when
/// every edge has zero length.
pub fn polygon_median_weighted(points: &[Point3<f64>]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }

    let count = points.len();
    let edge_length = |i: usize| (points[(i + 1) % count] - points[i]).norm();

    let mut sum = Vector3::zeros();
    let mut total = 0.0;
    let mut previous = edge_length(count - 1);
    for (i, point) in points.iter().enumerate() {
        let current = edge_length(i);
        let weight = previous + current;
        sum += point.coords * weight;
        total += weight;
        previous = current;
    }

    if total > 0.0 {
        Point3::from(sum / total)
    } else {
        let mean = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / count as f64;
        Point3::from(mean)
    }
}

/// Calculate area-weighted vertex normals for a polygon mesh
///
/// For each vertex, sums the unnormalized Newell normals of every polygon
/// using it (their magnitude is proportional to polygon area), then
/// normalizes. Faces with out-of-range indices or zero area are skipped;
/// unreferenced vertices get a zero normal.
pub fn vertex_normals(positions: &[Point3<f64>], faces: &[Vec<usize>]) -> Vec<Vector3<f64>> {
    let mut normals = vec![Vector3::zeros(); positions.len()];

    for face in faces {
        if face.len() < 3 || face.iter().any(|&i| i >= positions.len()) {
            continue;
        }
        let points: Vec<Point3<f64>> = face.iter().map(|&i| positions[i]).collect();
        let weighted = newell(&points);
        if weighted.norm() > 0.0 {
            for &i in face {
                normals[i] += weighted;
            }
        }
    }

    normals
        .into_iter()
        .map(|n| {
            let magnitude = n.norm();
            if magnitude > 0.0 { n / magnitude } else { n }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_polygon_normal_triangle() {
        let tri = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let n = polygon_normal(&tri);
        assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_polygon_normal_reversed_winding() {
        let mut square = unit_square();
        square.reverse();
        let n = polygon_normal(&square);
        assert!((n - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_polygon_normal_degenerate() {
        let line = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(polygon_normal(&line), Vector3::zeros());
        assert_eq!(polygon_normal(&line[..2]), Vector3::zeros());
    }

    #[test]
    fn test_median_of_square_is_center() {
        let m = polygon_median_weighted(&unit_square());
        assert!((m - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_median_weights_by_edge_length() {
        // A long rectangle with an extra vertex near one corner: the plain
        // average drifts toward the cluster, the weighted median does not.
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.1, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let weighted = polygon_median_weighted(&points);
        let plain_x = points.iter().map(|p| p.x).sum::<f64>() / points.len() as f64;
        assert!((weighted.x - 5.0).abs() < (plain_x - 5.0).abs());
    }

    #[test]
    fn test_median_degenerate_falls_back_to_mean() {
        let p = Point3::new(2.0, 3.0, 4.0);
        assert_eq!(polygon_median_weighted(&[p, p, p]), p);
        assert_eq!(polygon_median_weighted(&[]), Point3::origin());
    }

    #[test]
    fn test_vertex_normals_cube_corner() {
        // Three faces of a cube meeting at the origin, all facing outward.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ];
        let faces = vec![
            vec![0, 2, 4, 1], // z = 0, normal -z
            vec![0, 1, 6, 3], // y = 0, normal -y
            vec![0, 3, 5, 2], // x = 0, normal -x
        ];
        let normals = vertex_normals(&positions, &faces);
        let expected = -Vector3::new(1.0, 1.0, 1.0).normalize();
        assert!((normals[0] - expected).norm() < 1e-12);
    }

    #[test]
    fn test_vertex_normals_skip_invalid_faces() {
        let positions = unit_square();
        let faces = vec![vec![0, 1, 9], vec![0, 1, 2, 3]];
        let normals = vertex_normals(&positions, &faces);
        for n in &normals {
            assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        }
    }
}
