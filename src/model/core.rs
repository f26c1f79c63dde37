//! Core surface types: vertices, faces, geometry buffer and transparency table

use nalgebra::{Point3, Vector3};

use super::material::MaterialTable;

/// Highest transparency level the engine understands (fully transparent)
pub const MAX_TRANSPARENCY_LEVEL: u8 = 228;

/// A vertex of a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position relative to the surface's own origin
    pub position: Point3<f64>,
    /// Whether the vertex is marked round (`R`) for smooth shading
    pub is_smooth: bool,
}

impl Vertex {
    /// Create a flat-shaded vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            is_smooth: false,
        }
    }

    /// Create a vertex marked round
    pub fn smooth(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            is_smooth: true,
        }
    }
}

/// A polygon of a surface
///
/// `vertices` holds 0-based indices into the owning [`GeometryBuffer`] in wire
/// order, which is the reverse of the host editor's winding.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Vertex indices in wire order
    pub vertices: Vec<usize>,
    /// 1-based index into the surface's [`MaterialTable`], if the face has a color
    pub material: Option<usize>,
    /// Weighted median point of the polygon
    pub median: Point3<f64>,
    /// Face normal as written in the `N` line (zero for two-sided faces)
    pub normal: Vector3<f64>,
}

impl Face {
    /// Create a face without material and with zero median/normal
    pub fn new(vertices: Vec<usize>) -> Self {
        Self {
            vertices,
            material: None,
            median: Point3::origin(),
            normal: Vector3::zeros(),
        }
    }

    /// Create a face referencing a material table entry
    pub fn with_material(vertices: Vec<usize>, material: usize) -> Self {
        Self {
            material: Some(material),
            ..Self::new(vertices)
        }
    }

    /// Whether the face is flagged two-sided (zero normal)
    pub fn is_two_sided(&self) -> bool {
        self.normal == Vector3::zeros()
    }
}

/// Vertices and faces of one surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffer {
    /// Vertex list
    pub vertices: Vec<Vertex>,
    /// Face list
    pub faces: Vec<Face>,
}

impl GeometryBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with pre-allocated capacity
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Append a vertex and return its 0-based index
    pub fn push_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Append a face and return its 0-based index
    pub fn push_face(&mut self, face: Face) -> usize {
        self.faces.push(face);
        self.faces.len() - 1
    }

    /// Positions of a face's vertices in wire order
    ///
    /// Indices that do not resolve are skipped; run the validator first when
    /// that matters.
    pub fn face_points(&self, face: &Face) -> Vec<Point3<f64>> {
        face.vertices
            .iter()
            .filter_map(|&i| self.vertices.get(i).map(|v| v.position))
            .collect()
    }
}

/// One `(face, level)` pair of the `ZA` transparency table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransparencyEntry {
    /// 0-based face index
    pub face: usize,
    /// Transparency level, 0 (opaque) to [`MAX_TRANSPARENCY_LEVEL`]
    pub level: u8,
}

impl TransparencyEntry {
    /// Create an entry
    pub fn new(face: usize, level: u8) -> Self {
        Self { face, level }
    }

    /// Level for a material alpha: `round((1 - alpha) * 228)`
    ///
    /// Ties round to even, matching the exporter's `{:.0}` formatting.
    pub fn level_for_alpha(alpha: f64) -> u8 {
        let level = ((1.0 - alpha) * f64::from(MAX_TRANSPARENCY_LEVEL)).round_ties_even();
        level.clamp(0.0, f64::from(MAX_TRANSPARENCY_LEVEL)) as u8
    }

    /// Alpha that this entry's level stands for
    pub fn alpha(&self) -> f64 {
        1.0 - f64::from(self.level) / f64::from(MAX_TRANSPARENCY_LEVEL)
    }
}

/// A single SURF geometry block
#[derive(Debug, Clone, Default)]
pub struct Surface {
    /// File name of the block (`PCK` name inside a DNM, empty for bare SURF input)
    pub name: String,
    /// Vertices and faces
    pub geometry: GeometryBuffer,
    /// Deduplicated materials referenced by the faces
    pub materials: MaterialTable,
    /// Transparency side table, in face-discovery order
    pub transparency: Vec<TransparencyEntry>,
}

impl Surface {
    /// Create an empty surface with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Transparency level recorded for a face, if any
    pub fn transparency_of(&self, face: usize) -> Option<u8> {
        self.transparency
            .iter()
            .find(|entry| entry.face == face)
            .map(|entry| entry.level)
    }

    /// Name with everything from the first `.` stripped
    ///
    /// `parts/wing.srf` becomes `parts/wing`. Used both for the ground PCK
    /// header and for naming meshes on import.
    pub fn base_name(&self) -> &str {
        match self.name.find('.') {
            Some(dot) => &self.name[..dot],
            None => &self.name,
        }
    }
}
