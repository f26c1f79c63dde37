//! Host-editor side of the codec
//!
//! These types stand in for the 3D editor the codec is embedded in. An editor
//! bridge fills a [`HostScene`] with mesh nodes before export, and turns each
//! [`ImportedMesh`] back into editor objects after import. Coordinates here are
//! in the editor's own axes (right-handed, Z up).

use nalgebra::{Matrix4, Point3, Rotation3, Vector3};

/// Index of a node inside its [`HostScene`]
pub type NodeId = usize;

/// Editor material as seen by the exporter
#[derive(Debug, Clone, PartialEq)]
pub struct HostMaterial {
    /// Display name
    pub name: String,
    /// Diffuse color, each channel 0..1
    pub diffuse: [f64; 3],
    /// Emission strength; anything above zero means self-illuminated
    pub emit: f64,
    /// Opacity, 1.0 fully opaque
    pub alpha: f64,
}

impl HostMaterial {
    /// Create an opaque, non-emitting material
    pub fn new(name: impl Into<String>, diffuse: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            diffuse,
            emit: 0.0,
            alpha: 1.0,
        }
    }

    /// Set emission strength
    pub fn with_emit(mut self, emit: f64) -> Self {
        self.emit = emit;
        self
    }

    /// Set opacity
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Editor vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostVertex {
    /// Position in object space
    pub position: Point3<f64>,
    /// Every edge touching this vertex is marked smooth
    pub smooth_edges: bool,
}

impl HostVertex {
    /// Create a vertex whose edges are all smooth
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            smooth_edges: true,
        }
    }

    /// Create a vertex touching at least one sharp edge
    pub fn sharp(x: f64, y: f64, z: f64) -> Self {
        Self {
            smooth_edges: false,
            ..Self::new(x, y, z)
        }
    }
}

/// Editor polygon
#[derive(Debug, Clone, PartialEq)]
pub struct HostFace {
    /// 0-based vertex indices in the editor's winding
    pub vertices: Vec<usize>,
    /// Index into the mesh's material slots
    pub material: Option<usize>,
    /// Smooth shading requested
    pub smooth: bool,
}

impl HostFace {
    /// Create a flat-shaded face without material
    pub fn new(vertices: Vec<usize>) -> Self {
        Self {
            vertices,
            material: None,
            smooth: false,
        }
    }

    /// Assign a material slot
    pub fn with_material(mut self, slot: usize) -> Self {
        self.material = Some(slot);
        self
    }

    /// Request smooth shading
    pub fn smooth(mut self) -> Self {
        self.smooth = true;
        self
    }
}

/// Editor polygon mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostMesh {
    /// Vertices
    pub vertices: Vec<HostVertex>,
    /// Polygons
    pub faces: Vec<HostFace>,
    /// Material slots
    pub materials: Vec<HostMaterial>,
}

impl HostMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }
}

/// An object in the editor's scene
#[derive(Debug, Clone)]
pub struct HostNode {
    /// Object name, unique within the scene
    pub name: String,
    /// Mesh data; `None` for lamps, cameras, empties
    pub mesh: Option<HostMesh>,
    /// Visible in the current scene
    pub visible: bool,
    /// Location relative to the parent
    pub location: Vector3<f64>,
    /// Euler rotation (XYZ, radians) relative to the parent
    pub rotation: Vector3<f64>,
    /// Object-to-world matrix
    pub world_matrix: Matrix4<f64>,
    /// Parent node
    pub parent: Option<NodeId>,
    /// Direct children, in editor order
    pub children: Vec<NodeId>,
}

impl HostNode {
    /// Create a visible mesh object at the origin
    pub fn mesh(name: impl Into<String>, mesh: HostMesh) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            visible: true,
            location: Vector3::zeros(),
            rotation: Vector3::zeros(),
            world_matrix: Matrix4::identity(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a visible object without mesh data
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            mesh: None,
            ..Self::mesh(name, HostMesh::new())
        }
    }

    /// Set location and rotation relative to the parent
    ///
    /// The world matrix is recomputed when the node is added to a scene.
    pub fn with_transform(mut self, location: Vector3<f64>, rotation: Vector3<f64>) -> Self {
        self.location = location;
        self.rotation = rotation;
        self
    }

    /// Hide the node
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Local matrix from location and XYZ Euler rotation
    pub fn local_matrix(&self) -> Matrix4<f64> {
        let rotation =
            Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z);
        Matrix4::new_translation(&self.location) * rotation.to_homogeneous()
    }

    /// Whether the exporter picks this node up
    pub fn is_exportable(&self) -> bool {
        self.visible && self.mesh.is_some()
    }
}

/// A flat arena of editor objects with parent/child links
#[derive(Debug, Clone, Default)]
pub struct HostScene {
    nodes: Vec<HostNode>,
}

impl HostScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level node
    pub fn add(&mut self, mut node: HostNode) -> NodeId {
        node.parent = None;
        node.world_matrix = node.local_matrix();
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Add a node under `parent`, composing its world matrix with the parent's
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn add_child(&mut self, parent: NodeId, mut node: HostNode) -> Option<NodeId> {
        let parent_world = self.nodes.get(parent)?.world_matrix;
        node.parent = Some(parent);
        node.world_matrix = parent_world * node.local_matrix();
        self.nodes.push(node);
        let id = self.nodes.len() - 1;
        self.nodes[parent].children.push(id);
        Some(id)
    }

    /// Node by id
    pub fn node(&self, id: NodeId) -> Option<&HostNode> {
        self.nodes.get(id)
    }

    /// Mutable node by id
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut HostNode> {
        self.nodes.get_mut(id)
    }

    /// Node by name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// All nodes in scene order
    pub fn nodes(&self) -> &[HostNode] {
        &self.nodes
    }

    /// Ids of all nodes, in scene order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.nodes.len()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// One mesh produced by import, in editor axes
///
/// Faces are wound in the editor's order again, materials are listed in table
/// order, and per-face shading data is precomputed for the bridge.
#[derive(Debug, Clone)]
pub struct ImportedMesh {
    /// Mesh name (PCK or file name without extension)
    pub name: String,
    /// Vertices, faces and materials
    pub mesh: HostMesh,
    /// Unit face normals recomputed after the inverse transform
    pub face_normals: Vec<Vector3<f64>>,
    /// Area-weighted vertex normals
    pub vertex_normals: Vec<Vector3<f64>>,
    /// Opacity per face from the transparency table, 1.0 when absent
    pub face_alpha: Vec<f64>,
}
