//! Scene-graph discovery and uid assignment for DNM export
//!
//! An [`ExportSession`] owns the per-run state: the uid counter and the set of
//! node names already queued. A [`SceneGraphBuilder`] walks a [`HostScene`]
//! with that session and produces one [`SceneSurface`] per visible mesh node,
//! in pre-order: a node's uid is claimed before any of its children are
//! visited.

use log::{debug, trace};
use nalgebra::Vector3;
use std::collections::HashMap;

use crate::convert::surface_from_host;
use crate::error::{Error, Result};
use crate::host::{HostNode, HostScene, NodeId};
use crate::model::{ExportConfig, Placement, SrfNode, Surface};
use crate::transform::{CoordinateTransform, to_fixed_angles};

/// Directory prefix of side files in the exploded layouts
pub const PARTS_DIR: &str = "parts";

/// Per-export-run state
///
/// Create one per export. Reusing a session across runs requires
/// [`ExportSession::reset`] in between, otherwise uids keep counting and
/// previously exported nodes are skipped.
#[derive(Debug, Clone)]
pub struct ExportSession {
    config: ExportConfig,
    next_uid: u32,
    queued: HashMap<String, u32>,
}

impl ExportSession {
    /// Start a session with uid 0 and nothing queued
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            next_uid: 0,
            queued: HashMap::new(),
        }
    }

    /// Configuration of this run
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Uid the next discovered node will get
    pub fn next_uid(&self) -> u32 {
        self.next_uid
    }

    /// Uid assigned to a node name, if it was queued in this run
    pub fn queued_uid(&self, name: &str) -> Option<u32> {
        self.queued.get(name).copied()
    }

    /// Forget all uids and queued nodes
    pub fn reset(&mut self) {
        self.next_uid = 0;
        self.queued.clear();
    }

    fn claim(&mut self, name: &str) -> u32 {
        let uid = self.next_uid;
        self.next_uid += 1;
        self.queued.insert(name.to_string(), uid);
        uid
    }
}

/// One discovered mesh node with its uid and child links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSurface {
    /// Uid claimed in discovery order
    pub uid: u32,
    /// Node in the host scene
    pub node: NodeId,
    /// Name of the PCK block or side file (`<name>.srf` or `parts/<name>.srf`)
    pub file_name: String,
    /// Uids of exportable direct children, in host order
    pub children: Vec<u32>,
}

impl SceneSurface {
    /// Encode the node's geometry as a wire surface
    pub fn pck_surface(&self, scene: &HostScene, config: &ExportConfig) -> Result<Surface> {
        surface_from_host(self.host_node(scene)?, &self.file_name, config)
    }

    /// Build the SRF descriptor for this node
    ///
    /// A root node, or a node whose parent sits at the origin, gets a zero
    /// `POS` translation and its own location as `CNT`. Any other node gets
    /// its offset from the parent as `POS` and a zero `CNT`.
    pub fn srf_node(&self, scene: &HostScene, config: &ExportConfig) -> Result<SrfNode> {
        let node = self.host_node(scene)?;
        let transform = CoordinateTransform::export(config.scale);
        let local_axis = transform.transform_vector(&node.location);

        let parent_axis = match node.parent {
            Some(parent) => {
                let parent = scene.node(parent).ok_or_else(|| {
                    Error::Reference(format!(
                        "Node '{}' has parent id {} which is not in the scene",
                        node.name, parent
                    ))
                })?;
                Some(transform.transform_vector(&parent.location))
            }
            None => None,
        };

        let mut srf = SrfNode::new(self.uid, self.file_name.clone());
        srf.rotation = to_fixed_angles(&node.rotation);
        srf.children = self.children.clone();
        match parent_axis {
            Some(parent_axis) if parent_axis != Vector3::zeros() => {
                srf.position = local_axis - parent_axis;
                srf.placement = Placement::Offset;
            }
            _ => {
                srf.center = local_axis;
            }
        }
        Ok(srf)
    }

    fn host_node<'s>(&self, scene: &'s HostScene) -> Result<&'s HostNode> {
        scene.node(self.node).ok_or_else(|| {
            Error::Reference(format!(
                "SRF \"{:04}\" refers to node id {} which is not in the scene",
                self.uid, self.node
            ))
        })
    }
}

/// Walks a host scene and assigns uids in pre-order
pub struct SceneGraphBuilder<'a> {
    scene: &'a HostScene,
    session: &'a mut ExportSession,
    surfaces: Vec<SceneSurface>,
}

impl<'a> SceneGraphBuilder<'a> {
    /// Create a builder over `scene` that draws uids from `session`
    pub fn new(scene: &'a HostScene, session: &'a mut ExportSession) -> Self {
        Self {
            scene,
            session,
            surfaces: Vec::new(),
        }
    }

    /// Discover every exportable node, visiting scene nodes in order
    ///
    /// Nodes reached earlier as someone's child are not queued again.
    pub fn discover_all(mut self) -> Vec<SceneSurface> {
        for id in self.scene.ids() {
            self.add_root(id);
        }
        self.surfaces
    }

    /// Discover one node and its exportable descendants
    ///
    /// Does nothing if the node is hidden, has no mesh, or was already queued.
    pub fn add_root(&mut self, id: NodeId) -> &mut Self {
        let Some(node) = self.scene.node(id) else {
            return self;
        };
        if node.is_exportable() && self.session.queued_uid(&node.name).is_none() {
            self.visit(id);
        }
        self
    }

    /// Finish and return the discovered surfaces in discovery order
    pub fn finish(self) -> Vec<SceneSurface> {
        self.surfaces
    }

    fn visit(&mut self, id: NodeId) -> u32 {
        let scene = self.scene;
        let node = &scene.nodes()[id];
        let uid = self.session.claim(&node.name);
        let file_name = if self.session.config().layout.uses_parts() {
            format!("{}/{}.srf", PARTS_DIR, node.name)
        } else {
            format!("{}.srf", node.name)
        };
        debug!("Queued node '{}' as uid {} ({})", node.name, uid, file_name);

        let slot = self.surfaces.len();
        self.surfaces.push(SceneSurface {
            uid,
            node: id,
            file_name,
            children: Vec::new(),
        });

        for &child_id in &node.children {
            let Some(child) = scene.node(child_id) else {
                continue;
            };
            if !child.is_exportable() {
                trace!("Skipping child '{}' of '{}'", child.name, node.name);
                continue;
            }
            let child_uid = match self.session.queued_uid(&child.name) {
                Some(existing) => existing,
                None => self.visit(child_id),
            };
            self.surfaces[slot].children.push(child_uid);
        }

        uid
    }
}
