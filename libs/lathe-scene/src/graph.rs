//! # Scene Graph
//!
//! Nodes pair an uploaded mesh with a parent-relative transform and an
//! ordered child list. Nodes live in an arena and children are ids, so one
//! node (and its subtree) can hang under several parents. The graph is a
//! DAG: [`SceneGraph::add_child`] refuses edges that would close a cycle.
//!
//! ## Traversal
//!
//! Pre-order, children in list order, no sorting or culling:
//!
//! ```text
//! draw(node, linked):
//!     linked  → push; world = working × local
//!     root    → world = local
//!     renderer.draw(mesh, world)
//!     for child: draw(child, linked = true)
//!     linked  → pop
//! ```
//!
//! Matrices compose as `parent * local`, so a node's local transform is
//! applied to its geometry before any ancestor's.

use crate::error::{SceneError, SceneResult};
use crate::renderer::Renderer;
use crate::transform::TransformStack;
use glam::{DMat4, DVec3};
use lathe_mesh::CompiledMesh;
use std::fmt;
use tracing::{debug, trace};

/// Index of a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Index of an uploaded mesh in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(usize);

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

#[derive(Debug)]
struct MeshSlot<H> {
    mesh: CompiledMesh,
    handle: H,
}

/// A placed instance of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    mesh: MeshId,
    local_transform: DMat4,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn local_transform(&self) -> DMat4 {
        self.local_transform
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of uploaded meshes and the nodes placing them.
///
/// `H` is the renderer's mesh handle type.
#[derive(Debug)]
pub struct SceneGraph<H> {
    meshes: Vec<MeshSlot<H>>,
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
}

impl<H> Default for SceneGraph<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> SceneGraph<H> {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Uploads a compiled mesh once. Any number of nodes may then share it.
    pub fn add_mesh<R>(&mut self, renderer: &mut R, mesh: CompiledMesh) -> SceneResult<MeshId>
    where
        R: Renderer<Handle = H>,
    {
        let handle = renderer.upload(&mesh.to_buffers())?;
        let id = MeshId(self.meshes.len());
        debug!(
            %id,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "uploaded mesh"
        );
        self.meshes.push(MeshSlot { mesh, handle });
        Ok(id)
    }

    /// Adds a node with an identity transform and no children.
    pub fn add_node(&mut self, mesh: MeshId) -> SceneResult<NodeId> {
        self.add_node_with_transform(mesh, DMat4::IDENTITY)
    }

    /// Adds a node with the given local transform.
    pub fn add_node_with_transform(
        &mut self,
        mesh: MeshId,
        local_transform: DMat4,
    ) -> SceneResult<NodeId> {
        self.slot(mesh)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            mesh,
            local_transform,
            children: Vec::new(),
        });
        Ok(id)
    }

    /// Appends `child` to `parent`'s children.
    ///
    /// # Errors
    ///
    /// [`SceneError::Cycle`] if `parent` is `child` or one of its descendants.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.reaches(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Registers a node to be drawn by [`SceneGraph::draw_scene`].
    pub fn add_root(&mut self, node: NodeId) -> SceneResult<()> {
        self.node(node)?;
        self.roots.push(node);
        Ok(())
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn node(&self, id: NodeId) -> SceneResult<&SceneNode> {
        self.nodes.get(id.0).ok_or(SceneError::UnknownNode(id))
    }

    pub fn mesh(&self, id: MeshId) -> SceneResult<&CompiledMesh> {
        Ok(&self.slot(id)?.mesh)
    }

    /// Replaces a node's local transform.
    pub fn set_local_transform(&mut self, id: NodeId, transform: DMat4) -> SceneResult<()> {
        self.node_mut(id)?.local_transform = transform;
        Ok(())
    }

    /// Post-multiplies a node's local transform.
    pub fn apply_transform(&mut self, id: NodeId, transform: DMat4) -> SceneResult<()> {
        let node = self.node_mut(id)?;
        node.local_transform *= transform;
        Ok(())
    }

    /// Translates a node in its own local frame.
    pub fn translate(&mut self, id: NodeId, offset: DVec3) -> SceneResult<()> {
        self.apply_transform(id, DMat4::from_translation(offset))
    }

    /// Rotates a node about an axis of its own local frame.
    pub fn rotate(&mut self, id: NodeId, angle: f64, axis: DVec3) -> SceneResult<()> {
        self.apply_transform(id, rotation(angle, axis)?)
    }

    fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        self.nodes.get_mut(id.0).ok_or(SceneError::UnknownNode(id))
    }

    fn slot(&self, id: MeshId) -> SceneResult<&MeshSlot<H>> {
        self.meshes.get(id.0).ok_or(SceneError::UnknownMesh(id))
    }

    /// True if `target` is `from` or one of its descendants.
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut pending = vec![from];
        let mut visited = vec![false; self.nodes.len()];
        while let Some(id) = pending.pop() {
            if id == target {
                return true;
            }
            if std::mem::replace(&mut visited[id.0], true) {
                continue;
            }
            pending.extend(self.nodes[id.0].children.iter().copied());
        }
        false
    }
}

impl<H: Copy> SceneGraph<H> {
    /// Starts a frame and draws every root.
    ///
    /// Returns the number of draw calls issued.
    pub fn draw_scene<R>(&self, renderer: &mut R) -> SceneResult<usize>
    where
        R: Renderer<Handle = H>,
    {
        renderer.begin_frame()?;
        let mut drawn = 0;
        for &root in &self.roots {
            drawn += self.draw(renderer, root)?;
        }
        Ok(drawn)
    }

    /// Draws `root` and its subtree, taking the root's transform literally.
    ///
    /// Each call owns a fresh [`TransformStack`].
    pub fn draw<R>(&self, renderer: &mut R, root: NodeId) -> SceneResult<usize>
    where
        R: Renderer<Handle = H>,
    {
        let mut stack = TransformStack::new();
        let drawn = self.draw_node(renderer, &mut stack, root, false)?;
        debug_assert_eq!(stack.depth(), 0);
        Ok(drawn)
    }

    fn draw_node<R>(
        &self,
        renderer: &mut R,
        stack: &mut TransformStack,
        id: NodeId,
        linked: bool,
    ) -> SceneResult<usize>
    where
        R: Renderer<Handle = H>,
    {
        let node = self.node(id)?;
        if linked {
            let mut scope = stack.push();
            let world = scope.working() * node.local_transform;
            scope.set_working(world);
            self.draw_subtree(renderer, &mut scope, id, node)
        } else {
            stack.set_working(node.local_transform);
            self.draw_subtree(renderer, stack, id, node)
        }
    }

    fn draw_subtree<R>(
        &self,
        renderer: &mut R,
        stack: &mut TransformStack,
        id: NodeId,
        node: &SceneNode,
    ) -> SceneResult<usize>
    where
        R: Renderer<Handle = H>,
    {
        let handle = self.slot(node.mesh)?.handle;
        trace!(%id, depth = stack.depth(), "drawing node");
        renderer.draw(handle, &stack.working())?;

        let mut drawn = 1;
        for &child in &node.children {
            drawn += self.draw_node(renderer, stack, child, true)?;
        }
        Ok(drawn)
    }
}

/// Rotation matrix about an arbitrary axis.
pub fn rotation(angle: f64, axis: DVec3) -> SceneResult<DMat4> {
    let axis = axis.try_normalize().ok_or(SceneError::InvalidAxis(axis))?;
    Ok(DMat4::from_axis_angle(axis, angle))
}
