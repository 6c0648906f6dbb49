use std::collections::BTreeMap;

use glam::Vec3;
use tracing::trace;

use crate::model::{Camera, Pose};
use crate::view::RenderSurface;

/// Opaque handle to a mesh living in a render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u32);

impl MeshId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// Axis-aligned box with full edge lengths
    Box { size: Vec3 },
    /// Flat plane in the local XZ plane
    Plane { width: f32, depth: f32 },
    /// Upright cylinder (local Y axis)
    Cylinder { radius: f32, height: f32 },
}

impl MeshShape {
    /// Half extents of the local bounding box
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            MeshShape::Box { size } => size * 0.5,
            MeshShape::Plane { width, depth } => Vec3::new(width * 0.5, 0.0, depth * 0.5),
            MeshShape::Cylinder { radius, height } => Vec3::new(radius, height * 0.5, radius),
        }
    }
}

/// What to create: shape, 0xRRGGBB colour and initial pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDesc {
    pub shape: MeshShape,
    pub color: u32,
    pub pose: Pose,
}

impl MeshDesc {
    pub fn new(shape: MeshShape, color: u32, pose: Pose) -> Self {
        Self { shape, color, pose }
    }
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub shape: MeshShape,
    pub color: u32,
    pub pose: Pose,
}

impl SceneNode {
    /// World-space corners of the node's oriented bounding box
    pub fn corners(&self) -> [Vec3; 8] {
        let h = self.shape.half_extents();
        let mut out = [Vec3::ZERO; 8];
        for (i, corner) in out.iter_mut().enumerate() {
            let local = Vec3::new(
                if i & 1 == 0 { -h.x } else { h.x },
                if i & 2 == 0 { -h.y } else { h.y },
                if i & 4 == 0 { -h.z } else { h.z },
            );
            *corner = self.pose.transform_point(local);
        }
        out
    }
}

/// Retained scene: every visible mesh and its current pose
#[derive(Default)]
pub struct SceneGraph {
    nodes: BTreeMap<MeshId, SceneNode>,
    next_id: u32,
    frames_rendered: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mesh: MeshId) -> Option<&SceneNode> {
        self.nodes.get(&mesh)
    }

    pub fn contains(&self, mesh: MeshId) -> bool {
        self.nodes.contains_key(&mesh)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (MeshId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl RenderSurface for SceneGraph {
    fn create_mesh(&mut self, desc: MeshDesc) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            SceneNode {
                shape: desc.shape,
                color: desc.color,
                pose: desc.pose,
            },
        );
        id
    }

    fn set_transform(&mut self, mesh: MeshId, pose: Pose) {
        if let Some(node) = self.nodes.get_mut(&mesh) {
            node.pose = pose;
        }
    }

    fn remove_mesh(&mut self, mesh: MeshId) -> bool {
        self.nodes.remove(&mesh).is_some()
    }

    fn render(&mut self, camera: &Camera) {
        self.frames_rendered += 1;
        trace!(
            nodes = self.nodes.len(),
            eye = ?camera.eye,
            "scene rendered"
        );
    }
}
