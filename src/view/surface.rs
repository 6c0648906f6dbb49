use crate::model::{Camera, MeshDesc, MeshId, Pose};

/// Where meshes live and get drawn. The frame loop only talks to this.
pub trait RenderSurface {
    fn create_mesh(&mut self, desc: MeshDesc) -> MeshId;

    /// Unknown or removed meshes are ignored
    fn set_transform(&mut self, mesh: MeshId, pose: Pose);

    /// Returns false if the mesh was not present
    fn remove_mesh(&mut self, mesh: MeshId) -> bool;

    fn render(&mut self, camera: &Camera);
}
