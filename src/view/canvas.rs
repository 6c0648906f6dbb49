use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::GameError;
use crate::model::{Camera, MeshDesc, MeshId, Pose, SceneGraph, SceneNode};
use crate::view::RenderSurface;

const SKY: &str = "#87ceeb";

/// Box edges as corner index pairs; corners differ in exactly one axis bit
const EDGES: [(usize, usize); 12] = [
    (0, 1), (2, 3), (4, 5), (6, 7),
    (0, 2), (1, 3), (4, 6), (5, 7),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Debug view: keeps a `SceneGraph` and draws every node's bounding box
/// as a projected wireframe on a 2D canvas
pub struct CanvasRenderer {
    scene: SceneGraph,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, GameError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| GameError::Js("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::Js("not a 2d context".into()))?;
        Ok(Self {
            scene: SceneGraph::new(),
            canvas,
            ctx,
        })
    }

    fn draw_node(&self, node: &SceneNode, camera: &Camera, width: f32, height: f32) {
        let projected = node.corners().map(|c| camera.project(c, width, height));
        self.ctx.set_stroke_style_str(&format!("#{:06x}", node.color));
        self.ctx.begin_path();
        for (a, b) in EDGES {
            if let (Some(pa), Some(pb)) = (projected[a], projected[b]) {
                self.ctx.move_to(pa.x as f64, pa.y as f64);
                self.ctx.line_to(pb.x as f64, pb.y as f64);
            }
        }
        self.ctx.stroke();
    }
}

impl RenderSurface for CanvasRenderer {
    fn create_mesh(&mut self, desc: MeshDesc) -> MeshId {
        self.scene.create_mesh(desc)
    }

    fn set_transform(&mut self, mesh: MeshId, pose: Pose) {
        self.scene.set_transform(mesh, pose);
    }

    fn remove_mesh(&mut self, mesh: MeshId) -> bool {
        self.scene.remove_mesh(mesh)
    }

    fn render(&mut self, camera: &Camera) {
        self.scene.render(camera);

        let width = self.canvas.width() as f32;
        let height = self.canvas.height() as f32;
        self.ctx.set_fill_style_str(SKY);
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);

        for (_, node) in self.scene.nodes() {
            self.draw_node(node, camera, width, height);
        }
    }
}
