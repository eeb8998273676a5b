/// Painter's-algorithm renderer for the cube
use log::trace;
use nalgebra::Point2;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::canvas::Canvas;
use crate::geometry::{EdgeId, FaceId, Mesh};
use crate::projection::Projector;
use crate::shading::shade;

pub const DEFAULT_LINE_WIDTH: u32 = 3;
pub const DEFAULT_POINT_RADIUS: f32 = 5.0;

/// Which primitive the painter draws the cube with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Depth-sorted filled faces
    #[default]
    Faces,
    /// One shaded line per edge
    Edges,
    /// One shaded dot per vertex
    Points,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [RenderMode::Faces, RenderMode::Edges, RenderMode::Points];

    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Faces => "faces",
            RenderMode::Edges => "edges",
            RenderMode::Points => "points",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown render mode '{0}' (expected faces, edges or points)")]
pub struct UnknownRenderMode(pub String);

impl FromStr for RenderMode {
    type Err = UnknownRenderMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRenderMode(s.to_string()))
    }
}

/// A face together with the mean z of its corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceDepth {
    pub depth: f32,
    pub face: FaceId,
}

/// Draws a mesh onto a canvas in one of the [`RenderMode`]s
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Painter {
    pub projector: Projector,
    pub mode: RenderMode,
    pub line_width: u32,
    pub point_radius: f32,
}

impl Painter {
    pub fn new(projector: Projector, mode: RenderMode) -> Self {
        Self {
            projector,
            mode,
            line_width: DEFAULT_LINE_WIDTH,
            point_radius: DEFAULT_POINT_RADIUS,
        }
    }

    /// Faces ordered farthest first (largest mean z first).
    ///
    /// The sort is stable, so faces at equal depth keep topology order and
    /// the draw sequence does not flicker between frames.
    pub fn depth_order(mesh: &Mesh) -> Vec<FaceDepth> {
        let mut order: Vec<FaceDepth> = FaceId::all()
            .map(|face| FaceDepth {
                depth: mesh.face_depth(face),
                face,
            })
            .collect();
        order.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        order
    }

    pub fn render<C: Canvas>(&self, mesh: &Mesh, canvas: &mut C) {
        match self.mode {
            RenderMode::Faces => self.draw_faces(mesh, canvas),
            RenderMode::Edges => self.draw_edges(mesh, canvas),
            RenderMode::Points => self.draw_points(mesh, canvas),
        }
    }

    fn draw_faces<C: Canvas>(&self, mesh: &Mesh, canvas: &mut C) {
        let order = Self::depth_order(mesh);
        trace!(
            "face order: {:?}",
            order.iter().map(|f| f.face.index()).collect::<Vec<_>>()
        );
        for FaceDepth { depth, face } in order {
            let quad: [Point2<f32>; 4] = mesh
                .face_vertices(face)
                .map(|v| self.projector.to_screen(&v, mesh.anchor()));
            canvas.draw_polygon(shade(depth), &quad, true);
        }
    }

    fn draw_edges<C: Canvas>(&self, mesh: &Mesh, canvas: &mut C) {
        for edge in EdgeId::all() {
            let [a, b] = mesh.edge_vertices(edge);
            canvas.draw_line(
                shade(a.z.min(b.z)),
                self.projector.to_screen(&a, mesh.anchor()),
                self.projector.to_screen(&b, mesh.anchor()),
                self.line_width,
            );
        }
    }

    fn draw_points<C: Canvas>(&self, mesh: &Mesh, canvas: &mut C) {
        for vertex in mesh.vertices() {
            canvas.draw_circle(
                shade(vertex.z),
                self.projector.to_screen(vertex, mesh.anchor()),
                self.point_radius,
            );
        }
    }
}

impl Default for Painter {
    fn default() -> Self {
        Self::new(Projector::default(), RenderMode::default())
    }
}
