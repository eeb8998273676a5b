/// Cube mesh: a live vertex buffer plus fixed index topology
use log::debug;
use nalgebra::{Point2, Point3};

/// A vertex in object-local space, centred on the cube's own origin
pub type Vertex = Point3<f32>;

/// Screen-space translation applied after projection
pub type Anchor = Point2<f32>;

pub const VERTEX_COUNT: usize = 8;
pub const EDGE_COUNT: usize = 12;
pub const FACE_COUNT: usize = 6;

/// Half edge length of the working cube
pub const DEFAULT_SCALE: f32 = 40.0;

const UNIT_CORNERS: [[f32; 3]; VERTEX_COUNT] = [
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
];

// Top ring, bottom ring, then the verticals joining them.
const EDGES: [[usize; 2]; EDGE_COUNT] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

const FACES: [[usize; 4]; FACE_COUNT] = [
    [0, 1, 2, 3],
    [0, 1, 5, 4],
    [0, 4, 7, 3],
    [2, 3, 7, 6],
    [5, 4, 7, 6],
    [1, 2, 6, 5],
];

/// Index of one of the cube's six faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(usize);

impl FaceId {
    /// Returns `None` when `index` is not a face of the cube
    pub fn new(index: usize) -> Option<Self> {
        (index < FACE_COUNT).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// All faces in topology order
    pub fn all() -> impl Iterator<Item = FaceId> {
        (0..FACE_COUNT).map(FaceId)
    }

    /// Vertex indices of this face, in winding order
    pub fn indices(self) -> [usize; 4] {
        FACES[self.0]
    }
}

/// Index of one of the cube's twelve edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn new(index: usize) -> Option<Self> {
        (index < EDGE_COUNT).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn all() -> impl Iterator<Item = EdgeId> {
        (0..EDGE_COUNT).map(EdgeId)
    }

    pub fn indices(self) -> [usize; 2] {
        EDGES[self.0]
    }
}

/// The cube being animated.
///
/// Only vertex positions ever change; faces and edges are stored as indices
/// into the vertex buffer, so every lookup sees the latest rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: [Vertex; VERTEX_COUNT],
    anchor: Anchor,
}

impl Mesh {
    /// Build the unit cube, scaled by `scale`, anchored at `anchor` on screen
    pub fn create(anchor: Anchor, scale: f32) -> Self {
        let vertices = UNIT_CORNERS.map(|[x, y, z]| Point3::new(x * scale, y * scale, z * scale));
        debug!(
            "created cube mesh: scale {scale}, anchor ({}, {})",
            anchor.x, anchor.y
        );
        Self { vertices, anchor }
    }

    pub fn vertices(&self) -> &[Vertex; VERTEX_COUNT] {
        &self.vertices
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex; VERTEX_COUNT] {
        &mut self.vertices
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    /// Face topology: four vertex indices per face, in winding order
    pub fn faces(&self) -> &'static [[usize; 4]; FACE_COUNT] {
        &FACES
    }

    /// Edge topology: two vertex indices per edge
    pub fn edges(&self) -> &'static [[usize; 2]; EDGE_COUNT] {
        &EDGES
    }

    /// Current positions of the face's four corners
    pub fn face_vertices(&self, face: FaceId) -> [Vertex; 4] {
        face.indices().map(|i| self.vertices[i])
    }

    /// Current positions of the edge's two endpoints
    pub fn edge_vertices(&self, edge: EdgeId) -> [Vertex; 2] {
        edge.indices().map(|i| self.vertices[i])
    }

    /// Mean z of the face's corners
    pub fn face_depth(&self, face: FaceId) -> f32 {
        let corners = self.face_vertices(face);
        corners.iter().map(|v| v.z).sum::<f32>() / corners.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Mesh {
        Mesh::create(Anchor::new(400.0, 400.0), DEFAULT_SCALE)
    }

    #[test]
    fn test_corners_are_scaled() {
        let mesh = cube();
        assert_eq!(mesh.vertices().len(), VERTEX_COUNT);
        for v in mesh.vertices() {
            assert_eq!(v.x.abs(), 40.0);
            assert_eq!(v.y.abs(), 40.0);
            assert_eq!(v.z.abs(), 40.0);
        }
        assert_eq!(mesh.vertices()[0], Point3::new(40.0, 40.0, 40.0));
        assert_eq!(mesh.vertices()[6], Point3::new(-40.0, -40.0, -40.0));
    }

    #[test]
    fn test_edges_join_adjacent_corners() {
        // Adjacent corners of a cube differ in exactly one coordinate.
        let mesh = Mesh::create(Anchor::origin(), 1.0);
        for edge in EdgeId::all() {
            let [a, b] = mesh.edge_vertices(edge);
            let differing = (0..3).filter(|&axis| a[axis] != b[axis]).count();
            assert_eq!(differing, 1, "edge {:?} is not a cube edge", edge);
        }
    }

    #[test]
    fn test_faces_are_axis_aligned() {
        let mesh = Mesh::create(Anchor::origin(), 1.0);
        for face in FaceId::all() {
            let corners = mesh.face_vertices(face);
            let shared_axes = (0..3)
                .filter(|&axis| corners.iter().all(|c| c[axis] == corners[0][axis]))
                .count();
            assert_eq!(shared_axes, 1, "face {:?} is not planar", face);
        }
    }

    #[test]
    fn test_every_corner_is_used() {
        let mut edge_uses = [0; VERTEX_COUNT];
        let mut face_uses = [0; VERTEX_COUNT];
        for edge in EdgeId::all() {
            for i in edge.indices() {
                edge_uses[i] += 1;
            }
        }
        for face in FaceId::all() {
            for i in face.indices() {
                face_uses[i] += 1;
            }
        }
        assert_eq!(edge_uses, [3; VERTEX_COUNT]);
        assert_eq!(face_uses, [3; VERTEX_COUNT]);
    }

    #[test]
    fn test_lookups_follow_vertex_buffer() {
        let mut mesh = cube();
        mesh.vertices_mut()[0] = Point3::new(1.0, 2.0, 3.0);
        let face = FaceId::new(0).unwrap();
        let edge = EdgeId::new(3).unwrap();
        assert_eq!(mesh.face_vertices(face)[0], Point3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.edge_vertices(edge)[1], Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_topology_accessors() {
        let mesh = cube();
        assert_eq!(mesh.faces().len(), FACE_COUNT);
        assert_eq!(mesh.edges().len(), EDGE_COUNT);
        assert_eq!(mesh.faces()[2], [0, 4, 7, 3]);
        assert_eq!(mesh.edges()[8], [0, 4]);
        for (face, indices) in FaceId::all().zip(mesh.faces()) {
            assert_eq!(face.indices(), *indices);
        }
        for (edge, indices) in EdgeId::all().zip(mesh.edges()) {
            assert_eq!(edge.indices(), *indices);
        }
        assert!(mesh
            .faces()
            .iter()
            .flatten()
            .chain(mesh.edges().iter().flatten())
            .all(|&i| i < VERTEX_COUNT));
    }

    #[test]
    fn test_ids_reject_out_of_range() {
        assert!(FaceId::new(FACE_COUNT).is_none());
        assert!(EdgeId::new(EDGE_COUNT).is_none());
        assert_eq!(FaceId::all().count(), FACE_COUNT);
        assert_eq!(EdgeId::all().count(), EDGE_COUNT);
    }

    #[test]
    fn test_face_depth_of_unrotated_cube() {
        let mesh = cube();
        let depths: Vec<f32> = FaceId::all().map(|f| mesh.face_depth(f)).collect();
        assert_eq!(depths, vec![0.0, 0.0, 40.0, 0.0, 0.0, -40.0]);
    }
}
