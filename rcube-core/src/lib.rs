/// rcube core library - geometry and painter's-algorithm rendering
///
/// This library holds the tumbling cube's mesh, the rotation and projection
/// math, the depth-sorted painter, and the canvas interface a front end
/// implements to put frames on screen.

pub mod canvas;
pub mod geometry;
pub mod painter;
pub mod projection;
pub mod scene;
pub mod shading;
pub mod transform;

// Re-export commonly used types
pub use canvas::{Canvas, CanvasEvent, DrawCommand, RecordingCanvas};
pub use geometry::{Anchor, EdgeId, FaceId, Mesh, Vertex};
pub use painter::{FaceDepth, Painter, RenderMode};
pub use projection::{Projector, ProjectorError};
pub use scene::{FrameOutcome, Scene, SceneConfig};
pub use shading::{shade, Rgb};
pub use transform::{RotationState, Transform};
