/// Per-frame animation state: the cube, how to draw it, and how fast it turns
use log::{debug, info};
use std::f32::consts::PI;

use crate::canvas::{Canvas, CanvasEvent};
use crate::geometry::{Anchor, Mesh, DEFAULT_SCALE};
use crate::painter::{Painter, RenderMode};
use crate::projection::Projector;
use crate::shading::Rgb;
use crate::transform::{RotationState, Transform};

/// Rotation applied about each axis every frame
pub const DEFAULT_THETA: f32 = PI / 600.0;

/// Start-up configuration of a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub theta: f32,
    pub mode: RenderMode,
    pub projector: Projector,
    pub background: Rgb,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            scale: DEFAULT_SCALE,
            theta: DEFAULT_THETA,
            mode: RenderMode::Faces,
            projector: Projector::default(),
            background: Rgb::WHITE,
        }
    }
}

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// The tumbling cube and everything needed to draw one frame of it
#[derive(Debug, Clone)]
pub struct Scene {
    mesh: Mesh,
    painter: Painter,
    theta: f32,
    background: Rgb,
    rotation: RotationState,
    frame: u64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let anchor = centre(config.width, config.height);
        Self {
            mesh: Mesh::create(anchor, config.scale),
            painter: Painter::new(config.projector, config.mode),
            theta: config.theta,
            background: config.background,
            rotation: RotationState::zero(),
            frame: 0,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mode(&self) -> RenderMode {
        self.painter.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.painter.mode = mode;
    }

    /// Total angle turned about each axis so far
    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Number of frames completed
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Keep the cube centred on a surface of the new size
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("re-centring cube for {width}x{height} surface");
        self.mesh.set_anchor(centre(width, height));
    }

    /// Run one frame: clear, draw, tumble, present, then poll for events.
    pub fn frame<C: Canvas>(&mut self, canvas: &mut C) -> Result<FrameOutcome, C::Error> {
        canvas.clear(self.background);
        self.painter.render(&self.mesh, canvas);

        Transform::tumble(&mut self.mesh, self.theta);
        self.rotation.rotate(self.theta, self.theta, self.theta);

        canvas.present()?;
        self.frame += 1;

        let mut outcome = FrameOutcome::Continue;
        for event in canvas.poll_events()? {
            match event {
                CanvasEvent::Quit => outcome = FrameOutcome::Quit,
                CanvasEvent::Resized { width, height } => self.resize(width, height),
                CanvasEvent::Other => {}
            }
        }
        Ok(outcome)
    }

    /// Drive frames back to back until a quit event arrives
    pub fn run<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), C::Error> {
        while self.frame(canvas)? == FrameOutcome::Continue {}
        info!(
            "quit after {} frames, turned ({:.3}, {:.3}, {:.3}) rad",
            self.frame, self.rotation.x, self.rotation.y, self.rotation.z
        );
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

fn centre(width: u32, height: u32) -> Anchor {
    Anchor::new(width as f32 / 2.0, height as f32 / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::geometry::VERTEX_COUNT;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_sequence() {
        let mut scene = Scene::default();
        let mut canvas = RecordingCanvas::new();
        let before = scene.mesh().clone();

        assert_eq!(scene.frame(&mut canvas), Ok(FrameOutcome::Continue));

        let commands = canvas.commands();
        assert_eq!(commands.first(), Some(&DrawCommand::Clear(Rgb::WHITE)));
        assert_eq!(commands.last(), Some(&DrawCommand::Present));
        assert_eq!(commands.len(), 1 + 6 + 1);
        assert_eq!(scene.frame_count(), 1);

        // Drawn before rotating: the first face is the unrotated z = +40 face.
        assert!(matches!(
            &commands[1],
            DrawCommand::Polygon { color, .. } if *color == Rgb::grey(135)
        ));

        let mut expected = before;
        Transform::tumble(&mut expected, DEFAULT_THETA);
        assert_eq!(scene.mesh(), &expected);
    }

    #[test]
    fn test_quit_event_stops_run() {
        let mut scene = Scene::default();
        let mut canvas = RecordingCanvas::new();
        canvas.push_events(vec![]);
        canvas.push_events(vec![CanvasEvent::Other]);
        canvas.push_events(vec![CanvasEvent::Quit]);

        assert_eq!(scene.run(&mut canvas), Ok(()));
        assert_eq!(canvas.frames(), 3);
        assert_eq!(scene.frame_count(), 3);
        let turned = scene.rotation();
        assert_relative_eq!(turned.x, 3.0 * DEFAULT_THETA, epsilon = 1e-6);
        assert_relative_eq!(turned.z, 3.0 * DEFAULT_THETA, epsilon = 1e-6);
    }

    #[test]
    fn test_resize_recentres_anchor() {
        let mut scene = Scene::default();
        assert_eq!(scene.mesh().anchor(), Anchor::new(400.0, 400.0));

        let mut canvas = RecordingCanvas::new();
        canvas.push_events(vec![CanvasEvent::Resized {
            width: 200,
            height: 100,
        }]);
        scene.frame(&mut canvas).unwrap();
        assert_eq!(scene.mesh().anchor(), Anchor::new(100.0, 50.0));
        assert_eq!(scene.mesh().vertices().len(), VERTEX_COUNT);
    }

    #[test]
    fn test_mode_switch() {
        let mut scene = Scene::new(SceneConfig {
            mode: RenderMode::Points,
            background: Rgb::BLACK,
            ..SceneConfig::default()
        });
        let mut canvas = RecordingCanvas::new();
        scene.frame(&mut canvas).unwrap();
        assert_eq!(canvas.last_frame().len(), 1 + VERTEX_COUNT);
        assert_eq!(canvas.last_frame()[0], DrawCommand::Clear(Rgb::BLACK));

        scene.set_mode(RenderMode::Edges);
        assert_eq!(scene.mode(), RenderMode::Edges);
        scene.frame(&mut canvas).unwrap();
        assert!(canvas.last_frame()[1..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Line { .. })));
    }
}
