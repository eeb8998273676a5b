/// Drawing surface interface consumed by the painter
use nalgebra::Point2;
use std::collections::VecDeque;
use std::convert::Infallible;

use crate::shading::Rgb;

/// Events the frame loop cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    Quit,
    Resized { width: u32, height: u32 },
    Other,
}

/// A frame-based drawing surface.
///
/// Draw calls only touch the back buffer; nothing is visible until
/// [`Canvas::present`]. `poll_events` must not block.
pub trait Canvas {
    type Error;

    fn clear(&mut self, color: Rgb);

    fn draw_polygon(&mut self, color: Rgb, points: &[Point2<f32>], filled: bool);

    fn draw_line(&mut self, color: Rgb, from: Point2<f32>, to: Point2<f32>, width: u32);

    fn draw_circle(&mut self, color: Rgb, center: Point2<f32>, radius: f32);

    fn present(&mut self) -> Result<(), Self::Error>;

    fn poll_events(&mut self) -> Result<Vec<CanvasEvent>, Self::Error>;
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    Polygon {
        color: Rgb,
        points: Vec<Point2<f32>>,
        filled: bool,
    },
    Line {
        color: Rgb,
        from: Point2<f32>,
        to: Point2<f32>,
        width: u32,
    },
    Circle {
        color: Rgb,
        center: Point2<f32>,
        radius: f32,
    },
    Present,
}

/// In-memory canvas that records draw calls and replays scripted events
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    events: VecDeque<Vec<CanvasEvent>>,
    frames: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events returned by the next unanswered `poll_events`
    pub fn push_events(&mut self, events: Vec<CanvasEvent>) {
        self.events.push_back(events);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of presented frames
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Commands issued since the last `present`, or of the last frame if
    /// the canvas was just presented
    pub fn last_frame(&self) -> &[DrawCommand] {
        let end = match self.commands.last() {
            Some(DrawCommand::Present) => self.commands.len() - 1,
            _ => self.commands.len(),
        };
        let start = self.commands[..end]
            .iter()
            .rposition(|c| *c == DrawCommand::Present)
            .map_or(0, |i| i + 1);
        &self.commands[start..end]
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for RecordingCanvas {
    type Error = Infallible;

    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_polygon(&mut self, color: Rgb, points: &[Point2<f32>], filled: bool) {
        self.commands.push(DrawCommand::Polygon {
            color,
            points: points.to_vec(),
            filled,
        });
    }

    fn draw_line(&mut self, color: Rgb, from: Point2<f32>, to: Point2<f32>, width: u32) {
        self.commands.push(DrawCommand::Line {
            color,
            from,
            to,
            width,
        });
    }

    fn draw_circle(&mut self, color: Rgb, center: Point2<f32>, radius: f32) {
        self.commands.push(DrawCommand::Circle {
            color,
            center,
            radius,
        });
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Present);
        self.frames += 1;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<CanvasEvent>, Self::Error> {
        Ok(self.events.pop_front().unwrap_or_default())
    }
}
