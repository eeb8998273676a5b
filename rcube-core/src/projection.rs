/// Projection of object-space vertices onto the screen
use nalgebra::Point2;
use thiserror::Error;

use crate::geometry::{Anchor, Vertex};

pub const DEFAULT_VIEWER_DISTANCE: f32 = 160.0;
pub const DEFAULT_FOCAL_LENGTH: f32 = 80.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectorError {
    #[error("focal length must be nonzero")]
    ZeroFocalLength,

    #[error("camera parameters must be finite (distance {distance}, focal length {focal_length})")]
    NonFinite { distance: f32, focal_length: f32 },
}

/// Depth-scaled projection with two camera constants.
///
/// A point is scaled by `-(z - viewer_distance) / focal_length` and then
/// translated by the anchor. With the defaults, points with larger z come out
/// smaller on screen; that sign convention is kept as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    viewer_distance: f32,
    focal_length: f32,
}

impl Projector {
    pub fn new(viewer_distance: f32, focal_length: f32) -> Result<Self, ProjectorError> {
        if !viewer_distance.is_finite() || !focal_length.is_finite() {
            return Err(ProjectorError::NonFinite {
                distance: viewer_distance,
                focal_length,
            });
        }
        if focal_length == 0.0 {
            return Err(ProjectorError::ZeroFocalLength);
        }
        Ok(Self {
            viewer_distance,
            focal_length,
        })
    }

    pub fn viewer_distance(&self) -> f32 {
        self.viewer_distance
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// Scale factor applied to x and y at depth `z`
    pub fn depth_factor(&self, z: f32) -> f32 {
        -(z - self.viewer_distance) / self.focal_length
    }

    /// Project a vertex to screen coordinates around `anchor`
    pub fn to_screen(&self, point: &Vertex, anchor: Anchor) -> Point2<f32> {
        let mult = self.depth_factor(point.z);
        Point2::new(point.x * mult + anchor.x, point.y * mult + anchor.y)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            viewer_distance: DEFAULT_VIEWER_DISTANCE,
            focal_length: DEFAULT_FOCAL_LENGTH,
        }
    }
}
