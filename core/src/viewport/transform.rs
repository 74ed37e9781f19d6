use crate::math::AffineHelper;
use ndarray::{array, Array2};

/// The pan/zoom state applied to the base image: a uniform scale followed by
/// a translation, kept as one affine transform so screen placement is a
/// single matrix application rather than accumulated ad-hoc arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn new(scale: f32, translate_x: f32, translate_y: f32) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// The transform as a 3x3 homogeneous matrix.
    pub fn matrix(&self) -> Array2<f32> {
        array![
            [self.scale, 0.0, self.translate_x],
            [0.0, self.scale, self.translate_y],
            [0.0, 0.0, 1.0],
        ]
    }

    /// Maps an image-space point (pixels) to screen space.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        AffineHelper::apply(self.matrix().view(), x, y)
    }
}
