use ndarray::{array, ArrayView2};

pub struct AffineHelper;

impl AffineHelper {
    /// Apply a 3x3 homogeneous transform to a 2D point (all f32 for simplicity).
    pub fn apply(matrix: ArrayView2<f32>, x: f32, y: f32) -> (f32, f32) {
        let point = array![x, y, 1.0];
        let out = matrix.dot(&point);
        (out[0], out[1])
    }
}
