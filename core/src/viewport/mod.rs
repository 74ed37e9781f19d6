pub mod controller;
pub mod transform;

pub use controller::ViewportController;
pub use transform::ViewTransform;
