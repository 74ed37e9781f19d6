use crate::prelude::{ObservableState, ViewportConfig};
use crate::site::SitePoint;
use crate::telemetry::EventLog;
use crate::viewport::transform::ViewTransform;

/// Owns the pan/zoom transform over the base image and computes stable
/// screen-space placement for normalized detection coordinates.
///
/// Zoom steps are anchored at the viewport center: the image point under the
/// center stays put while the scale changes. That, together with projection
/// being a pure function of the current transform, is what keeps markers
/// visually locked to the image content at every zoom level.
pub struct ViewportController {
    config: ViewportConfig,
    image_size: (f32, f32),
    viewport_size: (f32, f32),
    transform: ViewTransform,
    home: ViewTransform,
    revision: u64,
    logger: EventLog,
}

impl ViewportController {
    /// `image_size` is the base image's pixel dimensions, `viewport_size` the
    /// on-screen viewer dimensions. The initial transform centers the image
    /// in the viewport at the configured initial scale.
    pub fn new(config: ViewportConfig, image_size: (f32, f32), viewport_size: (f32, f32)) -> Self {
        let home = Self::centered(config.initial_scale, image_size, viewport_size);
        Self {
            config,
            image_size,
            viewport_size,
            transform: home,
            home,
            revision: 0,
            logger: EventLog::new("viewport"),
        }
    }

    fn centered(scale: f32, image_size: (f32, f32), viewport_size: (f32, f32)) -> ViewTransform {
        ViewTransform::new(
            scale,
            (viewport_size.0 - scale * image_size.0) / 2.0,
            (viewport_size.1 - scale * image_size.1) / 2.0,
        )
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    /// Multiplies the scale by the step factor, clamped to the configured
    /// bounds. No-op when already pinned at `max_scale`. Returns whether the
    /// transform changed.
    pub fn zoom_in(&mut self) -> bool {
        self.rescale(self.transform.scale * self.config.zoom_step)
    }

    /// Divides the scale by the step factor, clamped to the configured
    /// bounds. No-op when already pinned at `min_scale`.
    pub fn zoom_out(&mut self) -> bool {
        self.rescale(self.transform.scale / self.config.zoom_step)
    }

    fn rescale(&mut self, target: f32) -> bool {
        let next = target.clamp(self.config.min_scale, self.config.max_scale);
        let current = self.transform.scale;
        if next == current {
            return false;
        }

        // Keep the image point under the viewport center fixed.
        let (cx, cy) = (self.viewport_size.0 / 2.0, self.viewport_size.1 / 2.0);
        let ratio = next / current;
        self.transform = ViewTransform::new(
            next,
            cx - ratio * (cx - self.transform.translate_x),
            cy - ratio * (cy - self.transform.translate_y),
        );
        self.revision += 1;
        self.logger.record(&format!("scale {:.2}x", next));
        true
    }

    /// Free-form drag translation; deliberately unconstrained.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
        self.revision += 1;
    }

    /// Restores the state immediately after construction: initial scale, image
    /// centered in the viewport.
    pub fn reset(&mut self) {
        if self.transform == self.home {
            return;
        }
        self.transform = self.home;
        self.revision += 1;
        self.logger.record("view reset");
    }

    /// Projects a normalized site position (percent offsets) to screen
    /// pixels under the current transform. Pure in the transform: callers
    /// re-evaluate it on every transform change.
    pub fn project_to_screen(&self, position: SitePoint) -> (f32, f32) {
        let image_x = position.x / 100.0 * self.image_size.0;
        let image_y = position.y / 100.0 * self.image_size.1;
        self.transform.apply(image_x, image_y)
    }

    /// Screen-space corners of the image rect, for drawing the backdrop.
    pub fn image_frame(&self) -> ((f32, f32), (f32, f32)) {
        (
            self.transform.apply(0.0, 0.0),
            self.transform.apply(self.image_size.0, self.image_size.1),
        )
    }
}

impl ObservableState for ViewportController {
    type Snapshot = ViewTransform;

    fn revision(&self) -> u64 {
        self.revision
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: (f32, f32) = (1280.0, 800.0);
    const VIEWPORT: (f32, f32) = (960.0, 600.0);

    fn controller() -> ViewportController {
        ViewportController::new(ViewportConfig::default(), IMAGE, VIEWPORT)
    }

    fn approx(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn initial_transform_centers_the_image() {
        let view = controller();
        let center = view.project_to_screen(SitePoint::new(50.0, 50.0));
        assert!(approx(center, (VIEWPORT.0 / 2.0, VIEWPORT.1 / 2.0)));
    }

    #[test]
    fn projection_round_trips_through_reset() {
        let mut view = controller();
        let position = SitePoint::new(45.0, 35.0);
        let before = view.project_to_screen(position);

        view.zoom_in();
        view.pan(120.0, -40.0);
        view.zoom_in();
        view.zoom_out();
        view.pan(-5.0, 300.0);
        view.reset();

        assert_eq!(view.project_to_screen(position), before);
        assert_eq!(view.scale(), 1.0);
    }

    #[test]
    fn zoom_in_then_out_is_an_inverse_pair() {
        let mut view = controller();
        let position = SitePoint::new(72.0, 45.0);
        let before = view.project_to_screen(position);

        assert!(view.zoom_in());
        assert!(view.zoom_out());

        assert!((view.scale() - 1.0).abs() < 1e-4);
        assert!(approx(view.project_to_screen(position), before));
    }

    #[test]
    fn zoom_in_pins_at_max_scale() {
        let mut view = controller();
        for _ in 0..12 {
            view.zoom_in();
        }
        assert_eq!(view.scale(), 4.0);

        // Pinned: a further step is a no-op and does not bump the revision.
        let revision = view.revision();
        assert!(!view.zoom_in());
        assert_eq!(view.scale(), 4.0);
        assert_eq!(view.revision(), revision);
    }

    #[test]
    fn five_zoom_outs_pin_at_min_scale() {
        let mut view = controller();
        for _ in 0..5 {
            view.zoom_out();
        }
        assert_eq!(view.scale(), 0.5);
    }

    #[test]
    fn zoom_keeps_the_viewport_center_anchored() {
        let mut view = controller();
        view.pan(37.0, -12.0);

        // Whichever image point sits under the viewport center stays there
        // across zoom steps.
        let center = (VIEWPORT.0 / 2.0, VIEWPORT.1 / 2.0);
        let t = view.transform();
        let anchored = SitePoint::new(
            (center.0 - t.translate_x) / t.scale / IMAGE.0 * 100.0,
            (center.1 - t.translate_y) / t.scale / IMAGE.1 * 100.0,
        );

        view.zoom_in();
        assert!(approx(view.project_to_screen(anchored), center));
        view.zoom_in();
        assert!(approx(view.project_to_screen(anchored), center));
    }

    #[test]
    fn pan_shifts_projection_by_the_delta() {
        let mut view = controller();
        let position = SitePoint::new(38.0, 58.0);
        let before = view.project_to_screen(position);
        view.pan(25.0, -10.0);
        let after = view.project_to_screen(position);
        assert!(approx((after.0 - before.0, after.1 - before.1), (25.0, -10.0)));
    }

    #[test]
    fn markers_track_the_image_at_any_zoom() {
        let mut view = controller();
        view.zoom_in();
        view.zoom_in();

        // Projection stays an affine image of the normalized coordinates:
        // the midpoint of two detections projects to the midpoint of their
        // projections, so markers cannot drift relative to the content.
        let a = view.project_to_screen(SitePoint::new(45.0, 35.0));
        let b = view.project_to_screen(SitePoint::new(62.0, 28.0));
        let mid = view.project_to_screen(SitePoint::new(53.5, 31.5));
        assert!(approx(mid, ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)));
    }
}
