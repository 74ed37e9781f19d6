use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{mouse, Color, Point, Rectangle, Renderer, Size, Theme};
use stratacore::site::{Detection, RiskLevel, SitePoint};
use stratacore::ViewportController;

use crate::Message;

/// Marker radius in screen pixels. Markers keep a constant on-screen size so
/// they stay legible at every zoom level.
pub const MARKER_RADIUS: f32 = 14.0;

/// Pointer hit radius, slightly larger than the drawn disc.
pub const MARKER_HIT_RADIUS: f32 = 16.0;

pub fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Critical => Color::from_rgb(0.86, 0.22, 0.18),
        RiskLevel::High => Color::from_rgb(0.92, 0.50, 0.15),
        RiskLevel::Moderate => Color::from_rgb(0.93, 0.78, 0.22),
        RiskLevel::Low => Color::from_rgb(0.30, 0.72, 0.40),
    }
}

/// Topmost marker under the cursor, if any. Later detections draw on top of
/// earlier ones, so the scan runs in reverse.
pub fn marker_at(
    viewport: &ViewportController,
    detections: &[Detection],
    cursor: Point,
) -> Option<u32> {
    for detection in detections.iter().rev() {
        let (x, y) = viewport.project_to_screen(detection.position());
        let dx = cursor.x - x;
        let dy = cursor.y - y;
        if (dx * dx + dy * dy).sqrt() <= MARKER_HIT_RADIUS {
            return Some(detection.id);
        }
    }
    None
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    anchor: Option<Point>,
}

/// Canvas scene for the site view: the projected base image, a terrain grid,
/// and one marker per detection.
pub struct SiteScene<'a> {
    pub viewport: &'a ViewportController,
    pub detections: &'a [Detection],
    pub selected: Option<u32>,
    pub pulse_on: bool,
}

impl Program<Message> for SiteScene<'_> {
    type State = DragState;

    fn update(
        &self,
        drag: &mut DragState,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        if let Some(position) = cursor.position_in(bounds) {
            match event {
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                    if let Some(id) = marker_at(self.viewport, self.detections, position) {
                        return Some(canvas::Action::publish(Message::DetectionChosen(id)));
                    }
                    drag.anchor = Some(position);
                }
                Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                    if let Some(anchor) = drag.anchor {
                        let dx = position.x - anchor.x;
                        let dy = position.y - anchor.y;
                        drag.anchor = Some(position);
                        if dx != 0.0 || dy != 0.0 {
                            return Some(canvas::Action::publish(Message::Panned(dx, dy)));
                        }
                    }
                }
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                    drag.anchor = None;
                }
                _ => {}
            }
        } else if matches!(event, Event::Mouse(mouse::Event::ButtonReleased(_))) {
            // Release outside the canvas still ends the drag.
            drag.anchor = None;
        }
        None
    }

    fn mouse_interaction(
        &self,
        drag: &DragState,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if drag.anchor.is_some() {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(position) if marker_at(self.viewport, self.detections, position).is_some() => {
                mouse::Interaction::Pointer
            }
            Some(_) => mouse::Interaction::Grab,
            None => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        _drag: &DragState,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgb(0.04, 0.04, 0.06));

        let ((left, top), (right, bottom)) = self.viewport.image_frame();
        let image_size = Size::new(right - left, bottom - top);
        frame.fill_rectangle(
            Point::new(left, top),
            image_size,
            Color::from_rgb(0.23, 0.20, 0.16),
        );

        // Terrain reference grid every 10% of the site extent.
        let grid = Path::new(|builder| {
            for step in 0..=10 {
                let fraction = step as f32 * 10.0;
                let (x, _) = self.viewport.project_to_screen(SitePoint::new(fraction, 0.0));
                builder.move_to(Point::new(x, top));
                builder.line_to(Point::new(x, bottom));
                let (_, y) = self.viewport.project_to_screen(SitePoint::new(0.0, fraction));
                builder.move_to(Point::new(left, y));
                builder.line_to(Point::new(right, y));
            }
        });
        frame.stroke(
            &grid,
            Stroke::default()
                .with_width(1.0)
                .with_color(Color::from_rgb(0.31, 0.28, 0.23)),
        );
        frame.stroke(
            &Path::rectangle(Point::new(left, top), image_size),
            Stroke::default()
                .with_width(2.0)
                .with_color(Color::from_rgb(0.45, 0.42, 0.36)),
        );

        for detection in self.detections {
            let (x, y) = self.viewport.project_to_screen(detection.position());
            let center = Point::new(x, y);
            let color = risk_color(detection.risk);

            if detection.risk.pulses() && self.pulse_on {
                let halo = Path::new(|builder| builder.circle(center, MARKER_RADIUS + 7.0));
                frame.fill(&halo, Color { a: 0.25, ..color });
            }
            if self.selected == Some(detection.id) {
                let ring = Path::new(|builder| builder.circle(center, MARKER_RADIUS + 4.0));
                frame.stroke(
                    &ring,
                    Stroke::default().with_width(3.0).with_color(Color::WHITE),
                );
            }

            let marker = Path::new(|builder| builder.circle(center, MARKER_RADIUS));
            frame.fill(&marker, color);
            frame.stroke(
                &marker,
                Stroke::default().with_width(2.0).with_color(Color::WHITE),
            );

            frame.fill_text(Text {
                content: detection.id.to_string(),
                position: center,
                size: 14.0.into(),
                color: Color::WHITE,
                align_x: Horizontal::Center.into(),
                align_y: Vertical::Center.into(),
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratacore::site::baseline_detections;
    use stratacore::{ViewportConfig, ViewportController};

    fn viewport() -> ViewportController {
        ViewportController::new(ViewportConfig::default(), (1280.0, 800.0), (960.0, 600.0))
    }

    #[test]
    fn cursor_on_marker_hits_that_detection() {
        let viewport = viewport();
        let detections = baseline_detections();
        let (x, y) = viewport.project_to_screen(detections[0].position());
        assert_eq!(
            marker_at(&viewport, &detections, Point::new(x, y)),
            Some(detections[0].id)
        );
    }

    #[test]
    fn cursor_off_markers_hits_nothing() {
        let viewport = viewport();
        let detections = baseline_detections();
        assert_eq!(
            marker_at(&viewport, &detections, Point::new(-200.0, -200.0)),
            None
        );
        assert_eq!(marker_at(&viewport, &[], Point::new(480.0, 300.0)), None);
    }

    #[test]
    fn overlapping_markers_resolve_to_topmost() {
        let viewport = viewport();
        let detections = vec![
            Detection::new(7, 50.0, 50.0, RiskLevel::Low, "1 min ago", "Small"),
            Detection::new(9, 50.0, 50.0, RiskLevel::High, "2 min ago", "Small"),
        ];
        let (x, y) = viewport.project_to_screen(detections[0].position());
        assert_eq!(marker_at(&viewport, &detections, Point::new(x, y)), Some(9));
    }
}
