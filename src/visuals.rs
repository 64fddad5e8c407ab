//! Drawable primitives mirroring the point store.
//!
//! Each source owns a marker circle and a text label. [`Visuals`] keeps one
//! [`SourceVisual`] per point at the same index; the panel updates both
//! sequences together so they never drift apart.

use egui::{Align2, Color32, FontId, Painter, Stroke, Vec2};

use crate::color_scheme::{ColorScheme, PanelColors};
use crate::geometry::Pos;
use crate::points::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPrimitive {
    pub center: Pos,
    pub radius: f32,
    pub fill: Color32,
    /// Highlighted border, set only on the active source.
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelPrimitive {
    pub pos: Pos,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceVisual {
    pub marker: MarkerPrimitive,
    pub label: LabelPrimitive,
}

/// Sizes needed to lay out a source visual.
#[derive(Debug, Clone, Copy)]
pub struct VisualMetrics {
    pub node_radius: f32,
    pub label_margin: f32,
}

impl VisualMetrics {
    fn label_pos(&self, center: Pos) -> Pos {
        Pos::new(center.x, center.y + self.node_radius + self.label_margin)
    }
}

const EMPHASIS_WIDTH: f32 = 2.0;
const LABEL_FONT_SIZE: f32 = 11.0;

#[derive(Debug, Clone, Default)]
pub struct Visuals {
    sources: Vec<SourceVisual>,
}

impl Visuals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[SourceVisual] {
        &self.sources
    }

    pub fn get(&self, index: usize) -> Option<&SourceVisual> {
        self.sources.get(index)
    }

    /// Create the marker and label for a newly appended point.
    pub fn push(&mut self, point: &Point, metrics: VisualMetrics, scheme: &ColorScheme) {
        let center = point.pos();
        self.sources.push(SourceVisual {
            marker: MarkerPrimitive {
                center,
                radius: metrics.node_radius,
                fill: scheme.source_color(point.color_index),
                stroke: None,
            },
            label: LabelPrimitive {
                pos: metrics.label_pos(center),
                text: point.label.clone(),
            },
        });
    }

    /// Move the visuals at `index` to the point's current position.
    pub fn sync(&mut self, index: usize, point: &Point, metrics: VisualMetrics) {
        if let Some(v) = self.sources.get_mut(index) {
            v.marker.center = point.pos();
            v.marker.radius = metrics.node_radius;
            v.label.pos = metrics.label_pos(point.pos());
            v.label.text.clone_from(&point.label);
        }
    }

    /// Rebuild every primitive from scratch, e.g. after a resize or theme change.
    pub fn rebuild(&mut self, points: &[Point], metrics: VisualMetrics, scheme: &ColorScheme) {
        let emphasized = self.sources.iter().position(|v| v.marker.stroke.is_some());
        self.sources.clear();
        for p in points {
            self.push(p, metrics, scheme);
        }
        self.set_emphasis(emphasized, &scheme.panel_colors());
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.sources.len() {
            self.sources.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    pub fn set_fill(&mut self, index: usize, fill: Color32) {
        if let Some(v) = self.sources.get_mut(index) {
            v.marker.fill = fill;
        }
    }

    /// Give the active source a highlighted border and strip it from all others.
    pub fn set_emphasis(&mut self, active: Option<usize>, colors: &PanelColors) {
        for (i, v) in self.sources.iter_mut().enumerate() {
            v.marker.stroke =
                (Some(i) == active).then(|| Stroke::new(EMPHASIS_WIDTH, colors.emphasis));
        }
    }

    /// Paint the panel chrome and all sources. `origin` is the panel's
    /// top-left corner in screen space.
    pub fn paint(
        &self,
        painter: &Painter,
        origin: Vec2,
        listener: Pos,
        listener_radius: f32,
        boundary_radius: f32,
        colors: &PanelColors,
    ) {
        let to_screen = |p: Pos| egui::Pos2::from(p) + origin;
        let head = to_screen(listener);

        painter.circle_stroke(head, boundary_radius, Stroke::new(1.0, colors.boundary));
        painter.circle_filled(head, listener_radius, colors.listener);
        // nose marks the front of the head
        painter.circle_filled(
            head + egui::vec2(0.0, -listener_radius),
            listener_radius * 0.3,
            colors.listener,
        );

        let font = FontId::proportional(LABEL_FONT_SIZE);
        for v in &self.sources {
            let stroke = v.marker.stroke.unwrap_or(Stroke::NONE);
            painter.circle(to_screen(v.marker.center), v.marker.radius, v.marker.fill, stroke);
            painter.text(
                to_screen(v.label.pos),
                Align2::CENTER_TOP,
                &v.label.text,
                font.clone(),
                colors.label,
            );
        }
    }
}
