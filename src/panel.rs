//! The head panel widget.
//!
//! [`BinauralPanel`] owns the point store and its visuals, turns pointer
//! input into source edits and reports listener-relative distances and
//! angles through its [`EventController`].
//!
//! The host drives the panel by composition rather than inheritance:
//!
//! | Host call               | Effect |
//! | ----------------------- | ------ |
//! | [`BinauralPanel::new`]  | construction, runs `build_interface` |
//! | [`size_interface`]      | panel resized |
//! | [`color_interface`]     | theme changed |
//! | [`ui`]                  | per-frame render + pointer handling (egui) |
//!
//! Pointer handling is also exposed directly ([`pointer_down`],
//! [`pointer_move`], [`pointer_up`]) so hosts other than egui, and tests,
//! can feed input in panel pixel coordinates.
//!
//! [`size_interface`]: BinauralPanel::size_interface
//! [`color_interface`]: BinauralPanel::color_interface
//! [`ui`]: BinauralPanel::ui
//! [`pointer_down`]: BinauralPanel::pointer_down
//! [`pointer_move`]: BinauralPanel::pointer_move
//! [`pointer_up`]: BinauralPanel::pointer_up

use egui::{Response, Sense, Ui};

use crate::color_scheme::ColorScheme;
use crate::config::{PanelConfig, PanelSettings};
use crate::events::{EventController, EventKind, PanelEvent, PointMeta};
use crate::geometry::{self, Polar, Pos};
use crate::points::{Point, PointStore};
use crate::transmit::{self, ListenerFrame, TransmitPayload};
use crate::visuals::{VisualMetrics, Visuals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// The pointer went down on the panel and has not been released.
    Dragging,
}

pub struct BinauralPanel {
    /// Runtime tunables; safe to change between frames.
    pub settings: PanelSettings,
    size: [f32; 2],
    scheme: ColorScheme,
    store: PointStore,
    visuals: Visuals,
    events: EventController,
    state: InteractionState,
    last_pointer: Option<Pos>,
}

impl BinauralPanel {
    pub fn new(cfg: PanelConfig) -> Self {
        let mut panel = Self {
            settings: cfg.settings,
            size: cfg.size,
            scheme: cfg.color_scheme,
            store: PointStore::new(),
            visuals: Visuals::new(),
            events: cfg.event_controller.unwrap_or_default(),
            state: InteractionState::Idle,
            last_pointer: None,
        };
        panel.build_interface();
        panel
    }

    // ── Host lifecycle ───────────────────────────────────────────────────

    /// (Re)create every visual primitive from the point store.
    pub fn build_interface(&mut self) {
        let metrics = self.metrics();
        self.visuals.rebuild(self.store.points(), metrics, &self.scheme);
        self.redraw_emphasis();
    }

    /// Resize the panel. The listener moves to the new center and sources
    /// beyond the new boundary are pulled back onto it.
    pub fn size_interface(&mut self, size: [f32; 2]) {
        if self.size == size {
            return;
        }
        log::debug!("head panel resized to {}x{}", size[0], size[1]);
        self.size = size;
        self.clamp_all();
        self.build_interface();
    }

    pub fn color_interface(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
        self.build_interface();
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn size(&self) -> [f32; 2] {
        self.size
    }

    pub fn color_scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    pub fn events(&self) -> &EventController {
        &self.events
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn points(&self) -> &[Point] {
        self.store.points()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.store.active()
    }

    pub fn visuals(&self) -> &Visuals {
        &self.visuals
    }

    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    /// Position of the listener's head: the panel center.
    pub fn listener(&self) -> Pos {
        Pos::new(self.size[0] / 2.0, self.size[1] / 2.0)
    }

    /// Maximum pixel distance of a source from the listener.
    pub fn boundary_radius(&self) -> f32 {
        self.settings
            .boundary_radius
            .unwrap_or_else(|| self.size[0].min(self.size[1]) / 2.0 - self.settings.node_radius)
            .max(0.0)
    }

    /// Distance of source `index` from the listener, in meters.
    pub fn point_distance(&self, index: usize) -> Option<f32> {
        let frame = self.frame();
        self.store.get(index).map(|p| frame.distance(p.pos()))
    }

    /// Angle of source `index` around the listener, in `[0, 360)`.
    pub fn point_angle(&self, index: usize) -> Option<f32> {
        let frame = self.frame();
        self.store.get(index).map(|p| frame.angle(p.pos()))
    }

    /// The payload a change event would carry right now.
    pub fn current_payload(&self) -> Option<TransmitPayload> {
        transmit::shape(self.settings.transmit_mode, &self.store, &self.frame())
    }

    // ── Pointer interaction ──────────────────────────────────────────────

    /// Pick the source under `pos`, or create one there. Returns `true` if a
    /// change event was emitted.
    pub fn pointer_down(&mut self, pos: Pos) -> bool {
        if !self.settings.clickable {
            return false;
        }
        self.state = InteractionState::Dragging;
        self.last_pointer = Some(pos);

        match self.store.hit_test(pos.x, pos.y, self.settings.node_radius) {
            Some(index) => {
                self.store.set_active(Some(index));
                log::debug!("selected source {index}");
                self.emit_point(EventKind::POINT_SELECTED, index);
            }
            None if self.settings.new_points_generatable => {
                let label = format!("Point {}", self.store.len() + 1);
                let index = self.create(pos, label, self.settings.default_color_index);
                log::debug!("created source {index} at ({:.1}, {:.1})", pos.x, pos.y);
            }
            None => self.store.set_active(None),
        }

        self.clamp_active();
        self.redraw_emphasis();
        self.transmit()
    }

    /// Drag the active source to `pos` while the pointer is held.
    pub fn pointer_move(&mut self, pos: Pos) -> bool {
        if !self.settings.clickable || self.state != InteractionState::Dragging {
            return false;
        }
        self.last_pointer = Some(pos);
        let Some(point) = self.store.active_point_mut() else {
            return false;
        };
        point.set_pos(pos);
        log::trace!("dragging source to ({:.1}, {:.1})", pos.x, pos.y);

        self.clamp_active();
        self.redraw_emphasis();
        self.transmit()
    }

    /// End a drag. The drag ends even when interaction was disabled
    /// mid-gesture, but nothing is emitted then.
    pub fn pointer_up(&mut self) -> bool {
        if self.state != InteractionState::Dragging {
            return false;
        }
        self.state = InteractionState::Idle;
        self.last_pointer = None;
        if !self.settings.clickable {
            return false;
        }
        self.clamp_active();
        self.transmit()
    }

    // ── Programmatic manipulation ────────────────────────────────────────

    /// Place a source at `distance` meters and `angle` degrees (0° = up)
    /// from the listener. The new source becomes active.
    pub fn add_point(
        &mut self,
        distance: f32,
        angle: f32,
        label: impl Into<String>,
        color_index: usize,
    ) -> usize {
        let pos = self.polar_to_panel(distance, angle);
        let index = self.create(pos, label.into(), color_index);
        self.clamp_active();
        self.redraw_emphasis();
        index
    }

    /// Move source `index` to a new polar position. Unknown indices are ignored.
    pub fn move_point(&mut self, index: usize, distance: f32, angle: f32) {
        let pos = self.polar_to_panel(distance, angle);
        let radius = self.boundary_radius();
        let listener = self.listener();
        let Some(point) = self.store.get_mut(index) else {
            log::warn!("move_point: no source at index {index}");
            return;
        };
        point.set_pos(geometry::clamp_to_boundary(pos, listener, radius));
        self.sync_visual(index);
    }

    /// Change the palette index of the active source, if any.
    pub fn set_active_color(&mut self, color_index: usize) {
        let active = self.store.active();
        self.set_color(active, color_index);
    }

    /// Change the palette index of source `index`. `None` is a no-op.
    pub fn set_color(&mut self, index: Option<usize>, color_index: usize) {
        if !self.store.set_color(index, color_index) {
            return;
        }
        let Some(index) = index else { return };
        self.visuals
            .set_fill(index, self.scheme.source_color(color_index));
        self.emit_point(EventKind::COLOR_CHANGED, index);
    }

    /// Delete source `index` and its visuals.
    ///
    /// Indices are positional: every source after `index` moves down by one,
    /// so indices held by the caller may refer to a different source
    /// afterwards. The selection is cleared.
    pub fn remove_point(&mut self, index: usize) {
        match self.store.remove(index) {
            Some(point) => {
                self.visuals.remove(index);
                log::debug!("removed source {index} ({})", point.label);
                self.events.emit(
                    PanelEvent::new(EventKind::POINT_REMOVED).with_point(point_meta(index, &point)),
                );
            }
            None => log::warn!("remove_point: no source at index {index}"),
        }
        self.redraw_emphasis();
    }

    pub fn remove_all(&mut self) {
        let count = self.store.len();
        self.store.remove_all();
        self.visuals.clear();
        log::debug!("removed all {count} sources");
        self.events.emit(PanelEvent::new(EventKind::POINTS_CLEARED));
    }

    // ── egui integration ─────────────────────────────────────────────────

    /// Allocate the panel, handle this frame's pointer input and paint it.
    pub fn ui(&mut self, ui: &mut Ui) -> Response {
        let desired = egui::vec2(self.size[0], self.size[1]);
        let (rect, mut response) = ui.allocate_exact_size(desired, Sense::click_and_drag());
        let origin = rect.min.to_vec2();

        let held = response.is_pointer_button_down_on();
        let pointer = response
            .interact_pointer_pos()
            .map(|p| Pos::from(p - origin));

        let changed = match (self.state, held, pointer) {
            (InteractionState::Idle, true, Some(pos)) => self.pointer_down(pos),
            (InteractionState::Dragging, true, Some(pos)) if self.last_pointer != Some(pos) => {
                self.pointer_move(pos)
            }
            (InteractionState::Dragging, false, _) => self.pointer_up(),
            _ => false,
        };
        if changed {
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            let colors = self.scheme.panel_colors();
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, colors.background);
            self.visuals.paint(
                &painter,
                origin,
                self.listener(),
                self.settings.listener_radius,
                self.boundary_radius(),
                &colors,
            );
        }
        response
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn metrics(&self) -> VisualMetrics {
        VisualMetrics {
            node_radius: self.settings.node_radius,
            label_margin: self.settings.label_margin,
        }
    }

    fn frame(&self) -> ListenerFrame {
        ListenerFrame {
            listener: self.listener(),
            pixels_per_meter: self.settings.pixels_per_meter,
            head_orientation: self.settings.head_orientation,
            relative_to_head: self.settings.angle_relative_to_head,
        }
    }

    fn polar_to_panel(&self, distance: f32, angle: f32) -> Pos {
        let polar = Polar {
            distance,
            angle: geometry::input_angle_to_frame(angle),
        };
        geometry::to_panel_coordinates(polar, self.listener(), self.settings.pixels_per_meter)
    }

    fn create(&mut self, pos: Pos, label: String, color_index: usize) -> usize {
        let metrics = self.metrics();
        let index = self.store.create(pos.x, pos.y, label, color_index);
        if let Some(point) = self.store.get(index) {
            self.visuals.push(point, metrics, &self.scheme);
        }
        self.emit_point(EventKind::POINT_CREATED, index);
        index
    }

    fn clamp_active(&mut self) {
        let radius = self.boundary_radius();
        let listener = self.listener();
        let Some(index) = self.store.active() else {
            return;
        };
        if let Some(point) = self.store.get_mut(index) {
            point.set_pos(geometry::clamp_to_boundary(point.pos(), listener, radius));
        }
        self.sync_visual(index);
    }

    fn clamp_all(&mut self) {
        let radius = self.boundary_radius();
        let listener = self.listener();
        for index in 0..self.store.len() {
            if let Some(point) = self.store.get_mut(index) {
                point.set_pos(geometry::clamp_to_boundary(point.pos(), listener, radius));
            }
        }
    }

    fn sync_visual(&mut self, index: usize) {
        let metrics = self.metrics();
        if let Some(point) = self.store.get(index) {
            self.visuals.sync(index, point, metrics);
        }
    }

    fn redraw_emphasis(&mut self) {
        self.visuals
            .set_emphasis(self.store.active(), &self.scheme.panel_colors());
    }

    fn transmit(&mut self) -> bool {
        match self.current_payload() {
            Some(payload) => {
                self.events.emit(PanelEvent::change(payload));
                true
            }
            None => false,
        }
    }

    fn emit_point(&self, kind: EventKind, index: usize) {
        if let Some(point) = self.store.get(index) {
            self.events
                .emit(PanelEvent::new(kind).with_point(point_meta(index, point)));
        }
    }
}

impl Default for BinauralPanel {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}

impl egui::Widget for &mut BinauralPanel {
    fn ui(self, ui: &mut Ui) -> Response {
        BinauralPanel::ui(self, ui)
    }
}

fn point_meta(index: usize, point: &Point) -> PointMeta {
    PointMeta {
        index,
        label: point.label.clone(),
        x: point.x,
        y: point.y,
        color_index: point.color_index,
    }
}
