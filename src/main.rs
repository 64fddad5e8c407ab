//! Demo: head panel in a native window.
//!
//! Click to place sources, drag to move them. Change events are logged on a
//! background thread; run with `RUST_LOG=debug` to see them.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin headpanel-demo
//! ```

use eframe::egui;
use headpanel::{
    BinauralPanel, ColorScheme, EventController, EventFilter, EventKind, PanelConfig,
    TransmitMode,
};

struct DemoApp {
    panel: BinauralPanel,
    scheme: ColorScheme,
    next_color: usize,
}

impl DemoApp {
    fn new(panel: BinauralPanel) -> Self {
        let scheme = panel.color_scheme().clone();
        Self {
            panel,
            scheme,
            next_color: 1,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let settings = &mut self.panel.settings;
        ui.heading("Panel");
        egui::ComboBox::from_label("Transmit")
            .selected_text(match settings.transmit_mode {
                TransmitMode::All => "All sources",
                TransmitMode::ActiveOnly => "Active source",
            })
            .show_ui(ui, |ui| {
                let mode = &mut settings.transmit_mode;
                ui.selectable_value(mode, TransmitMode::ActiveOnly, "Active source");
                ui.selectable_value(mode, TransmitMode::All, "All sources");
            });
        ui.add(
            egui::Slider::new(&mut settings.head_orientation, 0.0..=359.0)
                .text("Head orientation"),
        );
        ui.checkbox(&mut settings.angle_relative_to_head, "Angles relative to head");
        ui.checkbox(&mut settings.clickable, "Clickable");
        ui.checkbox(&mut settings.new_points_generatable, "Create on click");
        ui.add(egui::Slider::new(&mut settings.pixels_per_meter, 10.0..=100.0).text("px / m"));

        let mut scheme = self.scheme.clone();
        egui::ComboBox::from_label("Colors")
            .selected_text(scheme.label())
            .show_ui(ui, |ui| {
                for s in ColorScheme::all() {
                    ui.selectable_value(&mut scheme, s.clone(), s.label());
                }
            });
        if scheme != self.scheme {
            scheme.apply(ui.ctx());
            self.scheme = scheme.clone();
            self.panel.color_interface(scheme);
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Recolor active").clicked() {
                self.panel.set_active_color(self.next_color);
                self.next_color += 1;
            }
            if ui.button("Add front").clicked() {
                let n = self.panel.points().len() + 1;
                self.panel.add_point(2.0, 0.0, format!("S{n}"), 0);
            }
        });
        ui.horizontal(|ui| {
            let active = self.panel.active_index();
            if ui
                .add_enabled(active.is_some(), egui::Button::new("Remove active"))
                .clicked()
            {
                if let Some(i) = active {
                    self.panel.remove_point(i);
                }
            }
            if ui.button("Remove all").clicked() {
                self.panel.remove_all();
            }
        });

        ui.separator();
        for (i, p) in self.panel.points().iter().enumerate() {
            let d = self.panel.point_distance(i).unwrap_or_default();
            let a = self.panel.point_angle(i).unwrap_or_default();
            let marker = if Some(i) == self.panel.active_index() { "▶" } else { " " };
            ui.monospace(format!("{marker} {:<10} {d:>5.2} m {a:>6.1}°", p.label));
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("controls")
            .resizable(false)
            .show(ctx, |ui| self.controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let side = avail.x.min(avail.y).max(100.0);
            self.panel.size_interface([side, side]);
            ui.add(&mut self.panel);
        });
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let events = EventController::new();
    let rx = events.subscribe(EventFilter::only(
        EventKind::CHANGE
            | EventKind::POINT_CREATED
            | EventKind::POINT_REMOVED
            | EventKind::POINTS_CLEARED,
    ));
    std::thread::spawn(move || {
        while let Ok(evt) = rx.recv() {
            match (&evt.change, &evt.point) {
                (Some(payload), _) => match payload.to_json() {
                    Ok(json) => log::info!("[{}] {json}", evt.kinds),
                    Err(e) => log::warn!("failed to encode payload: {e}"),
                },
                (None, Some(p)) => log::info!("[{}] #{} {}", evt.kinds, p.index, p.label),
                (None, None) => log::info!("[{}]", evt.kinds),
            }
        }
        log::debug!("event channel closed");
    });

    let mut cfg = PanelConfig::with_size(400.0, 400.0);
    cfg.event_controller = Some(events);
    let scheme = cfg.color_scheme.clone();
    let panel = BinauralPanel::new(cfg);

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(720.0, 460.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Head panel",
        opts,
        Box::new(move |cc| {
            scheme.apply(&cc.egui_ctx);
            Ok(Box::new(DemoApp::new(panel)))
        }),
    )
}
