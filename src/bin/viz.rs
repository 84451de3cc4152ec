use std::sync::Arc;

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points, Text};

use mission_viz::api::{Fetcher, HttpApi};
use mission_viz::app::AppState;
use mission_viz::config::VizConfig;
use mission_viz::scene::{draw_list, Color, DrawItem};
use mission_viz::ui::{DetailsPanel, DETAILS_PLACEHOLDER};

/// Wheel notches are turned into a dolly factor per frame.
const SCROLL_DOLLY: f64 = 0.002;
/// Labels smaller than this (NDC height) are not worth drawing.
const MIN_LABEL_HEIGHT: f64 = 0.004;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = VizConfig::from_env().unwrap_or_else(|e| {
        log::error!("{}, using defaults", e);
        VizConfig::default()
    });

    let api = HttpApi::new(config.api_base_url.clone());
    let mut fetcher = Fetcher::new(Arc::new(api), config.trajectory_days);
    fetcher.request_primary();

    let app = MissionViz { state: AppState::new(config), fetcher };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native("Solar System Mission Viewer", options, Box::new(|_| Ok(Box::new(app))))
}

struct MissionViz {
    state: AppState,
    fetcher: Fetcher,
}

fn color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

fn color32_alpha(c: Color, opacity: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (opacity.clamp(0.0, 1.0) * 255.0) as u8)
}

impl eframe::App for MissionViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // -------------------------------------------------------------------
        // Per-frame bookkeeping: controls, then whatever the network delivered
        // -------------------------------------------------------------------
        self.state.controls.update(&mut self.state.camera);
        self.state.pump(&mut self.fetcher);

        self.sidebar(ctx);
        self.toolbar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let screen = ctx.screen_rect();
            let fraction = self.state.config.surface_fraction;
            let [w, h] = self.state.camera.set_viewport(screen.width(), screen.height(), fraction);
            self.scene(ui, w, h);
        });

        ctx.request_repaint();
    }
}

impl MissionViz {
    fn sidebar(&mut self, ctx: &egui::Context) {
        let mut select: Option<String> = None;
        let mut filter_change: Option<(&'static str, bool)> = None;

        egui::SidePanel::left("missions").min_width(280.0).show(ctx, |ui| {
            ui.heading("Active Missions");

            ui.horizontal(|ui| {
                for (token, checked) in self.state.ui.filter.tokens() {
                    let mut on = checked;
                    if ui.checkbox(&mut on, token).changed() {
                        filter_change = Some((token, on));
                    }
                }
            });
            ui.separator();

            egui::ScrollArea::vertical().max_height(ui.available_height() * 0.5).show(ui, |ui| {
                if let Some(message) = self.state.ui.list.message() {
                    ui.label(message);
                }
                for entry in self.state.ui.list.entries().iter().filter(|e| e.visible) {
                    let text = format!("{}\n{}", entry.name, entry.agency);
                    if ui.selectable_label(entry.selected, text).clicked() {
                        select = Some(entry.mission_id.clone());
                    }
                }
            });
            ui.separator();

            match &self.state.ui.details {
                DetailsPanel::Placeholder => {
                    ui.label(DETAILS_PLACEHOLDER);
                }
                DetailsPanel::Mission(d) => {
                    ui.heading(&d.name);
                    ui.label(format!("Agency: {}", d.agency));
                    ui.label(format!("Launch date: {}", d.launch_date));
                    ui.label(format!("Status: {}", d.status));
                    ui.label(&d.description);
                    if !d.milestones.is_empty() {
                        ui.strong("Milestones");
                        for line in d.milestone_lines() {
                            ui.label(line);
                        }
                    }
                    if !d.website.is_empty() {
                        ui.hyperlink_to("Mission website", &d.website);
                    }
                }
            }
        });

        if let Some((token, on)) = filter_change {
            self.state.set_agency_filter(token, on);
        }
        if let Some(id) = select {
            self.state.select_mission(&id);
        }
    }

    fn toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            match &self.state.ui.info {
                Some(info) => {
                    ui.heading(&info.title);
                    ui.label(&info.description);
                }
                None => {
                    ui.heading("Solar System Missions");
                }
            }
            ui.horizontal(|ui| {
                if ui.button("Reset view").clicked() {
                    self.state.reset_view();
                }
                if ui.button("Zoom in").clicked() {
                    self.state.zoom_in();
                }
                if ui.button("Zoom out").clicked() {
                    self.state.zoom_out();
                }
                let orbit_label = if self.state.show_orbits { "Hide orbits" } else { "Show orbits" };
                if ui.button(orbit_label).clicked() {
                    self.state.toggle_orbits();
                }
                if ui.button("Reload").clicked() {
                    self.state.reload(&mut self.fetcher);
                }
                if self.fetcher.pending() > 0 {
                    ui.spinner();
                    ui.label(format!("{} requests", self.fetcher.pending()));
                }
            });
        });
    }

    fn scene(&mut self, ui: &mut egui::Ui, width: f32, height: f32) {
        let aspect = self.state.camera.aspect;
        let items = draw_list(&self.state.graph, &self.state.camera, &self.state.controls.target);
        let px_per_ndc = height as f64 * 0.5;
        let to_plot = |p: [f64; 2]| [p[0] * aspect, p[1]];

        let plot = Plot::new("scene")
            .data_aspect(1.0)
            .width(width)
            .height(height)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .cursor_color(egui::Color32::TRANSPARENT);

        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(egui_plot::PlotBounds::from_min_max([-aspect, -1.0], [aspect, 1.0]));

            for item in items {
                match item {
                    DrawItem::Stars { points, color, size } => {
                        let pts: PlotPoints = points.into_iter().map(to_plot).collect();
                        plot_ui.points(
                            Points::new("", pts)
                                .color(color32(color))
                                .radius(size * 0.5)
                                .filled(true),
                        );
                    }
                    DrawItem::Line { points, color, opacity } => {
                        let pts: Vec<[f64; 2]> = points.into_iter().map(to_plot).collect();
                        plot_ui.line(
                            Line::new("", PlotPoints::new(pts))
                                .color(color32_alpha(color, opacity))
                                .width(1.0),
                        );
                    }
                    DrawItem::Disc { center, radius, color, .. } => {
                        plot_ui.points(
                            Points::new("", PlotPoints::new(vec![to_plot(center)]))
                                .color(color32(color))
                                .radius(((radius * px_per_ndc) as f32).max(1.5))
                                .filled(true),
                        );
                    }
                    DrawItem::Glow { center, radius, color, .. } => {
                        plot_ui.points(
                            Points::new("", PlotPoints::new(vec![to_plot(center)]))
                                .color(color32_alpha(color, 0.25))
                                .radius(((radius * px_per_ndc) as f32).max(2.0))
                                .filled(true),
                        );
                    }
                    DrawItem::Label { at, text, height } => {
                        if height < MIN_LABEL_HEIGHT {
                            continue;
                        }
                        let [x, y] = to_plot(at);
                        plot_ui.text(
                            Text::new("", PlotPoint::new(x, y), text).color(egui::Color32::WHITE),
                        );
                    }
                }
            }
        });

        let drag = response.response.drag_delta();
        if drag.x != 0.0 || drag.y != 0.0 {
            self.state.controls.rotate(drag.x as f64, drag.y as f64);
        }
        if response.response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.state.controls.dolly((1.0 - scroll as f64 * SCROLL_DOLLY).max(0.1));
            }
        }
    }
}
