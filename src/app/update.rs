use eframe::egui;

use super::help::draw_help_window;
use super::render::{draw_background, draw_figure};
use super::settings::{MAX_ZOOM, MIN_ZOOM};
use super::{FigureApp, canvas_origin, place_label};

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wants_keyboard = ctx.wants_keyboard_input();
        let mut export_requested = false;
        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::S) {
                export_requested = true;
            }
            if !wants_keyboard && i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                self.show_help = true;
            }
        });
        if export_requested {
            self.export_svg_dialog();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export SVG... (⌘⇧S)").clicked() {
                        self.export_svg_dialog();
                        ui.close_menu();
                    }
                    ui.small("Quick export path:");
                    ui.text_edit_singleline(&mut self.settings.svg_path);
                    if ui.small_button("Quick Export SVG").clicked() {
                        let path = std::path::PathBuf::from(&self.settings.svg_path);
                        self.export_svg_to(&path);
                        ui.close_menu();
                    }
                });
                ui.menu_button("Edit", |ui| {
                    if ui.button("Reset labels").clicked() {
                        self.reset_labels();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    let mut zoom = self.settings.zoom();
                    if ui
                        .add(egui::Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM).text("Zoom"))
                        .changed()
                    {
                        self.settings.zoom = zoom;
                        ctx.set_zoom_factor(zoom);
                    }
                    ui.checkbox(&mut self.settings.show_label_outlines, "Label outlines");
                    ui.horizontal(|ui| {
                        ui.label("Placeholder:");
                        ui.text_edit_singleline(&mut self.settings.placeholder);
                    });
                    ui.separator();
                    if ui.button("Save settings").clicked() {
                        self.persist_settings();
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("Show Help (F1)").clicked() {
                        self.show_help = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Reload Settings").clicked() {
                        self.reload_settings(ctx);
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Click any label to edit it");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let edited = self
                        .labels
                        .iter()
                        .filter(|(key, _)| !self.labels.is_default(*key))
                        .count();
                    ui.label(format!("Edited labels: {}", edited));
                });
            });
        });

        let figure_size = self.figure_size();
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.figure.background.to_color32()))
            .show(ctx, |ui| {
                egui::ScrollArea::both().show(ui, |ui| {
                    let size = figure_size.max(ui.available_size());
                    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                    let origin = canvas_origin(rect, figure_size);
                    let offset = origin.to_vec2();

                    let painter = ui.painter_at(rect);
                    draw_background(&painter, rect, self.figure.background);
                    draw_figure(&painter, offset, &self.figure);

                    for placement in &self.figure.labels {
                        place_label(
                            ui,
                            offset,
                            placement,
                            &mut self.labels,
                            &self.settings.placeholder,
                            self.settings.show_label_outlines,
                        );
                    }
                });
            });

        if self.show_help {
            let mut open = true;
            draw_help_window(ctx, &mut open);
            self.show_help = open;
        }
    }
}
