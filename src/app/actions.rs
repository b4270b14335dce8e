use eframe::egui;
use std::path::Path;

use super::svg::{self, ExportError};
use super::{FigureApp, settings};

impl FigureApp {
    pub(super) fn export_svg_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&self.settings.svg_path)
            .add_filter("SVG", &["svg"])
            .save_file()
        {
            self.export_svg_to(&path);
        }
    }

    pub(super) fn export_svg_to(&mut self, path: &Path) {
        let path_str = path.display().to_string();
        match self.write_svg(path) {
            Ok(()) => {
                log::info!("Exported SVG to {}", path_str);
                self.settings.svg_path = path_str.clone();
                self.status = Some(format!("Exported {}", path_str));
            }
            Err(e) => {
                log::error!("SVG export to {} failed: {}", path_str, e);
                self.status = Some(format!("SVG export failed: {e}"));
            }
        }
    }

    fn write_svg(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, svg::figure_to_svg(&self.figure, &self.labels))?;
        Ok(())
    }

    pub(super) fn reset_labels(&mut self) {
        self.labels.reset();
        log::info!("Labels reset to defaults");
        self.status = Some("Labels reset".to_string());
    }

    pub(super) fn persist_settings(&mut self) {
        match settings::save_settings(&self.settings_path, &self.settings) {
            Ok(()) => {
                log::info!("Saved settings to {}", self.settings_path);
                self.status = Some(format!("Saved settings to {}", self.settings_path));
            }
            Err(e) => {
                log::warn!("Saving settings to {} failed: {}", self.settings_path, e);
                self.status = Some(format!("Settings save failed: {e}"));
            }
        }
    }

    pub(super) fn reload_settings(&mut self, ctx: &egui::Context) {
        match settings::load_settings(&self.settings_path) {
            Ok(settings) => {
                ctx.set_zoom_factor(settings.zoom());
                self.settings = settings;
                self.status = Some(format!("Reloaded {}", self.settings_path));
            }
            Err(e) => {
                log::warn!("Reloading {} failed: {}", self.settings_path, e);
                self.status = Some(format!("Settings reload failed: {e}"));
            }
        }
    }
}
