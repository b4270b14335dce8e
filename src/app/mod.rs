use crate::figure::{Figure, LabelPlacement};
use crate::path::PathError;
use crate::store::LabelStore;
use crate::widgets::EditableLabel;
use eframe::egui;

mod actions;
mod help;
mod render;
mod settings;
mod svg;
mod update;

/// Places the figure's top-left corner: centred in `available`, pinned to its
/// top-left when the window is smaller than the figure.
fn canvas_origin(available: egui::Rect, figure_size: egui::Vec2) -> egui::Pos2 {
    let slack = (available.size() - figure_size).max(egui::Vec2::ZERO);
    available.min + slack * 0.5
}

pub struct FigureApp {
    figure: Figure,
    labels: LabelStore,
    settings: settings::AppSettings,
    settings_path: String,
    status: Option<String>,
    show_help: bool,
}

impl FigureApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home).join(".config").join("figedit.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    /// Reads `path`, falling back to `fallback` when `path` does not exist.
    /// Returns the settings together with the file later saves and reloads
    /// should use, which is whichever one was actually read.
    fn read_settings(path: &str, fallback: &str) -> (settings::AppSettings, String) {
        match settings::load_settings(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                (settings, path.to_string())
            }
            Err(settings::SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                match settings::load_settings(fallback) {
                    Ok(settings) => {
                        log::info!("Loaded settings from {}", fallback);
                        (settings, fallback.to_string())
                    }
                    Err(settings::SettingsError::Io(e))
                        if e.kind() == std::io::ErrorKind::NotFound =>
                    {
                        (settings::AppSettings::default(), path.to_string())
                    }
                    Err(e) => {
                        log::warn!("Ignoring settings in {}: {}", fallback, e);
                        (settings::AppSettings::default(), fallback.to_string())
                    }
                }
            }
            Err(e) => {
                log::warn!("Ignoring settings in {}: {}", path, e);
                (settings::AppSettings::default(), path.to_string())
            }
        }
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, PathError> {
        let preferred = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let (settings, settings_path) = Self::read_settings(&preferred, "settings.json");
        cc.egui_ctx.set_zoom_factor(settings.zoom());

        Ok(Self {
            figure: Figure::hypoxia_adaptation()?,
            labels: LabelStore::default(),
            settings,
            settings_path,
            status: None,
            show_help: false,
        })
    }

    fn figure_size(&self) -> egui::Vec2 {
        egui::vec2(self.figure.width, self.figure.height)
    }
}

/// Lays out one editable label inside its anchor box and wires its commit
/// back into the store.
fn place_label(
    ui: &mut egui::Ui,
    offset: egui::Vec2,
    placement: &LabelPlacement,
    labels: &mut LabelStore,
    placeholder: &str,
    show_outline: bool,
) {
    let rect = placement.anchor.to_rect().translate(offset);
    let key = placement.key;
    let style = placement.style;
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .id_salt(key.id())
            .max_rect(rect)
            .layout(egui::Layout::top_down(style.layout_align())),
    );
    let widget = EditableLabel::new(labels.get(key))
        .id_salt(key.id())
        .style(style)
        .placeholder(placeholder);
    match style.backdrop {
        Some(backdrop) => {
            backdrop
                .frame()
                .show(&mut child, |ui| widget.show(ui, |value| labels.update(key, value)));
        }
        None => {
            widget.show(&mut child, |value| labels.update(key, value));
        }
    }
    if show_outline {
        render::draw_anchor_outline(ui.painter(), rect);
    }
}
