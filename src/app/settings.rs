use crate::widgets::DEFAULT_PLACEHOLDER;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(super) const MIN_ZOOM: f32 = 0.5;
pub(super) const MAX_ZOOM: f32 = 3.0;

#[derive(Debug, Error)]
pub(super) enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub svg_path: String,
    pub zoom: f32,
    pub show_label_outlines: bool,
    pub placeholder: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            svg_path: "figure.svg".to_string(),
            zoom: 1.0,
            show_label_outlines: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl AppSettings {
    pub fn zoom(&self) -> f32 {
        if self.zoom.is_finite() {
            self.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        }
    }
}

fn is_toml(path: &str) -> bool {
    path.ends_with(".toml")
}

/// Parses settings in the format implied by `path`, falling back to the
/// other format. The error reported is the one for the implied format.
pub(super) fn parse_settings(path: &str, text: &str) -> Result<AppSettings, SettingsError> {
    if is_toml(path) {
        toml::from_str::<AppSettings>(text)
            .map_err(SettingsError::from)
            .or_else(|e| serde_json::from_str::<AppSettings>(text).map_err(|_| e))
    } else {
        serde_json::from_str::<AppSettings>(text)
            .map_err(SettingsError::from)
            .or_else(|e| toml::from_str::<AppSettings>(text).map_err(|_| e))
    }
}

pub(super) fn render_settings(path: &str, settings: &AppSettings) -> Result<String, SettingsError> {
    if is_toml(path) {
        Ok(toml::to_string_pretty(settings)?)
    } else {
        Ok(serde_json::to_string_pretty(settings)?)
    }
}

pub(super) fn load_settings(path: &str) -> Result<AppSettings, SettingsError> {
    let text = std::fs::read_to_string(path)?;
    parse_settings(path, &text)
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> Result<(), SettingsError> {
    let text = render_settings(path, settings)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = parse_settings("settings.toml", "zoom = 1.5\n").unwrap();
        assert_eq!(settings.zoom, 1.5);
        assert_eq!(settings.svg_path, "figure.svg");
        assert_eq!(settings.placeholder, "(empty)");
    }

    #[test]
    fn test_json_fallback_for_toml_path() {
        let settings =
            parse_settings("settings.toml", r#"{"placeholder": "<blank>"}"#).unwrap();
        assert_eq!(settings.placeholder, "<blank>");
    }

    #[test]
    fn test_toml_fallback_for_json_path() {
        let settings =
            parse_settings("settings.json", "show_label_outlines = true\n").unwrap();
        assert!(settings.show_label_outlines);
    }

    #[test]
    fn test_invalid_reports_implied_format() {
        let err = parse_settings("settings.toml", "zoom = [").unwrap_err();
        assert!(matches!(err, SettingsError::Toml(_)));
        let err = parse_settings("settings.json", "zoom = [").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_render_then_parse_toml() {
        let settings = AppSettings {
            svg_path: "out/fig.svg".into(),
            zoom: 2.0,
            show_label_outlines: true,
            placeholder: "—".into(),
        };
        let text = render_settings("a.toml", &settings).unwrap();
        assert!(text.contains("svg_path"));
        assert_eq!(parse_settings("a.toml", &text).unwrap(), settings);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut settings = AppSettings::default();
        settings.zoom = 10.0;
        assert_eq!(settings.zoom(), MAX_ZOOM);
        settings.zoom = 0.0;
        assert_eq!(settings.zoom(), MIN_ZOOM);
        settings.zoom = f32::NAN;
        assert_eq!(settings.zoom(), 1.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_settings("definitely/not/here/settings.toml").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
