use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }

    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RectF {
    pub min: Point,
    pub max: Point,
}

impl RectF {
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Point::new(x, y),
            max: Point::new(x + w, y + h),
        }
    }

    pub fn to_rect(self) -> egui::Rect {
        egui::Rect::from_min_max(self.min.to_pos2(), self.max.to_pos2())
    }

    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center_x(self) -> f32 {
        (self.min.x + self.max.x) * 0.5
    }
}

/// Straight (non-premultiplied) sRGB colour.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `0xRRGGBB`, fully opaque.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

pub const PAPER: Rgba = Rgba::hex(0xFBFBF6);
pub const INK: Rgba = Rgba::hex(0x4A4A4A);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
}

impl StrokeStyle {
    pub const fn ink(width: f32) -> Self {
        Self { color: INK, width }
    }

    pub fn to_stroke(self) -> egui::Stroke {
        egui::Stroke::new(self.width, self.color.to_color32())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Semibold,
    Bold,
}

impl FontWeight {
    pub fn css_value(self) -> u16 {
        match self {
            FontWeight::Normal => 400,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

/// Box painted behind a label (e.g. the highlighted species in the tree).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backdrop {
    pub fill: Rgba,
    pub stroke: Option<StrokeStyle>,
    pub corner_radius: f32,
    /// Horizontal and vertical padding around the text.
    pub padding: [f32; 2],
}

impl Backdrop {
    pub fn frame(self) -> egui::Frame {
        egui::Frame::new()
            .fill(self.fill.to_color32())
            .stroke(self.stroke.map(StrokeStyle::to_stroke).unwrap_or(egui::Stroke::NONE))
            .corner_radius(self.corner_radius)
            .inner_margin(egui::Margin::symmetric(
                margin_points(self.padding[0]),
                margin_points(self.padding[1]),
            ))
    }
}

/// egui margins are whole points in an `i8`.
fn margin_points(padding: f32) -> i8 {
    if padding.is_finite() {
        padding.round().clamp(0.0, f32::from(i8::MAX)) as i8
    } else {
        0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Rgba,
    pub align: TextAlign,
    /// Extra space between glyphs, in points.
    pub letter_spacing: f32,
    /// Wrap at this width; `None` keeps the label on one line.
    pub wrap_width: Option<f32>,
    pub line_height: Option<f32>,
    pub backdrop: Option<Backdrop>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            weight: FontWeight::Normal,
            color: INK,
            align: TextAlign::Left,
            letter_spacing: 0.0,
            wrap_width: None,
            line_height: None,
            backdrop: None,
        }
    }
}

impl LabelStyle {
    pub fn sized(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Wide tracking, 0.05em.
    pub fn tracking_wider(mut self) -> Self {
        self.letter_spacing = self.size * 0.05;
        self
    }

    /// Wraps at `width` with a tight (1.25) line height.
    pub fn wrapped(mut self, width: f32) -> Self {
        self.wrap_width = Some(width);
        self.line_height = Some(self.size * 1.25);
        self
    }

    pub fn backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = Some(backdrop);
        self
    }

    pub fn font_id(&self) -> egui::FontId {
        egui::FontId::proportional(self.size)
    }

    pub fn layout_align(&self) -> egui::Align {
        match self.align {
            TextAlign::Left => egui::Align::Min,
            TextAlign::Center => egui::Align::Center,
            TextAlign::Right => egui::Align::Max,
        }
    }
}

/// Identifies one editable text slot of the figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelKey {
    Mdm2,
    P55,
    AlphaHelix,
    WildType,
    TightBinding,
    SpalaxR174k,
    LooseBinding,
    Substitutions,
    Nannonsalax,
    Peromyscus,
    Onychomys,
    Nannunspalax,
    ConvergentHypoxia,
    RnaSeq,
    Cdkn1a,
    Apaf1,
    Survival,
    Apoptosis,
    TranscriptomicShift,
    HypoxiaSurvival,
}

impl LabelKey {
    pub const COUNT: usize = 20;

    pub const ALL: [LabelKey; Self::COUNT] = [
        LabelKey::Mdm2,
        LabelKey::P55,
        LabelKey::AlphaHelix,
        LabelKey::WildType,
        LabelKey::TightBinding,
        LabelKey::SpalaxR174k,
        LabelKey::LooseBinding,
        LabelKey::Substitutions,
        LabelKey::Nannonsalax,
        LabelKey::Peromyscus,
        LabelKey::Onychomys,
        LabelKey::Nannunspalax,
        LabelKey::ConvergentHypoxia,
        LabelKey::RnaSeq,
        LabelKey::Cdkn1a,
        LabelKey::Apaf1,
        LabelKey::Survival,
        LabelKey::Apoptosis,
        LabelKey::TranscriptomicShift,
        LabelKey::HypoxiaSurvival,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier, used for widget ids and SVG element ids.
    pub fn id(self) -> &'static str {
        match self {
            LabelKey::Mdm2 => "mdm2",
            LabelKey::P55 => "p55",
            LabelKey::AlphaHelix => "alpha_helix",
            LabelKey::WildType => "wild_type",
            LabelKey::TightBinding => "tight_binding",
            LabelKey::SpalaxR174k => "spalax_r174k",
            LabelKey::LooseBinding => "loose_binding",
            LabelKey::Substitutions => "substitutions",
            LabelKey::Nannonsalax => "nannonsalax",
            LabelKey::Peromyscus => "peromyscus",
            LabelKey::Onychomys => "onychomys",
            LabelKey::Nannunspalax => "nannunspalax",
            LabelKey::ConvergentHypoxia => "convergent_hypoxia",
            LabelKey::RnaSeq => "rna_seq",
            LabelKey::Cdkn1a => "cdkn1a",
            LabelKey::Apaf1 => "apaf1",
            LabelKey::Survival => "survival",
            LabelKey::Apoptosis => "apoptosis",
            LabelKey::TranscriptomicShift => "transcriptomic_shift",
            LabelKey::HypoxiaSurvival => "hypoxia_survival",
        }
    }

    pub fn default_text(self) -> &'static str {
        match self {
            LabelKey::Mdm2 => "MDM2",
            LabelKey::P55 => "p55",
            LabelKey::AlphaHelix => "α-HELIX",
            LabelKey::WildType => "WILD-TYPE",
            LabelKey::TightBinding => "TIGHT BINDING",
            LabelKey::SpalaxR174k => "SPALAX R174K",
            LabelKey::LooseBinding => "LOOSE BINDING",
            LabelKey::Substitutions => "Substitutions leaditog reduaing",
            LabelKey::Nannonsalax => "Nannonsalax",
            LabelKey::Peromyscus => "Peromyscus",
            LabelKey::Onychomys => "Onychomys",
            LabelKey::Nannunspalax => "Nannunspalax",
            LabelKey::ConvergentHypoxia => "CONVERGENT HYPOXIA ADAPTATION",
            LabelKey::RnaSeq => "RNA-seq",
            LabelKey::Cdkn1a => "CDKN1A/p21",
            LabelKey::Apaf1 => "APAF1",
            LabelKey::Survival => "SURVIVAL",
            LabelKey::Apoptosis => "APOPTOSIS",
            LabelKey::TranscriptomicShift => "Transcriptomic shift",
            LabelKey::HypoxiaSurvival => "Hypoxia survival",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_key_index_matches_all_order() {
        for (i, key) in LabelKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_label_key_ids_are_unique() {
        let mut ids: Vec<&str> = LabelKey::ALL.iter().map(|k| k.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), LabelKey::COUNT);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(Rgba::hex(0x4A4A4A), Rgba::rgb(74, 74, 74));
        assert_eq!(Rgba::hex(0xFBFBF6).with_alpha(128).a, 128);
    }

    #[test]
    fn test_tracking_scales_with_size() {
        let style = LabelStyle::sized(20.0).tracking_wider();
        assert!((style.letter_spacing - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_backdrop_padding_fits_margin() {
        let backdrop = |padding| Backdrop {
            fill: PAPER,
            stroke: None,
            corner_radius: 4.0,
            padding,
        };
        let margin = backdrop([8.0, 2.4]).frame().inner_margin;
        assert_eq!(margin, egui::Margin::symmetric(8, 2));
        let margin = backdrop([500.0, -3.0]).frame().inner_margin;
        assert_eq!(margin, egui::Margin::symmetric(127, 0));
        let margin = backdrop([f32::NAN, f32::INFINITY]).frame().inner_margin;
        assert_eq!(margin, egui::Margin::ZERO);
    }
}
