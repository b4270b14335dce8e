use crate::figure::{self, Figure, LabelPlacement, Primitive};
use crate::model::{self, FontWeight, INK, TextAlign};
use crate::store::LabelStore;
use thiserror::Error;

const ARROW_MARKER: &str = "arrowhead";

#[derive(Debug, Error)]
pub(super) enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn rgba_to_svg_rgb(rgba: model::Rgba) -> (String, f32) {
    let opacity = (rgba.a as f32) / 255.0;
    (format!("rgb({},{},{})", rgba.r, rgba.g, rgba.b), opacity)
}

fn fill_attrs(fill: Option<model::Rgba>) -> String {
    match fill {
        Some(rgba) if rgba.a > 0 => {
            let (rgb, opacity) = rgba_to_svg_rgb(rgba);
            if rgba.a == 255 {
                format!(r#"fill="{}""#, rgb)
            } else {
                format!(r#"fill="{}" fill-opacity="{:.3}""#, rgb, opacity)
            }
        }
        _ => r#"fill="none""#.to_string(),
    }
}

fn stroke_attrs(stroke: Option<model::StrokeStyle>) -> String {
    match stroke {
        Some(s) => {
            let (rgb, _) = rgba_to_svg_rgb(s.color);
            format!(r#"stroke="{}" stroke-width="{}""#, rgb, s.width)
        }
        None => String::new(),
    }
}

fn svg_text_anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

/// Rough advance width of one glyph; SVG has no layout engine to ask.
fn approx_char_width(size: f32) -> f32 {
    size * 0.6
}

fn approx_text_width(text: &str, style: &model::LabelStyle) -> f32 {
    let n = text.chars().count() as f32;
    n * (approx_char_width(style.size) + style.letter_spacing)
}

/// Greedy word wrap against the approximate glyph width.
fn wrap_lines(text: &str, style: &model::LabelStyle) -> Vec<String> {
    let Some(max_width) = style.wrap_width else {
        return vec![text.to_string()];
    };
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && approx_text_width(&candidate, style) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn primitive_to_svg(out: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Shape {
            data,
            offset,
            fill,
            stroke,
            ..
        } => {
            out.push_str(&format!(
                r#"<path d="{}" transform="translate({} {})" {} {} />"#,
                escape_xml(data),
                offset.x,
                offset.y,
                fill_attrs(*fill),
                stroke_attrs(*stroke)
            ));
        }
        Primitive::Ellipse {
            center,
            radii,
            fill,
        } => {
            out.push_str(&format!(
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {} />"#,
                center.x,
                center.y,
                radii[0],
                radii[1],
                fill_attrs(Some(*fill))
            ));
        }
        Primitive::Segment { a, b, stroke } => {
            out.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {} />"#,
                a.x,
                a.y,
                b.x,
                b.y,
                stroke_attrs(Some(*stroke))
            ));
        }
        Primitive::Rect { rect, fill, stroke } => {
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" {} {} />"#,
                rect.min.x,
                rect.min.y,
                rect.width(),
                rect.height(),
                fill_attrs(*fill),
                stroke_attrs(*stroke)
            ));
        }
        Primitive::Heatmap { rect, ramp } => {
            out.push_str("<g>");
            for (cell, color) in figure::heatmap_cells(*rect, *ramp) {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" {} />"#,
                    cell.min.x,
                    cell.min.y,
                    cell.width(),
                    cell.height(),
                    fill_attrs(Some(color))
                ));
            }
            out.push_str("</g>");
        }
        Primitive::Connector { data, stroke, .. } => {
            out.push_str(&format!(
                r#"<path d="{}" fill="none" {} marker-end="url(#{})" />"#,
                escape_xml(data),
                stroke_attrs(Some(*stroke)),
                ARROW_MARKER
            ));
        }
    }
    out.push('\n');
}

fn label_to_svg(out: &mut String, placement: &LabelPlacement, value: &str) {
    if value.is_empty() {
        return;
    }
    let style = &placement.style;
    let lines = wrap_lines(value, style);
    let line_height = style.line_height.unwrap_or(style.size * 1.5);
    let width = lines
        .iter()
        .map(|l| approx_text_width(l, style))
        .fold(0.0_f32, f32::max);
    let anchor = placement.anchor;
    let x = match style.align {
        TextAlign::Left => anchor.min.x,
        TextAlign::Center => anchor.center_x(),
        TextAlign::Right => anchor.max.x,
    };
    let mut y = anchor.min.y;

    out.push_str(&format!(r#"<g id="label-{}">"#, placement.key.id()));
    if let Some(backdrop) = style.backdrop {
        let [px, py] = backdrop.padding;
        let box_width = width + px * 2.0;
        let left = match style.align {
            TextAlign::Left => anchor.min.x,
            TextAlign::Center => anchor.center_x() - box_width * 0.5,
            TextAlign::Right => anchor.max.x - box_width,
        };
        let stroke = backdrop
            .stroke
            .map(|s| format!(" {}", stroke_attrs(Some(s))))
            .unwrap_or_default();
        out.push_str(&format!(
            r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" rx="{}" {}{} />"#,
            left,
            y,
            box_width,
            line_height * lines.len() as f32 + py * 2.0,
            backdrop.corner_radius,
            fill_attrs(Some(backdrop.fill)),
            stroke
        ));
        y += py;
    }
    let x = match (style.backdrop, style.align) {
        (Some(b), TextAlign::Left) => x + b.padding[0],
        (Some(b), TextAlign::Right) => x - b.padding[0],
        _ => x,
    };

    let (fill, _) = rgba_to_svg_rgb(style.color);
    let mut attrs = format!(
        r#"x="{}" y="{:.3}" font-family="sans-serif" font-size="{}" text-anchor="{}" fill="{}""#,
        x,
        y + style.size,
        style.size,
        svg_text_anchor(style.align),
        fill
    );
    if style.weight != FontWeight::Normal {
        attrs.push_str(&format!(r#" font-weight="{}""#, style.weight.css_value()));
    }
    if style.letter_spacing > 0.0 {
        attrs.push_str(&format!(r#" letter-spacing="{:.3}""#, style.letter_spacing));
    }
    out.push_str(&format!("<text {}>", attrs));
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push_str(&escape_xml(line));
        } else {
            out.push_str(&format!(
                r#"<tspan x="{}" dy="{:.3}">{}</tspan>"#,
                x,
                line_height,
                escape_xml(line)
            ));
        }
    }
    out.push_str("</text></g>\n");
}

/// Standalone SVG of the figure with the current label text.
pub(super) fn figure_to_svg(figure: &Figure, labels: &LabelStore) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
        figure.width, figure.height, figure.width, figure.height
    ));
    out.push('\n');
    let (ink, _) = rgba_to_svg_rgb(INK);
    out.push_str("<defs>\n");
    out.push_str(&format!(
        r#"<marker id="{}" viewBox="0 0 10 10" refX="8" refY="5" markerWidth="6" markerHeight="6" orient="auto-start-reverse">"#,
        ARROW_MARKER
    ));
    out.push('\n');
    out.push_str(&format!(r#"<path d="M 0 0 L 10 5 L 0 10 z" fill="{}"/>"#, ink));
    out.push('\n');
    out.push_str("</marker>\n</defs>\n");
    out.push_str(&format!(
        r#"<rect width="{}" height="{}" {} />"#,
        figure.width,
        figure.height,
        fill_attrs(Some(figure.background))
    ));
    out.push('\n');

    for primitive in &figure.primitives {
        primitive_to_svg(&mut out, primitive);
    }
    for placement in &figure.labels {
        label_to_svg(&mut out, placement, labels.get(placement.key));
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelKey, LabelStyle};

    fn figure() -> Figure {
        Figure::hypoxia_adaptation().unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a<b>&"c"'"#), "a&lt;b&gt;&amp;&quot;c&quot;&apos;");
    }

    #[test]
    fn test_contains_current_label_values() {
        let mut labels = LabelStore::default();
        labels.update(LabelKey::Mdm2, "MDM2A");
        let svg = figure_to_svg(&figure(), &labels);
        assert!(svg.contains(">MDM2A<"));
        assert!(svg.contains("α-HELIX"));
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_label_text_is_escaped() {
        let mut labels = LabelStore::default();
        labels.update(LabelKey::P55, "p<53> & co");
        let svg = figure_to_svg(&figure(), &labels);
        assert!(svg.contains("p&lt;53&gt; &amp; co"));
        assert!(!svg.contains("p<53>"));
    }

    #[test]
    fn test_empty_label_is_omitted() {
        let mut labels = LabelStore::default();
        labels.update(LabelKey::RnaSeq, "");
        let svg = figure_to_svg(&figure(), &labels);
        assert!(!svg.contains(r#"id="label-rna_seq""#));
        assert!(!svg.contains("(empty)"));
        assert!(svg.contains(r#"id="label-apaf1""#));
    }

    #[test]
    fn test_connectors_reference_marker() {
        let svg = figure_to_svg(&figure(), &LabelStore::default());
        assert_eq!(svg.matches(r#"marker-end="url(#arrowhead)""#).count(), 5);
        assert!(svg.contains(r#"<marker id="arrowhead""#));
    }

    #[test]
    fn test_heatmaps_emit_all_cells() {
        let svg = figure_to_svg(&figure(), &LabelStore::default());
        // 4 heatmaps of 8 cells, the panel frame, the background and the
        // backdrops behind nannunspalax, cdkn1a and apaf1
        assert_eq!(svg.matches("<rect").count(), 4 * 8 + 1 + 1 + 3);
    }

    #[test]
    fn test_wrap_lines() {
        let style = LabelStyle::sized(16.0).wrapped(150.0);
        let lines = wrap_lines("CONVERGENT HYPOXIA ADAPTATION", &style);
        assert_eq!(lines, vec!["CONVERGENT", "HYPOXIA", "ADAPTATION"]);
        let single = LabelStyle::sized(16.0);
        assert_eq!(wrap_lines("a b c", &single), vec!["a b c"]);
    }
}
