use crate::figure::{self, Figure, Primitive};
use crate::model::{self, Point};
use crate::path::{self, Outline};
use eframe::egui;

const ARROW_SIZE: f32 = 10.0;

fn to_screen(offset: egui::Vec2, p: Point) -> egui::Pos2 {
    p.to_pos2() + offset
}

pub(super) fn draw_background(painter: &egui::Painter, rect: egui::Rect, color: model::Rgba) {
    painter.rect_filled(rect, 0.0, color.to_color32());
}

pub(super) fn draw_figure(painter: &egui::Painter, offset: egui::Vec2, figure: &Figure) {
    for primitive in &figure.primitives {
        draw_primitive(painter, offset, primitive);
    }
}

fn draw_primitive(painter: &egui::Painter, offset: egui::Vec2, primitive: &Primitive) {
    match primitive {
        Primitive::Shape {
            outline,
            fill,
            stroke,
            ..
        } => {
            if let Some(fill) = fill {
                fill_outline(painter, offset, outline, fill.to_color32());
            }
            if let Some(stroke) = stroke {
                stroke_outline(painter, offset, outline, stroke.to_stroke());
            }
        }
        Primitive::Ellipse {
            center,
            radii,
            fill,
        } => {
            painter.add(egui::Shape::ellipse_filled(
                to_screen(offset, *center),
                egui::vec2(radii[0], radii[1]),
                fill.to_color32(),
            ));
        }
        Primitive::Segment { a, b, stroke } => {
            painter.line_segment(
                [to_screen(offset, *a), to_screen(offset, *b)],
                stroke.to_stroke(),
            );
        }
        Primitive::Rect { rect, fill, stroke } => {
            let r = rect.to_rect().translate(offset);
            if let Some(fill) = fill {
                painter.rect_filled(r, 0.0, fill.to_color32());
            }
            if let Some(stroke) = stroke {
                painter.rect_stroke(r, 0.0, stroke.to_stroke(), egui::StrokeKind::Inside);
            }
        }
        Primitive::Heatmap { rect, ramp } => {
            for (cell, color) in figure::heatmap_cells(*rect, *ramp) {
                painter.rect_filled(cell.to_rect().translate(offset), 0.0, color.to_color32());
            }
        }
        Primitive::Connector {
            outline, stroke, ..
        } => {
            let stroke = stroke.to_stroke();
            stroke_outline(painter, offset, outline, stroke);
            if let Some((from, tip)) = outline.end_direction() {
                draw_arrowhead(
                    painter,
                    to_screen(offset, from),
                    to_screen(offset, tip),
                    stroke,
                );
            }
        }
    }
}

fn stroke_outline(
    painter: &egui::Painter,
    offset: egui::Vec2,
    outline: &Outline,
    stroke: egui::Stroke,
) {
    for contour in &outline.contours {
        let points: Vec<egui::Pos2> = contour
            .points
            .iter()
            .map(|p| to_screen(offset, *p))
            .collect();
        if contour.closed {
            painter.add(egui::Shape::closed_line(points, stroke));
        } else {
            painter.add(egui::Shape::line(points, stroke));
        }
    }
}

/// Fills each closed contour through a triangle mesh; egui's own polygon
/// fill is only correct for convex shapes.
fn fill_outline(
    painter: &egui::Painter,
    offset: egui::Vec2,
    outline: &Outline,
    color: egui::Color32,
) {
    let mut mesh = egui::Mesh::default();
    for contour in outline.contours.iter().filter(|c| c.closed) {
        let base = mesh.vertices.len() as u32;
        for p in &contour.points {
            mesh.colored_vertex(to_screen(offset, *p), color);
        }
        for [a, b, c] in path::triangulate(&contour.points) {
            mesh.add_triangle(base + a as u32, base + b as u32, base + c as u32);
        }
    }
    if !mesh.indices.is_empty() {
        painter.add(egui::Shape::mesh(mesh));
    }
}

fn draw_arrowhead(painter: &egui::Painter, a: egui::Pos2, b: egui::Pos2, stroke: egui::Stroke) {
    let v = b - a;
    if v.length_sq() <= f32::EPSILON {
        return;
    }
    let dir = v.normalized();
    let perp = egui::vec2(-dir.y, dir.x);
    let tip = b;
    let base = b - dir * ARROW_SIZE;
    let left = base + perp * (ARROW_SIZE * 0.5);
    let right = base - perp * (ARROW_SIZE * 0.5);
    painter.add(egui::Shape::convex_polygon(
        vec![tip, left, right],
        stroke.color,
        egui::Stroke::NONE,
    ));
}

/// Debug outline of a label's anchor box.
pub(super) fn draw_anchor_outline(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 160, 255));
    painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
}
