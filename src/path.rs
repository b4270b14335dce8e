//! SVG path data → flattened outlines.
//!
//! egui only fills convex polygons, so closed outlines are also split into
//! triangles here before they reach the painter.

use crate::model::Point;
use svgtypes::{SimplePathSegment, SimplifyingPathParser};
use thiserror::Error;

const CUBIC_STEPS: usize = 16;
const QUAD_STEPS: usize = 12;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("invalid path data {data:?}: {source}")]
    Parse {
        data: String,
        #[source]
        source: svgtypes::Error,
    },
    #[error("path data {0:?} does not start with a move")]
    MissingMove(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<Point>,
    pub closed: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    pub contours: Vec<Contour>,
}

impl Outline {
    /// Parses absolute or relative path data (M, L, H, V, C, S, Q, T, A, Z)
    /// and flattens every curve into line segments.
    pub fn parse(data: &str) -> Result<Self, PathError> {
        let mut contours: Vec<Contour> = Vec::new();
        let mut current: Option<Contour> = None;
        let mut pen = Point::default();

        for segment in SimplifyingPathParser::from(data) {
            let segment = segment.map_err(|source| PathError::Parse {
                data: data.to_string(),
                source,
            })?;
            match segment {
                SimplePathSegment::MoveTo { x, y } => {
                    if let Some(done) = current.take() {
                        push_contour(&mut contours, done);
                    }
                    pen = point(x, y);
                    current = Some(Contour {
                        points: vec![pen],
                        closed: false,
                    });
                }
                SimplePathSegment::LineTo { x, y } => {
                    let contour = current
                        .as_mut()
                        .ok_or_else(|| PathError::MissingMove(data.to_string()))?;
                    pen = point(x, y);
                    contour.points.push(pen);
                }
                SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let contour = current
                        .as_mut()
                        .ok_or_else(|| PathError::MissingMove(data.to_string()))?;
                    let (c1, c2, end) = (point(x1, y1), point(x2, y2), point(x, y));
                    for i in 1..=CUBIC_STEPS {
                        let t = i as f32 / CUBIC_STEPS as f32;
                        contour.points.push(cubic(pen, c1, c2, end, t));
                    }
                    pen = end;
                }
                SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    let contour = current
                        .as_mut()
                        .ok_or_else(|| PathError::MissingMove(data.to_string()))?;
                    let (c, end) = (point(x1, y1), point(x, y));
                    for i in 1..=QUAD_STEPS {
                        let t = i as f32 / QUAD_STEPS as f32;
                        contour.points.push(quadratic(pen, c, end, t));
                    }
                    pen = end;
                }
                SimplePathSegment::ClosePath => {
                    if let Some(mut done) = current.take() {
                        done.closed = true;
                        if let Some(&first) = done.points.first() {
                            pen = first;
                        }
                        push_contour(&mut contours, done);
                    }
                }
            }
        }
        if let Some(done) = current.take() {
            push_contour(&mut contours, done);
        }
        Ok(Self { contours })
    }

    pub fn translated(mut self, dx: f32, dy: f32) -> Self {
        for contour in &mut self.contours {
            for p in &mut contour.points {
                *p = p.translated(dx, dy);
            }
        }
        self
    }

    /// Last two distinct points of the final contour, i.e. the direction the
    /// outline ends in. Used to orient arrowheads.
    pub fn end_direction(&self) -> Option<(Point, Point)> {
        let points = &self.contours.last()?.points;
        let tip = *points.last()?;
        let from = points.iter().rev().skip(1).find(|p| **p != tip)?;
        Some((*from, tip))
    }
}

fn point(x: f64, y: f64) -> Point {
    Point::new(x as f32, y as f32)
}

fn push_contour(out: &mut Vec<Contour>, mut contour: Contour) {
    contour.points.dedup();
    if contour.closed && contour.points.len() > 1 && contour.points.first() == contour.points.last() {
        contour.points.pop();
    }
    if contour.points.len() > 1 {
        out.push(contour);
    }
}

fn cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

fn quadratic(p0: Point, p1: Point, p2: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let (a, b, c) = (u * u, 2.0 * u * t, t * t);
    Point::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

fn signed_area(points: &[Point]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f32>()
        * 0.5
}

fn cross(a: Point, b: Point, c: Point) -> f32 {
    (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x)
}

fn contains(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Ear-clipping triangulation of a simple polygon. Returns index triples
/// into `points`.
///
/// Self-intersecting outlines have no ear at some point; the first convex
/// corner is clipped anyway so the fill degrades instead of vanishing.
pub fn triangulate(points: &[Point]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let mut ring: Vec<usize> = (0..n).collect();
    if signed_area(points) < 0.0 {
        ring.reverse();
    }
    let mut out = Vec::with_capacity(n - 2);

    while ring.len() > 3 {
        let m = ring.len();
        let corner = |i: usize| (ring[(i + m - 1) % m], ring[i], ring[(i + 1) % m]);
        let is_convex = |i: usize| {
            let (a, b, c) = corner(i);
            cross(points[a], points[b], points[c]) > 0.0
        };
        let is_ear = |i: usize| {
            let (a, b, c) = corner(i);
            is_convex(i)
                && ring.iter().all(|&p| {
                    p == a
                        || p == b
                        || p == c
                        || points[p] == points[a]
                        || points[p] == points[b]
                        || points[p] == points[c]
                        || !contains(points[p], points[a], points[b], points[c])
                })
        };
        let Some(i) = (0..m).find(|&i| is_ear(i)).or_else(|| (0..m).find(|&i| is_convex(i)))
        else {
            break;
        };
        let (a, b, c) = corner(i);
        out.push([a, b, c]);
        ring.remove(i);
    }
    if ring.len() == 3 {
        out.push([ring[0], ring[1], ring[2]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_of(points: &[Point], tris: &[[usize; 3]]) -> f32 {
        tris.iter()
            .map(|t| signed_area(&[points[t[0]], points[t[1]], points[t[2]]]).abs())
            .sum()
    }

    #[test]
    fn test_parse_lines_and_close() {
        let outline = Outline::parse("M 0 0 L 10 5 L 0 10 z").unwrap();
        assert_eq!(outline.contours.len(), 1);
        let contour = &outline.contours[0];
        assert!(contour.closed);
        assert_eq!(
            contour.points,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0), Point::new(0.0, 10.0)]
        );
    }

    #[test]
    fn test_parse_comma_separated_cubic() {
        let outline = Outline::parse("M 140 470 C 180 500, 220 500, 260 480").unwrap();
        let points = &outline.contours[0].points;
        assert_eq!(points.len(), CUBIC_STEPS + 1);
        assert_eq!(points[0], Point::new(140.0, 470.0));
        let end = *points.last().unwrap();
        assert!((end.x - 260.0).abs() < 1e-3 && (end.y - 480.0).abs() < 1e-3);
        assert!(!outline.contours[0].closed);
    }

    #[test]
    fn test_parse_smooth_cubic_continues_from_pen() {
        let outline = Outline::parse("M 20,65 C 15,70 10,65 15,60 S 30,50 40,60").unwrap();
        let end = *outline.contours[0].points.last().unwrap();
        assert!((end.x - 40.0).abs() < 1e-3 && (end.y - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Outline::parse("M 0 0 L x y").is_err());
    }

    #[test]
    fn test_translated() {
        let outline = Outline::parse("M 0 0 L 10 0").unwrap().translated(5.0, -2.0);
        assert_eq!(
            outline.contours[0].points,
            vec![Point::new(5.0, -2.0), Point::new(15.0, -2.0)]
        );
    }

    #[test]
    fn test_end_direction() {
        let outline = Outline::parse("M 280 200 L 340 200").unwrap();
        assert_eq!(
            outline.end_direction(),
            Some((Point::new(280.0, 200.0), Point::new(340.0, 200.0)))
        );
    }

    #[test]
    fn test_triangulate_square() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let tris = triangulate(&square);
        assert_eq!(tris.len(), 2);
        assert!((area_of(&square, &tris) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_triangulate_concave_keeps_area() {
        // L shape, area 3 units of 10x10
        let l = [
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 20.0),
            Point::new(0.0, 20.0),
        ];
        let tris = triangulate(&l);
        assert_eq!(tris.len(), l.len() - 2);
        assert!((area_of(&l, &tris) - 300.0).abs() < 1e-3);

        let mut reversed = l;
        reversed.reverse();
        assert!((area_of(&reversed, &triangulate(&reversed)) - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_triangulate_degenerate() {
        assert!(triangulate(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_empty());
    }
}
