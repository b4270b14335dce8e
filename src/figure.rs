//! The fixed layout of the hypoxia-adaptation figure: shapes, connectors and
//! where each editable label sits. Coordinates are logical points on a
//! 1100x700 canvas.

use crate::model::{
    Backdrop, FontWeight, INK, LabelKey, LabelStyle, PAPER, Point, RectF, Rgba, StrokeStyle,
    TextAlign,
};
use crate::path::{Outline, PathError};

pub const CANVAS_WIDTH: f32 = 1100.0;
pub const CANVAS_HEIGHT: f32 = 700.0;

const PROTEIN_FILL: Rgba = Rgba::hex(0x8BC3A8);
const PROTEIN_HIGHLIGHT: Rgba = Rgba::hex(0xC8E6C9);
const HAND_FILL: Rgba = Rgba::hex(0xF2D5C2);
const MOLE_FILL: Rgba = Rgba::hex(0x9E9E9E);
const TREE_BOX_FILL: Rgba = Rgba::hex(0xE5E7EB);
const GREEN_TEXT: Rgba = Rgba::hex(0x166534);
const RED_TEXT: Rgba = Rgba::hex(0x991B1B);

const HEATMAP_INTENSITIES: [u8; 8] = [2, 3, 1, 2, 1, 2, 0, 1];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ramp {
    Green,
    Red,
}

impl Ramp {
    pub fn shades(self) -> [Rgba; 4] {
        match self {
            Ramp::Green => [
                Rgba::hex(0xE8F5E9),
                Rgba::hex(0xC8E6C9),
                Rgba::hex(0xA5D6A7),
                Rgba::hex(0x81C784),
            ],
            Ramp::Red => [
                Rgba::hex(0xFFEBEE),
                Rgba::hex(0xFFCDD2),
                Rgba::hex(0xEF9A9A),
                Rgba::hex(0xE57373),
            ],
        }
    }

    /// Cell intensities, row-major over 4 columns and 2 rows. The red ramp
    /// runs the green pattern backwards.
    pub fn intensities(self) -> [u8; 8] {
        let mut out = HEATMAP_INTENSITIES;
        if self == Ramp::Red {
            out.reverse();
        }
        out
    }
}

pub const HEATMAP_COLS: usize = 4;
pub const HEATMAP_ROWS: usize = 2;

/// One cell of a heatmap: its rectangle and colour.
pub fn heatmap_cells(rect: RectF, ramp: Ramp) -> impl Iterator<Item = (RectF, Rgba)> {
    let shades = ramp.shades();
    let w = rect.width() / HEATMAP_COLS as f32;
    let h = rect.height() / HEATMAP_ROWS as f32;
    ramp.intensities()
        .into_iter()
        .enumerate()
        .map(move |(i, intensity)| {
            let col = (i % HEATMAP_COLS) as f32;
            let row = (i / HEATMAP_COLS) as f32;
            let cell = RectF::from_xywh(rect.min.x + col * w, rect.min.y + row * h, w, h);
            (cell, shades[usize::from(intensity).min(shades.len() - 1)])
        })
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Outline from SVG path data, drawn at `offset`.
    Shape {
        data: &'static str,
        offset: Point,
        outline: Outline,
        fill: Option<Rgba>,
        stroke: Option<StrokeStyle>,
    },
    Ellipse {
        center: Point,
        radii: [f32; 2],
        fill: Rgba,
    },
    Segment {
        a: Point,
        b: Point,
        stroke: StrokeStyle,
    },
    Rect {
        rect: RectF,
        fill: Option<Rgba>,
        stroke: Option<StrokeStyle>,
    },
    Heatmap {
        rect: RectF,
        ramp: Ramp,
    },
    /// Open path ending in an arrowhead.
    Connector {
        data: &'static str,
        outline: Outline,
        stroke: StrokeStyle,
    },
}

/// Where a label sits and how it looks. The label is laid out inside
/// `anchor` according to `style.align`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    pub key: LabelKey,
    pub anchor: RectF,
    pub style: LabelStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub width: f32,
    pub height: f32,
    pub background: Rgba,
    pub primitives: Vec<Primitive>,
    pub labels: Vec<LabelPlacement>,
}

impl Figure {
    pub fn hypoxia_adaptation() -> Result<Self, PathError> {
        let mut b = FigureBuilder::default();
        b.binding_section()?;
        b.tree_section();
        b.heatmap_section();
        b.mole_rat_section()?;
        b.connectors()?;
        let figure = Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            background: PAPER,
            primitives: b.primitives,
            labels: b.labels,
        };
        log::debug!(
            "built figure with {} primitives and {} labels",
            figure.primitives.len(),
            figure.labels.len()
        );
        Ok(figure)
    }
}

#[derive(Default)]
struct FigureBuilder {
    primitives: Vec<Primitive>,
    labels: Vec<LabelPlacement>,
}

impl FigureBuilder {
    fn shape(
        &mut self,
        data: &'static str,
        offset: Point,
        fill: Option<Rgba>,
        stroke: Option<StrokeStyle>,
    ) -> Result<(), PathError> {
        let outline = Outline::parse(data)?.translated(offset.x, offset.y);
        self.primitives.push(Primitive::Shape {
            data,
            offset,
            outline,
            fill,
            stroke,
        });
        Ok(())
    }

    fn connector(&mut self, data: &'static str) -> Result<(), PathError> {
        let outline = Outline::parse(data)?;
        self.primitives.push(Primitive::Connector {
            data,
            outline,
            stroke: StrokeStyle::ink(2.0),
        });
        Ok(())
    }

    fn branch(&mut self, a: (f32, f32), b: (f32, f32)) {
        self.primitives.push(Primitive::Segment {
            a: Point::new(a.0, a.1),
            b: Point::new(b.0, b.1),
            stroke: StrokeStyle::ink(1.0),
        });
    }

    fn label(&mut self, key: LabelKey, anchor: RectF, style: LabelStyle) {
        self.labels.push(LabelPlacement { key, anchor, style });
    }

    /// Left-aligned label whose top-left corner is at `(x, y)`.
    fn label_at(&mut self, key: LabelKey, x: f32, y: f32, style: LabelStyle) {
        let width = style.wrap_width.unwrap_or(240.0);
        self.label(key, RectF::from_xywh(x, y, width, 60.0), style);
    }

    /// Label centred on the column `x .. x + width`.
    fn label_centered(&mut self, key: LabelKey, x: f32, y: f32, width: f32, style: LabelStyle) {
        self.label(
            key,
            RectF::from_xywh(x, y, width, 40.0),
            style.align(TextAlign::Center),
        );
    }

    fn handshake(&mut self, offset: Point) -> Result<(), PathError> {
        let stroke = Some(StrokeStyle::ink(2.0));
        self.shape(
            "M 20,30 C 10,40 10,50 25,55 L 70,45 C 80,42 90,30 80,20 C 70,10 50,15 40,20 Z",
            offset,
            Some(HAND_FILL),
            stroke,
        )?;
        self.shape(
            "M 100,30 C 110,20 110,10 95,5 L 50,15 C 40,18 30,30 40,40 C 50,50 70,45 80,40 Z",
            offset,
            Some(HAND_FILL),
            stroke,
        )
    }

    fn binding_section(&mut self) -> Result<(), PathError> {
        let protein = Point::new(40.0, 40.0);
        self.shape(
            "M 60,30 C 40,10 20,40 30,60 S 50,90 70,80 S 100,60 120,70 S 140,90 130,60 S 100,10 80,20 C 70,25 65,35 60,30 Z",
            protein,
            Some(PROTEIN_FILL),
            Some(StrokeStyle::ink(2.0)),
        )?;
        self.shape(
            "M 65,35 C 55,25 45,45 55,55 S 75,75 85,65 S 105,45 115,55",
            protein,
            None,
            Some(StrokeStyle::ink(1.5)),
        )?;
        self.shape(
            "M 90,40 C 80,30 70,50 80,60 S 100,80 110,70",
            protein,
            None,
            Some(StrokeStyle::ink(1.5)),
        )?;
        self.primitives.push(Primitive::Ellipse {
            center: protein.translated(60.0, 30.0),
            radii: [10.0, 5.0],
            fill: PROTEIN_HIGHLIGHT,
        });

        self.label(
            LabelKey::Mdm2,
            RectF::from_xywh(0.0, 48.0, 240.0, 40.0),
            LabelStyle::sized(18.0)
                .weight(FontWeight::Semibold)
                .align(TextAlign::Right),
        );
        self.label_at(LabelKey::P55, 64.0, 72.0, LabelStyle::sized(14.0));
        self.label_at(LabelKey::AlphaHelix, 48.0, 120.0, LabelStyle::sized(16.0));

        let caption = LabelStyle::sized(16.0)
            .weight(FontWeight::Bold)
            .tracking_wider();

        self.handshake(Point::new(80.0, 176.0))?;
        self.label_centered(LabelKey::WildType, 0.0, 236.0, 280.0, caption);
        self.label_centered(LabelKey::TightBinding, 0.0, 260.0, 280.0, caption);

        self.handshake(Point::new(80.0, 324.0))?;
        self.label_centered(LabelKey::SpalaxR174k, 0.0, 384.0, 280.0, caption);
        self.label_centered(LabelKey::LooseBinding, 0.0, 408.0, 280.0, caption);

        self.label_at(
            LabelKey::Substitutions,
            270.0,
            470.0,
            LabelStyle::sized(16.0).wrapped(160.0),
        );
        Ok(())
    }

    fn tree_section(&mut self) {
        let (x, y) = (350.0, 130.0);
        let species = LabelStyle::sized(16.0);

        self.branch((x, y), (x, y + 100.0));
        self.branch((x, y + 80.0), (x + 50.0, y + 80.0));
        self.branch((x + 50.0, y + 80.0), (x + 50.0, y + 200.0));

        self.branch((x, y), (x + 100.0, y));
        self.label_at(LabelKey::Nannonsalax, x + 110.0, y - 12.0, species);

        self.branch((x + 50.0, y + 40.0), (x + 100.0, y + 40.0));
        self.label_at(LabelKey::Peromyscus, x + 110.0, y + 28.0, species);

        self.branch((x + 50.0, y + 80.0), (x + 100.0, y + 80.0));
        self.label_at(LabelKey::Onychomys, x + 110.0, y + 70.0, species);

        self.label_at(
            LabelKey::Nannunspalax,
            x + 100.0,
            y + 120.0,
            LabelStyle::sized(16.0)
                .weight(FontWeight::Semibold)
                .backdrop(Backdrop {
                    fill: TREE_BOX_FILL,
                    stroke: Some(StrokeStyle::ink(1.0)),
                    corner_radius: 6.0,
                    padding: [8.0, 2.0],
                }),
        );

        self.branch((x, y + 220.0), (x + 100.0, y + 220.0));
        self.label_at(
            LabelKey::ConvergentHypoxia,
            x + 110.0,
            y + 210.0,
            LabelStyle::sized(16.0)
                .weight(FontWeight::Bold)
                .wrapped(150.0),
        );
    }

    fn heatmap_section(&mut self) {
        let (x, y, w) = (800.0, 50.0, 300.0);
        self.label_centered(
            LabelKey::RnaSeq,
            x,
            y,
            w,
            LabelStyle::sized(18.0).weight(FontWeight::Semibold),
        );

        let grid = RectF::from_xywh(x, y + 36.0, w, 200.0);
        let (cw, ch) = (grid.width() / 2.0, grid.height() / 2.0);
        let cell = |col: f32, row: f32| {
            RectF::from_xywh(grid.min.x + col * cw, grid.min.y + row * ch, cw, ch)
        };
        for (col, row, ramp) in [
            (0.0, 0.0, Ramp::Green),
            (1.0, 0.0, Ramp::Green),
            (0.0, 1.0, Ramp::Red),
            (1.0, 1.0, Ramp::Red),
        ] {
            self.primitives.push(Primitive::Heatmap {
                rect: cell(col, row),
                ramp,
            });
        }
        let frame = StrokeStyle::ink(2.0);
        self.primitives.push(Primitive::Segment {
            a: Point::new(grid.center_x(), grid.min.y),
            b: Point::new(grid.center_x(), grid.max.y),
            stroke: frame,
        });
        self.primitives.push(Primitive::Segment {
            a: Point::new(grid.min.x, grid.min.y + ch),
            b: Point::new(grid.max.x, grid.min.y + ch),
            stroke: frame,
        });
        self.primitives.push(Primitive::Rect {
            rect: grid,
            fill: None,
            stroke: Some(frame),
        });

        let gene_backdrop = Backdrop {
            fill: Rgba::rgb(255, 255, 255).with_alpha(178),
            stroke: None,
            corner_radius: 4.0,
            padding: [12.0, 4.0],
        };
        let gene = LabelStyle::sized(16.0)
            .weight(FontWeight::Bold)
            .backdrop(gene_backdrop);
        let label_y = |c: RectF| c.min.y + c.height() * 0.5 - 16.0;
        let top = cell(0.0, 0.0);
        let bottom = cell(0.0, 1.0);
        self.label_centered(
            LabelKey::Cdkn1a,
            top.min.x,
            label_y(top),
            top.width(),
            gene.color(GREEN_TEXT),
        );
        self.label_centered(
            LabelKey::Apaf1,
            bottom.min.x,
            label_y(bottom),
            bottom.width(),
            gene.color(RED_TEXT),
        );

        let outcome = LabelStyle::sized(16.0)
            .weight(FontWeight::Bold)
            .tracking_wider();
        let outcome_y = grid.max.y + 8.0;
        self.label_centered(LabelKey::Survival, x, outcome_y, w / 2.0, outcome);
        self.label_centered(LabelKey::Apoptosis, x + w / 2.0, outcome_y, w / 2.0, outcome);
    }

    fn mole_rat_section(&mut self) -> Result<(), PathError> {
        let mole = Point::new(550.0, 550.0);
        self.shape(
            "M 10,40 C 5,30 20,10 40,15 C 60,20 80,15 100,30 C 115,45 110,60 90,65 L 30,65 C 10,60 15,50 10,40 Z",
            mole,
            Some(MOLE_FILL),
            Some(StrokeStyle::ink(2.0)),
        )?;
        self.primitives.push(Primitive::Ellipse {
            center: mole.translated(95.0, 30.0),
            radii: [3.0, 3.0],
            fill: INK,
        });
        self.shape(
            "M 20,65 C 15,70 10,65 15,60",
            mole,
            None,
            Some(StrokeStyle::ink(2.0)),
        )?;

        let summary = LabelStyle::sized(18.0).weight(FontWeight::Semibold);
        self.label_at(LabelKey::TranscriptomicShift, 702.0, 557.0, summary);
        self.label_at(LabelKey::HypoxiaSurvival, 702.0, 585.0, summary);
        Ok(())
    }

    fn connectors(&mut self) -> Result<(), PathError> {
        // binding -> tree
        self.connector("M 280 200 L 340 200")?;
        // tree -> heatmap
        self.connector("M 560 130 L 780 130")?;
        // spalax -> substitutions
        self.connector("M 140 470 C 180 500, 220 500, 260 480")?;
        // tree -> mole rat
        self.connector("M 450 380 C 450 480, 500 550, 550 560")?;
        // heatmap -> mole rat
        self.connector("M 850 300 C 850 450, 750 550, 700 560")
    }
}
